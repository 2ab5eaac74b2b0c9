use crate::shared::Direction;
use log::debug;

/**
 * Pending stops of the car, split by the direction they are served in.
 *
 * The upward queue is kept strictly ascending and the downward queue strictly
 * descending, so the head of each queue is always the next stop when
 * travelling in that direction. A floor may sit in both queues at once.
 *
 * # Fields
 * - `upward`:      Stops served while going up.
 * - `downward`:    Stops served while going down.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestQueues {
    upward: Vec<i32>,
    downward: Vec<i32>,
}

/// Next stop as chosen by `RequestQueues::peek_next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextStop {
    pub floor: i32,
    pub direction: Direction,
    pub flipped: bool,
}

impl RequestQueues {
    pub fn new() -> RequestQueues {
        RequestQueues::default()
    }

    pub fn upward(&self) -> &[i32] {
        &self.upward
    }

    pub fn downward(&self) -> &[i32] {
        &self.downward
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.upward.is_empty() && self.downward.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, floor: i32, direction: Direction) -> bool {
        self.queue(direction).contains(&floor)
    }

    /// Inserts `floor` into the queue for `direction` unless it is already there.
    pub fn enqueue(&mut self, floor: i32, direction: Direction) {
        let queue = self.queue_mut(direction);
        let position = match direction {
            Direction::Up => queue.binary_search(&floor),
            Direction::Down => queue.binary_search_by(|f| floor.cmp(f)),
        };

        if let Err(index) = position {
            queue.insert(index, floor);
            debug!("Queued floor {} going {}", floor, direction);
        }
    }

    /// Same as `enqueue`, but takes a raw direction tag. Unknown tags leave both queues untouched.
    #[cfg(test)]
    pub fn enqueue_tagged(&mut self, floor: i32, tag: u8) {
        match Direction::from_tag(tag) {
            Some(direction) => self.enqueue(floor, direction),
            None => debug!("Ignoring floor {} with unknown direction tag {}", floor, tag),
        }
    }

    pub fn front(&self, direction: Direction) -> Option<i32> {
        self.queue(direction).first().copied()
    }

    /// Drops the head of the queue for `direction`, if any.
    pub fn dequeue_front(&mut self, direction: Direction) {
        let queue = self.queue_mut(direction);
        if !queue.is_empty() {
            queue.remove(0);
        }
    }

    /// Removes `floor` from the queue for `direction` wherever it sits.
    pub fn remove(&mut self, floor: i32, direction: Direction) -> bool {
        let queue = self.queue_mut(direction);
        match queue.iter().position(|f| *f == floor) {
            Some(index) => {
                queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Head of the queue for `current`, falling back to the head of the other queue.
    pub fn peek_next(&self, current: Direction) -> Option<NextStop> {
        if let Some(floor) = self.front(current) {
            return Some(NextStop {
                floor,
                direction: current,
                flipped: false,
            });
        }

        let other = current.opposite();
        self.front(other).map(|floor| NextStop {
            floor,
            direction: other,
            flipped: true,
        })
    }

    /// Replaces both queues with a single pending stop at `base_floor`.
    pub fn reset_to(&mut self, base_floor: i32) {
        self.upward = vec![base_floor];
        self.downward = vec![base_floor];
    }

    fn queue(&self, direction: Direction) -> &Vec<i32> {
        match direction {
            Direction::Up => &self.upward,
            Direction::Down => &self.downward,
        }
    }

    fn queue_mut(&mut self, direction: Direction) -> &mut Vec<i32> {
        match direction {
            Direction::Up => &mut self.upward,
            Direction::Down => &mut self.downward,
        }
    }
}
