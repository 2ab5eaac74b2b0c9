use crate::config::CarConfig;
use crate::elevator::queues::RequestQueues;
use crate::shared::{CarSnapshot, CarState, Direction};
use log::{debug, info};

/**
 * The single car being dispatched.
 *
 * # Fields
 * - `floor`:       Current resting floor. Only advanced by `Scheduler::record_arrival`.
 * - `occupancy`:   Advisory passenger count, read by the availability gate.
 * - `state`:       Error, stopped or running.
 * - `direction`:   Preferred scan direction.
 * - `queues`:      Pending stops for both directions.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub floor: i32,
    pub occupancy: u32,
    pub state: CarState,
    pub direction: Direction,
    pub queues: RequestQueues,
}

/// Outcome of `Scheduler::admit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Deferred,
}

impl Car {
    /// A car resting at `floor`, with the resting floor registered as an already served stop.
    ///
    /// At `base_floor` the sentinel goes into the upward queue, anywhere else an
    /// equal floor classifies as going down.
    pub fn at(floor: i32, occupancy: u32, state: CarState, base_floor: i32) -> Car {
        let mut queues = RequestQueues::new();
        if floor == base_floor {
            queues.enqueue(floor, Direction::Up);
        } else {
            queues.enqueue(floor, Direction::Down);
        }

        Car {
            floor,
            occupancy,
            state,
            direction: Direction::Up,
            queues,
        }
    }

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            floor: self.floor,
            occupancy: self.occupancy,
            state: self.state,
            direction: self.direction,
            upward_queue: self.queues.upward().to_vec(),
            downward_queue: self.queues.downward().to_vec(),
        }
    }
}

/**
 * Owns the car and decides where it goes next.
 *
 * Choosing the next stop and committing the arrival are separate calls so the
 * controller can simulate travel in between without touching the queues.
 */
#[derive(Debug, Clone)]
pub struct Scheduler {
    car: Car,
    capacity: u32,
    base_floor: i32,
}

impl Scheduler {
    pub fn new(config: &CarConfig) -> Scheduler {
        Scheduler::with_car(
            Car::at(config.base_floor, 0, CarState::Stopped, config.base_floor),
            config.capacity,
            config.base_floor,
        )
    }

    pub fn with_car(car: Car, capacity: u32, base_floor: i32) -> Scheduler {
        Scheduler {
            car,
            capacity,
            base_floor,
        }
    }

    #[cfg(test)]
    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn floor(&self) -> i32 {
        self.car.floor
    }

    pub fn state(&self) -> CarState {
        self.car.state
    }

    pub fn direction(&self) -> Direction {
        self.car.direction
    }

    pub fn snapshot(&self) -> CarSnapshot {
        self.car.snapshot()
    }

    pub fn set_state(&mut self, state: CarState) {
        if self.car.state != state {
            debug!("Car state {} -> {}", self.car.state, state);
            self.car.state = state;
        }
    }

    pub fn set_occupancy(&mut self, occupancy: u32) {
        self.car.occupancy = occupancy;
    }

    /// True when the car is fault free and below its occupancy ceiling.
    pub fn can_accept(&self) -> bool {
        self.car.state != CarState::Error && self.car.occupancy < self.capacity
    }

    /// Next stop for the current direction, reversing when only the opposite queue has work.
    pub fn next_stop(&mut self) -> Option<i32> {
        let next = self.car.queues.peek_next(self.car.direction)?;
        if next.flipped {
            info!(
                "No more stops going {}, turning {}",
                self.car.direction, next.direction
            );
            self.car.direction = next.direction;
        }
        Some(next.floor)
    }

    /// Moves the car to `floor` and retires the served stop from the `direction` queue.
    pub fn record_arrival(&mut self, floor: i32, direction: Direction) {
        self.car.floor = floor;

        // A stop admitted during travel may have been sorted in ahead of the one just served
        if self.car.queues.front(direction) == Some(floor) {
            self.car.queues.dequeue_front(direction);
        } else if !self.car.queues.remove(floor, direction) {
            debug!("Floor {} was no longer queued going {}", floor, direction);
        }
    }

    /// Queues a stop. Requests the gate turns away are still queued, to be served later.
    pub fn admit(&mut self, floor: i32, direction: Direction) -> Admission {
        self.car.queues.enqueue(floor, direction);

        if self.can_accept() {
            Admission::Accepted
        } else {
            Admission::Deferred
        }
    }

    /// Queues the current floor going down after an in-cab selection of it.
    ///
    /// The car makes a zero-distance stop there later, with the usual travel delay.
    pub fn queue_exit_stop(&mut self, floor: i32) {
        self.car.queues.enqueue(floor, Direction::Down);
    }

    /// Restores both queues to the base floor.
    pub fn reset_to_base_level(&mut self) {
        info!("Resetting queues to base floor {}", self.base_floor);
        self.car.queues.reset_to(self.base_floor);
    }

    #[cfg(test)]
    pub fn queues_mut(&mut self) -> &mut RequestQueues {
        &mut self.car.queues
    }

    #[cfg(test)]
    pub fn set_direction(&mut self, direction: Direction) {
        self.car.direction = direction;
    }
}
