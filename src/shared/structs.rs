/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*             Constants               */
/***************************************/
#[cfg(test)]
pub const DIRN_DOWN: u8 = 0;
#[cfg(test)]
pub const DIRN_UP: u8 = 1;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarState {
    Error,
    Stopped,
    Running,
}

impl Direction {
    /// Decodes a raw direction tag. Unknown tags yield `None`.
    #[cfg(test)]
    pub fn from_tag(tag: u8) -> Option<Direction> {
        match tag {
            DIRN_UP => Some(Direction::Up),
            DIRN_DOWN => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Direction {
        match *self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarState::Error => write!(f, "Error"),
            CarState::Stopped => write!(f, "Stopped"),
            CarState::Running => write!(f, "Running"),
        }
    }
}

/**
 * Read-only copy of the car handed to the event sink.
 *
 * # Fields
 * - `floor`:           Current resting floor.
 * - `occupancy`:       Advisory passenger count.
 * - `state`:           Error, stopped or running.
 * - `direction`:       Preferred scan direction.
 * - `upward_queue`:    Pending stops served going up, ascending.
 * - `downward_queue`:  Pending stops served going down, descending.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarSnapshot {
    pub floor: i32,
    pub occupancy: u32,
    pub state: CarState,
    pub direction: Direction,
    #[serde(rename = "upwardQueue")]
    pub upward_queue: Vec<i32>,
    #[serde(rename = "downwardQueue")]
    pub downward_queue: Vec<i32>,
}

impl fmt::Display for CarSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at floor {} going {}, up: {:?}, down: {:?}",
            self.state, self.floor, self.direction, self.upward_queue, self.downward_queue
        )
    }
}
