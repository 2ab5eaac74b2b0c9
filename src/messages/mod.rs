pub mod bridge;

pub use bridge::Bridge;

/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::CarSnapshot;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Inbound request for the car controller, one JSON object per line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    OpenRequest {
        floor: i32,
    },
    UserSelect {
        floor: i32,
        destinations: Vec<i32>,
    },
    Halt,
    Reset,
    Occupancy {
        count: u32,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    DoorOpen,
    ExitOpen,
    Status,
}

/// Outbound notification carrying a snapshot of the car.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub event: EventKind,
    pub car: CarSnapshot,
}

impl Intent {
    /// Decodes one line. Anything that is not a known intent becomes `Intent::Unknown`.
    pub fn from_json(line: &str) -> Intent {
        match serde_json::from_str::<Intent>(line) {
            Ok(intent) => intent,
            Err(e) => {
                log::warn!("Could not decode intent {:?}: {}", line, e);
                Intent::Unknown
            }
        }
    }
}

impl Notification {
    pub fn new(event: EventKind, car: CarSnapshot) -> Notification {
        Notification { event, car }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod messages_tests {
    use super::*;
    use crate::shared::{CarState, Direction};

    #[test]
    fn test_decode_open_request() {
        // Purpose: Verify that a hall call line decodes to an open request
        let intent = Intent::from_json(r#"{"type":"openRequest","floor":4}"#);
        assert_eq!(intent, Intent::OpenRequest { floor: 4 });
    }

    #[test]
    fn test_decode_user_select() {
        // Purpose: Verify that in-cab selections keep their arrival order
        let intent =
            Intent::from_json(r#"{"type":"userSelect","floor":2,"destinations":[7,1,5]}"#);
        assert_eq!(
            intent,
            Intent::UserSelect {
                floor: 2,
                destinations: vec![7, 1, 5],
            }
        );
    }

    #[test]
    fn test_decode_unit_intents() {
        // Purpose: Verify the intents without payload
        assert_eq!(Intent::from_json(r#"{"type":"halt"}"#), Intent::Halt);
        assert_eq!(Intent::from_json(r#"{"type":"reset"}"#), Intent::Reset);
        assert_eq!(
            Intent::from_json(r#"{"type":"occupancy","count":3}"#),
            Intent::Occupancy { count: 3 }
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        // Purpose: Verify that unrecognised types fall back to Unknown
        assert_eq!(Intent::from_json(r#"{"type":"onStop"}"#), Intent::Unknown);
    }

    #[test]
    fn test_decode_garbage() {
        // Purpose: Verify that undecodable input falls back to Unknown
        assert_eq!(Intent::from_json("not json"), Intent::Unknown);
        assert_eq!(Intent::from_json(r#"{"type":"openRequest"}"#), Intent::Unknown);
    }

    #[test]
    fn test_encode_door_open() {
        // Purpose: Verify the field names of an outbound notification

        // Arrange
        let notification = Notification::new(
            EventKind::DoorOpen,
            CarSnapshot {
                floor: 3,
                occupancy: 0,
                state: CarState::Running,
                direction: Direction::Up,
                upward_queue: vec![5, 8],
                downward_queue: vec![2],
            },
        );

        // Act
        let json: serde_json::Value =
            serde_json::from_str(&notification.to_json().unwrap()).unwrap();

        // Assert
        assert_eq!(json["event"], "doorOpen");
        assert_eq!(json["car"]["floor"], 3);
        assert_eq!(json["car"]["state"], "running");
        assert_eq!(json["car"]["direction"], "up");
        assert_eq!(json["car"]["upwardQueue"], serde_json::json!([5, 8]));
        assert_eq!(json["car"]["downwardQueue"], serde_json::json!([2]));
    }
}
