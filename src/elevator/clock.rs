use crossbeam_channel as cbc;
use std::thread;
use std::time::{Duration, Instant};

use crate::messages::Intent;

/// What ended a wait.
#[derive(Debug, PartialEq)]
pub enum Wake {
    Intent(Intent),
    Elapsed,
}

/**
 * Time source for the controller's suspension points.
 *
 * `wait` blocks until either an intent arrives or `timeout` has passed,
 * whichever comes first.
 */
pub trait Clock {
    fn now(&self) -> Duration;
    fn wait(&mut self, intent_rx: &cbc::Receiver<Intent>, timeout: Duration) -> Wake;
}

/// Real time, used by the binary.
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> WallClock {
        WallClock {
            start: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn wait(&mut self, intent_rx: &cbc::Receiver<Intent>, timeout: Duration) -> Wake {
        cbc::select! {
            recv(intent_rx) -> intent => {
                match intent {
                    Ok(intent) => Wake::Intent(intent),
                    Err(_) => {
                        // Nobody left to send, sleep out the remainder
                        thread::sleep(timeout);
                        Wake::Elapsed
                    }
                }
            }
            default(timeout) => Wake::Elapsed,
        }
    }
}

/// Simulated time that advances instantly. Intents already queued are delivered before time moves.
#[derive(Debug, Default)]
pub struct VirtualClock {
    elapsed: Duration,
}

impl VirtualClock {
    pub fn new() -> VirtualClock {
        VirtualClock::default()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn wait(&mut self, intent_rx: &cbc::Receiver<Intent>, timeout: Duration) -> Wake {
        match intent_rx.try_recv() {
            Ok(intent) => Wake::Intent(intent),
            Err(_) => {
                self.elapsed += timeout;
                Wake::Elapsed
            }
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod clock_tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_virtual_clock_advances_when_idle() {
        // Purpose: Verify that an empty channel lets virtual time jump forward

        // Arrange
        let (_intent_tx, intent_rx) = unbounded::<Intent>();
        let mut clock = VirtualClock::new();

        // Act
        let wake = clock.wait(&intent_rx, Duration::from_millis(250));

        // Assert
        assert_eq!(wake, Wake::Elapsed);
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_virtual_clock_delivers_pending_intent() {
        // Purpose: Verify that a queued intent interrupts the wait without moving time

        // Arrange
        let (intent_tx, intent_rx) = unbounded::<Intent>();
        let mut clock = VirtualClock::new();
        intent_tx.send(Intent::Halt).unwrap();

        // Act
        let wake = clock.wait(&intent_rx, Duration::from_millis(250));

        // Assert
        assert_eq!(wake, Wake::Intent(Intent::Halt));
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_wall_clock_times_out() {
        // Purpose: Verify that the wall clock returns once the timeout passes

        // Arrange
        let (_intent_tx, intent_rx) = unbounded::<Intent>();
        let mut clock = WallClock::new();

        // Act
        let wake = clock.wait(&intent_rx, Duration::from_millis(10));

        // Assert
        assert_eq!(wake, Wake::Elapsed);
        assert!(clock.now() >= Duration::from_millis(10));
    }
}
