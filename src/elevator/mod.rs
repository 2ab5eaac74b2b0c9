pub mod clock;
pub mod controller;
pub mod intake;
pub mod queues;
pub mod scheduler;

pub use clock::{VirtualClock, WallClock};
pub use controller::CarController;
pub use scheduler::Scheduler;
