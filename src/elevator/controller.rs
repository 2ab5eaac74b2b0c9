use crate::config::CarConfig;
use crate::elevator::clock::{Clock, Wake};
use crate::elevator::intake::{self, HallCall};
use crate::elevator::scheduler::Scheduler;
use crate::messages::{EventKind, Intent, Notification};
use crate::shared::CarState;
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::Duration;

/**
 * Drives the car from stop to stop.
 *
 * The `CarController` owns the scheduler and is the only thing that mutates it.
 * Intents are handled one at a time. While the run loop is suspended (travel,
 * idle, exit pause) newly arriving intents are still handled, but only ever
 * queue work; the loop is never entered twice.
 *
 * # Fields
 * - `scheduler`:           The car and its queues.
 * - `clock`:               Time source for the suspension points.
 * - `intent_rx`:           Receives intents from the message bridge.
 * - `notification_tx`:     Sends door-open and status notifications to the event sink.
 * - `travel_time`:         Delay before each arrival.
 * - `idle_time`:           Delay before the final status once the queues run dry.
 * - `door_exit_time`:      Pause when a cab selection names the current floor.
 * - `in_loop`:             Set while `run_car` is iterating.
 * - `sink_closed`:         Set once the event sink has gone away.
 */
pub struct CarController<C: Clock> {
    scheduler: Scheduler,
    clock: C,
    intent_rx: cbc::Receiver<Intent>,
    notification_tx: cbc::Sender<Notification>,
    travel_time: Duration,
    idle_time: Duration,
    door_exit_time: Duration,
    in_loop: bool,
    sink_closed: bool,
}

impl<C: Clock> CarController<C> {
    pub fn new(
        config: &CarConfig,
        scheduler: Scheduler,
        clock: C,
        intent_rx: cbc::Receiver<Intent>,
        notification_tx: cbc::Sender<Notification>,
    ) -> CarController<C> {
        CarController {
            scheduler,
            clock,
            intent_rx,
            notification_tx,
            travel_time: config.travel_time(),
            idle_time: config.idle_time(),
            door_exit_time: config.door_exit_time(),
            in_loop: false,
            sink_closed: false,
        }
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handles intents until every sender is gone.
    pub fn run(mut self) {
        info!("Car controller started at floor {}", self.scheduler.floor());

        while let Ok(intent) = self.intent_rx.recv() {
            self.dispatch(intent);
        }

        info!("Intent channel closed, car controller exiting");
    }

    /// Handles one intent and, if it woke the car, runs it until the queues are empty.
    pub fn dispatch(&mut self, intent: Intent) {
        self.accept(intent);

        if self.scheduler.state() == CarState::Running && !self.in_loop {
            self.run_car();
        }
    }

    fn accept(&mut self, intent: Intent) {
        match intent {
            Intent::OpenRequest { floor } => {
                info!("Car requested at floor {}", floor);
                match intake::hall_call(&mut self.scheduler, floor) {
                    HallCall::AlreadyHere => {
                        info!("Car open at floor {}", floor);
                        self.notify(EventKind::DoorOpen);
                    }
                    HallCall::Queued(..) => self.wake(),
                }
            }

            Intent::UserSelect {
                floor,
                destinations,
            } => {
                info!(
                    "Selections received at floor {} to destinations {:?}",
                    floor, destinations
                );
                let selections = intake::cab_selections(&mut self.scheduler, &destinations);
                for selection in selections.iter().filter(|s| s.at_floor) {
                    debug!("Holding doors open at floor {}", selection.floor);
                    self.notify(EventKind::ExitOpen);
                    self.suspend(self.door_exit_time);
                }
                self.wake();
            }

            Intent::Halt => {
                info!("Halt received");
                self.scheduler.set_state(CarState::Stopped);
            }

            Intent::Reset => {
                info!("Reset received, returning to base level");
                self.scheduler.set_state(CarState::Stopped);
                self.scheduler.reset_to_base_level();
                self.wake();
            }

            Intent::Occupancy { count } => {
                debug!("Occupancy set to {}", count);
                self.scheduler.set_occupancy(count);
            }

            Intent::Unknown => {
                warn!("Received malformed intent, car set to error");
                self.scheduler.set_state(CarState::Error);
            }
        }
    }

    // Stopped -> Running. Error stays until a reset.
    fn wake(&mut self) {
        if self.scheduler.state() == CarState::Stopped {
            self.scheduler.set_state(CarState::Running);
        }
    }

    fn run_car(&mut self) {
        self.in_loop = true;

        while self.scheduler.state() == CarState::Running {
            match self.scheduler.next_stop() {
                Some(floor) => {
                    let direction = self.scheduler.direction();
                    debug!("Heading for floor {} going {}", floor, direction);

                    self.suspend(self.travel_time);
                    self.scheduler.record_arrival(floor, direction);

                    info!("Car open at floor {}", floor);
                    self.notify(EventKind::DoorOpen);
                }
                None => {
                    self.scheduler.set_state(CarState::Stopped);
                    self.suspend(self.idle_time);
                    info!("No more floors to go, stopping car");
                }
            }
            self.notify(EventKind::Status);
        }

        self.in_loop = false;
    }

    // Waits out `duration`, handling any intent that arrives in the meantime
    fn suspend(&mut self, duration: Duration) {
        let deadline = self.clock.now() + duration;

        loop {
            let now = self.clock.now();
            if now >= deadline {
                break;
            }

            match self.clock.wait(&self.intent_rx, deadline - now) {
                Wake::Intent(intent) => self.accept(intent),
                Wake::Elapsed => {}
            }
        }
    }

    fn notify(&mut self, event: EventKind) {
        let notification = Notification::new(event, self.scheduler.snapshot());
        debug!("Notify {:?}: {}", event, notification.car);

        if self.notification_tx.send(notification).is_err() && !self.sink_closed {
            warn!("Event sink closed, dropping notifications");
            self.sink_closed = true;
        }
    }
}
