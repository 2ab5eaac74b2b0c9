/*
 * Request intake
 *
 * Turns hall calls and in-cab selections into direction-tagged stops and hands
 * them to the scheduler. An equal floor classifies as going down, both for hall
 * calls and for cab selections.
 */
use crate::elevator::scheduler::{Admission, Scheduler};
use crate::shared::Direction;
use log::info;

/// What became of a hall call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HallCall {
    Queued(Direction, Admission),
    AlreadyHere,
}

/**
 * What became of a single in-cab destination.
 *
 * # Fields
 * - `floor`:       The destination.
 * - `direction`:   Queue the destination went into.
 * - `admission`:   Whether the gate let it through or deferred it.
 * - `at_floor`:    The car already rests at the destination, so the doors open for exit.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub floor: i32,
    pub direction: Direction,
    pub admission: Admission,
    pub at_floor: bool,
}

pub fn hall_call(scheduler: &mut Scheduler, requested_floor: i32) -> HallCall {
    let direction = if requested_floor > scheduler.floor() {
        Direction::Up
    } else {
        Direction::Down
    };

    if !scheduler.can_accept() {
        info!(
            "Car full or in error, please wait. Called from {}, car at {}",
            requested_floor,
            scheduler.floor()
        );
        return HallCall::Queued(direction, scheduler.admit(requested_floor, direction));
    }

    if requested_floor != scheduler.floor() {
        info!(
            "Car in use, please wait. Called from {}, car at {}",
            requested_floor,
            scheduler.floor()
        );
        return HallCall::Queued(direction, scheduler.admit(requested_floor, direction));
    }

    HallCall::AlreadyHere
}

pub fn cab_selection(scheduler: &mut Scheduler, destination: i32) -> Selection {
    let at_floor = destination == scheduler.floor();
    if at_floor {
        info!("Car open at floor {}, passengers can exit now", destination);
    }

    let direction = if destination > scheduler.floor() {
        Direction::Up
    } else {
        Direction::Down
    };

    let admission = if !scheduler.can_accept() {
        info!(
            "Car full or in error, please wait. Destination {}, car at {}",
            destination,
            scheduler.floor()
        );
        scheduler.admit(destination, direction)
    } else if !at_floor {
        info!("Destination {} added, car at {}", destination, scheduler.floor());
        scheduler.admit(destination, direction)
    } else {
        scheduler.queue_exit_stop(destination);
        Admission::Accepted
    };

    Selection {
        floor: destination,
        direction,
        admission,
        at_floor,
    }
}

/// Applies `cab_selection` to every destination in arrival order.
pub fn cab_selections(scheduler: &mut Scheduler, destinations: &[i32]) -> Vec<Selection> {
    destinations
        .iter()
        .map(|destination| cab_selection(scheduler, *destination))
        .collect()
}
