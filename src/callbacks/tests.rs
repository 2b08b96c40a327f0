//! Unit tests for the deferred-callback scheduler.

use bevy::prelude::Entity;

use super::{CallbackScheduler, DeferredAction};

#[test]
fn fires_after_delay_not_before() {
    let mut scheduler = CallbackScheduler::default();
    scheduler.schedule(DeferredAction::AdvanceScene, 0.4);

    assert!(scheduler.tick(0.2).is_empty());
    assert!(scheduler.tick(0.19).is_empty());
    assert_eq!(scheduler.tick(0.01), vec![DeferredAction::AdvanceScene]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn cancel_prevents_firing() {
    let mut scheduler = CallbackScheduler::default();
    let handle = scheduler.schedule(DeferredAction::AdvanceScene, 0.5);

    assert!(scheduler.is_pending(handle));
    assert!(scheduler.cancel(handle));
    assert!(!scheduler.is_pending(handle));
    // A second cancel is a no-op.
    assert!(!scheduler.cancel(handle));

    assert!(scheduler.tick(10.0).is_empty());
}

#[test]
fn handles_stay_unique() {
    let mut scheduler = CallbackScheduler::default();
    let first = scheduler.schedule(DeferredAction::AdvanceScene, 0.1);
    scheduler.tick(0.2);
    let second = scheduler.schedule(DeferredAction::AdvanceScene, 0.1);

    assert_ne!(first, second);
    assert!(!scheduler.cancel(first));
    assert!(scheduler.cancel(second));
}

#[test]
fn rearm_by_cancel_and_reschedule() {
    let mut scheduler = CallbackScheduler::default();
    let entity = Entity::PLACEHOLDER;

    let handle = scheduler.schedule(DeferredAction::EndWallJump(entity), 0.4);
    scheduler.tick(0.3);

    // Re-arm: the fresh entry starts its full delay over.
    assert!(scheduler.cancel(handle));
    scheduler.schedule(DeferredAction::EndWallJump(entity), 0.4);

    assert!(scheduler.tick(0.3).is_empty());
    assert_eq!(
        scheduler.tick(0.1),
        vec![DeferredAction::EndWallJump(entity)]
    );
}

#[test]
fn zero_delay_fires_on_next_tick() {
    let mut scheduler = CallbackScheduler::default();
    scheduler.schedule(DeferredAction::AdvanceScene, 0.0);
    assert_eq!(scheduler.tick(0.016), vec![DeferredAction::AdvanceScene]);
}

#[test]
fn entries_fire_independently() {
    let mut scheduler = CallbackScheduler::default();
    let entity = Entity::PLACEHOLDER;
    scheduler.schedule(DeferredAction::EndWallJump(entity), 0.1);
    scheduler.schedule(DeferredAction::AdvanceScene, 0.3);

    assert_eq!(
        scheduler.tick(0.15),
        vec![DeferredAction::EndWallJump(entity)]
    );
    assert_eq!(scheduler.pending_count(), 1);
    assert_eq!(scheduler.tick(0.15), vec![DeferredAction::AdvanceScene]);
}
