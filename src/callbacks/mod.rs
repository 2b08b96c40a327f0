//! Delayed one-shot callbacks with cancel handles.
//!
//! The simulation owns one [`CallbackScheduler`] resource. Systems register
//! an action together with a delay and get back a handle they can cancel
//! before the delay elapses; cancelling and rescheduling re-arms an action.
//! Consumers of [`DeferredFired`] must tolerate actions whose effect was
//! already superseded by the time they fire.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;

#[cfg(test)]
mod tests;

/// Identifies one scheduled callback. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u64);

/// The closed set of actions that can be deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Clear the wall-jump control lock on the given player entity.
    EndWallJump(Entity),
    /// Leave the current scene (failure, success, or reload).
    AdvanceScene,
}

/// Fired when a scheduled callback's delay has elapsed.
#[derive(Debug)]
pub struct DeferredFired {
    pub action: DeferredAction,
}

impl Message for DeferredFired {}

#[derive(Debug)]
struct ScheduledEntry {
    handle: CallbackHandle,
    remaining: f32,
    action: DeferredAction,
}

/// Pending delayed callbacks, ticked once per frame.
#[derive(Resource, Debug, Default)]
pub struct CallbackScheduler {
    next_handle: u64,
    entries: Vec<ScheduledEntry>,
}

impl CallbackScheduler {
    /// Register `action` to fire after `delay` seconds.
    pub fn schedule(&mut self, action: DeferredAction, delay: f32) -> CallbackHandle {
        self.next_handle += 1;
        let handle = CallbackHandle(self.next_handle);
        self.entries.push(ScheduledEntry {
            handle,
            remaining: delay,
            action,
        });
        handle
    }

    /// Remove a pending callback. Returns false when it already fired or
    /// was cancelled earlier.
    pub fn cancel(&mut self, handle: CallbackHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: CallbackHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Advance all countdowns and drain the actions whose delay elapsed.
    pub fn tick(&mut self, dt: f32) -> Vec<DeferredAction> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                fired.push(entry.action);
                false
            } else {
                true
            }
        });
        fired
    }
}

pub(crate) fn dispatch_deferred(
    time: Res<Time>,
    mut scheduler: ResMut<CallbackScheduler>,
    mut fired: MessageWriter<DeferredFired>,
) {
    for action in scheduler.tick(time.delta_secs()) {
        debug!("deferred action fired: {:?}", action);
        fired.write(DeferredFired { action });
    }
}

pub struct CallbacksPlugin;

impl Plugin for CallbacksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CallbackScheduler>()
            .add_message::<DeferredFired>()
            .add_systems(Update, dispatch_deferred);
    }
}
