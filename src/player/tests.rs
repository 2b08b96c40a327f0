//! Player domain: unit tests for the controller state machines.

use bevy::prelude::{Entity, Vec2};

use super::animation::{
    AnimationController, AnimationInputs, ClipLibrary, PlayerAnimation, entry_cues,
    fires_land_cue, next_animation_state,
};
use super::components::{Facing, Lifecycle, MotionState, WallState};
use super::systems::jump::{tick_jump_timers, try_buffered_jump, try_hop};
use super::systems::movement::{UNCONTROLLABLE_DAMPING, integrate_horizontal, is_zeroish};
use super::systems::wall::{update_jump_window, update_slide_state};
use super::tuning::PlayerTuning;
use crate::audio::SoundCue;
use crate::callbacks::{CallbackScheduler, DeferredAction};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// -----------------------------------------------------------------------------
// Jump grace windows
// -----------------------------------------------------------------------------

#[test]
fn grounded_frames_rearm_coyote_window() {
    let tuning = PlayerTuning::default();
    let mut motion = MotionState {
        on_ground: true,
        ..Default::default()
    };

    for _ in 0..10 {
        tick_jump_timers(&mut motion, false, 0.016, &tuning);
        assert_eq!(motion.coyote_timer, tuning.coyote_time);
    }
}

#[test]
fn airborne_windows_decay_past_zero() {
    let tuning = PlayerTuning::default();
    let mut motion = MotionState {
        coyote_timer: 0.02,
        jump_buffer_timer: 0.01,
        ..Default::default()
    };

    tick_jump_timers(&mut motion, false, 0.05, &tuning);

    // The countdowns keep going negative; only their sign matters.
    assert!(approx(motion.coyote_timer, -0.03));
    assert!(approx(motion.jump_buffer_timer, -0.04));
}

#[test]
fn jump_requires_both_windows_open() {
    let tuning = PlayerTuning::default();
    let mut velocity = Vec2::ZERO;

    let mut motion = MotionState {
        coyote_timer: 0.05,
        jump_buffer_timer: -0.01,
        ..Default::default()
    };
    assert!(!try_buffered_jump(&mut motion, &mut velocity, &tuning));

    motion.coyote_timer = -0.01;
    motion.jump_buffer_timer = 0.05;
    assert!(!try_buffered_jump(&mut motion, &mut velocity, &tuning));
    assert_eq!(velocity.y, 0.0);

    motion.coyote_timer = 0.05;
    assert!(try_buffered_jump(&mut motion, &mut velocity, &tuning));
    assert_eq!(velocity.y, tuning.jumping_power);
    assert_eq!(motion.jump_buffer_timer, 0.0);
}

#[test]
fn jump_consumes_buffer_but_not_coyote() {
    // A buffered jump deliberately leaves the coyote window armed; the
    // buffer alone gates a re-trigger until the next press.
    let tuning = PlayerTuning::default();
    let mut motion = MotionState {
        coyote_timer: 0.08,
        jump_buffer_timer: 0.1,
        ..Default::default()
    };
    let mut velocity = Vec2::ZERO;

    assert!(try_buffered_jump(&mut motion, &mut velocity, &tuning));
    assert_eq!(motion.coyote_timer, 0.08);

    // Same airtime, no fresh press: the consumed buffer blocks the jump.
    assert!(!try_buffered_jump(&mut motion, &mut velocity, &tuning));
}

#[test]
fn buffered_jump_scenario_frame_by_frame() {
    let tuning = PlayerTuning::default();
    let mut motion = MotionState {
        on_ground: true,
        ..Default::default()
    };
    let mut velocity = Vec2::ZERO;

    // Frame A: grounded, no press.
    tick_jump_timers(&mut motion, false, 0.016, &tuning);
    assert_eq!(motion.coyote_timer, 0.1);
    assert!(!try_buffered_jump(&mut motion, &mut velocity, &tuning));

    // Frame B: airborne for 0.05s, jump pressed this frame.
    motion.on_ground = false;
    tick_jump_timers(&mut motion, true, 0.05, &tuning);
    assert!(approx(motion.coyote_timer, 0.05));
    assert_eq!(motion.jump_buffer_timer, 0.1);

    // Both windows open: the jump fires in the same frame.
    assert!(try_buffered_jump(&mut motion, &mut velocity, &tuning));
    assert_eq!(velocity.y, tuning.jumping_power);
    assert_eq!(motion.jump_buffer_timer, 0.0);
}

// -----------------------------------------------------------------------------
// Variable-height hop
// -----------------------------------------------------------------------------

#[test]
fn hop_shortens_ascent_and_closes_coyote() {
    let tuning = PlayerTuning::default();
    let mut motion = MotionState {
        coyote_timer: 0.07,
        ..Default::default()
    };
    let mut velocity = Vec2::new(0.0, 10.0);

    assert!(try_hop(&mut motion, true, &mut velocity, &tuning));
    assert_eq!(velocity.y, 5.0);
    assert_eq!(motion.coyote_timer, 0.0);
}

#[test]
fn hop_ignores_release_while_descending() {
    let tuning = PlayerTuning::default();
    let mut motion = MotionState::default();
    let mut velocity = Vec2::new(0.0, -2.0);

    assert!(!try_hop(&mut motion, true, &mut velocity, &tuning));
    assert_eq!(velocity.y, -2.0);
}

#[test]
fn hop_can_be_disabled() {
    let tuning = PlayerTuning {
        should_hop: false,
        ..Default::default()
    };
    let mut motion = MotionState::default();
    let mut velocity = Vec2::new(0.0, 10.0);

    assert!(!try_hop(&mut motion, true, &mut velocity, &tuning));
    assert_eq!(velocity.y, 10.0);
}

// -----------------------------------------------------------------------------
// Horizontal integration
// -----------------------------------------------------------------------------

#[test]
fn reversal_zeroes_velocity_before_tracking() {
    let tuning = PlayerTuning::default();
    // Moving right at full speed, input flips left: the first tick starts
    // over from zero instead of sliding through the turn.
    let vx = integrate_horizontal(8.0, -1.0, true, &tuning);
    assert!(approx(vx, -tuning.speed * tuning.acceleration));
}

#[test]
fn acceleration_steps_toward_target() {
    let tuning = PlayerTuning::default();
    let vx = integrate_horizontal(2.0, 1.0, true, &tuning);
    assert!(approx(vx, 2.0 + (8.0 - 2.0) * 0.2));
}

#[test]
fn deceleration_depends_on_ground_contact() {
    let tuning = PlayerTuning {
        ground_deceleration: 0.5,
        air_deceleration: 0.25,
        ..Default::default()
    };

    assert!(approx(integrate_horizontal(4.0, 0.0, true, &tuning), 2.0));
    assert!(approx(integrate_horizontal(4.0, 0.0, false, &tuning), 3.0));
}

#[test]
fn slow_drift_snaps_to_rest() {
    let tuning = PlayerTuning::default();
    // 0.6 decays to 0.3, which is under the rest threshold: exact zero.
    assert_eq!(integrate_horizontal(0.6, 0.0, true, &tuning), 0.0);
}

#[test]
fn damping_factor_shrinks_velocity() {
    let velocity = Vec2::new(4.0, -3.0) * UNCONTROLLABLE_DAMPING;
    assert!(approx(velocity.x, 3.6));
    assert!(approx(velocity.y, -2.7));
}

#[test]
fn zeroish_threshold() {
    assert!(is_zeroish(0.0));
    assert!(is_zeroish(-0.0005));
    assert!(!is_zeroish(0.01));
}

// -----------------------------------------------------------------------------
// Wall machine
// -----------------------------------------------------------------------------

fn sliding_motion() -> MotionState {
    MotionState {
        on_wall: true,
        on_ground: false,
        horizontal: -1.0,
        ..Default::default()
    }
}

#[test]
fn slide_requires_wall_air_and_input() {
    let tuning = PlayerTuning::default();
    let mut velocity = Vec2::ZERO;

    let mut wall = WallState::default();
    update_slide_state(&mut wall, &sliding_motion(), &mut velocity, &tuning);
    assert!(wall.is_sliding);

    for broken in [
        MotionState {
            on_wall: false,
            ..sliding_motion()
        },
        MotionState {
            on_ground: true,
            ..sliding_motion()
        },
        MotionState {
            horizontal: 0.0,
            ..sliding_motion()
        },
    ] {
        let mut wall = WallState::default();
        wall.is_sliding = true;
        update_slide_state(&mut wall, &broken, &mut velocity, &tuning);
        assert!(!wall.is_sliding);
    }
}

#[test]
fn slide_clamps_descent_speed() {
    let tuning = PlayerTuning::default();
    let mut wall = WallState::default();
    let mut velocity = Vec2::new(0.0, -6.0);

    update_slide_state(&mut wall, &sliding_motion(), &mut velocity, &tuning);
    assert_eq!(velocity.y, -tuning.wall_slide_speed);

    // Rising along the wall is left alone.
    velocity.y = 3.0;
    update_slide_state(&mut wall, &sliding_motion(), &mut velocity, &tuning);
    assert_eq!(velocity.y, 3.0);
}

#[test]
fn slide_rearms_window_and_cancels_pending_end() {
    let tuning = PlayerTuning::default();
    let mut scheduler = CallbackScheduler::default();
    let entity = Entity::PLACEHOLDER;

    let mut wall = WallState {
        is_sliding: true,
        is_jumping: true,
        end_handle: Some(scheduler.schedule(DeferredAction::EndWallJump(entity), 0.4)),
        ..Default::default()
    };
    let mut motion = sliding_motion();
    let mut velocity = Vec2::ZERO;

    update_jump_window(
        entity,
        &mut wall,
        &mut motion,
        &mut velocity,
        false,
        0.016,
        &mut scheduler,
        &tuning,
    );

    assert!(!wall.is_jumping);
    assert_eq!(wall.counter, tuning.wall_jump_window);
    assert_eq!(wall.direction, -1.0);
    assert!(wall.end_handle.is_none());
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn wall_jump_scenario() {
    let tuning = PlayerTuning::default();
    let mut scheduler = CallbackScheduler::default();
    let entity = Entity::PLACEHOLDER;

    let mut wall = WallState {
        is_sliding: true,
        ..Default::default()
    };
    let mut motion = sliding_motion();
    let mut velocity = Vec2::new(0.0, -1.5);

    // Press while sliding: launch away from the wall.
    let jumped = update_jump_window(
        entity,
        &mut wall,
        &mut motion,
        &mut velocity,
        true,
        0.016,
        &mut scheduler,
        &tuning,
    );

    assert!(jumped);
    assert!(wall.is_jumping);
    assert_eq!(velocity, Vec2::new(-tuning.wall_jump_x_power, tuning.wall_jump_y_power));
    assert_eq!(wall.counter, 0.0);
    // Launching left from a right-facing stance flips the facing.
    assert_eq!(motion.facing, Facing::Left);

    // The lock release is scheduled for the full duration, not earlier.
    assert_eq!(scheduler.pending_count(), 1);
    assert!(scheduler.tick(0.39).is_empty());
    assert_eq!(
        scheduler.tick(0.02),
        vec![DeferredAction::EndWallJump(entity)]
    );
}

#[test]
fn wall_jump_window_outlives_the_slide_briefly() {
    let tuning = PlayerTuning::default();
    let mut scheduler = CallbackScheduler::default();
    let entity = Entity::PLACEHOLDER;

    let mut wall = WallState {
        is_sliding: true,
        ..Default::default()
    };
    let mut motion = sliding_motion();
    let mut velocity = Vec2::ZERO;

    // Arm the window while sliding.
    update_jump_window(
        entity,
        &mut wall,
        &mut motion,
        &mut velocity,
        false,
        0.016,
        &mut scheduler,
        &tuning,
    );

    // Two frames after detaching, a press still launches.
    wall.is_sliding = false;
    update_jump_window(
        entity,
        &mut wall,
        &mut motion,
        &mut velocity,
        false,
        0.04,
        &mut scheduler,
        &tuning,
    );
    let jumped = update_jump_window(
        entity,
        &mut wall,
        &mut motion,
        &mut velocity,
        true,
        0.04,
        &mut scheduler,
        &tuning,
    );
    assert!(jumped);

    // Once the window has fully decayed, presses are ignored.
    let mut stale = WallState {
        counter: 0.01,
        ..Default::default()
    };
    let jumped = update_jump_window(
        entity,
        &mut stale,
        &mut motion,
        &mut velocity,
        true,
        0.05,
        &mut scheduler,
        &tuning,
    );
    assert!(!jumped);
}

#[test]
fn wall_jump_in_facing_direction_keeps_facing() {
    let tuning = PlayerTuning::default();
    let mut scheduler = CallbackScheduler::default();

    let mut wall = WallState {
        counter: 0.05,
        direction: -1.0,
        ..Default::default()
    };
    let mut motion = MotionState {
        facing: Facing::Left,
        ..Default::default()
    };
    let mut velocity = Vec2::ZERO;

    update_jump_window(
        Entity::PLACEHOLDER,
        &mut wall,
        &mut motion,
        &mut velocity,
        true,
        0.016,
        &mut scheduler,
        &tuning,
    );
    assert_eq!(motion.facing, Facing::Left);
}

// -----------------------------------------------------------------------------
// Animation state machine
// -----------------------------------------------------------------------------

fn grounded_inputs() -> AnimationInputs {
    AnimationInputs {
        frozen: false,
        on_ground: true,
        wall_sliding: false,
        velocity: Vec2::ZERO,
    }
}

#[test]
fn ladder_priorities() {
    assert_eq!(next_animation_state(&grounded_inputs()), PlayerAnimation::Idle);

    assert_eq!(
        next_animation_state(&AnimationInputs {
            velocity: Vec2::new(3.0, 0.0),
            ..grounded_inputs()
        }),
        PlayerAnimation::Walk
    );

    // A frozen body outranks everything else.
    assert_eq!(
        next_animation_state(&AnimationInputs {
            frozen: true,
            ..grounded_inputs()
        }),
        PlayerAnimation::Dead
    );

    assert_eq!(
        next_animation_state(&AnimationInputs {
            on_ground: false,
            wall_sliding: true,
            velocity: Vec2::new(0.0, 5.0),
            ..grounded_inputs()
        }),
        PlayerAnimation::WallSlide
    );

    assert_eq!(
        next_animation_state(&AnimationInputs {
            on_ground: false,
            velocity: Vec2::new(0.0, 5.0),
            ..grounded_inputs()
        }),
        PlayerAnimation::JumpUp
    );

    // Hovering near the apex already reads as falling.
    assert_eq!(
        next_animation_state(&AnimationInputs {
            on_ground: false,
            velocity: Vec2::new(0.0, 0.05),
            ..grounded_inputs()
        }),
        PlayerAnimation::JumpDown
    );
}

#[test]
fn set_state_is_edge_triggered() {
    let mut controller = AnimationController::default();

    assert!(controller.set_state(PlayerAnimation::Idle));
    assert_eq!(controller.previous_state, PlayerAnimation::Uninitialized);

    // Re-entering the active state is a no-op.
    assert!(!controller.set_state(PlayerAnimation::Idle));

    assert!(controller.set_state(PlayerAnimation::Walk));
    assert_eq!(controller.previous_state, PlayerAnimation::Idle);
}

#[test]
fn steady_state_produces_no_additional_transitions() {
    let mut controller = AnimationController::default();
    let inputs = grounded_inputs();

    let mut transitions = 0;
    for _ in 0..60 {
        if controller.set_state(next_animation_state(&inputs)) {
            transitions += 1;
        }
    }
    assert_eq!(transitions, 1);
}

#[test]
fn entry_cue_table() {
    assert_eq!(entry_cues(PlayerAnimation::JumpUp), &[SoundCue::Jump]);
    assert_eq!(entry_cues(PlayerAnimation::WallSlide), &[SoundCue::WallSlide]);
    assert_eq!(
        entry_cues(PlayerAnimation::Dead),
        &[SoundCue::Death, SoundCue::GameOver]
    );
    assert_eq!(entry_cues(PlayerAnimation::Success), &[SoundCue::Victory]);
    assert!(entry_cues(PlayerAnimation::Idle).is_empty());
    assert!(entry_cues(PlayerAnimation::JumpDown).is_empty());
}

#[test]
fn land_cue_fires_only_on_touchdown_from_a_fall() {
    assert!(fires_land_cue(true, PlayerAnimation::JumpDown));
    assert!(!fires_land_cue(true, PlayerAnimation::Idle));
    assert!(!fires_land_cue(false, PlayerAnimation::JumpDown));
}

#[test]
fn missing_clip_does_not_block_the_transition() {
    let mut clips = ClipLibrary::default();
    clips.remove(PlayerAnimation::Dead);
    assert!(clips.get(PlayerAnimation::Dead).is_none());

    // The machine still transitions; only playback is skipped.
    let mut controller = AnimationController::default();
    assert!(controller.set_state(PlayerAnimation::Dead));
}

#[test]
fn play_restarts_the_clip() {
    let clips = ClipLibrary::default();
    let mut controller = AnimationController {
        current_frame: 3,
        frame_timer: 0.12,
        finished: true,
        ..Default::default()
    };

    controller.play(clips.get(PlayerAnimation::Walk).unwrap());

    assert_eq!(controller.current_frame, 0);
    assert_eq!(controller.frame_timer, 0.0);
    assert_eq!(controller.total_frames, 6);
    assert!(controller.looping);
    assert!(!controller.finished);
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

#[test]
fn coin_count_is_monotonic() {
    let mut lifecycle = Lifecycle::default();
    assert_eq!(lifecycle.collect_coin(), 1);
    assert_eq!(lifecycle.collect_coin(), 2);
    assert_eq!(lifecycle.collect_coin(), 3);
    assert_eq!(lifecycle.coins(), 3);
}

// -----------------------------------------------------------------------------
// Tuning loader
// -----------------------------------------------------------------------------

#[test]
fn partial_tuning_file_overrides_only_named_fields() {
    let tuning = PlayerTuning::from_ron_str("(speed: 12.5, hop_ratio: 0.75)").unwrap();
    assert_eq!(tuning.speed, 12.5);
    assert_eq!(tuning.hop_ratio, 0.75);
    assert_eq!(tuning.jumping_power, 16.0);
    assert_eq!(tuning.coyote_time, 0.1);
}

#[test]
fn malformed_tuning_file_is_an_error() {
    assert!(PlayerTuning::from_ron_str("(speed: fast)").is_err());
}

#[test]
fn shipped_tuning_file_parses() {
    let contents = include_str!("../../assets/config/player.ron");
    let tuning = PlayerTuning::from_ron_str(contents).unwrap();
    assert_eq!(tuning.speed, 8.0);
    assert_eq!(tuning.wall_jump_duration, 0.4);
}
