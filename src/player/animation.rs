//! Player domain: animation state machine and frame playback.
//!
//! The machine evaluates a fixed priority ladder once per frame while the
//! player is alive. Transitions are edge-triggered: moving into the state
//! already active is a no-op, so entry side effects (cues, music stop,
//! trail removal, scene-advance scheduling) fire exactly once per distinct
//! transition.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::audio::{MusicChannel, PlaySoundFx, SoundCue};
use crate::callbacks::{CallbackScheduler, DeferredAction};
use crate::core::{LevelCompletedEvent, PlayerDiedEvent};
use crate::player::systems::movement::is_zeroish;
use crate::player::tuning::PlayerTuning;
use crate::player::{Facing, Lifecycle, MotionState, Player, Trail, WallState};

/// Ascent faster than this reads as "jumping up" rather than floating at
/// the apex.
const RISING_EPSILON: f32 = 0.1;

/// Discrete animation states for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerAnimation {
    /// Pre-first-evaluation placeholder so the first real state always
    /// counts as a transition.
    #[default]
    Uninitialized,
    Idle,
    Walk,
    JumpUp,
    JumpDown,
    WallSlide,
    Dead,
    Success,
}

/// Playback metadata for one clip. A state with no clip registered simply
/// plays nothing while the machine state still advances.
#[derive(Debug, Clone)]
pub struct ClipDef {
    pub frames: u32,
    pub frame_secs: f32,
    pub looping: bool,
}

/// State-to-clip lookup table.
#[derive(Resource, Debug)]
pub struct ClipLibrary {
    clips: HashMap<PlayerAnimation, ClipDef>,
}

impl Default for ClipLibrary {
    fn default() -> Self {
        let mut clips = HashMap::new();
        clips.insert(
            PlayerAnimation::Idle,
            ClipDef {
                frames: 4,
                frame_secs: 0.15,
                looping: true,
            },
        );
        clips.insert(
            PlayerAnimation::Walk,
            ClipDef {
                frames: 6,
                frame_secs: 0.1,
                looping: true,
            },
        );
        clips.insert(
            PlayerAnimation::JumpUp,
            ClipDef {
                frames: 2,
                frame_secs: 0.1,
                looping: false,
            },
        );
        clips.insert(
            PlayerAnimation::JumpDown,
            ClipDef {
                frames: 2,
                frame_secs: 0.1,
                looping: false,
            },
        );
        clips.insert(
            PlayerAnimation::WallSlide,
            ClipDef {
                frames: 2,
                frame_secs: 0.15,
                looping: true,
            },
        );
        clips.insert(
            PlayerAnimation::Dead,
            ClipDef {
                frames: 4,
                frame_secs: 0.12,
                looping: false,
            },
        );
        clips.insert(
            PlayerAnimation::Success,
            ClipDef {
                frames: 4,
                frame_secs: 0.12,
                looping: false,
            },
        );
        Self { clips }
    }
}

impl ClipLibrary {
    pub fn get(&self, state: PlayerAnimation) -> Option<&ClipDef> {
        self.clips.get(&state)
    }

    #[cfg(test)]
    pub fn remove(&mut self, state: PlayerAnimation) {
        self.clips.remove(&state);
    }
}

/// Fired once per distinct animation-state transition.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: PlayerAnimation,
    pub to: PlayerAnimation,
}

impl Message for AnimationStateChanged {}

/// Component for animation playback on the player sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub state: PlayerAnimation,
    pub previous_state: PlayerAnimation,
    pub current_frame: u32,
    pub total_frames: u32,
    pub frame_timer: f32,
    pub frame_duration: f32,
    pub looping: bool,
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: PlayerAnimation::Uninitialized,
            previous_state: PlayerAnimation::Uninitialized,
            current_frame: 0,
            total_frames: 1,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: false,
            finished: true,
        }
    }
}

impl AnimationController {
    /// Move to `state`, returning false when already there. Entry side
    /// effects belong to the caller and must only run on true.
    pub fn set_state(&mut self, state: PlayerAnimation) -> bool {
        if self.state == state {
            return false;
        }
        self.previous_state = self.state;
        self.state = state;
        true
    }

    /// Start playing a clip from its first frame.
    pub fn play(&mut self, clip: &ClipDef) {
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.total_frames = clip.frames.max(1);
        self.frame_duration = clip.frame_secs;
        self.looping = clip.looping;
        self.finished = false;
    }
}

/// Everything the priority ladder looks at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnimationInputs {
    pub frozen: bool,
    pub on_ground: bool,
    pub wall_sliding: bool,
    pub velocity: Vec2,
}

/// The per-frame priority ladder: frozen body, then grounded idle/walk,
/// then wall slide, then airborne up/down.
pub(crate) fn next_animation_state(inputs: &AnimationInputs) -> PlayerAnimation {
    if inputs.frozen {
        return PlayerAnimation::Dead;
    }
    if inputs.on_ground {
        if is_zeroish(inputs.velocity.x) {
            return PlayerAnimation::Idle;
        }
        return PlayerAnimation::Walk;
    }
    if inputs.wall_sliding {
        return PlayerAnimation::WallSlide;
    }
    if inputs.velocity.y > RISING_EPSILON {
        return PlayerAnimation::JumpUp;
    }
    PlayerAnimation::JumpDown
}

/// Touching down out of a fall plays the landing cue even though Idle and
/// Walk have no entry cue of their own.
pub(crate) fn fires_land_cue(on_ground: bool, current: PlayerAnimation) -> bool {
    on_ground && current == PlayerAnimation::JumpDown
}

/// Entry cues per state.
pub(crate) fn entry_cues(state: PlayerAnimation) -> &'static [SoundCue] {
    match state {
        PlayerAnimation::JumpUp => &[SoundCue::Jump],
        PlayerAnimation::WallSlide => &[SoundCue::WallSlide],
        PlayerAnimation::Dead => &[SoundCue::Death, SoundCue::GameOver],
        PlayerAnimation::Success => &[SoundCue::Victory],
        _ => &[],
    }
}

/// Run the priority ladder for every living player. A frozen body is the
/// death edge: it clears the alive flag so this was the last evaluation.
pub(crate) fn evaluate_animation_state(
    mut query: Query<
        (
            Entity,
            &RigidBody,
            &MotionState,
            &WallState,
            &mut Lifecycle,
            &mut AnimationController,
            &LinearVelocity,
        ),
        With<Player>,
    >,
    mut changed: MessageWriter<AnimationStateChanged>,
    mut fx: MessageWriter<PlaySoundFx>,
) {
    for (entity, body, motion, wall, mut lifecycle, mut controller, velocity) in &mut query {
        if !lifecycle.alive {
            continue;
        }

        let inputs = AnimationInputs {
            frozen: matches!(body, RigidBody::Static),
            on_ground: motion.on_ground,
            wall_sliding: wall.is_sliding,
            velocity: velocity.0,
        };

        if inputs.frozen {
            lifecycle.alive = false;
        } else if fires_land_cue(motion.on_ground, controller.state) {
            fx.write(PlaySoundFx(SoundCue::Land));
        }

        let next = next_animation_state(&inputs);
        let from = controller.state;
        if controller.set_state(next) {
            changed.write(AnimationStateChanged {
                entity,
                from,
                to: next,
            });
        }
    }
}

/// Apply the one-shot entry side effects for each distinct transition:
/// start the clip, fire the entry cues, and on a lifecycle state stop the
/// music, drop the trail, and schedule the scene advance.
pub(crate) fn apply_entry_actions(
    mut changed: MessageReader<AnimationStateChanged>,
    clips: Res<ClipLibrary>,
    tuning: Res<PlayerTuning>,
    mut scheduler: ResMut<CallbackScheduler>,
    mut controllers: Query<&mut AnimationController>,
    music: Query<Entity, With<MusicChannel>>,
    trails: Query<Entity, With<Trail>>,
    mut fx: MessageWriter<PlaySoundFx>,
    mut died: MessageWriter<PlayerDiedEvent>,
    mut completed: MessageWriter<LevelCompletedEvent>,
    mut commands: Commands,
) {
    for transition in changed.read() {
        if let Ok(mut controller) = controllers.get_mut(transition.entity) {
            if let Some(clip) = clips.get(transition.to) {
                controller.play(clip);
            }
        }

        for cue in entry_cues(transition.to) {
            fx.write(PlaySoundFx(*cue));
        }

        match transition.to {
            PlayerAnimation::Dead => {
                stop_music(&mut commands, &music);
                for trail in trails.iter() {
                    commands.entity(trail).despawn();
                }
                scheduler.schedule(DeferredAction::AdvanceScene, tuning.scene_advance_delay);
                died.write(PlayerDiedEvent);
                info!("Player died");
            }
            PlayerAnimation::Success => {
                stop_music(&mut commands, &music);
                scheduler.schedule(DeferredAction::AdvanceScene, tuning.scene_advance_delay);
                completed.write(LevelCompletedEvent);
                info!("Level complete");
            }
            _ => {}
        }
    }
}

fn stop_music(commands: &mut Commands, music: &Query<Entity, With<MusicChannel>>) {
    for entity in music.iter() {
        commands.entity(entity).despawn();
    }
}

/// Advance the current clip's frame counter.
pub(crate) fn advance_animation_frames(time: Res<Time>, mut query: Query<&mut AnimationController>) {
    for mut controller in &mut query {
        if controller.finished {
            continue;
        }

        controller.frame_timer += time.delta_secs();

        if controller.frame_timer >= controller.frame_duration {
            controller.frame_timer -= controller.frame_duration;
            controller.current_frame += 1;

            if controller.current_frame >= controller.total_frames {
                if controller.looping {
                    controller.current_frame = 0;
                } else {
                    controller.current_frame = controller.total_frames - 1;
                    controller.finished = true;
                }
            }
        }
    }
}

/// Mirror the sprite to the current facing.
pub(crate) fn sync_facing_to_sprite(mut query: Query<(&MotionState, &mut Sprite), With<Player>>) {
    for (motion, mut sprite) in &mut query {
        sprite.flip_x = motion.facing == Facing::Left;
    }
}
