//! Audio domain: sound-cue lookup and one-shot playback.
//!
//! Gameplay systems request cues by id through [`PlaySoundFx`]; the lookup
//! table resolves them to clips at playback time. A missing library or a
//! missing clip is skipped silently so audio never blocks a mechanic.

use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings, Volume};
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use std::collections::HashMap;

/// One-shot sound effects the controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Land,
    WallSlide,
    Coin,
    Death,
    GameOver,
    Victory,
}

impl SoundCue {
    const ALL: [SoundCue; 7] = [
        SoundCue::Jump,
        SoundCue::Land,
        SoundCue::WallSlide,
        SoundCue::Coin,
        SoundCue::Death,
        SoundCue::GameOver,
        SoundCue::Victory,
    ];

    fn file(self) -> &'static str {
        match self {
            SoundCue::Jump => "audio/jump.ogg",
            SoundCue::Land => "audio/land.ogg",
            SoundCue::WallSlide => "audio/wall_slide.ogg",
            SoundCue::Coin => "audio/coin.ogg",
            SoundCue::Death => "audio/death.ogg",
            SoundCue::GameOver => "audio/game_over.ogg",
            SoundCue::Victory => "audio/victory.ogg",
        }
    }
}

/// Request to play a one-shot cue.
#[derive(Debug)]
pub struct PlaySoundFx(pub SoundCue);

impl Message for PlaySoundFx {}

/// Marker for the looping background-music entity.
#[derive(Component, Debug)]
pub struct MusicChannel;

/// Cue-to-clip lookup table, filled at boot.
#[derive(Resource, Debug, Default)]
pub struct SoundLibrary {
    cues: HashMap<SoundCue, Handle<AudioSource>>,
    pub music: Option<Handle<AudioSource>>,
}

impl SoundLibrary {
    pub fn get(&self, cue: SoundCue) -> Option<Handle<AudioSource>> {
        self.cues.get(&cue).cloned()
    }
}

pub(crate) fn load_sound_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut library = SoundLibrary::default();
    for cue in SoundCue::ALL {
        library.cues.insert(cue, asset_server.load(cue.file()));
    }
    library.music = Some(asset_server.load("audio/theme.ogg"));
    commands.insert_resource(library);
}

pub(crate) fn play_requested_cues(
    mut requests: MessageReader<PlaySoundFx>,
    library: Option<Res<SoundLibrary>>,
    mut commands: Commands,
) {
    let Some(library) = library else {
        // Drain silently; cues are best-effort.
        for _ in requests.read() {}
        return;
    };

    for request in requests.read() {
        let Some(clip) = library.get(request.0) else {
            debug!("no clip registered for cue {:?}", request.0);
            continue;
        };
        commands.spawn((
            AudioPlayer::new(clip),
            PlaybackSettings {
                volume: Volume::Linear(0.8),
                ..PlaybackSettings::DESPAWN
            },
        ));
    }
}

pub struct AudioFxPlugin;

impl Plugin for AudioFxPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlaySoundFx>()
            .add_systems(Startup, load_sound_library)
            .add_systems(Update, play_requested_cues);
    }
}
