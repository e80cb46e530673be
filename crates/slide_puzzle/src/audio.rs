use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

const AMBIENT_VOLUME: f64 = 0.5;

/// Sent when a session starts and when it is won.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientCue {
    Start,
    Stop,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/ambient.ogg")]
    ambient: Handle<bevy_kira_audio::prelude::AudioSource>,
}

/// Cues can arrive before the track has loaded, so what is wanted is tracked apart
/// from what is playing.
#[derive(Resource, Default)]
struct Ambient {
    wanted: bool,
    playing: bool,
}

pub struct AmbientAudioPlugin;

impl Plugin for AmbientAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_event::<AmbientCue>()
            .init_resource::<Ambient>()
            .init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(
                Update,
                (
                    read_cues,
                    sync_ambient.run_if(in_state(AssetState::Loaded)),
                )
                    .chain(),
            );
    }
}

fn read_cues(mut cues: EventReader<AmbientCue>, mut ambient: ResMut<Ambient>) {
    for cue in cues.read() {
        ambient.wanted = *cue == AmbientCue::Start;
    }
}

fn sync_ambient(audio_assets: Res<AudioAssets>, audio: Res<Audio>, mut ambient: ResMut<Ambient>) {
    if ambient.wanted == ambient.playing {
        return;
    }
    if ambient.wanted {
        audio
            .play(audio_assets.ambient.clone_weak())
            .looped()
            .with_volume(AMBIENT_VOLUME);
        info!("Ambient audio started");
    } else {
        audio.stop();
        info!("Ambient audio stopped");
    }
    ambient.playing = ambient.wanted;
}
