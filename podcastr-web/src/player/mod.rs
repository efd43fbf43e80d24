//! Player: playback state manager bound to a media element
//!
//! [`Player`] pairs the [`PlaybackManager`] with the [`PlayerPanel`]. Every
//! manager command is followed by a panel sync, and the element's native
//! events are translated back into manager commands here.

pub mod manager;
pub mod media;
pub mod panel;

pub use manager::{PlaybackManager, PlayerError};
pub use media::{BroadcastMedia, MediaElement};
pub use panel::PlayerPanel;

use podcastr_common::events::PlayerSnapshot;
use podcastr_common::{convert_duration, Episode};
use serde::Deserialize;

/// Native events reported by the media element
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaEvent {
    LoadedMetadata,
    TimeUpdate { current_time: f64 },
    Play,
    Pause,
    Ended,
}

pub struct Player<M> {
    manager: PlaybackManager,
    panel: PlayerPanel<M>,
}

impl<M: MediaElement> Player<M> {
    pub fn new(manager: PlaybackManager, media: M) -> Self {
        Self {
            manager,
            panel: PlayerPanel::new(media),
        }
    }

    pub fn play(&mut self, episode: Episode) {
        self.manager.play(episode);
        self.panel.sync(&self.manager);
    }

    pub fn playlist(&mut self, episodes: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        self.manager.playlist(episodes, index)?;
        self.panel.sync(&self.manager);
        Ok(())
    }

    pub fn toggle_play(&mut self, explicit: Option<bool>) {
        self.manager.toggle_play(explicit);
        self.panel.sync(&self.manager);
    }

    pub fn toggle_loop(&mut self) {
        self.manager.toggle_loop();
        self.panel.sync(&self.manager);
    }

    pub fn toggle_shuffle(&mut self) {
        self.manager.toggle_shuffle();
        self.panel.sync(&self.manager);
    }

    pub fn play_next(&mut self) {
        self.manager.play_next();
        self.panel.sync(&self.manager);
    }

    pub fn play_previous(&mut self) {
        self.manager.play_previous();
        self.panel.sync(&self.manager);
    }

    pub fn handle_seek(&mut self, seconds: u64) {
        self.panel.handle_seek(seconds);
    }

    /// A newly served page replaced the media element
    pub fn detach_element(&mut self) {
        self.panel.detach();
    }

    /// Bring a freshly connected element up to the current state
    pub fn resync(&mut self) {
        self.panel.sync(&self.manager);
    }

    /// Feed a native element event back into the player
    pub fn media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata => self.panel.on_loaded_metadata(),
            MediaEvent::TimeUpdate { current_time } => self.panel.on_time_update(current_time),
            MediaEvent::Play => {
                self.panel.element_run_state(true);
                self.toggle_play(Some(true));
            }
            MediaEvent::Pause => {
                self.panel.element_run_state(false);
                self.toggle_play(Some(false));
            }
            // A looping element never ends, so this is always an advance
            MediaEvent::Ended => self.play_next(),
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let current_episode = self.manager.current_episode().cloned();
        let duration = current_episode.as_ref().map(|e| e.duration).unwrap_or(0);
        let progress = self.panel.progress();

        PlayerSnapshot {
            episodes: self.manager.episodes().to_vec(),
            current_index: self.manager.current_index(),
            current_episode,
            is_playing: self.manager.is_playing(),
            is_looping: self.manager.is_looping(),
            is_shuffled: self.manager.is_shuffled(),
            has_next: self.manager.has_next(),
            has_previous: self.manager.has_previous(),
            progress,
            progress_string: convert_duration(progress),
            duration_string: convert_duration(duration),
        }
    }
}
