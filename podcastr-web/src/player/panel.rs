//! Player panel: media element synchronization
//!
//! Keeps a [`MediaElement`] consistent with the [`PlaybackManager`] and tracks
//! the elapsed time the element reports. The panel is the only writer of the
//! element's run state; the manager's `is_playing` flag is the source of truth.
//!
//! Every served page carries a fresh element. [`PlayerPanel::detach`] drops
//! what the panel knows about the old one, so the next sync reloads the
//! source and playback resumes where it stopped.

use super::manager::PlaybackManager;
use super::media::MediaElement;
use podcastr_common::Episode;
use tracing::debug;

pub struct PlayerPanel<M> {
    media: M,
    /// Episode whose source the element currently holds
    loaded: Option<Episode>,
    /// Run state last written to (or reported by) the element
    playing: bool,
    looping: bool,
    /// Elapsed whole seconds
    progress: u64,
    /// Time updates are accepted once the loaded source reported metadata
    tracking: bool,
    /// Episode and position held by a replaced element
    resume: Option<(Episode, u64)>,
    /// Position to seek to once the loaded source reports metadata
    start_at: u64,
}

impl<M: MediaElement> PlayerPanel<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            loaded: None,
            playing: false,
            looping: false,
            progress: 0,
            tracking: false,
            resume: None,
            start_at: 0,
        }
    }

    /// Apply manager state changes to the element
    ///
    /// Issues a load when the current episode changed, the loop attribute when
    /// the loop flag changed and play/pause when the playing flag changed.
    /// New episodes autoplay; a source restored after [`detach`](Self::detach)
    /// only plays when the manager says so.
    pub fn sync(&mut self, manager: &PlaybackManager) {
        let current = manager.current_episode();
        if current != self.loaded.as_ref() {
            let resume = self.resume.take();
            if let Some(episode) = current {
                match resume {
                    Some((held, at)) if &held == episode => {
                        debug!("restoring {} at {}s", episode.url, at);
                        self.media.load(&episode.url, manager.is_playing());
                        self.playing = manager.is_playing();
                        self.start_at = at;
                    }
                    _ => {
                        debug!("loading {}", episode.url);
                        self.media.load(&episode.url, true);
                        self.start_at = 0;
                    }
                }
                self.tracking = false;
            }
            self.loaded = current.cloned();
        }

        if manager.is_looping() != self.looping {
            self.looping = manager.is_looping();
            self.media.set_loop(self.looping);
        }

        if manager.is_playing() != self.playing {
            self.playing = manager.is_playing();
            if self.playing {
                self.media.play();
            } else {
                self.media.pause();
            }
        }
    }

    /// The element was replaced by a fresh, empty one
    pub fn detach(&mut self) {
        if let Some(episode) = self.loaded.take() {
            self.resume = Some((episode, self.progress));
        }
        self.playing = false;
        self.looping = false;
        self.tracking = false;
    }

    /// The element reported it is running (or paused) on its own
    pub(crate) fn element_run_state(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Duration of the loaded source is known: move to the start position
    /// and start tracking
    pub fn on_loaded_metadata(&mut self) {
        if self.loaded.is_none() {
            return;
        }
        let start = std::mem::take(&mut self.start_at);
        self.media.seek(start as f64);
        self.progress = start;
        self.tracking = true;
    }

    /// Element playback position advanced
    pub fn on_time_update(&mut self, current_time: f64) {
        if self.tracking && current_time.is_finite() {
            self.progress = current_time.max(0.0).floor() as u64;
        }
    }

    /// Move the element to `seconds`, updating progress without waiting for
    /// the element to confirm
    pub fn handle_seek(&mut self, seconds: u64) {
        if self.loaded.is_none() {
            return;
        }
        self.media.seek(seconds as f64);
        self.progress = seconds;
    }

    pub fn progress(&self) -> u64 {
        self.progress
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}
