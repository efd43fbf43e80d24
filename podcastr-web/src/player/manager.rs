//! Playback state manager
//!
//! Owns the active playlist and the player flags. All mutation goes through
//! the command methods; every command is a synchronous state transition.

use podcastr_common::Episode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

/// Rejected player commands
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// `playlist` called with an index outside the given episodes
    #[error("Playlist index {index} out of range for {len} episode(s)")]
    InvalidIndex { index: usize, len: usize },
}

/// Playlist and player flags
///
/// Invariant: `current_index < episodes.len()` whenever `episodes` is
/// non-empty. With an empty playlist the index is 0 and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PlaybackState {
    episodes: Vec<Episode>,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffled: bool,
}

/// Playback state manager
pub struct PlaybackManager {
    state: PlaybackState,
    rng: StdRng,
}

impl PlaybackManager {
    /// Empty playlist, all flags off
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Manager drawing shuffle picks from the given generator
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            state: PlaybackState::default(),
            rng,
        }
    }

    /// Replace the playlist with a single episode and start playing it
    pub fn play(&mut self, episode: Episode) {
        debug!("play: {}", episode.title);
        self.state.episodes = vec![episode];
        self.state.current_index = 0;
        self.state.is_playing = true;
    }

    /// Replace the playlist and start playing at `index`
    ///
    /// An index outside `episodes` leaves the state untouched.
    pub fn playlist(&mut self, episodes: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        if index >= episodes.len() {
            return Err(PlayerError::InvalidIndex {
                index,
                len: episodes.len(),
            });
        }

        debug!("playlist: {} episode(s) starting at {}", episodes.len(), index);
        self.state.episodes = episodes;
        self.state.current_index = index;
        self.state.is_playing = true;
        Ok(())
    }

    /// Set `is_playing` to `explicit`, or flip it when `None`
    pub fn toggle_play(&mut self, explicit: Option<bool>) {
        self.state.is_playing = explicit.unwrap_or(!self.state.is_playing);
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffled = !self.state.is_shuffled;
    }

    /// Move to the next episode
    ///
    /// Shuffled: any index of the playlist, the current one included.
    /// Otherwise the adjacent index when it exists, else nothing happens.
    pub fn play_next(&mut self) {
        if self.state.is_shuffled {
            self.shuffle_pick();
        } else if self.has_next() {
            self.state.current_index += 1;
        }
    }

    /// Move to the previous episode; mirror of [`play_next`](Self::play_next)
    pub fn play_previous(&mut self) {
        if self.state.is_shuffled {
            self.shuffle_pick();
        } else if self.has_previous() {
            self.state.current_index -= 1;
        }
    }

    fn shuffle_pick(&mut self) {
        let len = self.state.episodes.len();
        if len == 0 {
            return;
        }
        self.state.current_index = self.rng.gen_range(0..len);
        debug!("shuffle picked index {}", self.state.current_index);
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.state.episodes
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Episode at the current index, `None` with an empty playlist
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.episodes.get(self.state.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffled(&self) -> bool {
        self.state.is_shuffled
    }

    pub fn has_next(&self) -> bool {
        self.state.is_shuffled || self.state.current_index + 1 < self.state.episodes.len()
    }

    pub fn has_previous(&self) -> bool {
        self.state.is_shuffled || self.state.current_index >= 1
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new()
    }
}
