//! Media element abstraction
//!
//! The player panel drives an audio element through [`MediaElement`]. In the
//! running service the element lives in the browser: [`BroadcastMedia`]
//! forwards each call as a [`MediaCommand`] event over SSE, and the browser
//! shim applies it to its `<audio>` tag.

use podcastr_common::events::{EventBus, MediaCommand, PlayerEvent};
use tracing::trace;

/// Control surface of an audio playback element
pub trait MediaElement: Send {
    /// Replace the source; with `autoplay`, playback starts once the element
    /// has loaded it
    fn load(&mut self, url: &str, autoplay: bool);

    fn play(&mut self);

    fn pause(&mut self);

    /// Set the playback position
    fn seek(&mut self, seconds: f64);

    /// Native loop attribute: a looping element restarts instead of ending
    fn set_loop(&mut self, enabled: bool);
}

/// Media element living in the connected browser
#[derive(Clone)]
pub struct BroadcastMedia {
    events: EventBus,
}

impl BroadcastMedia {
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    fn send(&self, command: MediaCommand) {
        trace!("media command: {:?}", command);
        self.events.emit_lossy(PlayerEvent::MediaCommand {
            command,
            timestamp: chrono::Utc::now(),
        });
    }
}

impl MediaElement for BroadcastMedia {
    fn load(&mut self, url: &str, autoplay: bool) {
        self.send(MediaCommand::Load {
            url: url.to_string(),
            autoplay,
        });
    }

    fn play(&mut self) {
        self.send(MediaCommand::Play);
    }

    fn pause(&mut self) {
        self.send(MediaCommand::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.send(MediaCommand::Seek { seconds });
    }

    fn set_loop(&mut self, enabled: bool) {
        self.send(MediaCommand::SetLoop { enabled });
    }
}

/// Records commands instead of playing anything
impl MediaElement for Vec<MediaCommand> {
    fn load(&mut self, url: &str, autoplay: bool) {
        self.push(MediaCommand::Load {
            url: url.to_string(),
            autoplay,
        });
    }

    fn play(&mut self) {
        self.push(MediaCommand::Play);
    }

    fn pause(&mut self) {
        self.push(MediaCommand::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.push(MediaCommand::Seek { seconds });
    }

    fn set_loop(&mut self, enabled: bool) {
        self.push(MediaCommand::SetLoop { enabled });
    }
}
