//! Player event types and the event bus
//!
//! The web service publishes two kinds of events to connected browsers:
//! snapshots of the player state after every command, and commands for the
//! browser's media element produced by the player panel.

use crate::episode::Episode;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Read-only view of the player at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub episodes: Vec<Episode>,
    pub current_index: usize,
    pub current_episode: Option<Episode>,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffled: bool,
    pub has_next: bool,
    pub has_previous: bool,
    /// Elapsed seconds as last reported by the media element
    pub progress: u64,
    /// `progress` formatted as `HH:MM:SS`
    pub progress_string: String,
    /// Current episode duration formatted as `HH:MM:SS` (`00:00:00` when idle)
    pub duration_string: String,
}

/// Instruction for the browser's media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MediaCommand {
    /// Replace the element source, starting playback once loaded when
    /// `autoplay` is set
    Load { url: String, autoplay: bool },
    Play,
    Pause,
    /// Set the playback position in seconds
    Seek { seconds: f64 },
    /// Native loop attribute
    SetLoop { enabled: bool },
}

/// Podcastr event types
///
/// Events are broadcast via [`EventBus`] and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Player state after a command was applied
    ///
    /// Triggers:
    /// - SSE: Re-render the player panel controls and progress
    PlayerStateChanged {
        snapshot: PlayerSnapshot,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Command for the media element, in the order the panel issued it
    ///
    /// Triggers:
    /// - SSE: Browser shim applies it to its `<audio>` element
    MediaCommand {
        command: MediaCommand,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl PlayerEvent {
    /// SSE event name
    pub fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::PlayerStateChanged { .. } => "PlayerStateChanged",
            PlayerEvent::MediaCommand { .. } => "MediaCommand",
        }
    }
}

/// Event distribution bus
///
/// Uses tokio::broadcast internally: publishing never blocks, slow
/// subscribers observe a lag error instead of stalling producers.
///
/// # Examples
///
/// ```
/// use podcastr_common::events::{EventBus, MediaCommand, PlayerEvent};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(PlayerEvent::MediaCommand {
///     command: MediaCommand::Pause,
///     timestamp: chrono::Utc::now(),
/// });
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    /// Creates a new EventBus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: PlayerEvent) {
        let event_type = event.event_type();
        if self.tx.send(event).is_err() {
            trace!("No subscribers for {}", event_type);
        }
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
