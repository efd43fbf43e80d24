//! Shared player state
//!
//! One [`Player`] per application session, shared by every HTTP handler.
//! Commands are applied under a single lock, so they take effect atomically
//! and in arrival order; media commands and state snapshots reach SSE
//! subscribers in that same order.

use crate::player::{BroadcastMedia, PlaybackManager, Player};
use podcastr_common::events::{EventBus, PlayerEvent, PlayerSnapshot};
use tokio::sync::{broadcast, Mutex};

/// Events buffered per SSE subscriber
const EVENT_CAPACITY: usize = 256;

pub struct SharedState {
    player: Mutex<Player<BroadcastMedia>>,
    events: EventBus,
}

impl SharedState {
    pub fn new() -> Self {
        Self::with_manager(PlaybackManager::new())
    }

    pub fn with_manager(manager: PlaybackManager) -> Self {
        let events = EventBus::new(EVENT_CAPACITY);
        let media = BroadcastMedia::new(events.clone());
        Self {
            player: Mutex::new(Player::new(manager, media)),
            events,
        }
    }

    /// Apply a command and publish the resulting state
    pub async fn apply<T>(
        &self,
        command: impl FnOnce(&mut Player<BroadcastMedia>) -> T,
    ) -> (T, PlayerSnapshot) {
        let mut player = self.player.lock().await;
        let outcome = command(&mut player);
        let snapshot = player.snapshot();

        self.events.emit_lossy(PlayerEvent::PlayerStateChanged {
            snapshot: snapshot.clone(),
            timestamp: chrono::Utc::now(),
        });

        (outcome, snapshot)
    }

    pub async fn snapshot(&self) -> PlayerSnapshot {
        self.player.lock().await.snapshot()
    }

    /// Snapshot for a full page about to be served
    ///
    /// The page carries a new media element, so the player forgets the one
    /// it was driving; the next sync restores the source on the new one.
    pub async fn page_snapshot(&self) -> PlayerSnapshot {
        let mut player = self.player.lock().await;
        player.detach_element();
        player.snapshot()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
