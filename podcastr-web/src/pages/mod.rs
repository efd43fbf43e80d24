//! Page views and their data loading
//!
//! [`PageStore`] loads home and episode page data from the episode source,
//! converts the wire records into display models and keeps them in
//! revalidating caches. Rendering lives in [`render`].

pub mod cache;
pub mod render;

use crate::error::{Error, Result};
use crate::source::EpisodeSource;
use cache::RevalidatingCache;
use podcastr_common::config::TomlConfig;
use podcastr_common::{ApiEpisode, Episode, EpisodeView};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const HOME_KEY: &str = "home";

/// Home page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeData {
    /// Most recent episodes, shown as cards
    pub latest: Vec<EpisodeView>,
    /// The remaining episodes, shown as a table
    pub all: Vec<EpisodeView>,
}

impl HomeData {
    /// Split a newest-first list into cards and table rows
    pub fn split(mut episodes: Vec<EpisodeView>, latest_count: usize) -> Self {
        let all = episodes.split_off(latest_count.min(episodes.len()));
        Self {
            latest: episodes,
            all,
        }
    }

    /// Cards followed by table rows: the playlist every play button loads
    pub fn complete_list(&self) -> Vec<Episode> {
        self.latest
            .iter()
            .chain(self.all.iter())
            .map(EpisodeView::to_episode)
            .collect()
    }
}

/// Page data limits and revalidate intervals
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub home_limit: usize,
    pub latest_count: usize,
    pub home_revalidate: Duration,
    pub episode_revalidate: Duration,
}

impl From<&TomlConfig> for PageSettings {
    fn from(config: &TomlConfig) -> Self {
        Self {
            home_limit: config.home_limit,
            latest_count: config.latest_count,
            home_revalidate: Duration::from_secs(config.home_revalidate_secs),
            episode_revalidate: Duration::from_secs(config.episode_revalidate_secs),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&TomlConfig::default())
    }
}

pub struct PageStore {
    source: Arc<dyn EpisodeSource>,
    settings: PageSettings,
    home: RevalidatingCache<HomeData>,
    episodes: RevalidatingCache<EpisodeView>,
}

impl PageStore {
    pub fn new(source: Arc<dyn EpisodeSource>, settings: PageSettings) -> Self {
        Self {
            home: RevalidatingCache::new("home", settings.home_revalidate),
            episodes: RevalidatingCache::new("episode", settings.episode_revalidate),
            source,
            settings,
        }
    }

    /// Home page data: the newest `home_limit` episodes
    pub async fn home(&self) -> Result<HomeData> {
        self.home
            .get_or_fetch(HOME_KEY, || async {
                let records = self.source.latest(self.settings.home_limit).await?;
                let views = to_views(records)?;
                Ok::<_, Error>(HomeData::split(views, self.settings.latest_count))
            })
            .await
    }

    /// Episode detail page data
    pub async fn episode(&self, id: &str) -> Result<EpisodeView> {
        self.episodes
            .get_or_fetch(id, || async {
                let record = self.source.episode(id).await?;
                Ok::<_, Error>(EpisodeView::try_from(record)?)
            })
            .await
    }

    /// Load the home page and the newest `count` episode pages ahead of the
    /// first request
    ///
    /// Failures are logged; those pages are fetched on first request instead.
    pub async fn prerender(&self, count: usize) {
        match self.home().await {
            Ok(home) => info!(
                "Prerendered home page ({} latest, {} more)",
                home.latest.len(),
                home.all.len()
            ),
            Err(e) => warn!("Home page prerender failed: {}", e),
        }

        if count == 0 {
            return;
        }

        let ids = match self.source.latest(count).await {
            Ok(records) => records.into_iter().map(|r| r.id).collect::<Vec<_>>(),
            Err(e) => {
                warn!("Episode page prerender failed: {}", e);
                return;
            }
        };

        for id in ids {
            match self.episode(&id).await {
                Ok(_) => info!("Prerendered episode page {}", id),
                Err(e) => warn!("Episode page {} prerender failed: {}", id, e),
            }
        }
    }
}

fn to_views(records: Vec<ApiEpisode>) -> Result<Vec<EpisodeView>> {
    records
        .into_iter()
        .map(|r| EpisodeView::try_from(r).map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize) -> EpisodeView {
        EpisodeView {
            id: format!("ep-{}", n),
            title: format!("Episode {}", n),
            thumbnail: format!("https://example.com/{}.jpg", n),
            members: "Diego".to_string(),
            published_at: "8 Jan 21".to_string(),
            duration: 60,
            duration_string: "00:01:00".to_string(),
            description: String::new(),
            url: format!("https://example.com/{}.m4a", n),
        }
    }

    #[test]
    fn test_split_twelve() {
        let home = HomeData::split((0..12).map(view).collect(), 2);
        assert_eq!(home.latest.len(), 2);
        assert_eq!(home.all.len(), 10);
        assert_eq!(home.latest[0].id, "ep-0");
        assert_eq!(home.all[0].id, "ep-2");
    }

    #[test]
    fn test_split_fewer_than_latest_count() {
        let home = HomeData::split(vec![view(0)], 2);
        assert_eq!(home.latest.len(), 1);
        assert!(home.all.is_empty());
    }

    #[test]
    fn test_complete_list_order() {
        let home = HomeData::split((0..4).map(view).collect(), 2);
        let list = home.complete_list();
        let titles: Vec<&str> = list.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Episode 0", "Episode 1", "Episode 2", "Episode 3"]);
    }
}
