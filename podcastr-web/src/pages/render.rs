//! HTML rendering for the app shell, page views and player panel
//!
//! Every interpolated string is escaped except the episode description,
//! which is trusted HTML from the episodes API.

use super::HomeData;
use podcastr_common::events::PlayerSnapshot;
use podcastr_common::EpisodeView;
use serde::Serialize;
use std::fmt::Write;

const STYLE: &str = include_str!("../../static/podcastr.css");

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize data for an inline `<script type="application/json">` block
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

/// Full document: header, page content and the persistent player
pub fn render_document(
    title: &str,
    content: &str,
    snapshot: &PlayerSnapshot,
    header_date: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="app">
<main class="content">
{header}
{content}
</main>
<aside class="player" id="player-panel">
{panel}
</aside>
</div>
{audio}
<script src="/static/player.js" defer></script>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        header = render_header(header_date),
        content = content,
        panel = render_player_panel(snapshot),
        audio = render_audio(snapshot),
    )
}

/// Media element carrying the current source; the browser shim loads it
/// once the event stream restores playback
fn render_audio(snapshot: &PlayerSnapshot) -> String {
    match &snapshot.current_episode {
        Some(episode) => format!(
            r#"<audio id="podcastr-audio" preload="none" src="{src}"{looping}></audio>"#,
            src = escape_html(&episode.url),
            looping = if snapshot.is_looping { " loop" } else { "" },
        ),
        None => r#"<audio id="podcastr-audio" preload="none"></audio>"#.to_string(),
    }
}

fn render_header(date: &str) -> String {
    format!(
        r#"<header class="site-header">
<a href="/" class="logo">Podcastr</a>
<p class="tagline">O melhor para você ouvir, sempre</p>
<span class="today">{}</span>
</header>"#,
        escape_html(date)
    )
}

/// Home page content: latest episodes as cards, the rest as a table
pub fn render_home(home: &HomeData) -> String {
    let mut html = String::new();
    let offset = home.latest.len();

    html.push_str(r#"<div class="home">"#);
    html.push_str("<section class=\"latest\">\n<h2>Últimos lançamentos</h2>\n<ul>\n");
    for (index, e) in home.latest.iter().enumerate() {
        let _ = write!(
            html,
            r#"<li class="card">
<img src="{thumbnail}" alt="{title}" width="96" height="96">
<div class="details">
<a href="/episodes/{id}">{title}</a>
<p>{members}</p>
<span class="date">{published_at}</span>
<span class="duration">{duration}</span>
</div>
<button type="button" class="play" data-play-index="{index}" aria-label="Tocar episódio">▶</button>
</li>
"#,
            thumbnail = escape_html(&e.thumbnail),
            title = escape_html(&e.title),
            id = escape_html(&e.id),
            members = escape_html(&e.members),
            published_at = escape_html(&e.published_at),
            duration = escape_html(&e.duration_string),
            index = index,
        );
    }
    html.push_str("</ul>\n</section>\n");

    html.push_str(
        r#"<section class="all">
<h2>Todos episódios</h2>
<table class="episodes">
<thead><tr><th></th><th>Podcast</th><th>Integrantes</th><th>Data</th><th>Duração</th><th></th></tr></thead>
<tbody>
"#,
    );
    for (index, e) in home.all.iter().enumerate() {
        let _ = write!(
            html,
            r#"<tr>
<td><img src="{thumbnail}" alt="{title}" width="40" height="40"></td>
<td><a href="/episodes/{id}">{title}</a></td>
<td>{members}</td>
<td>{published_at}</td>
<td>{duration}</td>
<td><button type="button" class="play" data-play-index="{index}" aria-label="Tocar episódio">▶</button></td>
</tr>
"#,
            thumbnail = escape_html(&e.thumbnail),
            title = escape_html(&e.title),
            id = escape_html(&e.id),
            members = escape_html(&e.members),
            published_at = escape_html(&e.published_at),
            duration = escape_html(&e.duration_string),
            index = offset + index,
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");

    let _ = write!(
        html,
        r#"<script type="application/json" id="page-playlist">{}</script>
</div>"#,
        script_json(&home.complete_list())
    );

    html
}

/// Episode detail content
pub fn render_episode(episode: &EpisodeView) -> String {
    format!(
        r#"<div class="episode">
<div class="thumbnail">
<a href="/" class="back" aria-label="Voltar">←</a>
<img src="{thumbnail}" alt="" width="700" height="160">
<button type="button" class="play" data-play-episode aria-label="Tocar">▶</button>
</div>
<header>
<h1>{title}</h1>
<span>{members}</span>
<span>{published_at}</span>
<span>{duration}</span>
</header>
<div class="description">{description}</div>
<script type="application/json" id="page-episode">{json}</script>
</div>"#,
        thumbnail = escape_html(&episode.thumbnail),
        title = escape_html(&episode.title),
        members = escape_html(&episode.members),
        published_at = escape_html(&episode.published_at),
        duration = escape_html(&episode.duration_string),
        description = episode.description,
        json = script_json(&episode.to_episode()),
    )
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

fn active(flag: bool) -> &'static str {
    if flag {
        " active"
    } else {
        ""
    }
}

/// Player panel content, re-rendered after every state change
pub fn render_player_panel(snapshot: &PlayerSnapshot) -> String {
    let episode = snapshot.current_episode.as_ref();
    let none = episode.is_none();

    let now_playing = match episode {
        Some(e) => format!(
            r#"<div class="now-playing">
<img src="{thumbnail}" alt="" width="296" height="296">
<strong>{title}</strong>
<span>{members}</span>
</div>"#,
            thumbnail = escape_html(&e.thumbnail),
            title = escape_html(&e.title),
            members = escape_html(&e.members),
        ),
        None => r#"<div class="empty-player"><strong>Selecione um podcast para ouvir</strong></div>"#
            .to_string(),
    };

    let slider = match episode {
        Some(e) => format!(
            r#"<input type="range" id="player-seek" min="0" max="{max}" value="{value}">"#,
            max = e.duration,
            value = snapshot.progress,
        ),
        None => r#"<div class="empty-slider"></div>"#.to_string(),
    };

    format!(
        r#"<header><strong>Tocando agora</strong></header>
{now_playing}
<footer class="{footer_class}">
<div class="progress">
<span>{progress}</span>
<div class="slider">{slider}</div>
<span>{duration}</span>
</div>
<div class="controls">
<button type="button" data-action="toggle-shuffle" class="control{shuffle_active}" aria-label="Embaralhar"{shuffle_disabled}>⤮</button>
<button type="button" data-action="previous" class="control" aria-label="Tocar anterior"{previous_disabled}>⏮</button>
<button type="button" data-action="toggle-play" class="control play-button" aria-label="{play_label}"{play_disabled}>{play_icon}</button>
<button type="button" data-action="next" class="control" aria-label="Tocar próxima"{next_disabled}>⏭</button>
<button type="button" data-action="toggle-loop" class="control{loop_active}" aria-label="Repetir"{loop_disabled}>⟳</button>
</div>
</footer>"#,
        now_playing = now_playing,
        footer_class = if none { "idle" } else { "" },
        progress = escape_html(&snapshot.progress_string),
        slider = slider,
        duration = escape_html(&snapshot.duration_string),
        shuffle_active = active(snapshot.is_shuffled),
        shuffle_disabled = disabled(none || snapshot.episodes.len() == 1),
        previous_disabled = disabled(none || !snapshot.has_previous),
        play_label = if snapshot.is_playing { "Pause" } else { "Tocar" },
        play_disabled = disabled(none),
        play_icon = if snapshot.is_playing { "❚❚" } else { "▶" },
        next_disabled = disabled(none || !snapshot.has_next),
        loop_active = active(snapshot.is_looping),
        loop_disabled = disabled(none),
    )
}

/// Error page content
pub fn render_error(status: u16, message: &str) -> String {
    format!(
        r#"<div class="error-page">
<h1>{status}</h1>
<p>{message}</p>
<a href="/">Voltar</a>
</div>"#,
        status = status,
        message = escape_html(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_common::Episode;

    fn view(n: usize) -> EpisodeView {
        EpisodeView {
            id: format!("ep-{}", n),
            title: format!("Episode <{}>", n),
            thumbnail: format!("https://example.com/{}.jpg", n),
            members: "Diego & Richard".to_string(),
            published_at: "8 Jan 21".to_string(),
            duration: 3661,
            duration_string: "01:01:01".to_string(),
            description: "<p>Trusted <b>HTML</b></p>".to_string(),
            url: format!("https://example.com/{}.m4a", n),
        }
    }

    fn snapshot(episodes: Vec<Episode>, is_shuffled: bool) -> PlayerSnapshot {
        let current_episode = episodes.first().cloned();
        PlayerSnapshot {
            has_next: is_shuffled || episodes.len() > 1,
            has_previous: is_shuffled,
            episodes,
            current_index: 0,
            current_episode,
            is_playing: true,
            is_looping: false,
            is_shuffled,
            progress: 0,
            progress_string: "00:00:00".to_string(),
            duration_string: "01:01:01".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_script_json_cannot_close_script_tag() {
        let json = script_json(&"</script><script>alert(1)</script>");
        assert!(!json.contains("</script>"));
    }

    #[test]
    fn test_home_play_indexes() {
        let home = HomeData::split((0..5).map(view).collect(), 2);
        let html = render_home(&home);

        for index in 0..5 {
            assert!(html.contains(&format!(r#"data-play-index="{}""#, index)));
        }
        assert!(html.contains(r#"href="/episodes/ep-4""#));
        assert!(html.contains("Episode &lt;0&gt;"));
        assert!(html.contains("Diego &amp; Richard"));
    }

    #[test]
    fn test_episode_description_is_verbatim() {
        let html = render_episode(&view(1));
        assert!(html.contains("<p>Trusted <b>HTML</b></p>"));
        assert!(html.contains("<h1>Episode &lt;1&gt;</h1>"));
        assert!(html.contains("01:01:01"));
        assert!(html.contains("data-play-episode"));
    }

    #[test]
    fn test_empty_player_panel_disables_controls() {
        let html = render_player_panel(&snapshot(Vec::new(), false));
        assert!(html.contains("Selecione um podcast para ouvir"));
        assert_eq!(html.matches(" disabled").count(), 5);
        assert!(!html.contains("player-seek"));
    }

    #[test]
    fn test_single_episode_disables_shuffle() {
        let html = render_player_panel(&snapshot(vec![view(1).to_episode()], false));
        assert!(html.contains(r#"data-action="toggle-shuffle" class="control" aria-label="Embaralhar" disabled"#));
        assert!(html.contains(r#"data-action="toggle-play" class="control play-button" aria-label="Pause">"#));
        assert!(html.contains(r#"max="3661""#));
    }

    #[test]
    fn test_shuffled_panel_enables_navigation() {
        let episodes = vec![view(1).to_episode(), view(2).to_episode()];
        let html = render_player_panel(&snapshot(episodes, true));
        assert!(html.contains(r#"data-action="previous" class="control" aria-label="Tocar anterior">"#));
        assert!(html.contains(r#"data-action="next" class="control" aria-label="Tocar próxima">"#));
        assert!(html.contains("control active"));
    }

    #[test]
    fn test_document_wraps_content() {
        let html = render_document("Home", "<p>body</p>", &snapshot(Vec::new(), false), "Sat Oct 17 2026");
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("Sat Oct 17 2026"));
        assert!(html.contains(r#"<audio id="podcastr-audio" preload="none"></audio>"#));
    }

    #[test]
    fn test_document_audio_carries_current_source() {
        let mut playing = snapshot(vec![view(1).to_episode()], false);
        playing.is_looping = true;
        let html = render_document("Home", "", &playing, "Sat Oct 17 2026");
        assert!(html.contains(
            r#"<audio id="podcastr-audio" preload="none" src="https://example.com/1.m4a" loop></audio>"#
        ));
    }
}
