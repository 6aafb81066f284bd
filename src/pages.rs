//! Server-side HTML for every page of the site.

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

use crate::{
    association::event_title,
    models::{
        AchievementLine, ImageCredit, NewsItem, Player, PlayerProfile, PlayerSummary,
        RatingsSnapshot, TimeControl,
    },
    paging::Page,
};

const SITE_NAME: &str = "ChessDaily";

pub const NO_NEWS: &str = "No news yet.";
pub const NO_PLAYERS: &str = "No players found.";
pub const NO_EVENTS: &str = "No events yet.";
pub const NO_EVENT_NEWS: &str = "No news for this event.";
pub const NO_RELATED_NEWS: &str = "No related news yet.";
pub const NO_ACHIEVEMENTS: &str = "No achievements listed.";
pub const PLAYER_NOT_FOUND: &str = "Player not found.";
pub const NEWS_NOT_FOUND: &str = "News not found.";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;color:#111}\
main{max-width:72rem;margin:0 auto;padding:2rem}\
a{color:#2563eb;text-decoration:none}a:hover{text-decoration:underline}\
.nav{display:flex;gap:.75rem}.nav a{padding:.5rem 1rem;background:#e5e7eb;border-radius:.25rem;color:#111}\
.header{display:flex;justify-content:space-between;align-items:center}\
.columns{display:flex;flex-wrap:wrap;gap:2rem;margin-top:2.5rem}.news{flex:1;min-width:20rem}\
.card{display:flex;gap:1rem;border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;margin-bottom:1.5rem;color:#111}\
.card img{width:10rem;height:6rem;object-fit:cover;border-radius:.375rem}\
.muted{color:#6b7280;font-size:.875rem}\
aside{width:100%;max-width:31rem}.tabs{display:flex;gap:.75rem;margin-bottom:.5rem}\
.tabs .active{font-weight:600;border-bottom:2px solid #111;color:#111}.tabs a{color:#9ca3af}\
table{width:100%;border-collapse:collapse;font-size:.875rem}th,td{padding:.25rem .5rem;text-align:left}\
tbody tr:nth-child(even){background:#f9fafb}.num{text-align:right}\
.pager{display:flex;gap:1rem;align-items:center}\
.avatar{width:260px;height:300px;object-fit:cover}.placeholder{width:260px;height:300px;background:#e5e7eb;display:flex;align-items:center;justify-content:center}";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn slug_path(prefix: &str, slug: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(slug))
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn layout(title: &str, body: &str) -> String {
    let title = if title == SITE_NAME {
        SITE_NAME.to_string()
    } else {
        format!("{} · {SITE_NAME}", escape(title))
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    )
}

fn home_link() -> &'static str {
    "<a class=\"nav-home\" href=\"/\">Home Page</a>"
}

/// Inline message for a slug that matched nothing.
pub fn not_found(message: &str) -> String {
    layout(
        message,
        &format!("<p>{}</p>\n<p>{}</p>", escape(message), home_link()),
    )
}

pub struct HomeView<'a> {
    pub news: &'a [NewsItem],
    pub page: Page,
    pub ratings: &'a RatingsSnapshot,
    pub time_control: TimeControl,
}

fn home_href(page: usize, time_control: TimeControl) -> String {
    let tc: &'static str = time_control.into();
    format!("/?tc={tc}&amp;page={page}")
}

pub fn home(view: &HomeView<'_>) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"header\"><h1>{SITE_NAME}</h1>\
         <nav class=\"nav\"><a href=\"/players\">Players</a><a href=\"/events\">Events</a></nav></div>\n\
         <p>Daily chess news, tournament highlights, and global player updates.</p>\n"
    ));

    body.push_str("<div class=\"columns\">\n<section class=\"news\">\n<h2>Latest News</h2>\n");
    if view.news.is_empty() {
        body.push_str(&format!("<p>{NO_NEWS}</p>\n"));
    } else {
        for item in view.news {
            body.push_str(&news_card(item));
        }
        body.push_str(&pager(view.page, view.time_control));
    }
    body.push_str("</section>\n");

    body.push_str(&ratings_sidebar(view.ratings, view.time_control, view.page.number));
    body.push_str("</div>");

    layout(SITE_NAME, &body)
}

fn news_card(item: &NewsItem) -> String {
    let cover = item
        .cover_url
        .as_deref()
        .map(|url| format!("<img src=\"{}\" alt=\"{}\">", escape(url), escape(&item.title)))
        .unwrap_or_default();
    let summary = item
        .summary
        .as_deref()
        .map(|s| format!("<p>{}</p>", escape(s)))
        .unwrap_or_default();

    format!(
        "<a class=\"card\" href=\"{href}\"><article>{cover}<div><h3>{title}</h3>\
         <p class=\"muted\">{when}</p>{summary}</div></article></a>\n",
        href = slug_path("/news", &item.slug),
        title = escape(&item.title),
        when = timestamp(item.created_at),
    )
}

fn pager(page: Page, time_control: TimeControl) -> String {
    if page.total <= 1 {
        return String::new();
    }
    let previous = page
        .previous()
        .map(|n| format!("<a href=\"{}\">Previous</a>", home_href(n, time_control)))
        .unwrap_or_default();
    let next = page
        .next()
        .map(|n| format!("<a href=\"{}\">Next</a>", home_href(n, time_control)))
        .unwrap_or_default();
    format!(
        "<nav class=\"pager\">{previous}<span class=\"muted\">Page {} of {}</span>{next}</nav>\n",
        page.number, page.total
    )
}

fn ratings_sidebar(ratings: &RatingsSnapshot, active: TimeControl, page: usize) -> String {
    let tabs: String = TimeControl::iter()
        .map(|tc| {
            let class = if tc == active { " class=\"active\"" } else { "" };
            format!("<a{class} href=\"{}\">{}</a>", home_href(page, tc), tc.label())
        })
        .collect();

    let rows: String = ratings
        .list(active)
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
                entry.rank,
                escape(&entry.name),
                escape(&entry.fed),
                entry.rating,
                entry.born.map(|b| b.to_string()).unwrap_or_default(),
            )
        })
        .collect();

    let updated = ratings
        .updated_at
        .as_deref()
        .map(|at| format!(" Updated {}.", escape(at)))
        .unwrap_or_default();

    format!(
        "<aside>\n<h2>Top Ratings</h2>\n<div class=\"tabs\">{tabs}</div>\n\
         <table><thead><tr><th>#</th><th>Name</th><th>Fed</th><th class=\"num\">Rating</th><th class=\"num\">Born</th></tr></thead>\n\
         <tbody>\n{rows}</tbody></table>\n\
         <p class=\"muted\">Snapshot based on FIDE {active} ratings.{updated}</p>\n</aside>\n"
    )
}

pub fn news_detail(item: &NewsItem) -> String {
    let published = item
        .published_at
        .map(|at| format!(" · published {}", timestamp(at)))
        .unwrap_or_default();
    let mut body = format!(
        "<div class=\"header\"><h1>{}</h1>{}</div>\n<p class=\"muted\">{}{published}</p>\n",
        escape(&item.title),
        home_link(),
        timestamp(item.created_at),
    );
    if let Some(url) = &item.cover_url {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape(url),
            escape(&item.title)
        ));
    }
    if let Some(summary) = &item.summary {
        body.push_str(&format!("<p><strong>{}</strong></p>\n", escape(summary)));
    }
    if let Some(content) = &item.content {
        for paragraph in content.split("\n\n").filter(|p| !p.trim().is_empty()) {
            body.push_str(&format!("<p>{}</p>\n", escape(paragraph.trim())));
        }
    }

    let links = |title: &str, prefix: &str, tags: &[String], label: fn(&str) -> String| {
        if tags.is_empty() {
            return String::new();
        }
        let items: String = tags
            .iter()
            .map(|tag| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    slug_path(prefix, tag),
                    escape(&label(tag))
                )
            })
            .collect();
        format!("<h2>{title}</h2>\n<ul>{items}</ul>\n")
    };
    body.push_str(&links("Events", "/events", item.event_tags(), event_title));
    body.push_str(&links("Players", "/players", item.player_tags(), str::to_string));

    layout(&item.title, &body)
}

pub fn players(list: &[PlayerSummary]) -> String {
    let mut body = String::from("<h1>Players</h1>\n");
    if list.is_empty() {
        body.push_str(&format!("<p>{NO_PLAYERS}</p>"));
    } else {
        body.push_str("<ul>\n");
        for player in list {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                slug_path("/players", &player.slug),
                escape(&player.name)
            ));
        }
        body.push_str("</ul>");
    }
    layout("Players", &body)
}

/// Everything the player page shows, merged from the store row and the
/// bundled profile document.
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub name: String,
    pub image: Option<String>,
    pub credit: Option<ImageCredit>,
    pub achievements: Option<Vec<AchievementLine>>,
}

impl PlayerView {
    /// The store row wins for every field it has; the profile fills the gaps.
    /// `None` when neither source knows the player.
    pub fn merge(player: Option<Player>, profile: Option<PlayerProfile>) -> Option<Self> {
        match (player, profile) {
            (None, None) => None,
            (Some(player), profile) => {
                let (image, credit, fallback) = match profile {
                    Some(p) => (p.image, p.image_credit, p.achievements),
                    None => (None, None, None),
                };
                let from_profile = player.avatar_url.is_none();
                Some(Self {
                    name: player.name,
                    image: player.avatar_url.or(image),
                    credit: if from_profile { credit } else { None },
                    achievements: player.achievements.or(fallback).map(|a| a.lines()),
                })
            }
            (None, Some(profile)) => Some(Self {
                name: profile.name,
                image: profile.image,
                credit: profile.image_credit,
                achievements: profile.achievements.map(|a| a.lines()),
            }),
        }
    }
}

pub fn player(view: &PlayerView, related: &[NewsItem]) -> String {
    let mut body = format!(
        "<div class=\"header\"><h1>{}</h1>{}</div>\n<div class=\"columns\">\n<div>",
        escape(&view.name),
        home_link()
    );

    match &view.image {
        Some(url) => body.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            escape(url),
            escape(&view.name)
        )),
        None => body.push_str("<div class=\"placeholder\">No Image</div>"),
    }
    if let Some(credit) = &view.credit {
        if let Some(text) = credit.attribution() {
            let text = match &credit.url {
                Some(url) => format!("<a href=\"{}\">{}</a>", escape(url), escape(&text)),
                None => escape(&text),
            };
            body.push_str(&format!("<p class=\"muted\">Photo: {text}</p>"));
        }
    }
    body.push_str("</div>\n<div class=\"news\">\n<h2>Achievements</h2>\n");

    match view.achievements.as_deref() {
        Some(lines) if !lines.is_empty() => {
            body.push_str("<ul>\n");
            for line in lines {
                body.push_str(&format!(
                    "<li><strong>{}:</strong> {}</li>\n",
                    escape(&line.label),
                    escape(&line.entries)
                ));
            }
            body.push_str("</ul>\n");
        }
        _ => body.push_str(&format!("<p>{NO_ACHIEVEMENTS}</p>\n")),
    }
    body.push_str("</div>\n</div>\n<hr>\n<section>\n<h2>Related News</h2>\n");

    if related.is_empty() {
        body.push_str(&format!("<p>{NO_RELATED_NEWS}</p>\n"));
    } else {
        for item in related {
            body.push_str(&format!(
                "<a class=\"card\" href=\"{}\"><div><h3>{}</h3><p class=\"muted\">{}</p><p class=\"muted\">{}</p></div></a>\n",
                slug_path("/news", &item.slug),
                escape(&item.title),
                escape(item.summary.as_deref().unwrap_or_default()),
                date(item.created_at),
            ));
        }
    }
    body.push_str("</section>");

    layout(&view.name, &body)
}

pub fn events(tags: &[String]) -> String {
    let mut body = String::from("<h1>Events</h1>\n");
    if tags.is_empty() {
        body.push_str(&format!("<p>{NO_EVENTS}</p>"));
    } else {
        body.push_str("<ul>\n");
        for tag in tags {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                slug_path("/events", tag),
                escape(&event_title(tag))
            ));
        }
        body.push_str("</ul>");
    }
    layout("Events", &body)
}

pub fn event(slug: &str, news: &[NewsItem]) -> String {
    let title = event_title(slug);
    let mut body = format!("<h1>{}</h1>\n", escape(&title));
    if news.is_empty() {
        body.push_str(&format!("<p>{NO_EVENT_NEWS}</p>"));
    } else {
        body.push_str("<ul>\n");
        for item in news {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a> <span class=\"muted\">{}</span></li>\n",
                slug_path("/news", &item.slug),
                escape(&item.title),
                date(item.created_at),
            ));
        }
        body.push_str("</ul>");
    }
    layout(&title, &body)
}
