//! Relating news items to events and players through their tag arrays.

use itertools::Itertools;

use crate::models::NewsItem;

/// Every distinct event tag seen across `news`, in first-seen order.
pub fn event_tags<'a, I>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    tag_lists
        .into_iter()
        .flatten()
        .unique()
        .cloned()
        .collect()
}

/// News whose `events` tags contain `slug`, newest first.
pub fn related_to_event(news: Vec<NewsItem>, slug: &str) -> Vec<NewsItem> {
    related_by(news, slug, NewsItem::event_tags)
}

/// News whose `players` tags contain `slug`, newest first.
pub fn related_to_player(news: Vec<NewsItem>, slug: &str) -> Vec<NewsItem> {
    related_by(news, slug, NewsItem::player_tags)
}

fn related_by(news: Vec<NewsItem>, slug: &str, tags: fn(&NewsItem) -> &[String]) -> Vec<NewsItem> {
    news.into_iter()
        .filter(|item| tags(item).iter().any(|tag| tag == slug))
        .sorted_by(|a, b| b.created_at.cmp(&a.created_at))
        .collect()
}

/// Display title of an event slug: `norway-chess-2024` → `NORWAY CHESS 2024`.
pub fn event_title(slug: &str) -> String {
    slug.replace('-', " ").to_uppercase()
}
