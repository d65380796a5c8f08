//! Food news proxied from an RSS feed.
//!
//! The `read`, `emoji` and `tag` fields of every article are decoration
//! drawn uniformly at random. They say nothing about the article itself.

use log::{debug, error};
use rand::seq::SliceRandom;
use rand::Rng;
use rss::Channel;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::config::NewsConfig;
use crate::error::RelayError;
use crate::fetchers::RequestFetcher;
use crate::model::NewsArticle;

pub const EMOJIS: [&str; 10] = ["🥗", "🍳", "🌿", "🍫", "🥑", "🍷", "🍣", "🥐", "🍕", "🍯"];

pub const TAGS: [&str; 6] = [
    "Dining",
    "Cooking",
    "Food Culture",
    "Restaurant Review",
    "Recipes",
    "Nutrition",
];

pub const READ_MINUTES: RangeInclusive<u32> = 3..=8;

/// Shown when a publication date cannot be reformatted.
pub const RECENT: &str = "Recent";

pub struct NewsFeed {
    fetcher: RequestFetcher,
    feed_url: String,
    limit: usize,
}

impl NewsFeed {
    pub fn new(config: &NewsConfig, timeout: Duration) -> Result<Self, RelayError> {
        Ok(Self {
            fetcher: RequestFetcher::new(timeout)?,
            feed_url: config.feed_url.clone(),
            limit: config.limit,
        })
    }

    /// Fetch the feed and decorate its first entries, in feed order.
    pub async fn latest(&self) -> Result<Vec<NewsArticle>, RelayError> {
        let body = self.fetcher.fetch(&self.feed_url).await.map_err(|e| {
            error!("Failed to fetch news feed {}: {}", self.feed_url, e);
            RelayError::Feed(e.to_string())
        })?;

        let channel = Channel::read_from(body.as_bytes())?;
        debug!("News feed has {} items", channel.items().len());

        Ok(articles_from_channel(
            &channel,
            self.limit,
            &mut rand::thread_rng(),
        ))
    }
}

pub fn articles_from_channel<R: Rng>(
    channel: &Channel,
    limit: usize,
    rng: &mut R,
) -> Vec<NewsArticle> {
    channel
        .items()
        .iter()
        .take(limit)
        .map(|item| NewsArticle {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            date: format_date(item.pub_date()),
            read: format!("{} min read", rng.gen_range(READ_MINUTES)),
            emoji: pick(&EMOJIS, rng),
            tag: pick(&TAGS, rng),
        })
        .collect()
}

/// Reformat an RFC 822 style date ("Wed, 18 Feb 2026 20:11:10 +0000")
/// to "Feb 18", or [`RECENT`] when the tokens are not where expected.
pub fn format_date(published: Option<&str>) -> String {
    let Some(published) = published else {
        return RECENT.to_string();
    };

    let parts: Vec<&str> = published.split(' ').collect();
    match (parts.get(1), parts.get(2)) {
        (Some(day), Some(month)) if !day.is_empty() && !month.is_empty() => {
            format!("{month} {day}")
        }
        _ => RECENT.to_string(),
    }
}

fn pick<R: Rng>(choices: &[&str], rng: &mut R) -> String {
    choices.choose(rng).copied().unwrap_or_default().to_string()
}
