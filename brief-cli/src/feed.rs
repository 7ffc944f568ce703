//! RSS sources: fetching, item extraction, and the publication window.

use crate::dates::parse_rss_date;
use crate::error::{PipelineError, Result};
use brief_config::FeedsConfig;
use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Title used when an item has none.
pub const UNTITLED: &str = "(無標題)";

const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// A news article as the pipeline sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    /// Full text when the source provides more than the summary.
    pub text: Option<String>,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub url: Option<String>,
    pub categories: Vec<String>,
}

impl Article {
    /// Body handed to the narrator, falling back to the summary.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.summary)
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Everything the keyword filter and domain classifier look at.
    pub fn haystack(&self) -> String {
        let mut parts = vec![self.title.as_str(), self.summary.as_str()];
        if let Some(text) = &self.text {
            parts.push(text);
        }
        parts.extend(self.categories.iter().map(String::as_str));
        parts.join("\n")
    }
}

/// One `<item>` of a feed, before its date is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: String,
    pub categories: Vec<String>,
}

/// Extract the items of an RSS document. Items without a link or a date are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut items = Vec::new();

    for node in doc.descendants().filter(|n| n.has_tag_name("item")) {
        // Local-name match: RSS 1.0 puts item fields in a default namespace.
        let child_text = |name: &str| {
            node.children()
                .find(|c| {
                    c.is_element()
                        && c.has_tag_name(name)
                        && c.tag_name().namespace() != Some(DC_NS)
                })
                .map(element_text)
        };

        let Some(link) = child_text("link").filter(|l| !l.is_empty()) else {
            debug!("skipping feed item without link");
            continue;
        };
        let published = child_text("pubDate").or_else(|| {
            node.children()
                .find(|c| c.has_tag_name((DC_NS, "date")))
                .map(element_text)
        });
        let Some(published) = published.filter(|p| !p.is_empty()) else {
            debug!(%link, "skipping feed item without date");
            continue;
        };

        let title = child_text("title")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let categories = node
            .children()
            .filter(|c| c.is_element() && c.has_tag_name("category"))
            .map(element_text)
            .filter(|c| !c.is_empty())
            .collect();

        items.push(FeedItem {
            title,
            link,
            description: child_text("description").unwrap_or_default(),
            published,
            categories,
        });
    }

    Ok(items)
}

fn element_text(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Items published on `today` or in the `window_days - 1` days before it, as articles.
///
/// Dates are compared in UTC. Items with an unreadable date are dropped.
pub fn recent_articles(items: Vec<FeedItem>, today: NaiveDate, window_days: u32) -> Vec<Article> {
    let earliest = today
        .checked_sub_days(Days::new(u64::from(window_days.max(1) - 1)))
        .unwrap_or(NaiveDate::MIN);

    items
        .into_iter()
        .filter_map(|item| {
            let published = match parse_rss_date(&item.published) {
                Ok(published) => published,
                Err(err) => {
                    debug!(link = %item.link, "{err}");
                    return None;
                }
            };
            let day = published.naive_utc().date();
            if day < earliest || day > today {
                debug!(link = %item.link, %day, "outside the publication window");
                return None;
            }
            Some(Article {
                title: item.title,
                summary: item.description,
                text: None,
                publish_date: Some(published),
                url: Some(item.link),
                categories: item.categories,
            })
        })
        .collect()
}

/// Anything that can hand back the raw XML of a feed URL.
pub trait FeedSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP client for feed URLs. One attempt per URL.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &FeedsConfig) -> Result<Self> {
        Self::new(&config.user_agent, Duration::from_secs(config.timeout_secs))
    }
}

impl FeedSource for FeedClient {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

/// Feed URLs listed one per line; blank lines are ignored.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
