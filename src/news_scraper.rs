//! University news listing scraper.
//!
//! Fetches the news listing page and extracts one [`NewsItem`] per news card:
//!
//! ```html
//! <div class="news-item">
//!   <div class="date">12.09.2025</div>
//!   <div class="title"><a href="/news/123/">Title</a></div>
//! </div>
//! ```
//!
//! The scraper never fails from the caller's point of view: an unreachable site, a
//! non-success status or a changed page layout all produce an empty list.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::BotError;

/// One entry of the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub date: String,
}

/// Selectors for the listing markup, parsed once
#[derive(Debug)]
struct NewsSelectors {
    card: Selector,
    title: Selector,
    link: Selector,
    date: Selector,
}

impl NewsSelectors {
    fn new() -> Result<Self, BotError> {
        Ok(Self {
            card: parse_selector("div.news-item")?,
            title: parse_selector("div.title")?,
            link: parse_selector("a")?,
            date: parse_selector("div.date")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, BotError> {
    Selector::parse(css).map_err(|e| BotError::Parse(format!("selector `{css}`: {e}")))
}

/// HTTP scraper for the configured listing URL
#[derive(Debug)]
pub struct NewsScraper {
    client: reqwest::Client,
    listing_url: Url,
    selectors: NewsSelectors,
}

impl NewsScraper {
    pub fn new(listing_url: Url, timeout: Duration) -> Result<Self, BotError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            listing_url,
            selectors: NewsSelectors::new()?,
        })
    }

    /// Fetch the listing page and extract its news items in page order.
    ///
    /// # Returns
    ///
    /// The parsed items, or an empty vector when the page cannot be fetched.
    #[instrument(level = "info", skip_all, fields(url = %self.listing_url))]
    pub async fn fetch_news(&self) -> Vec<NewsItem> {
        match self.try_fetch_news().await {
            Ok(items) => {
                info!(count = items.len(), "Fetched news listing");
                items
            }
            Err(e) => {
                warn!(error = %e, "News listing unavailable, returning no items");
                Vec::new()
            }
        }
    }

    async fn try_fetch_news(&self) -> Result<Vec<NewsItem>, BotError> {
        let response = self.client.get(self.listing_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        debug!(bytes = html.len(), "Downloaded news listing");
        Ok(extract_items(&html, &self.listing_url, &self.selectors))
    }
}

fn extract_items(html: &str, listing_url: &Url, selectors: &NewsSelectors) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for card in document.select(&selectors.card) {
        match parse_card(card, listing_url, selectors) {
            Some(item) => items.push(item),
            None => debug!("Skipping news card without a title link"),
        }
    }

    items
}

fn parse_card(
    card: ElementRef<'_>,
    listing_url: &Url,
    selectors: &NewsSelectors,
) -> Option<NewsItem> {
    let title_block = card.select(&selectors.title).next()?;
    let link = title_block.select(&selectors.link).next()?;
    let href = link.value().attr("href")?;

    let url = listing_url
        .join(href)
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| href.to_string());

    let date = card
        .select(&selectors.date)
        .next()
        .map(element_text)
        .unwrap_or_default();

    Some(NewsItem {
        title: element_text(link),
        url,
        date,
    })
}

/// Parse listing markup without any network access.
///
/// Relative links are resolved against `listing_url`.
pub fn parse_news_page(html: &str, listing_url: &Url) -> Result<Vec<NewsItem>, BotError> {
    Ok(extract_items(html, listing_url, &NewsSelectors::new()?))
}

/// Element text with whitespace runs collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
