//! News formatting on top of the listing scraper.

use tracing::debug;

use crate::news_scraper::{NewsItem, NewsScraper};

pub struct NewsService {
    scraper: NewsScraper,
}

impl NewsService {
    pub fn new(scraper: NewsScraper) -> Self {
        Self { scraper }
    }

    /// First `limit` items in page order, formatted for display
    pub async fn get_latest_news(&self, limit: usize) -> Vec<String> {
        self.scraper
            .fetch_news()
            .await
            .iter()
            .take(limit)
            .map(format_news_item)
            .collect()
    }

    /// Items whose title contains `query`, ignoring case. An empty query matches nothing.
    pub async fn search_news(&self, query: &str) -> Vec<NewsItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let matches: Vec<NewsItem> = self
            .scraper
            .fetch_news()
            .await
            .into_iter()
            .filter(|item| item.title.to_lowercase().contains(&query))
            .collect();

        debug!(query = %query, count = matches.len(), "News search completed");
        matches
    }
}

/// Date line followed by the title; the date line is omitted when unknown
pub fn format_news_item(item: &NewsItem) -> String {
    if item.date.is_empty() {
        item.title.clone()
    } else {
        format!("{}\n{}", item.date, item.title)
    }
}

/// Search result block: date, title and link
pub fn format_search_result(item: &NewsItem) -> String {
    format!("{}\n{}", format_news_item(item), item.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(date: &str, title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: "https://kemsu.ru/news/1/".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_format_with_date() {
        assert_eq!(
            format_news_item(&item("12.09.2025", "Ярмарка вакансий")),
            "12.09.2025\nЯрмарка вакансий"
        );
    }

    #[test]
    fn test_format_without_date() {
        assert_eq!(format_news_item(&item("", "Ярмарка вакансий")), "Ярмарка вакансий");
    }

    #[test]
    fn test_search_result_includes_link() {
        assert_eq!(
            format_search_result(&item("01.02.2025", "День открытых дверей")),
            "01.02.2025\nДень открытых дверей\nhttps://kemsu.ru/news/1/"
        );
    }
}
