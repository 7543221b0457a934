use std::cmp::Reverse;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::types::Article;
use crate::{Error, Result};

pub const ARTICLES_PER_PAGE: usize = 9;

/// Parses a `YYYY-MM-DD` date filter.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{raw}: {e}")))
}

/// Keeps the articles published on `date` (UTC day) and orders them newest first.
///
/// Without a date every article is kept. Articles without a usable timestamp
/// sort last and never match a date.
pub fn filter_by_date(articles: Vec<Article>, date: Option<NaiveDate>) -> Vec<Article> {
    let mut kept: Vec<Article> = match date {
        None => articles,
        Some(date) => {
            let start = date.and_time(NaiveTime::MIN).and_utc();
            let end = start + chrono::Duration::days(1);
            articles
                .into_iter()
                .filter(|a| matches!(a.published(), Some(t) if t >= start && t < end))
                .collect()
        }
    };
    // stable, so undated articles keep their relative order
    kept.sort_by_key(|a| Reverse(a.published()));
    kept
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    /// 0-based index of the first item, in the full list.
    pub start: usize,
    /// Exclusive end index, in the full list.
    pub end: usize,
}

impl<T> Page<T> {
    /// Cuts page `page` out of `all`. Page 0 is treated as page 1.
    pub fn paginate(all: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total = all.len();
        let total_pages = total.div_ceil(per_page);
        let start = (page - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);
        let items = all.into_iter().skip(start).take(end - start).collect();
        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
            start,
            end,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing 1-9 of 20 articles"
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return format!("Showing 0 of {} articles", self.total);
        }
        format!("Showing {}-{} of {} articles", self.start + 1, self.end, self.total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            start: self.start,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(title: &str, published_at: &str) -> Article {
        Article::new(title, "Wire").with_published_at(published_at)
    }

    #[test]
    fn test_sorts_newest_first_without_date() {
        let articles = vec![
            dated("old", "2024-03-01T08:00:00Z"),
            Article::new("undated", "Wire"),
            dated("new", "2024-03-02T08:00:00Z"),
        ];
        let titles: Vec<_> = filter_by_date(articles, None)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["new", "old", "undated"]);
    }

    #[test]
    fn test_filters_to_one_utc_day() {
        let articles = vec![
            dated("before", "2024-03-01T23:59:59Z"),
            dated("morning", "2024-03-02T00:00:00Z"),
            dated("evening", "2024-03-02T23:59:59.999Z"),
            dated("offset", "2024-03-02T01:30:00+05:30"),
            dated("after", "2024-03-03T00:00:00Z"),
            Article::new("undated", "Wire"),
        ];
        let date = parse_date("2024-03-02").unwrap();
        let titles: Vec<_> = filter_by_date(articles, Some(date))
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["evening", "morning"]);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(matches!(parse_date("yesterday"), Err(Error::InvalidDate(_))));
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_paginate() {
        let all: Vec<usize> = (0..20).collect();
        let first = Page::paginate(all.clone(), 1, ARTICLES_PER_PAGE);
        assert_eq!(first.items, (0..9).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.summary(), "Showing 1-9 of 20 articles");
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = Page::paginate(all.clone(), 3, ARTICLES_PER_PAGE);
        assert_eq!(last.items, vec![18, 19]);
        assert_eq!(last.summary(), "Showing 19-20 of 20 articles");
        assert!(!last.has_next());

        let past = Page::paginate(all.clone(), 7, ARTICLES_PER_PAGE);
        assert!(past.items.is_empty());
        assert_eq!(past.start, 20);

        let zero = Page::paginate(all, 0, ARTICLES_PER_PAGE);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items.len(), 9);
    }

    #[test]
    fn test_paginate_huge_page_number() {
        let page = Page::paginate((0..20).collect::<Vec<usize>>(), usize::MAX, ARTICLES_PER_PAGE);
        assert!(page.items.is_empty());
        assert_eq!((page.start, page.end), (20, 20));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.summary(), "Showing 0 of 20 articles");
    }

    #[test]
    fn test_paginate_empty() {
        let page = Page::paginate(Vec::<usize>::new(), 1, ARTICLES_PER_PAGE);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.summary(), "Showing 0 of 0 articles");
    }
}
