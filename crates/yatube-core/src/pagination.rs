//! Page-number pagination over ordered collections.
//!
//! A [`Paginator`] never fails on a bad page number: a missing or too-small
//! request lands on the first page, a too-large one on the last page. The
//! total item count always describes the whole collection, not the slice.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of posts per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Read a `?page=` query value. Anything that is not an integer counts as absent.
pub fn parse_page_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Splits a collection of known size into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    pub fn new(per_page: u64) -> Result<Self, DomainError> {
        if per_page == 0 {
            return Err(DomainError::Validation(
                "page size must be a positive integer".to_string(),
            ));
        }
        Ok(Self { per_page })
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of pages for `total` items. An empty collection still has one page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page).max(1)
    }

    /// Resolve the requested page against a collection of `total` items.
    pub fn window(&self, total: u64, requested: Option<i64>) -> PageWindow {
        let num_pages = self.num_pages(total);
        let number = match requested {
            Some(n) if n > num_pages as i64 => num_pages,
            Some(n) if n >= 1 => n as u64,
            _ => 1,
        };
        let offset = (number - 1) * self.per_page;
        let limit = self.per_page.min(total.saturating_sub(offset));

        PageWindow {
            number,
            num_pages,
            offset,
            limit,
            total_item_count: total,
        }
    }

    /// Paginate an already materialised, ordered collection.
    pub fn paginate<T>(&self, items: Vec<T>, requested: Option<i64>) -> Page<T> {
        let window = self.window(items.len() as u64, requested);
        let slice = items
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect();
        window.fill(slice)
    }
}

/// The position of one page inside a collection, before its items are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub offset: u64,
    pub limit: u64,
    pub total_item_count: u64,
}

impl PageWindow {
    pub fn fill<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            total_item_count: self.total_item_count,
        }
    }
}

/// One page of items plus enough metadata to render navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total_item_count: u64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total_item_count: self.total_item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Paginator::new(0).is_err());
        assert_eq!(Paginator::new(3).unwrap().per_page(), 3);
        assert_eq!(Paginator::default().per_page(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_every_item_lands_on_exactly_one_page() {
        for per_page in 1..=7u64 {
            let paginator = Paginator::new(per_page).unwrap();
            for n in 0..=23usize {
                let items: Vec<usize> = (0..n).collect();
                let expected_pages = (n as u64).div_ceil(per_page).max(1);
                assert_eq!(paginator.num_pages(n as u64), expected_pages);

                let mut seen = Vec::new();
                for number in 1..=expected_pages {
                    let page = paginator.paginate(items.clone(), Some(number as i64));
                    assert_eq!(page.number, number);
                    assert_eq!(page.total_item_count, n as u64);
                    assert!(page.items.len() as u64 <= per_page);
                    seen.extend(page.items);
                }
                assert_eq!(seen, items, "per_page={per_page} n={n}");
            }
        }
    }

    #[test]
    fn test_missing_page_is_first_page() {
        let page = Paginator::default().paginate((0..25).collect::<Vec<_>>(), None);
        assert_eq!(page.number, 1);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
        assert!(!page.has_previous());
        assert_eq!(page.next_page_number(), Some(2));
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let paginator = Paginator::default();
        let items: Vec<i32> = (0..25).collect();

        let high = paginator.paginate(items.clone(), Some(99));
        assert_eq!(high.number, 3);
        assert_eq!(high.items, (20..25).collect::<Vec<_>>());
        assert!(!high.has_next());

        let low = paginator.paginate(items.clone(), Some(0));
        assert_eq!(low.number, 1);

        let negative = paginator.paginate(items, Some(-4));
        assert_eq!(negative.number, 1);
    }

    #[test]
    fn test_empty_collection_has_one_empty_page() {
        let page = Paginator::default().paginate(Vec::<u8>::new(), Some(5));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_item_count, 0);
    }

    #[test]
    fn test_second_page_of_eleven() {
        let window = Paginator::default().window(11, Some(2));
        assert_eq!(window.offset, 10);
        assert_eq!(window.limit, 1);
        assert_eq!(window.total_item_count, 11);

        let page = window.fill(vec!["last"]).map(str::to_uppercase);
        assert_eq!(page.items, vec!["LAST".to_string()]);
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.total_item_count, 11);
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number(Some("2")), Some(2));
        assert_eq!(parse_page_number(Some(" 3 ")), Some(3));
        assert_eq!(parse_page_number(Some("-1")), Some(-1));
        assert_eq!(parse_page_number(Some("last")), None);
        assert_eq!(parse_page_number(None), None);
    }
}
