use std::num::NonZeroU32;

use crate::domain::notice::PageInfo;

pub const DEFAULT_ITEMS_PER_PAGE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Zero-based page index plus the page size fixed for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagePosition {
    pub page_number: u32,
    pub page_size: NonZeroU32,
}

impl Default for PagePosition {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Current page of the notice list.
///
/// Every mutator reports whether the page actually moved, so callers only
/// re-fetch on a real transition.
#[derive(Clone, Debug, Default)]
pub struct PaginationStore {
    position: PagePosition,
}

impl PaginationStore {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            position: PagePosition {
                page_number: 0,
                page_size,
            },
        }
    }

    pub fn position(&self) -> PagePosition {
        self.position
    }

    pub fn page_number(&self) -> u32 {
        self.position.page_number
    }

    pub fn go_to_page(&mut self, page_number: u32) -> bool {
        if self.position.page_number == page_number {
            return false;
        }
        self.position.page_number = page_number;
        true
    }

    pub fn reset_to_first_page(&mut self) -> bool {
        self.go_to_page(0)
    }

    /// Advances one page unless the current page is known to be the final one.
    ///
    /// Only page info describing the current position counts. Without it
    /// there is nothing known to advance into.
    pub fn next(&mut self, page_info: Option<&PageInfo>) -> bool {
        let Some(info) = page_info.filter(|info| self.describes_current(info)) else {
            return false;
        };
        if info.last {
            return false;
        }
        match self.position.page_number.checked_add(1) {
            Some(page_number) => self.go_to_page(page_number),
            None => false,
        }
    }

    /// Steps back one page unless already on the first one.
    pub fn previous(&mut self, page_info: Option<&PageInfo>) -> bool {
        if page_info.is_some_and(|info| self.describes_current(info) && info.first) {
            return false;
        }
        match self.position.page_number.checked_sub(1) {
            Some(page_number) => self.go_to_page(page_number),
            None => false,
        }
    }

    fn describes_current(&self, info: &PageInfo) -> bool {
        info.page_number == self.position.page_number
    }
}

const EDGE_PAGES: u32 = 2;
const PAGES_AROUND_CURRENT: u32 = 2;

/// Compact page strip for rendering: the first and last pages, the pages
/// around `current_page`, and `None` for each elided run. Zero-based.
pub fn page_window(total_pages: u32, current_page: u32) -> Vec<Option<u32>> {
    if total_pages == 0 {
        return vec![];
    }

    let last_page = total_pages - 1;
    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = EDGE_PAGES.min(total_pages);
    pages.extend((0..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(PAGES_AROUND_CURRENT));
    let mid_end = current_page
        .saturating_add(PAGES_AROUND_CURRENT)
        .min(last_page)
        + 1;

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(EDGE_PAGES));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..total_pages).map(Some));

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(page_number: u32, first: bool, last: bool) -> PageInfo {
        PageInfo {
            page_number,
            page_size: 20,
            total_elements: 100,
            total_pages: 5,
            first,
            last,
        }
    }

    #[test]
    fn go_to_page_reports_changes_only() {
        let mut store = PaginationStore::default();
        assert!(!store.go_to_page(0));
        assert!(store.go_to_page(3));
        assert_eq!(store.page_number(), 3);
        assert!(store.reset_to_first_page());
        assert!(!store.reset_to_first_page());
    }

    #[test]
    fn next_respects_last_flag() {
        let mut store = PaginationStore::default();
        assert!(!store.next(None));
        assert!(!store.next(Some(&info(0, true, true))));
        assert!(store.next(Some(&info(0, true, false))));
        assert_eq!(store.page_number(), 1);
    }

    #[test]
    fn next_ignores_page_info_of_another_page() {
        let mut store = PaginationStore::default();
        store.go_to_page(4);

        assert!(!store.next(Some(&info(0, true, false))));
        assert_eq!(store.page_number(), 4);
    }

    #[test]
    fn next_stops_at_the_largest_index() {
        let mut store = PaginationStore::default();
        store.go_to_page(u32::MAX);

        assert!(!store.next(Some(&info(u32::MAX, false, false))));
        assert_eq!(store.page_number(), u32::MAX);
    }

    #[test]
    fn previous_respects_first_flag_and_zero() {
        let mut store = PaginationStore::default();
        assert!(!store.previous(None));

        store.go_to_page(2);
        assert!(!store.previous(Some(&info(2, true, false))));
        assert!(store.previous(Some(&info(2, false, false))));
        assert_eq!(store.page_number(), 1);
    }

    #[test]
    fn previous_ignores_first_flag_of_another_page() {
        let mut store = PaginationStore::default();
        store.go_to_page(3);

        assert!(store.previous(Some(&info(0, true, false))));
        assert_eq!(store.page_number(), 2);
    }

    #[test]
    fn page_window_elides_middle_runs() {
        assert_eq!(page_window(0, 0), vec![]);
        assert_eq!(page_window(3, 1), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(
            page_window(10, 0),
            vec![Some(0), Some(1), Some(2), None, Some(8), Some(9)]
        );
        assert_eq!(
            page_window(20, 10),
            vec![
                Some(0),
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(18),
                Some(19)
            ]
        );
    }

    #[test]
    fn page_window_stays_small_for_huge_totals() {
        let window = page_window(u32::MAX, u32::MAX / 2);

        assert_eq!(window.len(), 11);
        assert_eq!(window.first(), Some(&Some(0)));
        assert_eq!(window.last(), Some(&Some(u32::MAX - 1)));

        assert_eq!(
            page_window(u32::MAX, u32::MAX),
            vec![
                Some(0),
                Some(1),
                None,
                Some(u32::MAX - 3),
                Some(u32::MAX - 2),
                Some(u32::MAX - 1)
            ]
        );
    }
}
