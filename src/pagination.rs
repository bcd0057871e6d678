//! Page navigation for the notes listing.

use serde::Serialize;

use crate::domain::types::PageNumber;

/// Pages always shown at the start of the navigation.
const LEFT_EDGE: usize = 2;
/// Pages shown before the current one.
const LEFT_CURRENT: usize = 2;
/// Pages shown after the current one.
const RIGHT_CURRENT: usize = 4;
/// Pages always shown at the end of the navigation.
const RIGHT_EDGE: usize = 2;

/// Page numbers to display, `None` marking a gap.
fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + LEFT_EDGE).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(LEFT_CURRENT));
    let mid_end = (current_page + RIGHT_CURRENT + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(RIGHT_EDGE) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One entry of the page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// Page number, `None` for a gap.
    pub number: Option<usize>,
    pub url: Option<String>,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<PageLink>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl<T> Paginated<T> {
    /// Builds the navigation, asking `url_for` for the link of every page.
    pub fn new<F>(items: Vec<T>, current_page: PageNumber, total_pages: usize, url_for: F) -> Self
    where
        F: Fn(PageNumber) -> String,
    {
        let page = current_page.get();
        let link = |number: usize| PageNumber::new(number).ok().map(&url_for);

        let pages = page_window(total_pages, page)
            .into_iter()
            .map(|number| PageLink {
                number,
                url: number.and_then(link),
                current: number == Some(page),
            })
            .collect();

        let prev_url = if page > 1 { link(page - 1) } else { None };
        let next_url = if page < total_pages {
            link(page + 1)
        } else {
            None
        };

        Self {
            items,
            page,
            total_pages,
            pages,
            prev_url,
            next_url,
        }
    }

    /// Navigation is only worth rendering with more than one page.
    pub fn has_many_pages(&self) -> bool {
        self.total_pages > 1
    }
}
