//! Pagination state
//!
//! One group (service category) is visible at a time. The state is an
//! explicit value owned by the controller and passed into the renderer.

use crate::types::UsageItem;

/// Pagination over the service-category groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupState {
    /// Currently selected page, zero-based
    pub current_page: usize,
    /// Total number of pages
    pub total_pages: usize,
}

impl PopupState {
    /// Create a state over `total_pages` pages with the first page selected
    pub fn new(total_pages: usize) -> Self {
        Self {
            current_page: 0,
            total_pages,
        }
    }

    /// Select a page; out-of-range requests are ignored
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < self.total_pages {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// Bullet indicator line, e.g. `● ○ ○ ○ ○`
    pub fn bullets(&self) -> String {
        (0..self.total_pages)
            .map(|page| {
                if page == self.current_page {
                    "●"
                } else {
                    "○"
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group quota bands by their service category, preserving first-seen order
pub fn group_by_service(items: &[UsageItem]) -> Vec<(String, Vec<&UsageItem>)> {
    let mut groups: Vec<(String, Vec<&UsageItem>)> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|(name, _)| *name == item.service_name) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.service_name.clone(), vec![item])),
        }
    }

    groups
}
