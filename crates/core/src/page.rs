//! Catalog pages: page metadata and the local pass over a fetched page

use serde::Serialize;

use crate::filter::{filter_characters, FilterCriteria};
use crate::model::{Character, Pagination};

/// Position of a page within the remote listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current: u64,
    pub total: u64,
    pub count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    /// Metadata for an empty result, e.g. after a failed fetch
    pub fn empty() -> Self {
        Self {
            current: 1,
            total: 1,
            count: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    pub characters: Vec<Character>,
    pub page_info: PageInfo,
}

impl CatalogPage {
    pub fn empty() -> Self {
        Self {
            characters: Vec::new(),
            page_info: PageInfo::empty(),
        }
    }
}

/// Build page metadata from the requested page and the `info` block
///
/// A zero page count is reported as a single page, and a zero total count
/// falls back to the number of characters actually received.
pub fn build_page_info(page: u64, pagination: &Pagination, received: usize) -> PageInfo {
    PageInfo {
        current: page,
        total: if pagination.pages == 0 {
            1
        } else {
            pagination.pages
        },
        count: if pagination.count == 0 {
            received as u64
        } else {
            pagination.count
        },
        has_next: pagination.next.is_some(),
        has_prev: pagination.prev.is_some(),
    }
}

/// Assemble a page from freshly parsed characters
///
/// The remote API already applied name, status, species and gender; only
/// the episode-count bounds are evaluated here.
pub fn build_catalog_page(
    page: u64,
    characters: Vec<Character>,
    pagination: &Pagination,
    filters: Option<&FilterCriteria>,
) -> CatalogPage {
    let page_info = build_page_info(page, pagination, characters.len());

    let characters = match filters {
        Some(filters) if filters.has_episode_bounds() => {
            filter_characters(&characters, &filters.episode_bounds())
        }
        _ => characters,
    };

    CatalogPage {
        characters,
        page_info,
    }
}
