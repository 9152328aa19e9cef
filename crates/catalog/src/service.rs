use crate::cache::CharacterCache;
use crate::prelude::*;
use crate::transport::Transport;
use catalog_core::filter::FilterCriteria;
use catalog_core::model::Character;
use catalog_core::page::{build_catalog_page, CatalogPage};
use catalog_core::parser::{parse_character, parse_character_list, SkippedRecord};
use catalog_core::stats::{calculate_statistics, CatalogStatistics};
use futures::stream::{self, StreamExt};
use serde_json::Value;

/// Page requests allowed in flight at once
pub const MAX_CONCURRENT_PAGES: usize = 4;

/// Orchestrates transport, parsing and caching
///
/// Transport failures never escape: a failed page fetch yields an empty page
/// and a failed lookup yields `None`, both logged at `warn`.
pub struct CatalogService<'c, T: Transport> {
    transport: T,
    cache: &'c mut CharacterCache,
}

fn report_skipped(page: u64, skipped: &[SkippedRecord]) {
    for record in skipped {
        warn!(
            "Skipping record {} on page {page}: {}",
            record.index, record.error
        );
    }
}

impl<'c, T: Transport> CatalogService<'c, T> {
    pub fn new(transport: T, cache: &'c mut CharacterCache) -> Self {
        Self { transport, cache }
    }

    fn ingest_page(
        &mut self,
        page: u64,
        payload: &Value,
        filters: Option<&FilterCriteria>,
    ) -> CatalogPage {
        let batch = parse_character_list(payload);
        report_skipped(page, &batch.skipped);

        self.cache.extend(batch.characters.iter().cloned());

        build_catalog_page(page, batch.characters, &batch.pagination, filters)
    }

    /// Fetch one page, letting the API filter what it can and applying the
    /// episode-count bounds locally
    pub async fn get_page(&mut self, page: u64, filters: Option<&FilterCriteria>) -> CatalogPage {
        let params = filters
            .map(FilterCriteria::to_api_params)
            .unwrap_or_default();

        let response = self.transport.fetch_page(page, &params).await;
        match response {
            Ok(payload) => self.ingest_page(page, &payload, filters),
            Err(err) => {
                warn!("Failed to fetch page {page}: {err}");
                CatalogPage::empty()
            }
        }
    }

    /// Fetch up to `pages` pages and return every parsed character in page
    /// order
    ///
    /// The first page is fetched alone so the request count can be clamped to
    /// the number of pages the API reports. The rest are fetched with at most
    /// `MAX_CONCURRENT_PAGES` requests in flight.
    pub async fn get_pages(&mut self, pages: u64) -> Vec<Character> {
        if pages == 0 {
            return Vec::new();
        }

        let first = self.get_page(1, None).await;
        let last = pages.min(first.page_info.total);
        if last < pages {
            debug!("Clamping {pages} requested pages to {last}");
        }

        let transport = &self.transport;
        let responses: Vec<(u64, Result<Value, Error>)> = stream::iter(2..=last)
            .map(|page| async move { (page, transport.fetch_page(page, &[]).await) })
            .buffered(MAX_CONCURRENT_PAGES)
            .collect()
            .await;

        let mut characters = first.characters;
        for (page, response) in responses {
            match response {
                Ok(payload) => {
                    let page = self.ingest_page(page, &payload, None);
                    characters.extend(page.characters);
                }
                Err(err) => warn!("Failed to fetch page {page}: {err}"),
            }
        }
        characters
    }

    /// Look a character up, reading through the cache
    pub async fn get_by_id(&mut self, id: i64) -> Option<Character> {
        if let Some(character) = self.cache.get(id) {
            debug!("Cache hit for character {id}");
            return Some(character.clone());
        }

        let payload = match self.transport.fetch_one(id).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to fetch character {id}: {err}");
                return None;
            }
        };

        match parse_character(&payload) {
            Ok(character) => {
                self.cache.insert(character.clone());
                Some(character)
            }
            Err(err) => {
                warn!("Failed to parse character {id}: {err}");
                None
            }
        }
    }

    /// Characters whose name contains `query`, from the first result page
    pub async fn search(&mut self, query: &str) -> Vec<Character> {
        let filters = FilterCriteria {
            name: Some(query.to_string()),
            ..Default::default()
        };
        self.get_page(1, Some(&filters)).await.characters
    }

    /// Statistics over `characters`, or over the first page when none are given
    pub async fn statistics(&mut self, characters: Option<&[Character]>) -> CatalogStatistics {
        match characters {
            Some(characters) => calculate_statistics(characters),
            None => calculate_statistics(&self.get_page(1, None).await.characters),
        }
    }
}
