//! Core library for the character catalog
//!
//! This crate implements the **Functional Core** of the catalog application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`catalog_core`** (this crate): Pure transformation functions with zero I/O
//! - **`catalog`**: HTTP transport, caching and the CLI (the Imperative Shell)
//!
//! Every function here is deterministic and side-effect free. Records that
//! fail to parse inside a batch are returned to the caller instead of being
//! logged, so the shell decides how to report them.
//!
//! # Module Organization
//!
//! - [`model`]: Status/Species/Gender enumerations and the Character entity
//! - [`parser`]: Raw JSON records to characters
//! - [`filter`]: Predicate-based filtering
//! - [`sort`]: Stable ordering by a fixed set of keys
//! - [`validate`]: Structural checks returning itemized errors
//! - [`stats`]: Distributions, averages and rankings
//! - [`present`]: Display-ready view models
//! - [`page`]: Page metadata and local post-filtering of fetched pages
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use catalog_core::filter::{filter_characters, FilterCriteria};
//! use catalog_core::model::Status;
//! use catalog_core::parser::parse_character_list;
//!
//! let batch = parse_character_list(&payload);
//! let alive = filter_characters(
//!     &batch.characters,
//!     &FilterCriteria {
//!         status: Some(Status::Alive),
//!         ..Default::default()
//!     },
//! );
//! ```

pub mod filter;
pub mod model;
pub mod page;
pub mod parser;
pub mod present;
pub mod sort;
pub mod stats;
pub mod validate;
