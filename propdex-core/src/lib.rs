//! # Propdex Core
//!
//! Indexing engine for propeller wind-tunnel datasets whose metadata lives
//! only in file names.
//!
//! ## Overview
//!
//! - **Scanning**: volume discovery and per-volume file listings behind a
//!   [`scanner::FileSystem`] trait
//! - **Parsing**: tokenizer, ordered matcher rules and unit correction that
//!   turn one filename into a [`propdex_model::FlatFileRecord`]
//! - **Clustering**: canonical identifiers and a single grouping pass into
//!   [`propdex_model::PropellerRecord`]s
//! - **Loading**: numeric tables and photographs for one record
//!
//! ## Feature Flags
//!
//! - `images` (default): photograph decoding through the `image` crate
//!
//! ## Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use propdex_core::{ParserSettings, PropellerIndexer, ScanSettings};
//!
//! fn print_ids() -> propdex_core::Result<()> {
//!     let indexer = PropellerIndexer::new(ScanSettings::default(), &ParserSettings::default())?;
//!     let catalog = indexer.index(Path::new("/data/uiuc-propdb"))?;
//!     for record in &catalog.propellers {
//!         println!("{} ({} runs)", record.id, record.performance_files.len());
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod identifier;
pub mod indexer;
pub mod load;
pub mod parser;
pub mod scanner;
pub mod settings;

pub use catalog::{CatalogBuilder, assemble};
pub use error::{IndexError, Result};
pub use identifier::canonical_id;
pub use indexer::{ParsedVolume, PropellerIndexer};
pub use load::{LoadedPropeller, PropellerLoader, Table, load_table};
#[cfg(feature = "images")]
pub use load::load_image;
pub use parser::FilenameParser;
pub use scanner::{FileSystem, InMemoryFs, RealFs, VolumeScanner};
pub use settings::{DuplicatePolicy, ParserSettings, QuirkRule, ScanSettings, UnitQuirk};

pub use propdex_model as model;
