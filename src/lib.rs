//! # resale-research
//!
//! Research service for reselling Japanese goods on a Taiwanese
//! marketplace. It ingests marketplace listings, estimates per-unit profit
//! under a tunable parameter set, and serves filtered rankings, category
//! analytics and "treasure" picks over a REST API.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ResearchService (service/)
//!     │       ├── Ingestor + SourceChain (ingest/)
//!     │       └── CsvStore history file (persistence/)
//!     │
//!     └── Session (domain/)
//!             ├── ListingStore
//!             ├── profit model
//!             └── filter / rank / aggregate / treasure
//! ```
//!
//! The domain layer is synchronous and free of I/O. Every derived figure is
//! recomputed from the observed price whenever the parameter set changes.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod persistence;
pub mod service;
