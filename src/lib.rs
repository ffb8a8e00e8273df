//! # Pitch Lens
//!
//! Football match event aggregation: positional heatmaps, head-to-head
//! match statistics and shot maps computed from StatsBomb-style event logs.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (events, pitch geometry, grids, stats, teams)
//! - **calculate**: Heatmap aggregation, stats reduction and shot extraction
//! - **storage**: Event log and fixture loading from the data directory
//! - **config**: Configuration loading and validation
//! - **api**: REST API endpoints

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
