//! # solvetrack-core
//!
//! Core library for solvetrack, a practice tracker for solved coding tasks.
//!
//! This library provides:
//! - Domain types for tasks and daily statistics
//! - Record ingestion with field-alias resolution
//! - Derived analytics (streaks, calendar, distributions, rankings, goals)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Layer 0 (Raw):** Record files as exported by the task store
//! - **Layer 1 (Canonical):** [`TaskRecord`]s produced by [`ingest`]
//! - **Layer 2 (Derived):** [`analytics::AnalyticsSnapshot`], recomputed from scratch on every call
//!
//! ## Example
//!
//! ```rust,no_run
//! use solvetrack_core::analytics::{build_snapshot, SnapshotRequest};
//! use solvetrack_core::{ingest, Config};
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let normalized = ingest::load_and_normalize(Path::new("tasks.json")).expect("failed to load");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
//! let request = SnapshotRequest::for_reference(today)
//!     .with_target(config.goal.target_xp)
//!     .with_settings(&config.analytics);
//! let snapshot = build_snapshot(&normalized, &request);
//! println!("current streak: {}", snapshot.current_streak());
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{build_snapshot, AnalyticsSnapshot, ChartKind, ChartSeries, SnapshotRequest};
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{NormalizeResult, SkipReason, SkippedRecord};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
