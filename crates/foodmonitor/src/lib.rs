//! `foodmonitor` - A kitchen dashboard for food, temperatures, hygiene and diet
//!
//! This library holds the record types, the derived dashboard figures, entry
//! forms, and the `SQLite` store that keeps each collection between runs.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod storage;
pub mod view;

pub use config::Config;
pub use dashboard::{Collections, Dashboard, Notice};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use metrics::{DashboardMetrics, Thresholds};
pub use storage::{Storage, StorageStats};
