//! Finance Tracker - local-first personal finance tracking
//!
//! This library provides the core functionality for the `fintrack` command
//! line application. It records income and expense transactions, groups them
//! into categories, tracks spending against per-category budgets and derives
//! summaries and chart series from the stored data.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, money)
//! - `storage`: Key-value persistence of the three collections
//! - `services`: Validation, filtering, aggregation and mutations
//! - `audit`: Audit logging system
//! - `reports`: Chart series derived from transactions
//! - `export`: Whole-dataset JSON export and import
//! - `display`: Plain-text formatting for the terminal
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{Settings, TrackerPaths};
//! use finance_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
