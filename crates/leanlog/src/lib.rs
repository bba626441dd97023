//! Daily adherence tracking for a personal weight-loss log.
//!
//! The [`tracker`] module holds the scoring rubric, history aggregation, dose
//! scheduling, persistence ports, and export formats. [`config`], [`telemetry`]
//! and [`error`] carry the application plumbing shared with the CLI.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracker;
