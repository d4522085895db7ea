//! Background runner for long-running result analysis.
//!
//! The crate coordinates a single analysis run at a time: a caller configures
//! the dataset and output target, starts the run, and either blocks in
//! [`AnalysisRunner::wait_until_idle`] or lets the registered
//! [`CompletionHandler`] deliver the outcome. The analysis itself is a
//! collaborator behind the [`Analysis`] trait; [`TrendAnalysis`] is the
//! built-in implementation.

pub mod analysis;
pub mod config;
pub mod handler;
pub mod logger;
pub mod record;
pub mod runner;

pub use analysis::{Analysis, AnalysisMode, Outcome, Summary, TrendAnalysis};
pub use config::Config;
pub use handler::CompletionHandler;
pub use record::{DateRange, DbRecord};
pub use runner::AnalysisRunner;
