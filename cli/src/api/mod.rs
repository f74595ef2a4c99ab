//! High-level API for easy library usage
//!
//! This module provides simplified interfaces for running the industry
//! strength pipeline.

pub mod analyzer;
pub mod builder;

pub use analyzer::{StrengthAnalyzer, StrengthRun};
pub use builder::{AnalysisBuilder, AnalysisConfig};
