//! # industry-strength - NSE industry trend analysis
//!
//! Ranks the constituents of an index by how far their latest close sits
//! above its simple and exponential moving averages, then summarises the
//! ranking per industry:
//! - Cookie-bootstrapped session against the provider
//! - Historical daily series download (CSV)
//! - Latest SMA / EMA over a configurable period
//! - Ranking report (CSV) and industry report (text)
//!
//! ## Quick Start
//!
//! ```no_run
//! use industry_strength::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = AnalysisBuilder::new()
//!         .with_output_dir("reports/RelativeStrength")
//!         .build()?;
//!     let run = analyzer
//!         .run_industry_strength(IndexList::Nifty50, 14, |_| {})
//!         .await?;
//!     println!("Ranking written to {}", run.ranking_path.display());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Public API for easy library usage
pub mod api;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use industry_strength::prelude::*;
    //! ```

    pub use crate::api::{AnalysisBuilder, AnalysisConfig, StrengthAnalyzer, StrengthRun};
    pub use crate::error::{Result, StrengthError};
    pub use crate::models::{IndexList, IndicatorResult, RankingRow, SymbolEntry};
    pub use crate::services::{NseSession, RankProgress, ReportStatus, SeriesSource};
}

pub use utils::{init_logger, Logger, Timer};
