pub mod aggregator;
pub mod calculator;
pub mod fetcher;
pub mod ranker;
pub mod session;

pub use aggregator::*;
pub use calculator::*;
pub use fetcher::*;
pub use ranker::*;
pub use session::*;
