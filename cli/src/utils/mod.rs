pub mod date;
pub mod indicators;
pub mod logger;

pub use date::*;
pub use indicators::*;
pub use logger::*;
