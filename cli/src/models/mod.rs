pub mod indicator;
pub mod industry;
pub mod ranking;
pub mod series;

pub use indicator::*;
pub use industry::*;
pub use ranking::*;
pub use series::*;
