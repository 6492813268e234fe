pub mod bracket;
pub mod series;

pub use bracket::*;
pub use series::*;
