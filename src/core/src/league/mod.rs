pub mod league;
pub mod result;
pub mod schedule;
pub mod storage;
pub mod table;

pub use league::*;
pub use result::*;
pub use schedule::*;
pub use storage::*;
pub use table::*;
