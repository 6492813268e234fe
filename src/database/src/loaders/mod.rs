pub mod club;
pub mod config;
pub mod names;

pub use club::*;
pub use config::*;
pub use names::*;
