pub mod generator;
pub mod schedule;

pub use generator::*;
pub use schedule::*;
