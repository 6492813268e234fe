pub mod club;
pub mod player;
pub mod registry;

pub use club::*;
pub use player::*;
pub use registry::*;
