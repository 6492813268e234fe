pub mod engine;
pub mod result;
pub mod surface;

pub use engine::*;
pub use result::*;
pub use surface::*;
