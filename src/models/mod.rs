pub mod diagnosis;
pub mod guidance;

pub use diagnosis::*;
pub use guidance::*;
