//! Data models

pub mod prediction;
pub mod reading;
pub mod response;

pub use prediction::*;
pub use reading::*;
pub use response::*;
