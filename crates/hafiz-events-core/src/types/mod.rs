//! Core types for Hafiz Events

mod batch;
mod category;
mod descriptor;
mod record;

pub use batch::*;
pub use category::*;
pub use descriptor::*;
pub use record::*;
