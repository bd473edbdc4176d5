//! Data models for the application

mod object_reference;
mod video;

pub use object_reference::*;
pub use video::*;
