//! In-memory fakes for the pipeline's external seams.

mod media_tools;
mod memory_storage;

pub use media_tools::{FakeProber, FakeRemuxer, RemuxBehavior};
pub use memory_storage::MemoryStorage;
