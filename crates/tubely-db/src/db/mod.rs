mod memory;
mod video;

pub use memory::MemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository};
