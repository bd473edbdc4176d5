//! In-memory video repository used when no database is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

use super::video::VideoRepository;

#[derive(Clone, Default)]
pub struct MemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::InvalidInput(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&video.id) {
            Some(existing) => {
                existing.title = video.title.clone();
                existing.description = video.description.clone();
                existing.thumbnail_url = video.thumbnail_url.clone();
                existing.video_url = video.video_url.clone();
                existing.updated_at = video.updated_at;
                Ok(existing.clone())
            }
            None => Err(AppError::NotFound(format!("Video {} not found", video.id))),
        }
    }
}
