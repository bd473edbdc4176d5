//! Video repository: reads and writes the `videos` table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

/// Access to video records.
///
/// `update_video` replaces every mutable column of an existing record; it fails with
/// `NotFound` when no row has the record's id.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;

    /// Readiness probe for the backing store.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.record_id = %video.id))]
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let row: Video = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let row: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET title = $2,
                description = $3,
                thumbnail_url = $4,
                video_url = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
