use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use vitrine_db::Record;

/// Blog post.
///
/// `slug` is derived from the title on every write and is never
/// client-writable. `views_count` only moves on detail fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub preview: String,
    pub body: String,
    pub is_published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub views_count: u64,
}

impl Record for Blog {
    const ENTITY: &'static str = "blog post";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Request model for creating a blog post
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Request model for updating a blog post.
///
/// The publication flag and creation date are not editable here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub body: String,
}
