use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use vitrine_db::Table;
use vitrine_http::error::AppError;

use crate::utils::slugify;

use super::models::{Blog, CreateBlogRequest, UpdateBlogRequest};

/// Build the blog router backed by the given table
pub fn router(posts: Arc<Table<Blog>>) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/health", get(health_check))
        .with_state(posts)
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid blog post id")))
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation(
            vec![json!({"field": "title", "error": "required"})],
            "blog post submission failed validation",
        ));
    }
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "blog module is healthy"
}

/// List published blog posts; drafts never appear here
async fn list_posts(State(posts): State<Arc<Table<Blog>>>) -> Json<Vec<Blog>> {
    Json(posts.list_where(|post| post.is_published))
}

/// Create a blog post, deriving the slug from the title before the single write
async fn create_post(
    State(posts): State<Arc<Table<Blog>>>,
    Json(body): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    validate_title(&body.title)?;

    let post = posts.insert(Blog {
        id: Uuid::now_v7(),
        slug: slugify(&body.title),
        title: body.title,
        preview: body.preview,
        body: body.body,
        is_published: body.is_published,
        created_at: body.created_at,
        views_count: 0,
    });

    tracing::info!(post = %post.id, slug = %post.slug, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Fetch a blog post, bumping its view counter as a side effect.
///
/// The increment happens inside the storage layer's write lock, so concurrent
/// fetches never lose a count. Drafts are reachable here; only the list view
/// filters on publication.
async fn get_post(
    State(posts): State<Arc<Table<Blog>>>,
    Path(raw): Path<String>,
) -> Result<Json<Blog>, AppError> {
    let id = parse_id(&raw)?;
    let post = posts.update_with(id, |post| post.views_count += 1)?;
    Ok(Json(post))
}

/// Update a blog post's content, recomputing its slug from the new title
async fn update_post(
    State(posts): State<Arc<Table<Blog>>>,
    Path(raw): Path<String>,
    Json(body): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, AppError> {
    let id = parse_id(&raw)?;
    validate_title(&body.title)?;

    let post = posts.update_with(id, |post| {
        post.slug = slugify(&body.title);
        post.title = body.title;
        post.preview = body.preview;
        post.body = body.body;
    })?;

    tracing::info!(post = %id, slug = %post.slug, "blog post updated");
    Ok(Json(post))
}

/// Delete a blog post
async fn delete_post(
    State(posts): State<Arc<Table<Blog>>>,
    Path(raw): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw)?;
    posts.remove(id)?;

    tracing::info!(post = %id, "blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}
