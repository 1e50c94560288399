//! Blog routes. Each handler runs exactly one store operation and returns
//! its result unwrapped.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use blog_core::DomainError;
use blog_core::domain::{BlogId, NewBlog};
use blog_core::query::{BlogQuery, Feed};
use blog_shared::{InsertAcknowledgment, UpdateAcknowledgment};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const ENTITY: &str = "Blog";

async fn list(state: &AppState, query: BlogQuery) -> AppResult<HttpResponse> {
    let blogs = state.blogs.find(query).await?;
    Ok(HttpResponse::Ok().json(blogs))
}

/// GET /recentBlogs, /recentBlogsApps, /recentHeroBlog, /recentTechnologyBlog, /recentGadgetBlogs
pub async fn feed(state: web::Data<AppState>, feed: Feed) -> AppResult<HttpResponse> {
    list(&state, feed.query()).await
}

/// GET /blog/{id}
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = BlogId::parse(&path)?;

    let blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: ENTITY,
            id: id.to_string(),
        })?;

    Ok(HttpResponse::Ok().json(blog))
}

/// GET /similarBlogs/{category}
pub async fn similar_blogs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    list(&state, BlogQuery::similar(path.into_inner())).await
}

/// PUT /addComment/{id}
///
/// The body is the comment, any JSON value. Whether a missing post is
/// created depends on `AppState::comment_upsert`.
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let id = BlogId::parse(&path)?;

    let outcome = state
        .blogs
        .push_comment(id, body.into_inner(), state.comment_upsert)
        .await?;

    if outcome.is_miss() {
        return Err(DomainError::NotFound {
            entity_type: ENTITY,
            id: id.to_string(),
        }
        .into());
    }

    Ok(HttpResponse::Ok().json(UpdateAcknowledgment::new(
        outcome.matched,
        outcome.modified,
        outcome.upserted_id.map(|id| id.to_string()),
    )))
}

/// POST /addBlog
pub async fn add_blog(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let new_blog = NewBlog::from_value(body.into_inner())?;

    let outcome = state.blogs.insert(new_blog).await?;

    Ok(HttpResponse::Ok().json(InsertAcknowledgment::new(
        outcome.inserted_id.to_string(),
    )))
}

/// GET /userBlogs/{email}
pub async fn user_blogs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    list(&state, BlogQuery::by_author_email(path.into_inner())).await
}

/// GET /categoryBlogs/{category}
pub async fn category_blogs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    list(&state, BlogQuery::by_category(path.into_inner())).await
}
