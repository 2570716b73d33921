//! Post endpoints.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::{NewPost, Page, Post, PostId};
use inkwell_shared::{PageQuery, PostCreate, PostDb, ResourceId};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_dto(post: Post) -> PostDb {
    let id = match post.id {
        PostId::Seq(id) => ResourceId::Int(id),
        PostId::Object(id) => ResourceId::Text(id),
    };

    PostDb {
        id,
        title: post.title,
        content: post.content,
        publication_date: post.publication_date,
    }
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostCreate>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = NewPost::new(req.title, req.content, req.publication_date);

    let created = state.posts.create(post).await?;
    tracing::info!(post_id = %created.id, "Post created");

    Ok(HttpResponse::Created().json(to_dto(created)))
}

/// GET /posts?skip=&limit=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::clamp(query.skip, query.limit);

    let posts = if page.is_empty() {
        Vec::new()
    } else {
        state.posts.list(page).await?
    };

    let body: Vec<PostDb> = posts.into_iter().map(to_dto).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = state.posts.parse_id(&path.into_inner())?;
    let post = state.posts.get_by_id(&id).await?;

    Ok(HttpResponse::Ok().json(to_dto(post)))
}
