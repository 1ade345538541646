use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::AuthUser;
use crate::application::error::ServiceError;
use crate::application::use_cases::blogs::get_blog::GetBlog;
use crate::application::use_cases::blogs::list_all_blogs::ListAllBlogs;
use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::make_comment::MakeComment;
use crate::application::use_cases::comments::update_comment::UpdateComment;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogs::blog::{Blog, BlogDetail, BlogSummary};
use crate::domain::blogs::comment::{Comment, CommentView};
use crate::domain::users::user::AuthorName;
use crate::presentation::http::auth::require_auth;
use crate::presentation::http::error::{ApiError, MessageResponse};
use crate::presentation::http::extract::ValidJson;
use crate::presentation::http::{parse_object_id, with_deadline};

pub const INVALID_BLOG_ID: &str = "Invalid blog ID";
pub const INVALID_COMMENT_ID: &str = "Invalid comment ID";

const LIST_FAILED: &str = "Error Retrieving data, please try again later.";
const GET_FAILED: &str = "Error Retrieving blog, please try again later.";
const COMMENT_FAILED: &str = "Adding comment failed, please try again later.";
const COMMENT_BLOG_MISSING: &str = "Could not find blog, please try again later.";
const COMMENT_UPDATE_FAILED: &str = "Updating comment failed, please try again later.";
const COMMENT_DELETE_FAILED: &str = "Deleting comment failed, please try again later.";

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub first_name: String,
    pub last_name: String,
}

impl From<AuthorName> for AuthorResponse {
    fn from(n: AuthorName) -> Self {
        AuthorResponse {
            first_name: n.first_name,
            last_name: n.last_name,
        }
    }
}

/// A stored blog with its reference ids as hex strings.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub article: String,
    pub author: String,
    pub comments: Vec<String>,
}

impl From<Blog> for BlogResponse {
    fn from(b: Blog) -> Self {
        BlogResponse {
            id: b.id.to_hex(),
            title: b.title,
            description: b.description,
            article: b.article,
            author: b.author.to_hex(),
            comments: b.comments.iter().map(|c| c.to_hex()).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogSummaryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub article: String,
    pub author: AuthorResponse,
}

impl From<BlogSummary> for BlogSummaryResponse {
    fn from(s: BlogSummary) -> Self {
        BlogSummaryResponse {
            id: s.id.to_hex(),
            title: s.title,
            description: s.description,
            article: s.article,
            author: s.author.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentViewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: AuthorResponse,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl From<CommentView> for CommentViewResponse {
    fn from(c: CommentView) -> Self {
        CommentViewResponse {
            id: c.id.to_hex(),
            user: c.user.into(),
            content: c.content,
            date: c.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogDetailResponse {
    #[serde(flatten)]
    pub summary: BlogSummaryResponse,
    pub comments: Vec<CommentViewResponse>,
}

impl From<BlogDetail> for BlogDetailResponse {
    fn from(d: BlogDetail) -> Self {
        BlogDetailResponse {
            summary: d.summary.into(),
            comments: d.comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub blog: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        CommentResponse {
            id: c.id.to_hex(),
            user: c.user.to_hex(),
            blog: c.blog.to_hex(),
            content: c.content,
            date: c.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogSummaryResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogDetailEnvelope {
    pub blog: BlogDetailResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentCreatedResponse {
    pub message: String,
    pub comment: CommentResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    let protected = Router::new()
        .route(
            "/comment/:id",
            post(make_comment).patch(update_comment).delete(delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(ctx.clone(), require_auth));

    Router::new()
        .route("/all", get(list_all_blogs))
        .route("/blog/:blog_id", get(get_blog))
        .merge(protected)
        .with_state(ctx)
}

#[utoipa::path(get, path = "/blogs/all", tag = "Blogs", security(()), responses(
    (status = 200, body = BlogListResponse),
    (status = 500, body = MessageResponse)
))]
pub async fn list_all_blogs(
    State(ctx): State<AppContext>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let blogs = ctx.blog_repo();
    let users = ctx.user_repo();
    let uc = ListAllBlogs {
        blogs: blogs.as_ref(),
        users: users.as_ref(),
    };
    let summaries = with_deadline(ctx.cfg.request_timeout, uc.execute())
        .await
        .map_err(|e| ApiError::from_service(e, LIST_FAILED))?;
    Ok(Json(BlogListResponse {
        blogs: summaries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/blogs/blog/{blogId}", tag = "Blogs", security(()),
    params(("blogId" = String, Path, description = "Blog id (24 hex characters)")),
    responses(
        (status = 200, body = BlogDetailEnvelope),
        (status = 400, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn get_blog(
    State(ctx): State<AppContext>,
    Path(blog_id): Path<String>,
) -> Result<Json<BlogDetailEnvelope>, ApiError> {
    let blog_id = parse_object_id(&blog_id, INVALID_BLOG_ID)?;
    let blogs = ctx.blog_repo();
    let comments = ctx.comment_repo();
    let users = ctx.user_repo();
    let uc = GetBlog {
        blogs: blogs.as_ref(),
        comments: comments.as_ref(),
        users: users.as_ref(),
    };
    let detail = with_deadline(ctx.cfg.request_timeout, uc.execute(blog_id))
        .await
        .map_err(|e| ApiError::from_service(e, GET_FAILED))?;
    Ok(Json(BlogDetailEnvelope {
        blog: detail.into(),
    }))
}

#[utoipa::path(post, path = "/blogs/comment/{blogId}", tag = "Comments",
    params(("blogId" = String, Path, description = "Blog to comment on")),
    request_body = CommentRequest,
    responses(
        (status = 201, body = CommentCreatedResponse),
        (status = 400, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 422, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn make_comment(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    Path(blog_id): Path<String>,
    ValidJson(req): ValidJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), ApiError> {
    let blog_id = parse_object_id(&blog_id, INVALID_BLOG_ID)?;
    let blogs = ctx.blog_repo();
    let comments = ctx.comment_repo();
    let uc = MakeComment {
        blogs: blogs.as_ref(),
        comments: comments.as_ref(),
    };
    let comment = with_deadline(
        ctx.cfg.request_timeout,
        uc.execute(&actor, blog_id, req.comment),
    )
    .await
    .map_err(|e| match e {
        ServiceError::NotFound => ApiError::from_service(e, COMMENT_BLOG_MISSING),
        e => ApiError::from_service(e, COMMENT_FAILED),
    })?;
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            message: "Comment Created!".into(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(patch, path = "/blogs/comment/{commentId}", tag = "Comments",
    params(("commentId" = String, Path, description = "Comment to edit")),
    request_body = CommentRequest,
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, body = MessageResponse),
        (status = 401, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 422, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn update_comment(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    Path(comment_id): Path<String>,
    ValidJson(req): ValidJson<CommentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let comment_id = parse_object_id(&comment_id, INVALID_COMMENT_ID)?;
    let repo = ctx.comment_repo();
    let uc = UpdateComment {
        repo: repo.as_ref(),
    };
    with_deadline(
        ctx.cfg.request_timeout,
        uc.execute(&actor, comment_id, &req.comment),
    )
    .await
    .map_err(|e| ApiError::from_service(e, COMMENT_UPDATE_FAILED))?;
    Ok(Json(MessageResponse::new("Comment updated!")))
}

#[utoipa::path(delete, path = "/blogs/comment/{commentId}", tag = "Comments",
    params(("commentId" = String, Path, description = "Comment to delete")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, body = MessageResponse),
        (status = 401, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    Path(comment_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let comment_id = parse_object_id(&comment_id, INVALID_COMMENT_ID)?;
    let repo = ctx.comment_repo();
    let uc = DeleteComment {
        repo: repo.as_ref(),
    };
    with_deadline(ctx.cfg.request_timeout, uc.execute(&actor, comment_id))
        .await
        .map_err(|e| ApiError::from_service(e, COMMENT_DELETE_FAILED))?;
    Ok(Json(MessageResponse::new("Comment deleted!")))
}
