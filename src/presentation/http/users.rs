use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access::AuthUser;
use crate::application::error::ServiceError;
use crate::application::use_cases::auth::login::{Login, LoginRequest as LoginDto};
use crate::application::use_cases::auth::signup::{Signup, SignupRequest as SignupDto};
use crate::application::use_cases::blogs::create_blog::CreateBlog;
use crate::application::use_cases::blogs::delete_blog::DeleteBlog;
use crate::application::use_cases::blogs::list_user_blogs::ListUserBlogs;
use crate::application::use_cases::blogs::update_blog::UpdateBlog;
use crate::bootstrap::app_context::AppContext;
use crate::domain::blogs::blog::BlogContent;
use crate::domain::users::user::User;
use crate::presentation::http::auth::require_auth;
use crate::presentation::http::blogs::{AuthorResponse, BlogResponse, INVALID_BLOG_ID};
use crate::presentation::http::error::{ApiError, MessageResponse};
use crate::presentation::http::extract::ValidJson;
use crate::presentation::http::{parse_object_id, with_deadline};

const SIGNUP_FAILED: &str = "Signing up failed, please try again later.";
const LOGIN_FAILED: &str = "Logging in failed, please try again later.";
const LIST_FAILED: &str = "Fetching blogs failed, please try again later.";
const CREATE_FAILED: &str = "Creating new blog failed, please try again later.";
const UPDATE_FAILED: &str = "Updating blog failed, please try again later.";
const DELETE_FAILED: &str = "Deleting blog failed, please try again later.";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup and login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BlogRequest {
    pub title: String,
    pub description: String,
    pub article: String,
}

impl From<BlogRequest> for BlogContent {
    fn from(r: BlogRequest) -> Self {
        BlogContent {
            title: r.title,
            description: r.description,
            article: r.article,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserBlogsResponse {
    pub blogs: Vec<BlogResponse>,
    pub author: AuthorResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreatedResponse {
    pub created_blog: BlogResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogUpdatedResponse {
    pub message: String,
    pub blog: BlogResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    let protected = Router::new()
        .route("/list", get(list_user_blogs))
        .route("/new-blog", post(create_blog))
        .route("/:blog_id", patch(update_blog).delete(delete_blog))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), require_auth));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(protected)
        .with_state(ctx)
}

fn session(ctx: &AppContext, user: &User, failure: &str) -> Result<SessionResponse, ApiError> {
    let identity = AuthUser::from(user);
    let token = ctx
        .tokens()
        .issue(&identity)
        .map_err(|e| ApiError::from_service(ServiceError::Internal(e), failure))?;
    Ok(SessionResponse {
        user: identity.user_id.to_hex(),
        email: identity.email,
        first_name: identity.first_name,
        last_name: identity.last_name,
        token,
    })
}

#[utoipa::path(post, path = "/user/signup", tag = "Users", request_body = SignupRequest, security(()), responses(
    (status = 201, body = SessionResponse),
    (status = 422, body = MessageResponse),
    (status = 500, body = MessageResponse)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = Signup {
        repo: repo.as_ref(),
    };
    let dto = SignupDto {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
    };
    let user = with_deadline(ctx.cfg.request_timeout, uc.execute(&dto))
        .await
        .map_err(|e| ApiError::from_service(e, SIGNUP_FAILED))?;
    let body = session(&ctx, &user, SIGNUP_FAILED)?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(post, path = "/user/login", tag = "Users", request_body = LoginRequest, security(()), responses(
    (status = 200, body = SessionResponse),
    (status = 403, body = MessageResponse),
    (status = 422, body = MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = Login {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = with_deadline(ctx.cfg.request_timeout, uc.execute(&dto))
        .await
        .map_err(|e| ApiError::from_service(e, LOGIN_FAILED))?;
    Ok(Json(session(&ctx, &user, LOGIN_FAILED)?))
}

#[utoipa::path(get, path = "/user/list", tag = "Users", responses(
    (status = 200, body = UserBlogsResponse),
    (status = 403, body = MessageResponse),
    (status = 500, body = MessageResponse)
))]
pub async fn list_user_blogs(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
) -> Result<Json<UserBlogsResponse>, ApiError> {
    let repo = ctx.blog_repo();
    let uc = ListUserBlogs {
        repo: repo.as_ref(),
    };
    let (blogs, author) = with_deadline(ctx.cfg.request_timeout, uc.execute(&actor))
        .await
        .map_err(|e| ApiError::from_service(e, LIST_FAILED))?;
    Ok(Json(UserBlogsResponse {
        blogs: blogs.into_iter().map(Into::into).collect(),
        author: author.into(),
    }))
}

#[utoipa::path(post, path = "/user/new-blog", tag = "Users", request_body = BlogRequest, responses(
    (status = 201, body = BlogCreatedResponse),
    (status = 403, body = MessageResponse),
    (status = 422, body = MessageResponse),
    (status = 500, body = MessageResponse)
))]
pub async fn create_blog(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    ValidJson(req): ValidJson<BlogRequest>,
) -> Result<(StatusCode, Json<BlogCreatedResponse>), ApiError> {
    let repo = ctx.blog_repo();
    let uc = CreateBlog {
        repo: repo.as_ref(),
    };
    let blog = with_deadline(ctx.cfg.request_timeout, uc.execute(&actor, req.into()))
        .await
        .map_err(|e| ApiError::from_service(e, CREATE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        Json(BlogCreatedResponse {
            created_blog: blog.into(),
        }),
    ))
}

#[utoipa::path(patch, path = "/user/{blogId}", tag = "Users",
    params(("blogId" = String, Path, description = "Blog to edit")),
    request_body = BlogRequest,
    responses(
        (status = 200, body = BlogUpdatedResponse),
        (status = 400, body = MessageResponse),
        (status = 401, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 422, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn update_blog(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    Path(blog_id): Path<String>,
    ValidJson(req): ValidJson<BlogRequest>,
) -> Result<Json<BlogUpdatedResponse>, ApiError> {
    let blog_id = parse_object_id(&blog_id, INVALID_BLOG_ID)?;
    let repo = ctx.blog_repo();
    let uc = UpdateBlog {
        repo: repo.as_ref(),
    };
    let blog = with_deadline(
        ctx.cfg.request_timeout,
        uc.execute(&actor, blog_id, req.into()),
    )
    .await
    .map_err(|e| ApiError::from_service(e, UPDATE_FAILED))?;
    Ok(Json(BlogUpdatedResponse {
        message: "Blog updated!".into(),
        blog: blog.into(),
    }))
}

#[utoipa::path(delete, path = "/user/{blogId}", tag = "Users",
    params(("blogId" = String, Path, description = "Blog to delete")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, body = MessageResponse),
        (status = 401, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 500, body = MessageResponse)
    ))]
pub async fn delete_blog(
    State(ctx): State<AppContext>,
    Extension(actor): Extension<AuthUser>,
    Path(blog_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let blog_id = parse_object_id(&blog_id, INVALID_BLOG_ID)?;
    let repo = ctx.blog_repo();
    let uc = DeleteBlog {
        repo: repo.as_ref(),
    };
    with_deadline(ctx.cfg.request_timeout, uc.execute(&actor, blog_id))
        .await
        .map_err(|e| ApiError::from_service(e, DELETE_FAILED))?;
    Ok(Json(MessageResponse::new("Blog deleted!")))
}
