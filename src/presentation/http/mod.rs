use std::future::Future;
use std::time::Duration;

use axum::extract::MatchedPath;
use axum::{Router, http::HeaderValue};
use mongodb::bson::oid::ObjectId;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::error::ServiceError;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;

pub mod auth;
pub mod blogs;
pub mod error;
pub mod extract;
pub mod health;
pub mod users;


#[derive(OpenApi)]
#[openapi(
    paths(
        users::signup,
        users::login,
        users::list_user_blogs,
        users::create_blog,
        users::update_blog,
        users::delete_blog,
        blogs::list_all_blogs,
        blogs::get_blog,
        blogs::make_comment,
        blogs::update_comment,
        blogs::delete_comment,
        health::health,
    ),
    components(schemas(
        users::SignupRequest,
        users::LoginRequest,
        users::SessionResponse,
        users::BlogRequest,
        users::UserBlogsResponse,
        users::BlogCreatedResponse,
        users::BlogUpdatedResponse,
        blogs::AuthorResponse,
        blogs::BlogResponse,
        blogs::BlogSummaryResponse,
        blogs::BlogDetailResponse,
        blogs::BlogDetailEnvelope,
        blogs::BlogListResponse,
        blogs::CommentViewResponse,
        blogs::CommentResponse,
        blogs::CommentRequest,
        blogs::CommentCreatedResponse,
        error::MessageResponse,
        health::HealthResp,
    )),
    tags(
        (name = "Users", description = "Accounts and the caller's own blogs"),
        (name = "Blogs", description = "Public blog reads"),
        (name = "Comments", description = "Comments on blogs"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

/// Full application router: `/user`, `/blogs`, `/health`, the API docs and
/// the JSON 404 fallback.
pub fn router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.cfg);
    Router::new()
        .nest("/user", users::routes(ctx.clone()))
        .nest("/blogs", blogs::routes(ctx.clone()))
        .merge(health::routes(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found()
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let origin = if !cfg.cors_origins.is_empty() {
        let allowed: Vec<HeaderValue> = cfg
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "cors_origin_ignored");
                    None
                }
            })
            .collect();
        AllowOrigin::list(allowed)
    } else if cfg.is_production {
        // Production without CORS_ORIGINS: no cross-origin access.
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        AllowOrigin::mirror_request()
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
}

/// Bounds a use case by the per-request deadline. An elapsed deadline is an
/// internal failure; nothing is retried.
pub(crate) async fn with_deadline<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(limit_secs = limit.as_secs_f64(), "request_deadline_elapsed");
            Err(ServiceError::Internal(anyhow::anyhow!(
                "request deadline of {limit:?} elapsed"
            )))
        }
    }
}

pub(crate) fn parse_object_id(raw: &str, message: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_request(message))
}
