use std::sync::Arc;

use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::health_port::HealthPort;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::TokenService;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    health: Arc<dyn HealthPort>,
    tokens: TokenService,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        health: Arc<dyn HealthPort>,
        tokens: TokenService,
    ) -> Self {
        Self {
            user_repo,
            blog_repo,
            comment_repo,
            health,
            tokens,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn blog_repo(&self) -> Arc<dyn BlogRepository> {
        self.services.blog_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn health(&self) -> Arc<dyn HealthPort> {
        self.services.health.clone()
    }

    pub fn tokens(&self) -> &TokenService {
        &self.services.tokens
    }
}
