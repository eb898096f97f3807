//! Shared application state for the HTTP layer.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use crate::adapters::sqlite::{
    SqliteCatalogRepository, SqliteMaintenanceStore, SqliteProgressRepository,
    SqliteSupportRepository, SqliteUserRepository,
};
use crate::application::handlers::admin::{
    DeleteUserHandler, ManageCatalogHandler, UpdateUserAccountHandler,
};
use crate::application::handlers::auth::{LoginUserHandler, RegisterUserHandler};
use crate::application::handlers::maintenance::MaintenanceHandler;
use crate::application::handlers::progress::{
    CompleteSectionHandler, MarkSectionLearnedHandler, SubmitAnswerHandler,
};
use crate::config::AppConfig;
use crate::domain::progress::XpPolicy;
use crate::ports::{
    CatalogRepository, ProgressRepository, SupportRepository, TokenService, UserRepository,
};

/// Everything the HTTP handlers need, cloned into each route.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub support: Arc<dyn SupportRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub register: Arc<RegisterUserHandler>,
    pub login: Arc<LoginUserHandler>,
    pub submit_answer: Arc<SubmitAnswerHandler>,
    pub complete_section: Arc<CompleteSectionHandler>,
    pub mark_learned: Arc<MarkSectionLearnedHandler>,
    pub update_account: Arc<UpdateUserAccountHandler>,
    pub delete_user: Arc<DeleteUserHandler>,
    pub manage_catalog: Arc<ManageCatalogHandler>,
    pub maintenance: Arc<MaintenanceHandler>,
}

impl AppState {
    /// Wires the sqlite repositories, auth adapters, and command handlers
    /// over one connection pool.
    pub fn from_pool(config: Arc<AppConfig>, pool: SqlitePool) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let catalog: Arc<dyn CatalogRepository> =
            Arc::new(SqliteCatalogRepository::new(pool.clone()));
        let progress: Arc<dyn ProgressRepository> =
            Arc::new(SqliteProgressRepository::new(pool.clone()));
        let support: Arc<dyn SupportRepository> =
            Arc::new(SqliteSupportRepository::new(pool.clone()));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&config.auth));
        let hasher = Arc::new(Argon2PasswordHasher::new());
        let xp_policy = XpPolicy::new(config.content.xp_per_correct_answer);

        Self {
            register: Arc::new(RegisterUserHandler::new(
                users.clone(),
                hasher.clone(),
                tokens.clone(),
            )),
            login: Arc::new(LoginUserHandler::new(
                users.clone(),
                hasher,
                tokens.clone(),
            )),
            submit_answer: Arc::new(SubmitAnswerHandler::new(
                catalog.clone(),
                progress.clone(),
                users.clone(),
                xp_policy,
            )),
            complete_section: Arc::new(CompleteSectionHandler::new(
                catalog.clone(),
                progress.clone(),
            )),
            mark_learned: Arc::new(MarkSectionLearnedHandler::new(
                catalog.clone(),
                progress.clone(),
            )),
            update_account: Arc::new(UpdateUserAccountHandler::new(users.clone())),
            delete_user: Arc::new(DeleteUserHandler::new(users.clone())),
            manage_catalog: Arc::new(ManageCatalogHandler::new(catalog.clone())),
            maintenance: Arc::new(MaintenanceHandler::new(Arc::new(
                SqliteMaintenanceStore::new(pool),
            ))),
            config,
            users,
            catalog,
            progress,
            support,
            tokens,
        }
    }
}
