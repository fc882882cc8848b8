use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("postgrest error: {0}")]
    Postgrest(#[from] postgrest::PostgrestError),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
}
