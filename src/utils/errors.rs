//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y la
//! traducción desde los errores crudos de SQLx a la taxonomía propia.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for ShopError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut => {
                ShopError::Unavailable("database pool acquire timed out".to_string())
            }
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ShopError::Unavailable(format!("database connection lost: {}", e))
            }
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    ShopError::Conflict(format!("duplicate key: {}", db.message()))
                } else if db.is_foreign_key_violation() {
                    ShopError::NotFound(format!("referenced record missing: {}", db.message()))
                } else if db.code().map_or(false, |code| is_query_canceled(&code)) {
                    ShopError::Unavailable(format!("statement timed out: {}", db.message()))
                } else {
                    ShopError::Database(db.message().to_string())
                }
            }
            _ => ShopError::Database(e.to_string()),
        }
    }
}

/// SQLSTATE de query_canceled; es lo que dispara `statement_timeout`
fn is_query_canceled(code: &str) -> bool {
    code == "57014"
}

/// Resultado tipado para operaciones que pueden fallar
pub type ShopResult<T> = Result<T, ShopError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> ShopError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    ShopError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> ShopError {
    ShopError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> ShopError {
    ShopError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
