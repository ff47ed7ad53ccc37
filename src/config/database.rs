//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.
//! Toda espera contra el store está acotada: `acquire_timeout` para
//! obtener una conexión del pool y `statement_timeout` de Postgres para
//! cada statement ya en vuelo.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Derivar la configuración del pool desde el entorno
    pub fn from_environment(env: &EnvironmentConfig) -> Self {
        Self {
            url: env.database_url.clone(),
            max_connections: env.db_max_connections,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(env.db_acquire_timeout_secs),
            statement_timeout: Duration::from_millis(env.db_statement_timeout_ms),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Crear un nuevo pool de conexiones.
    ///
    /// Cada conexión lleva un `statement_timeout` del lado del servidor:
    /// un statement contra un servidor conectado pero colgado se cancela
    /// (SQLSTATE 57014) en vez de bloquear para siempre.
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        let connect_options = self.url.parse::<PgConnectOptions>()?.options([(
            "statement_timeout",
            self.statement_timeout.as_millis().to_string(),
        )]);

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect_with(connect_options)
            .await
    }
}
