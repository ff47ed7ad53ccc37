//! Módulo de base de datos
//!
//! Maneja la conexión y operaciones con PostgreSQL. Es el único módulo
//! que toca el storage directamente; todo SQL pasa por parámetros bind.

pub mod connection;

pub use connection::DatabaseConnection;
