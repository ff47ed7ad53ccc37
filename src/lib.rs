//! Backend del taller mecánico
//!
//! Núcleo del sistema: repositorios tipados sobre PostgreSQL, workflow de
//! solicitudes de servicio (abrir/cerrar con facturación) y reportes
//! agregados. El front end de menú vive en `main.rs` y es un wrapper
//! delgado sobre estas operaciones.

pub mod config;
pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use database::DatabaseConnection;
pub use services::{ReportingService, WorkflowService};
pub use utils::errors::{ShopError, ShopResult};
