//! Services module
//!
//! Este módulo contiene la lógica de negocio: el workflow de solicitudes
//! de servicio (abrir/cerrar) y los reportes agregados de solo lectura.

pub mod reporting_service;
pub mod workflow_service;

pub use reporting_service::*;
pub use workflow_service::*;
