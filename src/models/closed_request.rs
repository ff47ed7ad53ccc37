//! Modelo de Closed_Request
//!
//! El cierre es 1:1 con la solicitud: rid es UNIQUE en la tabla y el
//! segundo intento de cierre es un conflicto, nunca idempotente.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Cierre de solicitud persistido, con su factura
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ClosedRequest {
    pub wid: i32,
    pub rid: i32,
    pub mid: i32,
    pub date: NaiveDate,
    pub comment: String,
    pub bill: i32,
}

/// Comando para cerrar una solicitud de servicio
#[derive(Debug, Clone, Validate)]
pub struct CloseRequestCommand {
    #[validate(range(min = 1))]
    pub wid: i32,

    #[validate(range(min = 1))]
    pub rid: i32,

    #[validate(range(min = 1))]
    pub mid: i32,

    pub comment: String,

    /// Importe facturado; los negativos se rechazan antes de tocar el store
    #[validate(range(min = 0))]
    pub bill: i32,
}
