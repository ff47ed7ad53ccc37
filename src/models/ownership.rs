//! Modelo de Ownership (tabla Owns)
//!
//! Un registro Owns es la única evidencia de que un cliente puede abrir
//! solicitudes contra un auto. `ownership_id` lo asigna SIEMPRE la
//! secuencia `owns_ownership_id_seq`, nunca la aplicación.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Vínculo cliente-auto persistido
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Ownership {
    pub ownership_id: i32,
    pub customer_id: i32,
    pub car_vin: String,
}

/// Request para crear un vínculo de propiedad
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOwnershipRequest {
    #[validate(range(min = 1))]
    pub customer_id: i32,

    #[validate(length(min = 1, max = 16))]
    pub car_vin: String,
}
