//! Modelo de Customer
//!
//! Mapea exactamente a la tabla Customer. El id lo puede proveer el
//! llamador o lo asigna la secuencia `customer_id_seq` si viene ausente.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Customer persistido
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

/// Request para crear un nuevo cliente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    /// Id explícito; `None` delega a la secuencia del store
    #[validate(range(min = 1))]
    pub id: Option<i32>,

    #[validate(
        length(min = 1, max = 32),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub fname: String,

    #[validate(
        length(min = 1, max = 32),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub lname: String,

    #[validate(length(min = 1, max = 13))]
    pub phone: String,

    #[validate(length(min = 1, max = 256))]
    pub address: String,
}
