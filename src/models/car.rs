//! Modelo de Car
//!
//! El VIN es la única identidad del auto y es inmutable una vez creado.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Car persistido
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Car {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// Request para crear un nuevo auto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 16))]
    pub vin: String,

    #[validate(length(min = 1, max = 32))]
    pub make: String,

    #[validate(length(min = 1, max = 32))]
    pub model: String,

    #[validate(range(min = 1970))]
    pub year: i32,
}
