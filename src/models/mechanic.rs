//! Modelo de Mechanic
//!
//! La experiencia se mide en años completos, 0 a 99.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Mechanic persistido
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Mechanic {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub experience: i32,
}

/// Request para crear un nuevo mecánico
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMechanicRequest {
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

    #[validate(range(min = 0, max = 99))]
    pub experience: i32,
}
