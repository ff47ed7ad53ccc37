//! Modelo de Service_Request
//!
//! Una solicitud está abierta hasta que exista exactamente un
//! Closed_Request que referencie su rid; después es terminal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Solicitud de servicio persistida
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ServiceRequest {
    pub rid: i32,
    pub customer_id: i32,
    pub car_vin: String,
    pub date: NaiveDate,
    pub odometer: i32,
    pub complaint: String,
}

/// Referencia a un cliente: uno existente o uno por crear
#[derive(Debug, Clone)]
pub enum CustomerRef {
    Existing(i32),
    New(super::customer::CreateCustomerRequest),
}

/// Referencia a un auto: uno existente o uno por crear
#[derive(Debug, Clone)]
pub enum CarRef {
    Existing(String),
    New(super::car::CreateCarRequest),
}

/// Comando para abrir una solicitud de servicio
#[derive(Debug, Clone)]
pub struct OpenRequestCommand {
    /// rid provisto por el llamador, único entre solicitudes
    pub rid: i32,
    pub customer: CustomerRef,
    pub car: CarRef,
    pub odometer: i32,
    pub complaint: String,
}

/// Campos escalares del comando, validados antes de tocar el store
#[derive(Debug, Validate)]
pub struct OpenRequestFields {
    #[validate(range(min = 1))]
    pub rid: i32,

    #[validate(range(min = 0))]
    pub odometer: i32,

    #[validate(length(min = 1))]
    pub complaint: String,
}

impl OpenRequestCommand {
    pub fn fields(&self) -> OpenRequestFields {
        OpenRequestFields {
            rid: self.rid,
            odometer: self.odometer,
            complaint: self.complaint.clone(),
        }
    }
}
