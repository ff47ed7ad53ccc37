//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL del taller: Customer, Mechanic, Car, Owns,
//! Service_Request y Closed_Request.

pub mod car;
pub mod closed_request;
pub mod customer;
pub mod mechanic;
pub mod ownership;
pub mod service_request;

pub use car::*;
pub use closed_request::*;
pub use customer::*;
pub use mechanic::*;
pub use ownership::*;
pub use service_request::*;
