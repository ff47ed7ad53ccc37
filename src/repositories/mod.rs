//! Repositorios de entidades
//!
//! CRUD tipado sobre el store. Cada escritura valida los bounds ANTES de
//! tocar PostgreSQL (reject-fast, sin escrituras parciales) y todo valor
//! del usuario viaja por parámetros bind, nunca interpolado.

pub mod car_repository;
pub mod customer_repository;
pub mod mechanic_repository;
pub mod ownership_repository;

pub use car_repository::CarRepository;
pub use customer_repository::CustomerRepository;
pub use mechanic_repository::MechanicRepository;
pub use ownership_repository::OwnershipRepository;
