//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and database operations (repositories). Each repository is built from an
//! injected `Database` handle.

pub mod appointment_repository;
pub mod hospital_repository;
pub mod user_repository;

pub use appointment_repository::AppointmentRepository;
pub use hospital_repository::HospitalRepository;
pub use user_repository::UserRepository;
