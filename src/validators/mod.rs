//! Input validation helpers shared by request models and services.

pub mod common;
pub mod hospital;
pub mod user;

pub use common::*;
pub use hospital::*;
pub use user::*;
