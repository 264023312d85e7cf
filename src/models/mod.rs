//! Data models organized by type.

pub mod appointment;
pub mod claims;
pub mod hospital;
pub mod requests;
pub mod responses;
pub mod user;

pub use appointment::*;
pub use claims::*;
pub use hospital::*;
pub use requests::*;
pub use responses::*;
pub use user::*;
