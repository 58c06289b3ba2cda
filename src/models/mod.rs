// Re-export all model types for ease of use

pub mod property;
pub mod reservation;
pub mod user;

pub use property::*;
pub use reservation::*;
pub use user::*;
