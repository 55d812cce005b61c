pub mod auth;
pub mod location;
pub mod shift;
pub mod user;

// Re-export all models for easy importing
pub use auth::*;
pub use location::*;
pub use shift::*;
pub use user::*;
