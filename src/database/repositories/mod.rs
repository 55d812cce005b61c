pub mod location;
pub mod refresh_token;
pub mod shift;
pub mod user;

// Re-export all repositories for easy importing
pub use location::LocationRepository;
pub use refresh_token::RefreshTokenRepository;
pub use shift::ShiftRepository;
pub use user::UserRepository;
