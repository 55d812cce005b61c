pub mod auth;
pub mod schedule;
pub mod user_context;

pub use auth::{AuthService, Claims};
pub use schedule::ScheduleService;
pub use user_context::UserContext;
