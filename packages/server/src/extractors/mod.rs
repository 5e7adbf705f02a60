pub mod auth;
pub mod json;

pub use auth::AdminSession;
pub use json::AppJson;
