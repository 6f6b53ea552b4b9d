pub mod account;
pub mod auth;

pub use account::AuthService;
pub use auth::AuthClient;
