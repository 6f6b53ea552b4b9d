//! Locally persisted session state: the bearer token issued at login and the
//! username it belongs to. Both live under fixed keys and are cleared together.

pub mod context;
pub mod store;

pub use context::SessionContext;
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

pub const TOKEN_KEY: &str = "userToken";
pub const USERNAME_KEY: &str = "username";
