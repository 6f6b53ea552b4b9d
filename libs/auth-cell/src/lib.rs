//! # Auth Cell
//!
//! Login, registration and sign-out against the `/auth` routes of the
//! consultations API.
//!
//! - `services::auth::AuthClient` talks to the API and nothing else.
//! - `services::account::AuthService` adds the local steps around it:
//!   sign-up form validation before registering, and persisting the
//!   issued token in the session after login.

pub mod models;
pub mod services;

pub use models::{AuthError, SignUpForm};
pub use services::{AuthClient, AuthService};
