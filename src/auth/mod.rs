//! Session validation and credential handling
//!
//! Issues and verifies JWT session tokens, and confirms on every request
//! that the account behind a token is still active. HTTP requests go
//! through the middleware; websocket connections call `authenticate`
//! directly during their handshake.

pub mod middleware;
pub mod service;

pub use middleware::auth_middleware;
pub use service::{AuthResponse, AuthService, ChangePasswordRequest, Claims, LoginRequest, Principal};
