pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, HashingError};
pub use token::{Claims, TokenError, TokenService};

/// Name of the cookie that carries the token after register and login.
pub const AUTH_COOKIE: &str = "Authorization";
