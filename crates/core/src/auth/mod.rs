//! Login protection helpers - attempt rate limiting and credential checks.

mod credentials;
mod rate_limit;


pub use credentials::{
    generate_secure_password, is_valid_email, sanitize_input, validate_password,
    PasswordValidation,
};
pub use rate_limit::{
    AttemptRecord, Clock, InMemoryRateLimitStore, LoginRateLimiter, RateLimitPolicy,
    RateLimitStatus, RateLimitStore, SystemClock,
};
