//! Caller identity. Tokens are issued by the identity provider; this service
//! only verifies them.

mod claims;
pub(crate) mod extractors;
pub(crate) mod jwt;

pub use extractors::AuthUser;
