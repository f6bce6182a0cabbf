use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

/// Payload of the bearer tokens the identity provider hands to clients.
/// Only access tokens open the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Unix seconds.
    pub iat: usize,
    /// Unix seconds.
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}
