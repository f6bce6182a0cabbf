use axum::extract::FromRef;
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::debug;

use super::claims::{Claims, TokenKind};
use crate::{config::JwtConfig, state::AppState};

/// Verification half of the JWT setup.
#[derive(Clone)]
pub struct JwtKeys {
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Access {
            anyhow::bail!("not an access token");
        }
        Ok(claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

/// Signs tokens the way the identity provider does, for tests.
#[cfg(test)]
pub(crate) mod issuer {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use super::{Claims, TokenKind};
    use crate::config::JwtConfig;

    const ACCESS_TTL_MINUTES: i64 = 5;
    const REFRESH_TTL_MINUTES: i64 = 60;

    pub fn sign(cfg: &JwtConfig, user_id: Uuid, kind: TokenKind) -> String {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => ACCESS_TTL_MINUTES,
            TokenKind::Refresh => REFRESH_TTL_MINUTES,
        };
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + Duration::minutes(ttl)).unix_timestamp() as usize,
            iss: cfg.issuer.clone(),
            aud: cfg.audience.clone(),
            kind,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .expect("sign token")
    }

    pub fn access(cfg: &JwtConfig, user_id: Uuid) -> String {
        sign(cfg, user_id, TokenKind::Access)
    }
}
