//! JWT session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

/// Session-token JWT lifetime in seconds (4 hours).
pub const SESSION_TOKEN_EXP: u64 = 14400;

/// User identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub user_role: i16,
    pub exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token creation (identity service) and
/// validation (gateway / other services).
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_IDENTITY_SERVICE`** cargo
/// feature. Only the identity service enables it because it is the sole
/// token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_IDENTITY_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// User role as `i16` wire value (0 = customer, 1 = admin), matching the
    /// `users.role` column.
    pub role: i16,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning parsed identity.
///
/// This is the primary public API for token validation. The gateway calls
/// this on every request to extract user identity from the JWT cookie.
pub fn validate_session_token(cookie_value: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        user_role: claims.role,
        exp: claims.exp,
    })
}
