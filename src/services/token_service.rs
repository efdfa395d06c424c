use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

const ACCESS_TOKEN_TTL_HOURS: i64 = 1;
// Refresh horizon is a deployment choice; 30 days keeps re-login rare
// without making stolen tokens immortal.
const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub token_type: TokenType,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Issues and validates signed, self-contained tokens. The signing key is
/// process-wide configuration loaded once at startup; validity is purely a
/// function of signature and expiry, so there is no server-side revocation.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET is not set; using an insecure default");
            "your-secret-key".to_string()
        });
        Self::new(&secret)
    }

    pub fn issue_access(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenType::Access, Duration::hours(ACCESS_TOKEN_TTL_HOURS))
    }

    pub fn issue_refresh(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenType::Refresh, Duration::days(REFRESH_TOKEN_TTL_DAYS))
    }

    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            token: self.issue_access(subject)?,
            refresh_token: self.issue_refresh(subject)?,
            token_type: "bearer",
        })
    }

    fn issue(&self, subject: &str, token_type: TokenType, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            token_type,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::External(format!("failed to sign token: {e}")))
    }

    /// Total over arbitrary input: malformed tokens, bad signatures and
    /// expired claims all come back as `None`.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Exchange a valid refresh token for a rotated access+refresh pair.
    /// The old refresh token stays formally valid until its expiry.
    pub fn refresh(&self, token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decode(token).ok_or(AppError::Unauthorized)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::Unauthorized);
        }
        self.issue_pair(&claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret")
    }

    fn expired_claims(token_type: TokenType) -> Claims {
        let now = Utc::now();
        Claims {
            sub: "old@example.com".to_string(),
            token_type,
            iat: (now - Duration::hours(3)).timestamp() as usize,
            exp: (now - Duration::hours(2)).timestamp() as usize,
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let tokens = service();
        let token = tokens.issue_access("alice@example.com").unwrap();
        let claims = tokens.decode(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_type() {
        let tokens = service();
        let token = tokens.issue_refresh("alice@example.com").unwrap();
        let claims = tokens.decode(&token).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_decode_garbage_returns_none() {
        let tokens = service();
        assert!(tokens.decode("").is_none());
        assert!(tokens.decode("not a token").is_none());
        assert!(tokens.decode("a.b.c").is_none());
        assert!(tokens.decode("\u{0}\u{1}\u{2}").is_none());
    }

    #[test]
    fn test_decode_rejects_wrong_signature() {
        let token = service().issue_access("alice@example.com").unwrap();
        let other = TokenService::new("a-different-secret");
        assert!(other.decode(&token).is_none());
    }

    #[test]
    fn test_decode_rejects_expired() {
        let tokens = service();
        let token = encode(
            &Header::default(),
            &expired_claims(TokenType::Access),
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .unwrap();
        assert!(tokens.decode(&token).is_none());
    }

    #[test]
    fn test_refresh_rotates_pair() {
        let tokens = service();
        let pair = tokens.issue_pair("alice@example.com").unwrap();
        let rotated = tokens.refresh(&pair.refresh_token).unwrap();
        let access = tokens.decode(&rotated.token).unwrap();
        let refresh = tokens.decode(&rotated.refresh_token).unwrap();
        assert_eq!(access.sub, "alice@example.com");
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let tokens = service();
        let pair = tokens.issue_pair("alice@example.com").unwrap();
        assert!(matches!(
            tokens.refresh(&pair.token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_refresh_rejects_expired_refresh_token() {
        let tokens = service();
        let token = encode(
            &Header::default(),
            &expired_claims(TokenType::Refresh),
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .unwrap();
        assert!(matches!(tokens.refresh(&token), Err(AppError::Unauthorized)));
    }
}
