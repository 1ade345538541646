use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::application::access::AuthUser;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub exp: usize,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("token signature is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

/// Issues and validates the HS256 bearer tokens. Stateless: there is no
/// refresh and no revocation, a token stays valid until `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn issue(&self, identity: &AuthUser) -> anyhow::Result<String> {
        let now = chrono::Utc::now().timestamp();
        self.issue_at(identity, now)
    }

    pub(crate) fn issue_at(&self, identity: &AuthUser, issued_at: i64) -> anyhow::Result<String> {
        let exp = issued_at
            .checked_add(self.ttl_secs.max(0))
            .ok_or_else(|| anyhow::anyhow!("token expiry overflows"))?;
        let exp = usize::try_from(exp)?;
        let claims = Claims {
            user_id: identity.user_id.to_hex(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            exp,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => AuthError::Malformed,
                _ => AuthError::Invalid,
            })?;
        let claims = data.claims;
        let user_id = ObjectId::parse_str(&claims.user_id).map_err(|_| AuthError::Malformed)?;
        Ok(AuthUser {
            user_id,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        })
    }
}
