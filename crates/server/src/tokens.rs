//! Identity token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the shared secret from the settings. The
//! payload carries either an admin identity (`{id, power, isAdmin: true}`) or
//! a shop identity (`{id}`); decoding resolves it into the tagged [`Identity`]
//! exactly once, so a caller can never be both at the same time.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::ServerError;

/// Decoded caller identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Admin { id: String, power: i16 },
    Shop { id: String },
}

impl Identity {
    /// The shop id; an admin identity on a shop-only operation is refused.
    pub fn shop_id(&self) -> Result<&str, ServerError> {
        match self {
            Self::Shop { id } => Ok(id),
            Self::Admin { .. } => Err(ServerError::Forbidden),
        }
    }

    /// The admin id; a shop identity on an admin-only operation is refused.
    pub fn admin_id(&self) -> Result<&str, ServerError> {
        match self {
            Self::Admin { id, .. } => Ok(id),
            Self::Shop { .. } => Err(ServerError::Forbidden),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::Admin { power, .. } if *power >= engine::admins::MAX_POWER)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power: Option<i16>,
    #[serde(default)]
    is_admin: bool,
}

/// Encode/decode service for the `x-auth-token` header value.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        // Tokens carry no expiry claim, matching the issued payload above.
        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, ServerError> {
        let claims = match identity {
            Identity::Admin { id, power } => Claims {
                id: id.clone(),
                power: Some(*power),
                is_admin: true,
            },
            Identity::Shop { id } => Claims {
                id: id.clone(),
                power: None,
                is_admin: false,
            },
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ServerError::Internal(format!("failed to issue token: {err}")))
    }

    pub fn decode(&self, token: &str) -> Result<Identity, ServerError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| ServerError::InvalidToken)?;

        let claims = data.claims;
        Ok(if claims.is_admin {
            Identity::Admin {
                id: claims.id,
                power: claims.power.unwrap_or(engine::admins::MIN_POWER),
            }
        } else {
            Identity::Shop { id: claims.id }
        })
    }
}
