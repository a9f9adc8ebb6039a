use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use models::user;
use crate::errors::ServiceError;
use crate::views::{serialize_user, UserView};

/// Token issuing settings.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub message: &'static str,
    pub user: UserView,
    pub token: String,
}

/// Look a user up by email and hand back an HS256 token describing them.
///
/// There is no password check: the token identifies, it does not authenticate.
#[instrument(skip(db, cfg, input))]
pub async fn login(db: &DatabaseConnection, cfg: &TokenConfig, input: LoginInput) -> Result<LoginSession, ServiceError> {
    let email = input.email.unwrap_or_default();
    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email.trim()))
        .one(db)
        .await?;
    let Some(found) = found else {
        warn!(email = %email, "login for unknown user");
        return Err(ServiceError::NotFound("User not found".into()));
    };

    let exp = (Utc::now() + Duration::hours(cfg.ttl_hours)).timestamp().max(0) as usize;
    let claims = Claims { sub: found.email.clone(), uid: found.id, role: found.role.clone(), exp };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.secret.as_bytes()))
        .map_err(|e| ServiceError::Internal(format!("token error: {e}")))?;

    info!(user_id = found.id, role = %found.role, "user logged in");
    Ok(LoginSession { message: "Login Successful", user: serialize_user(&found), token })
}

/// Decode and check a token issued by [`login`].
pub fn verify_token(cfg: &TokenConfig, token: &str) -> Result<Claims, ServiceError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(cfg.secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| ServiceError::Validation(format!("invalid token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_db;

    fn cfg() -> TokenConfig {
        TokenConfig { secret: "test-secret".into(), ttl_hours: 1 }
    }

    #[tokio::test]
    async fn login_returns_user_and_verifiable_token() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let session = login(&db, &cfg(), LoginInput { email: Some("dave@pestpro.com".into()) }).await?;
        assert_eq!(session.message, "Login Successful");
        assert_eq!(session.user.role, "Technician");

        let claims = verify_token(&cfg(), &session.token)?;
        assert_eq!(claims.uid, session.user.id);
        assert_eq!(claims.sub, "dave@pestpro.com");

        let other = TokenConfig { secret: "other".into(), ttl_hours: 1 };
        assert!(verify_token(&other, &session.token).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let err = login(&db, &cfg(), LoginInput { email: Some("ghost@pestpro.com".into()) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.message(), "User not found");
        assert!(login(&db, &cfg(), LoginInput::default()).await.is_err());
        Ok(())
    }
}
