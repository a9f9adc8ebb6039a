use sea_orm::DatabaseConnection;
use service::auth_service::TokenConfig;

/// Shared handler state: one store handle per process plus token settings.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: &configs::AuthConfig) -> Self {
        Self {
            db,
            tokens: TokenConfig { secret: auth.secret_key.clone(), ttl_hours: auth.token_ttl_hours },
        }
    }
}
