use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::match_service::MatchService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub match_service: Arc<MatchService>,
}
