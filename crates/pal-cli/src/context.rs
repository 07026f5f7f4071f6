use std::sync::Arc;

use pal_auth::{Navigator, SessionManager};
use pal_chat::ConversationController;
use pal_config::PalConfig;
use pal_core::Route;
use pal_http::ApiClient;

use crate::bootstrap;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PalConfig,
    pub client: Arc<ApiClient>,
    pub session: SessionManager<Arc<ApiClient>>,
}

impl AppContext {
    pub fn init(config: PalConfig) -> anyhow::Result<Self> {
        let client = Arc::new(bootstrap::build_client(&config)?);
        let session = SessionManager::new(Arc::clone(&client));
        Ok(Self {
            config,
            client,
            session,
        })
    }

    /// Fresh conversation sharing this context's HTTP session.
    pub fn conversation(&self) -> ConversationController<Arc<ApiClient>> {
        ConversationController::new(Arc::clone(&self.client))
    }

    /// Resolve the session, then enter `route` through the access guard.
    pub async fn enter<N: Navigator>(&mut self, route: Route, navigator: &mut N) -> Route {
        let session = self.session.check_session().await.clone();
        pal_auth::enter(route, &session, navigator)
    }

    pub fn shutdown(&self) {
        self.session.shutdown();
    }
}
