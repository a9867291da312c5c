use std::sync::Arc;

use recipebook_core::{
    AiServices, Authenticator, Config, Database, LookupStore, RecipeStore, SanitizedConfig,
    SqliteLookupStore, SqliteRecipeStore, SqliteUserStore, TokenService, UserStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    recipes: Arc<dyn RecipeStore>,
    lookups: Arc<dyn LookupStore>,
    users: Arc<dyn UserStore>,
    authenticator: Arc<dyn Authenticator>,
    tokens: Option<Arc<TokenService>>,
    ai: Option<AiServices>,
}

impl AppState {
    /// Build the state over an opened database. The stores share `db`.
    pub fn new(
        config: Config,
        db: Arc<Database>,
        authenticator: Arc<dyn Authenticator>,
        tokens: Option<Arc<TokenService>>,
        ai: Option<AiServices>,
    ) -> Self {
        Self {
            config,
            recipes: Arc::new(SqliteRecipeStore::new(Arc::clone(&db))),
            lookups: Arc::new(SqliteLookupStore::new(Arc::clone(&db))),
            users: Arc::new(SqliteUserStore::new(db)),
            authenticator,
            tokens,
            ai,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn recipes(&self) -> &dyn RecipeStore {
        self.recipes.as_ref()
    }

    pub fn lookups(&self) -> &dyn LookupStore {
        self.lookups.as_ref()
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    /// Token issuer, present when a token secret is configured.
    pub fn tokens(&self) -> Option<&TokenService> {
        self.tokens.as_deref()
    }

    /// AI services, absent when `[ai]` is not configured or failed to start.
    pub fn ai(&self) -> Option<&AiServices> {
        self.ai.as_ref()
    }

    pub fn password_cost(&self) -> u32 {
        self.config.auth.password_cost
    }
}
