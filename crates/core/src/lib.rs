pub mod ai;
pub mod auth;
pub mod config;
pub mod criteria;
pub mod metrics;
pub mod recipe;
pub mod store;
pub mod testing;

pub use ai::{
    validate_draft, AiConfig, AiError, AiServices, LlmProvider, QueryTranslator, RecipeDraft,
    RecipeGenerator, StructuredQuery, Vocabulary,
};
pub use auth::{
    create_authenticator, create_token_service, hash_password, verify_password, AuthError,
    AuthRequest, Authenticator, Claims, Identity, JwtAuthenticator, NoneAuthenticator,
    TokenService,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, AuthMethod, Config,
    ConfigError, DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use criteria::{build_filter, Condition, Filter, Pattern, SearchInput};
pub use recipe::{
    validate_recipe, Cuisine, DocumentId, Ingredient, InvalidDocumentId, NewRecipe, Recipe,
    RecipeCandidate, RecipeSummary, Tag, ValidationError,
};
pub use store::{
    seed_reference_data, Database, LookupStore, RecipeStore, SqliteLookupStore,
    SqliteRecipeStore, SqliteUserStore, StoreError, User, UserStore,
};
