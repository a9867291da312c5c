//! Mock translator and generator for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ai::{AiError, QueryTranslator, RecipeDraft, RecipeGenerator, StructuredQuery, Vocabulary};

/// A recorded translation for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranslation {
    pub query: String,
    pub vocabulary: Vocabulary,
}

/// Mock implementation of the QueryTranslator trait.
///
/// Returns the configured result verbatim, without checking it against the
/// vocabulary.
#[derive(Default)]
pub struct MockQueryTranslator {
    result: Arc<RwLock<StructuredQuery>>,
    translations: Arc<RwLock<Vec<RecordedTranslation>>>,
    next_error: Arc<RwLock<Option<AiError>>>,
}

impl MockQueryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(result: StructuredQuery) -> Self {
        Self {
            result: Arc::new(RwLock::new(result)),
            ..Self::default()
        }
    }

    pub async fn set_result(&self, result: StructuredQuery) {
        *self.result.write().await = result;
    }

    /// Configure the next translation to fail with the given error.
    pub async fn set_next_error(&self, error: AiError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_translations(&self) -> Vec<RecordedTranslation> {
        self.translations.read().await.clone()
    }
}

#[async_trait]
impl QueryTranslator for MockQueryTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        query: &str,
        vocabulary: &Vocabulary,
    ) -> Result<StructuredQuery, AiError> {
        self.translations.write().await.push(RecordedTranslation {
            query: query.to_string(),
            vocabulary: vocabulary.clone(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(self.result.read().await.clone())
    }
}

/// Mock implementation of the RecipeGenerator trait.
///
/// Without a configured draft every call fails as malformed output.
#[derive(Default)]
pub struct MockRecipeGenerator {
    draft: Arc<RwLock<Option<RecipeDraft>>>,
    texts: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<AiError>>>,
}

impl MockRecipeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: RecipeDraft) -> Self {
        Self {
            draft: Arc::new(RwLock::new(Some(draft))),
            ..Self::default()
        }
    }

    pub async fn set_draft(&self, draft: RecipeDraft) {
        *self.draft.write().await = Some(draft);
    }

    pub async fn set_next_error(&self, error: AiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Recipe texts passed to `generate`, in call order.
    pub async fn recorded_texts(&self) -> Vec<String> {
        self.texts.read().await.clone()
    }
}

#[async_trait]
impl RecipeGenerator for MockRecipeGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        recipe_text: &str,
        _cuisines: &[String],
        _tags: &[String],
    ) -> Result<RecipeDraft, AiError> {
        self.texts.write().await.push(recipe_text.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        self.draft
            .read()
            .await
            .clone()
            .ok_or_else(|| AiError::MalformedOutput("no draft configured".to_string()))
    }
}
