use std::sync::Arc;

use tracing::debug;

use super::client::LanguageModel;
use crate::errors::BotError;
use crate::prompt::PromptTemplate;

/// Renders a template and sends it to the model, returning the raw answer.
///
/// The answer is not inspected; callers decide what a valid reply looks like.
#[derive(Clone)]
pub struct PromptInvoker {
    model: Arc<dyn LanguageModel>,
}

impl PromptInvoker {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn invoke(
        &self,
        template: &PromptTemplate,
        values: &[(&str, &str)],
    ) -> Result<String, BotError> {
        let prompt = template.render(values)?;
        debug!("Invoking prompt '{}' ({} chars)", template.name, prompt.len());
        self.model.complete(&prompt).await
    }
}
