//! Code synthesis service.

use std::sync::Arc;

use super::render::render;
use super::{SynthesisError, SynthesisOptions, SynthesisResult, SynthesisStrategy};
use crate::extraction::extract_source;
use crate::gateway::ports::{ChatOptions, ModelGateway};
use crate::orchestration::domain::{AppKind, OrchestrationRecord};

/// Sampling options for model-assisted synthesis.
pub const SYNTHESIS_OPTIONS: ChatOptions = ChatOptions::new(0.5, 3000);

const SYNTHESIS_INSTRUCTIONS: &str = "\
You are an expert React and TypeScript developer.
Complete the template below into a working single-file application for the user's intent.
Requirements:
1. Keep the overall structure of the template.
2. Fill in content that matches the intent, the fields, and every listed ability.
3. The file must run as src/App.tsx in a Vite React project with no extra dependencies.
4. Style with Tailwind CSS class names.
5. Return only the source code in one ```tsx block.";

/// Turns orchestration records into application source.
#[derive(Debug)]
pub struct CodeSynthesizer<G>
where
    G: ModelGateway + ?Sized,
{
    gateway: Arc<G>,
    strategy: SynthesisStrategy,
}

impl<G> CodeSynthesizer<G>
where
    G: ModelGateway + ?Sized,
{
    /// Creates a synthesizer using `strategy` by default.
    #[must_use]
    pub const fn new(gateway: Arc<G>, strategy: SynthesisStrategy) -> Self {
        Self { gateway, strategy }
    }

    /// Returns the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> SynthesisStrategy {
        self.strategy
    }

    /// Synthesizes source with the configured strategy.
    ///
    /// # Errors
    ///
    /// See [`Self::synthesize_with`].
    pub async fn synthesize(&self, record: &OrchestrationRecord) -> SynthesisResult<String> {
        self.synthesize_with(record, SynthesisOptions::default())
            .await
    }

    /// Synthesizes source, honouring per-request overrides.
    ///
    /// The record's kind wins over `options.preferred_kind`; with neither,
    /// the tracker template is used.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::Template`] when rendering fails,
    /// [`SynthesisError::Gateway`] when the model call fails, and
    /// [`SynthesisError::EmptySource`] when the model reply holds no code.
    pub async fn synthesize_with(
        &self,
        record: &OrchestrationRecord,
        options: SynthesisOptions,
    ) -> SynthesisResult<String> {
        let unknown = record.unknown_abilities();
        if !unknown.is_empty() {
            tracing::warn!(abilities = ?unknown, "ignoring abilities outside the catalog");
        }

        let kind = resolve_kind(record, options.preferred_kind);
        let template = render(record, kind)?;
        match options.strategy.unwrap_or(self.strategy) {
            SynthesisStrategy::Template => Ok(template),
            SynthesisStrategy::ModelAssisted => self.complete_with_model(record, &template).await,
        }
    }

    async fn complete_with_model(
        &self,
        record: &OrchestrationRecord,
        template: &str,
    ) -> SynthesisResult<String> {
        let orchestration = serde_json::to_string_pretty(record)
            .map_err(|err| SynthesisError::InvalidRecord(err.to_string()))?;
        let user_message = format!(
            "Orchestration:\n{orchestration}\n\nTemplate:\n```tsx\n{template}\n```\n\nReturn the complete source."
        );

        let reply = self
            .gateway
            .send(SYNTHESIS_INSTRUCTIONS, &user_message, SYNTHESIS_OPTIONS)
            .await?;
        let source = extract_source(&reply);
        if source.is_empty() {
            return Err(SynthesisError::EmptySource);
        }
        Ok(source)
    }
}

/// Picks the template kind for `record`.
#[must_use]
pub fn resolve_kind(record: &OrchestrationRecord, preferred: Option<AppKind>) -> AppKind {
    record.kind().or(preferred).unwrap_or_default()
}
