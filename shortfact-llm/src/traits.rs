use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shortfact_common::Result;

/// One grounding citation as returned by the backend, before validation.
///
/// Either field may be absent; the source deduplicator decides what
/// survives into a [`shortfact_common::Source`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCandidate {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Raw outcome of one grounded generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundedReply {
    pub text: String,
    pub citations: Vec<CitationCandidate>,
    pub model: Option<String>,
    pub tokens_used: Option<u32>,
}

/// Seam between the fact checker and a concrete model backend.
///
/// Implementations run exactly one generation per call with web-search
/// grounding enabled; retry policy belongs to the caller (and the caller
/// here deliberately has none).
#[async_trait]
pub trait GroundedLlm: Send + Sync {
    /// Generate a reply to the given prompt with search grounding enabled.
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
