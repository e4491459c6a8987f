//! The fact-check pipeline: prompt → grounded generation → parsed result.

use std::sync::Arc;

use shortfact_common::{ClaimRequest, FactCheckResult, Result, ShortfactError};

use crate::sources::dedupe_sources;
use crate::traits::GroundedLlm;
use crate::verdict::parse_reply;

/// Composes the grounded backend with marker parsing and citation cleanup.
///
/// One backend call per [`check`](FactChecker::check); no caching, no local
/// persistence, no retry. Failures surface as
/// [`ShortfactError::ServiceUnavailable`] so the UI always shows the same
/// recoverable message regardless of the underlying cause.
pub struct FactChecker {
    llm: Arc<dyn GroundedLlm>,
}

impl FactChecker {
    pub fn new(llm: Arc<dyn GroundedLlm>) -> Self {
        Self { llm }
    }

    /// Run one fact-check cycle for a validated submission.
    pub async fn check(&self, request: &ClaimRequest) -> Result<FactCheckResult> {
        let prompt = build_prompt(request);

        tracing::info!(
            video_url = %request.video_url,
            model = %self.llm.model_name(),
            "factcheck.start"
        );

        let reply = match self.llm.generate_grounded(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "factcheck.llm_error");
                return Err(ShortfactError::ServiceUnavailable);
            }
        };

        let parsed = parse_reply(reply.text.trim());
        let sources = dedupe_sources(reply.citations);

        tracing::info!(
            verdict = parsed.verdict.label(),
            source_count = sources.len(),
            tokens_used = ?reply.tokens_used,
            "factcheck.done"
        );

        Ok(FactCheckResult {
            verdict: parsed.verdict,
            explanation: parsed.explanation,
            sources,
        })
    }
}

/// Deterministic instruction prompt embedding both inputs verbatim.
pub fn build_prompt(request: &ClaimRequest) -> String {
    format!(
        r#"You are a meticulous fact-checking expert. Your task is to analyze a claim made in a YouTube Short and determine its veracity.

YouTube Short URL: {url}
Claim to investigate: "{claim}"

Instructions:
1. Use web search to find high-quality, reliable sources (e.g., reputable news organizations, scientific journals, academic institutions, expert analyses).
2. Evaluate the evidence from these sources to determine if the claim is a fact, a myth, or inconclusive.
3. Synthesize your findings into a clear and concise explanation.
4. Start your response with one of three possible markers: "FACT:", "MYTH:", or "INCONCLUSIVE:". This marker is mandatory.
5. Following the marker, provide your detailed explanation. Be objective and stick to the evidence.

Example Response:
MYTH: The claim that you only use 10% of your brain is a long-standing myth. Neurological studies using fMRI and PET scans show that most of the brain is active almost all the time, even during sleep."#,
        url = request.video_url,
        claim = request.claim_text,
    )
}
