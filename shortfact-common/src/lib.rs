//! Common types and utilities shared across Shortfact crates.
//!
//! This crate defines the fact-check domain model, observability helpers,
//! and shared error types used throughout the workspace. It is intentionally
//! lightweight so that every crate can depend on it without heavy transitive
//! costs.
//!
//! # Overview
//!
//! - [`ClaimRequest`]: one user submission (video URL + claim text)
//! - [`Verdict`], [`Source`], [`FactCheckResult`]: the typed check outcome
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ShortfactError`] and [`Result`]: shared error handling
use serde::{Deserialize, Serialize};

pub mod observability;

/// A single fact-check submission.
///
/// Both fields are non-blank after trimming; construction through
/// [`ClaimRequest::from_input`] enforces this. Requests are ephemeral and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub video_url: String,
    pub claim_text: String,
}

impl ClaimRequest {
    /// Build a request from raw form input.
    ///
    /// Returns `None` when either field is blank after trimming, which is
    /// the only input validation the core performs.
    pub fn from_input(video_url: &str, claim_text: &str) -> Option<Self> {
        let video_url = video_url.trim();
        let claim_text = claim_text.trim();
        if video_url.is_empty() || claim_text.is_empty() {
            return None;
        }
        Some(Self {
            video_url: video_url.to_string(),
            claim_text: claim_text.to_string(),
        })
    }
}

/// Tri-state outcome of a fact check. Derived once from the model reply and
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Fact,
    Myth,
    Inconclusive,
}

impl Verdict {
    /// Upper-case label matching the wire markers, used by the UI chip.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Fact => "FACT",
            Verdict::Myth => "MYTH",
            Verdict::Inconclusive => "INCONCLUSIVE",
        }
    }
}

/// A grounding citation: the web document that supported part of the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Composed result of one fact-check cycle.
///
/// `sources` is unique by `uri` and keeps first-seen order; both invariants
/// are established by `shortfact-llm` before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub verdict: Verdict,
    pub explanation: String,
    pub sources: Vec<Source>,
}

/// Error types used across the Shortfact system.
#[derive(thiserror::Error, Debug)]
pub enum ShortfactError {
    /// The LLM client failed to produce a usable reply.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// User-facing failure for any transport or service error during a
    /// check. One attempt per submission; never retried automatically.
    #[error("Failed to get a response from the AI service; it may be overloaded.")]
    ServiceUnavailable,
}

/// Convenient alias for results that use [`ShortfactError`].
pub type Result<T> = std::result::Result<T, ShortfactError>;
