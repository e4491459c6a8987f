//! Grounded LLM integration for Shortfact.
//!
//! This crate exposes the [`traits::GroundedLlm`] interface, the concrete
//! Gemini implementation, and the fact-check pipeline built on top of it:
//! marker parsing ([`verdict`]), citation cleanup ([`sources`]), and the
//! composing [`checker::FactChecker`].
pub mod checker;
pub mod gemini;
pub mod sources;
pub mod traits;
pub mod verdict;

pub use checker::FactChecker;
pub use gemini::GeminiClient;
pub use traits::{CitationCandidate, GroundedLlm, GroundedReply};

/// Default model recommendation for grounded fact checks.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
