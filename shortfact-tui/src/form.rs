//! Submission state machine for the fact-check form.
//!
//! Pure logic, no terminal or network concerns: the caller feeds submit
//! actions and completions in, and reads the current [`RequestState`] back
//! out. Exactly one check is in flight at a time, and every accepted check
//! carries a generation tag so a completion that arrives after the state has
//! moved on is discarded rather than overwriting newer state.

use shortfact_common::{ClaimRequest, FactCheckResult};

/// Inline notice shown when a submit carries a blank field.
pub const VALIDATION_MESSAGE: &str =
    "Please provide both a YouTube Shorts URL and the claim to check.";

/// Where the current request-response cycle stands.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded(FactCheckResult),
    Failed(String),
}

/// A check the controller accepted: the request to run plus the generation
/// its completion must carry to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedCheck {
    pub generation: u64,
    pub request: ClaimRequest,
}

#[derive(Debug)]
pub struct FormController {
    state: RequestState,
    notice: Option<String>,
    generation: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            notice: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Validation notice, if the last submit was rejected.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    /// Handle a submit action with the raw form input.
    ///
    /// Returns the accepted check when a network call should start. `None`
    /// means no call was made: either a field was blank (a validation notice
    /// is set and the state is untouched) or a check is already in flight
    /// (the submit is ignored; the controller never queues).
    pub fn submit(&mut self, video_url: &str, claim_text: &str) -> Option<AcceptedCheck> {
        if self.is_loading() {
            tracing::debug!("submit ignored; check already in flight");
            return None;
        }

        let Some(request) = ClaimRequest::from_input(video_url, claim_text) else {
            self.notice = Some(VALIDATION_MESSAGE.to_string());
            return None;
        };

        // Prior result or error is discarded now, before the call resolves.
        self.notice = None;
        self.generation += 1;
        self.state = RequestState::Loading;

        Some(AcceptedCheck {
            generation: self.generation,
            request,
        })
    }

    /// Apply the completion of an in-flight check.
    ///
    /// Returns `false` when the completion carried a stale generation and
    /// was discarded without touching the state.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<FactCheckResult, String>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale check completion"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => RequestState::Succeeded(result),
            Err(message) => RequestState::Failed(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortfact_common::{Source, Verdict};

    fn result(verdict: Verdict) -> FactCheckResult {
        FactCheckResult {
            verdict,
            explanation: "because".into(),
            sources: vec![Source {
                title: "A".into(),
                uri: "https://a.com".into(),
            }],
        }
    }

    #[test]
    fn blank_url_is_rejected_without_leaving_idle() {
        let mut form = FormController::new();
        let accepted = form.submit("", "something");
        assert!(accepted.is_none());
        assert_eq!(form.state(), &RequestState::Idle);
        assert_eq!(form.notice(), Some(VALIDATION_MESSAGE));
    }

    #[test]
    fn blank_claim_is_rejected_even_with_whitespace() {
        let mut form = FormController::new();
        assert!(form.submit("https://youtube.com/shorts/x", "   ").is_none());
        assert_eq!(form.state(), &RequestState::Idle);
        assert!(form.notice().is_some());
    }

    #[test]
    fn valid_submit_moves_to_loading_and_clears_notice() {
        let mut form = FormController::new();
        form.submit("", "");
        assert!(form.notice().is_some());

        let accepted = form
            .submit("https://youtube.com/shorts/x", "claim")
            .expect("valid submit accepted");
        assert_eq!(accepted.generation, 1);
        assert_eq!(accepted.request.claim_text, "claim");
        assert!(form.is_loading());
        assert!(form.notice().is_none());
    }

    #[test]
    fn failure_completion_moves_to_failed_with_message() {
        let mut form = FormController::new();
        let accepted = form.submit("https://u", "c").unwrap();

        let applied = form.complete(
            accepted.generation,
            Err("Failed to get a response from the AI service; it may be overloaded.".into()),
        );
        assert!(applied);
        assert_eq!(
            form.state(),
            &RequestState::Failed(
                "Failed to get a response from the AI service; it may be overloaded.".into()
            )
        );
    }

    #[test]
    fn success_completion_moves_to_succeeded() {
        let mut form = FormController::new();
        let accepted = form.submit("https://u", "c").unwrap();

        assert!(form.complete(accepted.generation, Ok(result(Verdict::Fact))));
        match form.state() {
            RequestState::Succeeded(r) => assert_eq!(r.verdict, Verdict::Fact),
            other => panic!("expected Succeeded, got {other:?}"),
        }
    }

    #[test]
    fn resubmit_from_failed_discards_error_before_completion() {
        let mut form = FormController::new();
        let first = form.submit("https://u", "c").unwrap();
        form.complete(first.generation, Err("overloaded".into()));

        let second = form.submit("https://u", "c again").unwrap();
        assert_eq!(second.generation, 2);
        // Error is gone immediately, not when the new call resolves.
        assert!(form.is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut form = FormController::new();
        let first = form.submit("https://u", "c").unwrap();
        form.complete(first.generation, Ok(result(Verdict::Myth)));

        let second = form.submit("https://u", "c2").unwrap();
        assert!(form.is_loading());

        // A replayed completion from the first cycle must not clobber the
        // newer in-flight state.
        let applied = form.complete(first.generation, Err("late failure".into()));
        assert!(!applied);
        assert!(form.is_loading());

        assert!(form.complete(second.generation, Ok(result(Verdict::Fact))));
        match form.state() {
            RequestState::Succeeded(r) => assert_eq!(r.verdict, Verdict::Fact),
            other => panic!("expected Succeeded, got {other:?}"),
        }
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut form = FormController::new();
        let first = form.submit("https://u", "c").unwrap();
        assert!(form.submit("https://u", "c2").is_none());
        assert!(form.is_loading());

        // The original check still completes normally.
        assert!(form.complete(first.generation, Ok(result(Verdict::Inconclusive))));
    }

    #[test]
    fn invalid_submit_keeps_previous_result_visible() {
        let mut form = FormController::new();
        let accepted = form.submit("https://u", "c").unwrap();
        form.complete(accepted.generation, Ok(result(Verdict::Fact)));

        assert!(form.submit("", "").is_none());
        assert!(matches!(form.state(), RequestState::Succeeded(_)));
        assert_eq!(form.notice(), Some(VALIDATION_MESSAGE));
    }
}
