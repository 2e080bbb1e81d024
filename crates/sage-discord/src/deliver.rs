//! Chunked response delivery.
//!
//! Splits generated text into protocol-legal fragments and walks the surface
//! through them strictly in order: fragment 0 via `send_first`, the rest via
//! `send_followup`, each awaited before the next. Failures collapse to a
//! single user-visible error fragment.

use tracing::warn;

use sage_agent::GenerateError;

use crate::surface::ReplySurface;

/// User-visible message when generation or delivery fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error while processing your request.";

/// Terminal state of one delivery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// All fragments delivered in order. Zero fragments means the generated
    /// text was empty and nothing needed sending.
    Done { fragments: usize },
    /// Generation failed; one error fragment was delivered instead.
    ErrorSent,
    /// A send failed mid-sequence; the request was abandoned after a
    /// best-effort error reply.
    Failed,
}

/// Split `text` into fragments of at most `max` characters.
///
/// Straight character-count slicing: fragments are contiguous, preserve
/// order, and concatenate back to exactly `text`. Word and line boundaries
/// are ignored; lossless reassembly matters more than pretty edges.
pub fn split_fragments(text: &str, max: usize) -> Vec<String> {
    debug_assert!(max > 0);
    if text.is_empty() {
        return Vec::new();
    }

    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == max {
            fragments.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    fragments.push(current);
    fragments
}

/// Deliver a generation result through `surface`.
///
/// On `Err` exactly one error fragment goes out (never chunked). On `Ok`
/// the text is fragmented to the surface's limit and sent sequentially. A
/// send failure is not retried: one best-effort error fragment is attempted
/// through whichever primitive is still valid, then the run is abandoned.
/// Never panics and never propagates an error to the caller — a failed
/// delivery is terminal for this request only.
pub async fn deliver<S: ReplySurface + ?Sized>(
    result: Result<String, GenerateError>,
    surface: &mut S,
) -> DeliveryOutcome {
    let text = match result {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "generation failed");
            return match surface.send_first(ERROR_REPLY).await {
                Ok(()) => DeliveryOutcome::ErrorSent,
                Err(send_err) => {
                    warn!(error = %send_err, "error reply could not be delivered");
                    DeliveryOutcome::Failed
                }
            };
        }
    };

    let fragments = split_fragments(&text, surface.max_fragment_len());

    for (i, fragment) in fragments.iter().enumerate() {
        let sent = if i == 0 {
            surface.send_first(fragment).await
        } else {
            surface.send_followup(fragment).await
        };

        if let Err(e) = sent {
            warn!(error = %e, fragment = i, total = fragments.len(), "fragment send failed");
            let fallback = if i == 0 {
                surface.send_first(ERROR_REPLY).await
            } else {
                surface.send_followup(ERROR_REPLY).await
            };
            if let Err(e) = fallback {
                warn!(error = %e, "error reply could not be delivered");
            }
            return DeliveryOutcome::Failed;
        }
    }

    DeliveryOutcome::Done {
        fragments: fragments.len(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use sage_agent::provider::ProviderError;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Sent {
        First(String),
        Followup(String),
    }

    /// Surface double: records every send, optionally failing the nth one.
    struct MockSurface {
        max: usize,
        sent: Vec<Sent>,
        fail_at: Option<usize>,
    }

    impl MockSurface {
        fn with_max(max: usize) -> Self {
            Self {
                max,
                sent: Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(max: usize, index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::with_max(max)
            }
        }

        fn record(&mut self, entry: Sent) -> Result<(), serenity::Error> {
            let index = self.sent.len();
            self.sent.push(entry);
            if self.fail_at == Some(index) {
                return Err(serenity::Error::Other("send rejected"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ReplySurface for MockSurface {
        fn max_fragment_len(&self) -> usize {
            self.max
        }

        async fn show_typing(&self) {}

        async fn send_first(&mut self, text: &str) -> Result<(), serenity::Error> {
            self.record(Sent::First(text.to_string()))
        }

        async fn send_followup(&mut self, text: &str) -> Result<(), serenity::Error> {
            self.record(Sent::Followup(text.to_string()))
        }
    }

    // ── split_fragments ─────────────────────────────────────────────────────

    #[test]
    fn split_round_trips_losslessly() {
        let text = "abcdefghij".repeat(137); // 1370 chars
        for max in [1, 7, 900, 1900, 5000] {
            let fragments = split_fragments(&text, max);
            assert_eq!(fragments.concat(), text, "max={max}");
            assert!(fragments.iter().all(|f| f.chars().count() <= max));
            assert_eq!(fragments.len(), text.chars().count().div_ceil(max));
        }
    }

    #[test]
    fn split_short_text_is_single_fragment() {
        let fragments = split_fragments("hello", 900);
        assert_eq!(fragments, vec!["hello".to_string()]);
    }

    #[test]
    fn split_empty_text_is_empty_sequence() {
        assert!(split_fragments("", 900).is_empty());
    }

    #[test]
    fn split_exact_multiple_has_no_trailing_empty() {
        let text = "x".repeat(1800);
        let fragments = split_fragments(&text, 900);
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().all(|f| f.chars().count() == 900));
    }

    #[test]
    fn split_counts_characters_not_bytes() {
        let text = "héllo wörld".repeat(100);
        let fragments = split_fragments(&text, 64);
        assert_eq!(fragments.concat(), text);
        assert!(fragments.iter().all(|f| f.chars().count() <= 64));
    }

    // ── deliver ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn short_response_is_one_first_send() {
        let mut surface = MockSurface::with_max(1900);
        let outcome = deliver(Ok("The answer is 4.".to_string()), &mut surface).await;
        assert_eq!(outcome, DeliveryOutcome::Done { fragments: 1 });
        assert_eq!(surface.sent, vec![Sent::First("The answer is 4.".to_string())]);
    }

    #[tokio::test]
    async fn long_response_is_first_then_followups_in_order() {
        let text = "a".repeat(2500);
        let mut surface = MockSurface::with_max(900);
        let outcome = deliver(Ok(text.clone()), &mut surface).await;

        assert_eq!(outcome, DeliveryOutcome::Done { fragments: 3 });
        assert_eq!(surface.sent.len(), 3);
        assert_eq!(surface.sent[0], Sent::First("a".repeat(900)));
        assert_eq!(surface.sent[1], Sent::Followup("a".repeat(900)));
        assert_eq!(surface.sent[2], Sent::Followup("a".repeat(700)));
    }

    #[tokio::test]
    async fn empty_response_sends_nothing_and_completes() {
        let mut surface = MockSurface::with_max(900);
        let outcome = deliver(Ok(String::new()), &mut surface).await;
        assert_eq!(outcome, DeliveryOutcome::Done { fragments: 0 });
        assert!(surface.sent.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_sends_exactly_one_error_fragment() {
        let mut surface = MockSurface::with_max(900);
        let failure = GenerateError::Provider(ProviderError::Unavailable("down".into()));
        let outcome = deliver(Err(failure), &mut surface).await;

        assert_eq!(outcome, DeliveryOutcome::ErrorSent);
        assert_eq!(surface.sent, vec![Sent::First(ERROR_REPLY.to_string())]);
    }

    #[tokio::test]
    async fn failed_first_send_attempts_error_then_gives_up() {
        let text = "b".repeat(1000);
        let mut surface = MockSurface::failing_at(900, 0);
        let outcome = deliver(Ok(text), &mut surface).await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
        // fragment 0 attempt, then one best-effort error reply — nothing more
        assert_eq!(surface.sent.len(), 2);
        assert_eq!(surface.sent[1], Sent::First(ERROR_REPLY.to_string()));
    }

    #[tokio::test]
    async fn failed_followup_stops_the_sequence() {
        let text = "c".repeat(2500);
        let mut surface = MockSurface::failing_at(900, 1);
        let outcome = deliver(Ok(text), &mut surface).await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
        // fragment 0 ok, fragment 1 rejected, error reply attempted; fragment 2 never sent
        assert_eq!(surface.sent.len(), 3);
        assert_eq!(surface.sent[0], Sent::First("c".repeat(900)));
        assert_eq!(surface.sent[1], Sent::Followup("c".repeat(900)));
        assert_eq!(surface.sent[2], Sent::Followup(ERROR_REPLY.to_string()));
    }

    #[tokio::test]
    async fn error_reply_failure_is_swallowed() {
        let mut surface = MockSurface::failing_at(900, 0);
        let failure = GenerateError::Empty;
        let outcome = deliver(Err(failure), &mut surface).await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert_eq!(surface.sent.len(), 1);
    }

    #[tokio::test]
    async fn one_failed_run_does_not_affect_another() {
        let mut broken = MockSurface::failing_at(900, 0);
        let failure = GenerateError::Provider(ProviderError::Unavailable("down".into()));
        let first = deliver(Err(failure), &mut broken).await;
        assert_eq!(first, DeliveryOutcome::Failed);

        let mut healthy = MockSurface::with_max(900);
        let second = deliver(Ok("still fine".to_string()), &mut healthy).await;
        assert_eq!(second, DeliveryOutcome::Done { fragments: 1 });
        assert_eq!(healthy.sent, vec![Sent::First("still fine".to_string())]);
    }
}
