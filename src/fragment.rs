//! Fragment streams and the one-turn accumulation state machine.
//!
//! A turn moves through `Sent -> Streaming -> {Complete | Interrupted}`.
//! Fragments are consumed in order, exactly once; concatenating them yields
//! the full reply. On interruption the partial text is preserved and handed
//! back with the transport error, so the caller's keep-or-discard policy is
//! an explicit branch rather than incidental fallthrough.

use futures::{Stream, StreamExt};

use crate::error::{Error, Result};
use crate::observability::{STREAM_FRAGMENTS, STREAM_INTERRUPTIONS, TURN_FRAGMENT_COUNT};
use crate::render::Renderer;
use crate::types::GenerateContentResponse;

/// One incremental piece of assistant reply text.
pub type TextFragment = String;

/// Adapts a response-chunk stream into a fragment stream.
///
/// Chunks that carry no text (finish-reason/usage-only chunks) are dropped;
/// errors pass through unchanged.
pub fn fragments<S>(chunks: S) -> impl Stream<Item = Result<TextFragment>>
where
    S: Stream<Item = Result<GenerateContentResponse>>,
{
    chunks.filter_map(|chunk| async move {
        match chunk {
            Ok(chunk) => {
                let text = chunk.text();
                if text.is_empty() { None } else { Some(Ok(text)) }
            }
            Err(e) => Some(Err(e)),
        }
    })
}

/// Terminal state of one streamed turn.
///
/// Both variants carry the accumulated reply text; `Interrupted`
/// additionally carries the transport error that cut the stream short.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The stream reached its end-of-stream signal.
    Complete {
        /// The full reply, the concatenation of every fragment.
        text: String,
    },

    /// The stream failed before completing.
    Interrupted {
        /// Whatever text had been produced before the failure.
        partial: String,
        /// The error that interrupted the stream.
        error: Error,
    },
}

impl TurnOutcome {
    /// The accumulated text, complete or partial.
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Complete { text } => text,
            TurnOutcome::Interrupted { partial, .. } => partial,
        }
    }

    /// Consumes the outcome, yielding the accumulated text.
    pub fn into_text(self) -> String {
        match self {
            TurnOutcome::Complete { text } => text,
            TurnOutcome::Interrupted { partial, .. } => partial,
        }
    }

    /// Returns true if the stream was cut short.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, TurnOutcome::Interrupted { .. })
    }

    /// The interrupting error, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            TurnOutcome::Complete { .. } => None,
            TurnOutcome::Interrupted { error, .. } => Some(error),
        }
    }
}

/// Consumes a fragment stream, rendering each fragment as it arrives.
///
/// Fragments are appended to a single accumulator and echoed to the
/// renderer one at a time, so the display grows incrementally. The first
/// error ends the turn; the sequence is single-pass and never restarted.
pub async fn drive_turn<S>(fragments: S, renderer: &mut dyn Renderer) -> TurnOutcome
where
    S: Stream<Item = Result<TextFragment>>,
{
    futures::pin_mut!(fragments);
    let mut accumulated = String::new();
    let mut fragment_count = 0u64;

    while let Some(fragment) = fragments.next().await {
        match fragment {
            Ok(fragment) => {
                STREAM_FRAGMENTS.click();
                fragment_count += 1;
                accumulated.push_str(&fragment);
                renderer.print_text(&fragment);
            }
            Err(error) => {
                STREAM_INTERRUPTIONS.click();
                TURN_FRAGMENT_COUNT.add(fragment_count as f64);
                return TurnOutcome::Interrupted {
                    partial: accumulated,
                    error,
                };
            }
        }
    }

    TURN_FRAGMENT_COUNT.add(fragment_count as f64);
    TurnOutcome::Complete { text: accumulated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TestRenderer;
    use futures::stream;

    fn text_chunk(text: &str) -> GenerateContentResponse {
        serde_json::from_str(&format!(
            "{{\"candidates\": [{{\"content\": {{\"role\": \"model\", \"parts\": [{{\"text\": \"{text}\"}}]}}}}]}}"
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn fragments_skip_textless_chunks() {
        let chunks = stream::iter(vec![
            Ok(text_chunk("Hello")),
            Ok(serde_json::from_str("{}").unwrap()),
            Ok(text_chunk("!")),
        ]);
        let collected: Vec<_> = fragments(chunks).collect().await;
        let texts: Vec<_> = collected.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(texts, vec!["Hello", "!"]);
    }

    #[tokio::test]
    async fn complete_turn_concatenates_fragments() {
        let source = stream::iter(vec![
            Ok("Hello".to_string()),
            Ok(", ".to_string()),
            Ok("world".to_string()),
        ]);
        let mut renderer = TestRenderer::default();
        let outcome = drive_turn(source, &mut renderer).await;
        assert!(!outcome.is_interrupted());
        assert_eq!(outcome.text(), "Hello, world");
        // The display surface saw the text grow fragment by fragment.
        assert_eq!(renderer.text, "Hello, world");
    }

    #[tokio::test]
    async fn interrupted_turn_preserves_partial_text() {
        let source = stream::iter(vec![
            Ok("Hello".to_string()),
            Ok(", ".to_string()),
            Ok("world".to_string()),
            Err(Error::stream_interrupted("connection reset", None)),
        ]);
        let mut renderer = TestRenderer::default();
        let outcome = drive_turn(source, &mut renderer).await;
        assert!(outcome.is_interrupted());
        assert_eq!(outcome.text(), "Hello, world");
        assert!(outcome.error().unwrap().is_stream_interrupted());
    }

    #[tokio::test]
    async fn empty_stream_completes_with_empty_text() {
        let source = stream::iter(Vec::<Result<TextFragment>>::new());
        let mut renderer = TestRenderer::default();
        let outcome = drive_turn(source, &mut renderer).await;
        assert_eq!(outcome.into_text(), "");
    }
}
