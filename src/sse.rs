//! Server-Sent Events (SSE) processing for streaming responses.
//!
//! This module handles parsing of the streamGenerateContent SSE stream,
//! converting the raw byte stream into structured response chunks. Each
//! event is a `data:` line holding one JSON-encoded chunk; the stream has
//! no explicit done marker, end of stream is transport EOF.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::{Error, Result};
use crate::types::GenerateContentResponse;

/// Process a stream of bytes into a stream of response chunks.
///
/// This function takes a byte stream from an HTTP response and converts it
/// into parsed `GenerateContentResponse` chunks, handling SSE framing,
/// buffering, and error conditions.
pub fn process_sse<S>(byte_stream: S) -> impl Stream<Item = Result<GenerateContentResponse>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result.map_err(|e| {
            Error::stream_interrupted(format!("error in HTTP stream: {e}"), Some(Box::new(e)))
        })
    });

    // Use a state machine to process the SSE stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer),
        move |(mut stream, mut buffer)| async move {
            loop {
                // First check if we have a complete event in the buffer
                if let Some((event, remaining)) = extract_event(&buffer) {
                    buffer = remaining;
                    match event {
                        Some(event) => return Some((event, (stream, buffer))),
                        // Comment/keepalive frame, keep scanning
                        None => continue,
                    }
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => buffer.push_str(&text),
                        Err(e) => {
                            return Some((
                                Err(Error::encoding(
                                    format!("invalid UTF-8 in stream: {e}"),
                                    Some(Box::new(e)),
                                )),
                                (stream, buffer),
                            ));
                        }
                    },
                    Some(Err(e)) => {
                        return Some((Err(e), (stream, buffer)));
                    }
                    None => {
                        // End of stream; flush any trailing unterminated event
                        if !buffer.is_empty() {
                            let trailing = std::mem::take(&mut buffer);
                            if let Some(event) = parse_event_text(&trailing) {
                                return Some((event, (stream, buffer)));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract a complete SSE event from a buffer string.
///
/// Events are delimited by double newlines. Returns the parsed event (or
/// `None` for frames without a data field) and the remaining buffer.
#[allow(clippy::type_complexity)]
fn extract_event(buffer: &str) -> Option<(Option<Result<GenerateContentResponse>>, String)> {
    let parts: Vec<&str> = buffer.splitn(2, "\n\n").collect();
    if parts.len() != 2 {
        return None;
    }
    let event_text = parts[0];
    let rest = parts[1].to_string();
    Some((parse_event_text(event_text), rest))
}

/// Parse the `data:` payload of one SSE event.
///
/// Frames without a data field (comments, keepalives) yield `None`.
fn parse_event_text(event_text: &str) -> Option<Result<GenerateContentResponse>> {
    let mut data = String::new();
    for line in event_text.lines() {
        if let Some(payload) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(payload.trim_start());
        }
    }

    if data.is_empty() {
        return None;
    }

    match serde_json::from_str::<GenerateContentResponse>(&data) {
        Ok(chunk) => Some(Ok(chunk)),
        Err(e) => Some(Err(Error::serialization(
            format!("failed to parse response chunk: {e}"),
            Some(Box::new(e)),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunk(text: &str) -> String {
        format!(
            "data: {{\"candidates\": [{{\"content\": {{\"role\": \"model\", \"parts\": [{{\"text\": \"{text}\"}}]}}}}]}}\n\n"
        )
    }

    #[tokio::test]
    async fn parse_single_chunk() {
        let data = chunk("Hello");
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap().unwrap();
        assert_eq!(event.text(), "Hello");
        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn parse_multiple_chunks() {
        let data = format!("{}{}", chunk("Hello"), chunk(", world"));
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        assert_eq!(sse_stream.next().await.unwrap().unwrap().text(), "Hello");
        assert_eq!(sse_stream.next().await.unwrap().unwrap().text(), ", world");
    }

    #[tokio::test]
    async fn event_split_across_reads() {
        let whole = chunk("Hi");
        let (a, b) = whole.split_at(12);
        let parts = vec![
            Ok(Bytes::from(a.to_string())),
            Ok(Bytes::from(b.to_string())),
        ];
        let stream = Box::pin(stream::iter(parts));

        let mut sse_stream = Box::pin(process_sse(stream));
        assert_eq!(sse_stream.next().await.unwrap().unwrap().text(), "Hi");
    }

    #[tokio::test]
    async fn keepalive_frames_are_skipped() {
        let data = format!(": keepalive\n\n{}", chunk("ok"));
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        assert_eq!(sse_stream.next().await.unwrap().unwrap().text(), "ok");
        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_a_serialization_error() {
        let data = "data: {not json}\n\n";
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap();
        assert!(event.is_err());
    }

    #[tokio::test]
    async fn trailing_unterminated_event_is_flushed() {
        let whole = chunk("tail");
        let data = whole.trim_end().to_string();
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        assert_eq!(sse_stream.next().await.unwrap().unwrap().text(), "tail");
        assert!(sse_stream.next().await.is_none());
    }
}
