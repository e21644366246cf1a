//! Sequential reading of a streamed chat reply.
//!
//! SYSTEM CONTEXT
//! ==============
//! `POST /chat` answers with a plain-text body that arrives in chunks.
//! [`pump_reply`] awaits each chunk before asking for the next, decodes it,
//! and hands the decoded text to the caller, so text is applied strictly in
//! arrival order.
//!
//! The browser reader wraps a `ReadableStream` default reader; tests drive
//! the same pump with in-memory chunk lists.

#[cfg(test)]
#[path = "reply_stream_test.rs"]
mod reply_stream_test;

use super::types::ApiError;
use crate::util::utf8::Utf8ChunkDecoder;

/// Source of raw body chunks. `Ok(None)` marks the end of the stream.
#[allow(async_fn_in_trait)]
pub trait ReplyStream {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ApiError>;
}

/// Read `stream` to exhaustion, calling `on_text` with each decoded piece.
///
/// Returns the number of chunks read.
///
/// # Errors
///
/// Returns the first error produced by the stream; text delivered before the
/// failure has already been passed to `on_text`.
pub async fn pump_reply<S, F>(stream: &mut S, mut on_text: F) -> Result<usize, ApiError>
where
    S: ReplyStream,
    F: FnMut(&str),
{
    let mut decoder = Utf8ChunkDecoder::new();
    let mut chunks = 0;

    while let Some(bytes) = stream.next_chunk().await? {
        chunks += 1;
        let text = decoder.decode(&bytes);
        if !text.is_empty() {
            on_text(&text);
        }
    }

    let tail = decoder.finish();
    if !tail.is_empty() {
        on_text(&tail);
    }
    Ok(chunks)
}

/// Reply body backed by a browser `ReadableStream`.
#[cfg(feature = "csr")]
pub struct BrowserReply {
    reader: Option<web_sys::ReadableStreamDefaultReader>,
}

#[cfg(feature = "csr")]
impl BrowserReply {
    /// Wrap a response body. A missing body reads as an empty stream.
    pub fn new(body: Option<web_sys::ReadableStream>) -> Self {
        use wasm_bindgen::JsCast;

        let reader = body.map(|stream| stream.get_reader().unchecked_into::<web_sys::ReadableStreamDefaultReader>());
        Self { reader }
    }
}

#[cfg(feature = "csr")]
impl ReplyStream for BrowserReply {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ApiError> {
        use wasm_bindgen::JsValue;

        let Some(reader) = &self.reader else {
            return Ok(None);
        };

        let result = wasm_bindgen_futures::JsFuture::from(reader.read())
            .await
            .map_err(|e| ApiError::Stream(js_error_text(&e)))?;

        let done = js_sys::Reflect::get(&result, &JsValue::from_str("done"))
            .map_err(|e| ApiError::Stream(js_error_text(&e)))?
            .as_bool()
            .unwrap_or(true);
        if done {
            self.reader = None;
            return Ok(None);
        }

        let value = js_sys::Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| ApiError::Stream(js_error_text(&e)))?;
        Ok(Some(js_sys::Uint8Array::new(&value).to_vec()))
    }
}

#[cfg(feature = "csr")]
fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
