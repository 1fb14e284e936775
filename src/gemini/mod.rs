//! Generative AI client for the Gemini REST API
//!
//! Every feature that asks the model something goes through the
//! [`GenerativeModel`] trait, so the services can be exercised against a
//! scripted model in tests. Failures are plain errors here; the services
//! decide what bundled data replaces them.

pub mod types;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::{Client, Response};
use std::collections::VecDeque;
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::{MamaeZenError, Result};
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

/// Fragments of a streamed answer, in arrival order
pub type TextStream = BoxStream<'static, Result<String>>;

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Complete answer text for a request
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String>;

    /// Answer text delivered as it is produced
    async fn stream(&self, request: &GenerateContentRequest) -> Result<TextStream>;
}

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("MamaeZen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MamaeZenError::config(format!("Failed to create HTTP client: {e}")))?;

        if config.api_key.is_none() {
            warn!("No Gemini API key configured, every AI feature will serve bundled data");
        }

        Ok(Self { client, config })
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            method
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| MamaeZenError::config("Gemini API key is not configured"))
    }

    async fn post(&self, url: &str, request: &GenerateContentRequest) -> Result<Response> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key()?)
            .json(request)
            .send()
            .await
            .map_err(|e| MamaeZenError::api(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => MamaeZenError::config(format!("Gemini rejected the API key ({status})")),
            429 => MamaeZenError::api("Gemini rate limit exceeded"),
            _ => MamaeZenError::api(format!("Gemini API error {status}: {body}")),
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String> {
        let start_time = Instant::now();
        let response = self.post(&self.endpoint("generateContent"), request).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| MamaeZenError::api(format!("Invalid Gemini response: {e}")))?;

        let text = body.text();
        if text.trim().is_empty() {
            return Err(MamaeZenError::api("Gemini returned no text"));
        }

        info!(
            "Gemini answered {} chars in {:.3}s",
            text.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(text)
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn stream(&self, request: &GenerateContentRequest) -> Result<TextStream> {
        let url = format!("{}?alt=sse", self.endpoint("streamGenerateContent"));
        let response = self.post(&url, request).await?;
        debug!("Gemini stream opened");
        Ok(sse_text_stream(response.bytes_stream()))
    }
}

struct SseState {
    source: BoxStream<'static, std::result::Result<Vec<u8>, String>>,
    buffer: Vec<u8>,
    pending: VecDeque<Result<String>>,
    done: bool,
}

impl SseState {
    fn drain_lines(&mut self) {
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.handle_line(&line);
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.handle_line(&line);
        }
    }

    fn handle_line(&mut self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let Some(payload) = line.trim_end_matches(['\r', '\n']).strip_prefix("data:") else {
            return;
        };
        match serde_json::from_str::<GenerateContentResponse>(payload.trim()) {
            Ok(event) => {
                let text = event.text();
                if !text.is_empty() {
                    self.pending.push_back(Ok(text));
                }
            }
            Err(e) => self
                .pending
                .push_back(Err(MamaeZenError::api(format!("Malformed stream event: {e}")))),
        }
    }
}

/// Turn a server-sent-event byte stream into the text fragments it carries
pub fn sse_text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: futures::Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Display,
{
    let source = bytes
        .map(|chunk| chunk.map(|b| b.as_ref().to_vec()).map_err(|e| e.to_string()))
        .boxed();

    let state = SseState {
        source,
        buffer: Vec::new(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.done {
                return None;
            }
            match state.source.next().await {
                Some(Ok(chunk)) => {
                    state.buffer.extend_from_slice(&chunk);
                    state.drain_lines();
                }
                Some(Err(e)) => {
                    state.done = true;
                    state
                        .pending
                        .push_back(Err(MamaeZenError::api(format!("Stream interrupted: {e}"))));
                }
                None => {
                    state.done = true;
                    state.flush();
                }
            }
        }
    })
    .boxed()
}
