//! Chat with a specialist persona, answers streamed as they are produced

use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::gemini::{Content, GenerateContentRequest, GenerativeModel};
use crate::models::{ChatMessage, SpecialistType};
use crate::outcome::Outcome;
use crate::{MamaeZenError, Result};

/// Shown in place of an answer when the service cannot be reached
pub const CHAT_FALLBACK: &str = "Estou com dificuldade de conexão no momento, mas lembre-se: se for urgente, procure um médico presencial.";

pub struct SpecialistChat {
    model: Arc<dyn GenerativeModel>,
}

impl SpecialistChat {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Answer `message` in the role of `specialist`, given the earlier turns.
    ///
    /// Each fragment is handed to `on_fragment` as it arrives. If the stream
    /// breaks, the whole answer is replaced by [`CHAT_FALLBACK`].
    #[instrument(skip(self, history, message, on_fragment), fields(turns = history.len()))]
    pub async fn reply<F>(
        &self,
        specialist: SpecialistType,
        history: &[ChatMessage],
        message: &str,
        mut on_fragment: F,
    ) -> Result<Outcome<String>>
    where
        F: FnMut(&str) + Send,
    {
        let message = message.trim();
        if message.is_empty() {
            return Err(MamaeZenError::validation("A mensagem está vazia"));
        }

        let request = build_request(specialist, history, message);
        Ok(match self.collect(&request, &mut on_fragment).await {
            Ok(answer) => {
                info!("Specialist answered {} chars", answer.len());
                Outcome::fresh(answer)
            }
            Err(e) => Outcome::fallback(CHAT_FALLBACK.to_string(), e),
        })
    }

    async fn collect<F>(&self, request: &GenerateContentRequest, on_fragment: &mut F) -> Result<String>
    where
        F: FnMut(&str) + Send,
    {
        let mut stream = self.model.stream(request).await?;
        let mut answer = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            on_fragment(&fragment);
            answer.push_str(&fragment);
        }
        if answer.trim().is_empty() {
            return Err(MamaeZenError::api("Empty answer"));
        }
        Ok(answer)
    }
}

fn build_request(
    specialist: SpecialistType,
    history: &[ChatMessage],
    message: &str,
) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| Content::text(Some(m.role.as_str()), m.text.clone()))
        .collect();
    contents.push(Content::text(Some("user"), message));

    GenerateContentRequest {
        contents,
        ..GenerateContentRequest::default()
    }
    .system_instruction(specialist.instruction())
}

/// One chat screen: the persona and everything said so far
pub struct Conversation {
    specialist: SpecialistType,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(specialist: SpecialistType) -> Self {
        Self {
            specialist,
            history: Vec::new(),
        }
    }

    pub fn specialist(&self) -> SpecialistType {
        self.specialist
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send a message and record both sides of the exchange
    pub async fn send<F>(
        &mut self,
        chat: &SpecialistChat,
        message: &str,
        on_fragment: F,
    ) -> Result<Outcome<String>>
    where
        F: FnMut(&str) + Send,
    {
        let outcome = chat
            .reply(self.specialist, &self.history, message, on_fragment)
            .await?;
        self.history.push(ChatMessage::user(message.trim()));
        self.history.push(ChatMessage::model(outcome.value().clone()));
        Ok(outcome)
    }
}
