//! Cry classification from a short recorded clip

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::gemini::{GenerateContentRequest, GenerativeModel};
use crate::models::CryAnalysis;
use crate::outcome::Outcome;
use crate::{MamaeZenError, Result};

const CRY_PROMPT: &str = r#"Você é uma IA especialista em desenvolvimento infantil e análise de choro de bebês.
Analise este áudio e identifique a causa mais provável do choro entre: FOME, DOR, FRALDA, SONO, ou INCÔMODO/TÉDIO.

Retorne APENAS um JSON com este formato:
{
  "category": "Motivo (ex: Fome)",
  "probability": número de 0 a 100,
  "advice": "Uma frase curta e acolhedora com a solução prática.",
  "emotionalTone": "Uma palavra sobre o estado emocional (ex: Estressado, Cansado)"
}"#;

/// An encoded audio recording
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Mime type guessed from a file extension, `audio/webm` when unknown
    #[must_use]
    pub fn mime_for_extension(extension: &str) -> &'static str {
        match extension.to_lowercase().as_str() {
            "wav" => "audio/wav",
            "mp3" => "audio/mp3",
            "ogg" | "oga" => "audio/ogg",
            "m4a" | "aac" => "audio/aac",
            "flac" => "audio/flac",
            _ => "audio/webm",
        }
    }
}

/// Microphone access. `start` fails with a permission error when access is refused.
#[async_trait]
pub trait AudioCapture: Send {
    async fn start(&mut self) -> Result<()>;
    async fn stop(&mut self) -> Result<AudioClip>;
}

/// Analysis used when the service cannot classify the clip
#[must_use]
pub fn fallback_analysis() -> CryAnalysis {
    CryAnalysis {
        category: "DOR / CÓLICA".to_string(),
        probability: 85.0,
        advice: "Parece desconforto abdominal. Tente fazer massagens circulares na barriguinha e 'bicicleta' com as pernas.".to_string(),
        emotional_tone: "Intenso".to_string(),
    }
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING" },
            "probability": { "type": "NUMBER" },
            "advice": { "type": "STRING" },
            "emotionalTone": { "type": "STRING" }
        },
        "required": ["category", "probability", "advice"]
    })
}

pub struct CryAnalyzer {
    model: Arc<dyn GenerativeModel>,
}

impl CryAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Classify a clip. An empty clip is rejected before any remote call.
    #[instrument(skip_all, fields(bytes = clip.bytes.len(), mime = %clip.mime_type))]
    pub async fn analyze(&self, clip: &AudioClip) -> Result<Outcome<CryAnalysis>> {
        if clip.bytes.is_empty() {
            return Err(MamaeZenError::validation("A gravação está vazia"));
        }

        let request = GenerateContentRequest::with_attachment(
            CRY_PROMPT,
            &clip.mime_type,
            STANDARD.encode(&clip.bytes),
        )
        .json_schema(response_schema());

        Ok(match self.classify(&request).await {
            Ok(analysis) => {
                info!(category = %analysis.category, "Cry classified");
                Outcome::fresh(analysis)
            }
            Err(e) => Outcome::fallback(fallback_analysis(), e),
        })
    }

    async fn classify(&self, request: &GenerateContentRequest) -> Result<CryAnalysis> {
        let text = self.model.generate(request).await?;
        let mut analysis: CryAnalysis = serde_json::from_str(text.trim())
            .map_err(|e| MamaeZenError::api(format!("Malformed cry analysis: {e}")))?;
        analysis.probability = analysis.probability.clamp(0.0, 100.0);
        Ok(analysis)
    }
}

/// Record-then-analyze flow of the cry screen
pub struct CryListener<C: AudioCapture> {
    capture: C,
    analyzer: Arc<CryAnalyzer>,
    recording: bool,
}

impl<C: AudioCapture> CryListener<C> {
    pub fn new(capture: C, analyzer: Arc<CryAnalyzer>) -> Self {
        Self {
            capture,
            analyzer,
            recording: false,
        }
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Start recording; a second call while recording does nothing
    pub async fn start_recording(&mut self) -> Result<()> {
        if self.recording {
            debug!("Already recording");
            return Ok(());
        }
        self.capture.start().await.map_err(|e| match e {
            MamaeZenError::Permission { .. } => MamaeZenError::permission(
                "Precisamos de acesso ao microfone para ouvir o bebê.",
            ),
            other => other,
        })?;
        self.recording = true;
        Ok(())
    }

    /// Stop recording and classify what was captured
    pub async fn stop_and_analyze(&mut self) -> Result<Outcome<CryAnalysis>> {
        if !self.recording {
            return Err(MamaeZenError::invalid_state("Nenhuma gravação em andamento"));
        }
        self.recording = false;
        let clip = self.capture.stop().await?;
        self.analyzer.analyze(&clip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::testing::ScriptedModel;

    struct FakeMicrophone {
        granted: bool,
        starts: usize,
    }

    #[async_trait]
    impl AudioCapture for FakeMicrophone {
        async fn start(&mut self) -> Result<()> {
            if !self.granted {
                return Err(MamaeZenError::permission("NotAllowedError"));
            }
            self.starts += 1;
            Ok(())
        }

        async fn stop(&mut self) -> Result<AudioClip> {
            Ok(AudioClip::new(vec![1, 2, 3, 4], "audio/webm"))
        }
    }

    fn analyzer(model: ScriptedModel) -> (Arc<ScriptedModel>, Arc<CryAnalyzer>) {
        let model = Arc::new(model);
        (model.clone(), Arc::new(CryAnalyzer::new(model)))
    }

    #[tokio::test]
    async fn test_service_failure_returns_fallback() {
        let (_, analyzer) = analyzer(ScriptedModel::unreachable());
        let outcome = analyzer
            .analyze(&AudioClip::new(vec![0; 16], "audio/webm"))
            .await
            .unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value().category, "DOR / CÓLICA");
        assert_eq!(outcome.value().probability, 85.0);
    }

    #[tokio::test]
    async fn test_valid_answer_is_used() {
        let (model, analyzer) = analyzer(ScriptedModel::replying(vec![Ok(
            r#"{"category":"FOME","probability":140,"advice":"Ofereça o peito.","emotionalTone":"Agitado"}"#
                .to_string(),
        )]));
        let outcome = analyzer
            .analyze(&AudioClip::new(vec![9; 8], "audio/webm"))
            .await
            .unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().category, "FOME");
        assert_eq!(outcome.value().probability, 100.0);

        let request = model.last_request().unwrap();
        let inline = request.contents[0].parts[0].inline_data.clone().unwrap();
        assert_eq!(inline.data, STANDARD.encode([9u8; 8]));
    }

    #[tokio::test]
    async fn test_empty_clip_is_rejected_locally() {
        let (model, analyzer) = analyzer(ScriptedModel::unreachable());
        let result = analyzer.analyze(&AudioClip::new(Vec::new(), "audio/webm")).await;
        assert!(matches!(result, Err(MamaeZenError::Validation { .. })));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_microphone_denied_surfaces_permission_error() {
        let (_, analyzer) = analyzer(ScriptedModel::unreachable());
        let mut listener = CryListener::new(
            FakeMicrophone {
                granted: false,
                starts: 0,
            },
            analyzer,
        );
        let err = listener.start_recording().await.unwrap_err();
        assert!(err.user_message().contains("microfone"));
        assert!(!listener.is_recording());
    }

    #[tokio::test]
    async fn test_record_then_analyze() {
        let (_, analyzer) = analyzer(ScriptedModel::unreachable());
        let mut listener = CryListener::new(
            FakeMicrophone {
                granted: true,
                starts: 0,
            },
            analyzer,
        );
        listener.start_recording().await.unwrap();
        listener.start_recording().await.unwrap();
        assert_eq!(listener.capture.starts, 1);

        let outcome = listener.stop_and_analyze().await.unwrap();
        assert!(outcome.is_fallback());
        assert!(!listener.is_recording());
        assert!(listener.stop_and_analyze().await.is_err());
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(AudioClip::mime_for_extension("WAV"), "audio/wav");
        assert_eq!(AudioClip::mime_for_extension("weird"), "audio/webm");
    }
}
