//! Records produced by the care features: recipes, cry analysis and specialist chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe or food suggestion
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Why this helps with what was asked
    #[serde(default)]
    pub benefits: String,
}

/// Classification of a recorded cry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CryAnalysis {
    /// Most likely cause, e.g. "FOME"
    pub category: String,
    /// Confidence from 0 to 100
    pub probability: f32,
    /// Short practical advice
    pub advice: String,
    #[serde(default)]
    pub emotional_tone: String,
}

/// The professional persona a chat talks to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpecialistType {
    Pediatrician,
    Psychologist,
    Nutritionist,
}

impl SpecialistType {
    pub const ALL: [SpecialistType; 3] = [
        SpecialistType::Pediatrician,
        SpecialistType::Psychologist,
        SpecialistType::Nutritionist,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            SpecialistType::Pediatrician => "Pediatra",
            SpecialistType::Psychologist => "Psicóloga",
            SpecialistType::Nutritionist => "Nutricionista",
        }
    }

    /// Role instruction sent as the system prompt
    #[must_use]
    pub fn instruction(&self) -> &'static str {
        match self {
            SpecialistType::Nutritionist => {
                "Você é uma Nutricionista Pediátrica especialista em introdução alimentar e nutrição infantil. Seja gentil, use emojis, e dê dicas práticas e saudáveis."
            }
            SpecialistType::Psychologist => {
                "Você é uma Psicóloga Perinatal especialista em maternidade. Seu foco é a saúde mental da mãe. Seja acolhedora, valide os sentimentos, ofereça escuta ativa e técnicas de redução de ansiedade."
            }
            SpecialistType::Pediatrician => {
                "Você é uma Pediatra experiente. Ajude com triagem de sintomas, marcos de desenvolvimento e vacinas. IMPORTANTE: Para casos graves ou emergências, SEMPRE recomende ir ao pronto-socorro imediatamente. Nunca substitua uma consulta presencial."
            }
        }
    }
}

/// Who wrote a chat message
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cry_analysis_accepts_model_json() {
        let json = r#"{"category":"FOME","probability":72,"advice":"Ofereça o peito.","emotionalTone":"Agitado"}"#;
        let analysis: CryAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.category, "FOME");
        assert_eq!(analysis.probability, 72.0);
        assert_eq!(analysis.emotional_tone, "Agitado");
    }

    #[test]
    fn test_cry_analysis_tone_is_optional() {
        let json = r#"{"category":"SONO","probability":60,"advice":"Diminua as luzes."}"#;
        let analysis: CryAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.emotional_tone.is_empty());
    }

    #[test]
    fn test_pediatrician_instruction_mentions_emergency() {
        assert!(SpecialistType::Pediatrician.instruction().contains("pronto-socorro"));
    }

    #[test]
    fn test_specialist_serde_names() {
        let json = serde_json::to_string(&SpecialistType::Psychologist).unwrap();
        assert_eq!(json, "\"psychologist\"");
    }
}
