//! Recipe suggestions: bundled keyword matches first, then the model

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::catalog::recipes::{colic_tea, match_keywords};
use crate::gemini::{GenerateContentRequest, GenerativeModel};
use crate::models::Recipe;
use crate::outcome::Outcome;
use crate::{MamaeZenError, Result};

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "instructions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "benefits": { "type": "STRING" }
        },
        "required": ["title", "description", "ingredients", "instructions", "benefits"]
    })
}

pub struct RecipeFinder {
    model: Arc<dyn GenerativeModel>,
}

impl RecipeFinder {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Find a recipe for a free-text need such as "cólica" or "aumentar leite".
    ///
    /// Queries that hit a bundled keyword never reach the model.
    #[instrument(skip(self))]
    pub async fn find(&self, query: &str) -> Result<Outcome<Recipe>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MamaeZenError::validation("Digite o que você procura"));
        }

        if let Some(recipe) = match_keywords(query) {
            debug!(title = %recipe.title, "Bundled recipe matched");
            return Ok(Outcome::fresh(recipe));
        }

        Ok(match self.generate(query).await {
            Ok(recipe) => Outcome::fresh(recipe),
            Err(e) => Outcome::fallback(colic_tea(), e),
        })
    }

    async fn generate(&self, query: &str) -> Result<Recipe> {
        let prompt = format!(
            "Crie uma receita ou sugestão alimentar para: \"{query}\". Considere o contexto de maternidade/bebês/família."
        );
        let request = GenerateContentRequest::prompt(prompt).json_schema(response_schema());
        let text = self.model.generate(&request).await?;
        serde_json::from_str(text.trim())
            .map_err(|e| MamaeZenError::api(format!("Malformed recipe: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::testing::ScriptedModel;

    #[tokio::test]
    async fn test_keyword_match_skips_model() {
        let model = Arc::new(ScriptedModel::unreachable());
        let finder = RecipeFinder::new(model.clone());
        let outcome = finder.find("Dormir melhor").await.unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().title, "Ritual do Soninho (Chá de Camomila)");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_generated_recipe_is_used() {
        let model = Arc::new(ScriptedModel::replying(vec![Ok(r#"{
            "title": "Papinha de Abóbora",
            "description": "Primeira papinha salgada.",
            "ingredients": ["Abóbora", "Água"],
            "instructions": ["Cozinhe", "Amasse"],
            "benefits": "Rica em vitamina A."
        }"#
        .to_string())]));
        let finder = RecipeFinder::new(model.clone());
        let outcome = finder.find("papinha 6 meses").await.unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().ingredients.len(), 2);

        let prompt = model.last_request().unwrap().contents[0].parts[0]
            .text
            .clone()
            .unwrap();
        assert!(prompt.contains("\"papinha 6 meses\""));
    }

    #[tokio::test]
    async fn test_partial_recipe_is_kept() {
        let model = Arc::new(ScriptedModel::replying(vec![Ok(r#"{
            "title": "Vitamina de Banana",
            "ingredients": ["Banana", "Aveia"],
            "instructions": ["Bata tudo"]
        }"#
        .to_string())]));
        let finder = RecipeFinder::new(model.clone());
        let outcome = finder.find("lanche rápido").await.unwrap();
        assert!(!outcome.is_fallback());
        let recipe = outcome.into_value();
        assert_eq!(recipe.title, "Vitamina de Banana");
        assert!(recipe.benefits.is_empty());

        let config = model.last_request().unwrap().generation_config.unwrap();
        assert_eq!(config.response_schema.unwrap()["required"][0], "title");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_colic_tea() {
        let finder = RecipeFinder::new(Arc::new(ScriptedModel::replying(vec![Ok(
            "não sei".to_string(),
        )])));
        let outcome = finder.find("bolo de cenoura").await.unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_value(), colic_tea());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let model = Arc::new(ScriptedModel::unreachable());
        let finder = RecipeFinder::new(model.clone());
        assert!(finder.find("  ").await.is_err());
        assert_eq!(model.calls(), 0);
    }
}
