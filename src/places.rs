//! Nearby place search grounded in map data
//!
//! A search never fails towards the caller: transport errors, malformed
//! answers and empty result sets all resolve to the bundled place list.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::catalog;
use crate::gemini::{GenerateContentRequest, GenerativeModel};
use crate::models::{Coordinate, Place, PlaceCategory};
use crate::outcome::Outcome;
use crate::{MamaeZenError, Result};

/// Query issued by the SOS button
pub const EMERGENCY_QUERY: &str = "Hospital Maternidade Emergência";

/// Shortcut buttons under the search box: label and icon
pub const CATEGORY_SHORTCUTS: [(&str, &str); 4] = [
    ("Hospitais", "🏥"),
    ("Farmácia 24h", "💊"),
    ("Pediatra", "🩺"),
    ("Parques", "🌳"),
];

/// Shape the model is asked to answer with
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundedPlace {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    is_open: Option<bool>,
    #[serde(default)]
    distance: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl GroundedPlace {
    fn into_place(self, index: usize) -> Place {
        let coordinate = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)).filter(Coordinate::is_valid),
            _ => None,
        };
        Place {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("place_{index}")),
            name: self.name,
            address: self.address,
            rating: self.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            is_open: self.is_open.unwrap_or(false),
            distance_label: self.distance.unwrap_or_else(|| "Perto".to_string()),
            coordinate,
            category: self
                .kind
                .as_deref()
                .map(PlaceCategory::from_label)
                .unwrap_or_default(),
        }
    }
}

pub struct PlaceSearchClient {
    model: Arc<dyn GenerativeModel>,
    max_results: usize,
}

impl PlaceSearchClient {
    pub fn new(model: Arc<dyn GenerativeModel>, max_results: usize) -> Self {
        Self { model, max_results }
    }

    /// Search near `origin`. A blank query yields no results and no remote call.
    #[instrument(skip(self, origin), fields(origin = %origin))]
    pub async fn search(&self, query: &str, origin: Coordinate) -> Outcome<Vec<Place>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring blank place query");
            return Outcome::fresh(Vec::new());
        }

        match self.find_places(query, &origin).await {
            Ok(places) => {
                info!("Found {} places for '{}'", places.len(), query);
                Outcome::fresh(places)
            }
            Err(e) => Outcome::fallback(catalog::fallback_places(), e),
        }
    }

    /// Emergency search with whatever coordinate is available
    pub async fn sos(&self, origin: Coordinate) -> Outcome<Vec<Place>> {
        self.search(EMERGENCY_QUERY, origin).await
    }

    async fn find_places(&self, query: &str, origin: &Coordinate) -> Result<Vec<Place>> {
        let request = GenerateContentRequest::prompt(build_prompt(query, origin, self.max_results))
            .maps_grounding(origin);
        let text = self.model.generate(&request).await?;

        let mut places = parse_places(&text)?;
        if places.is_empty() {
            return Err(MamaeZenError::api("Empty results"));
        }
        places.truncate(self.max_results);
        Ok(places)
    }
}

fn build_prompt(query: &str, origin: &Coordinate, max_results: usize) -> String {
    format!(
        r#"Find the closest and most relevant places for "{query}" near latitude {lat}, longitude {lng}.
Prioritize emergency services if the query mentions 'Hospital' or 'Emergency'.

Return a JSON array of the top {max_results} results.
Structure:
{{
  "id": "unique_id",
  "name": "Place Name",
  "address": "Full Address",
  "rating": 4.5,
  "isOpen": true,
  "distance": "Estimated distance (e.g. 2.5 km)",
  "lat": {lat},
  "lng": {lng},
  "type": "hospital"
}}
IMPORTANT: Return ONLY the JSON array string. No markdown."#,
        lat = origin.latitude,
        lng = origin.longitude,
    )
}

/// Parse the model's answer, tolerating markdown code fences around the array
fn parse_places(text: &str) -> Result<Vec<Place>> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let grounded: Vec<GroundedPlace> = serde_json::from_str(cleaned.trim())
        .map_err(|e| MamaeZenError::api(format!("Malformed places answer: {e}")))?;
    Ok(grounded
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.into_place(i))
        .collect())
}
