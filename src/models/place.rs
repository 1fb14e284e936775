//! Places returned by a nearby search

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Kind of place a search result points at
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    #[default]
    Hospital,
    Pharmacy,
    Park,
    Store,
}

impl PlaceCategory {
    /// Lenient mapping for free-form category names produced by the model
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("pharm") || label.contains("farm") || label.contains("drug") {
            PlaceCategory::Pharmacy
        } else if label.contains("park") || label.contains("parq") {
            PlaceCategory::Park
        } else if label.contains("store") || label.contains("shop") || label.contains("loja") {
            PlaceCategory::Store
        } else {
            PlaceCategory::Hospital
        }
    }
}

/// A search result, either from the grounding service or the bundled list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Rating from 0 to 5
    pub rating: f32,
    pub is_open: bool,
    /// Human readable distance, e.g. "1.2 km"
    pub distance_label: String,
    pub coordinate: Option<Coordinate>,
    pub category: PlaceCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label() {
        assert_eq!(PlaceCategory::from_label("hospital"), PlaceCategory::Hospital);
        assert_eq!(PlaceCategory::from_label("Farmácia"), PlaceCategory::Pharmacy);
        assert_eq!(PlaceCategory::from_label("pharmacy"), PlaceCategory::Pharmacy);
        assert_eq!(PlaceCategory::from_label("Parque"), PlaceCategory::Park);
        assert_eq!(PlaceCategory::from_label("baby store"), PlaceCategory::Store);
        assert_eq!(PlaceCategory::from_label("unknown"), PlaceCategory::Hospital);
    }
}
