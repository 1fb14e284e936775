use crate::models::{Coordinate, Place, PlaceCategory};

/// Places shown whenever the grounding service cannot produce results
#[must_use]
pub fn fallback_places() -> Vec<Place> {
    vec![
        Place {
            id: "hosp_1".to_string(),
            name: "Hospital Maternidade Modelo".to_string(),
            address: "Av. Principal, 1000 - Centro".to_string(),
            rating: 4.9,
            is_open: true,
            distance_label: "1.2 km".to_string(),
            coordinate: Some(Coordinate::new(-23.5505, -46.6333)),
            category: PlaceCategory::Hospital,
        },
        Place {
            id: "hosp_2".to_string(),
            name: "Pronto Socorro Infantil 24h".to_string(),
            address: "Rua da Saúde, 500".to_string(),
            rating: 4.8,
            is_open: true,
            distance_label: "2.5 km".to_string(),
            coordinate: Some(Coordinate::new(-23.5605, -46.6433)),
            category: PlaceCategory::Hospital,
        },
        Place {
            id: "pharm_1".to_string(),
            name: "Farmácia Plantão 24h".to_string(),
            address: "Rua dos Remédios, 123".to_string(),
            rating: 4.5,
            is_open: true,
            distance_label: "0.5 km".to_string(),
            coordinate: Some(Coordinate::new(-23.5555, -46.6355)),
            category: PlaceCategory::Pharmacy,
        },
    ]
}
