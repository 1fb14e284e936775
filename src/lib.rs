//! `MamaeZen` - companion service for new and expecting parents
//!
//! This library provides nearby place search with guided navigation, a
//! specialist chat, cry classification, recipe suggestions, an ambient sound
//! library and a pregnancy week tracker. Every feature backed by the
//! generative AI service falls back to bundled data when the service fails.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod cry;
pub mod error;
pub mod gemini;
pub mod models;
pub mod navigation;
pub mod outcome;
pub mod places;
pub mod pregnancy;
pub mod recipes;
pub mod sounds;
pub mod specialist;
pub mod storage;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use app::AppView;
pub use config::MamaeZenConfig;
pub use cry::{AudioCapture, AudioClip, CryAnalyzer, CryListener};
pub use error::MamaeZenError;
pub use gemini::{GeminiClient, GenerativeModel};
pub use models::{Coordinate, LocationStatus, Place, PlaceCategory};
pub use navigation::{NavigationController, NavigationState};
pub use outcome::Outcome;
pub use places::PlaceSearchClient;
pub use pregnancy::{PregnancyProgress, PregnancyTracker};
pub use recipes::RecipeFinder;
pub use sounds::AmbientPlayer;
pub use specialist::{Conversation, SpecialistChat};
pub use storage::{FjallPreferenceStore, MemoryPreferenceStore, PreferenceStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MamaeZenError>;
