//! Data models for the MamaeZen service
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and device location status
//! - Place: nearby search results
//! - Care: recipes, cry analysis and specialist chat records
//! - Library: bundled sound tracks and pregnancy weeks

pub mod care;
pub mod library;
pub mod location;
pub mod place;

pub use care::{ChatMessage, ChatRole, CryAnalysis, Recipe, SpecialistType};
pub use library::{PregnancyWeek, SoundCategory, SoundTrack};
pub use location::{Coordinate, LocationStatus};
pub use place::{Place, PlaceCategory};
