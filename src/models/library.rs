//! Bundled reference records: ambient sound tracks and pregnancy weeks

use serde::{Deserialize, Serialize};

/// Category used to filter the sound library
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Baby,
    Nature,
    Womb,
    Mom,
}

impl SoundCategory {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SoundCategory::Womb => "Útero",
            SoundCategory::Baby => "Bebê",
            SoundCategory::Nature => "Natureza",
            SoundCategory::Mom => "Mamãe",
        }
    }
}

/// An ambient track played through the embedded video widget
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoundTrack {
    pub id: &'static str,
    pub title: &'static str,
    pub category: SoundCategory,
    /// Identifier of the video in the embed widget
    pub video_id: &'static str,
    pub duration: &'static str,
    /// Card background style
    pub color: &'static str,
}

/// Development facts for one tabulated pregnancy week
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyWeek {
    pub week: u8,
    pub size_comparison: &'static str,
    pub fruit: &'static str,
    pub weight: &'static str,
    pub length: &'static str,
    pub description: &'static str,
    pub development: &'static str,
    /// Foods to eat
    pub nutrition: &'static str,
    /// Foods or medicines to avoid
    pub avoid: &'static str,
    pub health_tip: &'static str,
}
