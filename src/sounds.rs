//! Ambient sound library played through an embedded video widget

use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

use crate::catalog::SOUND_TRACKS;
use crate::models::{SoundCategory, SoundTrack};
use crate::{MamaeZenError, Result};

/// Control surface of the embedded player
pub trait EmbedWidget: Send {
    fn load(&mut self, video_id: &str);
    fn play(&mut self);
    fn pause(&mut self);
}

/// Autoplaying, looping embed address for a track
#[must_use]
pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay=1&loop=1&playlist={video_id}&controls=0&enablejsapi=1"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SoundCategory),
}

impl FromStr for CategoryFilter {
    type Err = MamaeZenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "womb" => Ok(Self::Only(SoundCategory::Womb)),
            "baby" => Ok(Self::Only(SoundCategory::Baby)),
            "nature" => Ok(Self::Only(SoundCategory::Nature)),
            "mom" => Ok(Self::Only(SoundCategory::Mom)),
            other => Err(MamaeZenError::validation(format!(
                "Categoria desconhecida: {other}"
            ))),
        }
    }
}

/// Tracks in catalog order, restricted to `filter`
#[must_use]
pub fn tracks(filter: CategoryFilter) -> Vec<&'static SoundTrack> {
    SOUND_TRACKS
        .iter()
        .filter(|t| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => t.category == category,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub current_track: Option<&'static str>,
    pub playing: bool,
}

pub struct AmbientPlayer<W: EmbedWidget> {
    widget: W,
    current: Option<&'static SoundTrack>,
    playing: bool,
}

impl<W: EmbedWidget> AmbientPlayer<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            current: None,
            playing: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        PlayerState {
            current_track: self.current.map(|t| t.id),
            playing: self.playing,
        }
    }

    /// Clicking the current track toggles play/pause; any other track is loaded and played.
    pub fn click(&mut self, track_id: &str) -> Result<PlayerState> {
        let track = SOUND_TRACKS
            .iter()
            .find(|t| t.id == track_id)
            .ok_or_else(|| MamaeZenError::validation(format!("Som não encontrado: {track_id}")))?;

        match self.current {
            Some(current) if current.id == track.id => {
                if self.playing {
                    self.widget.pause();
                } else {
                    self.widget.play();
                }
                self.playing = !self.playing;
                debug!(track = track.id, playing = self.playing, "Toggled playback");
            }
            _ => {
                self.widget.load(track.video_id);
                self.widget.play();
                self.current = Some(track);
                self.playing = true;
                info!("Playing '{}'", track.title);
            }
        }
        Ok(self.state())
    }

    /// Pause whatever is playing, e.g. when leaving the screen
    pub fn stop(&mut self) {
        if self.playing {
            self.widget.pause();
            self.playing = false;
        }
    }
}
