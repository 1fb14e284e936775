//! Terminal stand-ins for the device capabilities used by the CLI

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use std::time::Duration;
use tracing::info;

use super::location::{GeolocationDevice, LocationError, PositionOptions, PositionStream};
use super::speech::{SpeechEngine, Utterance};
use crate::models::Coordinate;
use crate::sounds::{EmbedWidget, embed_url};

/// Speech printed through the log instead of a synthesizer
#[derive(Debug, Default)]
pub struct LoggedSpeech;

impl SpeechEngine for LoggedSpeech {
    fn speak(&self, utterance: Utterance) {
        info!(lang = %utterance.lang, rate = utterance.rate, "🔊 {}", utterance.text);
    }

    fn cancel(&self) {
        tracing::debug!("Speech cancelled");
    }
}

/// A device parked at a fixed position, reporting it again every `period` while watched
#[derive(Debug, Clone)]
pub struct FixedGeolocation {
    position: Option<Coordinate>,
    period: Duration,
}

impl FixedGeolocation {
    #[must_use]
    pub fn new(position: Coordinate, period: Duration) -> Self {
        Self {
            position: Some(position),
            period,
        }
    }

    /// A device without any positioning support
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            position: None,
            period: Duration::from_secs(1),
        }
    }
}

#[async_trait]
impl GeolocationDevice for FixedGeolocation {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> std::result::Result<Coordinate, LocationError> {
        self.position.ok_or(LocationError::Unsupported)
    }

    fn watch_position(
        &self,
        _options: PositionOptions,
    ) -> std::result::Result<PositionStream, LocationError> {
        let position = self.position.ok_or(LocationError::Unsupported)?;
        let period = self.period;
        Ok(stream::unfold((), move |()| async move {
            tokio::time::sleep(period).await;
            Some((Ok(position), ()))
        })
        .boxed())
    }
}

/// Player widget that logs what an embedded player would do
#[derive(Debug, Default)]
pub struct LoggedWidget {
    loaded: Option<String>,
}

impl EmbedWidget for LoggedWidget {
    fn load(&mut self, video_id: &str) {
        info!("Loading {}", embed_url(video_id));
        self.loaded = Some(video_id.to_string());
    }

    fn play(&mut self) {
        info!("▶ Playing {}", self.loaded.as_deref().unwrap_or("-"));
    }

    fn pause(&mut self) {
        info!("⏸ Paused {}", self.loaded.as_deref().unwrap_or("-"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_device_repeats_position() {
        let here = Coordinate::new(-23.5, -46.6);
        let device = FixedGeolocation::new(here, Duration::from_secs(5));
        let options = PositionOptions {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
        };
        assert_eq!(device.current_position(options).await, Ok(here));

        let readings: Vec<_> = device
            .watch_position(options)
            .unwrap()
            .take(2)
            .collect()
            .await;
        assert_eq!(readings, vec![Ok(here), Ok(here)]);
    }

    #[tokio::test]
    async fn test_unsupported_device() {
        let device = FixedGeolocation::unsupported();
        let options = PositionOptions {
            high_accuracy: false,
            timeout: Duration::from_secs(1),
        };
        assert_eq!(
            device.current_position(options).await,
            Err(LocationError::Unsupported)
        );
        assert!(device.watch_position(options).is_err());
    }
}
