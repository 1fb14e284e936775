//! Device position: one-shot readings and continuous tracking

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::config::LocationConfig;
use crate::models::{Coordinate, LocationStatus};
use crate::outcome::Outcome;
use crate::{MamaeZenError, Result};

pub const PERMISSION_NOTICE: &str =
    "Permissão de localização negada. Ative o GPS nas configurações para navegar.";
pub const SIGNAL_NOTICE: &str = "Sinal de GPS fraco. Mostrando a última posição conhecida.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location request timed out")]
    Timeout,
    #[error("position unavailable: {0}")]
    SignalLost(String),
}

impl LocationError {
    #[must_use]
    pub fn status(&self) -> LocationStatus {
        match self {
            LocationError::PermissionDenied => LocationStatus::PermissionDenied,
            LocationError::Unsupported => LocationStatus::Unsupported,
            LocationError::Timeout | LocationError::SignalLost(_) => LocationStatus::SignalLost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl From<&LocationConfig> for PositionOptions {
    fn from(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_secs(config.timeout_seconds.into()),
        }
    }
}

pub type PositionStream = BoxStream<'static, std::result::Result<Coordinate, LocationError>>;

#[async_trait]
pub trait GeolocationDevice: Send + Sync {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> std::result::Result<Coordinate, LocationError>;

    /// Readings until the stream ends or the subscriber drops it
    fn watch_position(
        &self,
        options: PositionOptions,
    ) -> std::result::Result<PositionStream, LocationError>;
}

/// Delivered to the watch listener for every reading or error
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position(Coordinate),
    Error(LocationError),
}

pub type LocationListener = Arc<dyn Fn(&LocationUpdate) + Send + Sync>;

#[derive(Debug, Default)]
struct LocationState {
    last_known: Option<Coordinate>,
    status: LocationStatus,
    notice: Option<String>,
}

impl LocationState {
    fn record(&mut self, update: &LocationUpdate) {
        match update {
            LocationUpdate::Position(coordinate) => {
                self.last_known = Some(*coordinate);
                if self.status != LocationStatus::PermissionDenied {
                    self.status = LocationStatus::Active;
                    self.notice = None;
                }
            }
            LocationUpdate::Error(LocationError::PermissionDenied) => {
                self.status = LocationStatus::PermissionDenied;
                self.notice = Some(PERMISSION_NOTICE.to_string());
            }
            LocationUpdate::Error(e) => {
                if self.status != LocationStatus::PermissionDenied {
                    self.status = e.status();
                    self.notice = Some(SIGNAL_NOTICE.to_string());
                }
            }
        }
    }
}

fn lock(state: &Mutex<LocationState>) -> MutexGuard<'_, LocationState> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub struct LocationProvider {
    device: Arc<dyn GeolocationDevice>,
    options: PositionOptions,
    default_coordinate: Coordinate,
    state: Arc<Mutex<LocationState>>,
    watch: Option<JoinHandle<()>>,
}

impl LocationProvider {
    pub fn new(device: Arc<dyn GeolocationDevice>, config: &LocationConfig) -> Self {
        Self {
            device,
            options: PositionOptions::from(config),
            default_coordinate: config.default_coordinate(),
            state: Arc::new(Mutex::new(LocationState::default())),
            watch: None,
        }
    }

    /// Best-effort position. Failures substitute the last known or the default coordinate.
    #[instrument(skip(self))]
    pub async fn current_location(&self) -> Outcome<Coordinate> {
        let reading = tokio::time::timeout(
            self.options.timeout,
            self.device.current_position(self.options),
        )
        .await
        .unwrap_or(Err(LocationError::Timeout));

        let update = match reading {
            Ok(coordinate) => LocationUpdate::Position(coordinate),
            Err(e) => LocationUpdate::Error(e),
        };
        lock(&self.state).record(&update);

        match update {
            LocationUpdate::Position(coordinate) => {
                debug!(%coordinate, "Position acquired");
                Outcome::fresh(coordinate)
            }
            LocationUpdate::Error(e) => Outcome::fallback(self.coordinate(), e),
        }
    }

    /// Subscribe to continuous readings. A no-op while already watching.
    pub fn start_watching(&mut self, listener: Option<LocationListener>) -> Result<()> {
        if self.status() == LocationStatus::PermissionDenied {
            return Err(MamaeZenError::permission(PERMISSION_NOTICE));
        }
        if self.is_watching() {
            debug!("Location watch already active");
            return Ok(());
        }

        let mut positions = match self.device.watch_position(self.options) {
            Ok(stream) => stream,
            Err(e) => {
                let denied = e == LocationError::PermissionDenied;
                lock(&self.state).record(&LocationUpdate::Error(e.clone()));
                if denied {
                    return Err(MamaeZenError::permission(PERMISSION_NOTICE));
                }
                warn!("Location watch unavailable: {}", e);
                return Ok(());
            }
        };

        let state = self.state.clone();
        self.watch = Some(tokio::spawn(async move {
            while let Some(reading) = positions.next().await {
                let update = match reading {
                    Ok(coordinate) => LocationUpdate::Position(coordinate),
                    Err(e) => LocationUpdate::Error(e),
                };
                lock(&state).record(&update);
                if let Some(listener) = &listener {
                    listener(&update);
                }
                if update == LocationUpdate::Error(LocationError::PermissionDenied) {
                    warn!("Location permission revoked, stopping watch");
                    break;
                }
            }
            debug!("Location watch ended");
        }));
        info!("Location watch started");
        Ok(())
    }

    /// Idempotent
    pub fn stop_watching(&mut self) {
        if let Some(handle) = self.watch.take() {
            handle.abort();
            info!("Location watch stopped");
        }
    }

    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watch.as_ref().is_some_and(|h| !h.is_finished())
    }

    #[must_use]
    pub fn last_known(&self) -> Option<Coordinate> {
        lock(&self.state).last_known
    }

    /// Last known coordinate, or the default one when nothing was read yet
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.last_known().unwrap_or(self.default_coordinate)
    }

    #[must_use]
    pub fn default_coordinate(&self) -> Coordinate {
        self.default_coordinate
    }

    #[must_use]
    pub fn status(&self) -> LocationStatus {
        lock(&self.state).status
    }

    /// Latest permission or signal notice for the user
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        lock(&self.state).notice.clone()
    }
}

impl Drop for LocationProvider {
    fn drop(&mut self) {
        self.stop_watching();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::testing::{ScriptedGeolocation, settle};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn provider(device: &Arc<ScriptedGeolocation>) -> LocationProvider {
        LocationProvider::new(device.clone(), &LocationConfig::default())
    }

    #[tokio::test]
    async fn test_denied_reading_substitutes_default() {
        let device = Arc::new(ScriptedGeolocation::failing(LocationError::PermissionDenied));
        let provider = provider(&device);
        let outcome = provider.current_location().await;
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.into_value(),
            LocationConfig::default().default_coordinate()
        );
        assert_eq!(provider.status(), LocationStatus::PermissionDenied);
    }

    #[tokio::test]
    async fn test_successful_reading_is_active() {
        let device = Arc::new(ScriptedGeolocation::at(Coordinate::new(-22.9, -43.2)));
        let provider = provider(&device);
        let outcome = provider.current_location().await;
        assert!(!outcome.is_fallback());
        assert_eq!(provider.status(), LocationStatus::Active);
        assert_eq!(provider.last_known(), Some(Coordinate::new(-22.9, -43.2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_device_times_out() {
        let device = Arc::new(ScriptedGeolocation::hanging());
        let provider = provider(&device);
        let outcome = provider.current_location().await;
        assert!(outcome.is_fallback());
        assert_eq!(provider.status(), LocationStatus::SignalLost);
    }

    #[tokio::test]
    async fn test_watch_error_keeps_last_coordinate() {
        let device = Arc::new(ScriptedGeolocation::at(Coordinate::new(-23.0, -46.0)));
        let mut provider = provider(&device);
        provider.start_watching(None).unwrap();
        assert!(provider.is_watching());

        device.push(Ok(Coordinate::new(-23.1, -46.1)));
        settle().await;
        device.push(Err(LocationError::SignalLost("tunnel".to_string())));
        settle().await;

        assert_eq!(provider.last_known(), Some(Coordinate::new(-23.1, -46.1)));
        assert_eq!(provider.status(), LocationStatus::SignalLost);
        assert_eq!(provider.notice().as_deref(), Some(SIGNAL_NOTICE));

        device.push(Ok(Coordinate::new(-23.2, -46.2)));
        settle().await;
        assert_eq!(provider.status(), LocationStatus::Active);
        assert!(provider.notice().is_none());
    }

    #[tokio::test]
    async fn test_second_start_is_noop() {
        let device = Arc::new(ScriptedGeolocation::at(Coordinate::new(-23.0, -46.0)));
        let mut provider = provider(&device);
        provider.start_watching(None).unwrap();
        provider.start_watching(None).unwrap();
        assert_eq!(device.watch_count(), 1);

        provider.stop_watching();
        provider.stop_watching();
        assert!(!provider.is_watching());
    }

    #[tokio::test]
    async fn test_denial_during_watch_ends_loop_and_blocks_restart() {
        let device = Arc::new(ScriptedGeolocation::at(Coordinate::new(-23.0, -46.0)));
        let mut provider = provider(&device);
        let updates = Arc::new(AtomicUsize::new(0));
        let counter = updates.clone();
        provider
            .start_watching(Some(Arc::new(move |_: &LocationUpdate| {
                counter.fetch_add(1, Ordering::SeqCst);
            })))
            .unwrap();

        device.push(Err(LocationError::PermissionDenied));
        settle().await;
        device.push(Ok(Coordinate::new(-23.3, -46.3)));
        settle().await;

        assert_eq!(updates.load(Ordering::SeqCst), 1);
        assert!(!provider.is_watching());
        assert_eq!(provider.status(), LocationStatus::PermissionDenied);
        assert!(matches!(
            provider.start_watching(None),
            Err(MamaeZenError::Permission { .. })
        ));
        assert_eq!(device.watch_count(), 1);
    }
}
