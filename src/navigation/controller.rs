//! State machine of the places screen: list, search, and guided navigation

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use super::comfort::ComfortPhraseScheduler;
use super::location::{LocationProvider, PERMISSION_NOTICE};
use super::route::{RouteInputs, RouteView};
use super::speech::SpeechAnnouncer;
use crate::catalog::NAVIGATION_GREETING;
use crate::config::NavigationConfig;
use crate::models::{Coordinate, LocationStatus, Place};
use crate::outcome::Outcome;
use crate::places::{CATEGORY_SHORTCUTS, EMERGENCY_QUERY, PlaceSearchClient};
use crate::{MamaeZenError, Result};

const GREETING_RATE: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationState {
    List,
    Searching,
    StartingNavigation,
    Guided,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSession {
    pub selected_place: Place,
    pub origin: Coordinate,
    pub started_at: DateTime<Utc>,
}

pub struct NavigationController {
    search: Arc<PlaceSearchClient>,
    location: LocationProvider,
    announcer: SpeechAnnouncer,
    scheduler: ComfortPhraseScheduler,
    greeting_pause: Duration,
    state: NavigationState,
    places: Vec<Place>,
    session: Option<NavigationSession>,
}

impl NavigationController {
    pub fn new(
        search: Arc<PlaceSearchClient>,
        location: LocationProvider,
        announcer: SpeechAnnouncer,
        config: &NavigationConfig,
    ) -> Result<Self> {
        let scheduler = ComfortPhraseScheduler::new(
            announcer.clone(),
            config.comfort_interval(),
            config.comfort_display(),
        )?;
        Ok(Self {
            search,
            location,
            announcer,
            scheduler,
            greeting_pause: config.greeting_pause(),
            state: NavigationState::List,
            places: Vec::new(),
            session: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn location_status(&self) -> LocationStatus {
        self.location.status()
    }

    #[must_use]
    pub fn location(&self) -> &LocationProvider {
        &self.location
    }

    /// Search near the current position; results replace the list
    #[instrument(skip(self))]
    pub async fn search(&mut self, query: &str) -> Result<Outcome<Vec<Place>>> {
        self.require(NavigationState::List)?;
        if query.trim().is_empty() {
            return Ok(Outcome::fresh(self.places.clone()));
        }

        let searching = SearchingGuard::enter(&mut self.state);
        let origin = self.location.current_location().await.into_value();
        let outcome = self.search.search(query, origin).await;
        drop(searching);

        self.places = outcome.value().clone();
        Ok(outcome)
    }

    /// One of the shortcut buttons under the search box
    pub async fn search_category(&mut self, label: &str) -> Result<Outcome<Vec<Place>>> {
        if !CATEGORY_SHORTCUTS.iter().any(|(name, _)| *name == label) {
            return Err(MamaeZenError::validation(format!("Categoria desconhecida: {label}")));
        }
        self.search(label).await
    }

    /// Emergency search for maternity hospitals
    pub async fn sos(&mut self) -> Result<Outcome<Vec<Place>>> {
        warn!("SOS requested");
        self.search(EMERGENCY_QUERY).await
    }

    /// Select a place from the list and run the greeting before guidance starts.
    ///
    /// Refused while location permission is denied; the state is left unchanged.
    #[instrument(skip(self))]
    pub async fn start_navigation(&mut self, place_id: &str) -> Result<()> {
        self.require(NavigationState::List)?;
        let place = self
            .places
            .iter()
            .find(|p| p.id == place_id)
            .cloned()
            .ok_or_else(|| MamaeZenError::validation(format!("Local não encontrado: {place_id}")))?;

        if self.location.status() == LocationStatus::PermissionDenied {
            return Err(MamaeZenError::permission(PERMISSION_NOTICE));
        }

        info!("Starting navigation to '{}'", place.name);
        self.session = Some(NavigationSession {
            selected_place: place,
            origin: self.location.coordinate(),
            started_at: Utc::now(),
        });
        self.state = NavigationState::StartingNavigation;

        self.announcer.cancel_all();
        sleep(self.greeting_pause).await;
        let speaking = self.announcer.say(NAVIGATION_GREETING, GREETING_RATE);
        sleep(speaking).await;

        self.enter_guided();
        Ok(())
    }

    fn enter_guided(&mut self) {
        if self.location.status() != LocationStatus::PermissionDenied
            && let Err(e) = self.location.start_watching(None)
        {
            warn!("Guidance continues without live tracking: {}", e);
        }
        self.scheduler.start();
        self.state = NavigationState::Guided;
    }

    /// Leave guidance and return to the previous results
    pub fn exit(&mut self) {
        if !matches!(
            self.state,
            NavigationState::StartingNavigation | NavigationState::Guided
        ) {
            return;
        }
        self.announcer.cancel_all();
        self.scheduler.stop();
        self.location.stop_watching();
        self.session = None;
        self.state = NavigationState::List;
        info!("Navigation ended");
    }

    /// Route overlay while guided, keyed by the selected place and latest coordinate
    #[must_use]
    pub fn route_view(&self) -> Option<RouteView> {
        if self.state != NavigationState::Guided {
            return None;
        }
        let session = self.session.as_ref()?;
        Some(RouteView::build(RouteInputs {
            place: &session.selected_place,
            origin: self.location.last_known().unwrap_or(session.origin),
            fallback_destination: self.location.default_coordinate(),
            comfort_phrase: self.scheduler.displayed_phrase(),
            gps_status: self.location.status(),
            notice: self.location.notice(),
        }))
    }

    fn require(&self, expected: NavigationState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(MamaeZenError::invalid_state(format!(
                "Operação indisponível no estado {:?}",
                self.state
            )))
        }
    }
}

/// Holds `Searching` while a search is in flight; back to `List` even if the future is dropped.
struct SearchingGuard<'a> {
    state: &'a mut NavigationState,
}

impl<'a> SearchingGuard<'a> {
    fn enter(state: &'a mut NavigationState) -> Self {
        *state = NavigationState::Searching;
        Self { state }
    }
}

impl Drop for SearchingGuard<'_> {
    fn drop(&mut self) {
        *self.state = NavigationState::List;
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.exit();
        self.announcer.cancel_all();
    }
}
