//! Place search and guided navigation
//!
//! The [`NavigationController`] owns every resource of a guided session: the
//! location watch, the comfort-phrase timer and the speech channel. Device
//! capabilities come in as trait objects so the same controller runs against
//! the CLI devices in [`devices`] and against fakes in tests.

pub mod comfort;
pub mod controller;
pub mod devices;
pub mod location;
pub mod route;
pub mod speech;

pub use comfort::ComfortPhraseScheduler;
pub use controller::{NavigationController, NavigationSession, NavigationState};
pub use location::{
    GeolocationDevice, LocationError, LocationListener, LocationProvider, LocationUpdate,
    PositionOptions, PositionStream,
};
pub use route::{RouteView, map_embed_url};
pub use speech::{SpeechAnnouncer, SpeechEngine, Utterance};

#[cfg(test)]
pub(crate) mod testing {
    //! Fake devices shared by the navigation tests

    use super::*;
    use crate::models::Coordinate;
    use async_trait::async_trait;
    use futures::StreamExt;
    use futures::channel::mpsc::{UnboundedSender, unbounded};
    use std::sync::Mutex;

    /// Let spawned tasks observe what the test just did
    pub async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    /// Records utterances and counts any that start while another is still audible
    #[derive(Default)]
    pub struct RecordingSpeech {
        spoken: Mutex<Vec<Utterance>>,
        current: Mutex<Option<String>>,
        overlaps: Mutex<usize>,
    }

    impl RecordingSpeech {
        pub fn spoken(&self) -> Vec<String> {
            self.spoken
                .lock()
                .unwrap()
                .iter()
                .map(|u| u.text.clone())
                .collect()
        }

        pub fn last_utterance(&self) -> Option<Utterance> {
            self.spoken.lock().unwrap().last().cloned()
        }

        pub fn current(&self) -> Option<String> {
            self.current.lock().unwrap().clone()
        }

        pub fn overlaps(&self) -> usize {
            *self.overlaps.lock().unwrap()
        }
    }

    impl SpeechEngine for RecordingSpeech {
        fn speak(&self, utterance: Utterance) {
            let mut current = self.current.lock().unwrap();
            if current.is_some() {
                *self.overlaps.lock().unwrap() += 1;
            }
            *current = Some(utterance.text.clone());
            self.spoken.lock().unwrap().push(utterance);
        }

        fn cancel(&self) {
            *self.current.lock().unwrap() = None;
        }
    }

    enum Reading {
        Fixed(std::result::Result<Coordinate, LocationError>),
        Hanging,
    }

    /// Answers one-shot reads from a script; watch readings are pushed by the test
    pub struct ScriptedGeolocation {
        reading: Reading,
        watcher: Mutex<Option<UnboundedSender<std::result::Result<Coordinate, LocationError>>>>,
        watches: Mutex<usize>,
    }

    impl ScriptedGeolocation {
        fn with(reading: Reading) -> Self {
            Self {
                reading,
                watcher: Mutex::new(None),
                watches: Mutex::new(0),
            }
        }

        pub fn at(coordinate: Coordinate) -> Self {
            Self::with(Reading::Fixed(Ok(coordinate)))
        }

        pub fn failing(error: LocationError) -> Self {
            Self::with(Reading::Fixed(Err(error)))
        }

        pub fn hanging() -> Self {
            Self::with(Reading::Hanging)
        }

        pub fn push(&self, reading: std::result::Result<Coordinate, LocationError>) {
            if let Some(sender) = self.watcher.lock().unwrap().as_ref() {
                let _ = sender.unbounded_send(reading);
            }
        }

        pub fn watch_count(&self) -> usize {
            *self.watches.lock().unwrap()
        }
    }

    #[async_trait]
    impl GeolocationDevice for ScriptedGeolocation {
        async fn current_position(
            &self,
            _options: PositionOptions,
        ) -> std::result::Result<Coordinate, LocationError> {
            match &self.reading {
                Reading::Fixed(result) => result.clone(),
                Reading::Hanging => std::future::pending().await,
            }
        }

        fn watch_position(
            &self,
            _options: PositionOptions,
        ) -> std::result::Result<PositionStream, LocationError> {
            if let Reading::Fixed(Err(e)) = &self.reading {
                return Err(e.clone());
            }
            let (sender, receiver) = unbounded();
            *self.watcher.lock().unwrap() = Some(sender);
            *self.watches.lock().unwrap() += 1;
            Ok(receiver.boxed())
        }
    }
}
