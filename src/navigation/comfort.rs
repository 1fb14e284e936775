//! Periodic reassurance spoken during guided navigation

use rand::RngExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info};

use super::speech::SpeechAnnouncer;
use crate::catalog::COMFORT_PHRASES;
use crate::{MamaeZenError, Result};

const COMFORT_RATE: f32 = 1.0;

type Displayed = Arc<Mutex<Option<&'static str>>>;

fn set_displayed(displayed: &Displayed, phrase: Option<&'static str>) {
    let mut guard = displayed
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = phrase;
}

pub struct ComfortPhraseScheduler {
    announcer: SpeechAnnouncer,
    interval: Duration,
    display: Duration,
    displayed: Displayed,
    task: Option<JoinHandle<()>>,
}

impl ComfortPhraseScheduler {
    /// `display` must be shorter than `interval` so a phrase is cleared before the next one.
    pub fn new(announcer: SpeechAnnouncer, interval: Duration, display: Duration) -> Result<Self> {
        if interval.is_zero() || display >= interval {
            return Err(MamaeZenError::config(format!(
                "Comfort phrase display ({display:?}) must be shorter than the interval ({interval:?})"
            )));
        }
        Ok(Self {
            announcer,
            interval,
            display,
            displayed: Arc::new(Mutex::new(None)),
            task: None,
        })
    }

    /// Begin ticking; the first phrase comes one full interval from now.
    /// Starting while running restarts the schedule.
    pub fn start(&mut self) {
        self.stop();

        let announcer = self.announcer.clone();
        let displayed = self.displayed.clone();
        let (interval, display) = (self.interval, self.display);

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let phrase = COMFORT_PHRASES[rand::rng().random_range(0..COMFORT_PHRASES.len())];
                debug!("Comfort phrase: {}", phrase);
                announcer.say(phrase, COMFORT_RATE);
                set_displayed(&displayed, Some(phrase));
                sleep(display).await;
                set_displayed(&displayed, None);
            }
        }));
        info!(interval_secs = interval.as_secs(), "Comfort phrases started");
    }

    /// Idempotent; also clears any phrase on screen
    pub fn stop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
            debug!("Comfort phrases stopped");
        }
        set_displayed(&self.displayed, None);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    #[must_use]
    pub fn displayed_phrase(&self) -> Option<&'static str> {
        *self
            .displayed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Drop for ComfortPhraseScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::testing::RecordingSpeech;

    fn scheduler(engine: &Arc<RecordingSpeech>) -> ComfortPhraseScheduler {
        ComfortPhraseScheduler::new(
            SpeechAnnouncer::new(engine.clone(), 170),
            Duration::from_secs(30),
            Duration::from_secs(8),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_phrases_in_61_seconds() {
        let engine = Arc::new(RecordingSpeech::default());
        let mut scheduler = scheduler(&engine);
        scheduler.start();

        sleep(Duration::from_secs(29)).await;
        assert!(engine.spoken().is_empty());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(engine.spoken().len(), 1);
        let first = scheduler.displayed_phrase().unwrap();
        assert!(COMFORT_PHRASES.contains(&first));
        assert_eq!(engine.last_utterance().unwrap().rate, 1.0);

        sleep(Duration::from_secs(8)).await;
        assert!(scheduler.displayed_phrase().is_none());

        sleep(Duration::from_secs(22)).await;
        assert_eq!(engine.spoken().len(), 2);
        assert!(scheduler.displayed_phrase().is_some());

        sleep(Duration::from_secs(8)).await;
        assert!(scheduler.displayed_phrase().is_none());
        assert!(engine.spoken().iter().all(|p| COMFORT_PHRASES.contains(&p.as_str())));
        assert_eq!(engine.overlaps(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_clears_and_silences() {
        let engine = Arc::new(RecordingSpeech::default());
        let mut scheduler = scheduler(&engine);
        scheduler.start();

        sleep(Duration::from_secs(31)).await;
        assert!(scheduler.displayed_phrase().is_some());

        scheduler.stop();
        scheduler.stop();
        assert!(scheduler.displayed_phrase().is_none());
        assert!(!scheduler.is_running());

        sleep(Duration::from_secs(120)).await;
        assert_eq!(engine.spoken().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_schedule() {
        let engine = Arc::new(RecordingSpeech::default());
        let mut scheduler = scheduler(&engine);
        scheduler.start();
        sleep(Duration::from_secs(20)).await;
        scheduler.start();
        sleep(Duration::from_secs(20)).await;
        assert!(engine.spoken().is_empty());
        sleep(Duration::from_secs(11)).await;
        assert_eq!(engine.spoken().len(), 1);
    }

    #[test]
    fn test_display_must_fit_interval() {
        let engine = Arc::new(RecordingSpeech::default());
        let result = ComfortPhraseScheduler::new(
            SpeechAnnouncer::new(engine, 170),
            Duration::from_secs(5),
            Duration::from_secs(8),
        );
        assert!(result.is_err());
    }
}
