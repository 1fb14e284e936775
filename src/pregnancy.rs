//! Pregnancy week tracker
//!
//! Progress is derived from the last menstrual period (LMP) date, which is the
//! only value the app persists.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::PREGNANCY_WEEKS;
use crate::models::PregnancyWeek;
use crate::storage::{LMP_KEY, PreferenceStore};
use crate::{MamaeZenError, Result};

pub const FIRST_WEEK: u8 = 4;
pub const LAST_WEEK: u8 = 40;
const TERM_DAYS: u64 = 280;
const LMP_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyProgress {
    pub lmp: NaiveDate,
    /// Completed weeks, clamped to the tabulated range
    pub current_week: u8,
    /// Estimated due date as `dd/mm/yyyy`
    pub due_date: String,
    pub progress_percent: u8,
    pub days_left: u32,
}

impl PregnancyProgress {
    /// Progress on `today` for a pregnancy whose LMP was `lmp`
    #[must_use]
    pub fn calculate(lmp: NaiveDate, today: NaiveDate) -> Self {
        let days = (today - lmp).num_days().unsigned_abs();
        let weeks = (days / 7).clamp(u64::from(FIRST_WEEK), u64::from(LAST_WEEK));
        let current_week = u8::try_from(weeks).unwrap_or(LAST_WEEK);

        let due_date = lmp
            .checked_add_days(Days::new(TERM_DAYS))
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default();

        let progress = (f64::from(current_week) / f64::from(LAST_WEEK) * 100.0).round();
        let progress_percent = progress.min(100.0) as u8;
        let days_left = u32::from(LAST_WEEK.saturating_sub(current_week)) * 7;

        Self {
            lmp,
            current_week,
            due_date,
            progress_percent,
            days_left,
        }
    }
}

/// Closest tabulated week; on a tie the earlier week wins.
#[must_use]
pub fn nearest_week(week: u8) -> &'static PregnancyWeek {
    let mut best = &PREGNANCY_WEEKS[0];
    for candidate in &PREGNANCY_WEEKS[1..] {
        if candidate.week.abs_diff(week) < best.week.abs_diff(week) {
            best = candidate;
        }
    }
    best
}

/// Week details for the week selector; weeks outside 4..=40 are rejected
pub fn week_info(week: u8) -> Result<&'static PregnancyWeek> {
    if !(FIRST_WEEK..=LAST_WEEK).contains(&week) {
        return Err(MamaeZenError::validation(format!(
            "A semana deve estar entre {FIRST_WEEK} e {LAST_WEEK}"
        )));
    }
    Ok(nearest_week(week))
}

/// Parse a `YYYY-MM-DD` LMP date, rejecting dates after `today`
pub fn parse_lmp(value: &str, today: NaiveDate) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MamaeZenError::validation("Informe a data da última menstruação"));
    }
    let lmp = NaiveDate::parse_from_str(value, LMP_FORMAT)
        .map_err(|_| MamaeZenError::validation(format!("Data inválida: {value}")))?;
    if lmp > today {
        return Err(MamaeZenError::validation("A data não pode estar no futuro"));
    }
    Ok(lmp)
}

pub struct PregnancyTracker {
    store: Arc<dyn PreferenceStore>,
    lmp: Option<NaiveDate>,
}

impl PregnancyTracker {
    /// Read the stored LMP. An unreadable stored value is treated as absent.
    pub async fn load(store: Arc<dyn PreferenceStore>) -> Result<Self> {
        let lmp = match store.get(LMP_KEY).await? {
            Some(raw) => match NaiveDate::parse_from_str(&raw, LMP_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Ignoring stored LMP '{}': {}", raw, e);
                    None
                }
            },
            None => None,
        };
        Ok(Self { store, lmp })
    }

    #[must_use]
    pub fn lmp(&self) -> Option<NaiveDate> {
        self.lmp
    }

    /// `None` until onboarding has happened
    #[must_use]
    pub fn progress(&self, today: NaiveDate) -> Option<PregnancyProgress> {
        self.lmp
            .map(|lmp| PregnancyProgress::calculate(lmp, today))
    }

    /// Record the LMP, replacing any earlier value
    pub async fn onboard(&mut self, value: &str, today: NaiveDate) -> Result<PregnancyProgress> {
        let lmp = parse_lmp(value, today)?;
        self.store
            .put(LMP_KEY, &lmp.format(LMP_FORMAT).to_string())
            .await?;
        self.lmp = Some(lmp);
        info!(%lmp, "Pregnancy LMP saved");
        Ok(PregnancyProgress::calculate(lmp, today))
    }

    /// Forget the stored LMP so onboarding starts over
    pub async fn clear(&mut self) -> Result<()> {
        self.store.remove(LMP_KEY).await?;
        self.lmp = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, LMP_FORMAT).unwrap()
    }

    #[test]
    fn test_lmp_140_days_ago_is_week_20() {
        let today = date("2026-10-19");
        let lmp = today - Days::new(140);
        let progress = PregnancyProgress::calculate(lmp, today);
        assert_eq!(progress.current_week, 20);
        assert_eq!(progress.progress_percent, 50);
        assert_eq!(progress.days_left, 140);
    }

    #[rstest]
    #[case(0, 4)]
    #[case(10, 4)]
    #[case(69, 9)]
    #[case(400, 40)]
    fn test_week_is_clamped(#[case] days_ago: u64, #[case] week: u8) {
        let today = date("2026-10-19");
        let progress = PregnancyProgress::calculate(today - Days::new(days_ago), today);
        assert_eq!(progress.current_week, week);
        assert!(progress.progress_percent <= 100);
    }

    #[test]
    fn test_due_date_is_280_days_after_lmp() {
        let progress = PregnancyProgress::calculate(date("2026-01-01"), date("2026-03-01"));
        assert_eq!(progress.due_date, "08/10/2026");
    }

    #[rstest]
    #[case(4, 4)]
    #[case(6, 4)]
    #[case(7, 8)]
    #[case(21, 21)]
    #[case(22, 21)]
    #[case(37, 36)]
    #[case(39, 38)]
    #[case(40, 40)]
    fn test_nearest_week(#[case] week: u8, #[case] expected: u8) {
        assert_eq!(nearest_week(week).week, expected);
    }

    #[test]
    fn test_week_info_rejects_out_of_range() {
        assert!(week_info(3).is_err());
        assert!(week_info(41).is_err());
        assert_eq!(week_info(30).unwrap().week, 28);
    }

    #[test]
    fn test_future_lmp_is_rejected() {
        let today = date("2026-10-19");
        assert!(parse_lmp("2026-10-20", today).is_err());
        assert!(parse_lmp("19/10/2026", today).is_err());
        assert!(parse_lmp("", today).is_err());
        assert_eq!(parse_lmp("2026-10-19", today).unwrap(), today);
    }

    #[tokio::test]
    async fn test_onboarding_persists_lmp() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::default());
        let today = date("2026-10-19");

        let mut tracker = PregnancyTracker::load(store.clone()).await.unwrap();
        assert!(tracker.progress(today).is_none());

        let progress = tracker.onboard("2026-06-01", today).await.unwrap();
        assert_eq!(progress.current_week, 20);

        let reloaded = PregnancyTracker::load(store.clone()).await.unwrap();
        assert_eq!(reloaded.lmp(), Some(date("2026-06-01")));
        assert_eq!(
            store.get(LMP_KEY).await.unwrap().as_deref(),
            Some("2026-06-01")
        );
    }

    #[tokio::test]
    async fn test_corrupt_stored_value_is_ignored() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::default());
        store.put(LMP_KEY, "not a date").await.unwrap();
        let mut tracker = PregnancyTracker::load(store).await.unwrap();
        assert!(tracker.lmp().is_none());

        tracker.onboard("2026-09-01", date("2026-10-19")).await.unwrap();
        tracker.clear().await.unwrap();
        assert!(tracker.lmp().is_none());
    }
}
