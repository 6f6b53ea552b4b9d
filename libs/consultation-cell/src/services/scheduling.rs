// libs/consultation-cell/src/services/scheduling.rs
use chrono::{DateTime, Days, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use tracing::{debug, warn};

use shared_config::{AppConfig, DEFAULT_WINDOW_DAYS};
use shared_utils::dates::format_long_pt_br;

use crate::models::ConsultationError;

/// Longest window accepted from configuration.
pub const MAX_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingConfig {
    /// Length of the bookable window counted from today.
    pub window_days: u32,
    /// When false (the default) the upper bound is `now + window_days` with
    /// the current time of day kept, while the lower bound is today's
    /// midnight. When true the upper bound is moved to the last instant of
    /// its calendar day so both ends are day-aligned.
    pub normalize_upper_bound: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS as u32,
            normalize_upper_bound: false,
        }
    }
}

impl SchedulingConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        let window_days = u32::try_from(config.window_days)
            .ok()
            .filter(|days| *days > 0 && *days <= MAX_WINDOW_DAYS)
            .unwrap_or_else(|| {
                warn!("Invalid window length {} (1..={}), using {}",
                      config.window_days, MAX_WINDOW_DAYS, DEFAULT_WINDOW_DAYS);
                DEFAULT_WINDOW_DAYS as u32
            });

        Self {
            window_days,
            ..Self::default()
        }
    }
}

/// Range of instants a consultation may be booked for, fixed when the
/// window is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    min_date: DateTime<Utc>,
    max_date: DateTime<Utc>,
    min_day: NaiveDate,
    max_day: NaiveDate,
    offset: FixedOffset,
    window_days: u32,
}

impl DateWindow {
    /// Window anchored at the current local time.
    pub fn current(config: &SchedulingConfig) -> Self {
        Self::anchored_at(&Local::now(), config)
    }

    pub fn anchored_at<Tz: TimeZone>(now: &DateTime<Tz>, config: &SchedulingConfig) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let window_days = config.window_days.min(MAX_WINDOW_DAYS);

        let min_local = start_of_day(&tz, today).unwrap_or_else(|| now.clone());

        let mut max_local = now
            .clone()
            .checked_add_days(Days::new(u64::from(window_days)))
            .or_else(|| now.clone().checked_add_signed(Duration::days(i64::from(window_days))))
            .unwrap_or_else(|| {
                warn!("Window end out of range, limiting the window to today");
                now.clone()
            });

        if config.normalize_upper_bound {
            let next_day = max_local.date_naive().succ_opt();
            if let Some(next_start) = next_day.and_then(|day| start_of_day(&tz, day)) {
                max_local = next_start - Duration::milliseconds(1);
            }
        }

        let window = Self {
            min_date: min_local.with_timezone(&Utc),
            max_date: max_local.with_timezone(&Utc),
            min_day: today,
            max_day: max_local.date_naive(),
            offset: now.offset().fix(),
            window_days,
        };

        debug!("Booking window {} .. {}", window.min_date, window.max_date);
        window
    }

    pub fn min_date(&self) -> DateTime<Utc> {
        self.min_date
    }

    pub fn max_date(&self) -> DateTime<Utc> {
        self.max_date
    }

    pub fn min_day(&self) -> NaiveDate {
        self.min_day
    }

    pub fn max_day(&self) -> NaiveDate {
        self.max_day
    }

    /// Inclusive on both ends.
    pub fn contains(&self, candidate: &DateTime<Utc>) -> bool {
        self.min_date <= *candidate && *candidate <= self.max_date
    }

    pub fn validate(&self, candidate: DateTime<Utc>) -> Result<DateTime<Utc>, ConsultationError> {
        if self.contains(&candidate) {
            Ok(candidate)
        } else {
            warn!("Rejected date {} outside {} .. {}", candidate, self.min_date, self.max_date);
            Err(ConsultationError::InvalidDate(self.invalid_date_message()))
        }
    }

    /// Calendar day of `instant` in the offset the window was anchored in.
    pub fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Midnight of a picked calendar day, in the offset the window was
    /// anchored in.
    pub fn calendar_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let naive = day.and_time(NaiveTime::MIN);
        let local = self.offset.from_local_datetime(&naive).single();

        match local {
            Some(dt) => dt.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&naive),
        }
    }

    pub fn invalid_date_message(&self) -> String {
        format!(
            "Por favor, selecione uma data entre hoje e os próximos {} dias.",
            self.window_days
        )
    }

    /// Helper text shown next to the date field.
    pub fn hint(&self) -> String {
        format!(
            "Selecione uma data entre {} e {}",
            format_long_pt_br(self.min_day),
            format_long_pt_br(self.max_day)
        )
    }
}

// Midnight can be skipped by a DST change; fall back to the first valid hour.
fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = day.and_time(NaiveTime::MIN);

    (0..=3).find_map(|hours| {
        tz.from_local_datetime(&(midnight + Duration::hours(hours))).earliest()
    })
}
