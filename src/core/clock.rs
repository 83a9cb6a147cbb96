use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};

/// Interactive redraw period
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1_000;

const MINUTE_MS: i64 = 60_000;

/// Time zone as seen by the face: a stable identifier plus its current UTC offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    id: String,
    offset: FixedOffset,
}

impl ZoneInfo {
    pub fn new(id: impl Into<String>, offset: FixedOffset) -> Self {
        Self { id: id.into(), offset }
    }

    pub fn utc() -> Self {
        Self::new("UTC", Utc.fix())
    }

    /// Zone of the running environment; the id comes from `TZ` when set
    pub fn local() -> Self {
        let offset = Local::now().offset().fix();
        let id = std::env::var("TZ")
            .ok()
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| "localtime".to_string());
        Self::new(id, offset)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Wall-clock reading taken once per draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSample {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub time_zone_id: String,
}

impl ClockSample {
    /// Build a sample, rejecting out-of-range fields
    pub fn new(hour: u32, minute: u32, second: u32, time_zone_id: impl Into<String>) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
            time_zone_id: time_zone_id.into(),
        })
    }

    /// Sample `instant` in `zone`
    pub fn at(instant: DateTime<Utc>, zone: &ZoneInfo) -> Self {
        let local = instant.with_timezone(&zone.offset);
        Self {
            hour: local.hour(),
            minute: local.minute(),
            // chrono reports a leap second as second 59 with nanoseconds past 1e9
            second: local.second(),
            time_zone_id: zone.id.clone(),
        }
    }

    /// Elapsed seconds in the current hour, 0..=3599
    pub fn seconds_into_hour(&self) -> u32 {
        self.minute * 60 + self.second
    }

    /// Hour on a 12-hour dial, 0..=11
    pub fn dial_hour(&self) -> u32 {
        self.hour % 12
    }
}

/// Delay until the next wall-clock second boundary
pub fn next_tick_delay(now_ms: i64) -> Duration {
    let delay = INTERACTIVE_UPDATE_RATE_MS - now_ms.rem_euclid(INTERACTIVE_UPDATE_RATE_MS);
    Duration::from_millis(delay as u64)
}

/// Delay until the next wall-clock minute boundary
pub fn next_minute_delay(now_ms: i64) -> Duration {
    let delay = MINUTE_MS - now_ms.rem_euclid(MINUTE_MS);
    Duration::from_millis(delay as u64)
}
