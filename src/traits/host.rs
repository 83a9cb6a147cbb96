use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::ZoneInfo;

/// Platform services the watch face relies on.
///
/// All calls happen on the single UI thread that also delivers the
/// lifecycle callbacks, so implementations need no locking.
pub trait WatchFaceHost {
    /// Ask for a redraw at the host's next opportunity
    fn invalidate(&mut self);

    /// Arm a one-shot wake-up after `delay`; the host then calls back `on_wakeup`
    fn schedule_wakeup(&mut self, delay: Duration);

    /// Drop the pending wake-up, if any
    fn cancel_wakeup(&mut self);

    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Time zone currently configured in the environment
    fn default_time_zone(&self) -> ZoneInfo;

    /// Start delivering time-zone change notifications
    fn register_time_zone_receiver(&mut self);

    /// Stop delivering time-zone change notifications
    fn unregister_time_zone_receiver(&mut self);
}
