use std::time::Duration;

use chrono::{DateTime, Utc};

use super::clock::ZoneInfo;
use crate::traits::WatchFaceHost;

/// Host driven by hand: the clock only moves when told to and wake-ups
/// are recorded rather than fired. Used for headless snapshots and tests.
#[derive(Debug, Clone)]
pub struct ManualHost {
    now: DateTime<Utc>,
    zone: ZoneInfo,
    invalidations: usize,
    pending_wakeup: Option<Duration>,
    scheduled: Vec<Duration>,
    cancels: usize,
    receiver_registered: bool,
    registrations: usize,
    unregistrations: usize,
}

impl ManualHost {
    pub fn new(now: DateTime<Utc>, zone: ZoneInfo) -> Self {
        Self {
            now,
            zone,
            invalidations: 0,
            pending_wakeup: None,
            scheduled: Vec::new(),
            cancels: 0,
            receiver_registered: false,
            registrations: 0,
            unregistrations: 0,
        }
    }

    /// Move the clock forward
    pub fn advance(&mut self, by: Duration) {
        self.now += chrono::Duration::milliseconds(by.as_millis() as i64);
    }

    /// Change the environment's zone (does not notify anyone)
    pub fn set_zone(&mut self, zone: ZoneInfo) {
        self.zone = zone;
    }

    /// Redraw requests since the last call
    pub fn take_invalidations(&mut self) -> usize {
        std::mem::take(&mut self.invalidations)
    }

    /// Wake-up currently armed, if any
    pub fn pending_wakeup(&self) -> Option<Duration> {
        self.pending_wakeup
    }

    /// Consume the armed wake-up, as the host does right before calling back
    pub fn fire_wakeup(&mut self) -> Option<Duration> {
        let pending = self.pending_wakeup.take();
        if let Some(delay) = pending {
            self.advance(delay);
        }
        pending
    }

    /// Every delay ever scheduled, in order
    pub fn scheduled(&self) -> &[Duration] {
        &self.scheduled
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }

    pub fn is_receiver_registered(&self) -> bool {
        self.receiver_registered
    }

    pub fn registrations(&self) -> usize {
        self.registrations
    }

    pub fn unregistrations(&self) -> usize {
        self.unregistrations
    }
}

impl WatchFaceHost for ManualHost {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        self.pending_wakeup = Some(delay);
        self.scheduled.push(delay);
    }

    fn cancel_wakeup(&mut self) {
        self.pending_wakeup = None;
        self.cancels += 1;
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn default_time_zone(&self) -> ZoneInfo {
        self.zone.clone()
    }

    fn register_time_zone_receiver(&mut self) {
        self.receiver_registered = true;
        self.registrations += 1;
    }

    fn unregister_time_zone_receiver(&mut self) {
        self.receiver_registered = false;
        self.unregistrations += 1;
    }
}
