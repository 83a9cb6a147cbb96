use std::time::Duration;

use log::debug;

use super::clock::next_tick_delay;
use crate::traits::WatchFaceHost;

/// Whether per-second ticks are being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Second-aligned redraw timer.
///
/// Runs only while the face is visible and interactive. At most one
/// wake-up is ever pending: every (re)arm cancels the previous one first.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    visible: bool,
    ambient: bool,
    wakeup_pending: bool,
    receiver_registered: bool,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible ⇒ subscribe to zone changes, hidden ⇒ unsubscribe; then re-arm
    pub fn on_visibility_changed<H: WatchFaceHost>(&mut self, host: &mut H, visible: bool) {
        self.visible = visible;
        if visible {
            self.register_receiver(host);
        } else {
            self.unregister_receiver(host);
        }
        self.update_timer(host);
    }

    /// Redraw once on an actual mode flip, then re-arm. Returns whether the mode changed.
    pub fn on_ambient_mode_changed<H: WatchFaceHost>(&mut self, host: &mut H, in_ambient: bool) -> bool {
        let changed = self.ambient != in_ambient;
        if changed {
            self.ambient = in_ambient;
            host.invalidate();
        }
        self.update_timer(host);
        changed
    }

    /// Drop any pending wake-up and, if ticking is allowed, fire one immediately
    pub fn update_timer<H: WatchFaceHost>(&mut self, host: &mut H) {
        host.cancel_wakeup();
        self.wakeup_pending = false;

        if self.should_run() {
            self.arm(host, Duration::ZERO);
        }
        debug!("tick timer {:?}", self.state());
    }

    /// Visible and not ambient
    pub fn should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Handle a wake-up delivered by the host
    pub fn on_wakeup<H: WatchFaceHost>(&mut self, host: &mut H) {
        if !self.wakeup_pending {
            debug!("ignoring stale wake-up");
            return;
        }
        self.wakeup_pending = false;

        host.invalidate();
        if self.should_run() {
            let delay = next_tick_delay(host.now().timestamp_millis());
            self.arm(host, delay);
        }
    }

    /// Stop ticking and unsubscribe
    pub fn teardown<H: WatchFaceHost>(&mut self, host: &mut H) {
        host.cancel_wakeup();
        self.wakeup_pending = false;
        self.unregister_receiver(host);
    }

    pub fn state(&self) -> TimerState {
        if self.wakeup_pending {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_receiver_registered(&self) -> bool {
        self.receiver_registered
    }

    fn arm<H: WatchFaceHost>(&mut self, host: &mut H, delay: Duration) {
        host.schedule_wakeup(delay);
        self.wakeup_pending = true;
    }

    fn register_receiver<H: WatchFaceHost>(&mut self, host: &mut H) {
        if self.receiver_registered {
            return;
        }
        self.receiver_registered = true;
        host.register_time_zone_receiver();
    }

    fn unregister_receiver<H: WatchFaceHost>(&mut self, host: &mut H) {
        if !self.receiver_registered {
            return;
        }
        self.receiver_registered = false;
        host.unregister_time_zone_receiver();
    }
}
