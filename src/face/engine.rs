use log::{debug, info};

use super::mode::{DeviceProperties, DisplayMode, RenderMode};
use super::renderer::FaceRenderer;
use super::style::WatchFaceStyle;
use crate::core::{ClockSample, TickScheduler, TimerState, ZoneInfo};
use crate::traits::{FaceCanvas, WatchFaceHost};

/// One running watch face.
///
/// Every host callback maps to one method here. The host calls them all
/// from a single thread, which is also the thread wake-ups arrive on.
pub struct WatchFaceEngine<H: WatchFaceHost> {
    host: H,
    scheduler: TickScheduler,
    renderer: FaceRenderer,
    style: WatchFaceStyle,
    zone: ZoneInfo,
    properties: DeviceProperties,
    created: bool,
}

impl<H: WatchFaceHost> WatchFaceEngine<H> {
    pub fn new(host: H, renderer: FaceRenderer, style: WatchFaceStyle) -> Self {
        let zone = host.default_time_zone();
        Self {
            host,
            scheduler: TickScheduler::new(),
            renderer,
            style,
            zone,
            properties: DeviceProperties::default(),
            created: false,
        }
    }

    /// Returns the style the host should apply
    pub fn on_create(&mut self) -> &WatchFaceStyle {
        self.created = true;
        self.zone = self.host.default_time_zone();
        info!("watch face created ({:?} markers)", self.renderer.variant());
        &self.style
    }

    pub fn on_destroy(&mut self) {
        self.scheduler.teardown(&mut self.host);
        self.created = false;
        info!("watch face destroyed");
    }

    pub fn on_visibility_changed(&mut self, visible: bool) {
        if visible {
            // The zone may have changed while nobody was listening
            self.zone = self.host.default_time_zone();
        }
        self.scheduler.on_visibility_changed(&mut self.host, visible);
    }

    pub fn on_ambient_mode_changed(&mut self, in_ambient: bool) {
        if self.scheduler.on_ambient_mode_changed(&mut self.host, in_ambient) {
            debug!("ambient mode {}", if in_ambient { "on" } else { "off" });
        }
    }

    pub fn on_properties_changed(&mut self, properties: DeviceProperties) {
        debug!(
            "low-bit ambient {}, burn-in protection {}",
            properties.low_bit_ambient, properties.burn_in_protection
        );
        self.properties = properties;
    }

    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.renderer.on_surface_changed(width, height);
    }

    /// Minute boundary, delivered in every mode
    pub fn on_time_tick(&mut self) {
        self.host.invalidate();
    }

    pub fn on_time_zone_changed(&mut self, zone: ZoneInfo) {
        info!("time zone changed to {}", zone.id());
        self.zone = zone;
        self.host.invalidate();
    }

    pub fn on_wakeup(&mut self) {
        self.scheduler.on_wakeup(&mut self.host);
    }

    /// Sample the clock and draw one frame
    pub fn on_draw(&mut self, canvas: &mut dyn FaceCanvas) {
        let sample = self.sample();
        self.renderer.draw(canvas, &sample, self.render_mode());
    }

    /// Current time in the cached zone
    pub fn sample(&self) -> ClockSample {
        ClockSample::at(self.host.now(), &self.zone)
    }

    pub fn render_mode(&self) -> RenderMode {
        let display = if self.scheduler.is_ambient() {
            DisplayMode::Ambient
        } else {
            DisplayMode::Interactive
        };
        RenderMode::new(display, self.properties)
    }

    pub fn timer_state(&self) -> TimerState {
        self.scheduler.state()
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_visible(&self) -> bool {
        self.scheduler.is_visible()
    }

    pub fn zone(&self) -> &ZoneInfo {
        &self.zone
    }

    pub fn properties(&self) -> DeviceProperties {
        self.properties
    }

    pub fn style(&self) -> &WatchFaceStyle {
        &self.style
    }

    pub fn renderer(&self) -> &FaceRenderer {
        &self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::core::{Bitmap, ManualHost, RecordingCanvas};
    use crate::face::renderer::SpriteSet;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn engine() -> WatchFaceEngine<ManualHost> {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 30, 0).unwrap();
        let host = ManualHost::new(now, ZoneInfo::utc());
        let sprites = SpriteSet::Wedge {
            background: Bitmap::solid("background", 320, 320, [0, 0, 0, 255]),
            gray_background: Bitmap::solid("gray_background", 320, 320, [9, 9, 9, 255]),
        };
        let renderer = FaceRenderer::new(sprites, &FaceConfig::default());
        WatchFaceEngine::new(host, renderer, WatchFaceStyle::default())
    }

    #[test]
    fn test_create_returns_style() {
        let mut engine = engine();
        assert_eq!(*engine.on_create(), WatchFaceStyle::default());
        assert!(engine.is_created());
    }

    #[test]
    fn test_properties_feed_render_mode() {
        let mut engine = engine();
        assert!(!engine.render_mode().is_reduced());
        engine.on_properties_changed(DeviceProperties::new(false, true));
        assert!(engine.render_mode().is_reduced());
    }

    #[test]
    fn test_time_zone_change_redraws_in_new_zone() {
        let mut engine = engine();
        engine.host_mut().take_invalidations();

        let zagreb = ZoneInfo::new("Europe/Zagreb", FixedOffset::east_opt(2 * 3600).unwrap());
        engine.on_time_zone_changed(zagreb);

        assert_eq!(engine.host_mut().take_invalidations(), 1);
        assert_eq!(engine.sample().hour, 5);
        assert_eq!(engine.sample().time_zone_id, "Europe/Zagreb");
    }

    #[test]
    fn test_visibility_resyncs_zone() {
        let mut engine = engine();
        let tokyo = ZoneInfo::new("Asia/Tokyo", FixedOffset::east_opt(9 * 3600).unwrap());
        engine.host_mut().set_zone(tokyo.clone());

        engine.on_visibility_changed(true);
        assert_eq!(engine.zone(), &tokyo);
        assert_eq!(engine.timer_state(), TimerState::Running);
    }

    #[test]
    fn test_time_tick_redraws_in_ambient() {
        let mut engine = engine();
        engine.on_visibility_changed(true);
        engine.on_ambient_mode_changed(true);
        engine.host_mut().take_invalidations();

        engine.on_time_tick();
        assert_eq!(engine.host_mut().take_invalidations(), 1);
        assert_eq!(engine.timer_state(), TimerState::Stopped);
    }

    #[test]
    fn test_draw_uses_wedge_markers() {
        let mut engine = engine();
        engine.on_surface_changed(400, 400);
        let mut canvas = RecordingCanvas::new(400, 400);
        engine.on_draw(&mut canvas);

        let gold = FaceConfig::default().palette.gold;
        assert_eq!(canvas.paths_colored(gold).count(), 3);
    }

    #[test]
    fn test_destroy_tears_down() {
        let mut engine = engine();
        engine.on_create();
        engine.on_visibility_changed(true);
        engine.on_destroy();

        assert!(!engine.host().is_receiver_registered());
        assert_eq!(engine.host().pending_wakeup(), None);
    }
}
