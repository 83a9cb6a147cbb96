//! Desktop host: runs the face in a window, or renders one frame headless.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveTime, Utc};
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FaceConfig;
use crate::core::{next_minute_delay, Bitmap, Canvas, ManualHost, SurfaceRenderer, ZoneInfo};
use crate::face::{DeviceProperties, DisplayMode, FaceRenderer, SpriteSet, WatchFaceEngine};
use crate::math::Color;
use crate::traits::WatchFaceHost;

/// Host backed by a winit window and the system clock
#[derive(Default)]
pub struct WindowHost {
    window: Option<Arc<Window>>,
    wakeup_at: Option<Instant>,
    receiver_registered: bool,
}

impl WindowHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    /// Take the pending wake-up if it is due
    fn take_due_wakeup(&mut self, now: Instant) -> bool {
        match self.wakeup_at {
            Some(at) if at <= now => {
                self.wakeup_at = None;
                true
            }
            _ => false,
        }
    }

    fn wakeup_at(&self) -> Option<Instant> {
        self.wakeup_at
    }

    fn receiver_registered(&self) -> bool {
        self.receiver_registered
    }
}

impl WatchFaceHost for WindowHost {
    fn invalidate(&mut self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        self.wakeup_at = Some(Instant::now() + delay);
    }

    fn cancel_wakeup(&mut self) {
        self.wakeup_at = None;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn default_time_zone(&self) -> ZoneInfo {
        ZoneInfo::local()
    }

    fn register_time_zone_receiver(&mut self) {
        self.receiver_registered = true;
    }

    fn unregister_time_zone_receiver(&mut self) {
        self.receiver_registered = false;
    }
}

/// Window-mode application
pub struct SimulatorApp {
    engine: WatchFaceEngine<WindowHost>,
    surface: Option<SurfaceRenderer>,
    initial_size: (u32, u32),
    next_minute: Instant,
    error: Option<anyhow::Error>,
}

impl SimulatorApp {
    pub fn new(sprites: SpriteSet, config: &FaceConfig, width: u32, height: u32) -> Self {
        let renderer = FaceRenderer::new(sprites, config);
        Self {
            engine: WatchFaceEngine::new(WindowHost::new(), renderer, config.style),
            surface: None,
            initial_size: (width, height),
            next_minute: minute_deadline(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        self.engine.on_destroy();
        event_loop.exit();
    }

    fn toggle_ambient(&mut self) {
        let ambient = self.engine.render_mode().display == DisplayMode::Ambient;
        self.engine.on_ambient_mode_changed(!ambient);
        info!("ambient {}", if ambient { "off" } else { "on" });
    }

    fn toggle_property(&mut self, key: KeyCode) {
        let mut properties = self.engine.properties();
        match key {
            KeyCode::KeyL => properties.low_bit_ambient = !properties.low_bit_ambient,
            KeyCode::KeyB => properties.burn_in_protection = !properties.burn_in_protection,
            _ => return,
        }
        self.engine.on_properties_changed(properties);
        self.engine.host_mut().invalidate();
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };
        let (width, height) = surface.dimensions();

        let mut canvas = Canvas::new(width, height);
        canvas.clear(Color::BLACK);
        self.engine.on_draw(&mut canvas);

        surface
            .present(&canvas)
            .map_err(|e| anyhow!("failed to present frame: {}", e))
    }

    fn pump_clock(&mut self, event_loop: &ActiveEventLoop) {
        let deadline = self.deliver_due(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }

    /// Deliver whatever the clock says is due and return the next deadline.
    ///
    /// The zone is only re-read on the minute deadline, not on every event.
    fn deliver_due(&mut self, now: Instant) -> Instant {
        if self.engine.host_mut().take_due_wakeup(now) {
            self.engine.on_wakeup();
        }

        if now >= self.next_minute {
            if self.engine.host().receiver_registered() {
                let zone = ZoneInfo::local();
                if zone != *self.engine.zone() {
                    self.engine.on_time_zone_changed(zone);
                }
            }
            self.engine.on_time_tick();
            self.next_minute = minute_deadline();
        }

        match self.engine.host().wakeup_at() {
            Some(wakeup) => wakeup.min(self.next_minute),
            None => self.next_minute,
        }
    }
}

impl ApplicationHandler for SimulatorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Efflux")
                .with_inner_size(winit::dpi::PhysicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fail(event_loop, anyhow!("failed to create window: {}", e)),
        };

        let surface = match SurfaceRenderer::new(window.clone()) {
            Ok(s) => s,
            Err(e) => return self.fail(event_loop, anyhow!("failed to initialize surface: {}", e)),
        };
        let (width, height) = surface.dimensions();

        self.engine.host_mut().attach(window);
        self.surface = Some(surface);

        self.engine.on_create();
        self.engine.on_properties_changed(DeviceProperties::default());
        self.engine.on_surface_changed(width, height);
        self.engine.on_visibility_changed(true);
        info!("simulator running at {}x{} (A: ambient, L: low-bit, B: burn-in, Esc: quit)", width, height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.quit(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::KeyA => self.toggle_ambient(),
                KeyCode::KeyL | KeyCode::KeyB => self.toggle_property(code),
                _ => {}
            },
            WindowEvent::Focused(focused) => {
                debug!("focus {}", focused);
                self.engine.on_visibility_changed(focused);
            }
            WindowEvent::Occluded(occluded) => self.engine.on_visibility_changed(!occluded),
            WindowEvent::Resized(size) => {
                if let Some(surface) = &mut self.surface {
                    surface.resize(size.width, size.height);
                }
                self.engine.on_surface_changed(size.width, size.height);
                self.engine.host_mut().invalidate();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump_clock(event_loop);
    }
}

fn minute_deadline() -> Instant {
    Instant::now() + next_minute_delay(Utc::now().timestamp_millis())
}

/// Open a window and run the face until it is closed
pub fn run(sprites: SpriteSet, config: &FaceConfig, width: u32, height: u32) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = SimulatorApp::new(sprites, config, width, height);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// What a headless frame shows
#[derive(Debug, Clone, Default)]
pub struct SnapshotOptions {
    pub width: u32,
    pub height: u32,
    /// Wall-clock time in UTC; the current local time when absent
    pub time: Option<NaiveTime>,
    pub ambient: bool,
    pub properties: DeviceProperties,
}

/// Drive the face through its startup callbacks and draw a single frame
pub fn render_snapshot(sprites: SpriteSet, config: &FaceConfig, options: &SnapshotOptions) -> Bitmap {
    let (now, zone) = match options.time {
        Some(time) => (Utc::now().date_naive().and_time(time).and_utc(), ZoneInfo::utc()),
        None => (Utc::now(), ZoneInfo::local()),
    };

    let renderer = FaceRenderer::new(sprites, config);
    let mut engine = WatchFaceEngine::new(ManualHost::new(now, zone), renderer, config.style);
    engine.on_create();
    engine.on_properties_changed(options.properties);
    engine.on_surface_changed(options.width, options.height);
    engine.on_visibility_changed(true);
    engine.on_ambient_mode_changed(options.ambient);

    let mut canvas = Canvas::new(options.width, options.height);
    canvas.clear(Color::BLACK);
    engine.on_draw(&mut canvas);
    engine.on_destroy();

    canvas.to_bitmap("snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{load_sprites, BuiltinResources};
    use crate::config::MarkerVariant;
    use chrono::FixedOffset;

    fn app() -> SimulatorApp {
        let config = FaceConfig::default();
        let sprites = load_sprites(&BuiltinResources::new(&config), MarkerVariant::Wedge).unwrap();
        SimulatorApp::new(sprites, &config, 200, 200)
    }

    #[test]
    fn test_zone_is_reread_on_minute_deadline_only() {
        let mut app = app();
        app.engine.on_visibility_changed(true);
        let stale = ZoneInfo::new("Test/Stale", FixedOffset::east_opt(13 * 3600 + 1800).unwrap());
        app.engine.on_time_zone_changed(stale.clone());

        let now = Instant::now();
        app.next_minute = now + Duration::from_secs(30);
        app.deliver_due(now);
        assert_eq!(*app.engine.zone(), stale);

        app.next_minute = now;
        let deadline = app.deliver_due(now);
        assert_eq!(*app.engine.zone(), ZoneInfo::local());
        assert!(deadline > now);
    }

    #[test]
    fn test_deadline_is_earliest_of_wakeup_and_minute() {
        let mut app = app();
        let now = Instant::now();
        app.next_minute = now + Duration::from_secs(30);
        assert_eq!(app.deliver_due(now), app.next_minute);

        app.engine.host_mut().schedule_wakeup(Duration::from_secs(1));
        let wakeup = app.engine.host().wakeup_at().unwrap();
        assert_eq!(app.deliver_due(now), wakeup);
    }

    #[test]
    fn test_window_host_wakeups() {
        let mut host = WindowHost::new();
        host.schedule_wakeup(Duration::ZERO);
        assert!(host.take_due_wakeup(Instant::now()));
        assert!(!host.take_due_wakeup(Instant::now()));

        host.schedule_wakeup(Duration::from_secs(60));
        assert!(!host.take_due_wakeup(Instant::now()));
        host.cancel_wakeup();
        assert_eq!(host.wakeup_at(), None);
    }

    #[test]
    fn test_window_host_without_window_ignores_invalidate() {
        let mut host = WindowHost::new();
        host.invalidate();
        host.register_time_zone_receiver();
        assert!(host.receiver_registered());
    }
}
