pub mod bitmap;
pub mod canvas;
pub mod clock;
pub mod gpu_context;
pub mod manual_host;
pub mod paint;
pub mod path;
pub mod recording;
pub mod scheduler;
pub mod surface_renderer;

pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use clock::{next_minute_delay, next_tick_delay, ClockSample, ZoneInfo, INTERACTIVE_UPDATE_RATE_MS};
pub use gpu_context::GpuContext;
pub use manual_host::ManualHost;
pub use paint::{Dash, Paint, PaintStyle, Shadow};
pub use path::Path;
pub use recording::{DrawOp, RecordingCanvas};
pub use scheduler::{TickScheduler, TimerState};
pub use surface_renderer::SurfaceRenderer;
