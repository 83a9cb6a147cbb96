use serde::{Deserialize, Serialize};

/// How far an incoming notification card peeks over the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeekMode {
    Short,
    Variable,
    Hidden,
}

/// When the host paints an opaque background behind peeking cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundVisibility {
    Interruptive,
    Persistent,
}

/// Where system status icons are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBarGravity {
    None,
    Top,
    Bottom,
    Center,
}

/// System indicators that get a scrim drawn behind them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewProtection {
    None,
    StatusBar,
    HotwordIndicator,
}

/// Declarative style handed to the host once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchFaceStyle {
    pub peek_mode: PeekMode,
    pub background_visibility: BackgroundVisibility,
    /// The face draws its own time, so the system clock stays hidden
    pub show_system_ui_time: bool,
    pub status_bar_gravity: StatusBarGravity,
    pub view_protection: ViewProtection,
}

impl WatchFaceStyle {
    pub fn builder() -> WatchFaceStyleBuilder {
        WatchFaceStyleBuilder::default()
    }
}

impl Default for WatchFaceStyle {
    fn default() -> Self {
        Self {
            peek_mode: PeekMode::Short,
            background_visibility: BackgroundVisibility::Interruptive,
            show_system_ui_time: false,
            status_bar_gravity: StatusBarGravity::None,
            view_protection: ViewProtection::StatusBar,
        }
    }
}

/// Builder for `WatchFaceStyle`
#[derive(Debug, Default)]
pub struct WatchFaceStyleBuilder {
    style: WatchFaceStyle,
}

impl WatchFaceStyleBuilder {
    pub fn peek_mode(mut self, peek_mode: PeekMode) -> Self {
        self.style.peek_mode = peek_mode;
        self
    }

    pub fn background_visibility(mut self, visibility: BackgroundVisibility) -> Self {
        self.style.background_visibility = visibility;
        self
    }

    pub fn show_system_ui_time(mut self, show: bool) -> Self {
        self.style.show_system_ui_time = show;
        self
    }

    pub fn status_bar_gravity(mut self, gravity: StatusBarGravity) -> Self {
        self.style.status_bar_gravity = gravity;
        self
    }

    pub fn view_protection(mut self, protection: ViewProtection) -> Self {
        self.style.view_protection = protection;
        self
    }

    pub fn build(self) -> WatchFaceStyle {
        self.style
    }
}
