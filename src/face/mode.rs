/// Power state reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Interactive,
    Ambient,
}

/// Screen capabilities the host reports once, and again if they change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProperties {
    pub low_bit_ambient: bool,
    pub burn_in_protection: bool,
}

impl DeviceProperties {
    pub fn new(low_bit_ambient: bool, burn_in_protection: bool) -> Self {
        Self {
            low_bit_ambient,
            burn_in_protection,
        }
    }
}

/// Everything the renderer needs to know about how to paint this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMode {
    pub display: DisplayMode,
    pub properties: DeviceProperties,
}

impl RenderMode {
    pub fn new(display: DisplayMode, properties: DeviceProperties) -> Self {
        Self { display, properties }
    }

    pub fn interactive() -> Self {
        Self::default()
    }

    pub fn ambient() -> Self {
        Self::new(DisplayMode::Ambient, DeviceProperties::default())
    }

    /// Grayscale, non-anti-aliased painting
    pub fn is_reduced(&self) -> bool {
        self.display == DisplayMode::Ambient
            || self.properties.low_bit_ambient
            || self.properties.burn_in_protection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_when_any_flag_set() {
        for bits in 0..8u8 {
            let ambient = bits & 1 != 0;
            let low_bit = bits & 2 != 0;
            let burn_in = bits & 4 != 0;
            let display = if ambient { DisplayMode::Ambient } else { DisplayMode::Interactive };
            let mode = RenderMode::new(display, DeviceProperties::new(low_bit, burn_in));
            assert_eq!(mode.is_reduced(), bits != 0, "bits {:03b}", bits);
        }
    }
}
