//! Runtime configuration.

use crate::device::Device;
use crate::encoder::Background;

/// Environment variable naming the terminal background as a hex triple.
/// Shared with the `imcat` family of tools.
pub const BACKGROUND_ENV: &str = "IMCATBG";

/// Everything the render loop needs to know up front.
#[derive(Debug, Clone)]
pub struct Config {
    /// Device under observation.
    pub device: Device,
    /// Backdrop for alpha blending.
    pub background: Background,
    /// Whether to blend at all. On by default; kept as a knob because
    /// the encoder contract treats it as one.
    pub blend: bool,
}

impl Config {
    /// Build a config for a device, taking the background from the
    /// environment.
    #[must_use]
    pub fn from_env(device: Device) -> Self {
        Self::with_env(device, std::env::var(BACKGROUND_ENV).ok())
    }

    /// Testable core of [`Config::from_env`].
    #[must_use]
    pub fn with_env(device: Device, background_var: Option<String>) -> Self {
        let background = background_var
            .as_deref()
            .and_then(Background::parse)
            .unwrap_or_default();
        Self {
            device,
            background,
            blend: true,
        }
    }
}
