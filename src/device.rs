//! Block device identification and status line.

use std::fs;
use std::path::PathBuf;

/// ANSI reset sequence shared by the status line and the encoder.
pub(crate) const RESET_ALL: &str = "\x1b[0m";

/// A block device selected on the command line.
#[derive(Debug, Clone)]
pub struct Device {
    name: String,
}

impl Device {
    /// Create a device from a CLI argument, stripping a `/dev/` prefix
    /// if present (`/dev/sda` and `sda` are equivalent).
    #[must_use]
    pub fn new(arg: &str) -> Self {
        let name = arg.strip_prefix("/dev/").unwrap_or(arg).to_string();
        Self { name }
    }

    /// Bare device name, e.g. `sda` or `nvme0n1`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the kernel counter file for this device.
    #[must_use]
    pub fn stat_path(&self) -> PathBuf {
        PathBuf::from(format!("/sys/block/{}/stat", self.name))
    }

    /// Human-readable model name from sysfs.
    ///
    /// Falls back to the raw device name when the model file is absent
    /// (virtual devices, md arrays); never an error.
    #[must_use]
    pub fn model(&self) -> String {
        let path = format!("/sys/class/block/{}/device/model", self.name);
        match fs::read_to_string(path) {
            Ok(model) => {
                let trimmed = model.trim();
                if trimmed.is_empty() {
                    self.name.clone()
                } else {
                    trimmed.to_string()
                }
            }
            Err(_) => self.name.clone(),
        }
    }

    /// Colored series key plus model name for the bottom status row.
    #[must_use]
    pub fn status_line(&self) -> String {
        const FG: &str = "\x1b[38;2;";
        const BG: &str = "\x1b[48;2;";
        format!(
            "{FG}0;192;0m{BG}0;0;0mRD {FG}192;0;0m{BG}0;0;0mWR \
             {FG}176;96;0m{BG}0;0;0mINFLIGHT {FG}255;255;255m{model}{RESET_ALL}",
            model = self.model()
        )
    }
}
