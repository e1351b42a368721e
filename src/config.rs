//! Centralized configuration and builder for opening a save directory.
//!
//! - `SaveConfig` collects the tunables (Net pair policy, fsync on write).
//! - `SaveFileBuilder` returns a `SaveConfig` or opens a `SaveFile` directly.
//!
//! Defaults:
//! - net = Auto (load net0/net1 when present)
//! - sync = true (fsync the replaced file and its directory after each write)
//!
//! The core reads no environment variables; the CLI maps its flags onto the builder.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::SaveError;
use crate::savefile::SaveFile;

/// Policy for the optional Net pair (`net0.bin` / `net1.bin`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NetMode {
    /// Load the pair when either file exists; a half-present pair is an error.
    #[default]
    Auto,
    /// Both files must exist.
    Required,
    /// Never touch the Net files.
    Off,
}

impl NetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NetMode::Auto => "auto",
            NetMode::Required => "required",
            NetMode::Off => "off",
        }
    }
}

impl FromStr for NetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(NetMode::Auto),
            "required" | "on" | "yes" | "1" => Ok(NetMode::Required),
            "off" | "no" | "0" => Ok(NetMode::Off),
            other => Err(format!(
                "unknown net mode '{}' (expected auto|required|off)",
                other
            )),
        }
    }
}

impl fmt::Display for NetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level configuration for a save-file session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveConfig {
    /// Whether/how to load the Net pair.
    pub net: NetMode,

    /// fsync the temp file before rename and the parent directory after it.
    pub sync: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            net: NetMode::Auto,
            sync: true,
        }
    }
}

impl SaveConfig {
    pub fn with_net(mut self, net: NetMode) -> Self {
        self.net = net;
        self
    }

    pub fn with_sync(mut self, on: bool) -> Self {
        self.sync = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for SaveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SaveConfig {{ net: {}, sync: {} }}", self.net, self.sync)
    }
}

/// Lightweight builder. `SaveFile::builder()` returns this.
#[derive(Clone, Debug, Default)]
pub struct SaveFileBuilder {
    cfg: SaveConfig,
}

impl SaveFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn net(mut self, net: NetMode) -> Self {
        self.cfg.net = net;
        self
    }

    pub fn sync(mut self, on: bool) -> Self {
        self.cfg.sync = on;
        self
    }

    pub fn build(self) -> SaveConfig {
        self.cfg
    }

    /// Open `dir` with the collected configuration.
    pub fn open(self, dir: &Path) -> Result<SaveFile, SaveError> {
        SaveFile::open_with(dir, self.cfg)
    }
}
