use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable behaviour of screens and event engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Dismiss the loading indicator when a screen stops being resumed (default: true).
    #[serde(default = "default_dismiss_on_inactive")]
    pub dismiss_on_inactive: bool,
    /// Message shown by `show_default_loading` (default: "Loading...").
    #[serde(default = "default_loading_message")]
    pub loading_message: String,
    #[serde(default)]
    pub windows: WindowSettings,
}

/// Default windows for the throttle and debounce engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Minimum interval between accepted clicks (default: 500).
    #[serde(default = "default_throttle_first_ms")]
    pub throttle_first_ms: u64,
    /// Quiet period before a settled click burst fires (default: 1000).
    #[serde(default = "default_throttle_latest_ms")]
    pub throttle_latest_ms: u64,
    /// Quiet period before text input reaches its transform (default: 500).
    #[serde(default = "default_input_debounce_ms")]
    pub input_debounce_ms: u64,
}

impl WindowSettings {
    pub fn throttle_first(&self) -> Duration {
        Duration::from_millis(self.throttle_first_ms)
    }

    pub fn throttle_latest(&self) -> Duration {
        Duration::from_millis(self.throttle_latest_ms)
    }

    pub fn input_debounce(&self) -> Duration {
        Duration::from_millis(self.input_debounce_ms)
    }
}

fn default_dismiss_on_inactive() -> bool {
    true
}

fn default_loading_message() -> String {
    "Loading...".to_string()
}

fn default_throttle_first_ms() -> u64 {
    500
}

fn default_throttle_latest_ms() -> u64 {
    1000
}

fn default_input_debounce_ms() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dismiss_on_inactive: default_dismiss_on_inactive(),
            loading_message: default_loading_message(),
            windows: WindowSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            throttle_first_ms: default_throttle_first_ms(),
            throttle_latest_ms: default_throttle_latest_ms(),
            input_debounce_ms: default_input_debounce_ms(),
        }
    }
}
