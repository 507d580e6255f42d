//! Idle-kick settings
//!
//! [`Settings`] is the in-memory record every other part of the plugin reads
//! from. [`SettingsStore`] owns one and moves it to and from the
//! `afkbooter.properties` file in the plugin's config folder.
//!
//! # Example
//!
//! ```ignore
//! use afkbooter_core::{PluginDescriptor, SettingsStore, TracingLogger};
//!
//! let descriptor = PluginDescriptor::new("AfkBooter", "1.2.1");
//! let mut store = SettingsStore::new(TracingLogger::new("AfkBooter"), &descriptor);
//! let _ = store.init("plugins/AfkBooter");
//!
//! if !store.settings().is_exempt("alice") {
//!     // kick after store.settings().kick_timeout()
//! }
//! ```

mod store;

use std::time::Duration;

pub use store::{LoadReport, SettingsStore};

/// Settings file name inside the config folder
pub const CONFIG_FILE: &str = "afkbooter.properties";

/// Property keys as they appear in the settings file
pub mod keys {
    pub const KICK_MESSAGE: &str = "kick-message";
    pub const KICK_BROADCAST: &str = "kick-broadcast";
    pub const KICK_TIMEOUT: &str = "kick-timeout";
    pub const TIMEOUT_CHECK_INTERVAL: &str = "timeout-check-interval";
    pub const EXEMPT_PLAYERS: &str = "exempt-players";
    pub const PLAYER_COUNT_THRESHOLD: &str = "player-count-threshold";
    pub const USE_JUMP_IGNORING: &str = "use-jump-ignoring";
}

pub const DEFAULT_KICK_TIMEOUT_SECS: u32 = 30;
pub const DEFAULT_KICK_MESSAGE: &str = "Kicked for idling.";
pub const DEFAULT_KICK_BROADCAST: &str = "kicked for idling.";
pub const DEFAULT_TIMEOUT_CHECK_SECS: u32 = 10;
pub const DEFAULT_PLAYER_COUNT_THRESHOLD: u32 = 0;
pub const DEFAULT_USE_JUMP_IGNORE: bool = false;

/// Placeholder names written into a freshly created settings file so
/// operators can see the list syntax.
pub const SAMPLE_EXEMPT_PLAYERS: [&str; 3] = ["name1", "name2", "name3"];

/// Tunable parameters of the idle-kick plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    kick_timeout_secs: u32,
    kick_message: String,
    kick_broadcast_message: String,
    timeout_check_interval_secs: u32,
    player_count_threshold: u32,
    use_jump_ignore: bool,
    /// Insertion ordered, duplicates allowed
    exempt_players: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kick_timeout_secs: DEFAULT_KICK_TIMEOUT_SECS,
            kick_message: DEFAULT_KICK_MESSAGE.to_string(),
            kick_broadcast_message: DEFAULT_KICK_BROADCAST.to_string(),
            timeout_check_interval_secs: DEFAULT_TIMEOUT_CHECK_SECS,
            player_count_threshold: DEFAULT_PLAYER_COUNT_THRESHOLD,
            use_jump_ignore: DEFAULT_USE_JUMP_IGNORE,
            exempt_players: Vec::new(),
        }
    }
}

impl Settings {
    /// Create a record holding the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds a player may idle before being kicked
    pub fn kick_timeout_secs(&self) -> u32 {
        self.kick_timeout_secs
    }

    pub fn kick_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.kick_timeout_secs))
    }

    pub fn set_kick_timeout_secs(&mut self, secs: u32) {
        self.kick_timeout_secs = secs;
    }

    /// Message shown to the kicked player
    pub fn kick_message(&self) -> &str {
        &self.kick_message
    }

    pub fn set_kick_message(&mut self, message: impl Into<String>) {
        self.kick_message = message.into();
    }

    /// Message broadcast to everyone else, after the kicked player's name
    pub fn kick_broadcast_message(&self) -> &str {
        &self.kick_broadcast_message
    }

    pub fn set_kick_broadcast_message(&mut self, message: impl Into<String>) {
        self.kick_broadcast_message = message.into();
    }

    /// Seconds between idle sweeps
    pub fn timeout_check_interval_secs(&self) -> u32 {
        self.timeout_check_interval_secs
    }

    pub fn timeout_check_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_check_interval_secs))
    }

    pub fn set_timeout_check_interval_secs(&mut self, secs: u32) {
        self.timeout_check_interval_secs = secs;
    }

    /// Players that must be online before anyone is kicked. 0 means always.
    pub fn player_count_threshold(&self) -> u32 {
        self.player_count_threshold
    }

    pub fn set_player_count_threshold(&mut self, count: u32) {
        self.player_count_threshold = count;
    }

    /// Whether vertical movement is ignored when measuring activity
    pub fn use_jump_ignore(&self) -> bool {
        self.use_jump_ignore
    }

    pub fn set_use_jump_ignore(&mut self, enabled: bool) {
        self.use_jump_ignore = enabled;
    }

    pub fn exempt_players(&self) -> &[String] {
        &self.exempt_players
    }

    /// Replace the whole exemption list
    pub fn set_exempt_players(&mut self, players: Vec<String>) {
        self.exempt_players = players;
    }

    /// Append a name. Duplicates are kept.
    pub fn add_exempt_player(&mut self, name: impl Into<String>) {
        self.exempt_players.push(name.into());
    }

    /// Remove the first entry equal to `name`.
    ///
    /// Returns whether anything was removed; a missing name is not an error.
    pub fn remove_exempt_player(&mut self, name: &str) -> bool {
        match self.exempt_players.iter().position(|p| p == name) {
            Some(index) => {
                self.exempt_players.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt_players.iter().any(|p| p == name)
    }
}
