//! Settings file loading and saving
//!
//! Every operation here logs its failures through the plugin logger and
//! leaves the in-memory record fully usable. The returned `Result` carries
//! the same failure for callers that want to react; ignoring it is fine.

use std::path::{Path, PathBuf};

use crate::descriptor::PluginDescriptor;
use crate::error::{SettingsError, SettingsResult};
use crate::logging::PluginLogger;
use crate::properties::Properties;

use super::{
    keys, Settings, CONFIG_FILE, DEFAULT_KICK_TIMEOUT_SECS, DEFAULT_PLAYER_COUNT_THRESHOLD,
    DEFAULT_TIMEOUT_CHECK_SECS, SAMPLE_EXEMPT_PLAYERS,
};

/// Outcome of reading a settings file that could be opened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Integer keys that were missing or malformed and fell back to defaults
    pub defaulted: Vec<&'static str>,
}

impl LoadReport {
    /// True when every integer key parsed
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty()
    }
}

/// Owns the [`Settings`] record and its backing file
#[derive(Debug)]
pub struct SettingsStore<L> {
    settings: Settings,
    logger: L,
    version: String,
}

impl<L: PluginLogger> SettingsStore<L> {
    /// Create a store holding the built-in defaults
    pub fn new(logger: L, descriptor: &PluginDescriptor) -> Self {
        Self::with_settings(Settings::default(), logger, descriptor)
    }

    /// Create a store around an existing record
    pub fn with_settings(settings: Settings, logger: L, descriptor: &PluginDescriptor) -> Self {
        Self {
            settings,
            logger,
            version: descriptor.version.clone(),
        }
    }

    /// Path of the settings file inside `config_dir`
    pub fn config_path(config_dir: impl AsRef<Path>) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILE)
    }

    /// Prepare the config folder and load the settings file.
    ///
    /// Creates the folder when absent, writes a default file (with the
    /// sample exemption list) when there is none, then loads the file.
    pub fn init(&mut self, config_dir: impl AsRef<Path>) -> SettingsResult<LoadReport> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            self.logger.info("Config folder not found, creating.");
            if let Err(source) = std::fs::create_dir_all(config_dir) {
                self.logger
                    .severe(&format!("Failed creating config folder: {}", source));
                return Err(SettingsError::CreateDir {
                    path: config_dir.to_path_buf(),
                    source,
                });
            }
        }

        let path = Self::config_path(config_dir);
        let written = if path.exists() {
            Ok(())
        } else {
            self.logger.info("Config file is missing, creating.");
            self.write_file(&path, true)
        };

        let report = self.load(&path)?;
        written?;
        Ok(report)
    }

    /// Write the current record to the settings file, replacing it.
    pub fn save(&self, config_dir: impl AsRef<Path>) -> SettingsResult<()> {
        self.write_file(&Self::config_path(config_dir), false)
    }

    /// Read the settings file again.
    ///
    /// Exempt players found in the file are appended to the current list,
    /// not substituted for it.
    pub fn reload(&mut self, config_dir: impl AsRef<Path>) -> SettingsResult<LoadReport> {
        self.load(&Self::config_path(config_dir))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Version string written into the settings file header
    pub fn version(&self) -> &str {
        &self.version
    }

    fn load(&mut self, path: &Path) -> SettingsResult<LoadReport> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                self.logger
                    .severe(&format!("Failed reading config file: {}", source));
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let props = Properties::parse(&decode(bytes));
        let mut report = LoadReport::default();

        self.settings.kick_timeout_secs = self.read_seconds(
            &props,
            keys::KICK_TIMEOUT,
            "kick timeout",
            DEFAULT_KICK_TIMEOUT_SECS,
            &mut report,
        );

        // Absent text keys become empty, not the default sentence
        self.settings.kick_message = props.get(keys::KICK_MESSAGE).unwrap_or_default().to_string();
        self.settings.kick_broadcast_message = props
            .get(keys::KICK_BROADCAST)
            .unwrap_or_default()
            .to_string();

        self.settings.timeout_check_interval_secs = self.read_seconds(
            &props,
            keys::TIMEOUT_CHECK_INTERVAL,
            "timeout check interval",
            DEFAULT_TIMEOUT_CHECK_SECS,
            &mut report,
        );
        self.settings.player_count_threshold = self.read_seconds(
            &props,
            keys::PLAYER_COUNT_THRESHOLD,
            "player count threshold",
            DEFAULT_PLAYER_COUNT_THRESHOLD,
            &mut report,
        );

        self.settings.use_jump_ignore = props
            .get(keys::USE_JUMP_IGNORING)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        // An absent key leaves the list alone; a present one appends
        if let Some(list) = props.get(keys::EXEMPT_PLAYERS) {
            self.settings.exempt_players.extend(
                list.split(',')
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            );
        }

        tracing::debug!(
            "Loaded settings from {:?} ({} defaulted)",
            path,
            report.defaulted.len()
        );
        Ok(report)
    }

    /// Parse a non-negative integer key, falling back to `default`.
    fn read_seconds(
        &self,
        props: &Properties,
        key: &'static str,
        label: &str,
        default: u32,
        report: &mut LoadReport,
    ) -> u32 {
        match props.get(key).map(str::parse::<u32>) {
            Some(Ok(value)) => value,
            _ => {
                self.logger.severe(&format!("Failed reading {}.", label));
                report.defaulted.push(key);
                default
            }
        }
    }

    fn write_file(&self, path: &Path, first_run: bool) -> SettingsResult<()> {
        let settings = &self.settings;

        let exempt_list = if settings.exempt_players.is_empty() && first_run {
            SAMPLE_EXEMPT_PLAYERS.join(",")
        } else {
            settings.exempt_players.join(",")
        };

        let props: Properties = [
            (keys::KICK_TIMEOUT, settings.kick_timeout_secs.to_string()),
            (keys::KICK_MESSAGE, settings.kick_message.clone()),
            (keys::KICK_BROADCAST, settings.kick_broadcast_message.clone()),
            (
                keys::TIMEOUT_CHECK_INTERVAL,
                settings.timeout_check_interval_secs.to_string(),
            ),
            (
                keys::PLAYER_COUNT_THRESHOLD,
                settings.player_count_threshold.to_string(),
            ),
            (keys::USE_JUMP_IGNORING, settings.use_jump_ignore.to_string()),
            (keys::EXEMPT_PLAYERS, exempt_list),
        ]
        .into_iter()
        .collect();

        let content = props.store(&header(&self.version, first_run));
        match std::fs::write(path, content) {
            Ok(()) => {
                self.logger.info("Finished writing config file.");
                tracing::debug!("Saved settings to {:?}", path);
                Ok(())
            }
            Err(source) => {
                self.logger
                    .severe(&format!("Failed writing config file: {}", source));
                Err(SettingsError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// UTF-8 when valid, otherwise one char per byte (ISO-8859-1).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

fn header(version: &str, first_run: bool) -> String {
    let title = if first_run {
        format!(
            "AfkBooter settings, auto-created with defaults. Version {}. Please change.",
            version
        )
    } else {
        format!("AfkBooter settings. Version {}.", version)
    };

    [
        title.as_str(),
        "kick-timeout: seconds a player may stay idle before being kicked.",
        "kick-message: message the kicked player sees.",
        "kick-broadcast: message everyone sees after a kick, shown after the player's name.",
        "timeout-check-interval: seconds between checks for idle players.",
        "exempt-players: comma separated names that are never kicked.",
        "player-count-threshold: players needed online before idle kicks start. 0 means always.",
        "use-jump-ignoring: true to ignore vertical movement for activity (experimental).",
    ]
    .join("\n")
}
