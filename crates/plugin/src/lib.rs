//! AfkBooter Plugin - Host Layer
//!
//! This crate is what the game-server host talks to. It owns the plugin's
//! settings behind a lock so host callbacks on any thread can read them,
//! installs logging on enable and flushes settings on disable.
//!
//! # Example
//!
//! ```ignore
//! let plugin = afkbooter::AfkBooter::from_manifest("plugin.toml", "plugins/AfkBooter")?;
//! let _ = plugin.on_enable();
//!
//! let timeout = plugin.settings().kick_timeout();
//! plugin.with_settings_mut(|s| s.add_exempt_player("alice"));
//!
//! let _ = plugin.on_disable();
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

use afkbooter_core::{
    DescriptorError, LoadReport, PluginDescriptor, PluginLogger, Settings, SettingsResult,
    SettingsStore, Severity, TracingLogger,
};

pub use afkbooter_core;

/// Settings store shared between the plugin and host callbacks
pub type SharedSettings = Arc<RwLock<SettingsStore<TracingLogger>>>;

/// Install the fmt subscriber, honoring `RUST_LOG` (default `info`).
///
/// Does nothing if the host already installed a subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The idle-kick plugin instance
pub struct AfkBooter {
    descriptor: PluginDescriptor,
    data_folder: PathBuf,
    logger: TracingLogger,
    store: SharedSettings,
}

impl AfkBooter {
    /// Create the plugin with default settings; nothing touches disk until
    /// [`on_enable`](Self::on_enable).
    pub fn new(descriptor: PluginDescriptor, data_folder: impl Into<PathBuf>) -> Self {
        let logger = TracingLogger::new(descriptor.name.clone());
        let store = SettingsStore::new(logger.clone(), &descriptor);
        Self {
            descriptor,
            data_folder: data_folder.into(),
            logger,
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Create the plugin from a `plugin.toml` manifest.
    pub fn from_manifest(
        manifest: impl AsRef<Path>,
        data_folder: impl Into<PathBuf>,
    ) -> Result<Self, DescriptorError> {
        let descriptor = PluginDescriptor::load(manifest)?;
        Ok(Self::new(descriptor, data_folder))
    }

    /// Called by the host when the plugin is enabled.
    ///
    /// Installs logging and initializes settings from the data folder.
    /// A settings failure is logged and returned; the plugin stays usable
    /// with whatever values the record holds.
    #[instrument(skip_all)]
    pub fn on_enable(&self) -> SettingsResult<LoadReport> {
        init_logging();
        let result = self.store.write().init(&self.data_folder);
        self.log(
            &format!("{} is enabled.", self.descriptor.full_name()),
            Severity::Info,
        );
        result
    }

    /// Called by the host when the plugin is disabled. Saves settings.
    #[instrument(skip_all)]
    pub fn on_disable(&self) -> SettingsResult<()> {
        let result = self.save_settings();
        self.log(
            &format!("{} is disabled.", self.descriptor.full_name()),
            Severity::Info,
        );
        result
    }

    /// Log through the plugin's prefixed logger
    pub fn log(&self, message: &str, severity: Severity) {
        self.logger.log(message, severity);
    }

    /// Read access to the current settings
    pub fn settings(&self) -> MappedRwLockReadGuard<'_, Settings> {
        RwLockReadGuard::map(self.store.read(), |store| store.settings())
    }

    /// Mutate settings in memory. Call [`save_settings`](Self::save_settings)
    /// to persist.
    pub fn with_settings_mut<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        f(self.store.write().settings_mut())
    }

    pub fn save_settings(&self) -> SettingsResult<()> {
        self.store.read().save(&self.data_folder)
    }

    /// Re-read the settings file. Exempt players are appended.
    pub fn reload_settings(&self) -> SettingsResult<LoadReport> {
        self.store.write().reload(&self.data_folder)
    }

    /// Handle for host callbacks running on other threads
    pub fn shared(&self) -> SharedSettings {
        Arc::clone(&self.store)
    }

    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }
}
