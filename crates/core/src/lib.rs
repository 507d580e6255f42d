//! AfkBooter - Core Logic
//!
//! Settings for the idle-kick plugin: the typed [`Settings`] record, the
//! [`SettingsStore`] that loads and saves `afkbooter.properties`, and the
//! collaborators the store needs from its host (a [`PluginLogger`] and a
//! [`PluginDescriptor`]).

pub mod descriptor;
pub mod error;
pub mod logging;
pub mod properties;
pub mod settings;

pub use descriptor::PluginDescriptor;
pub use error::{DescriptorError, SettingsError, SettingsResult};
pub use logging::{PluginLogger, RecordingLogger, Severity, TracingLogger};
pub use properties::Properties;
pub use settings::{LoadReport, Settings, SettingsStore, CONFIG_FILE};
