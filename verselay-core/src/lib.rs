pub mod bus;
pub mod config;
pub mod error;
pub mod line;
pub mod paths;
pub mod provider;
pub mod store;
pub mod translate;

pub use bus::{SettingValue, SettingsBus, SettingsEvent};
pub use config::ConfigStore;
pub use error::{CoreError, Result};
pub use line::{is_time_ordered, join_texts, LyricLine};
pub use paths::{config_dir, prefs_path, CONFIG_DIR_NAME, PREFS_FILE_NAME};
pub use provider::{
    ProviderAction, ProviderDescriptor, ProviderKind, ProviderRegistry, SwapDirection,
    TogglePolicy,
};
pub use store::{JsonFileStore, MemoryStore, PrefStore};
pub use translate::{TokenSource, Translator};
