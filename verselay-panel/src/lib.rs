pub mod actions;
pub mod descriptor;
pub mod hotkey;
pub mod panel;
pub mod providers;
pub mod widgets;

pub use actions::{LocalCacheAction, RefreshState, TokenRefreshAction, LOCAL_LYRICS_KEY};
pub use descriptor::{Control, OptionDescriptor, VisibilityFn};
pub use hotkey::{HotkeyRecorder, KeyOutcome, RecorderState};
pub use panel::{
    default_lyric_providers, default_translation_providers, default_visual_options, OptionEntry,
    RowVisitor, SettingsModal, SettingsPanel,
};
pub use providers::{ProviderListView, ProviderRow};
pub use widgets::{HotkeyRow, OptionRow, SelectRow, StepperRow, TextRow, ToggleRow};
