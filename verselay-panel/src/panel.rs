//! Settings modal assembly.
//!
//! [`SettingsPanel::open`] builds the modal's three sections from
//! declarative descriptors: visual options, translation providers, lyric
//! providers. Hosts walk the modal with a [`RowVisitor`] to materialize
//! toolkit widgets and drive interactions back through the view-models.

use crate::actions::{LocalCacheAction, TokenRefreshAction};
use crate::descriptor::{Control, OptionDescriptor};
use crate::providers::{ProviderListView, ProviderRow};
use crate::widgets::{HotkeyRow, OptionRow, SelectRow, StepperRow, TextRow, ToggleRow};
use std::sync::Arc;
use verselay_core::{
    ConfigStore, ProviderAction, ProviderDescriptor, ProviderKind, ProviderRegistry, SettingsBus,
    TogglePolicy, TokenSource,
};

/// Widget-descriptor to render-function seam.
///
/// The behavioral contract: current row state in, rendered affordance
/// out; the host wires its widget callbacks back to the view-model
/// mutation methods.
pub trait RowVisitor {
    fn section(&mut self, title: &str);
    fn toggle(&mut self, descriptor: &OptionDescriptor, row: &ToggleRow);
    fn stepper(&mut self, descriptor: &OptionDescriptor, row: &StepperRow);
    fn select(&mut self, descriptor: &OptionDescriptor, row: &SelectRow);
    fn text(&mut self, descriptor: &OptionDescriptor, row: &TextRow);
    fn hotkey(&mut self, descriptor: &OptionDescriptor, row: &HotkeyRow);
    fn provider(&mut self, row: &ProviderRow);
}

/// One bound settings row
pub struct OptionEntry {
    pub descriptor: OptionDescriptor,
    pub row: OptionRow,
}

/// The open settings modal: bound option rows plus the two provider lists
pub struct SettingsModal {
    config: ConfigStore,
    options: Vec<OptionEntry>,
    translation: ProviderListView,
    lyrics: ProviderListView,
}

impl SettingsModal {
    /// Walk all currently visible rows
    pub fn render(&self, visitor: &mut dyn RowVisitor) {
        visitor.section("Options");
        for entry in &self.options {
            if !entry.descriptor.is_visible(&self.config) {
                continue;
            }
            match &entry.row {
                OptionRow::Toggle(row) => visitor.toggle(&entry.descriptor, row),
                OptionRow::Stepper(row) => visitor.stepper(&entry.descriptor, row),
                OptionRow::Select(row) => visitor.select(&entry.descriptor, row),
                OptionRow::Text(row) => visitor.text(&entry.descriptor, row),
                OptionRow::Hotkey(row) => visitor.hotkey(&entry.descriptor, row),
            }
        }

        visitor.section("Translation providers");
        for row in self.translation.rows() {
            visitor.provider(&row);
        }

        visitor.section("Lyrics providers");
        for row in self.lyrics.rows() {
            visitor.provider(&row);
        }
    }

    /// Get a bound option row for interaction
    pub fn option_mut(&mut self, key: &str) -> Option<&mut OptionRow> {
        self.options
            .iter_mut()
            .find(|entry| entry.descriptor.key == key)
            .map(|entry| &mut entry.row)
    }

    #[must_use]
    pub const fn translation(&self) -> &ProviderListView {
        &self.translation
    }

    pub fn translation_mut(&mut self) -> &mut ProviderListView {
        &mut self.translation
    }

    #[must_use]
    pub const fn lyrics(&self) -> &ProviderListView {
        &self.lyrics
    }

    pub fn lyrics_mut(&mut self) -> &mut ProviderListView {
        &mut self.lyrics
    }
}

/// Entry point for the settings surface
pub struct SettingsPanel {
    config: ConfigStore,
    bus: SettingsBus,
    host_version: String,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl SettingsPanel {
    #[must_use]
    pub fn new(config: ConfigStore, bus: SettingsBus, host_version: impl Into<String>) -> Self {
        Self {
            config,
            bus,
            host_version: host_version.into(),
            token_source: None,
        }
    }

    /// Attach the token endpoint backing the refresh-token affordance
    #[must_use]
    pub fn with_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Open the modal with the default option and provider sets
    #[must_use]
    pub fn open(&self) -> SettingsModal {
        self.open_with(
            default_visual_options(),
            default_translation_providers(),
            default_lyric_providers(),
        )
    }

    /// Open the modal with explicit descriptor sets
    #[must_use]
    pub fn open_with(
        &self,
        options: Vec<OptionDescriptor>,
        translation: Vec<ProviderDescriptor>,
        lyrics: Vec<ProviderDescriptor>,
    ) -> SettingsModal {
        let options = options
            .into_iter()
            .map(|descriptor| OptionEntry {
                row: OptionRow::bind(&descriptor, &self.config, &self.bus),
                descriptor,
            })
            .collect();

        let translation = ProviderListView::new(ProviderRegistry::new(
            ProviderKind::Translation,
            translation,
            self.config.clone(),
            self.bus.clone(),
            self.host_version.clone(),
        ));
        let lyrics = ProviderListView::new(ProviderRegistry::new(
            ProviderKind::Lyrics,
            lyrics,
            self.config.clone(),
            self.bus.clone(),
            self.host_version.clone(),
        ));

        SettingsModal {
            config: self.config.clone(),
            options,
            translation,
            lyrics,
        }
    }

    /// Build the cache-clear affordance for the `local` provider row
    #[must_use]
    pub fn cache_action(&self) -> LocalCacheAction {
        LocalCacheAction::new(self.config.clone())
    }

    /// Build the token-refresh affordance, if a token source is attached
    #[must_use]
    pub fn token_refresh_action(&self) -> Option<TokenRefreshAction> {
        self.token_source
            .clone()
            .map(TokenRefreshAction::new)
    }
}

fn not_colorful(config: &ConfigStore) -> bool {
    !config.get_bool("visual:colorful", true)
}

/// The default visual options section
#[must_use]
pub fn default_visual_options() -> Vec<OptionDescriptor> {
    const ALIGNMENTS: &[(&str, &str)] = &[
        ("left", "Left"),
        ("center", "Center"),
        ("right", "Right"),
    ];
    const LINE_COUNTS: &[(&str, &str)] = &[
        ("0", "0"),
        ("1", "1"),
        ("2", "2"),
        ("3", "3"),
        ("4", "4"),
    ];

    vec![
        OptionDescriptor::new(
            "playbar-button",
            "Playbar button",
            Control::Toggle { default: false },
        )
        .with_info("Replace the player's lyrics button with the overlay."),
        OptionDescriptor::new(
            "global-delay",
            "Global delay",
            Control::Stepper {
                min: -10_000,
                max: 10_000,
                step: 250,
                default: 0,
            },
        )
        .with_info("Offset in milliseconds applied to every track."),
        OptionDescriptor::new(
            "font-size",
            "Font size",
            Control::Stepper {
                min: 16,
                max: 96,
                step: 2,
                default: 32,
            },
        )
        .with_info("(or Ctrl + mouse scroll in the main window)"),
        OptionDescriptor::new(
            "alignment",
            "Lyrics alignment",
            Control::Select {
                options: ALIGNMENTS,
                default: "center",
            },
        ),
        OptionDescriptor::new(
            "fullscreen-key",
            "Fullscreen hotkey",
            Control::Hotkey { default: "f11" },
        ),
        OptionDescriptor::new(
            "lines-before",
            "Compact sync: lines shown before",
            Control::Select {
                options: LINE_COUNTS,
                default: "0",
            },
        ),
        OptionDescriptor::new(
            "lines-after",
            "Compact sync: lines shown after",
            Control::Select {
                options: LINE_COUNTS,
                default: "1",
            },
        ),
        OptionDescriptor::new(
            "fade-blur",
            "Compact sync: fade-out blur",
            Control::Toggle { default: true },
        ),
        OptionDescriptor::new("noise", "Noise overlay", Control::Toggle { default: true }),
        OptionDescriptor::new(
            "colorful",
            "Colorful background",
            Control::Toggle { default: true },
        ),
        OptionDescriptor::new(
            "background-color",
            "Background color",
            Control::Text {
                default: "#000000",
            },
        )
        .visible_when(not_colorful),
        OptionDescriptor::new(
            "active-color",
            "Active text color",
            Control::Text {
                default: "#ffffff",
            },
        )
        .visible_when(not_colorful),
        OptionDescriptor::new(
            "inactive-color",
            "Inactive text color",
            Control::Text {
                default: "#b3b3b3",
            },
        )
        .visible_when(not_colorful),
        OptionDescriptor::new(
            "highlight-color",
            "Highlight text background",
            Control::Text {
                default: "#3a3a3a",
            },
        )
        .visible_when(not_colorful),
        OptionDescriptor::new(
            "ja-detect-threshold",
            "Text conversion: Japanese detection threshold",
            Control::Stepper {
                min: 0,
                max: 100,
                step: 5,
                default: 40,
            },
        )
        .with_info(
            "Checks whether kana dominate the lyrics. Above the threshold the text \
             is treated as Japanese. Expressed as a percentage.",
        ),
        OptionDescriptor::new(
            "hans-detect-threshold",
            "Text conversion: Traditional-Simplified detection threshold",
            Control::Stepper {
                min: 0,
                max: 100,
                step: 5,
                default: 40,
            },
        )
        .with_info(
            "Checks whether Traditional or Simplified characters dominate the \
             lyrics. Expressed as a percentage.",
        ),
    ]
}

/// The default translation provider list
#[must_use]
pub fn default_translation_providers() -> Vec<ProviderDescriptor> {
    vec![ProviderDescriptor::new(
        "baidu",
        "Batch translation via the Baidu API. Credential format <code>appid:secret</code>.",
    )
    .enabled_by_default(false)
    .with_credential()]
}

/// The default lyric provider list
#[must_use]
pub fn default_lyric_providers() -> Vec<ProviderDescriptor> {
    vec![
        ProviderDescriptor::new(
            "musixmatch",
            "Fully synced lyrics with the largest coverage. Requires a user token.",
        )
        .with_credential()
        .with_action(ProviderAction::RefreshToken),
        ProviderDescriptor::new("netease", "Synced lyrics for Chinese releases."),
        ProviderDescriptor::new("spotify", "Lyrics from the host player itself."),
        ProviderDescriptor::new("genius", "Text lyrics with annotations.").with_toggle_policy(
            TogglePolicy::LockedAtOrAbove {
                host_version: "1.2.31".to_string(),
            },
        ),
        ProviderDescriptor::new("local", "Lyrics cached or loaded from local files.")
            .with_action(ProviderAction::ClearCache),
    ]
}
