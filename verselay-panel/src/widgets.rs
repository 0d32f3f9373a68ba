//! Per-row widget view-models.
//!
//! Each row binds one option key to its widget kind: an interaction
//! mutates the row's transient state, writes through the config store,
//! and broadcasts a change notification so other open views stay
//! consistent. Rendering is the host's job via [`crate::RowVisitor`].

use crate::descriptor::{Control, OptionDescriptor};
use crate::hotkey::{HotkeyRecorder, KeyOutcome};
use verselay_core::{ConfigStore, SettingValue, SettingsBus, SettingsEvent};

/// Namespace for the visual options section
const VISUAL_NS: &str = "visual";

fn visual_key(key: &str) -> String {
    format!("{VISUAL_NS}:{key}")
}

fn notify(bus: &SettingsBus, key: &str, value: SettingValue) {
    bus.publish(SettingsEvent::OptionChanged {
        name: key.to_string(),
        value,
    });
}

/// On/off switch row
#[derive(Debug)]
pub struct ToggleRow {
    key: &'static str,
    value: bool,
    config: ConfigStore,
    bus: SettingsBus,
}

impl ToggleRow {
    #[must_use]
    pub fn new(key: &'static str, default: bool, config: ConfigStore, bus: SettingsBus) -> Self {
        let value = config.get_bool(&visual_key(key), default);
        Self {
            key,
            value,
            config,
            bus,
        }
    }

    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Flip the switch, persisting and notifying. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.value = !self.value;
        self.config.set_bool(&visual_key(self.key), self.value);
        notify(&self.bus, self.key, SettingValue::Bool(self.value));
        self.value
    }
}

/// Numeric stepper row with min/max/step constraints
#[derive(Debug)]
pub struct StepperRow {
    key: &'static str,
    min: i64,
    max: i64,
    step: i64,
    value: i64,
    config: ConfigStore,
    bus: SettingsBus,
}

impl StepperRow {
    #[must_use]
    pub fn new(
        key: &'static str,
        min: i64,
        max: i64,
        step: i64,
        default: i64,
        config: ConfigStore,
        bus: SettingsBus,
    ) -> Self {
        let value = config.get_i64(&visual_key(key), default).clamp(min, max);
        Self {
            key,
            min,
            max,
            step,
            value,
            config,
            bus,
        }
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.value > self.min
    }

    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn decrement(&mut self) -> i64 {
        self.adjust(-1)
    }

    pub fn increment(&mut self) -> i64 {
        self.adjust(1)
    }

    fn adjust(&mut self, direction: i64) -> i64 {
        let next = (self.value + direction * self.step).clamp(self.min, self.max);
        if next != self.value {
            self.value = next;
            self.config.set_i64(&visual_key(self.key), next);
            notify(&self.bus, self.key, SettingValue::Int(next));
        }
        self.value
    }
}

/// Dropdown row over enumerated choices
#[derive(Debug)]
pub struct SelectRow {
    key: &'static str,
    options: &'static [(&'static str, &'static str)],
    value: String,
    config: ConfigStore,
    bus: SettingsBus,
}

impl SelectRow {
    #[must_use]
    pub fn new(
        key: &'static str,
        options: &'static [(&'static str, &'static str)],
        default: &'static str,
        config: ConfigStore,
        bus: SettingsBus,
    ) -> Self {
        let value = config.get_str(&visual_key(key), default);
        Self {
            key,
            options,
            value,
            config,
            bus,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn options(&self) -> &'static [(&'static str, &'static str)] {
        self.options
    }

    /// Select one of the enumerated choices.
    ///
    /// Numeric-looking choices are broadcast as integers; anything not in
    /// the choice list is ignored and returns `false`.
    pub fn select(&mut self, choice: &str) -> bool {
        if !self.options.iter().any(|(value, _)| *value == choice) {
            return false;
        }

        self.value = choice.to_string();
        self.config.set_str(&visual_key(self.key), choice);

        let value = choice
            .parse::<i64>()
            .map_or_else(|_| SettingValue::Text(choice.to_string()), SettingValue::Int);
        notify(&self.bus, self.key, value);
        true
    }
}

/// Free text input row (colors etc.)
#[derive(Debug)]
pub struct TextRow {
    key: &'static str,
    value: String,
    config: ConfigStore,
    bus: SettingsBus,
}

impl TextRow {
    #[must_use]
    pub fn new(
        key: &'static str,
        default: &'static str,
        config: ConfigStore,
        bus: SettingsBus,
    ) -> Self {
        let value = config.get_str(&visual_key(key), default);
        Self {
            key,
            value,
            config,
            bus,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.config.set_str(&visual_key(self.key), value);
        notify(&self.bus, self.key, SettingValue::Text(value.to_string()));
    }
}

/// Hotkey recorder row; commits happen on blur or escape
#[derive(Debug)]
pub struct HotkeyRow {
    key: &'static str,
    recorder: HotkeyRecorder,
    config: ConfigStore,
    bus: SettingsBus,
}

impl HotkeyRow {
    #[must_use]
    pub fn new(
        key: &'static str,
        default: &'static str,
        config: ConfigStore,
        bus: SettingsBus,
    ) -> Self {
        let value = config.get_str(&visual_key(key), default);
        Self {
            key,
            recorder: HotkeyRecorder::new(value),
            config,
            bus,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        self.recorder.value()
    }

    #[must_use]
    pub fn display(&self) -> &str {
        self.recorder.display()
    }

    pub fn focus(&mut self) {
        self.recorder.focus();
    }

    pub fn key_down(&mut self, modifiers: &[&str], key: &str) -> KeyOutcome {
        let outcome = self.recorder.key_down(modifiers, key);
        if outcome == KeyOutcome::Cleared {
            self.commit();
        }
        outcome
    }

    pub fn blur(&mut self) {
        self.recorder.blur();
        self.commit();
    }

    fn commit(&self) {
        let value = self.recorder.value();
        self.config.set_str(&visual_key(self.key), value);
        notify(&self.bus, self.key, SettingValue::Text(value.to_string()));
    }
}

/// A settings row: its descriptor plus the bound widget view-model
pub enum OptionRow {
    Toggle(ToggleRow),
    Stepper(StepperRow),
    Select(SelectRow),
    Text(TextRow),
    Hotkey(HotkeyRow),
}

impl OptionRow {
    /// Bind a descriptor's widget to the config store
    #[must_use]
    pub fn bind(descriptor: &OptionDescriptor, config: &ConfigStore, bus: &SettingsBus) -> Self {
        match descriptor.control {
            Control::Toggle { default } => Self::Toggle(ToggleRow::new(
                descriptor.key,
                default,
                config.clone(),
                bus.clone(),
            )),
            Control::Stepper {
                min,
                max,
                step,
                default,
            } => Self::Stepper(StepperRow::new(
                descriptor.key,
                min,
                max,
                step,
                default,
                config.clone(),
                bus.clone(),
            )),
            Control::Select { options, default } => Self::Select(SelectRow::new(
                descriptor.key,
                options,
                default,
                config.clone(),
                bus.clone(),
            )),
            Control::Text { default } => Self::Text(TextRow::new(
                descriptor.key,
                default,
                config.clone(),
                bus.clone(),
            )),
            Control::Hotkey { default } => Self::Hotkey(HotkeyRow::new(
                descriptor.key,
                default,
                config.clone(),
                bus.clone(),
            )),
        }
    }
}
