//! Settings state owned by the host
//!
//! The host mutates one [`SettingsState`] in response to user input and then
//! hands it to [`Screen::render`](crate::ui::Screen::render), which pushes
//! every value down the widget tree in a single pass.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use log::debug;

use crate::i18n::Language;
use crate::ui::screen::ScreenLift;
use crate::ui::styling::Theme;

/// Everything the settings screen displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub theme: Theme,
    pub language: Language,
    selected_tab: Option<String>,
    /// Selected radio value, keyed by tab value
    tab_values: BTreeMap<String, String>,
    pub screen_lift: ScreenLift,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_screen_lift(&mut self, lift: ScreenLift) {
        self.screen_lift = lift;
    }

    /// Blank values are ignored
    pub fn set_selected_tab(&mut self, tab: &str) {
        if tab.trim().is_empty() {
            debug!("Ignoring blank tab selection");
            return;
        }
        self.selected_tab = Some(tab.to_string());
    }

    pub fn selected_tab(&self) -> Option<&str> {
        self.selected_tab.as_deref()
    }

    /// Remember the radio value chosen on `tab`. Blank keys are ignored.
    pub fn set_selected_value_for_tab(&mut self, tab: &str, value: &str) {
        if tab.trim().is_empty() || value.trim().is_empty() {
            debug!("Ignoring blank value for tab {:?}", tab);
            return;
        }
        self.tab_values.insert(tab.to_string(), value.to_string());
    }

    pub fn selected_value_for_tab(&self, tab: &str) -> Option<&str> {
        self.tab_values.get(tab).map(String::as_str)
    }

    /// Every remembered (tab, value) pair in tab order
    pub fn tab_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tab_values
            .iter()
            .map(|(tab, value)| (tab.as_str(), value.as_str()))
    }
}
