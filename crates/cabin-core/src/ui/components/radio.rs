//! Segmented single-choice control

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use log::trace;

use crate::error::{UiError, UiResult};
use crate::i18n::{Language, Localized, ResolvedText, validate_item};
use crate::ui::core::{
    Constraint, Drawable, Localizable, Measure, Themable, TouchEvent, TouchPoint, TouchResult,
    Touchable, ValueListener,
};
use crate::ui::font;
use crate::ui::paint;
use crate::ui::styling::{RadioColors, Style, Theme};

pub const RADIO_HEIGHT: u32 = 70;
pub const RADIO_CORNER_RADIUS: u32 = 35;
pub const RADIO_BORDER_WIDTH: u32 = 2;
/// Horizontal room around an item label
pub const ITEM_PADDING_HORIZONTAL: u32 = 26;
pub const ITEM_MIN_WIDTH: u32 = 120;
/// Room on both sides for the selection to overshoot into
pub const ANIMATION_PADDING: u32 = 35;

// ============================================================================
// RadioButton
// ============================================================================

/// One choice of a [`Radio`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioButton {
    value: String,
    label: Localized,
}

impl RadioButton {
    /// Fails on a blank value or a label without translations
    pub fn new(value: &str, label: Localized) -> UiResult<Self> {
        validate_item(value, &label)?;
        Ok(Self {
            value: value.to_string(),
            label,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &Localized {
        &self.label
    }
}

// ============================================================================
// Radio
// ============================================================================

/// Row of equally wide choices with exactly zero or one selected.
///
/// # Examples
///
/// ```ignore
/// let mut radio = Radio::new(vec![
///     RadioButton::new("auto", Localized::new().with(Language::En, "Auto"))?,
///     RadioButton::new("day", Localized::new().with(Language::En, "Day"))?,
/// ])
/// .with_selected("auto");
/// radio.set_on_value_change(|value| log::info!("display mode: {value}"));
/// radio.select("day");
/// ```
pub struct Radio {
    buttons: Vec<RadioButton>,
    labels: Vec<ResolvedText>,
    selected: Option<String>,
    theme: Option<Theme>,
    language: Option<Language>,
    item_width: u32,
    measured: Size,
    bounds: Rectangle,
    on_value_change: Option<ValueListener>,
    dirty: bool,
}

impl core::fmt::Debug for Radio {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Radio")
            .field("buttons", &self.buttons)
            .field("selected", &self.selected)
            .field("theme", &self.theme)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Radio {
    pub fn new(buttons: Vec<RadioButton>) -> Self {
        let mut radio = Self {
            buttons: Vec::new(),
            labels: Vec::new(),
            selected: None,
            theme: None,
            language: None,
            item_width: ITEM_MIN_WIDTH,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            on_value_change: None,
            dirty: true,
        };
        radio.set_buttons(buttons);
        radio
    }

    /// Initial selection, without notifying
    pub fn with_selected(mut self, value: &str) -> Self {
        self.set_selected_value(value, false);
        self
    }

    pub fn set_on_value_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_value_change = Some(Box::new(listener));
    }

    /// Replace the choices. A selection that no longer exists is dropped.
    pub fn set_buttons(&mut self, buttons: Vec<RadioButton>) {
        self.labels = buttons
            .iter()
            .map(|button| ResolvedText::initial(button.label(), self.language, button.value()))
            .collect();
        self.buttons = buttons;

        if let Some(selected) = &self.selected
            && !self.has_value(selected)
        {
            trace!("Radio selection {} dropped with its button", selected);
            self.selected = None;
        }
        self.dirty = true;
    }

    pub fn buttons(&self) -> &[RadioButton] {
        &self.buttons
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.index_of(value).is_some()
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.buttons.iter().position(|button| button.value() == value)
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.as_deref().and_then(|value| self.index_of(value))
    }

    /// Label currently shown for the item at `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(ResolvedText::as_str)
    }

    /// User selection: notifies on change
    pub fn select(&mut self, value: &str) -> bool {
        self.set_selected_value(value, true)
    }

    /// Change the selection.
    ///
    /// Unknown values and the current value are ignored. Returns `true` if
    /// the selection changed; the listener fires only then, and only when
    /// `notify` is set.
    pub fn set_selected_value(&mut self, value: &str, notify: bool) -> bool {
        if !self.has_value(value) {
            trace!("Ignoring unknown radio value {}", value);
            return false;
        }
        if self.selected.as_deref() == Some(value) {
            return false;
        }

        self.selected = Some(value.to_string());
        self.dirty = true;

        if notify && let Some(listener) = self.on_value_change.as_mut() {
            listener(value);
        }
        true
    }

    /// Equal width of every item, from the last measure pass
    pub fn item_width(&self) -> u32 {
        self.item_width
    }

    /// Track behind the items, excluding the animation padding
    pub fn track_rect(&self) -> Rectangle {
        Rectangle::new(
            self.bounds.top_left + Point::new(ANIMATION_PADDING as i32, 0),
            Size::new(
                self.item_width * self.buttons.len() as u32,
                self.bounds.size.height,
            ),
        )
    }

    pub fn item_rect(&self, index: usize) -> Rectangle {
        let track = self.track_rect();
        Rectangle::new(
            track.top_left + Point::new((self.item_width * index as u32) as i32, 0),
            Size::new(self.item_width, track.size.height),
        )
    }

    /// Item under `point`, if any
    pub fn item_at(&self, point: TouchPoint) -> Option<usize> {
        let p = point.to_point();
        (0..self.buttons.len()).find(|&index| self.item_rect(index).contains(p))
    }

    fn colors(&self) -> RadioColors {
        RadioColors::for_theme(self.theme.unwrap_or_default())
    }

    fn draw_selection<D: DrawTarget<Color = Rgb888>>(
        &self,
        display: &mut D,
        index: usize,
        colors: &RadioColors,
    ) -> Result<(), D::Error> {
        let item = self.item_rect(index);
        // 1px inset from the track
        let selection = Rectangle::new(
            item.top_left + Point::new(1, 1),
            Size::new(
                item.size.width.saturating_sub(1),
                item.size.height.saturating_sub(2),
            ),
        );

        paint::fill_gradient_rounded(
            display,
            selection,
            RADIO_CORNER_RADIUS,
            colors.gradient_start,
            colors.gradient_end,
            colors.gradient_axis,
        )?;

        let border = Style::new()
            .with_border(Some(colors.border_side), RADIO_BORDER_WIDTH)
            .with_corner_radius(RADIO_CORNER_RADIUS);
        paint::draw_rounded(display, selection, &border)
    }
}

impl Measure for Radio {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        // Bold face so the selected state never clips
        let widest_label = self
            .labels
            .iter()
            .map(|label| paint::text_width(font::bold(label.as_str()), label.as_str()))
            .max()
            .unwrap_or(0);
        self.item_width = (widest_label + 2 * ITEM_PADDING_HORIZONTAL).max(ITEM_MIN_WIDTH);

        let natural_width = if self.buttons.is_empty() {
            0
        } else {
            self.item_width * self.buttons.len() as u32 + 2 * ANIMATION_PADDING
        };

        self.measured = Size::new(width.resolve(natural_width), height.resolve(RADIO_HEIGHT));
        self.measured
    }

    fn measured_size(&self) -> Size {
        self.measured
    }

    fn layout(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }
}

impl Drawable for Radio {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.buttons.is_empty() {
            return Ok(());
        }
        let colors = self.colors();

        let track = Style::new()
            .with_background(colors.background)
            .with_corner_radius(RADIO_CORNER_RADIUS);
        paint::draw_rounded(display, self.track_rect(), &track)?;

        let selected = self.selected_index();
        if let Some(index) = selected {
            self.draw_selection(display, index, &colors)?;
        }

        for (index, label) in self.labels.iter().enumerate() {
            let (face, color) = if selected == Some(index) {
                (font::bold(label.as_str()), colors.selected_text)
            } else {
                (font::regular(), colors.unselected_text)
            };
            paint::draw_text_line(
                display,
                label.as_str(),
                self.item_rect(index),
                face,
                color,
                Alignment::Center,
            )?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Radio {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.track_rect().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        let TouchEvent::Press(point) = event else {
            return TouchResult::NotHandled;
        };
        let Some(index) = self.item_at(point) else {
            return TouchResult::NotHandled;
        };

        let value = self.buttons[index].value().to_string();
        self.select(&value);
        TouchResult::Handled
    }
}

impl Themable for Radio {
    fn set_theme(&mut self, theme: impl Into<Option<Theme>>) -> UiResult<()> {
        let theme = theme.into().ok_or(UiError::MissingTheme)?;
        if self.theme != Some(theme) {
            self.theme = Some(theme);
            self.dirty = true;
        }
        Ok(())
    }

    fn theme(&self) -> Option<Theme> {
        self.theme
    }
}

impl Localizable for Radio {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language == Some(language) {
            return Ok(());
        }
        self.language = Some(language);

        for (label, button) in self.labels.iter_mut().zip(&self.buttons) {
            if label.resolve(button.label(), language) {
                self.dirty = true;
            }
        }
        Ok(())
    }

    fn language(&self) -> Option<Language> {
        self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn button(value: &str, en: &str, ru: Option<&str>) -> RadioButton {
        let mut label = Localized::new().with(Language::En, en);
        if let Some(ru) = ru {
            label.insert(Language::Ru, ru);
        }
        RadioButton::new(value, label).unwrap()
    }

    fn drive_mode() -> Radio {
        Radio::new(vec![
            button("eco", "Eco", Some("Эко")),
            button("comfort", "Comfort", Some("Комфорт")),
            button("sport", "Sport", None),
        ])
    }

    fn recorder(radio: &mut Radio) -> Rc<RefCell<Vec<String>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        radio.set_on_value_change(move |value| sink.borrow_mut().push(value.to_string()));
        calls
    }

    #[test]
    fn test_button_validation() {
        let label = Localized::new().with(Language::En, "On");
        assert_eq!(RadioButton::new("", label.clone()), Err(UiError::BlankValue));
        assert_eq!(
            RadioButton::new("on", Localized::new()),
            Err(UiError::EmptyLabel)
        );
    }

    #[test]
    fn test_selecting_new_value_notifies_once() {
        let mut radio = drive_mode().with_selected("eco");
        let calls = recorder(&mut radio);

        assert!(radio.select("sport"));
        assert_eq!(radio.selected_value(), Some("sport"));
        assert_eq!(*calls.borrow(), vec!["sport".to_string()]);
    }

    #[test]
    fn test_selecting_same_value_is_silent() {
        let mut radio = drive_mode().with_selected("eco");
        let calls = recorder(&mut radio);

        assert!(!radio.select("eco"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unknown_value_is_noop() {
        let mut radio = drive_mode().with_selected("eco");
        let calls = recorder(&mut radio);

        assert!(!radio.select("turbo"));
        assert_eq!(radio.selected_value(), Some("eco"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_silent_programmatic_selection() {
        let mut radio = drive_mode();
        let calls = recorder(&mut radio);

        assert!(radio.set_selected_value("comfort", false));
        assert_eq!(radio.selected_index(), Some(1));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_labels_follow_language_with_fallback() {
        let mut radio = drive_mode();
        radio.set_language(Language::En).unwrap();
        radio.set_language(Language::Ru).unwrap();

        assert_eq!(radio.label(0), Some("Эко"));
        assert_eq!(radio.label(1), Some("Комфорт"));
        assert_eq!(radio.label(2), Some("Sport"));
    }

    #[test]
    fn test_setters_reject_missing_values() {
        let mut radio = drive_mode();
        assert_eq!(radio.set_theme(None), Err(UiError::MissingTheme));
        assert_eq!(radio.set_language(None), Err(UiError::MissingLanguage));
    }

    #[test]
    fn test_measure_uses_equal_item_widths() {
        let mut radio = drive_mode();
        let size = radio.measure(Constraint::Unbounded, Constraint::Unbounded);

        // "Comfort" in the 9px bold face is 63px, plus 2 * 26 padding
        assert_eq!(radio.item_width(), 120);
        assert_eq!(size, Size::new(3 * 120 + 2 * ANIMATION_PADDING, RADIO_HEIGHT));
    }

    #[test]
    fn test_wide_labels_grow_items() {
        let mut radio = Radio::new(vec![button("a", "Automatic climate", None)]);
        radio.measure(Constraint::Unbounded, Constraint::Unbounded);
        assert_eq!(radio.item_width(), 17 * 9 + 2 * ITEM_PADDING_HORIZONTAL);
    }

    #[test]
    fn test_touch_selects_item() {
        let mut radio = drive_mode().with_selected("eco");
        let calls = recorder(&mut radio);
        let size = radio.measure(Constraint::Unbounded, Constraint::Unbounded);
        radio.layout(Rectangle::new(Point::new(100, 100), size));

        // Second item spans x = 100 + 35 + 120 ..= 100 + 35 + 239
        let result = radio.handle_touch(TouchEvent::Press(TouchPoint::new(300, 130)));
        assert_eq!(result, TouchResult::Handled);
        assert_eq!(radio.selected_value(), Some("comfort"));
        assert_eq!(*calls.borrow(), vec!["comfort".to_string()]);

        let outside = radio.handle_touch(TouchEvent::Press(TouchPoint::new(110, 130)));
        assert_eq!(outside, TouchResult::NotHandled);
    }

    #[test]
    fn test_replacing_buttons_drops_stale_selection() {
        let mut radio = drive_mode().with_selected("sport");
        radio.set_buttons(vec![button("eco", "Eco", None)]);
        assert_eq!(radio.selected_value(), None);
    }
}
