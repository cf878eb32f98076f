//! Vertical tab strip that picks the active panel

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use log::{debug, trace};

use crate::error::{UiError, UiResult};
use crate::i18n::{Language, Localized, ResolvedText, validate_item};
use crate::ui::core::{
    Action, Constraint, Drawable, IndexListener, Localizable, Measure, Themable, TouchEvent,
    TouchPoint, TouchResult, Touchable, ValueListener,
};
use crate::ui::font;
use crate::ui::paint;
use crate::ui::styling::{Style, TabsColors, Theme};

pub const SIDEBAR_WIDTH: u32 = 340;
pub const TAB_ITEM_HEIGHT: u32 = 100;
pub const TAB_SPACING: u32 = 40;
pub const TAB_CORNER_RADIUS: u32 = 20;
pub const TAB_PADDING_LEFT: u32 = 30;
pub const TAB_PADDING_RIGHT: u32 = 42;
pub const TAB_PADDING_BOTTOM: u32 = 30;
/// Inset of the label inside its item
pub const TAB_TEXT_INSET: u32 = 24;

// ============================================================================
// TabItem
// ============================================================================

/// One entry of the tab strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    value: String,
    label: Localized,
}

impl TabItem {
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

/// Outcome of a successful tab selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSelection {
    pub index: usize,
    pub value: String,
    /// `false` when the tab was already selected
    pub changed: bool,
}

// ============================================================================
// Tabs
// ============================================================================

/// Ordered tab items with an optional selected value.
///
/// Two observers hang off a selection: the index listener (wired to panel
/// switching) and the value listener (wired to the state owner). The index
/// listener always fires first.
pub struct Tabs {
    items: Vec<TabItem>,
    labels: Vec<ResolvedText>,
    selected: Option<String>,
    theme: Option<Theme>,
    language: Option<Language>,
    sidebar_width: u32,
    measured: Size,
    bounds: Rectangle,
    on_tab_change: Option<IndexListener>,
    on_value_change: Option<ValueListener>,
    dirty: bool,
}

impl core::fmt::Debug for Tabs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tabs")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("sidebar_width", &self.sidebar_width)
            .finish_non_exhaustive()
    }
}

impl Tabs {
    pub fn new(items: Vec<TabItem>) -> Self {
        let mut tabs = Self {
            items: Vec::new(),
            labels: Vec::new(),
            selected: None,
            theme: None,
            language: None,
            sidebar_width: SIDEBAR_WIDTH,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            on_tab_change: None,
            on_value_change: None,
            dirty: true,
        };
        tabs.set_items(items);
        tabs
    }

    /// Override the strip width
    pub fn with_sidebar_width(mut self, width: u32) -> Self {
        self.sidebar_width = width;
        self
    }

    /// Initial selection, without notifying
    pub fn with_selected(mut self, value: &str) -> Self {
        self.apply_selection(value);
        self
    }

    pub fn set_on_tab_change(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_tab_change = Some(Box::new(listener));
    }

    pub fn set_on_value_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_value_change = Some(Box::new(listener));
    }

    /// Replace the items. A selection that no longer exists is dropped.
    pub fn set_items(&mut self, items: Vec<TabItem>) {
        self.labels = items
            .iter()
            .map(|item| ResolvedText::initial(item.label(), self.language, item.value()))
            .collect();
        self.items = items;

        if let Some(selected) = &self.selected
            && self.index_of(selected).is_none()
        {
            trace!("Tab selection {} dropped with its item", selected);
            self.selected = None;
        }
        self.dirty = true;
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|item| item.value() == value)
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(TabItem::value)
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

    /// Select the tab whose value is `value`.
    ///
    /// A value not in the item list is ignored and `None` is returned.
    /// Otherwise the index listener fires, followed by the value listener
    /// when `notify` is set and the selection actually changed.
    pub fn set_selected_value(&mut self, value: &str, notify: bool) -> Option<TabSelection> {
        let selection = self.apply_selection(value)?;
        self.dispatch(&selection, notify);
        Some(selection)
    }

    /// Update the selection without running any listener
    pub(crate) fn apply_selection(&mut self, value: &str) -> Option<TabSelection> {
        let Some(index) = self.index_of(value) else {
            debug!("Ignoring unknown tab value {}", value);
            return None;
        };

        let changed = self.selected.as_deref() != Some(value);
        if changed {
            self.selected = Some(value.to_string());
            self.dirty = true;
        }
        Some(TabSelection {
            index,
            value: value.to_string(),
            changed,
        })
    }

    /// Run the listeners for a selection made by [`Tabs::apply_selection`]
    pub(crate) fn dispatch(&mut self, selection: &TabSelection, notify: bool) {
        if let Some(listener) = self.on_tab_change.as_mut() {
            listener(selection.index);
        }
        if notify
            && selection.changed
            && let Some(listener) = self.on_value_change.as_mut()
        {
            listener(&selection.value);
        }
    }

    /// Width of one item's highlight
    pub fn item_width(&self) -> u32 {
        self.bounds
            .size
            .width
            .saturating_sub(TAB_PADDING_LEFT + TAB_PADDING_RIGHT)
    }

    pub fn item_rect(&self, index: usize) -> Rectangle {
        let top = (TAB_ITEM_HEIGHT + TAB_SPACING) * index as u32;
        Rectangle::new(
            self.bounds.top_left + Point::new(TAB_PADDING_LEFT as i32, top as i32),
            Size::new(self.item_width(), TAB_ITEM_HEIGHT),
        )
    }

    /// Item under `point`, if any
    pub fn item_at(&self, point: TouchPoint) -> Option<usize> {
        let p = point.to_point();
        (0..self.items.len()).find(|&index| self.item_rect(index).contains(p))
    }

    /// Height of the whole strip for `count` items
    pub fn content_height(count: usize) -> u32 {
        match count as u32 {
            0 => 0,
            n => n * TAB_ITEM_HEIGHT + (n - 1) * TAB_SPACING + TAB_PADDING_BOTTOM,
        }
    }

    fn colors(&self) -> TabsColors {
        TabsColors::for_theme(self.theme.unwrap_or_default())
    }
}

impl Measure for Tabs {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        self.measured = Size::new(
            width.resolve(self.sidebar_width),
            height.resolve(Self::content_height(self.items.len())),
        );
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

impl Drawable for Tabs {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        let colors = self.colors();

        if let Some(sidebar) = colors.sidebar {
            display.fill_solid(&self.bounds, sidebar)?;
        }

        let selected = self.selected_index();
        for (index, label) in self.labels.iter().enumerate() {
            let item = self.item_rect(index);
            let is_selected = selected == Some(index);

            if is_selected {
                let highlight = Style::new()
                    .with_background(colors.selected_background)
                    .with_corner_radius(TAB_CORNER_RADIUS);
                paint::draw_rounded(display, item, &highlight)?;
            }

            let (face, color) = if is_selected {
                (font::bold(label.as_str()), colors.selected_text)
            } else {
                (font::regular(), colors.unselected_text)
            };
            let text_bounds = Rectangle::new(
                item.top_left + Point::new(TAB_TEXT_INSET as i32, 0),
                Size::new(item.size.width.saturating_sub(TAB_TEXT_INSET), item.size.height),
            );
            paint::draw_text_line(
                display,
                label.as_str(),
                text_bounds,
                face,
                color,
                Alignment::Left,
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

impl Touchable for Tabs {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    /// A press on an item asks the owner to select it
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) => match self.item_at(point) {
                Some(index) => TouchResult::Action(Action::SelectTab(index)),
                None => TouchResult::NotHandled,
            },
            TouchEvent::Drag(_) => TouchResult::NotHandled,
        }
    }
}

impl Themable for Tabs {
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

impl Localizable for Tabs {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language == Some(language) {
            return Ok(());
        }
        self.language = Some(language);

        for (label, item) in self.labels.iter_mut().zip(&self.items) {
            if label.resolve(item.label(), language) {
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

    fn item(value: &str, en: &str) -> TabItem {
        TabItem::new(value, Localized::new().with(Language::En, en)).unwrap()
    }

    fn settings_tabs() -> Tabs {
        Tabs::new(vec![
            item("display", "Display"),
            item("sound", "Sound"),
            item("vehicle", "Vehicle"),
        ])
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Index(usize),
        Value(String),
    }

    fn recorder(tabs: &mut Tabs) -> Rc<RefCell<Vec<Call>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let index_sink = Rc::clone(&calls);
        tabs.set_on_tab_change(move |index| index_sink.borrow_mut().push(Call::Index(index)));
        let value_sink = Rc::clone(&calls);
        tabs.set_on_value_change(move |value| {
            value_sink.borrow_mut().push(Call::Value(value.to_string()))
        });
        calls
    }

    #[test]
    fn test_item_validation() {
        assert_eq!(
            TabItem::new(" ", Localized::new().with(Language::En, "x")),
            Err(UiError::BlankValue)
        );
        assert_eq!(TabItem::new("x", Localized::new()), Err(UiError::EmptyLabel));
    }

    #[test]
    fn test_unknown_value_is_noop() {
        let mut tabs = settings_tabs().with_selected("sound");
        let calls = recorder(&mut tabs);

        assert_eq!(tabs.set_selected_value("navigation", true), None);
        assert_eq!(tabs.selected_value(), Some("sound"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_index_fires_before_value() {
        let mut tabs = settings_tabs();
        let calls = recorder(&mut tabs);

        let selection = tabs.set_selected_value("vehicle", true).unwrap();
        assert_eq!(selection.index, 2);
        assert!(selection.changed);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Index(2), Call::Value("vehicle".to_string())]
        );
    }

    #[test]
    fn test_silent_selection_only_reports_index() {
        let mut tabs = settings_tabs();
        let calls = recorder(&mut tabs);

        tabs.set_selected_value("sound", false);
        assert_eq!(*calls.borrow(), vec![Call::Index(1)]);
    }

    #[test]
    fn test_reselecting_does_not_notify_value() {
        let mut tabs = settings_tabs().with_selected("display");
        let calls = recorder(&mut tabs);

        let selection = tabs.set_selected_value("display", true).unwrap();
        assert!(!selection.changed);
        assert_eq!(*calls.borrow(), vec![Call::Index(0)]);
    }

    #[test]
    fn test_measure() {
        let mut tabs = settings_tabs();
        let size = tabs.measure(Constraint::AtMost(1920), Constraint::Unbounded);
        assert_eq!(size, Size::new(SIDEBAR_WIDTH, 3 * 100 + 2 * 40 + 30));

        let mut narrow = settings_tabs().with_sidebar_width(200);
        let size = narrow.measure(Constraint::AtMost(1920), Constraint::AtMost(670));
        assert_eq!(size, Size::new(200, 410));

        let mut empty = Tabs::new(Vec::new());
        assert_eq!(
            empty.measure(Constraint::AtMost(1920), Constraint::Unbounded),
            Size::new(SIDEBAR_WIDTH, 0)
        );
    }

    #[test]
    fn test_touch_requests_selection() {
        let mut tabs = settings_tabs();
        let size = tabs.measure(Constraint::AtMost(1920), Constraint::Unbounded);
        tabs.layout(Rectangle::new(Point::new(145, 50), size));

        // Second item starts at y = 50 + 140
        let result = tabs.handle_touch(TouchEvent::Press(TouchPoint::new(200, 200)));
        assert_eq!(result, TouchResult::Action(Action::SelectTab(1)));

        // The gap between items
        let result = tabs.handle_touch(TouchEvent::Press(TouchPoint::new(200, 160)));
        assert_eq!(result, TouchResult::NotHandled);
    }

    #[test]
    fn test_labels_keep_previous_on_missing_language() {
        let mut tabs = Tabs::new(vec![TabItem::new(
            "display",
            Localized::new()
                .with(Language::En, "Display")
                .with(Language::Ru, "Дисплей"),
        )
        .unwrap(),
        item("sound", "Sound")]);
        tabs.set_language(Language::Ru).unwrap();
        assert_eq!(tabs.label(0), Some("Дисплей"));
        assert_eq!(tabs.label(1), Some("Sound"));
    }
}
