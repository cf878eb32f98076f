//! Content panel shown next to the tab strip

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use crate::error::{UiError, UiResult};
use crate::i18n::Language;
use crate::ui::components::{Element, Section};
use crate::ui::core::{
    Constraint, DirtyRegion, Drawable, Localizable, Measure, Themable, TouchEvent, TouchPoint,
    TouchResult, Touchable, push_language, push_theme,
};
use crate::ui::layouts::{Column, Scrollable};
use crate::ui::paint;
use crate::ui::styling::{Padding, PanelColors, Style, Theme};

/// Smallest size an empty panel reports
pub const PANEL_MIN_SIZE: u32 = 100;
pub const PANEL_CORNER_RADIUS: u32 = 20;
pub const PANEL_BORDER_WIDTH: u32 = 0;

/// Scrolling list of sections
pub type SectionList = Scrollable<Column<Section>>;

// ============================================================================
// PanelChild
// ============================================================================

/// The shapes a panel knows how to hold
pub enum PanelChild {
    Section(Section),
    /// Sections behind a vertical scroll viewport
    Scroll(SectionList),
    /// Anything else. Never themed or localized by the panel.
    Leaf(Element),
}

impl PanelChild {
    /// Wrap `sections` in a vertical scroll viewport
    pub fn scroll(sections: Vec<Section>) -> Self {
        PanelChild::Scroll(Scrollable::new(Column::new().with_children(sections)))
    }

    /// Sections directly reachable through this child
    pub fn sections_mut(&mut self) -> &mut [Section] {
        match self {
            PanelChild::Section(section) => core::slice::from_mut(section),
            PanelChild::Scroll(list) => list.content_mut().children_mut(),
            PanelChild::Leaf(_) => &mut [],
        }
    }

    pub fn sections(&self) -> &[Section] {
        match self {
            PanelChild::Section(section) => core::slice::from_ref(section),
            PanelChild::Scroll(list) => list.content().children(),
            PanelChild::Leaf(_) => &[],
        }
    }
}

impl Measure for PanelChild {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        match self {
            PanelChild::Section(section) => section.measure(width, height),
            PanelChild::Scroll(list) => list.measure(width, height),
            PanelChild::Leaf(element) => element.measure(width, height),
        }
    }

    fn measured_size(&self) -> Size {
        match self {
            PanelChild::Section(section) => section.measured_size(),
            PanelChild::Scroll(list) => list.measured_size(),
            PanelChild::Leaf(element) => element.measured_size(),
        }
    }

    fn layout(&mut self, bounds: Rectangle) {
        match self {
            PanelChild::Section(section) => section.layout(bounds),
            PanelChild::Scroll(list) => list.layout(bounds),
            PanelChild::Leaf(element) => element.layout(bounds),
        }
    }

    fn is_visible(&self) -> bool {
        match self {
            PanelChild::Section(section) => section.is_visible(),
            PanelChild::Scroll(list) => list.is_visible(),
            PanelChild::Leaf(element) => element.is_visible(),
        }
    }
}

impl Drawable for PanelChild {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            PanelChild::Section(section) => section.draw(display),
            PanelChild::Scroll(list) => list.draw(display),
            PanelChild::Leaf(element) => element.draw(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            PanelChild::Section(section) => section.bounds(),
            PanelChild::Scroll(list) => list.bounds(),
            PanelChild::Leaf(element) => element.bounds(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PanelChild::Section(section) => section.is_dirty(),
            PanelChild::Scroll(list) => list.is_dirty(),
            PanelChild::Leaf(element) => element.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PanelChild::Section(section) => section.mark_clean(),
            PanelChild::Scroll(list) => list.mark_clean(),
            PanelChild::Leaf(element) => element.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PanelChild::Section(section) => section.mark_dirty(),
            PanelChild::Scroll(list) => list.mark_dirty(),
            PanelChild::Leaf(element) => element.mark_dirty(),
        }
    }
}

impl Touchable for PanelChild {
    fn contains_point(&self, point: TouchPoint) -> bool {
        match self {
            PanelChild::Section(section) => section.contains_point(point),
            PanelChild::Scroll(list) => list.contains_point(point),
            PanelChild::Leaf(element) => element.contains_point(point),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match self {
            PanelChild::Section(section) => section.handle_touch(event),
            PanelChild::Scroll(list) => list.handle_touch(event),
            PanelChild::Leaf(element) => element.handle_touch(event),
        }
    }
}

// ============================================================================
// Panel
// ============================================================================

/// Vertical stack of sections.
///
/// The panel takes the width its parent gives it and is at least
/// [`PANEL_MIN_SIZE`] in both directions, even when empty. A panel is
/// *mounted* while it is the active panel of a screen.
pub struct Panel {
    column: Column<PanelChild>,
    theme: Option<Theme>,
    language: Option<Language>,
    mounted: bool,
    mount_count: u32,
    measured: Size,
    bounds: Rectangle,
    dirty: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self {
            column: Column::new(),
            theme: None,
            language: None,
            mounted: false,
            mount_count: 0,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.column = core::mem::take(&mut self.column).with_padding(padding);
        self
    }

    pub fn with_child(mut self, child: PanelChild) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_section(self, section: Section) -> Self {
        self.with_child(PanelChild::Section(section))
    }

    /// Append a child, returning its index.
    ///
    /// A mounted panel brings the child up to date right away.
    pub fn add_child(&mut self, mut child: PanelChild) -> usize {
        if self.mounted {
            Self::sync_child(&mut child, self.theme, self.language);
        }
        self.dirty = true;
        self.column.push(child)
    }

    pub fn add_section(&mut self, section: Section) -> usize {
        self.add_child(PanelChild::Section(section))
    }

    /// Detach and return the child at `index`
    pub fn remove_child(&mut self, index: usize) -> Option<PanelChild> {
        let child = self.column.remove(index)?;
        self.dirty = true;
        Some(child)
    }

    pub fn take_children(&mut self) -> Vec<PanelChild> {
        self.dirty = true;
        self.column.take_children()
    }

    pub fn children(&self) -> &[PanelChild] {
        self.column.children()
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut PanelChild> {
        self.column.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column.is_empty()
    }

    /// Visit every section, whether direct or inside a scroll list
    pub fn for_each_section_mut(&mut self, mut f: impl FnMut(&mut Section)) {
        for child in self.column.children_mut() {
            child.sections_mut().iter_mut().for_each(&mut f);
        }
    }

    /// Silently select `value` in every radio that offers it.
    ///
    /// Returns whether any radio knew the value.
    pub fn select_value(&mut self, value: &str) -> bool {
        let mut found = false;
        self.for_each_section_mut(|section| {
            if let Some(radio) = section.radio_mut()
                && radio.has_value(value)
            {
                radio.set_selected_value(value, false);
                found = true;
            }
        });
        found
    }

    pub fn colors(&self) -> PanelColors {
        PanelColors::for_theme(self.theme.unwrap_or_default())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// How many times the panel has been mounted
    pub fn mount_count(&self) -> u32 {
        self.mount_count
    }

    pub(crate) fn attach(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.mount_count += 1;
        self.dirty = true;
        debug!("Panel mounted ({} children)", self.column.len());
    }

    pub(crate) fn detach(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        debug!("Panel unmounted");
    }

    fn sync_child(child: &mut PanelChild, theme: Option<Theme>, language: Option<Language>) {
        if let Some(theme) = theme {
            Self::theme_child(child, theme);
        }
        if let Some(language) = language {
            Self::localize_child(child, language);
        }
    }

    fn theme_child(child: &mut PanelChild, theme: Theme) {
        match child {
            PanelChild::Section(section) => push_theme(section, theme),
            PanelChild::Scroll(list) => {
                for section in list.content_mut().children_mut() {
                    push_theme(section, theme);
                }
            }
            PanelChild::Leaf(_) => trace!("Panel leaf skipped by theme propagation"),
        }
    }

    fn localize_child(child: &mut PanelChild, language: Language) {
        match child {
            PanelChild::Section(section) => push_language(section, language),
            PanelChild::Scroll(list) => {
                for section in list.content_mut().children_mut() {
                    push_language(section, language);
                }
            }
            PanelChild::Leaf(_) => trace!("Panel leaf skipped by language propagation"),
        }
    }

    fn chrome_style(&self) -> Style {
        let colors = self.colors();
        Style::new()
            .with_optional_background(colors.background)
            .with_border(colors.border, PANEL_BORDER_WIDTH)
            .with_corner_radius(PANEL_CORNER_RADIUS)
    }
}

impl core::fmt::Debug for Panel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Panel")
            .field("children", &self.column.len())
            .field("theme", &self.theme)
            .field("language", &self.language)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl Measure for Panel {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        let content = self.column.measure(width, height);
        self.measured = Size::new(
            width.resolve(content.width.max(PANEL_MIN_SIZE)),
            height.resolve(content.height.max(PANEL_MIN_SIZE)),
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
        self.column.layout(bounds);
    }
}

impl Drawable for Panel {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        if let Some(shadow) = self.colors().shadow {
            let offset = self.bounds.translate(Point::new(0, 4));
            paint::draw_rounded(
                display,
                offset,
                &Style::new()
                    .with_background(shadow)
                    .with_corner_radius(PANEL_CORNER_RADIUS),
            )?;
        }
        paint::draw_rounded(display, self.bounds, &self.chrome_style())?;
        self.column.draw(display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.column.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.column.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            Some(DirtyRegion::new(self.bounds))
        } else {
            self.column.dirty_region()
        }
    }
}

impl Touchable for Panel {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        self.column.handle_touch(event)
    }
}

impl Themable for Panel {
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

    fn propagate_theme(&mut self, theme: Option<Theme>) {
        let Some(theme) = theme else { return };
        for child in self.column.children_mut() {
            Self::theme_child(child, theme);
        }
    }
}

impl Localizable for Panel {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language != Some(language) {
            self.language = Some(language);
            self.dirty = true;
        }
        Ok(())
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn propagate_language(&mut self, language: Option<Language>) {
        let Some(language) = language else { return };
        for child in self.column.children_mut() {
            Self::localize_child(child, language);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Localized;
    use crate::ui::components::{Radio, RadioButton, SectionChild};
    use alloc::vec;

    fn section(title: &str, values: &[&str]) -> Section {
        let buttons = values
            .iter()
            .map(|value| {
                RadioButton::new(value, Localized::new().with(Language::En, value)).unwrap()
            })
            .collect();
        Section::new(Localized::new().with(Language::En, title))
            .unwrap()
            .with_radio(Radio::new(buttons))
    }

    #[test]
    fn test_empty_panel_has_minimum_size() {
        let mut panel = Panel::new();
        let size = panel.measure(Constraint::AtMost(1920), Constraint::AtMost(720));
        assert_eq!(size, Size::new(PANEL_MIN_SIZE, PANEL_MIN_SIZE));

        let size = panel.measure(Constraint::Exactly(1575), Constraint::Exactly(670));
        assert_eq!(size, Size::new(1575, 670));
    }

    #[test]
    fn test_children_stack_flush_left() {
        let mut panel = Panel::new()
            .with_section(section("Drive", &["eco", "sport"]))
            .with_section(section("Seats", &["low", "high"]));
        let size = panel.measure(Constraint::Exactly(1575), Constraint::Exactly(670));
        panel.layout(Rectangle::new(Point::new(345, 50), size));

        let tops: Vec<Point> = panel
            .children()
            .iter()
            .map(|child| child.bounds().top_left)
            .collect();
        assert_eq!(tops, vec![Point::new(345, 50), Point::new(345, 50 + 283)]);
    }

    #[test]
    fn test_propagation_reaches_direct_and_scrolled_sections() {
        let mut panel = Panel::new()
            .with_section(section("Drive", &["eco"]))
            .with_child(PanelChild::scroll(vec![
                section("Seats", &["low"]),
                section("Mirrors", &["fold"]),
            ]));

        push_theme(&mut panel, Theme::DreamerDark);
        push_language(&mut panel, Language::Ru);

        let mut seen = 0;
        panel.for_each_section_mut(|section| {
            assert_eq!(section.theme(), Some(Theme::DreamerDark));
            assert_eq!(section.language(), Some(Language::Ru));
            assert_eq!(section.radio().unwrap().theme(), Some(Theme::DreamerDark));
            seen += 1;
        });
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_leaf_child_is_skipped() {
        let mut panel = Panel::new().with_child(PanelChild::Leaf(Element::text("Note")));
        push_theme(&mut panel, Theme::FreeLight);

        assert_eq!(panel.theme(), Some(Theme::FreeLight));
        let Some(PanelChild::Leaf(leaf)) = panel.children().first() else {
            panic!("leaf expected");
        };
        assert_eq!(leaf.as_text().unwrap().theme(), None);
    }

    #[test]
    fn test_missing_values_rejected_or_ignored() {
        let mut panel = Panel::new().with_section(section("Drive", &["eco"]));
        assert_eq!(panel.set_theme(None), Err(UiError::MissingTheme));
        assert_eq!(panel.set_language(None), Err(UiError::MissingLanguage));

        panel.propagate_theme(None);
        panel.propagate_language(None);
        panel.for_each_section_mut(|section| assert_eq!(section.theme(), None));
    }

    #[test]
    fn test_select_value_is_silent() {
        let mut panel = Panel::new().with_section(section("Drive", &["eco", "sport"]));
        let fired = alloc::rc::Rc::new(core::cell::Cell::new(0));
        let counter = alloc::rc::Rc::clone(&fired);
        panel.for_each_section_mut(|section| {
            let counter = alloc::rc::Rc::clone(&counter);
            section
                .radio_mut()
                .unwrap()
                .set_on_value_change(move |_| counter.set(counter.get() + 1));
        });

        assert!(panel.select_value("sport"));
        assert!(!panel.select_value("comfort"));
        assert_eq!(fired.get(), 0);

        let Some(PanelChild::Section(section)) = panel.children().first() else {
            panic!("section expected");
        };
        assert_eq!(section.radio().unwrap().selected_value(), Some("sport"));
    }

    #[test]
    fn test_mounted_panel_syncs_new_children() {
        let mut panel = Panel::new();
        panel.set_theme(Theme::FreeLight).unwrap();
        panel.attach();
        panel.add_section(section("Drive", &["eco"]));
        panel.detach();

        assert_eq!(panel.mount_count(), 1);
        assert!(!panel.is_mounted());
        let Some(PanelChild::Section(section)) = panel.children().first() else {
            panic!("section expected");
        };
        assert_eq!(section.theme(), Some(Theme::FreeLight));
        assert!(matches!(section.child(), Some(SectionChild::Radio(_))));
    }

    #[test]
    fn test_chrome_is_transparent() {
        let panel = Panel::new();
        for theme in Theme::ALL {
            assert_eq!(
                PanelColors::for_theme(theme),
                PanelColors {
                    background: None,
                    border: None,
                    shadow: None
                }
            );
        }
        assert!(!panel.chrome_style().is_visible());
    }
}
