//! Titled card wrapping a single control

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::error::{UiError, UiResult};
use crate::i18n::{Language, Localized};
use crate::ui::components::{Element, Radio, Text, TextRole};
use crate::ui::core::{
    Constraint, Drawable, Localizable, Measure, Themable, TouchEvent, TouchPoint, TouchResult,
    Touchable, push_language, push_theme,
};
use crate::ui::paint;
use crate::ui::styling::{GradientAxis, SectionColors, Style, Theme};

pub const SECTION_WIDTH: u32 = 1364;
pub const SECTION_HORIZONTAL_MARGIN: u32 = 0;
pub const TITLE_BAR_HEIGHT: u32 = 98;
pub const TITLE_SPACING: u32 = 40;
pub const TITLE_MARGIN_START: u32 = 30;
pub const TITLE_MARGIN_TOP: u32 = 25;
pub const CONTENT_PADDING_HORIZONTAL: u32 = 36;
pub const CONTENT_PADDING_BOTTOM: u32 = 50;
pub const SECTION_BOTTOM_MARGIN: u32 = 25;
pub const SECTION_CORNER_RADIUS: u32 = 20;

/// Width handed to the child
pub const CONTENT_WIDTH: u32 = SECTION_WIDTH - 2 * CONTENT_PADDING_HORIZONTAL;

/// What a section can hold
#[derive(Debug)]
pub enum SectionChild {
    Radio(Radio),
    /// Static content, not themed by the section
    Element(Element),
}

impl Measure for SectionChild {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        match self {
            SectionChild::Radio(radio) => radio.measure(width, height),
            SectionChild::Element(element) => element.measure(width, height),
        }
    }

    fn measured_size(&self) -> Size {
        match self {
            SectionChild::Radio(radio) => radio.measured_size(),
            SectionChild::Element(element) => element.measured_size(),
        }
    }

    fn layout(&mut self, bounds: Rectangle) {
        match self {
            SectionChild::Radio(radio) => radio.layout(bounds),
            SectionChild::Element(element) => element.layout(bounds),
        }
    }
}

impl Drawable for SectionChild {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            SectionChild::Radio(radio) => radio.draw(display),
            SectionChild::Element(element) => element.draw(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            SectionChild::Radio(radio) => radio.bounds(),
            SectionChild::Element(element) => element.bounds(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            SectionChild::Radio(radio) => radio.is_dirty(),
            SectionChild::Element(element) => element.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            SectionChild::Radio(radio) => radio.mark_clean(),
            SectionChild::Element(element) => element.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            SectionChild::Radio(radio) => radio.mark_dirty(),
            SectionChild::Element(element) => element.mark_dirty(),
        }
    }
}

impl Touchable for SectionChild {
    fn contains_point(&self, point: TouchPoint) -> bool {
        match self {
            SectionChild::Radio(radio) => radio.contains_point(point),
            SectionChild::Element(element) => element.contains_point(point),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match self {
            SectionChild::Radio(radio) => radio.handle_touch(event),
            SectionChild::Element(element) => element.handle_touch(event),
        }
    }
}

// ============================================================================
// Section
// ============================================================================

/// Card with a title bar on top and one child below it.
///
/// The section owns a fixed 1364 px width. Its height is the title bar,
/// the title spacing, the child, the content bottom padding and the bottom
/// margin stacked together. A hidden section takes no space and is neither
/// drawn nor touched, but still follows theme and language changes so it
/// is current when shown again.
pub struct Section {
    title: Localized,
    title_text: Text,
    child: Option<SectionChild>,
    theme: Option<Theme>,
    language: Option<Language>,
    visible: bool,
    measured: Size,
    bounds: Rectangle,
    dirty: bool,
}

impl Section {
    /// Fails when `title` has no translation at all
    pub fn new(title: Localized) -> UiResult<Self> {
        if title.is_empty() {
            return Err(UiError::EmptyLabel);
        }
        let title_text = Text::localized(title.clone()).with_role(TextRole::Title);
        Ok(Self {
            title,
            title_text,
            child: None,
            theme: None,
            language: None,
            visible: true,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        })
    }

    pub fn with_child(mut self, child: SectionChild) -> Self {
        self.set_child(child);
        self
    }

    pub fn with_radio(self, radio: Radio) -> Self {
        self.with_child(SectionChild::Radio(radio))
    }

    /// Replace the child, handing back the previous one
    pub fn set_child(&mut self, child: SectionChild) -> Option<SectionChild> {
        self.dirty = true;
        self.child.replace(child)
    }

    pub fn take_child(&mut self) -> Option<SectionChild> {
        if self.child.is_some() {
            self.dirty = true;
        }
        self.child.take()
    }

    pub fn child(&self) -> Option<&SectionChild> {
        self.child.as_ref()
    }

    pub fn child_mut(&mut self) -> Option<&mut SectionChild> {
        self.child.as_mut()
    }

    pub fn radio(&self) -> Option<&Radio> {
        match &self.child {
            Some(SectionChild::Radio(radio)) => Some(radio),
            _ => None,
        }
    }

    pub fn radio_mut(&mut self) -> Option<&mut Radio> {
        match &mut self.child {
            Some(SectionChild::Radio(radio)) => Some(radio),
            _ => None,
        }
    }

    pub fn title(&self) -> &Localized {
        &self.title
    }

    /// Title as currently displayed
    pub fn title_text(&self) -> &str {
        self.title_text.text()
    }

    pub fn set_title(&mut self, title: Localized) -> UiResult<()> {
        if title.is_empty() {
            return Err(UiError::EmptyLabel);
        }
        self.title_text.set_localized(title.clone());
        self.title = title;
        self.dirty = true;
        Ok(())
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    fn colors(&self) -> SectionColors {
        SectionColors::for_theme(self.theme.unwrap_or_default())
    }

    /// Card area, without the bottom margin
    fn card_rect(&self) -> Rectangle {
        Rectangle::new(
            self.bounds.top_left + Point::new(SECTION_HORIZONTAL_MARGIN as i32, 0),
            Size::new(
                SECTION_WIDTH.min(self.bounds.size.width),
                self.bounds.size.height.saturating_sub(SECTION_BOTTOM_MARGIN),
            ),
        )
    }

    fn draw_title_band<D: DrawTarget<Color = Rgb888>>(
        &self,
        display: &mut D,
        card: Rectangle,
        colors: &SectionColors,
    ) -> Result<(), D::Error> {
        let Some(band) = colors.title_band else {
            return Ok(());
        };
        let band_rect = Rectangle::new(card.top_left, Size::new(card.size.width, TITLE_BAR_HEIGHT));
        // Only the top corners are rounded: paint a taller shape and clip it
        let painted = Rectangle::new(
            card.top_left,
            Size::new(card.size.width, TITLE_BAR_HEIGHT + SECTION_CORNER_RADIUS),
        );
        paint::fill_gradient_rounded(
            &mut display.clipped(&band_rect),
            painted,
            SECTION_CORNER_RADIUS,
            band,
            colors.background,
            GradientAxis::Horizontal,
        )
    }
}

impl core::fmt::Debug for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Section")
            .field("title", &self.title_text.text())
            .field("child", &self.child)
            .field("visible", &self.visible)
            .finish()
    }
}

impl Measure for Section {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        self.title_text
            .measure(Constraint::AtMost(CONTENT_WIDTH), Constraint::AtMost(TITLE_BAR_HEIGHT));

        let child_height = match self.child.as_mut() {
            Some(child) => {
                child
                    .measure(Constraint::Exactly(CONTENT_WIDTH), Constraint::Unbounded)
                    .height
            }
            None => 0,
        };

        let total = TITLE_BAR_HEIGHT
            + TITLE_SPACING
            + child_height
            + CONTENT_PADDING_BOTTOM
            + SECTION_BOTTOM_MARGIN;
        self.measured = Size::new(
            width.resolve(SECTION_WIDTH + 2 * SECTION_HORIZONTAL_MARGIN),
            height.resolve(total),
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

        let left = bounds.top_left.x + SECTION_HORIZONTAL_MARGIN as i32;
        let title_origin = Point::new(
            left + TITLE_MARGIN_START as i32,
            bounds.top_left.y + TITLE_MARGIN_TOP as i32,
        );
        let title_size = self.title_text.measured_size();
        self.title_text.layout(Rectangle::new(title_origin, title_size));

        if let Some(child) = self.child.as_mut() {
            let origin = Point::new(
                left + CONTENT_PADDING_HORIZONTAL as i32,
                bounds.top_left.y + (TITLE_BAR_HEIGHT + TITLE_SPACING) as i32,
            );
            let size = child.measured_size();
            child.layout(Rectangle::new(origin, size));
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Drawable for Section {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }
        let colors = self.colors();
        let card = self.card_rect();

        let background = Style::new()
            .with_background(colors.background)
            .with_corner_radius(SECTION_CORNER_RADIUS);
        paint::draw_rounded(display, card, &background)?;
        self.draw_title_band(display, card, &colors)?;
        self.title_text.draw(display)?;

        match &self.child {
            Some(child) => child.draw(display),
            None => Ok(()),
        }
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title_text.is_dirty()
            || self.child.as_ref().is_some_and(|child| child.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title_text.mark_clean();
        if let Some(child) = self.child.as_mut() {
            child.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Section {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.visible && self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if !self.visible {
            return TouchResult::NotHandled;
        }
        match self.child.as_mut() {
            Some(child) => child.handle_touch(event),
            None => TouchResult::NotHandled,
        }
    }
}

impl Themable for Section {
    fn set_theme(&mut self, theme: impl Into<Option<Theme>>) -> UiResult<()> {
        let theme = theme.into().ok_or(UiError::MissingTheme)?;
        if self.theme == Some(theme) {
            return Ok(());
        }
        self.theme = Some(theme);
        self.title_text.set_theme(theme)?;
        self.title_text
            .set_color(SectionColors::for_theme(theme).title_text);
        self.dirty = true;
        Ok(())
    }

    fn theme(&self) -> Option<Theme> {
        self.theme
    }

    fn propagate_theme(&mut self, theme: Option<Theme>) {
        let Some(theme) = theme else { return };
        match &mut self.child {
            Some(SectionChild::Radio(radio)) => push_theme(radio, theme),
            Some(SectionChild::Element(_)) => trace!("Section child is not themable, skipped"),
            None => {}
        }
    }
}

impl Localizable for Section {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language == Some(language) {
            return Ok(());
        }
        self.language = Some(language);
        self.title_text.set_language(language)?;
        self.dirty = true;
        Ok(())
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn propagate_language(&mut self, language: Option<Language>) {
        let Some(language) = language else { return };
        match &mut self.child {
            Some(SectionChild::Radio(radio)) => push_language(radio, language),
            Some(SectionChild::Element(_)) => trace!("Section child is not localizable, skipped"),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::RadioButton;
    use alloc::vec;

    fn title() -> Localized {
        Localized::new()
            .with(Language::En, "Driving mode")
            .with(Language::Ru, "Режим вождения")
    }

    fn mode_radio() -> Radio {
        Radio::new(vec![
            RadioButton::new("eco", Localized::new().with(Language::En, "Eco")).unwrap(),
            RadioButton::new(
                "sport",
                Localized::new()
                    .with(Language::En, "Sport")
                    .with(Language::Ru, "Спорт"),
            )
            .unwrap(),
        ])
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(matches!(Section::new(Localized::new()), Err(UiError::EmptyLabel)));
        let mut section = Section::new(title()).unwrap();
        assert_eq!(section.set_title(Localized::new()), Err(UiError::EmptyLabel));
        assert_eq!(section.title_text(), "Driving mode");
    }

    #[test]
    fn test_measure_and_layout() {
        let mut section = Section::new(title()).unwrap().with_radio(mode_radio());
        let size = section.measure(Constraint::AtMost(1920), Constraint::Unbounded);
        assert_eq!(size, Size::new(1364, 98 + 40 + 70 + 50 + 25));

        section.layout(Rectangle::new(Point::new(545, 50), size));
        let radio = section.radio().unwrap();
        assert_eq!(radio.bounds().top_left, Point::new(545 + 36, 50 + 138));
        assert_eq!(radio.bounds().size, Size::new(CONTENT_WIDTH, 70));
    }

    #[test]
    fn test_propagation_reaches_radio() {
        let mut section = Section::new(title()).unwrap().with_radio(mode_radio());
        push_theme(&mut section, Theme::DreamerLight);
        push_language(&mut section, Language::Ru);

        assert_eq!(section.theme(), Some(Theme::DreamerLight));
        assert_eq!(section.title_text(), "Режим вождения");
        let radio = section.radio().unwrap();
        assert_eq!(radio.theme(), Some(Theme::DreamerLight));
        assert_eq!(radio.language(), Some(Language::Ru));
        assert_eq!(radio.label(1), Some("Спорт"));
        // Missing translation keeps the previous label
        assert_eq!(radio.label(0), Some("Eco"));
    }

    #[test]
    fn test_element_child_is_skipped() {
        let mut section = Section::new(title())
            .unwrap()
            .with_child(SectionChild::Element(Element::text("Static")));
        push_theme(&mut section, Theme::FreeLight);

        assert_eq!(section.theme(), Some(Theme::FreeLight));
        let Some(SectionChild::Element(element)) = section.child() else {
            panic!("element child expected");
        };
        assert_eq!(element.as_text().unwrap().theme(), None);
    }

    #[test]
    fn test_hidden_section_still_follows_theme() {
        let mut section = Section::new(title()).unwrap().with_radio(mode_radio());
        section.set_visible(false);
        assert!(!section.is_visible());

        push_theme(&mut section, Theme::FreeLight);
        assert_eq!(section.radio().unwrap().theme(), Some(Theme::FreeLight));
        let result = section.handle_touch(TouchEvent::Press(TouchPoint::new(0, 0)));
        assert_eq!(result, TouchResult::NotHandled);
    }

    #[test]
    fn test_missing_theme_rejected() {
        let mut section = Section::new(title()).unwrap();
        assert_eq!(section.set_theme(None), Err(UiError::MissingTheme));
        assert_eq!(section.set_language(None), Err(UiError::MissingLanguage));
    }

    #[test]
    fn test_take_child_detaches() {
        let mut section = Section::new(title()).unwrap().with_radio(mode_radio());
        assert!(matches!(section.take_child(), Some(SectionChild::Radio(_))));
        assert!(section.child().is_none());
        let size = section.measure(Constraint::AtMost(1920), Constraint::Unbounded);
        assert_eq!(size.height, 98 + 40 + 50 + 25);
    }
}
