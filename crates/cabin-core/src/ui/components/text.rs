//! Text label with theme-driven color and optional translations

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::error::{UiError, UiResult};
use crate::i18n::{Language, Localized, ResolvedText};
use crate::ui::core::{Constraint, Drawable, Localizable, Measure, Themable};
use crate::ui::font;
use crate::ui::paint;
use crate::ui::styling::{TextColors, Theme};

/// Typographic role of a text
///
/// - `Control`: 24px, weight 500, used inside controls
/// - `Title`: 32px, weight 600, used for section headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRole {
    #[default]
    Control,
    Title,
}

impl TextRole {
    pub const fn size_px(self) -> u32 {
        match self {
            TextRole::Control => 24,
            TextRole::Title => 32,
        }
    }

    pub const fn weight(self) -> u16 {
        match self {
            TextRole::Control => 500,
            TextRole::Title => 600,
        }
    }

    /// Face used to draw `text` in this role
    pub fn font(self, text: &str) -> &'static MonoFont<'static> {
        if self.weight() >= 600 {
            font::bold(text)
        } else {
            font::regular()
        }
    }

    fn color(self, theme: Theme) -> Rgb888 {
        let colors = TextColors::for_theme(theme);
        match self {
            TextRole::Control => colors.control,
            TextRole::Title => colors.title,
        }
    }
}

/// Where the displayed string comes from
#[derive(Debug, Clone, PartialEq)]
enum TextSource {
    Plain,
    Localized(Localized),
}

/// Single-line text.
///
/// The source is either a plain string or a [`Localized`] map. On a language
/// switch a localized text keeps what it showed before if the new language
/// has no entry.
///
/// # Examples
///
/// ```ignore
/// let mut title = Text::localized(
///     Localized::new().with(Language::En, "Display").with(Language::Ru, "Дисплей"),
/// )
/// .with_role(TextRole::Title);
/// title.set_language(Language::Ru)?;
/// assert_eq!(title.text(), "Дисплей");
/// ```
#[derive(Debug, Clone)]
pub struct Text {
    source: TextSource,
    resolved: ResolvedText,
    role: TextRole,
    alignment: Alignment,
    color_override: Option<Rgb888>,
    theme: Option<Theme>,
    language: Option<Language>,
    measured: Size,
    bounds: Rectangle,
    dirty: bool,
}

impl Text {
    /// Plain text
    pub fn new(text: &str) -> Self {
        let mut resolved = ResolvedText::default();
        resolved.replace(text);
        Self::with_source(TextSource::Plain, resolved)
    }

    /// Translated text, initially showing the first available translation
    pub fn localized(source: Localized) -> Self {
        let resolved = ResolvedText::initial(&source, None, "");
        Self::with_source(TextSource::Localized(source), resolved)
    }

    fn with_source(source: TextSource, resolved: ResolvedText) -> Self {
        Self {
            source,
            resolved,
            role: TextRole::default(),
            alignment: Alignment::Left,
            color_override: None,
            theme: None,
            language: None,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        }
    }

    pub fn with_role(mut self, role: TextRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_color(mut self, color: Rgb888) -> Self {
        self.color_override = Some(color);
        self
    }

    /// Replace the content with a plain string. Empty text is valid.
    pub fn set_text(&mut self, text: &str) {
        self.source = TextSource::Plain;
        if self.resolved.replace(text) {
            self.dirty = true;
        }
    }

    /// Replace the content with a translated string.
    ///
    /// If the map has no entry for the current language (or is empty), the
    /// previous text stays on screen.
    pub fn set_localized(&mut self, source: Localized) {
        let changed = match self.language {
            Some(language) => self.resolved.resolve(&source, language),
            None => source
                .first()
                .is_some_and(|first| self.resolved.replace(first)),
        };
        self.source = TextSource::Localized(source);
        if changed {
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        self.resolved.as_str()
    }

    pub fn is_localized(&self) -> bool {
        matches!(self.source, TextSource::Localized(_))
    }

    pub fn role(&self) -> TextRole {
        self.role
    }

    pub fn set_role(&mut self, role: TextRole) {
        if self.role != role {
            self.role = role;
            self.dirty = true;
        }
    }

    /// Pin the color regardless of theme
    pub fn set_color(&mut self, color: Rgb888) {
        if self.color_override != Some(color) {
            self.color_override = Some(color);
            self.dirty = true;
        }
    }

    /// Go back to the theme's color for this role
    pub fn use_theme_color(&mut self) {
        if self.color_override.take().is_some() {
            self.dirty = true;
        }
    }

    /// Color the text is drawn in
    pub fn color(&self) -> Rgb888 {
        self.color_override
            .unwrap_or_else(|| self.role.color(self.theme.unwrap_or_default()))
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.role.font(self.text())
    }

    /// Natural size of the current text
    pub fn content_size(&self) -> Size {
        let font = self.font();
        Size::new(
            paint::text_width(font, self.text()),
            paint::line_height(font),
        )
    }
}

impl Measure for Text {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        let content = self.content_size();
        self.measured = Size::new(width.resolve(content.width), height.resolve(content.height));
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

impl Drawable for Text {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        paint::draw_text_line(
            display,
            self.text(),
            self.bounds,
            self.font(),
            self.color(),
            self.alignment,
        )
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

impl Themable for Text {
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

impl Localizable for Text {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language == Some(language) {
            return Ok(());
        }
        self.language = Some(language);
        if let TextSource::Localized(source) = &self.source
            && self.resolved.resolve(source, language)
        {
            self.dirty = true;
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
    use crate::ui::styling::colors::hex;

    fn display_label() -> Localized {
        Localized::new()
            .with(Language::En, "Display")
            .with(Language::Ru, "Дисплей")
    }

    #[test]
    fn test_plain_text() {
        let mut text = Text::new("Hello");
        assert_eq!(text.text(), "Hello");
        assert!(!text.is_localized());

        text.set_text("");
        assert_eq!(text.text(), "");
    }

    #[test]
    fn test_language_switch() {
        let mut text = Text::localized(display_label());
        text.set_language(Language::Ru).unwrap();
        assert_eq!(text.text(), "Дисплей");
        text.set_language(Language::En).unwrap();
        assert_eq!(text.text(), "Display");
    }

    #[test]
    fn test_missing_translation_keeps_previous_text() {
        let mut text = Text::localized(Localized::new().with(Language::En, "Sound"));
        text.set_language(Language::En).unwrap();
        text.set_language(Language::Ru).unwrap();
        assert_eq!(text.text(), "Sound");
    }

    #[test]
    fn test_empty_map_keeps_previous_text() {
        let mut text = Text::localized(display_label());
        text.set_language(Language::En).unwrap();
        text.mark_clean();

        text.set_localized(Localized::new());
        assert_eq!(text.text(), "Display");
        assert!(!text.is_dirty());
    }

    #[test]
    fn test_missing_theme_and_language_rejected() {
        let mut text = Text::new("x");
        assert_eq!(text.set_theme(None), Err(UiError::MissingTheme));
        assert_eq!(text.set_language(None), Err(UiError::MissingLanguage));
        assert_eq!(text.theme(), None);
    }

    #[test]
    fn test_color_follows_theme_and_role() {
        let mut text = Text::new("x");
        text.set_theme(Theme::FreeLight).unwrap();
        assert_eq!(text.color(), hex(0x1a1a1a));

        text.set_role(TextRole::Title);
        assert_eq!(text.color(), hex(0x000000));

        text.set_theme(Theme::DreamerDark).unwrap();
        assert_eq!(text.color(), hex(0xf1f5fb));

        text.set_color(hex(0x47b4ff));
        assert_eq!(text.color(), hex(0x47b4ff));
        text.use_theme_color();
        assert_eq!(text.color(), hex(0xf1f5fb));
    }

    #[test]
    fn test_measure_resolves_against_constraints() {
        let mut text = Text::new("abcd").with_role(TextRole::Title);
        let natural = text.content_size();
        assert_eq!(natural, Size::new(36, 18));

        let size = text.measure(Constraint::AtMost(20), Constraint::Unbounded);
        assert_eq!(size, Size::new(20, 18));
    }

    #[test]
    fn test_role_metrics() {
        assert_eq!(TextRole::Control.size_px(), 24);
        assert_eq!(TextRole::Title.weight(), 600);
    }
}
