//! Style configuration for UI elements
//!
//! A `Style` bundles the optional fill and border of a shape. Themed widgets
//! build one from their color table each time they draw.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

// ============================================================================
// Style
// ============================================================================

/// Visual style configuration for a UI element
///
/// # Examples
///
/// ```ignore
/// let style = Style::new()
///     .with_background(colors.background)
///     .with_corner_radius(20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb888>,

    /// Border color (if any)
    pub border_color: Option<Rgb888>,

    /// Border width in pixels (0 = no border)
    pub border_width: u32,

    /// Radius of all four corners
    pub corner_radius: u32,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb888) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Like [`Style::with_background`] but keeps a transparent slot transparent
    pub fn with_optional_background(mut self, color: Option<Rgb888>) -> Self {
        self.background_color = color;
        self
    }

    /// Sets the border color and width
    ///
    /// A width of 0 effectively disables the border.
    pub fn with_border(mut self, color: Option<Rgb888>, width: u32) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    pub fn with_corner_radius(mut self, radius: u32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Whether drawing this style would touch any pixel
    pub fn is_visible(&self) -> bool {
        self.background_color.is_some() || (self.border_color.is_some() && self.border_width > 0)
    }

    /// Converts this style to a `PrimitiveStyle` for embedded-graphics drawing
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb888> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color
            && self.border_width > 0
        {
            builder = builder.stroke_color(border).stroke_width(self.border_width);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_visibility() {
        assert!(!Style::new().is_visible());
        assert!(!Style::new().with_border(Some(Rgb888::RED), 0).is_visible());
        assert!(Style::new().with_border(Some(Rgb888::RED), 1).is_visible());
        assert!(Style::new().with_background(Rgb888::BLUE).is_visible());
        assert!(!Style::new().with_optional_background(None).is_visible());
    }

    #[test]
    fn test_primitive_style() {
        let style = Style::new()
            .with_background(Rgb888::BLUE)
            .with_border(Some(Rgb888::RED), 2)
            .to_primitive_style();
        assert_eq!(style.fill_color, Some(Rgb888::BLUE));
        assert_eq!(style.stroke_color, Some(Rgb888::RED));
        assert_eq!(style.stroke_width, 2);
    }
}
