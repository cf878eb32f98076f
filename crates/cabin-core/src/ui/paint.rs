//! Drawing helpers shared by the widgets

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

use crate::ui::styling::{GradientAxis, Style};

/// Rendered width of `text` in `font`
pub fn text_width(font: &'static MonoFont<'static>, text: &str) -> u32 {
    MonoTextStyle::new(font, Rgb888::WHITE)
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width
}

/// Line height of `font`
pub fn line_height(font: &MonoFont<'_>) -> u32 {
    font.character_size.height
}

/// Draw one line of text inside `bounds`, vertically centered
pub fn draw_text_line<D: DrawTarget<Color = Rgb888>>(
    display: &mut D,
    text: &str,
    bounds: Rectangle,
    font: &'static MonoFont<'static>,
    color: Rgb888,
    alignment: Alignment,
) -> Result<(), D::Error> {
    if text.is_empty() {
        return Ok(());
    }

    let y = bounds.top_left.y
        + (bounds.size.height.saturating_sub(line_height(font)) / 2) as i32;
    let x = match alignment {
        Alignment::Left => bounds.top_left.x,
        Alignment::Center => bounds.center().x,
        Alignment::Right => bounds.top_left.x + bounds.size.width as i32,
    };

    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    EgText::with_text_style(text, Point::new(x, y), MonoTextStyle::new(font, color), text_style)
        .draw(display)?;
    Ok(())
}

/// Fill (and optionally stroke) a rounded rectangle using `style`
pub fn draw_rounded<D: DrawTarget<Color = Rgb888>>(
    display: &mut D,
    bounds: Rectangle,
    style: &Style,
) -> Result<(), D::Error> {
    if !style.is_visible() || bounds.is_zero_sized() {
        return Ok(());
    }
    let corner = Size::new(style.corner_radius, style.corner_radius);
    RoundedRectangle::with_equal_corners(bounds, corner)
        .into_styled(style.to_primitive_style())
        .draw(display)
}

/// Linear interpolation between two colors, `step` of `steps`
pub fn lerp(start: Rgb888, end: Rgb888, step: u32, steps: u32) -> Rgb888 {
    if steps <= 1 {
        return start;
    }
    let last = (steps - 1) as i32;
    let step = step.min(steps - 1) as i32;
    let channel = |a: u8, b: u8| (a as i32 + (b as i32 - a as i32) * step / last) as u8;
    Rgb888::new(
        channel(start.r(), end.r()),
        channel(start.g(), end.g()),
        channel(start.b(), end.b()),
    )
}

/// How far a row (or column) `offset` pixels from the edge is pulled in by a
/// corner of `radius`
fn corner_inset(offset: u32, radius: u32) -> u32 {
    if offset >= radius {
        return 0;
    }
    let dy = radius - offset;
    radius - (radius * radius - dy * dy).isqrt()
}

/// Fill a rounded rectangle with a two-stop linear gradient
pub fn fill_gradient_rounded<D: DrawTarget<Color = Rgb888>>(
    display: &mut D,
    bounds: Rectangle,
    radius: u32,
    start: Rgb888,
    end: Rgb888,
    axis: GradientAxis,
) -> Result<(), D::Error> {
    let Size { width, height } = bounds.size;
    let radius = radius.min(width / 2).min(height / 2);
    let origin = bounds.top_left;

    match axis {
        GradientAxis::Vertical => {
            for row in 0..height {
                let edge = row.min(height - 1 - row);
                let inset = corner_inset(edge, radius);
                let span = width.saturating_sub(2 * inset);
                let strip = Rectangle::new(
                    Point::new(origin.x + inset as i32, origin.y + row as i32),
                    Size::new(span, 1),
                );
                display.fill_solid(&strip, lerp(start, end, row, height))?;
            }
        }
        GradientAxis::Horizontal => {
            for column in 0..width {
                let edge = column.min(width - 1 - column);
                let inset = corner_inset(edge, radius);
                let span = height.saturating_sub(2 * inset);
                let strip = Rectangle::new(
                    Point::new(origin.x + column as i32, origin.y + inset as i32),
                    Size::new(1, span),
                );
                display.fill_solid(&strip, lerp(start, end, column, width))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::ascii::FONT_9X18_BOLD;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(&FONT_9X18_BOLD, ""), 0);
        assert_eq!(text_width(&FONT_9X18_BOLD, "abcd"), 36);
    }

    #[test]
    fn test_lerp_endpoints() {
        let start = Rgb888::new(0, 0, 0);
        let end = Rgb888::new(200, 100, 50);
        assert_eq!(lerp(start, end, 0, 5), start);
        assert_eq!(lerp(start, end, 4, 5), end);
        assert_eq!(lerp(start, end, 2, 5), Rgb888::new(100, 50, 25));
        assert_eq!(lerp(start, end, 0, 1), start);
    }

    #[test]
    fn test_corner_inset() {
        assert_eq!(corner_inset(0, 0), 0);
        assert_eq!(corner_inset(10, 10), 0);
        assert_eq!(corner_inset(0, 10), 10);
        assert!(corner_inset(5, 10) < corner_inset(1, 10));
    }

    #[test]
    fn test_gradient_fill_colors_corners_and_center() {
        let mut display = MockDisplay::<Rgb888>::new();
        let bounds = Rectangle::new(Point::new(0, 0), Size::new(20, 10));
        fill_gradient_rounded(
            &mut display,
            bounds,
            4,
            Rgb888::BLACK,
            Rgb888::WHITE,
            GradientAxis::Vertical,
        )
        .unwrap();

        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
        assert_eq!(display.get_pixel(Point::new(10, 0)), Some(Rgb888::BLACK));
        assert_eq!(display.get_pixel(Point::new(10, 9)), Some(Rgb888::WHITE));
    }
}
