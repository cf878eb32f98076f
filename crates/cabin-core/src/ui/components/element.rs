//! Non-interactive leaf elements.
//!
//! Containers own heterogeneous leaves through this enum instead of trait
//! objects: `Drawable::draw` is generic over the draw target and therefore
//! not object-safe. Elements never take part in theme or language
//! propagation.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::components::Text;
use crate::ui::core::{
    Constraint, Drawable, Measure, TouchEvent, TouchPoint, TouchResult, Touchable,
};

/// A concrete, layout-friendly leaf.
#[derive(Debug, Clone)]
pub enum Element {
    Text(Text),
    /// A layout-only element that draws nothing.
    Spacer {
        size: Size,
        measured: Size,
        bounds: Rectangle,
        dirty: bool,
    },
}

impl Element {
    /// Convenience constructor: plain text element.
    pub fn text(text: &str) -> Self {
        Self::Text(Text::new(text))
    }

    /// Convenience constructor: spacer of a fixed size.
    pub fn spacer(width: u32, height: u32) -> Self {
        Self::Spacer {
            size: Size::new(width, height),
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(text) => Some(text),
            Element::Spacer { .. } => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Text(text) => Some(text),
            Element::Spacer { .. } => None,
        }
    }
}

impl Measure for Element {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        match self {
            Element::Text(text) => text.measure(width, height),
            Element::Spacer { size, measured, .. } => {
                *measured = Size::new(width.resolve(size.width), height.resolve(size.height));
                *measured
            }
        }
    }

    fn measured_size(&self) -> Size {
        match self {
            Element::Text(text) => text.measured_size(),
            Element::Spacer { measured, .. } => *measured,
        }
    }

    fn layout(&mut self, bounds: Rectangle) {
        match self {
            Element::Text(text) => text.layout(bounds),
            Element::Spacer {
                bounds: current,
                dirty,
                ..
            } => {
                if *current != bounds {
                    *current = bounds;
                    *dirty = true;
                }
            }
        }
    }
}

impl Drawable for Element {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            Element::Text(text) => text.draw(display),
            Element::Spacer { .. } => Ok(()),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            Element::Text(text) => text.bounds(),
            Element::Spacer { bounds, .. } => *bounds,
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Element::Text(text) => text.is_dirty(),
            Element::Spacer { dirty, .. } => *dirty,
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Element::Text(text) => text.mark_clean(),
            Element::Spacer { dirty, .. } => *dirty = false,
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            Element::Text(text) => text.mark_dirty(),
            Element::Spacer { dirty, .. } => *dirty = true,
        }
    }
}

impl Touchable for Element {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, _event: TouchEvent) -> TouchResult {
        TouchResult::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_measure_and_layout() {
        let mut spacer = Element::spacer(10, 40);
        assert_eq!(
            spacer.measure(Constraint::Exactly(300), Constraint::Unbounded),
            Size::new(300, 40)
        );

        let bounds = Rectangle::new(Point::new(5, 5), Size::new(300, 40));
        spacer.mark_clean();
        spacer.layout(bounds);
        assert_eq!(spacer.bounds(), bounds);
        assert!(spacer.is_dirty());
        assert!(spacer.as_text().is_none());
    }

    #[test]
    fn test_elements_ignore_touch() {
        let mut element = Element::text("Version 1.0");
        assert_eq!(
            element.handle_touch(TouchEvent::Press(TouchPoint::new(0, 0))),
            TouchResult::NotHandled
        );
        assert_eq!(element.as_text().map(Text::text), Some("Version 1.0"));
    }
}
