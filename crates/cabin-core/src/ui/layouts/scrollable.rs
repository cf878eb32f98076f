//! Vertical scrolling viewport around a single content element

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::{
    Constraint, DirtyRegion, Drawable, Measure, TouchEvent, TouchPoint, TouchResult, Touchable,
};

/// Viewport onto content that may be taller than it.
///
/// The content is measured without a height bound and laid out shifted up
/// by the current scroll offset, so descendants always hold screen
/// coordinates and receive touches unchanged.
pub struct Scrollable<C> {
    content: C,
    /// Visible bounds
    viewport: Rectangle,
    /// Total content size (may be taller than the viewport)
    content_size: Size,
    scroll_offset: i32,
    measured: Size,
    dirty: bool,
    /// Last touch position for drag scrolling
    last_touch: Option<TouchPoint>,
}

impl<C> Scrollable<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            viewport: Rectangle::zero(),
            content_size: Size::zero(),
            scroll_offset: 0,
            measured: Size::zero(),
            dirty: true,
            last_touch: None,
        }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Unwrap the content, dropping the viewport
    pub fn into_content(self) -> C {
        self.content
    }

    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// How far the content is scrolled up, in pixels
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn can_scroll(&self) -> bool {
        self.content_size.height > self.viewport.size.height
    }

    fn max_scroll(&self) -> i32 {
        let overflow = self
            .content_size
            .height
            .saturating_sub(self.viewport.size.height);
        i32::try_from(overflow).unwrap_or(i32::MAX)
    }

    /// Constrain scroll to valid bounds
    fn constrain_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0, self.max_scroll());
    }
}

impl<C: Measure> Scrollable<C> {
    /// Scroll by `delta` pixels, positive moves the content up
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_to(self.scroll_offset.saturating_add(delta));
    }

    /// Scroll to a specific offset
    pub fn scroll_to(&mut self, offset: i32) {
        let previous = self.scroll_offset;
        self.scroll_offset = offset;
        self.constrain_scroll();
        if self.scroll_offset != previous {
            self.layout_content();
            self.dirty = true;
        }
    }

    fn layout_content(&mut self) {
        let origin = self.viewport.top_left - Point::new(0, self.scroll_offset);
        self.content
            .layout(Rectangle::new(origin, self.content_size));
    }
}

impl<C: Measure> Measure for Scrollable<C> {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        self.content_size = self.content.measure(width, Constraint::Unbounded);
        self.measured = Size::new(
            width.resolve(self.content_size.width),
            height.resolve(self.content_size.height),
        );
        self.measured
    }

    fn measured_size(&self) -> Size {
        self.measured
    }

    fn layout(&mut self, bounds: Rectangle) {
        if self.viewport != bounds {
            self.viewport = bounds;
            self.dirty = true;
        }
        self.constrain_scroll();
        self.layout_content();
    }

    fn is_visible(&self) -> bool {
        self.content.is_visible()
    }
}

impl<C: Drawable> Drawable for Scrollable<C> {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.content.draw(&mut display.clipped(&self.viewport))
    }

    fn bounds(&self) -> Rectangle {
        self.viewport
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.content.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.content.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.viewport))
        } else {
            None
        }
    }
}

impl<C: Measure + Touchable> Touchable for Scrollable<C> {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.viewport.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) => {
                if !self.contains_point(point) {
                    self.last_touch = None;
                    return TouchResult::NotHandled;
                }
                self.last_touch = Some(point);
                match self.content.handle_touch(event) {
                    TouchResult::NotHandled => TouchResult::Handled,
                    result => result,
                }
            }
            TouchEvent::Drag(point) => {
                let Some(last) = self.last_touch else {
                    return TouchResult::NotHandled;
                };

                // Drag down scrolls up
                self.scroll_by(last.y as i32 - point.y as i32);
                self.last_touch = Some(point);
                TouchResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tall {
        height: u32,
        bounds: Rectangle,
    }

    impl Measure for Tall {
        fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
            Size::new(width.resolve(100), height.resolve(self.height))
        }

        fn measured_size(&self) -> Size {
            Size::new(100, self.height)
        }

        fn layout(&mut self, bounds: Rectangle) {
            self.bounds = bounds;
        }
    }

    impl Touchable for Tall {
        fn contains_point(&self, point: TouchPoint) -> bool {
            self.bounds.contains(point.to_point())
        }

        fn handle_touch(&mut self, _event: TouchEvent) -> TouchResult {
            TouchResult::NotHandled
        }
    }

    fn scroller(content_height: u32, viewport_height: u32) -> Scrollable<Tall> {
        let mut scroll = Scrollable::new(Tall {
            height: content_height,
            bounds: Rectangle::zero(),
        });
        let size = scroll.measure(Constraint::AtMost(300), Constraint::Exactly(viewport_height));
        scroll.layout(Rectangle::new(Point::new(10, 50), size));
        scroll
    }

    #[test]
    fn test_measures_content_unbounded_on_scroll_axis() {
        let scroll = scroller(1000, 200);
        assert_eq!(scroll.content_size(), Size::new(100, 1000));
        assert_eq!(scroll.measured_size(), Size::new(100, 200));
        assert!(scroll.can_scroll());
    }

    #[test]
    fn test_scroll_is_clamped_and_shifts_content() {
        let mut scroll = scroller(1000, 200);

        scroll.scroll_by(120);
        assert_eq!(scroll.scroll_offset(), 120);
        assert_eq!(scroll.content().bounds.top_left, Point::new(10, -70));

        scroll.scroll_to(5000);
        assert_eq!(scroll.scroll_offset(), 800);

        scroll.scroll_by(-10_000);
        assert_eq!(scroll.scroll_offset(), 0);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut scroll = scroller(100, 200);
        scroll.scroll_by(50);
        assert_eq!(scroll.scroll_offset(), 0);
        assert!(!scroll.can_scroll());
    }

    #[test]
    fn test_drag_scrolls() {
        let mut scroll = scroller(1000, 200);
        let press = scroll.handle_touch(TouchEvent::Press(TouchPoint::new(20, 200)));
        assert_eq!(press, TouchResult::Handled);

        let drag = scroll.handle_touch(TouchEvent::Drag(TouchPoint::new(20, 150)));
        assert_eq!(drag, TouchResult::Handled);
        assert_eq!(scroll.scroll_offset(), 50);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut scroll = scroller(1000, 200);
        let result = scroll.handle_touch(TouchEvent::Press(TouchPoint::new(500, 500)));
        assert_eq!(result, TouchResult::NotHandled);
        let drag = scroll.handle_touch(TouchEvent::Drag(TouchPoint::new(500, 400)));
        assert_eq!(drag, TouchResult::NotHandled);
    }
}
