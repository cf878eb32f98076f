//! Vertical stack container
//!
//! Children are measured at the column's inner width and stacked top to
//! bottom, flush left, in insertion order. Hidden children take no space.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::{
    Constraint, DirtyRegion, Drawable, Measure, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::styling::Padding;

/// Owning vertical stack of `C`
pub struct Column<C> {
    children: Vec<C>,
    padding: Padding,
    measured: Size,
    bounds: Rectangle,
    dirty: bool,
}

impl<C> Default for Column<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Column<C> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            padding: Padding::default(),
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Append a child, returning its index
    pub fn push(&mut self, child: C) -> usize {
        self.children.push(child);
        self.dirty = true;
        self.children.len() - 1
    }

    /// Detach and return the child at `index`
    pub fn remove(&mut self, index: usize) -> Option<C> {
        if index >= self.children.len() {
            return None;
        }
        self.dirty = true;
        Some(self.children.remove(index))
    }

    /// Detach every child
    pub fn take_children(&mut self) -> Vec<C> {
        self.dirty = true;
        core::mem::take(&mut self.children)
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.children.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.children.get_mut(index)
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [C] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C: Measure> Measure for Column<C> {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        let child_width = width.shrink(self.padding.horizontal());
        let child_height = match height.shrink(self.padding.vertical()).bound() {
            Some(bound) => Constraint::AtMost(bound),
            None => Constraint::Unbounded,
        };

        let mut content = Size::zero();
        for child in self.children.iter_mut().filter(|child| child.is_visible()) {
            let size = child.measure(child_width, child_height);
            content.width = content.width.max(size.width);
            content.height += size.height;
        }

        self.measured = Size::new(
            width.resolve(content.width + self.padding.horizontal()),
            height.resolve(content.height + self.padding.vertical()),
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

        let left = bounds.top_left.x + self.padding.left as i32;
        let mut top = bounds.top_left.y + self.padding.top as i32;

        for child in self.children.iter_mut().filter(|child| child.is_visible()) {
            let size = child.measured_size();
            child.layout(Rectangle::new(Point::new(left, top), size));
            top += size.height as i32;
        }
    }
}

impl<C: Drawable + Measure> Drawable for Column<C> {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        for child in self.children.iter().filter(|child| child.is_visible()) {
            child.draw(display)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.children.iter().any(|child| child.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for child in &mut self.children {
            child.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            return Some(DirtyRegion::new(self.bounds));
        }

        let mut region: Option<DirtyRegion> = None;
        for child in self.children.iter().filter(|child| child.is_dirty()) {
            match region {
                Some(ref mut r) => r.expand_to_include(child.bounds()),
                None => region = Some(DirtyRegion::new(child.bounds())),
            }
        }
        region
    }
}

impl<C: Touchable + Measure> Touchable for Column<C> {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if let TouchEvent::Press(point) = event
            && !self.contains_point(point)
        {
            return TouchResult::NotHandled;
        }

        for child in self.children.iter_mut().filter(|child| child.is_visible()) {
            match child.handle_touch(event) {
                TouchResult::NotHandled => continue,
                result => return result,
            }
        }
        TouchResult::NotHandled
    }
}
