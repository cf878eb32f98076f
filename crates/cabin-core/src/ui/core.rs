//! Core UI traits and types for the cabin widget tree

use alloc::boxed::Box;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::error::UiResult;
use crate::i18n::Language;
use crate::ui::styling::Theme;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events that can occur on the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
}

impl TouchEvent {
    pub fn point(&self) -> TouchPoint {
        match self {
            TouchEvent::Press(point) | TouchEvent::Drag(point) => *point,
        }
    }
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event requests an action from the owner
    Action(Action),
}

/// Actions that a widget asks its owner to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The tab at this index was tapped
    SelectTab(usize),
}

/// Observer of a selected value (tab or radio item)
pub type ValueListener = Box<dyn FnMut(&str)>;

/// Observer of a selected index
pub type IndexListener = Box<dyn FnMut(usize)>;

/// Dirty region tracking for efficient rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Expand this dirty region to include another region
    pub fn expand_to_include(&mut self, other: Rectangle) {
        if !self.is_dirty {
            self.bounds = other;
            self.is_dirty = true;
            return;
        }

        let min_x = self.bounds.top_left.x.min(other.top_left.x);
        let min_y = self.bounds.top_left.y.min(other.top_left.y);
        let max_x = (self.bounds.top_left.x + self.bounds.size.width as i32)
            .max(other.top_left.x + other.size.width as i32);
        let max_y = (self.bounds.top_left.y + self.bounds.size.height as i32)
            .max(other.top_left.y + other.size.height as i32);

        self.bounds = Rectangle::new(
            Point::new(min_x, min_y),
            Size::new((max_x - min_x) as u32, (max_y - min_y) as u32),
        );
    }
}

// ============================================================================
// Drawing and touch
// ============================================================================

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element within its laid-out bounds
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Bounds assigned by the last layout pass
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Get the dirty region for partial updates
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}

// ============================================================================
// Measure and layout
// ============================================================================

/// A size constraint handed from parent to child during measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The child must be exactly this size
    Exactly(u32),
    /// The child may be any size up to this bound
    AtMost(u32),
    /// The child may be as large as it wants
    Unbounded,
}

impl Constraint {
    /// Reconcile a desired size with this constraint
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            Constraint::Exactly(size) => size,
            Constraint::AtMost(bound) => desired.min(bound),
            Constraint::Unbounded => desired,
        }
    }

    /// Upper bound, if any
    pub fn bound(self) -> Option<u32> {
        match self {
            Constraint::Exactly(size) | Constraint::AtMost(size) => Some(size),
            Constraint::Unbounded => None,
        }
    }

    /// Same kind of constraint with `amount` taken off the bound
    pub fn shrink(self, amount: u32) -> Self {
        match self {
            Constraint::Exactly(size) => Constraint::Exactly(size.saturating_sub(amount)),
            Constraint::AtMost(bound) => Constraint::AtMost(bound.saturating_sub(amount)),
            Constraint::Unbounded => Constraint::Unbounded,
        }
    }

    /// Loosen an exact constraint into an upper bound
    pub fn loosen(self) -> Self {
        match self {
            Constraint::Exactly(size) => Constraint::AtMost(size),
            other => other,
        }
    }
}

/// Two-pass layout: parents measure children under constraints, then
/// position them.
pub trait Measure {
    /// Compute and remember the size this element wants under the constraints
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size;

    /// Size computed by the last [`Measure::measure`] call
    fn measured_size(&self) -> Size;

    /// Position the element (and its children) at `bounds`
    fn layout(&mut self, bounds: Rectangle);

    /// Hidden elements take no space
    fn is_visible(&self) -> bool {
        true
    }
}

// ============================================================================
// Propagation
// ============================================================================

/// An element whose appearance depends on the active [`Theme`].
///
/// `set_theme` applies to the element itself and fails on a missing theme.
/// `propagate_theme` pushes into the element's live children; a missing
/// theme is silently ignored there, and leaves keep the default no-op.
pub trait Themable {
    fn set_theme(&mut self, theme: impl Into<Option<Theme>>) -> UiResult<()>;

    fn theme(&self) -> Option<Theme>;

    fn propagate_theme(&mut self, _theme: Option<Theme>) {}
}

/// An element whose text depends on the active [`Language`].
///
/// Same contract as [`Themable`].
pub trait Localizable {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()>;

    fn language(&self) -> Option<Language>;

    fn propagate_language(&mut self, _language: Option<Language>) {}
}

/// Apply then propagate, logging instead of failing so one child never stops
/// the fan-out to its siblings.
pub(crate) fn push_theme<T: Themable>(target: &mut T, theme: Theme) {
    if let Err(err) = target.set_theme(theme) {
        log::warn!("Theme propagation skipped a child: {}", err);
        return;
    }
    target.propagate_theme(Some(theme));
}

/// Language counterpart of [`push_theme`]
pub(crate) fn push_language<T: Localizable>(target: &mut T, language: Language) {
    if let Err(err) = target.set_language(language) {
        log::warn!("Language propagation skipped a child: {}", err);
        return;
    }
    target.propagate_language(Some(language));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_resolve() {
        assert_eq!(Constraint::Exactly(100).resolve(40), 100);
        assert_eq!(Constraint::Exactly(100).resolve(400), 100);
        assert_eq!(Constraint::AtMost(100).resolve(40), 40);
        assert_eq!(Constraint::AtMost(100).resolve(400), 100);
        assert_eq!(Constraint::Unbounded.resolve(400), 400);
    }

    #[test]
    fn test_constraint_shrink_and_loosen() {
        assert_eq!(Constraint::Exactly(10).shrink(30), Constraint::Exactly(0));
        assert_eq!(Constraint::AtMost(50).shrink(20), Constraint::AtMost(30));
        assert_eq!(Constraint::Unbounded.shrink(20), Constraint::Unbounded);
        assert_eq!(Constraint::Exactly(10).loosen(), Constraint::AtMost(10));
        assert_eq!(Constraint::Unbounded.bound(), None);
    }

    #[test]
    fn test_dirty_region_expand() {
        let mut region = DirtyRegion::new(Rectangle::new(Point::new(10, 10), Size::new(10, 10)));
        region.expand_to_include(Rectangle::new(Point::new(0, 15), Size::new(5, 20)));
        assert_eq!(
            region.bounds,
            Rectangle::new(Point::new(0, 10), Size::new(20, 25))
        );
    }

    #[test]
    fn test_touch_event_point() {
        let point = TouchPoint::new(3, 4);
        assert_eq!(TouchEvent::Drag(point).point(), point);
        assert_eq!(point.to_point(), Point::new(3, 4));
    }
}
