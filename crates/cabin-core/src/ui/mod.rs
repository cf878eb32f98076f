//! Cabin UI system
//!
//! - Core traits for drawing, touch, measurement and propagation
//! - Layout containers (column, scrollable viewport)
//! - Widgets (text, radio, tabs, section, panel)
//! - The [`Screen`] root that owns tabs and panels
//! - Dirty region tracking for efficient rendering

pub mod components;
pub mod core;
pub mod font;
pub mod layouts;
pub mod paint;
pub mod screen;
pub mod styling;

pub use components::{
    Element, Panel, PanelChild, Radio, RadioButton, Section, SectionChild, TabItem, TabSelection,
    Tabs, Text, TextRole,
};
pub use self::core::{
    Action, Constraint, DirtyRegion, Drawable, Localizable, Measure, Themable, TouchEvent,
    TouchPoint, TouchResult, Touchable,
};
pub use layouts::{Column, Scrollable};
pub use screen::{Screen, ScreenLift};
pub use styling::{Padding, Style, Theme};
