//! Styling system for UI elements
//!
//! - [`theme`] - the four themes and their brand/brightness axes
//! - [`colors`] - per-widget color tables keyed by theme
//! - [`layout`] - padding
//! - [`style`] - fill/border configuration for drawn shapes

pub mod colors;
pub mod layout;
pub mod style;
pub mod theme;

pub use colors::{
    GradientAxis, PanelColors, RadioColors, ScreenColors, SectionColors, TabsColors, TextColors,
};
pub use layout::Padding;
pub use style::Style;
pub use theme::{Brand, Brightness, Theme};
