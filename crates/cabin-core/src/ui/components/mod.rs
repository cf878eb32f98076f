//! Widgets of the settings screen

pub mod element;
pub mod panel;
pub mod radio;
pub mod section;
pub mod tabs;
pub mod text;

pub use element::Element;
pub use panel::{Panel, PanelChild, SectionList};
pub use radio::{Radio, RadioButton};
pub use section::{Section, SectionChild};
pub use tabs::{TabItem, TabSelection, Tabs};
pub use text::{Text, TextRole};
