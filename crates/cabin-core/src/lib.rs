//! Hardware-independent core library for the cabin settings display
//!
//! This crate contains the platform-agnostic widget tree of the 1920×720
//! vehicle settings screen: theme and language value types, the propagation
//! protocol that pushes them down the tree, the two-pass measure/layout
//! engine, theme color tables and the settings state that drives a render.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod i18n;
pub mod state;
pub mod ui;

pub use config::ScreenConfig;
pub use error::{UiError, UiResult};
pub use i18n::{Language, Localized};
pub use state::SettingsState;
pub use ui::styling::{Brand, Brightness, Theme};
