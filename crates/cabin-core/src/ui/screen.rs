//! Root of the settings widget tree
//!
//! The screen owns the tab strip (inside a vertical scroll viewport) and
//! every content panel. Only the panel at the active index is mounted:
//! measured, laid out, drawn and touched. The rest wait, unmounted, until
//! their tab is selected.
//!
//! ```text
//!  offset_x   tabs width   gap_x
//! |--------|-------------|-----|--------------------------------|
//!          +-------------+     +--------------------------------+  offset_y
//!          | tabs        |     | active panel                   |
//!          | (scrolls)   |     | width = W - offset_x - tabs    |
//!          |             |     |         - gap_x                |
//!          +-------------+     +--------------------------------+
//! ```

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec as HeaplessVec;
use log::{debug, info, trace};

use crate::config::{ScreenConfig, non_negative};
use crate::error::{UiError, UiResult};
use crate::i18n::Language;
use crate::state::SettingsState;
use crate::ui::components::{Panel, TabSelection, Tabs};
use crate::ui::core::{
    Action, Constraint, DirtyRegion, Drawable, Localizable, Measure, Themable, TouchEvent,
    TouchPoint, TouchResult, Touchable, push_language, push_theme,
};
use crate::ui::layouts::Scrollable;
use crate::ui::styling::{ScreenColors, Theme};

/// Position of the motorized display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ScreenLift {
    Lowered = 1,
    #[default]
    Raised = 2,
}

impl ScreenLift {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ScreenLift {
    type Error = UiError;

    fn try_from(code: u8) -> UiResult<Self> {
        match code {
            1 => Ok(ScreenLift::Lowered),
            2 => Ok(ScreenLift::Raised),
            other => Err(UiError::InvalidScreenLift(other)),
        }
    }
}

/// Observer of screen lift changes
pub type LiftListener = Box<dyn FnMut(ScreenLift)>;

/// Which child received the last press, so drags follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchTarget {
    Tabs,
    Panel,
}

// ============================================================================
// Screen
// ============================================================================

pub struct Screen {
    width: u32,
    height: u32,
    offset_x: u32,
    offset_y: u32,
    gap_x: u32,
    theme: Option<Theme>,
    language: Option<Language>,
    tabs: Option<Scrollable<Tabs>>,
    panels: Vec<Panel>,
    active_panel: Option<usize>,
    screen_lift: ScreenLift,
    on_screen_lift: Option<LiftListener>,
    touch_target: Option<TouchTarget>,
    needs_layout: bool,
    measured: Size,
    bounds: Rectangle,
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Empty screen with the default 1920×720 geometry
    pub fn new() -> Self {
        let config = ScreenConfig::default();
        Self {
            width: config.width,
            height: config.height,
            offset_x: config.offset_x as u32,
            offset_y: config.offset_y as u32,
            gap_x: config.gap_x as u32,
            theme: None,
            language: None,
            tabs: None,
            panels: Vec::new(),
            active_panel: None,
            screen_lift: ScreenLift::default(),
            on_screen_lift: None,
            touch_target: None,
            needs_layout: true,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            dirty: true,
        }
    }

    /// Fails when an offset or the gap is negative
    pub fn with_config(config: ScreenConfig) -> UiResult<Self> {
        config.validate()?;
        let mut screen = Self::new();
        screen.width = config.width;
        screen.height = config.height;
        screen.set_offset_x(config.offset_x)?;
        screen.set_offset_y(config.offset_y)?;
        screen.set_gap_x(config.gap_x)?;
        Ok(screen)
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    pub fn set_offset_x(&mut self, offset_x: i32) -> UiResult<()> {
        let value = non_negative("offset_x", offset_x)?;
        if self.offset_x != value {
            self.offset_x = value;
            self.request_layout();
        }
        Ok(())
    }

    pub fn set_offset_y(&mut self, offset_y: i32) -> UiResult<()> {
        let value = non_negative("offset_y", offset_y)?;
        if self.offset_y != value {
            self.offset_y = value;
            self.request_layout();
        }
        Ok(())
    }

    pub fn set_gap_x(&mut self, gap_x: i32) -> UiResult<()> {
        let value = non_negative("gap_x", gap_x)?;
        if self.gap_x != value {
            self.gap_x = value;
            self.request_layout();
        }
        Ok(())
    }

    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    pub fn gap_x(&self) -> u32 {
        self.gap_x
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    // ------------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------------

    /// Install a new tab strip, handing back the previous one.
    ///
    /// The new tabs pick up the screen's theme and language, and the panel
    /// of their current selection (if any) becomes active.
    pub fn set_tabs(&mut self, mut tabs: Tabs) -> Option<Tabs> {
        if let Some(theme) = self.theme {
            push_theme(&mut tabs, theme);
        }
        if let Some(language) = self.language {
            push_language(&mut tabs, language);
        }
        let selected = tabs.selected_index();

        let previous = self.tabs.replace(Scrollable::new(tabs)).map(Scrollable::into_content);
        self.touch_target = None;
        if let Some(index) = selected {
            self.set_active_panel(index);
        }
        self.request_layout();
        previous
    }

    /// Remove the tab strip
    pub fn take_tabs(&mut self) -> Option<Tabs> {
        let previous = self.tabs.take().map(Scrollable::into_content);
        if previous.is_some() {
            self.touch_target = None;
            self.request_layout();
        }
        previous
    }

    pub fn tabs(&self) -> Option<&Tabs> {
        self.tabs.as_ref().map(Scrollable::content)
    }

    /// Mutable access for listeners and labels.
    ///
    /// Change the selection through [`Screen::select_tab`] so the active
    /// panel switches before the value listener runs. A selection made
    /// directly on the tabs is picked up by the next render or measure pass.
    pub fn tabs_mut(&mut self) -> Option<&mut Tabs> {
        self.tabs.as_mut().map(Scrollable::content_mut)
    }

    /// Select a tab by value, switching to its panel.
    ///
    /// An unknown value changes nothing. The panel is switched before the
    /// tab value listener runs, so the listener already sees the new panel.
    pub fn select_tab(&mut self, value: &str, notify: bool) -> Option<TabSelection> {
        let selection = self.tabs_mut()?.apply_selection(value)?;
        self.set_active_panel(selection.index);
        if let Some(tabs) = self.tabs_mut() {
            tabs.dispatch(&selection, notify);
        }
        Some(selection)
    }

    /// Mount the panel of the selected tab if another one is active
    fn follow_tab_selection(&mut self) {
        let Some(index) = self.tabs().and_then(Tabs::selected_index) else {
            return;
        };
        if self.active_panel != Some(index) {
            debug!("Active panel out of step with tab {}, switching", index);
            self.set_active_panel(index);
        }
    }

    // ------------------------------------------------------------------------
    // Panels
    // ------------------------------------------------------------------------

    /// Store a new set of panels without mounting any of them.
    ///
    /// The active panel, if any, is unmounted and the active index cleared.
    /// Returns the previous panels.
    pub fn set_panels(&mut self, panels: Vec<Panel>) -> Vec<Panel> {
        self.clear_active_panel();
        self.request_layout();
        core::mem::replace(&mut self.panels, panels)
    }

    /// Mount the panel at `index`.
    ///
    /// Selecting the already active index does nothing. An index with no
    /// panel clears the selection and the screen shows no panel.
    pub fn set_active_panel(&mut self, index: usize) {
        if index >= self.panels.len() {
            debug!("No panel at index {}, clearing active panel", index);
            self.clear_active_panel();
            return;
        }
        if self.active_panel == Some(index) {
            return;
        }

        if let Some(old) = self.active_panel.and_then(|old| self.panels.get_mut(old)) {
            old.detach();
        }

        let theme = self.theme;
        let language = self.language;
        let panel = &mut self.panels[index];
        if let Some(theme) = theme {
            push_theme(panel, theme);
        }
        if let Some(language) = language {
            push_language(panel, language);
        }
        panel.attach();

        self.active_panel = Some(index);
        self.touch_target = None;
        info!("Active panel switched to {}", index);
        self.request_layout();
    }

    fn clear_active_panel(&mut self) {
        if let Some(old) = self.active_panel.take() {
            if let Some(panel) = self.panels.get_mut(old) {
                panel.detach();
            }
            self.touch_target = None;
            self.request_layout();
        }
    }

    pub fn active_panel_index(&self) -> Option<usize> {
        self.active_panel
    }

    pub fn active_panel(&self) -> Option<&Panel> {
        self.active_panel.and_then(|index| self.panels.get(index))
    }

    pub fn active_panel_mut(&mut self) -> Option<&mut Panel> {
        self.active_panel.and_then(|index| self.panels.get_mut(index))
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel by index, mounted or not
    pub fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    // ------------------------------------------------------------------------
    // Screen lift
    // ------------------------------------------------------------------------

    /// Apply a raw lift code from the vehicle bus
    pub fn on_screen_lift(&mut self, code: u8) -> UiResult<()> {
        let lift = ScreenLift::try_from(code)?;
        self.set_screen_lift(lift);
        Ok(())
    }

    /// Returns `true` when the state changed and the listener ran.
    ///
    /// The screen geometry does not depend on the lift; a listener may
    /// adjust offsets in response.
    pub fn set_screen_lift(&mut self, lift: ScreenLift) -> bool {
        if self.screen_lift == lift {
            return false;
        }
        self.screen_lift = lift;
        debug!("Screen lift is now {:?}", lift);
        if let Some(listener) = self.on_screen_lift.as_mut() {
            listener(lift);
        }
        self.request_layout();
        true
    }

    pub fn screen_lift(&self) -> ScreenLift {
        self.screen_lift
    }

    pub fn set_on_screen_lift(&mut self, listener: impl FnMut(ScreenLift) + 'static) {
        self.on_screen_lift = Some(Box::new(listener));
    }

    // ------------------------------------------------------------------------
    // State and layout
    // ------------------------------------------------------------------------

    /// Push a whole settings state down the tree.
    ///
    /// Theme and language go to the tabs and the active panel. The selected
    /// tab is applied without notifying, remembered radio values are applied
    /// silently to the panel of their tab, then the lift state is updated.
    /// Finishes with a layout pass when one is pending.
    pub fn render(&mut self, state: &SettingsState) -> UiResult<()> {
        self.set_theme(state.theme)?;
        self.propagate_theme(Some(state.theme));
        self.set_language(state.language)?;
        self.propagate_language(Some(state.language));

        if let Some(tab) = state.selected_tab() {
            self.select_tab(tab, false);
        }

        for (tab, value) in state.tab_values() {
            let Some(index) = self.tabs().and_then(|tabs| tabs.index_of(tab)) else {
                trace!("No tab {} for value {}", tab, value);
                continue;
            };
            if let Some(panel) = self.panels.get_mut(index) {
                panel.select_value(value);
            }
        }

        self.set_screen_lift(state.screen_lift);
        self.follow_tab_selection();

        if self.needs_layout {
            self.perform_layout();
        }
        Ok(())
    }

    pub fn request_layout(&mut self) {
        self.needs_layout = true;
        self.dirty = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Measure and lay out the whole screen at its own size
    pub fn perform_layout(&mut self) {
        let size = self.size();
        self.measure(Constraint::Exactly(size.width), Constraint::Exactly(size.height));
        self.layout(Rectangle::new(Point::zero(), size));
    }

    pub fn tabs_bounds(&self) -> Option<Rectangle> {
        self.tabs.as_ref().map(Drawable::bounds)
    }

    pub fn active_panel_bounds(&self) -> Option<Rectangle> {
        self.active_panel().map(Drawable::bounds)
    }

    /// Regions that need repainting, at most one per mounted child
    pub fn dirty_regions(&self) -> HeaplessVec<DirtyRegion, 4> {
        let mut regions = HeaplessVec::new();
        if self.dirty {
            regions.push(DirtyRegion::new(self.bounds)).ok();
            return regions;
        }
        if let Some(region) = self.tabs.as_ref().and_then(Drawable::dirty_region) {
            regions.push(region).ok();
        }
        if let Some(region) = self.active_panel().and_then(Drawable::dirty_region) {
            regions.push(region).ok();
        }
        regions
    }

    fn colors(&self) -> ScreenColors {
        ScreenColors::for_theme(self.theme.unwrap_or_default())
    }
}

impl core::fmt::Debug for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Screen")
            .field("tabs", &self.tabs())
            .field("panels", &self.panels)
            .field("active_panel", &self.active_panel)
            .field("screen_lift", &self.screen_lift)
            .finish_non_exhaustive()
    }
}

impl Measure for Screen {
    fn measure(&mut self, width: Constraint, height: Constraint) -> Size {
        self.follow_tab_selection();
        let width = width.resolve(self.width);
        let height = height.resolve(self.height);
        let content_height = height.saturating_sub(self.offset_y);

        // Pass 1: the tab strip decides its own width
        let tabs_width = match self.tabs.as_mut() {
            Some(scroll) => {
                scroll.measure(Constraint::AtMost(width), Constraint::Exactly(content_height));
                scroll.content().measured_size().width
            }
            None => 0,
        };

        // Pass 2: the active panel gets whatever is left
        let panel_width = width
            .saturating_sub(self.offset_x)
            .saturating_sub(tabs_width)
            .saturating_sub(self.gap_x);
        if let Some(panel) = self.active_panel_mut() {
            panel.measure(
                Constraint::Exactly(panel_width),
                Constraint::Exactly(content_height),
            );
        }

        self.measured = Size::new(width, height);
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
        let origin = bounds.top_left;
        let top = origin.y.saturating_add(to_coordinate(self.offset_y));

        let mut tabs_width = 0;
        if let Some(scroll) = self.tabs.as_mut() {
            tabs_width = scroll.measured_size().width;
            let height = bounds.size.height.saturating_sub(self.offset_y);
            scroll.layout(Rectangle::new(
                Point::new(origin.x.saturating_add(to_coordinate(self.offset_x)), top),
                Size::new(tabs_width, height),
            ));
        }

        let inset = self
            .offset_x
            .saturating_add(tabs_width)
            .saturating_add(self.gap_x);
        let left = origin.x.saturating_add(to_coordinate(inset));
        if let Some(panel) = self.active_panel_mut() {
            let size = panel.measured_size();
            panel.layout(Rectangle::new(Point::new(left, top), size));
        }
        self.needs_layout = false;
    }
}

impl Drawable for Screen {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, display: &mut D) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, self.colors().background)?;
        if let Some(tabs) = &self.tabs {
            tabs.draw(display)?;
        }
        if let Some(panel) = self.active_panel() {
            panel.draw(display)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.tabs.as_ref().is_some_and(Drawable::is_dirty)
            || self.active_panel().is_some_and(Drawable::is_dirty)
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        if let Some(tabs) = self.tabs.as_mut() {
            tabs.mark_clean();
        }
        if let Some(panel) = self.active_panel_mut() {
            panel.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Screen {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    /// Presses go to the tabs first, then to the active panel. Drags follow
    /// whichever child took the press.
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        let target = match event {
            TouchEvent::Press(point) => {
                let on_tabs = self.tabs.as_ref().is_some_and(|tabs| tabs.contains_point(point));
                let on_panel = self
                    .active_panel()
                    .is_some_and(|panel| panel.contains_point(point));
                self.touch_target = if on_tabs {
                    Some(TouchTarget::Tabs)
                } else if on_panel {
                    Some(TouchTarget::Panel)
                } else {
                    None
                };
                self.touch_target
            }
            TouchEvent::Drag(_) => self.touch_target,
        };

        match target {
            Some(TouchTarget::Tabs) => {
                let Some(tabs) = self.tabs.as_mut() else {
                    return TouchResult::NotHandled;
                };
                match tabs.handle_touch(event) {
                    TouchResult::Action(Action::SelectTab(index)) => {
                        let value = tabs.content().value_at(index).map(ToString::to_string);
                        if let Some(value) = value {
                            self.select_tab(&value, true);
                        }
                        TouchResult::Handled
                    }
                    result => result,
                }
            }
            Some(TouchTarget::Panel) => match self.active_panel_mut() {
                Some(panel) => panel.handle_touch(event),
                None => TouchResult::NotHandled,
            },
            None => TouchResult::NotHandled,
        }
    }
}

impl Themable for Screen {
    fn set_theme(&mut self, theme: impl Into<Option<Theme>>) -> UiResult<()> {
        let theme = theme.into().ok_or(UiError::MissingTheme)?;
        if self.theme != Some(theme) {
            self.theme = Some(theme);
            self.dirty = true;
        }
        Ok(())
    }

    fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Unmounted panels catch up when they are mounted
    fn propagate_theme(&mut self, theme: Option<Theme>) {
        let Some(theme) = theme else { return };
        if let Some(tabs) = self.tabs_mut() {
            push_theme(tabs, theme);
        }
        if let Some(panel) = self.active_panel_mut() {
            push_theme(panel, theme);
        }
    }
}

impl Localizable for Screen {
    fn set_language(&mut self, language: impl Into<Option<Language>>) -> UiResult<()> {
        let language = language.into().ok_or(UiError::MissingLanguage)?;
        if self.language != Some(language) {
            self.language = Some(language);
            self.dirty = true;
        }
        Ok(())
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn propagate_language(&mut self, language: Option<Language>) {
        let Some(language) = language else { return };
        if let Some(tabs) = self.tabs_mut() {
            push_language(tabs, language);
        }
        if let Some(panel) = self.active_panel_mut() {
            push_language(panel, language);
        }
        // Tab labels may have changed width
        self.request_layout();
    }
}

/// Pixel distance as a signed coordinate, clamped at `i32::MAX`
fn to_coordinate(distance: u32) -> i32 {
    i32::try_from(distance).unwrap_or(i32::MAX)
}
