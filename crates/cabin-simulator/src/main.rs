//! Desktop simulator for the cabin settings display.
//!
//! Renders the cabin-core widget tree in an SDL2 window via
//! `embedded-graphics-simulator`. The host owns a [`SettingsState`], widget
//! listeners write into it, and every change is pushed back through
//! [`Screen::render`].
//!
//! # Key bindings
//!
//! | Key | Action                          |
//! |-----|---------------------------------|
//! | T   | Cycle through the four themes   |
//! | B   | Toggle light / dark             |
//! | L   | Toggle English / Russian        |
//! | S   | Toggle screen lift              |
//! | Q   | Quit                            |
//!
//! Mouse clicks are forwarded as touch presses, mouse drags as touch drags.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use cabin_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use cabin_core::ui::{
    Drawable, Element, Panel, PanelChild, Radio, RadioButton, Screen, ScreenLift, Section, TabItem, Tabs,
    TouchEvent, TouchPoint, Touchable,
};
use cabin_core::{Language, Localized, SettingsState, Theme, UiResult};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 1;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Shared state written by widget listeners.
type SharedState = Rc<RefCell<Host>>;

/// The host side: settings plus a flag telling the loop to re-render.
#[derive(Default)]
struct Host {
    settings: SettingsState,
    changed: bool,
}

// ---------------------------------------------------------------------------
// Demo content
// ---------------------------------------------------------------------------

fn label(en: &str, ru: &str) -> Localized {
    Localized::new()
        .with(Language::En, en)
        .with(Language::Ru, ru)
}

/// Radio whose choices are written back into the settings for `tab`.
fn tab_radio(host: &SharedState, tab: &'static str, choices: &[(&str, &str, &str)]) -> UiResult<Radio> {
    let buttons = choices
        .iter()
        .map(|(value, en, ru)| RadioButton::new(value, label(en, ru)))
        .collect::<UiResult<Vec<_>>>()?;

    let mut radio = Radio::new(buttons);
    let host = Rc::clone(host);
    radio.set_on_value_change(move |value| {
        info!("{} → {}", tab, value);
        let mut host = host.borrow_mut();
        host.settings.set_selected_value_for_tab(tab, value);
        host.changed = true;
    });
    Ok(radio)
}

fn theme_radio(host: &SharedState) -> UiResult<Radio> {
    let buttons = Theme::ALL
        .iter()
        .map(|theme| RadioButton::new(theme.code(), label(theme.code(), theme.code())))
        .collect::<UiResult<Vec<_>>>()?;

    let mut radio = Radio::new(buttons).with_selected(Theme::default().code());
    let host = Rc::clone(host);
    radio.set_on_value_change(move |code| {
        let mut host = host.borrow_mut();
        host.settings.set_theme(Theme::from(code));
        host.changed = true;
    });
    Ok(radio)
}

fn language_radio(host: &SharedState) -> UiResult<Radio> {
    let buttons = vec![
        RadioButton::new("en", label("English", "Английский"))?,
        RadioButton::new("ru", label("Russian", "Русский"))?,
    ];

    let mut radio = Radio::new(buttons).with_selected(Language::default().code());
    let host = Rc::clone(host);
    radio.set_on_value_change(move |code| {
        let mut host = host.borrow_mut();
        host.settings.set_language(Language::from(code));
        host.changed = true;
    });
    Ok(radio)
}

fn build_screen(host: &SharedState) -> UiResult<Screen> {
    let mut screen = Screen::new();

    let mut tabs = Tabs::new(vec![
        TabItem::new("display", label("Display", "Дисплей"))?,
        TabItem::new("drive", label("Driving", "Вождение"))?,
        TabItem::new("climate", label("Climate", "Климат"))?,
        TabItem::new("system", label("System", "Система"))?,
    ]);
    let tab_host = Rc::clone(host);
    tabs.set_on_value_change(move |value| {
        let mut host = tab_host.borrow_mut();
        host.settings.set_selected_tab(value);
        host.changed = true;
    });
    screen.set_tabs(tabs);

    let display = Panel::new()
        .with_section(Section::new(label("Theme", "Тема"))?.with_radio(theme_radio(host)?))
        .with_section(
            Section::new(label("Brightness", "Яркость"))?.with_radio(tab_radio(
                host,
                "display",
                &[("auto", "Auto", "Авто"), ("day", "Day", "День"), ("night", "Night", "Ночь")],
            )?),
        );

    let drive = Panel::new().with_child(PanelChild::scroll(vec![
        Section::new(label("Driving mode", "Режим вождения"))?.with_radio(tab_radio(
            host,
            "drive",
            &[("eco", "Eco", "Эко"), ("comfort", "Comfort", "Комфорт"), ("sport", "Sport", "Спорт")],
        )?),
        Section::new(label("Suspension", "Подвеска"))?.with_radio(tab_radio(
            host,
            "suspension",
            &[("low", "Low", "Низко"), ("normal", "Normal", "Норма"), ("high", "High", "Высоко")],
        )?),
        Section::new(label("Steering", "Руль"))?.with_radio(tab_radio(
            host,
            "steering",
            &[("light", "Light", "Лёгкий"), ("firm", "Firm", "Тугой")],
        )?),
    ]));

    let climate = Panel::new().with_section(
        Section::new(label("Air recirculation", "Рециркуляция"))?.with_radio(tab_radio(
            host,
            "climate",
            &[("auto", "Auto", "Авто"), ("on", "On", "Вкл"), ("off", "Off", "Выкл")],
        )?),
    );

    let system = Panel::new()
        .with_section(Section::new(label("Language", "Язык"))?.with_radio(language_radio(host)?))
        .with_child(PanelChild::Leaf(Element::spacer(0, 40)))
        .with_child(PanelChild::Leaf(Element::text(concat!(
            "cabin ",
            env!("CARGO_PKG_VERSION")
        ))));

    screen.set_panels(vec![display, drive, climate, system]);
    Ok(screen)
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

fn next_theme(theme: Theme) -> Theme {
    let index = Theme::ALL.iter().position(|t| *t == theme).unwrap_or(0);
    Theme::ALL[(index + 1) % Theme::ALL.len()]
}

/// Apply a key to the settings. Returns `true` when something changed.
fn apply_key(settings: &mut SettingsState, keycode: Keycode) -> bool {
    match keycode {
        Keycode::T => {
            settings.set_theme(next_theme(settings.theme));
            info!("Theme: {}", settings.theme);
        }
        Keycode::B => {
            settings.set_theme(settings.theme.toggled_brightness());
            info!("Theme: {}", settings.theme);
        }
        Keycode::L => {
            let language = match settings.language {
                Language::En => Language::Ru,
                Language::Ru => Language::En,
            };
            settings.set_language(language);
            info!("Language: {}", language);
        }
        Keycode::S => {
            let lift = match settings.screen_lift {
                ScreenLift::Raised => ScreenLift::Lowered,
                ScreenLift::Lowered => ScreenLift::Raised,
            };
            settings.set_screen_lift(lift);
        }
        _ => return false,
    }
    true
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting cabin simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: T=Theme  L=Language  S=Screen lift  Q=Quit");

    let host: SharedState = Rc::new(RefCell::new(Host::default()));
    let mut screen = match build_screen(&host) {
        Ok(screen) => screen,
        Err(e) => {
            error!("Demo content rejected: {}", e);
            return;
        }
    };
    screen.set_on_screen_lift(|lift| info!("Screen lift: {:?}", lift));

    {
        let mut host = host.borrow_mut();
        host.settings.set_selected_tab("display");
        host.changed = true;
    }

    let mut display = SimulatorDisplay::<Rgb888>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Cabin Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb888::BLACK);
    window.update(&display);
    let mut mouse_down = false;

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    let mut host = host.borrow_mut();
                    if apply_key(&mut host.settings, keycode) {
                        host.changed = true;
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    screen.handle_touch(TouchEvent::Press(touch_point(point)));
                }

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    screen.handle_touch(TouchEvent::Drag(touch_point(point)));
                }

                SimulatorEvent::MouseButtonUp { .. } => mouse_down = false,

                _ => {}
            }
        }

        // --- Push state ---------------------------------------------------
        let settings = {
            let mut host = host.borrow_mut();
            let changed = core::mem::take(&mut host.changed);
            changed.then(|| host.settings.clone())
        };
        if let Some(settings) = settings
            && let Err(e) = screen.render(&settings)
        {
            error!("Render rejected state: {}", e);
        }
        if screen.needs_layout() {
            screen.perform_layout();
        }

        // --- Render -------------------------------------------------------
        if screen.is_dirty() {
            if let Err(e) = screen.draw(&mut display) {
                error!("Draw error: {:?}", e);
            }
            screen.mark_clean();
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
