//! Scheme TUI - colour scheme generator
//!
//! Walks the painter's RYB colour wheel to build harmonious colour schemes,
//! with a palette of kept colours and clipboard exchange.

mod app;
mod clipboard;
mod color;
mod config;
mod names;
mod palette;
mod ryb;
mod scheme;
mod settings;
mod swatch;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::{App, FocusedPane, InputMode};
use clipboard::SystemClipboard;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use palette::Palette;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use scheme::SchemeType;
use settings::SettingsStore;
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SCHEME_TUI_LOG";

fn main() -> Result<()> {
    // Load config
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            if let Ok(path) = Config::config_path() {
                eprintln!("Config file location: {}", path.display());
            }
            std::process::exit(1);
        }
    };

    // The terminal is in raw mode while running, so logs go to a file
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    info!(?config, "starting");

    let mut startup_warnings = Vec::new();

    let settings = match Config::settings_path() {
        Ok(path) => SettingsStore::open(path).unwrap_or_else(|e| {
            warn!(error = %e, "could not read settings, using defaults");
            startup_warnings.push(format!("Settings not loaded: {}", e));
            SettingsStore::in_memory()
        }),
        Err(e) => {
            warn!(error = %e, "no settings location");
            SettingsStore::in_memory()
        }
    };

    // A palette file that fails to load is left untouched on disk
    let (palette, palette_path) = match Config::palette_path() {
        Ok(path) => match Palette::load(&path) {
            Ok(palette) => (palette, Some(path)),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "could not read palette");
                startup_warnings.push(format!("Palette not loaded: {}", e));
                (Palette::new(), None)
            }
        },
        Err(e) => {
            warn!(error = %e, "no palette location");
            (Palette::new(), None)
        }
    };

    // Initialize app
    let mut app = App::new(
        config,
        settings,
        palette,
        palette_path,
        Box::new(SystemClipboard),
    );
    app.status_message = startup_status(&startup_warnings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {:#}", e);
    }

    info!("exiting");
    Ok(())
}

/// All startup warnings in one status line
fn startup_status(warnings: &[String]) -> Option<String> {
    (!warnings.is_empty()).then(|| warnings.join("; "))
}

/// Send tracing output to the log file in the config directory
fn init_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

/// Main event loop
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(app, mouse, area);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key press
    app.clear_status();

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('c') if ctrl => {
                let _ = app.copy_swatch(app.focused_swatch);
            }
            KeyCode::Char('v') if ctrl => {
                let _ = app.paste_to_swatch(app.focused_swatch);
            }
            KeyCode::Char('q') => {
                // Failures are logged and reported by deactivate
                let _ = app.deactivate();
                app.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                app.focus_next_pane();
            }
            KeyCode::Char('l') | KeyCode::Right => match app.focused_pane {
                FocusedPane::Swatches => app.focus_next_swatch(),
                FocusedPane::Sliders => app.adjust_focused_slider(1.0),
            },
            KeyCode::Char('h') | KeyCode::Left => match app.focused_pane {
                FocusedPane::Swatches => app.focus_prev_swatch(),
                FocusedPane::Sliders => app.adjust_focused_slider(-1.0),
            },
            KeyCode::Char('L') => app.adjust_focused_slider(10.0),
            KeyCode::Char('H') => app.adjust_focused_slider(-10.0),
            KeyCode::Char('j') | KeyCode::Down => app.select_next_slider(),
            KeyCode::Char('k') | KeyCode::Up => app.select_prev_slider(),
            KeyCode::Char('t') | KeyCode::Char(']') => app.next_scheme_type(),
            KeyCode::Char('T') | KeyCode::Char('[') => app.prev_scheme_type(),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as i32 - '1' as i32;
                if let Ok(scheme_type) = SchemeType::from_index(index) {
                    app.set_scheme_type(scheme_type);
                }
            }
            KeyCode::Enter => app.activate_swatch(app.focused_swatch),
            KeyCode::Char('a') => app.add_all_to_palette(),
            KeyCode::Char('b') => app.base_from_palette(),
            KeyCode::Char('r') => app.reroll_chaos(),
            KeyCode::Char('X') => app.clear_palette(),
            KeyCode::Char('m') => app.open_menu(app.focused_swatch),
            KeyCode::Char('e') => app.start_edit(app.focused_swatch),
            KeyCode::Char('y') => {
                let _ = app.copy_swatch(app.focused_swatch);
            }
            KeyCode::Char('p') => {
                let _ = app.paste_to_swatch(app.focused_swatch);
            }
            KeyCode::Char('?') => {
                app.show_help = true;
                app.input_mode = InputMode::Help;
            }
            _ => {}
        },
        InputMode::Menu => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => app.close_menu(),
            KeyCode::Char('j') | KeyCode::Down => app.menu_next(),
            KeyCode::Char('k') | KeyCode::Up => app.menu_prev(),
            KeyCode::Enter => app.confirm_menu(),
            _ => {}
        },
        InputMode::Edit => match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Enter => app.confirm_edit(),
            KeyCode::Backspace => app.handle_backspace(),
            KeyCode::Char(c) if !ctrl => app.handle_char(c),
            _ => {}
        },
        InputMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.show_help = false;
                app.input_mode = InputMode::Normal;
            }
            _ => {}
        },
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    let areas = ui::swatch_areas(area, app.colors_visible);
    let hit = swatch::hit_test(&areas, mouse.column, mouse.row);

    match (app.input_mode, mouse.kind) {
        (InputMode::Normal, MouseEventKind::Down(MouseButton::Left)) => {
            app.clear_status();
            if let Some(index) = hit {
                app.press_swatch(index, Instant::now());
            }
        }
        (InputMode::Normal, MouseEventKind::Up(MouseButton::Left)) => app.release_on(hit),
        (InputMode::Normal, MouseEventKind::Down(MouseButton::Right)) => {
            if let Some(index) = hit {
                app.open_menu(index);
            }
        }
        // Clicking anywhere else dismisses the menu
        (InputMode::Menu, MouseEventKind::Down(_)) => app.close_menu(),
        _ => {}
    }
}
