//! TUI application state and logic

use crate::clipboard::{ClipboardError, ColorClipboard};
use crate::color::{Color, ColorFormat};
use crate::config::Config;
use crate::names::nearest_name;
use crate::palette::{Palette, PaletteHandle, PaletteMeta};
use crate::scheme::{self, GeneratedColor, GenerationParams, SchemeType, MAX_VISIBLE};
use crate::settings::{SettingsStore, StoreError};
use crate::swatch::{ColorSlots, DragState, Swatch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Settings namespace holding the generator state
pub const SETTINGS_NAMESPACE: &str = "generate_scheme";

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Menu,
    Edit,
    Help,
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPane {
    #[default]
    Swatches,
    Sliders,
}

/// Generator controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slider {
    #[default]
    Hue,
    Saturation,
    Lightness,
    Chaos,
}

impl Slider {
    pub fn all() -> &'static [Slider] {
        &[Slider::Hue, Slider::Saturation, Slider::Lightness, Slider::Chaos]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Slider::Hue => "Hue",
            Slider::Saturation => "Saturation",
            Slider::Lightness => "Lightness",
            Slider::Chaos => "Chaos",
        }
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            Slider::Hue => (0.0, 360.0),
            Slider::Saturation => (0.0, 120.0),
            Slider::Lightness => (-50.0, 80.0),
            Slider::Chaos => (0.0, 0.99),
        }
    }

    pub fn step(&self) -> f64 {
        match self {
            Slider::Chaos => 0.01,
            _ => 1.0,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    /// Value text shown next to the slider
    pub fn format(&self, value: f64) -> String {
        match self {
            Slider::Hue => format!("{}°", value as i32),
            Slider::Saturation => format!("{}%", value as i32),
            Slider::Lightness => {
                if value >= 0.0 {
                    format!("+{}%", value as i32)
                } else {
                    format!("-{}%", -(value as i32))
                }
            }
            Slider::Chaos => format!("{:.2}", value),
        }
    }

    fn next(self) -> Slider {
        let all = Self::all();
        let idx = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    fn prev(self) -> Slider {
        let all = Self::all();
        let idx = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Entries of the per-swatch context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddToPalette,
    AddAllToPalette,
    Copy(ColorFormat),
    Edit,
    Paste,
}

impl MenuAction {
    pub fn all() -> &'static [MenuAction] {
        &[
            MenuAction::AddToPalette,
            MenuAction::AddAllToPalette,
            MenuAction::Copy(ColorFormat::Hex),
            MenuAction::Copy(ColorFormat::Rgb),
            MenuAction::Copy(ColorFormat::Hsl),
            MenuAction::Edit,
            MenuAction::Paste,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddToPalette => "Add to palette",
            MenuAction::AddAllToPalette => "Add all to palette",
            MenuAction::Copy(ColorFormat::Hex) => "Copy as hex",
            MenuAction::Copy(ColorFormat::Rgb) => "Copy as rgb()",
            MenuAction::Copy(ColorFormat::Hsl) => "Copy as hsl()",
            MenuAction::Edit => "Edit...",
            MenuAction::Paste => "Paste",
        }
    }
}

/// Context menu built for one swatch when requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub swatch: usize,
    pub selected: usize,
    pub paste_enabled: bool,
}

impl ContextMenu {
    pub fn new(swatch: usize, paste_enabled: bool) -> Self {
        Self {
            swatch,
            selected: 0,
            paste_enabled,
        }
    }

    pub fn is_enabled(&self, action: MenuAction) -> bool {
        action != MenuAction::Paste || self.paste_enabled
    }

    pub fn selected_action(&self) -> MenuAction {
        MenuAction::all()[self.selected]
    }

    pub fn select_next(&mut self) {
        let len = MenuAction::all().len();
        for step in 1..=len {
            let idx = (self.selected + step) % len;
            if self.is_enabled(MenuAction::all()[idx]) {
                self.selected = idx;
                return;
            }
        }
    }

    pub fn select_prev(&mut self) {
        let len = MenuAction::all().len();
        for step in 1..=len {
            let idx = (self.selected + len - step) % len;
            if self.is_enabled(MenuAction::all()[idx]) {
                self.selected = idx;
                return;
            }
        }
    }
}

/// Application state
pub struct App {
    /// Current generator inputs
    pub params: GenerationParams,
    /// Latest generated scheme, regenerated on every parameter change
    pub preview: Vec<GeneratedColor>,
    /// Seed of the chaos perturbation; fixed until chaos changes or is rerolled
    chaos_seed: u64,
    swatches: [Swatch; MAX_VISIBLE],
    /// Number of swatches showing a colour
    pub colors_visible: usize,
    pub focused_swatch: usize,
    pub focused_slider: Slider,
    pub focused_pane: FocusedPane,
    /// Colours the user kept
    pub palette: Palette,
    palette_path: Option<PathBuf>,
    settings: SettingsStore,
    pub config: Config,
    clipboard: Box<dyn ColorClipboard>,
    /// Open context menu, if any
    pub menu: Option<ContextMenu>,
    /// Colour being dragged between swatches
    pub drag: Option<DragState>,
    last_click: Option<(usize, Instant)>,
    /// Text typed into the edit popup
    pub edit_input: String,
    edit_target: usize,
    /// Current input mode
    pub input_mode: InputMode,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether app should quit
    pub should_quit: bool,
    /// Show help screen
    pub show_help: bool,
}

impl App {
    /// Create a new app instance, restoring the last used generator state
    pub fn new(
        config: Config,
        mut settings: SettingsStore,
        palette: Palette,
        palette_path: Option<PathBuf>,
        clipboard: Box<dyn ColorClipboard>,
    ) -> Self {
        let params = restore_params(&mut settings, &config);

        let swatches = std::array::from_fn(|_| {
            let mut swatch = Swatch::new();
            swatch.set_rounded(true);
            swatch.set_hcenter(true);
            swatch
        });

        let mut app = Self {
            params,
            preview: Vec::new(),
            chaos_seed: rand::rng().random(),
            swatches,
            colors_visible: 0,
            focused_swatch: 0,
            focused_slider: Slider::Hue,
            focused_pane: FocusedPane::Swatches,
            palette,
            palette_path,
            settings,
            config,
            clipboard,
            menu: None,
            drag: None,
            last_click: None,
            edit_input: String::new(),
            edit_target: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            should_quit: false,
            show_help: false,
        };
        app.update();
        app
    }

    /// Regenerate the preview and push it into the swatches
    pub fn update(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.chaos_seed);
        self.preview = scheme::generate(&self.params, &mut rng);

        self.colors_visible = self.preview.len().min(MAX_VISIBLE);
        for (swatch, generated) in self.swatches.iter_mut().zip(&self.preview) {
            let text = generated.rgb.format(self.config.display_format);
            swatch.set_color(generated.rgb, Some(&text));
        }
        self.focused_swatch = self.focused_swatch.min(self.colors_visible.saturating_sub(1));
        self.sync_focus();
    }

    /// Swatches currently showing a colour
    pub fn visible_swatches(&self) -> &[Swatch] {
        &self.swatches[..self.colors_visible]
    }

    fn sync_focus(&mut self) {
        let focused = (self.focused_pane == FocusedPane::Swatches).then_some(self.focused_swatch);
        for (i, swatch) in self.swatches.iter_mut().enumerate() {
            swatch.set_focused(Some(i) == focused);
        }
    }

    /// Write generator state to the settings store
    pub fn save_settings(&mut self) -> Result<(), StoreError> {
        let params = self.params;
        let mut ns = self.settings.namespace(SETTINGS_NAMESPACE);
        ns.set_int32("type", params.scheme_type.index());
        ns.set_float("hue", params.base_hue as f32);
        ns.set_float("saturation", params.saturation_pct as f32);
        ns.set_float("lightness", params.lightness_pct as f32);
        ns.set_float("chaos", params.chaos as f32);
        self.settings.save()
    }

    /// Leave the generator: regenerate once more and persist its state
    pub fn deactivate(&mut self) -> Result<(), StoreError> {
        self.update();
        info!(source = %self.source_color(), scheme = self.params.scheme_type.label(), "generator deactivated");
        self.save_settings().inspect_err(|e| {
            warn!(error = %e, "failed to save settings");
            self.status_message = Some(format!("Settings not saved: {}", e));
        })
    }

    /// Current value of a slider
    pub fn slider_value(&self, slider: Slider) -> f64 {
        match slider {
            Slider::Hue => self.params.base_hue,
            Slider::Saturation => self.params.saturation_pct,
            Slider::Lightness => self.params.lightness_pct,
            Slider::Chaos => self.params.chaos,
        }
    }

    fn store_slider(&mut self, slider: Slider, value: f64) {
        let value = slider.clamp(value);
        if slider == Slider::Chaos && value != self.params.chaos {
            self.chaos_seed = rand::rng().random();
        }
        match slider {
            Slider::Hue => self.params.base_hue = value,
            Slider::Saturation => self.params.saturation_pct = value,
            Slider::Lightness => self.params.lightness_pct = value,
            Slider::Chaos => self.params.chaos = value,
        }
    }

    /// Move a slider and regenerate
    pub fn set_slider(&mut self, slider: Slider, value: f64) {
        self.store_slider(slider, value);
        self.update();
    }

    /// Nudge the focused slider by `steps` steps
    pub fn adjust_focused_slider(&mut self, steps: f64) {
        let slider = self.focused_slider;
        let value = self.slider_value(slider) + slider.step() * steps;
        // Rounding keeps repeated 0.01 chaos steps on the grid
        let value = (value / slider.step()).round() * slider.step();
        self.set_slider(slider, value);
    }

    /// Draw a new chaos perturbation with the same parameters
    pub fn reroll_chaos(&mut self) {
        self.chaos_seed = rand::rng().random();
        self.update();
    }

    pub fn select_next_slider(&mut self) {
        self.focused_slider = self.focused_slider.next();
    }

    pub fn select_prev_slider(&mut self) {
        self.focused_slider = self.focused_slider.prev();
    }

    pub fn set_scheme_type(&mut self, scheme_type: SchemeType) {
        self.params.scheme_type = scheme_type;
        self.update();
    }

    pub fn next_scheme_type(&mut self) {
        self.set_scheme_type(self.params.scheme_type.next());
    }

    pub fn prev_scheme_type(&mut self) {
        self.set_scheme_type(self.params.scheme_type.prev());
    }

    /// Move focus to next pane
    pub fn focus_next_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            FocusedPane::Swatches => FocusedPane::Sliders,
            FocusedPane::Sliders => FocusedPane::Swatches,
        };
        self.sync_focus();
    }

    pub fn focus_next_swatch(&mut self) {
        if self.focused_swatch + 1 < self.colors_visible {
            self.focused_swatch += 1;
        }
        self.sync_focus();
    }

    pub fn focus_prev_swatch(&mut self) {
        self.focused_swatch = self.focused_swatch.saturating_sub(1);
        self.sync_focus();
    }

    pub fn focus_swatch(&mut self, index: usize) {
        if index < self.colors_visible {
            self.focused_pane = FocusedPane::Swatches;
            self.focused_swatch = index;
            self.sync_focus();
        }
    }

    /// Make `color` appear at swatch `index` by moving the sliders
    ///
    /// Returns false when `index` is not a visible swatch.
    pub fn apply_color_at(&mut self, index: usize, color: Color) -> bool {
        let Some(generated) = self.preview.get(index).filter(|_| index < self.colors_visible) else {
            return false;
        };
        let values = scheme::invert(color, generated.hue_offset);
        self.store_slider(Slider::Hue, values.hue);
        self.store_slider(Slider::Saturation, values.saturation);
        self.store_slider(Slider::Lightness, values.lightness);
        self.update();
        debug!(index, color = %color, "applied colour to swatch");
        true
    }

    /// Colour of the first swatch
    pub fn source_color(&self) -> Color {
        self.swatches[0].color()
    }

    /// Make `color` the first swatch colour
    pub fn set_source_color(&mut self, color: Color) -> bool {
        self.apply_color_at(0, color)
    }

    /// Rebuild the scheme around the most recently kept palette colour
    pub fn base_from_palette(&mut self) {
        let Some(entry) = self.palette.iter().last().cloned() else {
            self.status_message = Some("Palette is empty".to_string());
            return;
        };
        if self.set_source_color(entry.color) {
            self.status_message = Some(format!("Base colour set to {} ({})", entry.color, entry.meta.name));
        }
    }

    /// Activation (Enter or double click) keeps the swatch colour
    pub fn activate_swatch(&mut self, index: usize) {
        self.add_to_palette(index);
    }

    /// Append one visible swatch colour to the palette
    pub fn add_to_palette(&mut self, index: usize) {
        if let Some(color) = self.slot_color(index) {
            let handle = self.append_to_palette(color);
            self.save_palette();
            if let Some(entry) = self.palette.get(handle) {
                self.status_message = Some(format!("Added {} ({}) to palette", entry.color, entry.meta.name));
            }
        }
    }

    /// Append every visible swatch colour to the palette, in order
    pub fn add_all_to_palette(&mut self) {
        let colors: Vec<Color> = self.visible_swatches().iter().map(Swatch::color).collect();
        for &color in &colors {
            self.append_to_palette(color);
        }
        self.save_palette();
        self.status_message = Some(format!("Added {} colours to palette", colors.len()));
    }

    fn append_to_palette(&mut self, color: Color) -> PaletteHandle {
        self.palette.append(color, PaletteMeta::named(nearest_name(color)))
    }

    pub fn clear_palette(&mut self) {
        self.palette.remove_all();
        self.save_palette();
        self.status_message = Some("Palette cleared".to_string());
    }

    fn save_palette(&mut self) {
        let Some(path) = &self.palette_path else {
            return;
        };
        if let Err(e) = self.palette.save(path) {
            warn!(error = %e, path = %path.display(), "failed to save palette");
            self.status_message = Some(format!("Palette not saved: {}", e));
        }
    }

    /// Copy a swatch colour to the clipboard in the configured format
    pub fn copy_swatch(&mut self, index: usize) -> Result<(), ClipboardError> {
        self.copy_swatch_as(index, self.config.copy_format)
    }

    pub fn copy_swatch_as(&mut self, index: usize, format: ColorFormat) -> Result<(), ClipboardError> {
        let Some(color) = self.slot_color(index) else {
            return Ok(());
        };
        let text = color.format(format);
        match self.clipboard.set_color(color, &text) {
            Ok(()) => {
                self.status_message = Some(format!("Copied {}", text));
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Clipboard error: {}", e));
                Err(e)
            }
        }
    }

    /// Replace a swatch colour with the clipboard colour
    pub fn paste_to_swatch(&mut self, index: usize) -> Result<(), ClipboardError> {
        match self.clipboard.get_color() {
            Ok(named) => {
                if self.apply_color_at(index, named.color) {
                    let name = named.name.unwrap_or_else(|| named.color.to_hex());
                    self.status_message = Some(format!("Pasted {}", name));
                }
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Nothing to paste: {}", e));
                Err(e)
            }
        }
    }

    /// Open the context menu for a swatch
    pub fn open_menu(&mut self, index: usize) {
        if index >= self.colors_visible {
            return;
        }
        self.focus_swatch(index);
        let paste_enabled = self.clipboard.has_color();
        self.menu = Some(ContextMenu::new(index, paste_enabled));
        self.input_mode = InputMode::Menu;
    }

    pub fn menu_next(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.select_next();
        }
    }

    pub fn menu_prev(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.select_prev();
        }
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
        if self.input_mode == InputMode::Menu {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Run the selected menu entry and drop the menu
    pub fn confirm_menu(&mut self) {
        let Some(menu) = self.menu.take() else {
            return;
        };
        self.input_mode = InputMode::Normal;
        let action = menu.selected_action();
        if !menu.is_enabled(action) {
            return;
        }
        match action {
            MenuAction::AddToPalette => self.add_to_palette(menu.swatch),
            MenuAction::AddAllToPalette => self.add_all_to_palette(),
            MenuAction::Copy(format) => {
                let _ = self.copy_swatch_as(menu.swatch, format);
            }
            MenuAction::Edit => self.start_edit(menu.swatch),
            MenuAction::Paste => {
                let _ = self.paste_to_swatch(menu.swatch);
            }
        }
    }

    /// Start editing a swatch colour as text
    pub fn start_edit(&mut self, index: usize) {
        if let Some(color) = self.slot_color(index) {
            self.edit_target = index;
            self.edit_input = color.to_hex();
            self.input_mode = InputMode::Edit;
        }
    }

    /// Apply the edited text, if it parses as a colour
    pub fn confirm_edit(&mut self) {
        match Color::parse(&self.edit_input) {
            Some(color) => {
                self.status_message = if self.apply_color_at(self.edit_target, color) {
                    Some(format!("Set swatch {} to {}", self.edit_target + 1, color))
                } else {
                    Some(format!("Swatch {} is not shown", self.edit_target + 1))
                };
            }
            None => {
                self.status_message = Some(format!("Not a colour: {}", self.edit_input));
            }
        }
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();
    }

    /// Mouse press on a swatch: focus it, pick up its colour, detect double click
    pub fn press_swatch(&mut self, index: usize, now: Instant) {
        if index >= self.colors_visible {
            return;
        }
        self.focus_swatch(index);
        let double = matches!(self.last_click, Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK);
        if double {
            self.last_click = None;
            self.drag = None;
            self.activate_swatch(index);
            return;
        }
        self.last_click = Some((index, now));
        self.drag = DragState::begin(&*self, index);
    }

    /// Mouse release: drop a dragged colour onto the swatch under the pointer
    pub fn release_on(&mut self, target: Option<usize>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if let Some(target) = target {
            if drag.finish(self, target) {
                self.last_click = None;
                self.status_message = Some(format!(
                    "Moved {} to swatch {}",
                    drag.color,
                    target + 1
                ));
            }
        }
    }

    /// Exit menu/edit mode
    pub fn cancel_input(&mut self) {
        self.menu = None;
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();
    }

    /// Handle character input based on mode
    pub fn handle_char(&mut self, c: char) {
        if self.input_mode == InputMode::Edit && !c.is_control() {
            self.edit_input.push(c);
        }
    }

    /// Handle backspace in input modes
    pub fn handle_backspace(&mut self) {
        if self.input_mode == InputMode::Edit {
            self.edit_input.pop();
        }
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl ColorSlots for App {
    fn slot_color(&self, slot: usize) -> Option<Color> {
        self.visible_swatches().get(slot).map(Swatch::color)
    }

    fn drop_color(&mut self, slot: usize, color: Color) {
        self.apply_color_at(slot, color);
    }
}

/// Read generator state back from the settings store
fn restore_params(settings: &mut SettingsStore, config: &Config) -> GenerationParams {
    let ns = settings.namespace(SETTINGS_NAMESPACE);
    let type_index = ns.get_int32_or("type", 0);
    let scheme_type = SchemeType::from_index(type_index).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring stored scheme type");
        SchemeType::default()
    });
    GenerationParams {
        base_hue: Slider::Hue.clamp(f64::from(ns.get_float_or("hue", 180.0))),
        saturation_pct: Slider::Saturation.clamp(f64::from(ns.get_float_or("saturation", 100.0))),
        lightness_pct: Slider::Lightness.clamp(f64::from(ns.get_float_or("lightness", 0.0))),
        scheme_type,
        chaos: Slider::Chaos.clamp(f64::from(ns.get_float_or("chaos", config.chaos as f32))),
    }
}
