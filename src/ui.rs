//! TUI rendering with ratatui

use crate::app::{App, FocusedPane, InputMode, MenuAction, Slider};
use crate::color::Color;
use crate::scheme::{SchemeType, MAX_VISIBLE};
use crate::theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};
use std::rc::Rc;

const SWATCH_ROW_HEIGHT: u16 = 7;
const SLIDER_LABEL_WIDTH: usize = 12;
const SLIDER_VALUE_WIDTH: usize = 7;

/// Split the screen: type selector, swatch row, sliders + palette, status bar
fn main_chunks(area: Rect) -> Rc<[Rect]> {
    let outer_area = area.inner(Margin { horizontal: 1, vertical: 0 });
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // Scheme type tabs
            Constraint::Length(SWATCH_ROW_HEIGHT), // Swatches
            Constraint::Min(0),                    // Sliders + Palette
            Constraint::Length(3),                 // Status bar
        ])
        .split(outer_area)
}

/// Screen areas of the visible swatches, left to right
pub fn swatch_areas(area: Rect, visible: usize) -> Vec<Rect> {
    let row = main_chunks(area)[1];
    let visible = visible.clamp(1, MAX_VISIBLE);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, visible as u32); visible])
        .split(row)
        .to_vec()
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = main_chunks(frame.area());

    render_tabs(frame, app, chunks[0]);

    let swatch_areas = swatch_areas(frame.area(), app.colors_visible);
    for (swatch, area) in app.visible_swatches().iter().zip(&swatch_areas) {
        frame.render_widget(swatch, *area);
    }

    // Split content area: sliders (50%) | palette (50%) with gap
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1), // Gap between panes
            Constraint::Percentage(50),
        ])
        .split(chunks[2]);

    render_sliders(frame, app, content_chunks[0]);
    render_palette(frame, app, content_chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Some(menu) = &app.menu {
        if let Some(anchor) = swatch_areas.get(menu.swatch) {
            render_menu(frame, app, *anchor);
        }
    }

    if app.input_mode == InputMode::Edit {
        render_edit_popup(frame, app);
    }

    // Render help overlay if active
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the scheme type selector
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = SchemeType::all()
        .iter()
        .map(|scheme| {
            let style = if *scheme == app.params.scheme_type {
                Style::default()
                    .fg(theme::TAB_ACTIVE)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TAB_INACTIVE)
            };
            Line::from(vec![
                Span::styled(format!("{} ", scheme.label()), style),
                Span::styled(
                    format!("({})", scheme.color_count()),
                    Style::default().fg(theme::MUTED),
                ),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::MUTED))
                .title(Span::styled(
                    " Scheme ",
                    Style::default()
                        .fg(theme::BLUE)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(app.params.scheme_type.index() as usize)
        .style(Style::default().fg(theme::FG))
        .highlight_style(
            Style::default()
                .fg(theme::TAB_ACTIVE)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(theme::MUTED)));

    frame.render_widget(tabs, area);
}

/// Text bar for a slider position
fn slider_bar(slider: Slider, value: f64, width: usize) -> (String, String) {
    let (min, max) = slider.range();
    let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    ("━".repeat(filled), "─".repeat(width - filled))
}

/// Render the generator sliders
fn render_sliders(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_pane == FocusedPane::Sliders;
    let bar_width = (area.width as usize).saturating_sub(SLIDER_LABEL_WIDTH + SLIDER_VALUE_WIDTH + 4);

    let lines: Vec<Line> = Slider::all()
        .iter()
        .map(|&slider| {
            let value = app.slider_value(slider);
            let (filled, track) = slider_bar(slider, value, bar_width);
            let is_selected = focused && slider == app.focused_slider;
            let label_style = if is_selected {
                Style::default().fg(theme::FG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::MUTED)
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<width$}", slider.label(), width = SLIDER_LABEL_WIDTH),
                    label_style,
                ),
                Span::styled(filled, Style::default().fg(theme::SLIDER_FILL)),
                Span::styled(track, Style::default().fg(theme::SLIDER_TRACK)),
                Span::styled(
                    format!("{:>width$}", slider.format(value), width = SLIDER_VALUE_WIDTH),
                    Style::default().fg(theme::FG),
                ),
            ]);
            if is_selected {
                line.style(Style::default().bg(theme::SELECTED_BG))
            } else {
                line
            }
        })
        .collect();

    let border_color = if focused { theme::CYAN } else { theme::MUTED };

    let sliders = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(" Adjust ", Style::default().fg(theme::CYAN))),
    );

    frame.render_widget(sliders, area);
}

/// Render the committed palette
fn render_palette(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .palette
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled("██ ", Style::default().fg(entry.color.into())),
                Span::styled(
                    entry.color.format(app.config.display_format),
                    Style::default().fg(theme::FG),
                ),
                Span::raw("  "),
                Span::styled(entry.meta.name.clone(), Style::default().fg(theme::MUTED)),
            ]))
        })
        .collect();

    let title = if app.palette.is_empty() {
        " Palette (empty) ".to_string()
    } else {
        format!(" Palette ({}) ", app.palette.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MUTED))
            .title(Span::styled(title, Style::default().fg(theme::FG))),
    );

    frame.render_widget(list, area);
}

/// Render the context menu below the swatch it belongs to
fn render_menu(frame: &mut Frame, app: &App, anchor: Rect) {
    let Some(menu) = &app.menu else {
        return;
    };
    let screen = frame.area();
    let width = 24.min(screen.width);
    let height = (MenuAction::all().len() as u16 + 2).min(screen.height);
    let x = anchor.x.min(screen.width.saturating_sub(width));
    let y = (anchor.y + anchor.height / 2).min(screen.height.saturating_sub(height));
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = MenuAction::all()
        .iter()
        .enumerate()
        .map(|(idx, &action)| {
            let style = if !menu.is_enabled(action) {
                Style::default().fg(theme::MUTED)
            } else if idx == menu.selected {
                Style::default().fg(theme::FG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::FG)
            };
            let item = ListItem::new(Line::from(Span::styled(action.label(), style)));
            if idx == menu.selected {
                item.style(Style::default().bg(theme::SELECTED_BG))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BLUE))
            .title(Span::styled(
                format!(" Swatch {} ", menu.swatch + 1),
                Style::default().fg(theme::BLUE),
            )),
    );

    frame.render_widget(list, popup_area);
}

/// Render the colour edit input
fn render_edit_popup(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = 40.min(area.width);
    let height = 3.min(area.height);
    let popup_area = Rect::new(
        (area.width - width) / 2,
        (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup_area);

    // Border turns orange while the text does not parse
    let border_color = if Color::parse(&app.edit_input).is_some() {
        theme::BLUE
    } else {
        theme::ORANGE
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.edit_input, Style::default().fg(theme::FG)),
        Span::styled("│", Style::default().fg(theme::BLUE)), // cursor
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                " Edit colour ",
                Style::default()
                    .fg(theme::BLUE)
                    .add_modifier(Modifier::BOLD),
            )),
    )
    .style(Style::default().bg(theme::SELECTED_BG));

    frame.render_widget(input, popup_area);
}

fn help_line(keys: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(theme::CYAN)),
        Span::styled(text, Style::default().fg(theme::FG)),
    ])
}

/// Render help overlay with legend
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Center the help popup (70% width, 80% height)
    let popup_width = (area.width * 70 / 100).min(70);
    let popup_height = (area.height * 80 / 100).min(28);
    let popup_x = (area.width - popup_width) / 2;
    let popup_y = (area.height - popup_height) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_content: Vec<Line<'static>> = vec![
        Line::from(Span::styled("KEYBINDINGS", Style::default().fg(theme::BLUE).add_modifier(Modifier::BOLD))),
        Line::from(""),
        help_line("  Tab        ", "Switch between swatches and sliders"),
        help_line("  h/l, ←/→   ", "Select swatch / move slider (H/L by 10)"),
        help_line("  j/k, ↑/↓   ", "Select slider"),
        help_line("  t/T, 1-7   ", "Next/previous scheme type, or pick one"),
        help_line("  Enter      ", "Add focused swatch to palette"),
        help_line("  a          ", "Add all swatches to palette"),
        help_line("  b          ", "Rebuild around last palette colour"),
        help_line("  r          ", "Reroll chaos"),
        help_line("  m          ", "Swatch menu"),
        help_line("  e          ", "Edit swatch colour"),
        help_line("  Ctrl+C, y  ", "Copy swatch colour"),
        help_line("  Ctrl+V, p  ", "Paste colour into swatch"),
        help_line("  X          ", "Clear palette"),
        help_line("  ?          ", "Toggle this help"),
        help_line("  q          ", "Quit (saves settings)"),
        Line::from(""),
        Line::from(Span::styled("MOUSE", Style::default().fg(theme::BLUE).add_modifier(Modifier::BOLD))),
        Line::from(""),
        help_line("  drag       ", "Drop one swatch colour onto another"),
        help_line("  dbl-click  ", "Add swatch to palette"),
        help_line("  right      ", "Swatch menu"),
        Line::from(""),
        Line::from(Span::styled("Press Esc, q, or ? to close", Style::default().fg(theme::MUTED))),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BLUE))
                .title(Span::styled(
                    " Help ",
                    Style::default().fg(theme::BLUE).add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().bg(theme::SELECTED_BG));

    frame.render_widget(help, popup_area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.input_mode {
        InputMode::Normal => {
            if let Some(msg) = &app.status_message {
                Line::from(vec![Span::styled(msg, Style::default().fg(theme::GREEN))])
            } else if let Some(drag) = &app.drag {
                Line::from(vec![Span::styled(
                    format!("Dragging {}", drag.color),
                    Style::default().fg(theme::PURPLE),
                )])
            } else {
                // Keybinding hints
                Line::from(vec![
                    Span::styled("[Tab]", Style::default().fg(theme::BLUE)),
                    Span::styled(" pane ", Style::default().fg(theme::MUTED)),
                    Span::styled("[t]", Style::default().fg(theme::BLUE)),
                    Span::styled("ype ", Style::default().fg(theme::MUTED)),
                    Span::styled("[a]", Style::default().fg(theme::BLUE)),
                    Span::styled("dd all ", Style::default().fg(theme::MUTED)),
                    Span::styled("[m]", Style::default().fg(theme::BLUE)),
                    Span::styled("enu ", Style::default().fg(theme::MUTED)),
                    Span::styled("[e]", Style::default().fg(theme::BLUE)),
                    Span::styled("dit ", Style::default().fg(theme::MUTED)),
                    Span::styled("[y]", Style::default().fg(theme::BLUE)),
                    Span::styled("ank ", Style::default().fg(theme::MUTED)),
                    Span::styled("[p]", Style::default().fg(theme::BLUE)),
                    Span::styled("aste ", Style::default().fg(theme::MUTED)),
                    Span::styled("[?]", Style::default().fg(theme::BLUE)),
                    Span::styled("help ", Style::default().fg(theme::MUTED)),
                    Span::styled("[q]", Style::default().fg(theme::BLUE)),
                    Span::styled("uit", Style::default().fg(theme::MUTED)),
                ])
            }
        }
        InputMode::Menu => Line::from(vec![
            Span::styled("[j/k]", Style::default().fg(theme::BLUE)),
            Span::styled(" select ", Style::default().fg(theme::MUTED)),
            Span::styled("[Enter]", Style::default().fg(theme::BLUE)),
            Span::styled(" run ", Style::default().fg(theme::MUTED)),
            Span::styled("[Esc]", Style::default().fg(theme::BLUE)),
            Span::styled(" close", Style::default().fg(theme::MUTED)),
        ]),
        InputMode::Edit => Line::from(vec![
            Span::styled("#rrggbb, rgb(r, g, b) or hsl(h, s%, l%) ", Style::default().fg(theme::MUTED)),
            Span::styled("[Esc]", Style::default().fg(theme::BLUE)),
            Span::styled(" cancel, ", Style::default().fg(theme::MUTED)),
            Span::styled("[Enter]", Style::default().fg(theme::BLUE)),
            Span::styled(" apply", Style::default().fg(theme::MUTED)),
        ]),
        InputMode::Help => Line::from(vec![
            Span::styled("[Esc/q/?]", Style::default().fg(theme::BLUE)),
            Span::styled(" close help", Style::default().fg(theme::MUTED)),
        ]),
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MUTED)),
    );

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::config::Config;
    use crate::palette::Palette;
    use crate::settings::SettingsStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(
            Config::default(),
            SettingsStore::in_memory(),
            Palette::new(),
            None,
            Box::new(MemoryClipboard::default()),
        )
    }

    #[test]
    fn test_swatch_areas_split_the_row() {
        let area = Rect::new(0, 0, 102, 40);
        let areas = swatch_areas(area, 5);
        assert_eq!(areas.len(), 5);
        assert!(areas.iter().all(|a| a.y == 3 && a.height == SWATCH_ROW_HEIGHT));
        assert_eq!(areas[0].x, 1);
        assert!(areas.windows(2).all(|w| w[0].right() == w[1].x));
    }

    #[test]
    fn test_slider_bar_fill() {
        let (filled, track) = slider_bar(Slider::Lightness, -50.0, 10);
        assert_eq!((filled.chars().count(), track.chars().count()), (0, 10));
        let (filled, track) = slider_bar(Slider::Hue, 180.0, 10);
        assert_eq!((filled.chars().count(), track.chars().count()), (5, 5));
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_render_main_screen() {
        let mut app = app();
        app.add_all_to_palette();
        let text = draw(&app);
        assert!(text.contains("Complementary"));
        assert!(text.contains("Palette (2)"));
        assert!(text.contains("Adjust"));
    }

    #[test]
    fn test_render_overlays() {
        let mut app = app();
        app.open_menu(1);
        let text = draw(&app);
        assert!(text.contains("Swatch 2"));
        assert!(text.contains("Copy as hex"));

        app.show_help = true;
        let text = draw(&app);
        assert!(text.contains("KEYBINDINGS"));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let mut app = app();
        app.start_edit(0);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
