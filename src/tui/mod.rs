//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing country, year and
//! measurement kind, then renders the Lorenz curve, the five statistics and
//! the per-bucket share table for the current selection.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_with_source};
use crate::data::{IncomeSource, source_for};
use crate::domain::{AnalysisConfig, next_year, prev_year};
use crate::error::AppError;
use crate::metrics::lorenz_curve;
use crate::report::{fmt_fixed, ordinal, share_percent};

mod plotters_chart;

use plotters_chart::LorenzChart;

/// File written by the `e` key.
const EXPORT_SHARES_PATH: &str = "inequality_data.csv";
/// File written by the `j` key.
const EXPORT_JSON_PATH: &str = "inequality_data.json";

/// Number of editable settings rows (country, year, kind).
const SETTINGS_FIELDS: usize = 3;

/// Start the TUI.
pub fn run(config: AnalysisConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: AnalysisConfig,
    source: Box<dyn IncomeSource>,
    selected_field: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: AnalysisConfig) -> Self {
        let source = source_for(&config);
        let mut app = Self {
            config,
            source,
            selected_field: 0,
            status: String::new(),
            run: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < SETTINGS_FIELDS {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('e') => self.export_shares(),
            KeyCode::Char('j') => self.export_json(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let selection = &mut self.config.selection;
        match self.selected_field {
            0 => {
                selection.country = if delta >= 0 {
                    selection.country.next()
                } else {
                    selection.country.prev()
                };
            }
            1 => {
                selection.year = if delta >= 0 {
                    next_year(selection.year)
                } else {
                    prev_year(selection.year)
                };
            }
            2 => selection.kind = selection.kind.toggle(),
            _ => return,
        }
        self.recompute();
    }

    /// Rebuild the dataset for the current selection. Failures only update the
    /// status line.
    fn recompute(&mut self) {
        match run_with_source(self.source.as_ref(), &self.config.selection) {
            Ok(run) => {
                self.status = format!("Loaded {} from {}", run.selection.describe(), run.provenance);
                self.run = Some(run);
            }
            Err(err) => {
                tracing::warn!(error = %err, "selection has no data");
                self.status = err.to_string();
                self.run = None;
            }
        }
    }

    fn export_shares(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export for this selection.".to_string();
            return;
        };
        let path = std::path::Path::new(EXPORT_SHARES_PATH);
        self.status = match crate::io::export::write_shares_csv(path, &run.dataset, run.selection.kind) {
            Ok(()) => format!("Wrote share table: {EXPORT_SHARES_PATH}"),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn export_json(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export for this selection.".to_string();
            return;
        };
        let path = std::path::Path::new(EXPORT_JSON_PATH);
        self.status = match crate::io::dataset_file::write_dataset_json(path, &run.dataset, run.selection.kind) {
            Ok(()) => format!("Wrote dataset JSON: {EXPORT_JSON_PATH}"),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ineq", Style::default().fg(Color::Cyan)),
            Span::raw(" - inequality metrics from percentile data"),
        ]));

        let sel = &self.config.selection;
        let buckets = self.run.as_ref().map(|r| r.dataset.bucket_count()).unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!(
                "{} | {} | {} | buckets={buckets} | source: {}",
                sel.country.display_name(),
                sel.year,
                sel.kind.display_name(),
                self.source.describe(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.draw_chart(frame, columns[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SETTINGS_FIELDS as u16 + 2),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        self.draw_settings(frame, side[0]);
        self.draw_metrics(frame, side[1]);
        self.draw_shares(frame, side[2]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Lorenz curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No data for this selection.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let lorenz = lorenz_curve(run.dataset.subsets());
        let widget = LorenzChart {
            lorenz: &lorenz,
            x_label: "population",
            y_label: format!("{} share", run.selection.kind.noun()),
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sel = &self.config.selection;
        let items = vec![
            ListItem::new(format!("Country: {} ({})", sel.country.display_name(), sel.country.code())),
            ListItem::new(format!("Year: {}", sel.year)),
            ListItem::new(format!("Measure: {}", sel.kind.display_name())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_metrics(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Measurements").borders(Borders::ALL);
        let Some(run) = &self.run else {
            frame.render_widget(Paragraph::new("-").block(block), area);
            return;
        };

        let m = run.dataset.metrics();
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().add_modifier(Modifier::BOLD);
        let rows = [
            ("Log variance", fmt_fixed(m.log_variance, 2)),
            ("Rel. mean deviation", fmt_fixed(m.mean_deviation, 2)),
            ("Gini", fmt_fixed(m.gini, 1)),
            ("Theil T", fmt_fixed(m.theil_t, 2)),
            ("Theil L", fmt_fixed(m.theil_l, 2)),
        ];
        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(name, v)| {
                Line::from(vec![
                    Span::styled(format!("{name:<21}"), label),
                    Span::styled(v, value),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_shares(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self
            .run
            .as_ref()
            .map(|r| format!("{} shares", r.selection.kind.display_name()))
            .unwrap_or_else(|| "Shares".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);

        let items: Vec<ListItem> = match &self.run {
            Some(run) => run
                .dataset
                .subsets()
                .iter()
                .enumerate()
                .map(|(idx, s)| {
                    ListItem::new(format!("{:>6}  {:>7}%", ordinal(idx + 1), share_percent(s.income_share)))
                })
                .collect(),
            None => Vec::new(),
        };

        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  e export csv  j export json  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
