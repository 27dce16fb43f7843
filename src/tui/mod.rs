//! Ratatui-based terminal UI.
//!
//! The TUI presents the input form (seven numeric fields with defaults and
//! bounds), a results header, and the deflection chart, with keybindings to
//! re-evaluate and to save the filled workbook.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::cli::BeamArgs;
use crate::domain::{BeamParams, DEFLECTION_COLUMN, MAX_LENGTH_MM};
use crate::engine::client::HttpEngine;
use crate::engine::SpreadsheetEngine;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::DeflectionChart;

/// Start the TUI.
pub fn run(args: BeamArgs) -> Result<(), AppError> {
    let engine = HttpEngine::from_env()?;
    let template = crate::io::load_template(&args.template)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::engine(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(Box::new(engine), template, args.to_params())?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::engine(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::engine(format!("Failed to enter alternate screen: {e}")));
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

/// Form fields, in display order.
const FIELD_COUNT: usize = 7;

const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Beam   | Length (L), mm",
    "Beam   | Width (W), mm",
    "Beam   | Height (H), mm",
    "Beam   | Modulus of Elasticity (E), MPa",
    "Loads  | Starting point of load (aw), mm",
    "Loads  | Distributed load amplitude (wa), N/mm",
    "Loads  | Distributed load amplitude (wL), N/mm",
];

/// Left/right adjustment step per field.
const FIELD_STEPS: [f64; FIELD_COUNT] = [1.0, 1.0, 1.0, 1000.0, 1.0, 0.5, 0.5];

struct App {
    engine: Box<dyn SpreadsheetEngine>,
    template: Vec<u8>,
    params: BeamParams,
    selected_field: usize,
    editing: bool,
    edit_input: String,
    status: String,
    run: Option<RunOutput>,
    curve: Option<Vec<f64>>,
}

impl App {
    fn new(
        engine: Box<dyn SpreadsheetEngine>,
        template: Vec<u8>,
        params: BeamParams,
    ) -> Result<Self, AppError> {
        let mut app = Self {
            engine,
            template,
            params,
            selected_field: 0,
            editing: false,
            edit_input: String::new(),
            status: "Evaluating...".to_string(),
            run: None,
            curve: None,
        };
        app.evaluate()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::engine(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::engine(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::engine(format!("Event read error: {e}")))? {
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

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_value_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1.0),
            KeyCode::Right => self.adjust_field(1.0),
            KeyCode::Enter => {
                self.editing = true;
                self.edit_input = format_value(self.field_value(self.selected_field));
                self.status =
                    "Editing value. Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('e') => match self.evaluate() {
                Ok(()) => self.status = "Evaluated.".to_string(),
                Err(err) => self.status = format!("Evaluation failed: {err}"),
            },
            KeyCode::Char('d') => match self.download(Path::new(".")) {
                Ok(path) => self.status = format!("Wrote {path}"),
                Err(err) => self.status = format!("Download failed: {err}"),
            },
            _ => {}
        }

        false
    }

    fn handle_value_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                self.apply_edit_input();
            }
            KeyCode::Backspace => {
                self.edit_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.edit_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_edit_input(&mut self) {
        let trimmed = self.edit_input.trim().to_string();
        let value = match trimmed.parse::<f64>() {
            Ok(v) => v,
            Err(e) => {
                self.status = format!("Invalid number '{trimmed}': {e}");
                return;
            }
        };
        self.set_field_value(self.selected_field, value);
        match self.evaluate() {
            Ok(()) => self.status = format!("{} = {}", field_key(self.selected_field), trimmed),
            Err(err) => self.status = format!("Evaluation failed: {err}"),
        }
    }

    fn adjust_field(&mut self, direction: f64) {
        let step = FIELD_STEPS[self.selected_field] * direction;
        let value = self.field_value(self.selected_field) + step;
        self.set_field_value(self.selected_field, value);
        match self.evaluate() {
            Ok(()) => {
                self.status = format!(
                    "{} = {}",
                    field_key(self.selected_field),
                    format_value(self.field_value(self.selected_field))
                );
            }
            Err(err) => self.status = format!("Evaluation failed: {err}"),
        }
    }

    fn field_value(&self, index: usize) -> f64 {
        match index {
            0 => self.params.length,
            1 => self.params.width,
            2 => self.params.height,
            3 => self.params.elastic_modulus,
            4 => self.params.load_start,
            5 => self.params.load_amplitude_a,
            _ => self.params.load_amplitude_l,
        }
    }

    fn set_field_value(&mut self, index: usize, value: f64) {
        let value = match index {
            // Length carries the template's documented bound.
            0 => value.clamp(0.0, MAX_LENGTH_MM),
            _ => value.max(0.0),
        };
        match index {
            0 => self.params.length = value,
            1 => self.params.width = value,
            2 => self.params.height = value,
            3 => self.params.elastic_modulus = value,
            4 => self.params.load_start = value,
            5 => self.params.load_amplitude_a = value,
            _ => self.params.load_amplitude_l = value,
        }
    }

    fn evaluate(&mut self) -> Result<(), AppError> {
        let run = crate::app::pipeline::run_eval_with_template(
            self.engine.as_ref(),
            &self.template,
            &self.params,
        )?;
        let curve = crate::workbook::read_deflection_series(&run.bundle.workbook, &self.params)?;
        self.run = Some(run);
        self.curve = Some(curve);
        Ok(())
    }

    fn download(&mut self, dir: &Path) -> Result<String, AppError> {
        // The download re-runs the evaluation so it always reflects the
        // current form values, like the other entry points.
        let run = crate::app::pipeline::run_eval_with_template(
            self.engine.as_ref(),
            &self.template,
            &self.params,
        )?;
        let path = crate::io::write_workbook(dir, &run.bundle.workbook)?;
        Ok(path.display().to_string())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("beam", Style::default().fg(Color::Cyan)),
            Span::raw(" — spreadsheet beam calculator"),
        ]));

        lines.push(Line::from(Span::styled(
            crate::report::format_run_header(&self.params).trim_end().to_string(),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                crate::report::format_results_line(&run.scalars),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FIELD_COUNT as u16 + 2)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Beam deflection").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(curve) = &self.curve else {
            let msg = Paragraph::new("Waiting for evaluation...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (series, max_point, x_bounds, y_bounds) = chart_series(curve);
        let widget = DeflectionChart {
            curve: &series,
            max_point,
            x_bounds,
            y_bounds,
            x_label: "Length (mm)",
            y_label: DEFLECTION_COLUMN,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(FIELD_COUNT);
        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let value = if self.editing && i == self.selected_field {
                format!("{}_", self.edit_input)
            } else {
                format_value(self.field_value(i))
            };
            items.push(ListItem::new(format!("{label}: {value}")));
        }

        let list = List::new(items)
            .block(Block::default().title("Parameters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  e evaluate  d download  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(
                &self.status,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Template key for the status line.
fn field_key(index: usize) -> &'static str {
    match index {
        0 => crate::domain::INPUT_LENGTH,
        1 => crate::domain::INPUT_WIDTH,
        2 => crate::domain::INPUT_HEIGHT,
        3 => crate::domain::INPUT_MODULUS,
        4 => crate::domain::INPUT_LOAD_START,
        5 => crate::domain::INPUT_LOAD_AMPLITUDE_A,
        _ => crate::domain::INPUT_LOAD_AMPLITUDE_L,
    }
}

fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}

/// Build the chart series for Plotters from the deflection rows.
fn chart_series(curve: &[f64]) -> (Vec<(f64, f64)>, Option<(f64, f64)>, [f64; 2], [f64; 2]) {
    let series: Vec<(f64, f64)> = curve.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();

    let x_max = (series.len().saturating_sub(1)) as f64;
    let x_bounds = [0.0, x_max.max(1.0)];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut max_point: Option<(f64, f64)> = None;
    for &(x, y) in &series {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
        let is_larger = max_point.map(|(_, best)| y.abs() > best.abs()).unwrap_or(true);
        if is_larger {
            max_point = Some((x, y));
        }
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (series, max_point, x_bounds, y_bounds)
}
