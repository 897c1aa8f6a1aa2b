//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel with a loan amount input and a credit
//! score slider, then renders the payment table and a payment-vs-term chart.
//! Every input change recomputes the whole estimate.

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
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
};

use crate::app::pipeline::estimate;
use crate::domain::{
    CREDIT_SCORE_MAX, CREDIT_SCORE_MIN, CREDIT_SCORE_STEP, Estimate, EstimateConfig,
};
use crate::error::AppError;
use crate::payment::{format_usd, monthly_payment};

mod plotters_chart;

use plotters_chart::PaymentChart;

/// Step applied to the loan amount by ←/→.
const AMOUNT_STEP: f64 = 1_000.0;

/// Upper bound on strided chart samples per series.
const MAX_CHART_SAMPLES: u32 = 512;

/// Start the TUI.
pub fn run(config: EstimateConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Amount,
    Score,
}

struct App {
    config: EstimateConfig,
    selected: Field,
    /// Text of the amount input while editing.
    amount_input: String,
    /// Amount before editing started (restored on Esc).
    amount_before_edit: f64,
    editing_amount: bool,
    status: String,
    estimate: Estimate,
}

impl App {
    fn new(config: EstimateConfig) -> Self {
        let estimate = estimate(
            config.principal,
            f64::from(config.credit_score),
            &config.terms,
            &config.table,
            config.zero_rate,
        );
        Self {
            amount_input: String::new(),
            amount_before_edit: config.principal,
            selected: Field::Amount,
            editing_amount: false,
            status: "Ready.".to_string(),
            estimate,
            config,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    /// Apply a key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_amount {
            self.handle_amount_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected = Field::Amount,
            KeyCode::Down => self.selected = Field::Score,
            KeyCode::Tab => {
                self.selected = match self.selected {
                    Field::Amount => Field::Score,
                    Field::Score => Field::Amount,
                };
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Home if self.selected == Field::Score => self.set_score(CREDIT_SCORE_MIN),
            KeyCode::End if self.selected == Field::Score => self.set_score(CREDIT_SCORE_MAX),
            KeyCode::Enter if self.selected == Field::Amount => self.begin_amount_edit(),
            KeyCode::Char(c) if self.selected == Field::Amount && (c.is_ascii_digit() || c == '.') => {
                self.begin_amount_edit();
                self.amount_input.clear();
                self.handle_amount_edit(code);
            }
            _ => {}
        }

        false
    }

    fn begin_amount_edit(&mut self) {
        self.editing_amount = true;
        self.amount_before_edit = self.config.principal;
        self.amount_input = format!("{}", self.config.principal);
        self.status = "Editing amount. Enter to apply, Esc to cancel.".to_string();
    }

    fn handle_amount_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_amount = false;
                self.config.principal = self.amount_before_edit;
                self.recompute();
                self.status = "Amount edit canceled.".to_string();
                return;
            }
            KeyCode::Enter => {
                self.editing_amount = false;
                self.status = format!("amount: {}", format_usd(self.config.principal));
                return;
            }
            KeyCode::Backspace => {
                self.amount_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.amount_input.push(c);
            }
            _ => return,
        }

        // Live update while typing; an empty field counts as zero.
        let trimmed = self.amount_input.trim();
        let parsed = if trimmed.is_empty() { Ok(0.0) } else { trimmed.parse::<f64>() };
        match parsed {
            Ok(amount) => {
                self.config.principal = amount;
                self.recompute();
                self.status = "Editing amount. Enter to apply, Esc to cancel.".to_string();
            }
            Err(_) => {
                self.status = format!("Not a number: '{trimmed}'");
            }
        }
    }

    fn adjust(&mut self, delta: i32) {
        match self.selected {
            Field::Amount => {
                let next = self.config.principal + f64::from(delta) * AMOUNT_STEP;
                self.config.principal = next.max(0.0);
                self.recompute();
                self.status = format!("amount: {}", format_usd(self.config.principal));
            }
            Field::Score => {
                let step = i32::from(CREDIT_SCORE_STEP) * delta;
                let next = i32::from(self.config.credit_score) + step;
                let clamped = next.clamp(i32::from(CREDIT_SCORE_MIN), i32::from(CREDIT_SCORE_MAX));
                self.set_score(u16::try_from(clamped).unwrap_or(CREDIT_SCORE_MIN));
            }
        }
    }

    fn set_score(&mut self, score: u16) {
        self.config.credit_score = score;
        self.recompute();
        self.status = format!("score: {score} ({})", self.estimate.tier_label());
    }

    fn recompute(&mut self) {
        self.estimate = estimate(
            self.config.principal,
            f64::from(self.config.credit_score),
            &self.config.terms,
            &self.config.table,
            self.config.zero_rate,
        );
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
        let lines = vec![
            Line::from(vec![
                Span::styled("loan", Style::default().fg(Color::Cyan)),
                Span::raw(" - monthly payment estimate"),
            ]),
            Line::from(Span::styled(
                format!(
                    "amount: {} | score: {} ({}) | rate: {:.2}% APR",
                    format_usd(self.estimate.principal),
                    self.config.credit_score,
                    self.estimate.tier_label(),
                    self.estimate.rate,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(0)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_settings(frame, left[0]);
        self.draw_table(frame, left[1]);
        self.draw_chart(frame, columns[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Settings").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let highlight = Style::default().fg(Color::Black).bg(Color::White);
        let amount_text = if self.editing_amount {
            format!("» Loan amount: {}_", self.amount_input)
        } else {
            format!("  Loan amount: {}", format_usd(self.config.principal))
        };
        let amount_style = if self.selected == Field::Amount { highlight } else { Style::default() };
        frame.render_widget(Paragraph::new(amount_text).style(amount_style), rows[0]);

        let score_style = if self.selected == Field::Score { highlight } else { Style::default() };
        frame.render_widget(
            Paragraph::new(format!("  Credit score: {}", self.config.credit_score)).style(score_style),
            rows[2],
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(score_ratio(self.config.credit_score))
            .label(self.estimate.tier_label().to_string());
        frame.render_widget(gauge, rows[3]);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec![Cell::from("Months"), Cell::from("Payment")])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.estimate.rows.iter().enumerate().map(|(i, r)| {
            let style = if i % 2 == 0 {
                Style::default().bg(Color::Rgb(30, 30, 30))
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(r.term_months.to_string()),
                Cell::from(Line::from(r.formatted.clone()).right_aligned()),
            ])
            .style(style)
        });

        let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
            .header(header)
            .block(Block::default().title("Payments").borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Payment vs term").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = chart_series(&self.estimate, &self.config) else {
            let msg = Paragraph::new("Nothing to chart for these inputs.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = PaymentChart {
            curve: &series.curve,
            best: &series.best,
            points: &series.points,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "term (months)",
            y_label: "payment ($)",
            fmt_x: fmt_axis_months,
            fmt_y: fmt_axis_dollars,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit amount  Home/End score  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Slider position of `score` within the accepted range.
fn score_ratio(score: u16) -> f64 {
    let span = f64::from(CREDIT_SCORE_MAX - CREDIT_SCORE_MIN);
    let offset = f64::from(score.clamp(CREDIT_SCORE_MIN, CREDIT_SCORE_MAX) - CREDIT_SCORE_MIN);
    offset / span
}

struct ChartSeries {
    curve: Vec<(f64, f64)>,
    best: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series: payment at the applied rate and at the best tier rate,
/// month by month across the configured term range.
fn chart_series(estimate: &Estimate, config: &EstimateConfig) -> Option<ChartSeries> {
    let t0 = *config.terms.iter().min()?;
    let t1 = *config.terms.iter().max()?;
    let (t0, t1) = if t0 == t1 {
        (t0.saturating_sub(12).max(1), t1.saturating_add(12))
    } else {
        (t0, t1)
    };

    let months = chart_months(t0, t1, &config.terms);
    let best_rate = config.table.tiers().last().map(|t| t.rate)?;
    let sample = |rate: f64| -> Vec<(f64, f64)> {
        months
            .iter()
            .map(|&m| (f64::from(m), monthly_payment(estimate.principal, rate, m, config.zero_rate)))
            .filter(|&(_, y)| y.is_finite())
            .collect()
    };
    let curve = sample(estimate.rate);
    let best = sample(best_rate);
    let points: Vec<(f64, f64)> = estimate
        .rows
        .iter()
        .map(|r| (f64::from(r.term_months), r.monthly_payment))
        .filter(|&(_, y)| y.is_finite())
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in curve.iter().chain(best.iter()).chain(points.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }
    if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
    Some(ChartSeries {
        curve,
        best,
        points,
        x_bounds: [f64::from(t0), f64::from(t1)],
        y_bounds: [y_min - pad, y_max + pad],
    })
}

/// Months to sample across `[t0, t1]`: at most `MAX_CHART_SAMPLES` evenly strided
/// points, plus both ends and every table term, sorted and deduplicated.
fn chart_months(t0: u32, t1: u32, terms: &[u32]) -> Vec<u32> {
    let stride = (t1 - t0).div_ceil(MAX_CHART_SAMPLES).max(1);
    let mut months: Vec<u32> = (t0..=t1)
        .step_by(stride as usize)
        .chain([t1])
        .chain(terms.iter().copied())
        .collect();
    months.sort_unstable();
    months.dedup();
    months
}

fn fmt_axis_months(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_dollars(v: f64) -> String {
    format!("{v:.0}")
}
