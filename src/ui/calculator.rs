use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::gst::{self, IntraStateSplit};

/// Upper end of the rate slider; matches the highest statutory slab.
const MAX_RATE: u8 = 28;

// Represents the state of the standalone calculator screen. Results never
// touch the ledger.
pub struct CalculatorState {
    amount_input: String,
    rate: u8,
    editing_amount: bool,
    result: Option<IntraStateSplit>,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            amount_input: String::new(),
            rate: 18,
            editing_amount: false,
            result: None,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing_amount = !self.editing_amount;
    }

    pub fn increase_rate(&mut self) {
        if self.rate < MAX_RATE {
            self.rate += 1;
        }
    }

    pub fn decrease_rate(&mut self) {
        if self.rate > 0 {
            self.rate -= 1;
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount_input.parse().unwrap_or(0.0)
    }

    pub fn calculate(&mut self) {
        self.result = Some(gst::intra_state_split(self.amount(), self.rate as f64));
    }

    pub fn handle_amount_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.amount_input.push(c);
            }
            KeyCode::Backspace => {
                self.amount_input.pop();
            }
            _ => {}
        }
    }
}

pub enum CalculatorAction {
    Back,
}

pub fn render_calculator<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut CalculatorState,
    config: &Config,
) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Rate slider
            Constraint::Length(5), // Result metrics
            Constraint::Min(1),
            Constraint::Length(3), // Help
        ].as_ref())
        .split(size);

    let title = Paragraph::new("GST Calculator")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    // Amount input
    let amount_value = if state.editing_amount {
        format!("{}|", state.amount_input)
    } else {
        state.amount_input.clone()
    };
    let amount_style = if state.editing_amount {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let amount = Paragraph::new(Spans::from(vec![
        Span::styled("Enter Amount (pre-tax): ", amount_style),
        Span::raw(amount_value),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(amount, chunks[1]);

    // Rate slider, 0 to 28 in whole percent steps
    let slider = Gauge::default()
        .block(Block::default().title("GST Rate").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .ratio(state.rate as f64 / MAX_RATE as f64)
        .label(format!("{}%", state.rate));
    frame.render_widget(slider, chunks[2]);

    // Result metrics
    if let Some(result) = &state.result {
        render_metrics(frame, chunks[3], config, state.amount(), result);
    }

    let help = Paragraph::new(
        "<Enter> Calculate | <E> Edit amount | <Left/Right> Adjust rate | <Esc> Back",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[5]);
}

fn render_metrics<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    config: &Config,
    amount: f64,
    result: &IntraStateSplit,
) {
    let metric_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ].as_ref())
        .split(area);

    let metrics = [
        ("Base Amount", config.money(amount)),
        ("CGST", config.money(result.cgst)),
        ("SGST", config.money(result.sgst)),
        ("Total Amount", config.money(result.total)),
    ];

    for (i, (label, value)) in metrics.iter().enumerate() {
        let metric = Paragraph::new(Span::styled(
            value.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().title(*label).borders(Borders::ALL));
        frame.render_widget(metric, metric_chunks[i]);
    }
}

pub fn handle_input(state: &mut CalculatorState) -> Result<Option<CalculatorAction>> {
    if let Event::Key(key) = event::read()? {
        if state.editing_amount {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    state.toggle_editing();
                }
                other => {
                    state.handle_amount_input(other);
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(CalculatorAction::Back));
            }
            KeyCode::Char('e') => {
                state.toggle_editing();
            }
            KeyCode::Left => {
                state.decrease_rate();
            }
            KeyCode::Right => {
                state.increase_rate();
            }
            KeyCode::Enter => {
                state.calculate();
            }
            _ => {}
        }
    }
    Ok(None)
}
