use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{GstRate, InvoiceDraft, TransactionType};
use crate::ui::components::date_input::DateInputState;

// Represents a field in the invoice form
#[derive(Clone, Copy, PartialEq)]
pub enum InvoiceField {
    InvoiceNo,
    Date,
    PartyName,
    Amount,
    TransactionType,
    GstRate,
}

enum Feedback {
    Success(String),
    Error(String),
}

// Represents the state of the invoice entry screen
pub struct InvoiceManagerState {
    invoice_no: String,
    date_state: DateInputState,
    party_name: String,
    amount_input: String,
    transaction_type: TransactionType,
    gst_rate: GstRate,
    current_field: InvoiceField,
    editing: bool,
    active_input: String,
    feedback: Option<Feedback>,
}

impl InvoiceManagerState {
    pub fn new() -> Self {
        Self {
            invoice_no: String::new(),
            date_state: DateInputState::new(Local::now().date_naive()),
            party_name: String::new(),
            amount_input: String::new(),
            transaction_type: TransactionType::IntraState,
            gst_rate: GstRate::Five,
            current_field: InvoiceField::InvoiceNo,
            editing: false,
            active_input: String::new(),
            feedback: None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceNo => InvoiceField::Date,
            InvoiceField::Date => InvoiceField::PartyName,
            InvoiceField::PartyName => InvoiceField::Amount,
            InvoiceField::Amount => InvoiceField::TransactionType,
            InvoiceField::TransactionType => InvoiceField::GstRate,
            InvoiceField::GstRate => InvoiceField::InvoiceNo,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            InvoiceField::InvoiceNo => InvoiceField::GstRate,
            InvoiceField::Date => InvoiceField::InvoiceNo,
            InvoiceField::PartyName => InvoiceField::Date,
            InvoiceField::Amount => InvoiceField::PartyName,
            InvoiceField::TransactionType => InvoiceField::Amount,
            InvoiceField::GstRate => InvoiceField::TransactionType,
        };
    }

    pub fn toggle_editing(&mut self) {
        match self.current_field {
            InvoiceField::Date => {
                self.editing = !self.editing;
                self.date_state.toggle_editing();
            }
            InvoiceField::InvoiceNo => {
                if !self.editing {
                    self.active_input = self.invoice_no.clone();
                } else {
                    self.invoice_no = self.active_input.clone();
                }
                self.editing = !self.editing;
            }
            InvoiceField::PartyName => {
                if !self.editing {
                    self.active_input = self.party_name.clone();
                } else {
                    self.party_name = self.active_input.clone();
                }
                self.editing = !self.editing;
            }
            InvoiceField::Amount => {
                if !self.editing {
                    self.active_input = self.amount_input.clone();
                } else {
                    self.amount_input = self.active_input.clone();
                }
                self.editing = !self.editing;
            }
            // Choice fields are cycled with Left/Right, never free-edited
            InvoiceField::TransactionType | InvoiceField::GstRate => {}
        }
    }

    pub fn cancel_editing(&mut self) {
        if self.current_field == InvoiceField::Date {
            self.date_state.editing = false;
        }
        self.editing = false;
        self.active_input.clear();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            InvoiceField::Date => {
                self.date_state.handle_input(key);
            }
            InvoiceField::Amount => match key {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                    self.active_input.push(c);
                }
                KeyCode::Backspace => {
                    self.active_input.pop();
                }
                _ => {}
            },
            InvoiceField::InvoiceNo | InvoiceField::PartyName => match key {
                KeyCode::Char(c) => {
                    self.active_input.push(c);
                }
                KeyCode::Backspace => {
                    self.active_input.pop();
                }
                _ => {}
            },
            InvoiceField::TransactionType | InvoiceField::GstRate => {}
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        match self.current_field {
            InvoiceField::TransactionType => {
                self.transaction_type = self.transaction_type.toggled();
            }
            InvoiceField::GstRate => {
                self.gst_rate = if forward {
                    self.gst_rate.next()
                } else {
                    self.gst_rate.previous()
                };
            }
            _ => {}
        }
    }

    /// Assemble the typed draft for submission. An unparseable amount is the
    /// only screen-level failure; everything else is validated by the draft.
    pub fn to_draft(&self) -> Result<InvoiceDraft, String> {
        let amount = if self.amount_input.is_empty() {
            0.0
        } else {
            self.amount_input
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a valid amount", self.amount_input))?
        };

        Ok(InvoiceDraft {
            invoice_no: self.invoice_no.clone(),
            date: self.date_state.date,
            party_name: self.party_name.clone(),
            amount,
            transaction_type: self.transaction_type,
            gst_rate: self.gst_rate,
        })
    }

    pub fn note_success(&mut self, message: String) {
        self.feedback = Some(Feedback::Success(message));
    }

    pub fn note_error(&mut self, message: String) {
        self.feedback = Some(Feedback::Error(message));
    }

    fn field_value(&self, field: InvoiceField) -> String {
        if self.editing && self.current_field == field && field != InvoiceField::Date {
            return format!("{}|", self.active_input);
        }

        match field {
            InvoiceField::InvoiceNo => self.invoice_no.clone(),
            InvoiceField::Date => self.date_state.display_string(),
            InvoiceField::PartyName => self.party_name.clone(),
            InvoiceField::Amount => self.amount_input.clone(),
            InvoiceField::TransactionType => self.transaction_type.label().to_string(),
            InvoiceField::GstRate => self.gst_rate.to_string(),
        }
    }
}

pub enum InvoiceManagerAction {
    Back,
    Submit(InvoiceDraft),
}

pub fn render_invoice_manager<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut InvoiceManagerState,
    ledger: &Ledger,
    config: &Config,
) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    // Form on the left, recent invoices on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(chunks[0]);

    render_form(frame, state, columns[0]);
    render_recent_invoices(frame, ledger, config, columns[1]);

    // Create and render the buttons
    let buttons_text = if state.editing {
        "<Enter> Save field | <Esc> Cancel editing"
    } else {
        "<Up/Down> Field | <Enter> Edit | <Left/Right> Cycle choice | <S> Add Invoice | <Esc> Back"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[1]);
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &mut InvoiceManagerState, area: Rect) {
    let block = Block::default().title("Add New Invoice").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Invoice Number
            Constraint::Length(3), // Invoice Date
            Constraint::Length(3), // Party Name
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Transaction Type
            Constraint::Length(3), // GST Rate
            Constraint::Min(1),    // Feedback
        ].as_ref())
        .split(inner);

    let rate_label = match state.transaction_type {
        TransactionType::IntraState => "GST Rate: ",
        TransactionType::InterState => "IGST Rate: ",
    };

    let fields = [
        (InvoiceField::InvoiceNo, "Invoice Number: "),
        (InvoiceField::Date, "Invoice Date: "),
        (InvoiceField::PartyName, "Party Name: "),
        (InvoiceField::Amount, "Amount (pre-tax): "),
        (InvoiceField::TransactionType, "Transaction Type: "),
        (InvoiceField::GstRate, rate_label),
    ];

    for (i, (field, label)) in fields.iter().enumerate() {
        let label_style = if state.current_field == *field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(Spans::from(vec![
            Span::styled(*label, label_style),
            Span::raw(state.field_value(*field)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, form_chunks[i]);
    }

    // Feedback from the last submit attempt
    if let Some(feedback) = &state.feedback {
        let (text, color) = match feedback {
            Feedback::Success(message) => (message.as_str(), Color::Green),
            Feedback::Error(message) => (message.as_str(), Color::Red),
        };
        let paragraph = Paragraph::new(text).style(Style::default().fg(color));
        frame.render_widget(paragraph, form_chunks[6]);
    }
}

fn render_recent_invoices<B: Backend>(
    frame: &mut Frame<B>,
    ledger: &Ledger,
    config: &Config,
    area: Rect,
) {
    if ledger.is_empty() {
        let placeholder = Paragraph::new("No invoices added yet")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("Recent Invoices").borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    // Define the header cells
    let header_cells = ["No", "Date", "Party", "Type", "Rate", "Amount", "Tax", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells)
        .style(Style::default())
        .height(1)
        .bottom_margin(1);

    let rows = ledger.all().iter().map(|record| {
        let cells = vec![
            Cell::from(record.invoice_no.clone()),
            Cell::from(record.date.format("%Y-%m-%d").to_string()),
            Cell::from(record.party_name.clone()),
            Cell::from(record.transaction_type.label()),
            Cell::from(record.gst_rate.to_string()),
            Cell::from(config.money(record.amount)),
            Cell::from(config.money(record.tax())),
            Cell::from(config.money(record.total)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Recent Invoices").borders(Borders::ALL))
        .widths(&[
            Constraint::Percentage(10),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
            Constraint::Percentage(13),
            Constraint::Percentage(8),
            Constraint::Percentage(13),
            Constraint::Percentage(11),
            Constraint::Percentage(13),
        ]);

    frame.render_widget(table, area);
}

pub fn handle_input(state: &mut InvoiceManagerState) -> Result<Option<InvoiceManagerAction>> {
    if let Event::Key(key) = event::read()? {
        if state.editing {
            match key.code {
                KeyCode::Enter => {
                    state.toggle_editing();
                }
                KeyCode::Esc => {
                    state.cancel_editing();
                }
                other => {
                    state.edit_current_field(other);
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(InvoiceManagerAction::Back));
            }
            KeyCode::Char('s') => {
                match state.to_draft() {
                    Ok(draft) => return Ok(Some(InvoiceManagerAction::Submit(draft))),
                    Err(message) => state.note_error(message),
                }
            }
            KeyCode::Enter => {
                state.toggle_editing();
            }
            KeyCode::Left => {
                state.cycle_choice(false);
            }
            KeyCode::Right => {
                state.cycle_choice(true);
            }
            KeyCode::Down => {
                state.next_field();
            }
            KeyCode::Up => {
                state.previous_field();
            }
            _ => {}
        }
    }
    Ok(None)
}
