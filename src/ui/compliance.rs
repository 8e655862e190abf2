use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::reference::{CHECKLIST, DEADLINES};

// Represents the state of the compliance calendar screen. Tick marks are
// screen-local and reset when the screen is left; nothing is persisted.
pub struct ComplianceState {
    checked: [bool; CHECKLIST.len()],
    list_state: ListState,
}

impl ComplianceState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            checked: [false; CHECKLIST.len()],
            list_state,
        }
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) if i >= CHECKLIST.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(0) | None => CHECKLIST.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.checked[i] = !self.checked[i];
        }
    }
}

pub enum ComplianceAction {
    Back,
}

pub fn render_compliance<B: Backend>(frame: &mut Frame<B>, state: &mut ComplianceState) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DEADLINES.len() as u16 + 2),
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    // Deadlines table, one return per line
    let deadline_lines: Vec<Spans> = DEADLINES
        .iter()
        .map(|(return_type, deadline)| {
            Spans::from(vec![
                Span::styled(
                    format!("{return_type}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(*deadline),
            ])
        })
        .collect();

    let deadlines = Paragraph::new(deadline_lines)
        .block(Block::default().title("Important Deadlines").borders(Borders::ALL));
    frame.render_widget(deadlines, chunks[0]);

    // Checklist with toggleable tick marks
    let items: Vec<ListItem> = CHECKLIST
        .iter()
        .zip(state.checked)
        .map(|(task, done)| {
            let mark = if done { "[x] " } else { "[ ] " };
            let style = if done {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Spans::from(vec![
                Span::styled(mark, style),
                Span::styled(*task, style),
            ]))
        })
        .collect();

    let checklist = List::new(items)
        .block(Block::default().title("Monthly Compliance Checklist").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(checklist, chunks[1], &mut state.list_state);

    let buttons = Paragraph::new("<Up/Down> Navigate | <Space> Toggle | <Esc> Back")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[2]);
}

pub fn handle_input(state: &mut ComplianceState) -> Result<Option<ComplianceAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(ComplianceAction::Back));
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                state.toggle_selected();
            }
            KeyCode::Down => {
                state.next();
            }
            KeyCode::Up => {
                state.previous();
            }
            _ => {}
        }
    }
    Ok(None)
}
