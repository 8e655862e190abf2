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

/// The four functions of the app, picked from the entry screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEntry {
    InvoiceManager,
    Calculator,
    Reports,
    Compliance,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::InvoiceManager,
        MenuEntry::Calculator,
        MenuEntry::Reports,
        MenuEntry::Compliance,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuEntry::InvoiceManager => "Invoice Manager",
            MenuEntry::Calculator => "Tax Calculator",
            MenuEntry::Reports => "Reports & Analytics",
            MenuEntry::Compliance => "Compliance Calendar",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            MenuEntry::InvoiceManager => "Record invoices and review the ledger",
            MenuEntry::Calculator => "One-off CGST/SGST split, no ledger entry",
            MenuEntry::Reports => "Monthly tax liability and rate distribution",
            MenuEntry::Compliance => "Filing deadlines and the monthly checklist",
        }
    }
}

// Represents the state of the function selection screen
pub struct MenuState {
    list_state: ListState,
}

impl MenuState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) if i >= MenuEntry::ALL.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(0) | None => MenuEntry::ALL.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_entry(&self) -> Option<MenuEntry> {
        self.list_state.selected().map(|i| MenuEntry::ALL[i])
    }
}

pub enum MenuAction {
    Exit,
    Open(MenuEntry),
}

pub fn render_menu<B: Backend>(frame: &mut Frame<B>, state: &mut MenuState, invoice_count: usize) {
    let size = frame.size();

    // Create the layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    let title = Paragraph::new("GST Manager")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    // Create and render the function list
    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| {
            ListItem::new(Spans::from(vec![
                Span::styled(entry.label(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  -  "),
                Span::styled(entry.description(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let menu_list = List::new(items)
        .block(Block::default().title("Choose a function").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(menu_list, chunks[1], &mut state.list_state);

    // Create and render the buttons
    let buttons_text = format!(
        "<Enter> Open | <Esc> Quit | {} invoice(s) this session",
        invoice_count
    );
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[2]);
}

pub fn handle_input(state: &mut MenuState) -> Result<Option<MenuAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(MenuAction::Exit));
            }
            KeyCode::Down => {
                state.next();
            }
            KeyCode::Up => {
                state.previous();
            }
            KeyCode::Enter => {
                if let Some(entry) = state.selected_entry() {
                    return Ok(Some(MenuAction::Open(entry)));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}
