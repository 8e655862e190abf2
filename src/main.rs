mod config;
mod gst;
mod ledger;
mod models;
mod reference;
mod report;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::ledger::Ledger;
use crate::report::Report;
use crate::ui::{
    calculator::{CalculatorAction, CalculatorState, handle_input as handle_calculator_input, render_calculator},
    compliance::{ComplianceAction, ComplianceState, handle_input as handle_compliance_input, render_compliance},
    invoice_manager::{InvoiceManagerAction, InvoiceManagerState, handle_input as handle_invoice_manager_input, render_invoice_manager},
    menu::{MenuAction, MenuEntry, MenuState, handle_input as handle_menu_input, render_menu},
    reports::{ReportsAction, ReportsState, handle_input as handle_reports_input, render_reports},
};

#[derive(Parser)]
#[command(name = "gst_manager", about = "GST invoice entry and tax reporting")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a one-shot GST split without starting the UI
    Calc {
        /// Pre-tax amount
        amount: f64,
        /// GST rate in percent, 0 to 28
        rate: f64,
        /// Charge the full rate as IGST instead of the CGST/SGST split
        #[arg(long)]
        inter_state: bool,
    },
}

// Represents the current screen in the app
enum AppScreen {
    Menu,
    InvoiceManager,
    Calculator,
    Reports,
    Compliance,
}

// Main application state
struct AppState {
    config: config::Config,
    ledger: Ledger,
    screen: AppScreen,
    menu_state: MenuState,
    invoice_manager_state: Option<InvoiceManagerState>,
    calculator_state: Option<CalculatorState>,
    reports_state: Option<ReportsState>,
    compliance_state: Option<ComplianceState>,
}

impl AppState {
    fn new(config: config::Config) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            screen: AppScreen::Menu,
            menu_state: MenuState::new(),
            invoice_manager_state: None,
            calculator_state: None,
            reports_state: None,
            compliance_state: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?;
    init_tracing(&config)?;

    // Headless calculator for scripting; never touches the terminal UI
    if let Some(Command::Calc { amount, rate, inter_state }) = cli.command {
        run_calc(&config, amount, rate, inter_state);
        return Ok(());
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state; the ledger lives here for the whole session
    let mut app_state = AppState::new(config);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        println!("Error: {}", err);
    }

    Ok(())
}

/// Send tracing output to the configured log file. Logging stays off when no
/// file is configured so it cannot write over the terminal UI.
fn init_tracing(config: &config::Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run_calc(config: &config::Config, amount: f64, rate: f64, inter_state: bool) {
    if inter_state {
        let igst = gst::calculate_gst(amount, rate);
        println!("Base Amount: {}", config.money(amount));
        println!("IGST: {}", config.money(igst));
        println!("Total Amount: {}", config.money(amount + igst));
    } else {
        let split = gst::intra_state_split(amount, rate);
        println!("Base Amount: {}", config.money(amount));
        println!("CGST: {}", config.money(split.cgst));
        println!("SGST: {}", config.money(split.sgst));
        println!("Total Amount: {}", config.money(split.total));
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| {
            match app_state.screen {
                AppScreen::Menu => {
                    render_menu(f, &mut app_state.menu_state, app_state.ledger.len());
                }
                AppScreen::InvoiceManager => {
                    if let Some(state) = &mut app_state.invoice_manager_state {
                        render_invoice_manager(f, state, &app_state.ledger, &app_state.config);
                    }
                }
                AppScreen::Calculator => {
                    if let Some(state) = &mut app_state.calculator_state {
                        render_calculator(f, state, &app_state.config);
                    }
                }
                AppScreen::Reports => {
                    if let Some(state) = &mut app_state.reports_state {
                        render_reports(f, state, &app_state.config);
                    }
                }
                AppScreen::Compliance => {
                    if let Some(state) = &mut app_state.compliance_state {
                        render_compliance(f, state);
                    }
                }
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Menu => handle_menu_screen(app_state)?,
            AppScreen::InvoiceManager => handle_invoice_manager_screen(app_state)?,
            AppScreen::Calculator => handle_calculator_screen(app_state)?,
            AppScreen::Reports => handle_reports_screen(app_state)?,
            AppScreen::Compliance => handle_compliance_screen(app_state)?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_menu_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_menu_input(&mut app_state.menu_state)? {
        Some(MenuAction::Exit) => {
            return Ok(true);
        }
        Some(MenuAction::Open(entry)) => match entry {
            MenuEntry::InvoiceManager => {
                app_state.invoice_manager_state = Some(InvoiceManagerState::new());
                app_state.screen = AppScreen::InvoiceManager;
            }
            MenuEntry::Calculator => {
                app_state.calculator_state = Some(CalculatorState::new());
                app_state.screen = AppScreen::Calculator;
            }
            MenuEntry::Reports => {
                // Build the report once from the current ledger contents;
                // None carries the "no data" path to the screen
                let report = Report::build(app_state.ledger.all());
                app_state.reports_state = Some(ReportsState::new(report));
                app_state.screen = AppScreen::Reports;
            }
            MenuEntry::Compliance => {
                app_state.compliance_state = Some(ComplianceState::new());
                app_state.screen = AppScreen::Compliance;
            }
        },
        None => {}
    }

    Ok(false)
}

fn handle_invoice_manager_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.invoice_manager_state {
        match handle_invoice_manager_input(state)? {
            Some(InvoiceManagerAction::Back) => {
                app_state.screen = AppScreen::Menu;
            }
            Some(InvoiceManagerAction::Submit(draft)) => {
                // Validate at the boundary, then append; the record is
                // immutable from here on
                match draft.build() {
                    Ok(record) => {
                        app_state.ledger.append(record);
                        state.note_success("Invoice added successfully!".to_string());
                    }
                    Err(err) => {
                        state.note_error(err.to_string());
                    }
                }
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_calculator_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.calculator_state {
        match handle_calculator_input(state)? {
            Some(CalculatorAction::Back) => {
                app_state.screen = AppScreen::Menu;
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_reports_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.reports_state {
        match handle_reports_input(state)? {
            Some(ReportsAction::Back) => {
                app_state.screen = AppScreen::Menu;
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_compliance_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.compliance_state {
        match handle_compliance_input(state)? {
            Some(ComplianceAction::Back) => {
                app_state.screen = AppScreen::Menu;
            }
            None => {}
        }
    }

    Ok(false)
}
