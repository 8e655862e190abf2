use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{BarChart, Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::config::Config;
use crate::report::Report;

// Represents the state of the reports screen. The report is computed once
// when the screen is opened; the ledger cannot change while we are on it.
pub struct ReportsState {
    report: Option<Report>,
}

impl ReportsState {
    pub fn new(report: Option<Report>) -> Self {
        Self { report }
    }
}

pub enum ReportsAction {
    Back,
}

pub fn render_reports<B: Backend>(frame: &mut Frame<B>, state: &mut ReportsState, config: &Config) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    match &state.report {
        Some(report) => render_report(frame, chunks[0], config, report),
        None => {
            // Empty ledger: never aggregate, just say so
            let info = Paragraph::new("No data available for analysis. Please add some invoices first.")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title("Reports & Analytics").borders(Borders::ALL));
            frame.render_widget(info, chunks[0]);
        }
    }

    let buttons = Paragraph::new("<Esc> Back")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);
}

fn render_report<B: Backend>(frame: &mut Frame<B>, area: Rect, config: &Config, report: &Report) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Summary metrics
            Constraint::Length(10), // Monthly bar chart
            Constraint::Min(8),     // Breakdown table + rate distribution
        ].as_ref())
        .split(area);

    render_summary_metrics(frame, chunks[0], config, report);
    render_monthly_chart(frame, chunks[1], report);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(chunks[2]);

    render_monthly_table(frame, bottom[0], config, report);
    render_rate_distribution(frame, bottom[1], report);
}

fn render_summary_metrics<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    config: &Config,
    report: &Report,
) {
    let metric_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ].as_ref())
        .split(area);

    let metrics = [
        ("Total Transactions", report.transaction_count.to_string()),
        ("Total Tax Collected", config.money(report.total_tax)),
        ("Average Transaction Value", config.money(report.average_amount)),
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

fn render_monthly_chart<B: Backend>(frame: &mut Frame<B>, area: Rect, report: &Report) {
    // Whole-currency bars; exact figures live in the table below
    let data: Vec<(&str, u64)> = report
        .monthly
        .iter()
        .map(|(month, sums)| (month.as_str(), sums.total().round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title("Monthly Tax Liability").borders(Borders::ALL))
        .data(&data)
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    frame.render_widget(chart, area);
}

fn render_monthly_table<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    config: &Config,
    report: &Report,
) {
    let header_cells = ["Month", "CGST", "SGST", "IGST", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells)
        .style(Style::default())
        .height(1)
        .bottom_margin(1);

    let rows = report.monthly.iter().map(|(month, sums)| {
        let cells = vec![
            Cell::from(month.clone()),
            Cell::from(config.money(sums.cgst)),
            Cell::from(config.money(sums.sgst)),
            Cell::from(config.money(sums.igst)),
            Cell::from(config.money(sums.total())),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Monthly GST Breakdown").borders(Borders::ALL))
        .widths(&[
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ]);

    frame.render_widget(table, area);
}

fn render_rate_distribution<B: Backend>(frame: &mut Frame<B>, area: Rect, report: &Report) {
    let total = report.transaction_count.max(1);

    let items: Vec<ListItem> = report
        .rate_distribution
        .iter()
        .map(|(rate, count)| {
            let share = 100.0 * *count as f64 / total as f64;
            ListItem::new(Spans::from(vec![
                Span::styled(format!("{:>4}", rate.to_string()), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {count} transaction(s)  ")),
                Span::styled(format!("{share:.1}%"), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Transactions by GST Rate").borders(Borders::ALL));

    frame.render_widget(list, area);
}

pub fn handle_input(_state: &mut ReportsState) -> Result<Option<ReportsAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(Some(ReportsAction::Back));
            }
            _ => {}
        }
    }
    Ok(None)
}
