use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

use techmania_registration::admin::{filtered_sorted, stats, EventStats};
use techmania_registration::export::{suggested_filename, to_csv};
use techmania_registration::pricing::EventType;
use techmania_registration::registration::Registration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Registrations,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Registrations,
            Page::Registrations => Page::Dashboard,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Registrations => "Registrations",
        }
    }
}

pub struct App {
    pub registrations: Vec<Registration>,
    pub filtered: Vec<Registration>,
    pub state: TableState,
    pub current_page: Page,
    pub filter: Option<EventType>,
    pub show_detail: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(registrations: Vec<Registration>) -> Self {
        let filtered = filtered_sorted(&registrations, None);

        let mut state = TableState::default();
        if !filtered.is_empty() {
            state.select(Some(0));
        }

        Self {
            registrations,
            filtered,
            state,
            current_page: Page::Registrations,
            filter: None,
            show_detail: false,
            status_message: None,
        }
    }

    pub fn stats(&self) -> EventStats {
        stats(&self.registrations)
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_registration(&self) -> Option<&Registration> {
        self.state.selected().and_then(|i| self.filtered.get(i))
    }

    pub fn apply_filter(&mut self, filter: Option<EventType>) {
        self.filter = filter;
        self.filtered = filtered_sorted(&self.registrations, filter);

        // Reset selection to first item
        if !self.filtered.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(None);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn next(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                let next = i + 20;
                if next >= len {
                    len - 1
                } else {
                    next
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i < 20 {
                    0
                } else {
                    i - 20
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Write the CSV export next to the binary, insertion order.
    pub fn export_csv_file(&mut self) {
        let filename = suggested_filename(chrono::Local::now().date_naive());

        match to_csv(&self.registrations) {
            Ok(csv) => match std::fs::write(&filename, csv) {
                Ok(()) => {
                    self.status_message = Some(format!("Exported {}", filename));
                }
                Err(err) => {
                    self.status_message = Some(format!("Export failed: {}", err));
                }
            },
            Err(err) => {
                self.status_message = Some(format!("Export failed: {}", err));
            }
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                // Two pages, so forward and back are the same hop
                KeyCode::Tab | KeyCode::BackTab => app.next_page(),
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::Registrations;
                }
                KeyCode::Char('e') => app.export_csv_file(),
                KeyCode::Char('1') if app.current_page == Page::Dashboard => {
                    app.apply_filter(None);
                    app.current_page = Page::Registrations;
                }
                KeyCode::Char('2') if app.current_page == Page::Dashboard => {
                    app.apply_filter(Some(EventType::Hackathon));
                    app.current_page = Page::Registrations;
                }
                KeyCode::Char('3') if app.current_page == Page::Dashboard => {
                    app.apply_filter(Some(EventType::Coding));
                    app.current_page = Page::Registrations;
                }
                KeyCode::Char('4') if app.current_page == Page::Dashboard => {
                    app.apply_filter(Some(EventType::Combo));
                    app.current_page = Page::Registrations;
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(app.filtered.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    // Content area with optional split for detail panel
    if app.show_detail && app.current_page == Page::Registrations {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Registrations list
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Dashboard => render_dashboard(f, chunks[1], app),
            Page::Registrations => render_table(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn event_color(event_type: EventType) -> Color {
    match event_type {
        EventType::Hackathon => Color::Blue,
        EventType::Coding => Color::Green,
        EventType::Combo => Color::Magenta,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let pages = [Page::Dashboard, Page::Registrations];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total: {}", stats.total),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("H {}", stats.hackathon),
        Style::default().fg(Color::Blue),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("C {}", stats.coding),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Cb {}", stats.combo),
        Style::default().fg(Color::Magenta),
    ));

    let header_text = vec![Line::from(tab_spans)];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" TechMania 2025 - Admin "),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = [
        "Team Name", "Event", "Size", "Team Lead", "Mobile", "Transaction ID", "Fee", "Date",
    ]
    .iter()
    .map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered.iter().map(|reg| {
        let color = event_color(reg.event_type);

        let cells = vec![
            Cell::from(truncate(&reg.team_name, 22)),
            Cell::from(reg.event_type.label()).style(Style::default().fg(color)),
            Cell::from(format!("{}", reg.team_size)),
            Cell::from(truncate(&reg.team_lead, 20)),
            Cell::from(reg.mobile.clone()),
            Cell::from(truncate(&reg.transaction_id, 16)),
            Cell::from(format!("₹{}", reg.registration_fee)),
            Cell::from(reg.display_date()),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Registrations "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    if let Some(reg) = app.selected_registration() {
        lines.push(Line::from(vec![
            Span::styled("  Team: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                reg.team_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Event: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                reg.event_type.label(),
                Style::default().fg(event_color(reg.event_type)),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Fee: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("₹{}", reg.registration_fee)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Mobile: ", Style::default().fg(Color::DarkGray)),
            Span::raw(reg.mobile.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Transaction: ", Style::default().fg(Color::DarkGray)),
            Span::raw(reg.transaction_id.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Registered: ", Style::default().fg(Color::DarkGray)),
            Span::raw(reg.display_date()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Members ({}):", reg.team_size),
            Style::default().fg(Color::Cyan),
        )));
        for (i, member) in reg.team_members.iter().enumerate() {
            let marker = if i == 0 { " (lead)" } else { "" };
            lines.push(Line::from(format!("    {}. {}{}", i + 1, member, marker)));
        }
    } else {
        lines.push(Line::from("  No registration selected"));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );

    f.render_widget(panel, area);
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let view_line = |key: &'static str,
                     label: &'static str,
                     count: usize,
                     color: Color,
                     active: bool| {
        Line::from(vec![
            Span::raw("  ║ "),
            if active {
                Span::styled(
                    "→",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(" ")
            },
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(format!(". {:<24}", label)),
            Span::styled(format!("{:>5} teams", count), Style::default().fg(color)),
            Span::raw("       ║"),
        ])
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Registrations by Event",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  ╔══════════════════════════════════════════════╗"),
        view_line("1", "All Registrations", stats.total, Color::White, app.filter.is_none()),
        Line::from("  ╠══════════════════════════════════════════════╣"),
        view_line(
            "2",
            "Hackathon",
            stats.hackathon,
            Color::Blue,
            app.filter == Some(EventType::Hackathon),
        ),
        view_line(
            "3",
            "Coding",
            stats.coding,
            Color::Green,
            app.filter == Some(EventType::Coding),
        ),
        view_line(
            "4",
            "Combo (Hackathon + Coding)",
            stats.combo,
            Color::Magenta,
            app.filter == Some(EventType::Combo),
        ),
        Line::from("  ╚══════════════════════════════════════════════╝"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press a number to open the filtered table, e to export CSV",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let dashboard = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Dashboard "),
    );

    f.render_widget(dashboard, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(filter) = app.filter {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", filter.label()),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    if let Some(message) = &app.status_message {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Magenta),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("e", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Export | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
