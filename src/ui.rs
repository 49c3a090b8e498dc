use anyhow::Result;
use arena_ledger::record::Project;
use arena_ledger::report;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Projects,
    Summary,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Projects => Page::Summary,
            Page::Summary => Page::Projects,
        }
    }

    pub fn previous(&self) -> Self {
        // two pages, so backwards is the same hop
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Projects => "Projects",
            Page::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterType {
    All,
    ByState(String),
    ByCategory(String),
}

pub struct App {
    pub projects: Vec<Project>,
    pub filtered_projects: Vec<Project>,
    pub state: TableState,
    pub summary_state: TableState,
    pub current_page: Page,
    pub active_filter: FilterType,
    pub show_detail: bool,
}

impl App {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut state = TableState::default();
        if !projects.is_empty() {
            state.select(Some(0));
        }

        let mut summary_state = TableState::default();
        summary_state.select(Some(0));

        let filtered_projects = projects.clone();

        Self {
            projects,
            filtered_projects,
            state,
            summary_state,
            current_page: Page::Projects,
            active_filter: FilterType::All,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.state
            .selected()
            .and_then(|i| self.filtered_projects.get(i))
    }

    pub fn apply_filter(&mut self, filter: FilterType) {
        self.filtered_projects = match &filter {
            FilterType::All => self.projects.clone(),
            FilterType::ByState(state) => {
                let wanted = state.to_lowercase();
                self.projects
                    .iter()
                    .filter(|p| p.state.to_lowercase() == wanted)
                    .cloned()
                    .collect()
            }
            FilterType::ByCategory(category) => {
                let wanted = category.to_lowercase();
                self.projects
                    .iter()
                    .filter(|p| p.category.to_lowercase() == wanted)
                    .cloned()
                    .collect()
            }
        };
        self.active_filter = filter;

        if self.filtered_projects.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterType::All);
    }

    /// Filter to the state of the highlighted project.
    pub fn filter_by_selected_state(&mut self) {
        if let Some(project) = self.selected_project() {
            let state = project.state.clone();
            self.apply_filter(FilterType::ByState(state));
        }
    }

    /// Filter to the category of the highlighted project.
    pub fn filter_by_selected_category(&mut self) {
        if let Some(project) = self.selected_project() {
            let category = project.category.clone();
            self.apply_filter(FilterType::ByCategory(category));
        }
    }

    pub fn next(&mut self) {
        if self.filtered_projects.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.filtered_projects.len() - 1 {
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
        if self.filtered_projects.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.filtered_projects.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        if self.filtered_projects.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 10).min(self.filtered_projects.len() - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(10),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn summary_next(&mut self) {
        let len = report::state_summary(&self.projects).len();
        if len == 0 {
            return;
        }
        let i = match self.summary_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.summary_state.select(Some(i));
    }

    pub fn summary_previous(&mut self) {
        let len = report::state_summary(&self.projects).len();
        if len == 0 {
            return;
        }
        let i = match self.summary_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.summary_state.select(Some(i));
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
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.current_page = app.current_page.next(),
                KeyCode::BackTab => app.current_page = app.current_page.previous(),
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::Projects;
                }
                KeyCode::Char('1') if app.current_page == Page::Projects => {
                    app.apply_filter(FilterType::All);
                }
                KeyCode::Char('2') if app.current_page == Page::Projects => {
                    app.filter_by_selected_state();
                }
                KeyCode::Char('3') if app.current_page == Page::Projects => {
                    app.filter_by_selected_category();
                }
                KeyCode::Down | KeyCode::Char('j') => match app.current_page {
                    Page::Summary => app.summary_next(),
                    _ => app.next(),
                },
                KeyCode::Up | KeyCode::Char('k') => match app.current_page {
                    Page::Summary => app.summary_previous(),
                    _ => app.previous(),
                },
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.filtered_projects.is_empty() {
                        app.state.select(Some(app.filtered_projects.len() - 1));
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

    // Header with page navigation
    render_header(f, chunks[0], app);

    // Content area with optional split for detail panel
    if app.show_detail && app.current_page == Page::Projects {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Project list
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_projects_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Projects => render_projects_table(f, chunks[1], app),
            Page::Summary => render_summary(f, chunks[1], app),
        }
    }

    // Status bar
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Projects, Page::Summary];

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
        format!("Projects: {}", app.projects.len()),
        Style::default().fg(Color::White),
    ));

    let total_funding: f64 = app
        .projects
        .iter()
        .filter_map(|p| p.funding_value())
        .sum();
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Funding: ${:.2}m", total_funding),
        Style::default().fg(Color::Green),
    ));

    let header_text = vec![Line::from(tab_spans)];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_projects_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Category", "State", "Funding", "Year", "CO2 Output"]
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

    let rows = app.filtered_projects.iter().map(|project| {
        let name_color = if project.is_biomethane() {
            Color::Cyan
        } else {
            Color::White
        };

        let year = match project.start_year() {
            Some(year) => year.to_string(),
            None => "Unknown".to_string(),
        };

        let cells = vec![
            Cell::from(truncate(&project.name, 28)).style(Style::default().fg(name_color)),
            Cell::from(truncate(&project.category, 16)),
            Cell::from(truncate(&project.state, 20)),
            Cell::from(project.funding.clone()).style(Style::default().fg(Color::Green)),
            Cell::from(year),
            Cell::from(project.co2_output().unwrap_or("").to_string()),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(18),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Projects "),
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
    let lines = match app.selected_project() {
        Some(project) => {
            let mut lines = vec![
                Line::from(""),
                detail_line("Name", &project.name),
                detail_line("Category", &project.category),
                detail_line("State", &project.state),
                detail_line("Location", &project.location),
                detail_line("Funding", &project.funding),
                detail_line("Total Cost", &project.total_cost),
                detail_line("Period", &project.period),
            ];
            if project.is_biomethane() {
                lines.push(detail_line(
                    "CO2 Output",
                    project.co2_output().unwrap_or("unknown"),
                ));
            }
            lines
        }
        None => vec![Line::from(""), Line::from("  No project selected")],
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );

    f.render_widget(panel, area);
}

fn detail_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", label),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(value.to_string()),
    ])
}

fn render_summary(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_group_table(
        f,
        chunks[0],
        " Projects by State ",
        "State",
        report::state_summary(&app.projects),
        &mut app.summary_state,
    );

    let mut category_state = TableState::default();
    render_group_table(
        f,
        chunks[1],
        " Projects by Category ",
        "Category",
        report::category_summary(&app.projects),
        &mut category_state,
    );

    render_year_table(f, chunks[2], app);
}

fn render_group_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    group_label: &str,
    summary: Vec<(String, usize, f64)>,
    state: &mut TableState,
) {
    // group_label is not 'static, so the array must outlive the map
    let labels = [group_label, "Projects", "Funding"];
    let header_cells = labels.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = summary.into_iter().map(|(group, count, funding)| {
        let cells = vec![
            Cell::from(group),
            Cell::from(format!("{}", count)),
            Cell::from(format!("${:.2}m", funding)).style(Style::default().fg(Color::Green)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string()),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_year_table(f: &mut Frame, area: Rect, app: &App) {
    let by_year = report::funding_by_year(&app.projects);

    let header_cells = ["Year Started", "Funding"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = by_year.into_iter().map(|(year, funding)| {
        let cells = vec![
            Cell::from(year.to_string()),
            Cell::from(format!("${:.2}m", funding)).style(Style::default().fg(Color::Green)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Funding by Year "),
        );

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered_projects.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    // Show filter status if active
    if app.active_filter != FilterType::All {
        let filter_name = match &app.active_filter {
            FilterType::ByState(state) => format!("State: {}", state),
            FilterType::ByCategory(category) => format!("Category: {}", category),
            FilterType::All => String::new(),
        };
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", filter_name),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("2/3", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Filter state/category | "));
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
    if s.len() <= max_len {
        return s.to_string();
    }
    // the cut may land inside a multibyte char; back up to a boundary
    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn solar_demo() -> Project {
        Project::new(
            "Solar Demo".to_string(),
            "Solar".to_string(),
            "New South Wales".to_string(),
            "Sydney, NSW".to_string(),
            "$2.25m".to_string(),
            "$5.55m".to_string(),
            "01/01/2023 – 31/12/2024".to_string(),
        )
    }

    fn biogas_future() -> Project {
        Project::biomethane(
            "BioGas Future".to_string(),
            "Biomethane".to_string(),
            "Victoria".to_string(),
            "Melbourne, VIC".to_string(),
            "$2.09m".to_string(),
            "$4.58m".to_string(),
            "01/06/2022 – 30/06/2025".to_string(),
            Some("1500t".to_string()),
        )
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Solar Demo", 28), "Solar Demo");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let cut = truncate("Metropolitan Renewable Energy Precinct", 28);
        assert_eq!(cut, "Metropolitan Renewable En...");
        assert_eq!(cut.len(), 28);
    }

    #[test]
    fn test_truncate_multibyte_name_stays_on_char_boundary() {
        // ten 4-byte chars, so a plain byte cut at 25 would split one
        let name = "🌱".repeat(10);
        assert_eq!(truncate(&name, 28), format!("{}...", "🌱".repeat(6)));
    }

    #[test]
    fn test_summary_page_draws_group_tables() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(vec![solar_demo(), biogas_future()]);
        app.current_page = Page::Summary;

        terminal.draw(|f| ui(f, &mut app)).unwrap();
    }

    #[test]
    fn test_projects_page_draws_multibyte_names() {
        let mut project = solar_demo();
        project.name = format!("Solar Demo {}", "🌱".repeat(10));

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(vec![project, biogas_future()]);
        app.show_detail = true;

        terminal.draw(|f| ui(f, &mut app)).unwrap();
    }
}
