use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use loan_monitor::{
    aggregate_one, format_crore, format_inr, format_inr_signed, AggregationBucket, BehavioralScore,
    ComplianceLevel, Customer, Dataset, Direction, MethodTotals, PaymentMethod, RiskLevel, Transaction,
    UtilizationRate,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset as ChartDataset, GraphType, Paragraph, Row,
        Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Utilization,
    Compliance,
    Monitoring,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Overview, Page::Utilization, Page::Compliance, Page::Monitoring];

    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Utilization,
            Page::Utilization => Page::Compliance,
            Page::Compliance => Page::Monitoring,
            Page::Monitoring => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::Monitoring,
            Page::Utilization => Page::Overview,
            Page::Compliance => Page::Utilization,
            Page::Monitoring => Page::Compliance,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Overview => "Overview",
            Page::Utilization => "Utilization Patterns",
            Page::Compliance => "Compliance Analysis",
            Page::Monitoring => "Behavioral Monitoring",
        }
    }
}

pub struct App {
    pub dataset: Dataset,
    pub current_page: Page,
    pub customer_state: TableState,
    pub show_detail: bool,
    pub monitoring_scroll: u16,
}

impl App {
    pub fn new(dataset: Dataset) -> Self {
        let mut customer_state = TableState::default();
        if !dataset.customers().is_empty() {
            customer_state.select(Some(0));
        }

        Self {
            dataset,
            current_page: Page::Overview,
            customer_state,
            show_detail: false,
            monitoring_scroll: 0,
        }
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        self.customer_state
            .selected()
            .and_then(|i| self.dataset.customers().get(i))
    }

    pub fn toggle_detail(&mut self) {
        if self.show_detail || self.selected_customer().is_some() {
            self.show_detail = !self.show_detail;
        }
    }

    pub fn next_page(&mut self) {
        self.show_detail = false;
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.show_detail = false;
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.dataset.customers().len();
        if len == 0 {
            return;
        }
        let i = match self.customer_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.customer_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.dataset.customers().len();
        if len == 0 {
            return;
        }
        let i = match self.customer_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.customer_state.select(Some(i));
    }

    /// Apply one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.show_detail {
                    self.show_detail = false;
                } else {
                    return true;
                }
            }
            KeyCode::Enter if self.current_page == Page::Compliance => self.toggle_detail(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.show_detail = false;
                self.current_page = Page::ALL[index];
            }
            KeyCode::Down | KeyCode::Char('j') => match self.current_page {
                Page::Compliance if !self.show_detail => self.next(),
                Page::Monitoring => self.monitoring_scroll = self.monitoring_scroll.saturating_add(1),
                _ => {}
            },
            KeyCode::Up | KeyCode::Char('k') => match self.current_page {
                Page::Compliance if !self.show_detail => self.previous(),
                Page::Monitoring => self.monitoring_scroll = self.monitoring_scroll.saturating_sub(1),
                _ => {}
            },
            KeyCode::Home => {
                self.monitoring_scroll = 0;
                if !self.dataset.customers().is_empty() {
                    self.customer_state.select(Some(0));
                }
            }
            _ => {}
        }
        false
    }
}

pub fn run_ui(app: &mut App, tick: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, tick);

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
    tick: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(tick)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            debug!(?key.code, page = app.current_page.title(), "key press");
            if app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Overview => render_overview(f, chunks[1], app),
        Page::Utilization => render_utilization(f, chunks[1], app),
        Page::Compliance if app.show_detail => render_customer_detail(f, chunks[1], app),
        Page::Compliance => render_compliance(f, chunks[1], app),
        Page::Monitoring => render_monitoring(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

// ============================================================================
// COLOURS
// ============================================================================

fn compliance_color(level: ComplianceLevel) -> Color {
    match level {
        ComplianceLevel::High => Color::Green,
        ComplianceLevel::Medium => Color::Yellow,
        ComplianceLevel::Low => Color::Red,
    }
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn behavior_color(score: BehavioralScore) -> Color {
    match score {
        BehavioralScore::Good => Color::Green,
        BehavioralScore::NeedsMonitoring => Color::Yellow,
        BehavioralScore::Critical => Color::Red,
    }
}

fn method_color(method: PaymentMethod) -> Color {
    match method {
        PaymentMethod::Cash => Color::LightRed,
        m if m.is_electronic() => Color::LightBlue,
        _ => Color::Magenta,
    }
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn label(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

// ============================================================================
// HEADER / STATUS
// ============================================================================

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        format!(" {} ", app.dataset.bank_name()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    tab_spans.push(Span::raw(" │ "));

    for (i, page) in Page::ALL.iter().enumerate() {
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

        tab_spans.push(Span::styled(format!("{} {}", i + 1, page.title()), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("⚠ {} alerts", app.dataset.total_alerts()),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Loan Monitoring Dashboard "),
    );

    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut status_spans = vec![
        Span::styled(
            format!(" {} ", app.current_page.title()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        key("Tab"),
        Span::raw(" Page | "),
        key("1-4"),
        Span::raw(" Jump | "),
    ];

    match app.current_page {
        Page::Compliance if app.show_detail => {
            status_spans.push(key("Enter/Esc"));
            status_spans.push(Span::raw(" Close | "));
        }
        Page::Compliance => {
            status_spans.push(key("↑/↓"));
            status_spans.push(Span::raw(" Select | "));
            status_spans.push(key("Enter"));
            status_spans.push(Span::raw(" Details | "));
        }
        Page::Monitoring => {
            status_spans.push(key("↑/↓"));
            status_spans.push(Span::raw(" Scroll | "));
        }
        _ => {}
    }

    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// OVERVIEW
// ============================================================================

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, note: String, color: Color) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", note),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title)),
    );

    f.render_widget(card, area);
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(chunks[0]);

    let portfolio = app.dataset.portfolio();
    let summary = app.dataset.loan_summary();

    render_card(
        f,
        cards[0],
        "Total Disbursement",
        format_inr(summary.total_disbursed),
        format!("{:+}% from last month", portfolio.disbursement_growth_pct),
        Color::Blue,
    );
    render_card(
        f,
        cards[1],
        "Utilization Rate",
        summary.rate_label(),
        "Average across all accounts".to_string(),
        Color::Green,
    );
    render_card(
        f,
        cards[2],
        "Risk Score",
        portfolio.overall_risk.to_string(),
        "Based on current patterns".to_string(),
        risk_color(portfolio.overall_risk),
    );
    render_card(
        f,
        cards[3],
        "Active Loan Accounts",
        portfolio.active_loan_accounts.to_string(),
        format!("+{} new this month", portfolio.new_accounts_this_month),
        Color::Magenta,
    );

    let analysis = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    // Aggregated on every render pass; the dataset is immutable
    let aggregations = app.dataset.aggregations();
    for (direction, area) in Direction::ALL.iter().zip(analysis.iter()) {
        render_method_totals(
            f,
            *area,
            &format!(" {} Transactions ", direction.title()),
            aggregations.direction(*direction),
        );
    }
}

fn render_method_totals(f: &mut Frame, area: Rect, title: &str, totals: &MethodTotals) {
    let rows = totals
        .iter()
        .map(|(method, bucket)| method_row(method, bucket))
        .chain(std::iter::once(total_row(totals.total())));

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(20),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["Method", "Total Amount", "Count"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string()),
    );

    f.render_widget(table, area);
}

fn method_row(method: PaymentMethod, bucket: AggregationBucket) -> Row<'static> {
    let color = method_color(method);
    Row::new(vec![
        Cell::from(format!("{} Transactions", method)).style(Style::default().fg(color)),
        Cell::from(format_inr(bucket.total_amount)).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Cell::from(bucket.count.to_string()),
    ])
}

fn total_row(bucket: AggregationBucket) -> Row<'static> {
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    Row::new(vec![
        Cell::from("Total").style(style),
        Cell::from(format_inr(bucket.total_amount)).style(style),
        Cell::from(bucket.count.to_string()).style(style),
    ])
}

// ============================================================================
// UTILIZATION PATTERNS
// ============================================================================

fn render_utilization(f: &mut Frame, area: Rect, app: &App) {
    let periods = app.dataset.loan_periods();

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(periods.len() as u16 + 4)])
        .split(area);

    let disbursed: Vec<(f64, f64)> = periods
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.disbursed_amount as f64))
        .collect();
    let utilized: Vec<(f64, f64)> = periods
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.utilized_amount as f64))
        .collect();

    let y_max = periods
        .iter()
        .map(|p| p.disbursed_amount.max(p.utilized_amount))
        .max()
        .unwrap_or(0)
        .max(1);
    // Headroom above the tallest point
    let y_top = y_max + y_max / 10;

    let x_labels: Vec<Span> = periods
        .iter()
        .map(|p| Span::styled(p.month.clone(), Style::default().fg(Color::Gray)))
        .collect();
    let y_labels: Vec<Span> = [0, y_top / 2, y_top]
        .iter()
        .map(|v| Span::styled(format_crore(*v), Style::default().fg(Color::Gray)))
        .collect();

    let datasets = vec![
        ChartDataset::default()
            .name("Disbursed Amount")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&disbursed),
        ChartDataset::default()
            .name("Utilized Amount")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&utilized),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Loan Disbursement vs Utilization "),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, periods.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, y_top as f64])
                .labels(y_labels),
        );

    f.render_widget(chart, chunks[0]);

    let rows = periods.iter().enumerate().map(|(i, p)| {
        let rate = UtilizationRate::from_amounts(p.utilized_amount, p.disbursed_amount)
            .map(|r| format!("{}%", r))
            .unwrap_or_else(|| "n/a".to_string());
        let change = match i.checked_sub(1).map(|prev| &periods[prev]) {
            Some(prev) => disbursement_change(prev.disbursed_amount, p.disbursed_amount),
            None => "-".to_string(),
        };
        Row::new(vec![
            Cell::from(p.month.clone()),
            Cell::from(format_inr(p.disbursed_amount)).style(Style::default().fg(Color::Blue)),
            Cell::from(format_inr(p.utilized_amount)).style(Style::default().fg(Color::Green)),
            Cell::from(format_inr(p.unutilized_amount())).style(Style::default().fg(Color::Yellow)),
            Cell::from(change),
            Cell::from(rate),
        ])
    });

    let summary = app.dataset.loan_summary();
    let totals = Row::new(vec![
        Cell::from("Total"),
        Cell::from(format_inr(summary.total_disbursed)),
        Cell::from(format_inr(summary.total_utilized)),
        Cell::from(format_inr(summary.total_disbursed.saturating_sub(summary.total_utilized))),
        Cell::from(""),
        Cell::from(summary.rate_label()),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows.chain(std::iter::once(totals)),
        [
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Month", "Disbursed", "Utilized", "Unutilized", "Change", "Rate"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Periods "),
    );

    f.render_widget(table, chunks[1]);
}

/// Month-over-month disbursement delta, e.g. `-₹20,00,000`
fn disbursement_change(previous: u64, current: u64) -> String {
    match (i64::try_from(previous), i64::try_from(current)) {
        // Both operands are non-negative, so the difference cannot overflow
        (Ok(prev), Ok(cur)) => format_inr_signed(cur - prev),
        _ => "n/a".to_string(),
    }
}

// ============================================================================
// COMPLIANCE ANALYSIS
// ============================================================================

fn render_compliance(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .dataset
        .customers()
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(truncate(&c.name, 34)),
                Cell::from(c.compliance_level.as_str())
                    .style(Style::default().fg(compliance_color(c.compliance_level))),
                Cell::from(c.risk_level.as_str()).style(Style::default().fg(risk_color(c.risk_level))),
                Cell::from(c.utilization_rate.to_string()),
                Cell::from(format!("{}", c.flagged_count())),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(36),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Customer", "Compliance Level", "Risk Level", "Utilization Rate", "Flagged"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Customer Compliance Segments "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.customer_state);
}

fn render_customer_detail(f: &mut Frame, area: Rect, app: &App) {
    let customer = match app.selected_customer() {
        Some(c) => c,
        None => {
            let no_selection = Paragraph::new("No customer selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Transaction Analysis "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} - Transaction Analysis ", customer.name));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(customer.transactions.get(Direction::Debit).len() as u16 + 3),
            Constraint::Length(customer.transactions.get(Direction::Credit).len() as u16 + 3),
            Constraint::Min(0),
        ])
        .split(inner);

    let totals = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let aggregations = aggregate_one(customer);
    for (direction, area) in Direction::ALL.iter().zip(totals.iter()) {
        render_method_totals(
            f,
            *area,
            &format!(" {} by Method ", direction.title()),
            aggregations.direction(*direction),
        );
    }

    for (direction, area) in Direction::ALL.iter().zip(&chunks[1..3]) {
        render_transaction_table(
            f,
            *area,
            &format!(" {} Transactions ", direction.title()),
            customer.transactions.get(*direction),
        );
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        "  Press Enter or Esc to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    f.render_widget(hint, chunks[3]);
}

fn render_transaction_table(f: &mut Frame, area: Rect, title: &str, transactions: &[Transaction]) {
    let rows = transactions.iter().map(|tx| {
        let status = if tx.flagged {
            Cell::from(format!("⚠ {}", tx.status())).style(Style::default().fg(Color::Red))
        } else {
            Cell::from(tx.status()).style(Style::default().fg(Color::Green))
        };

        Row::new(vec![
            Cell::from(tx.date.format("%Y-%m-%d").to_string()),
            Cell::from(tx.year.to_string()),
            Cell::from(tx.month.name()),
            Cell::from(format_inr(tx.amount)),
            Cell::from(truncate(&tx.category, 14)),
            Cell::from(tx.payment_method.as_str())
                .style(Style::default().fg(method_color(tx.payment_method))),
            status,
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Date", "Year", "Month", "Amount", "Category", "Payment Method", "Status"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string()),
    );

    f.render_widget(table, area);
}

// ============================================================================
// BEHAVIORAL MONITORING
// ============================================================================

fn render_monitoring(f: &mut Frame, area: Rect, app: &App) {
    let mut content = Vec::new();

    for customer in app.dataset.customers() {
        let color = behavior_color(customer.behavioral_score);
        let patterns = &customer.patterns;

        content.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            Span::styled(
                customer.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", customer.behavioral_score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        content.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            label("Loan Misuse: "),
            Span::raw(patterns.loan_misuse.clone()),
        ]));
        content.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            label("Fraud Risk: "),
            Span::styled(
                patterns.fraud_risk.to_string(),
                Style::default().fg(risk_color(patterns.fraud_risk)),
            ),
        ]));
        content.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            label("Fund Diversion: "),
            Span::raw(patterns.fund_diversion.clone()),
        ]));
        content.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            label("Active Alerts: "),
            Span::raw(format!("{} alerts", patterns.alert_count)),
        ]));
        content.push(Line::from(""));
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((app.monitoring_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Behavioral Monitoring & Risk Analysis "),
        );

    f.render_widget(paragraph, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Dataset::load_embedded().unwrap())
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_page_cycle() {
        let mut page = Page::Overview;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Overview);
        assert_eq!(Page::Overview.previous(), Page::Monitoring);
    }

    #[test]
    fn test_enter_opens_detail_only_on_compliance() {
        let mut app = app();
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.show_detail);

        app.handle_key(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(app.current_page, Page::Compliance);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.show_detail);
    }

    #[test]
    fn test_esc_closes_detail_before_quitting() {
        let mut app = app();
        app.current_page = Page::Compliance;
        app.toggle_detail();

        assert!(!app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.show_detail);
        assert!(app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();
        app.current_page = Page::Compliance;

        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.selected_customer().unwrap().id, 3);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.selected_customer().unwrap().id, 1);
    }

    #[test]
    fn test_shift_tab_goes_back() {
        let mut app = app();
        app.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.current_page, Page::Monitoring);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.current_page, Page::Overview);
    }

    #[test]
    fn test_overview_shows_formatted_totals() {
        let mut app = app();
        let screen = render(&mut app);

        assert!(screen.contains("Total Disbursement"));
        assert!(screen.contains("₹8,50,00,000"));
        assert!(screen.contains("87.1%"));
        assert!(screen.contains("₹1,00,00,000")); // debit cash: 40L + 60L
    }

    #[test]
    fn test_detail_view_lists_flagged_transactions() {
        let mut app = app();
        app.current_page = Page::Compliance;
        app.customer_state.select(Some(2));
        app.toggle_detail();

        let screen = render(&mut app);
        assert!(screen.contains("Desi Digital Services - Transaction Analysis"));
        assert!(screen.contains("Flagged"));
        assert!(screen.contains("₹45,00,000"));
    }

    #[test]
    fn test_detail_view_has_both_directions() {
        let mut app = app();
        app.current_page = Page::Compliance;
        app.toggle_detail();

        let screen = render(&mut app);
        assert!(screen.contains("Debit Transactions"));
        assert!(screen.contains("Credit Transactions"));
    }

    #[test]
    fn test_utilization_table_shows_unutilized_and_change() {
        let mut app = app();
        app.current_page = Page::Utilization;

        let screen = render(&mut app);
        assert!(screen.contains("Unutilized"));
        assert!(screen.contains("₹1,10,00,000")); // 8.5Cr disbursed - 7.4Cr utilized
        assert!(screen.contains("-₹20,00,000")); // Mar -> Apr
    }

    #[test]
    fn test_disbursement_change() {
        assert_eq!(disbursement_change(10_000_000, 15_000_000), "₹50,00,000");
        assert_eq!(disbursement_change(20_000_000, 18_000_000), "-₹20,00,000");
        assert_eq!(disbursement_change(0, u64::MAX), "n/a");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Bharat Technologies Solutions", 10), "Bharat ...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
