use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use location_check::{accepts, ClassificationResult, RuleEngine};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

pub struct App {
    engine: RuleEngine,
    pub input: String,
    pub result: ClassificationResult,
    pub history: Vec<(String, ClassificationResult)>,
    pub state: TableState,
}

impl App {
    pub fn new(engine: RuleEngine) -> Self {
        let result = engine.interpret("");
        Self {
            engine,
            input: String::new(),
            result,
            history: Vec::new(),
            state: TableState::default(),
        }
    }

    /// Type one character; rejected keystrokes leave the input unchanged
    pub fn push_char(&mut self, c: char) -> bool {
        let c = c.to_ascii_uppercase();
        if !accepts(&self.input, c) {
            return false;
        }
        self.input.push(c);
        self.refresh();
        true
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.refresh();
    }

    /// Record the current code at the top of the history and clear the input
    pub fn confirm(&mut self) {
        if self.input.is_empty() {
            return;
        }

        debug!(code = %self.input, check = %self.result.check, "location confirmed");
        let code = std::mem::take(&mut self.input);
        let result = std::mem::replace(&mut self.result, self.engine.interpret(""));
        self.history.insert(0, (code, result));
        self.state.select(Some(0));
    }

    pub fn next(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = self.state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.state.select(Some(i));
    }

    fn refresh(&mut self) {
        self.result = self.engine.interpret(&self.input);
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

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Enter => app.confirm(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                KeyCode::Char(c) => {
                    app.push_char(c);
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
            Constraint::Length(3), // Input
            Constraint::Length(4), // Phonetic + check
            Constraint::Min(0),    // History
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_input(f, chunks[0], app);
    render_result(f, chunks[1], app);
    render_history(f, chunks[2], app);
    render_status_bar(f, chunks[3]);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" Location: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<4}", app.input),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]);

    let input = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(input, area);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let family = app
        .result
        .family
        .map(|family| family.name().to_string())
        .unwrap_or_else(|| "Generic".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(" Phonetic: ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.result.phonetic.clone(), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(format!("({})", family), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" Check:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.result.check.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(result, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Code", "Phonetic", "Check"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.history.iter().map(|(code, result)| {
        let color = if result.family.is_some() { Color::Cyan } else { Color::White };
        Row::new(vec![
            Cell::from(code.clone()),
            Cell::from(result.phonetic.clone()).style(Style::default().fg(color)),
            Cell::from(result.check.clone()).style(Style::default().fg(Color::Green)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(30),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" History "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::styled(" A-Z 0-9", Style::default().fg(Color::Yellow)),
        Span::raw(" Type | "),
        Span::styled("+/-", Style::default().fg(Color::Yellow)),
        Span::raw(" After/Before | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Record | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" History | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_updates_result() {
        let mut app = App::new(RuleEngine::standard());
        assert_eq!(app.result.phonetic, "NONE");

        for c in "ca12".chars() {
            assert!(app.push_char(c));
        }
        assert_eq!(app.input, "CA12");
        assert_eq!(app.result.phonetic, "CASH OFFICE ONE TWO");
        assert_eq!(app.result.check, "JULIET");
    }

    #[test]
    fn test_rejected_keystrokes() {
        let mut app = App::new(RuleEngine::standard());
        assert!(!app.push_char('+'));
        assert!(app.push_char('S'));
        assert!(app.push_char('1'));
        assert!(app.push_char('A'));
        assert!(app.push_char('+'));
        assert!(!app.push_char('B'));
        assert_eq!(app.result.phonetic, "AFTER SECURITY ONE ALPHA");

        app.backspace();
        assert_eq!(app.input, "S1A");
        assert_eq!(app.result.phonetic, "SECURITY ONE ALPHA");
    }

    #[test]
    fn test_confirm_records_history() {
        let mut app = App::new(RuleEngine::standard());
        app.confirm();
        assert!(app.history.is_empty());

        for c in "SOB".chars() {
            app.push_char(c);
        }
        app.confirm();
        for c in "A1".chars() {
            app.push_char(c);
        }
        app.confirm();

        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history[0].0, "A1");
        assert_eq!(app.history[1].1.check, "SIERRA");
        assert!(app.input.is_empty());
        assert_eq!(app.result.phonetic, "NONE");

        app.next();
        assert_eq!(app.state.selected(), Some(1));
        app.next();
        assert_eq!(app.state.selected(), Some(1));
        app.previous();
        assert_eq!(app.state.selected(), Some(0));
    }
}
