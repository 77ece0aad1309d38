use std::{
    collections::VecDeque,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Terminal,
};
use rigbench_types::events::{EventPayload, RunEvent};

const MAX_LOG_ENTRIES: usize = 120;

pub enum UiMessage {
    Event(RunEvent),
    Finished,
}

pub fn run(receiver: Receiver<UiMessage>, summary: String) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let res = run_loop(&mut terminal, receiver, summary.as_str());

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    res
}

#[derive(Default)]
struct ScreenState {
    logs: VecDeque<String>,
    status: String,
    percent: f64,
    failures: usize,
    finished: bool,
}

impl ScreenState {
    fn apply(&mut self, message: UiMessage) {
        match message {
            UiMessage::Event(event) => {
                match &event.payload {
                    EventPayload::Progress(progress) => {
                        self.status = progress.status.clone();
                        self.percent = progress.percent;
                    }
                    EventPayload::Failure(_) => self.failures += 1,
                    EventPayload::Lifecycle(_) => {}
                }
                if self.logs.len() == MAX_LOG_ENTRIES {
                    self.logs.pop_front();
                }
                self.logs.push_back(format_event(&event));
            }
            UiMessage::Finished => self.finished = true,
        }
    }
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    receiver: Receiver<UiMessage>,
    summary: &str,
) -> Result<()> {
    let mut state = ScreenState {
        status: "Waiting".into(),
        ..ScreenState::default()
    };

    loop {
        loop {
            match receiver.try_recv() {
                Ok(message) => state.apply(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    state.finished = true;
                    break;
                }
            }
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Min(0),
                    ]
                    .as_ref(),
                )
                .split(f.size());

            let hint = if state.finished {
                " to show results"
            } else {
                " to stop watching"
            };
            let header = Paragraph::new(Line::from(vec![
                Span::styled(
                    "Matrix",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(summary),
                Span::raw("  "),
                Span::styled("failures:", Style::default().fg(Color::Red)),
                Span::raw(format!(" {}", state.failures)),
                Span::raw("  "),
                Span::styled("q", Style::default().fg(Color::Yellow)),
                Span::raw(hint),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Summary"));
            f.render_widget(header, chunks[0]);

            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Progress"))
                .gauge_style(Style::default().fg(Color::Green))
                .ratio((state.percent / 100.0).clamp(0.0, 1.0))
                .label(format!("{:.0}%  {}", state.percent, state.status));
            f.render_widget(gauge, chunks[1]);

            let items: Vec<ListItem> = state
                .logs
                .iter()
                .rev()
                .map(|entry| ListItem::new(entry.clone()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Recent events"));
            f.render_widget(list, chunks[2]);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn format_event(event: &RunEvent) -> String {
    let timestamp = event.timestamp.format("%H:%M:%S");
    match &event.payload {
        EventPayload::Lifecycle(lifecycle) => format!(
            "[{}] {:?} {}",
            timestamp,
            lifecycle.phase,
            lifecycle.details.clone().unwrap_or_default()
        ),
        EventPayload::Progress(progress) => format!(
            "[{}] {}/{} {}",
            timestamp, progress.completed, progress.total, progress.status
        ),
        EventPayload::Failure(failure) => format!("[{}] ERROR {}", timestamp, failure.message),
    }
}
