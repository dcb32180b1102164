mod app;
mod worksheet;

use anyhow::Result;
use app::App;
use chunkwise_config::Config;
use chunkwise_engine::{ClickResolver, EditSession, codec::tags::DISPLAY_SEPARATOR};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::{
    env, fs,
    io::stdout,
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
};
use worksheet::SentenceEntry;

/// How long to wait for input when no activation is pending
const IDLE_TICK: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let (print_only, arg_path) = match args.as_slice() {
        [_] => (false, None),
        [_, flag, path] if flag == "--print" => (true, Some(PathBuf::from(path))),
        [_, path] if !path.starts_with("--") => (false, Some(PathBuf::from(path))),
        _ => {
            eprintln!("Usage: {} [--print] [worksheet-file]", args[0]);
            process::exit(1);
        }
    };

    // Logging goes to stderr, which the TUI shares, so it stays quiet there
    // unless RUST_LOG asks for it
    let default_filter = if print_only { "warn" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let (config, first_run) = match Config::load() {
        Ok(config) => {
            let first_run = config.is_none();
            (config, first_run)
        }
        Err(e) if arg_path.is_some() => {
            log::warn!("Ignoring config file: {e}");
            (None, false)
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [--print] [worksheet-file]", args[0]);
            process::exit(1);
        }
    };

    let from_config = arg_path.is_none();
    let worksheet_path = match arg_path.or_else(|| {
        config
            .as_ref()
            .and_then(|config| config.worksheet_path.clone())
    }) {
        Some(path) => path,
        None => {
            eprintln!("Error: No worksheet provided and no worksheet_path configured");
            eprintln!("Usage: {} [--print] [worksheet-file]", args[0]);
            eprintln!("Or set worksheet_path in {}", config_path.display());
            process::exit(1);
        }
    };

    let entries = match worksheet::read_worksheet(&worksheet_path) {
        Ok(entries) => entries,
        Err(e) => {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!("Error: Worksheet{source} is unreadable: {e:#}");
            process::exit(1);
        }
    };

    if print_only {
        for entry in &entries {
            println!("{}", entry.display());
        }
        return Ok(());
    }

    let config = match config {
        Some(config) => config,
        None if first_run => remember_worksheet(&worksheet_path),
        None => Config::default(),
    };
    let window = config.double_activation_window();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(entries, ClickResolver::new(window));

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    for line in app.tagged_lines() {
        println!("{line}");
    }

    Ok(())
}

/// First run: store the worksheet given on the command line as the default,
/// the way later runs without arguments will find it.
fn remember_worksheet(path: &Path) -> Config {
    let worksheet_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let config = Config {
        worksheet_path: Some(worksheet_path),
        ..Config::default()
    };
    match config.save() {
        Ok(()) => log::info!("Saved config to {}", Config::config_path().display()),
        Err(e) => log::warn!("Could not save config: {e:#}"),
    }
    config
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Wake up in time to settle a pending activation
        let timeout = app.resolver.deadline().map_or(IDLE_TICK, |deadline| {
            deadline.saturating_duration_since(Instant::now())
        });
        if !event::poll(timeout)? {
            app.tick(Instant::now());
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let now = Instant::now();
            app.tick(now);
            match key.code {
                KeyCode::Char('q') => {
                    app.flush();
                    return Ok(());
                }
                KeyCode::Down | KeyCode::Char('j') => app.next_sentence(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_sentence(),
                KeyCode::Right | KeyCode::Char('l') => app.next_word(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_word(),
                KeyCode::Enter | KeyCode::Char(' ') => app.activate(now),
                KeyCode::Char('e') => app.begin_edit(),
                KeyCode::Char('m') => app.merge_at_cursor(),
                KeyCode::Char('v') => app.toggle_at_cursor(),
                KeyCode::Char('c') => app.commit(),
                KeyCode::Esc => app.cancel(),
                _ => {}
            }
        }
    }
}

/// Words of the shown sequence with chunk separators; emphasis is
/// underlined, the cursor word highlighted and a word waiting on a pending
/// activation shown in bold.
fn chunk_line(session: &EditSession, cursor: usize, pending: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    let mut flat = 0;

    for (index, chunk) in session.current().iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(
                DISPLAY_SEPARATOR,
                Style::default().fg(Color::DarkGray),
            ));
        }
        for (position, word) in chunk.words().into_iter().enumerate() {
            if position > 0 {
                spans.push(Span::raw(" "));
            }
            let mut style = Style::default();
            if word.is_verb {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if pending == Some(flat) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if flat == cursor {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            spans.push(Span::styled(word.word, style));
            flat += 1;
        }
    }

    Line::from(spans)
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(f.area());

    // Sentence list panel
    let sentence_items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let marker = match entry {
                SentenceEntry::Chunked(session) if session.is_editing() => "✎ ",
                SentenceEntry::Chunked(_) => "  ",
                SentenceEntry::Raw(_) => "? ",
            };
            ListItem::new(vec![Line::from(vec![Span::raw(format!(
                "{marker}{}",
                entry.display()
            ))])])
        })
        .collect();

    let sentence_list = List::new(sentence_items)
        .block(Block::default().borders(Borders::ALL).title("Sentences"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(sentence_list, chunks[0], &mut app.sentence_state);

    // Chunk panel
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3), Constraint::Length(3)].as_ref())
        .split(chunks[1]);

    let (title, chunk_text, committed_text) = match app.selected_entry() {
        Some(SentenceEntry::Chunked(session)) => (
            if session.is_editing() {
                "Chunks (editing)"
            } else {
                "Chunks"
            },
            vec![chunk_line(session, app.cursor, app.pending_word())],
            session.committed().display(),
        ),
        Some(SentenceEntry::Raw(raw)) => (
            "Unchunked",
            vec![Line::from(raw.clone())],
            String::new(),
        ),
        None => (
            "Chunks",
            vec![Line::from("The worksheet has no sentences")],
            String::new(),
        ),
    };

    let chunk_view = Paragraph::new(chunk_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(chunk_view, right[0]);

    let committed = Paragraph::new(committed_text)
        .block(Block::default().borders(Borders::ALL).title("Committed"));
    f.render_widget(committed, right[1]);

    let status = Paragraph::new(app.status.clone())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, right[2]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑↓/jk: Sentence | "),
        Span::raw("←→/hl: Word | "),
        Span::raw("e: Edit | "),
        Span::raw("Enter/Space: Split (twice: Emphasis) | "),
        Span::raw("m: Merge | v: Emphasis | c: Commit | Esc: Cancel"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
