use adaptive_quiz::{
    draw_menu, draw_quit_confirmation, draw_quiz, draw_summary, handle_quiz_input, logger,
    AppConfig, AppState, DirectoryCatalog, LogRecorder, QuizCatalog, QuizError, QuizSession,
    QuizSummary, StaticCatalog, TimerTick,
};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc::{self, UnboundedSender};

type Tui = Terminal<CrosstermBackend<Stdout>>;

struct App {
    state: AppState,
    quizzes: Vec<QuizSummary>,
    selected_quiz_index: usize,
    notice: Option<String>,
    session: Option<QuizSession>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env().with_args(std::env::args().skip(1));
    logger::init(&config.log_file);

    let catalog: Box<dyn QuizCatalog> = if config.quiz_dir.is_dir() {
        logger::log(&format!(
            "Using quiz directory {}",
            config.quiz_dir.display()
        ));
        Box::new(DirectoryCatalog::new(config.quiz_dir.clone()))
    } else {
        logger::log("Quiz directory not found, using the built-in sample quiz");
        Box::new(StaticCatalog)
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config, catalog.as_ref()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn open_session(
    catalog: &dyn QuizCatalog,
    id: &str,
    tick_tx: &UnboundedSender<TimerTick>,
) -> Result<QuizSession, QuizError> {
    let quiz = catalog.load_quiz(id).await?;
    let mut session = QuizSession::new(quiz, Box::new(LogRecorder));
    session.start_timer(tick_tx.clone());
    logger::log(&format!("Opened quiz {}", id));
    Ok(session)
}

async fn run(terminal: &mut Tui, config: &AppConfig, catalog: &dyn QuizCatalog) -> io::Result<()> {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<TimerTick>();
    let mut events = EventStream::new();

    let mut app = App {
        state: AppState::Menu,
        quizzes: Vec::new(),
        selected_quiz_index: 0,
        notice: None,
        session: None,
    };

    match catalog.list_quizzes().await {
        Ok(quizzes) => app.quizzes = quizzes,
        Err(e) => {
            logger::log(&format!("Listing quizzes failed: {}", e));
            app.notice = Some(e.to_string());
        }
    }

    if let Some(id) = &config.quiz_id {
        match open_session(catalog, id, &tick_tx).await {
            Ok(session) => {
                app.session = Some(session);
                app.state = AppState::Quiz;
            }
            Err(e) => app.notice = Some(e.to_string()),
        }
    }

    loop {
        terminal.draw(|f| match (&app.state, &app.session) {
            (AppState::Quiz, Some(session)) => draw_quiz(f, session),
            (AppState::QuizQuitConfirm, Some(_)) => draw_quit_confirmation(f),
            (AppState::Summary, Some(session)) => draw_summary(f, session),
            _ => draw_menu(
                f,
                &app.quizzes,
                app.selected_quiz_index,
                app.notice.as_deref(),
            ),
        })?;

        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                if let Some(session) = app.session.as_mut() {
                    session.apply_tick(tick);
                }
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if !handle_key(&mut app, key, catalog, &tick_tx).await {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }
    }

    Ok(())
}

/// Returns false when the app should exit.
async fn handle_key(
    app: &mut App,
    key: KeyEvent,
    catalog: &dyn QuizCatalog,
    tick_tx: &UnboundedSender<TimerTick>,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match app.state {
        AppState::Menu => match key.code {
            KeyCode::Up => {
                app.selected_quiz_index = app.selected_quiz_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if app.selected_quiz_index < app.quizzes.len().saturating_sub(1) {
                    app.selected_quiz_index += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(summary) = app.quizzes.get(app.selected_quiz_index) {
                    let id = summary.id.clone();
                    match open_session(catalog, &id, tick_tx).await {
                        Ok(session) => {
                            app.notice = None;
                            app.session = Some(session);
                            app.state = AppState::Quiz;
                        }
                        Err(e) => {
                            logger::log(&format!("Opening quiz {} failed: {}", id, e));
                            app.notice = Some(e.to_string());
                        }
                    }
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return false,
            _ => {}
        },
        AppState::Quiz => match app.session.as_mut() {
            Some(session) => handle_quiz_input(session, key, &mut app.state),
            None => app.state = AppState::Menu,
        },
        AppState::QuizQuitConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.session = None;
                app.state = AppState::Menu;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Quiz;
            }
            _ => {}
        },
        AppState::Summary => match key.code {
            KeyCode::Char('r') => {
                if let Some(session) = app.session.as_mut() {
                    session.reset();
                    app.state = AppState::Quiz;
                }
            }
            KeyCode::Char('m') => {
                app.session = None;
                app.state = AppState::Menu;
            }
            KeyCode::Char('q') | KeyCode::Esc => return false,
            _ => {}
        },
    }

    true
}
