// TUI event loop and terminal management
use crate::{event::AppEvent, event::TimerKind, App, InputMode, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use linccora_core::RepeatingTask;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

/// Upper bound on how long the loop sleeps with nothing to do
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Rotation timers; each one exists only while its screen wants it
#[derive(Default)]
struct Timers {
    landing: Option<RepeatingTask>,
    slideshow: Option<RepeatingTask>,
}

impl Timers {
    fn sync(&mut self, app: &App, tx: &UnboundedSender<AppEvent>) {
        sync_timer(
            &mut self.landing,
            app.wants_landing_rotation(),
            app.landing_period(),
            TimerKind::Landing,
            tx,
        );
        sync_timer(
            &mut self.slideshow,
            app.wants_slideshow(),
            app.slideshow_period(),
            TimerKind::Slideshow,
            tx,
        );
    }
}

fn sync_timer(
    slot: &mut Option<RepeatingTask>,
    wanted: bool,
    period: Duration,
    kind: TimerKind,
    tx: &UnboundedSender<AppEvent>,
) {
    match (wanted, slot.is_some()) {
        (true, false) => {
            debug!("Starting {:?} timer", kind);
            let tx = tx.clone();
            *slot = Some(RepeatingTask::spawn(period, move || {
                let _ = tx.send(AppEvent::Tick(kind));
            }));
        }
        // Dropping the task cancels it
        (false, true) => *slot = None,
        _ => {}
    }
}

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());

    let mut timers = Timers::default();

    loop {
        if let Some(pending) = app.take_due_search(Instant::now()) {
            let source = app.orchestrator.source();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = pending.run(source.as_ref()).await;
                let _ = tx.send(AppEvent::SearchFinished(outcome));
            });
        }

        timers.sync(app, &tx);
        terminal.draw(|f| crate::ui::render(f, app))?;

        let wait = app
            .search_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .map_or(IDLE_WAIT, |d| d.min(IDLE_WAIT));

        match tokio::time::timeout(wait, rx.recv()).await {
            Ok(Some(event)) => handle_event(app, event),
            // Every sender is gone, nothing more will arrive
            Ok(None) => break,
            Err(_) => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("Leaving TUI");
    Ok(())
}

/// crossterm's read blocks, so it gets its own thread
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(AppEvent::Input(ev)).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("Failed to read terminal input: {}", e);
                break;
            }
        }
    });
}

fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        AppEvent::Input(_) => {}
        AppEvent::SearchFinished(outcome) => {
            app.apply_search(outcome);
        }
        AppEvent::Tick(TimerKind::Landing) => app.on_landing_tick(),
        AppEvent::Tick(TimerKind::Slideshow) => {
            // A tick can still be queued after the slideshow was hidden
            if app.wants_slideshow() {
                app.on_slideshow_tick();
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Status messages last until the next key
    app.status_message = None;

    if app.view == View::Landing {
        match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Enter | KeyCode::Char(' ') => app.enter_shop(),
            _ => {}
        }
        return;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter => {
                app.submit_search();
                app.enter_normal_mode();
            }
            KeyCode::Char(c) => {
                app.push_search_char(c);
            }
            KeyCode::Backspace => {
                app.pop_search_char();
            }
            KeyCode::Esc => {
                app.enter_normal_mode();
            }
            _ => {}
        },
        InputMode::Filtering => match key.code {
            KeyCode::Esc => {
                app.toggle_filters();
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                app.next_filter();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.previous_filter();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.activate_filter();
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                app.clear_current_filter();
            }
            KeyCode::Char('c') => {
                app.clear_filters();
            }
            _ => {}
        },
        InputMode::EditingFilter => match key.code {
            KeyCode::Enter => {
                app.save_filter_edit();
            }
            KeyCode::Esc => {
                app.cancel_filter_edit();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                app.filter_edit_buffer.push(c);
            }
            KeyCode::Backspace => {
                app.filter_edit_buffer.pop();
            }
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => {
                app.quit();
            }
            KeyCode::Char('/') if app.view == View::Home => {
                app.enter_search_mode();
            }
            KeyCode::Char('f') | KeyCode::Char('F') if app.view == View::Home => {
                app.toggle_filters();
            }
            KeyCode::Char('c') if app.view == View::Home => {
                app.clear_filters();
            }
            KeyCode::Char('r') | KeyCode::Char('R') if app.view == View::Home => {
                app.submit_search();
            }
            KeyCode::Char('v') | KeyCode::Tab => {
                app.toggle_view();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.next_result();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.previous_result();
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                app.toggle_favorite_selected();
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                // Open in browser
                if let Some(url) = app.selected_url() {
                    if let Err(e) = open::that(&url) {
                        app.status_message = Some(format!("Failed to open browser: {}", e));
                    }
                }
            }
            KeyCode::Char('i') => {
                if let Some(url) = app.selected_image_url() {
                    if let Err(e) = open::that(&url) {
                        app.status_message = Some(format!("Failed to open image: {}", e));
                    }
                }
            }
            KeyCode::Esc if app.view == View::Favorites => {
                app.show_home();
            }
            _ => {}
        },
    }
}
