use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use activity_calendar::{
    app::{AppState, Effect, LoadTicket, Mode},
    calendar::{ActivityIndex, CalendarDate, Locale},
    export::{self, ExportError, ExportPaginator, ExportSummary},
    input::{command_mode, insert_mode, normal_mode},
    storage::config::Config,
    sync::activity_store::{ActivityStore, FetchError, PersistError},
    ui::theme::Theme,
};
use crate::tui::presentation::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

enum Completion {
    Loaded {
        ticket: LoadTicket,
        result: Result<ActivityIndex, FetchError>,
    },
    Appended {
        date: CalendarDate,
        text: String,
        result: Result<i64, PersistError>,
    },
    Exported(Result<ExportSummary, ExportError>),
}

struct EffectRunner {
    store: ActivityStore,
    paginator: ExportPaginator,
    export_dir: PathBuf,
    tx: UnboundedSender<Completion>,
}

impl EffectRunner {
    /// Starts the work behind `effect`. Returns `false` when the session
    /// should end.
    fn run(&self, effect: Effect) -> bool {
        let store = self.store.clone();
        let tx = self.tx.clone();

        match effect {
            Effect::Quit => return false,
            Effect::Load(ticket) => {
                tokio::spawn(async move {
                    let result = store.load(ticket.view).await;
                    let _ = tx.send(Completion::Loaded { ticket, result });
                });
            }
            Effect::Append { date, text } => {
                tokio::spawn(async move {
                    let result = store.persist(date, &text).await;
                    let _ = tx.send(Completion::Appended { date, text, result });
                });
            }
            Effect::Export(path) => {
                let target = path.unwrap_or_else(|| self.export_dir.clone());
                let paginator = self.paginator.clone();
                tokio::spawn(async move {
                    let result = export::export_activities(&store, &paginator, &target).await;
                    let _ = tx.send(Completion::Exported(result));
                });
            }
        }
        true
    }
}

pub async fn run_tui() -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::named(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!("Unknown theme '{}' in config, using teal", config.ui.theme);
        Theme::default()
    });
    let locale = Locale::from_code(&config.ui.locale);
    let mut app = AppState::new().with_theme(theme).with_locale(locale);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = EffectRunner {
        store: ActivityStore::from_config(&config),
        paginator: ExportPaginator::new(locale).with_file_stem(config.export.file_name.clone()),
        export_dir: config.export.directory.clone(),
        tx,
    };

    runner.run(Effect::Load(app.reload()));

    let res = run_app(&mut terminal, &mut app, &runner, &mut rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    runner: &EffectRunner,
    rx: &mut UnboundedReceiver<Completion>,
) -> io::Result<()> {
    loop {
        while let Ok(completion) = rx.try_recv() {
            if let Some(effect) = apply_completion(app, completion) {
                runner.run(effect);
            }
        }

        terminal.draw(|f| ui(f, app))?;

        // Background tasks make progress on the runtime's workers meanwhile.
        if !event::poll(POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let effect = if app.show_help {
                handle_help_keys(key.code, app);
                None
            } else {
                match app.mode {
                    Mode::Normal => normal_mode::handle_key(key.code, app),
                    Mode::Insert => insert_mode::handle_key(key.code, app),
                    Mode::Command => command_mode::handle_key(key.code, app),
                }
            };

            if let Some(effect) = effect
                && !runner.run(effect)
            {
                return Ok(());
            }
        }
    }
}

fn apply_completion(app: &mut AppState, completion: Completion) -> Option<Effect> {
    match completion {
        Completion::Loaded { ticket, result } => {
            return app.apply_load(ticket, result).map(Effect::Load);
        }
        Completion::Appended { date, text, result } => {
            app.finish_append(date, text, result);
        }
        Completion::Exported(result) => {
            if let Ok(summary) = &result {
                tracing::info!("Export written to {}", summary.path.display());
            }
            app.finish_export(result);
        }
    }
    None
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => app.close_help(),
        _ => {}
    }
}
