mod app;
mod draw;
mod keys;
mod playback;
mod state;
mod ui;

use crate::app::App;
use crate::playback::TickOutcome;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(game_id) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new(game_id)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Kick off game + feed loads on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> Option<String> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        eprintln!("Missing game id.\n\n{}", usage_text());
        std::process::exit(2);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            None
        }
        "-V" | "--version" => {
            println!("swooptui {}", env!("CARGO_PKG_VERSION"));
            None
        }
        _ if arg.starts_with('-') => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => Some(arg),
    }
}

fn usage_text() -> &'static str {
    "swooptui - Swoops play-by-play terminal UI

Usage:
  swooptui <game-id>
  swooptui --help
  swooptui --version

Environment:
  SWOOPTUI_API_URL   Override the Swoops API base URL"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();
    // The single pending drip timer. Armed only while playback runs; pausing
    // or finishing clears it, so no stale timer can fire after teardown.
    let mut drip_deadline: Option<Instant> = None;

    loop {
        let deadline = drip_deadline.unwrap_or_else(Instant::now);

        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            _ = tokio::time::sleep_until(deadline), if drip_deadline.is_some() => {
                drip_deadline = None;
                let mut app_guard = app.lock().await;
                let outcome = app_guard.on_play_tick();
                if outcome == TickOutcome::GameFinished {
                    info!("playback finished, notifying server");
                    let game_id = app_guard.state.game_id.clone();
                    let _ = network_requests
                        .send(NetworkRequest::MarkRevealed { game_id })
                        .await;
                }
                draw::draw(&mut terminal, &mut app_guard, loading);
            }
        }

        rearm_drip_timer(&app, &mut drip_deadline).await;
    }
}

/// Keep exactly one timer pending while playback runs, none otherwise.
async fn rearm_drip_timer(app: &Arc<Mutex<App>>, drip_deadline: &mut Option<Instant>) {
    let mut guard = app.lock().await;
    if guard.state.playback.is_playing() {
        if drip_deadline.is_none() {
            *drip_deadline = Some(Instant::now() + guard.state.playback.next_tick_delay());
        }
    } else {
        *drip_deadline = None;
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let game_id = app.lock().await.state.game_id.clone();
            let _ = network_requests
                .send(NetworkRequest::LoadGame { game_id: game_id.clone() })
                .await;
            let _ = network_requests
                .send(NetworkRequest::LoadPlayFeed { game_id })
                .await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::GameLoaded { game } => {
            let mut guard = app.lock().await;
            guard.on_game_loaded(game);
        }
        NetworkResponse::FeedLoaded { feed } => {
            let mut guard = app.lock().await;
            guard.on_feed_loaded(feed);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
