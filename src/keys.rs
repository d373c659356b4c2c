use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut reload_game = false;
    let mut mark_revealed = false;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (MenuItem::PlayByPlay, KeyCode::Tab, _) => guard.update_tab(MenuItem::BoxScore),
        (MenuItem::BoxScore, KeyCode::Tab, _) => guard.update_tab(MenuItem::PlayByPlay),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Playback
        (_, Char(' '), _) => guard.toggle_pause(),
        (_, Char(']'), _) => guard.speed_up(),
        (_, Char('['), _) => guard.speed_down(),
        (_, Char(c @ '1'..='4'), _) => guard.jump_to_quarter(c as u8 - b'0'),
        (_, Char('e'), _) => mark_revealed = guard.skip_to_end(),
        (_, Char('r'), _) => {
            guard.restart();
            reload_game = true;
        }

        // Scrubbing
        (_, KeyCode::Left, _) => guard.scrub_move(-1),
        (_, KeyCode::Right, _) => guard.scrub_move(1),
        (_, KeyCode::Esc, _) => guard.scrub_end(),

        // Scrolling
        (MenuItem::PlayByPlay, Char('j') | KeyCode::Down, _) => {
            guard.state.play_scroll = guard.state.play_scroll.saturating_add(1);
        }
        (MenuItem::PlayByPlay, Char('k') | KeyCode::Up, _) => {
            guard.state.play_scroll = guard.state.play_scroll.saturating_sub(1);
        }
        (MenuItem::BoxScore, Char('j') | KeyCode::Down, _) => {
            guard.state.box_scroll = guard.state.box_scroll.saturating_add(1);
        }
        (MenuItem::BoxScore, Char('k') | KeyCode::Up, _) => {
            guard.state.box_scroll = guard.state.box_scroll.saturating_sub(1);
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    let game_id = guard.state.game_id.clone();
    drop(guard);

    if mark_revealed {
        let _ = network_requests
            .send(NetworkRequest::MarkRevealed { game_id: game_id.clone() })
            .await;
    }
    if reload_game {
        let _ = network_requests
            .send(NetworkRequest::LoadGame { game_id: game_id.clone() })
            .await;
        let _ = network_requests
            .send(NetworkRequest::LoadPlayFeed { game_id })
            .await;
    }
}
