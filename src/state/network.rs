use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use swoops_api::client::{ApiError, SwoopsApi};
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: SwoopsApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: SwoopsApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            // MarkRevealed is fire-and-forget: no spinner, no error response.
            if let NetworkRequest::MarkRevealed { game_id } = &request {
                debug!("marking game {game_id} as revealed");
                if let Err(e) = self.client.mark_revealed(game_id).await {
                    debug!("mark-revealed failed (ignored): {e}");
                }
                continue;
            }

            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadGame { game_id } => self.handle_load_game(game_id).await,
                NetworkRequest::LoadPlayFeed { game_id } => self.handle_load_feed(game_id).await,
                NetworkRequest::MarkRevealed { .. } => unreachable!("handled above"),
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_game(&self, game_id: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading game {game_id}");
        let game = self.client.fetch_game(&game_id).await?;
        Ok(NetworkResponse::GameLoaded { game })
    }

    async fn handle_load_feed(&self, game_id: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading play-by-play feed for {game_id}");
        let feed = self.client.fetch_play_feed(&game_id).await?;
        Ok(NetworkResponse::FeedLoaded { feed })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
