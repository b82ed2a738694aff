//! Site server: renders pages per request and hosts slideshow sessions

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::Pages;
use crate::helpers::{url_for, SLIDESHOW_PATH, SLIDESHOW_SOCKET_PATH};
use crate::slideshow::{Input, SlideshowSession, SlideshowState};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    pages: Pages,
}

/// Build the router for a site, mounted under the configured root
pub fn router(folio: &Folio) -> Result<Router> {
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        pages: Pages::new(folio)?,
    });

    let app = Router::new()
        .route("/", get(about_handler))
        .route("/works", get(works_handler))
        .route("/writing", get(writing_handler))
        .route("/writing/:slug", get(post_handler))
        .route("/surprise", get(surprise_handler))
        .route(SLIDESHOW_PATH, get(slideshow_page_handler))
        .route(SLIDESHOW_SOCKET_PATH, get(slideshow_socket_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let root = folio.config.root.trim_matches('/');
    let app = if root.is_empty() {
        app
    } else {
        Router::new().nest(&format!("/{}", root), app)
    };

    Ok(app.layer(TraceLayer::new_for_http()))
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, url_for(&folio.config, "/"));
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn about_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_response(state.pages.about())
}

async fn works_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_response(state.pages.works())
}

async fn writing_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_response(state.pages.writing_index())
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.pages.post(&slug) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found(&state, &format!("/writing/{}", slug)),
        Err(e) => server_error(e),
    }
}

async fn surprise_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_response(state.pages.surprise())
}

async fn slideshow_page_handler(State(state): State<Arc<ServerState>>) -> Response {
    let images = state.folio.slideshow_images();
    html_response(state.pages.slideshow(&images))
}

/// WebSocket handler mounting one slideshow session per connection
async fn slideshow_socket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_slideshow_socket(socket, state))
}

/// Relay client inputs to the session and session updates to the client
async fn handle_slideshow_socket(mut socket: WebSocket, state: Arc<ServerState>) {
    let config = &state.folio.config;
    let images = state.folio.slideshow_images();
    let interval = Duration::from_secs(config.slideshow.interval_secs.max(1));
    let session = SlideshowSession::new(
        SlideshowState::initialize(images.images),
        url_for(config, &images.dir_path),
        interval,
    )
    .with_exit_redirect(url_for(config, "/"));

    let (input_tx, input_rx) = mpsc::channel::<Input>(16);
    let (update_tx, mut update_rx) = mpsc::channel(16);
    let task = tokio::spawn(session.run(input_rx, update_tx));

    tracing::debug!("Slideshow client connected");

    loop {
        tokio::select! {
            update = update_rx.recv() => {
                let Some(update) = update else {
                    // Session finished after an exit
                    break;
                };
                let text = match serde_json::to_string(&update) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("Failed to encode slideshow update: {}", e);
                        break;
                    }
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(input) = Input::from_key(text.trim()) {
                            if !forward_input(&input_tx, input) {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    // Unmount: closing both channels stops the session and its timer
    drop(input_tx);
    drop(update_rx);
    if let Err(e) = task.await {
        tracing::warn!("Slideshow session task failed: {}", e);
    }

    tracing::debug!("Slideshow client disconnected");
}

/// Hand an input to the session without waiting on it.
///
/// The relay must keep draining updates, so a busy session drops the
/// key press instead of blocking. Returns `false` once the session is gone.
fn forward_input(inputs: &mpsc::Sender<Input>, input: Input) -> bool {
    match inputs.try_send(input) {
        Ok(()) => true,
        Err(TrySendError::Full(input)) => {
            tracing::debug!("Slideshow session busy, dropping {:?}", input);
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

/// Serve static assets, falling back to the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    let mut service = ServeDir::new(&state.folio.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => not_found(&state, &path),
        Err(e) => {
            tracing::error!("Failed to serve {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn html_response(result: Result<String>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

fn not_found(state: &ServerState, path: &str) -> Response {
    match state.pages.not_found(path) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => server_error(e),
    }
}

fn server_error(e: anyhow::Error) -> Response {
    tracing::error!("Render failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
