use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, config, types::PkceToken};

/// Binds the callback server address so a taken port is reported before the
/// browser is opened.
pub async fn bind_api_server() -> Result<TcpListener, String> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))
}

/// Serves the OAuth callback until the task is aborted.
pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<(), String> {
    let app = Router::new().route("/callback", get(api::callback).layer(Extension(state)));
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
