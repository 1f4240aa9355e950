//! HTTP surface of the contact relay.
//!
//! A single route, `POST /send-email`, accepts a contact form as JSON or
//! urlencoded body and hands it to the [`ContactRelay`].

mod handlers;
mod routes;

pub use handlers::{ContactForm, RelayResponse};
pub use routes::create_router;

use crate::core::relay::ContactRelay;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ContactRelay>,
}

impl AppState {
    pub fn new(relay: ContactRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Start the web server.
pub async fn serve(relay: ContactRelay, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(relay));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("📬 Email server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
