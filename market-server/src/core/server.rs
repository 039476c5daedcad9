//! Server Implementation
//!
//! HTTP 服务器和实时 TCP 监听的启动管理

use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;

use crate::api;
use crate::core::{Config, ServerState};
use crate::message::RealtimeServer;
use crate::utils::AppError;

/// HTTP + Realtime Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let shutdown_token = CancellationToken::new();

        // Realtime TCP listener (seller notification channel)
        let realtime_addr = format!("0.0.0.0:{}", self.config.realtime_tcp_port);
        let realtime_listener = RealtimeServer::bind(&realtime_addr).await?;
        let realtime = RealtimeServer::new(state.presence.clone(), shutdown_token.clone());
        tokio::spawn(async move {
            if let Err(e) = realtime.serve(realtime_listener).await {
                tracing::error!("Realtime server failed: {}", e);
            }
        });

        // HTTP API
        let app = api::create_router(state.clone());
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind HTTP listener: {}", e)))?;

        tracing::info!("Market server starting on {}", addr);
        tracing::info!(
            "Realtime channel: tcp://localhost:{}",
            self.config.realtime_tcp_port
        );

        let shutdown = {
            let token = shutdown_token.clone();
            async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                token.cancel();
            }
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| AppError::internal(format!("HTTP server failed: {}", e)))?;

        Ok(())
    }
}
