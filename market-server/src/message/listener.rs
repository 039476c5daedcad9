//! Realtime TCP 服务器
//!
//! 负责处理卖家客户端连接，包括：
//! - 监听连接
//! - 注册帧验证 (绑定 seller 身份)
//! - 在线表维护与断开清理

use std::net::SocketAddr;
use std::sync::Arc;

use shared::{BusMessage, EventType, RegisterPayload, ResponsePayload};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::transport::{TcpTransport, Transport};
use crate::notify::{PresenceEntry, PresenceRegistry};
use crate::utils::AppError;

/// Delay before closing connection after sending error (allows client to receive the message)
const REGISTER_ERROR_DELAY_MS: u64 = 100;

/// TCP listener that feeds the presence registry
#[derive(Clone)]
pub struct RealtimeServer {
    presence: Arc<dyn PresenceRegistry>,
    shutdown: CancellationToken,
}

impl RealtimeServer {
    pub fn new(presence: Arc<dyn PresenceRegistry>, shutdown: CancellationToken) -> Self {
        Self { presence, shutdown }
    }

    /// Bind the listen socket (separate from `serve` so callers can learn
    /// the actual port when binding to port 0)
    pub async fn bind(addr: &str) -> Result<TcpListener, AppError> {
        TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind realtime listener: {}", e)))
    }

    /// Main accept loop
    pub async fn serve(self, listener: TcpListener) -> Result<(), AppError> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Realtime server listening on {}", addr);
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Realtime server shutting down");
                    break;
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            tracing::debug!("Client connected: {}", addr);
                            self.spawn_client_handler(stream, addr);
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn spawn_client_handler(&self, stream: TcpStream, addr: SocketAddr) {
        let presence = self.presence.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client_connection(stream, addr, presence, shutdown).await {
                tracing::debug!("Client {} handler finished: {}", addr, e);
            }
        });
    }
}

/// Handle a single client connection
async fn handle_client_connection(
    stream: TcpStream,
    addr: SocketAddr,
    presence: Arc<dyn PresenceRegistry>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let transport: Arc<dyn Transport> = Arc::new(TcpTransport::from_stream(stream));

    // 第一帧必须是 Register
    let msg = transport.read_message().await.map_err(|e| {
        tracing::debug!("Client {} closed before registering: {}", addr, e);
        e
    })?;

    let mut binding = perform_register(&transport, &presence, &msg, addr).await?;

    // 之后只处理重新注册帧；其余帧忽略，断开时做条件清理
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                break;
            }

            read_result = transport.read_message() => {
                match read_result {
                    Ok(msg) if msg.event_type == EventType::Register => {
                        match perform_register(&transport, &presence, &msg, addr).await {
                            Ok(new_binding) => {
                                // 同一连接换绑身份：旧绑定按连接 ID 清理
                                if new_binding.0 != binding.0 {
                                    presence.remove_if(&binding.0, binding.1);
                                }
                                binding = new_binding;
                            }
                            Err(e) => {
                                tracing::debug!("Client {} re-register failed: {}", addr, e);
                            }
                        }
                    }
                    Ok(msg) => {
                        tracing::debug!(
                            "Client {} sent unexpected {} frame, ignoring",
                            addr,
                            msg.event_type
                        );
                    }
                    Err(AppError::ClientDisconnected) => {
                        tracing::debug!(seller_id = %binding.0, "Client {} disconnected", addr);
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(seller_id = %binding.0, "Client {} read error: {}", addr, e);
                        break;
                    }
                }
            }
        }
    }

    // Cleanup
    let _ = transport.close().await;
    if presence.remove_if(&binding.0, binding.1) {
        tracing::debug!(seller_id = %binding.0, "Client removed from presence registry");
    }

    Ok(())
}

/// Validate a Register frame and bind the connection in the presence table.
/// Returns the (seller_id, conn_id) binding.
async fn perform_register(
    transport: &Arc<dyn Transport>,
    presence: &Arc<dyn PresenceRegistry>,
    msg: &BusMessage,
    addr: SocketAddr,
) -> Result<(String, Uuid), AppError> {
    if msg.event_type != EventType::Register {
        tracing::warn!(
            "Client {} failed to register: expected Register, got {}",
            addr,
            msg.event_type
        );
        send_register_error(transport, msg, "Expected Register message").await;
        return Err(AppError::invalid("Expected Register message"));
    }

    let payload: RegisterPayload = msg.parse_payload().map_err(|e| {
        tracing::warn!("Client {} sent invalid register payload: {}", addr, e);
        AppError::invalid(format!("Invalid register payload: {}", e))
    })?;

    if payload.seller_id.is_empty() {
        send_register_error(transport, msg, "sellerId must not be empty").await;
        return Err(AppError::invalid("sellerId must not be empty"));
    }

    let conn_id = Uuid::new_v4();
    presence.register(
        &payload.seller_id,
        PresenceEntry {
            conn_id,
            role: payload.role,
            transport: transport.clone(),
        },
    );

    tracing::debug!(
        "Client {} registered (seller: {}, role: {}, conn: {})",
        addr,
        payload.seller_id,
        payload.role,
        conn_id
    );

    // 发送注册确认 (用 correlation_id 关联客户端的 request_id)
    let response_payload =
        ResponsePayload::success(format!("Registered as {}", payload.seller_id));
    let response = BusMessage::response(&response_payload).with_correlation_id(msg.request_id);
    if let Err(e) = transport.write_message(&response).await {
        tracing::warn!("Failed to send register response: {}", e);
    }

    Ok((payload.seller_id, conn_id))
}

/// Send register error to client
async fn send_register_error(transport: &Arc<dyn Transport>, msg: &BusMessage, message: &str) {
    let response_payload = ResponsePayload::error(message);
    let response = BusMessage::response(&response_payload).with_correlation_id(msg.request_id);

    if let Err(e) = transport.write_message(&response).await {
        tracing::error!("Failed to send register error: {}", e);
    }

    // Give client some time to receive the message before closing
    tokio::time::sleep(tokio::time::Duration::from_millis(REGISTER_ERROR_DELAY_MS)).await;
}
