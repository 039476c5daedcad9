//! Memory 传输层实现 (同进程通信)

use std::sync::Arc;

use async_trait::async_trait;
use shared::BusMessage;
use tokio::sync::Mutex;
use tokio::sync::mpsc;

use super::Transport;
use crate::utils::AppError;

/// In-process transport for tests and same-process wiring
///
/// `pair()` 返回两端，一端写入的消息由另一端读出。
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    tx: mpsc::UnboundedSender<BusMessage>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<BusMessage>>>,
}

impl MemoryTransport {
    /// Create a connected pair of transports
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();

        let left = Self {
            tx: tx_a,
            rx: Arc::new(Mutex::new(rx_b)),
        };
        let right = Self {
            tx: tx_b,
            rx: Arc::new(Mutex::new(rx_a)),
        };
        (left, right)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn read_message(&self) -> Result<BusMessage, AppError> {
        let mut rx = self.rx.lock().await;
        rx.recv().await.ok_or(AppError::ClientDisconnected)
    }

    async fn write_message(&self, msg: &BusMessage) -> Result<(), AppError> {
        self.tx
            .send(msg.clone())
            .map_err(|_| AppError::ClientDisconnected)
    }

    async fn close(&self) -> Result<(), AppError> {
        Ok(())
    }
}
