//! Realtime Channel
//!
//! 卖家客户端通过 TCP 长连接接收实时通知。连接建立后第一帧必须是
//! Register，之后服务端按需推送 Notification 帧。

pub mod listener;
pub mod transport;

pub use listener::RealtimeServer;
pub use transport::{MemoryTransport, TcpTransport, Transport};
