//! Market Server - 多卖家商城订单后端
//!
//! # 架构概述
//!
//! 本模块是 Market Server 的主入口，提供以下核心功能：
//!
//! - **订单流水线** (`orders`): 校验、库存扣减、落库、卖家散发
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **通知** (`notify`): 落库优先的通知服务 + 在线表
//! - **实时通道** (`message`): TCP 长连接推送
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! market-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── orders/        # 下单流水线
//! ├── notify/        # 通知服务与在线表
//! ├── message/       # 实时通道 (传输层 + 监听)
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use notify::{InMemoryPresence, Notifier, PresenceEntry, PresenceRegistry};
pub use orders::{OrderError, OrderIntake, LOW_STOCK_THRESHOLD};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
    __  ___           __        __
   /  |/  /___ ______/ /_______/ /_
  / /|_/ / __ `/ ___/ //_/ _ \/ __/
 / /  / / /_/ / /  / ,< /  __/ /_
/_/  /_/\__,_/_/  /_/|_|\___/\__/
    "#
    );
}
