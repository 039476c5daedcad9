use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    NotificationRepository, OrderRepository, ProductRepository, SellerRepository,
};
use crate::notify::{InMemoryPresence, Notifier, PresenceRegistry};
use crate::orders::{InventoryAdjuster, OrderIntake, SellerFanout};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | presence | Arc<dyn PresenceRegistry> | 在线连接表 |
/// | notifier | Notifier | 通知服务 (落库 + 推送) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 在线连接表
    pub presence: Arc<dyn PresenceRegistry>,
    /// 通知服务
    pub notifier: Notifier,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/market.db)
    /// 3. 在线表和通知服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("market.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        Ok(Self::with_db(config.clone(), db))
    }

    /// 从已有数据库句柄构造 (测试场景用内存引擎)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let presence: Arc<dyn PresenceRegistry> = Arc::new(InMemoryPresence::new());
        let notifier = Notifier::new(NotificationRepository::new(db.clone()), presence.clone());

        Self {
            config,
            db,
            presence,
            notifier,
        }
    }

    // ========== Repository 访问器 ==========

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    pub fn sellers(&self) -> SellerRepository {
        SellerRepository::new(self.db.clone())
    }

    pub fn notifications(&self) -> NotificationRepository {
        NotificationRepository::new(self.db.clone())
    }

    /// 下单流水线 (校验 -> 扣减 -> 落库 -> 散发)
    pub fn order_intake(&self) -> OrderIntake {
        OrderIntake::new(
            self.orders(),
            InventoryAdjuster::new(self.products()),
            SellerFanout::new(self.sellers(), self.notifier.clone()),
        )
    }
}
