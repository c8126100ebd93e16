use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::core::{BackgroundTasks, Config};
use crate::db::DbService;
use crate::notify::{HubPublisher, NotificationHub, NotificationPublisher};
use crate::services::{ContractService, HrMonitor, LeaveService};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | SqlitePool | SQLite 连接池 |
/// | hub | Arc<NotificationHub> | 通知广播中心 |
/// | publisher | Arc<dyn NotificationPublisher> | 事件发布接口 |
/// | contracts | ContractService | 合同生命周期服务 |
/// | leaves | LeaveService | 请假生命周期服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub db: SqlitePool,
    /// 通知广播中心
    pub hub: Arc<NotificationHub>,
    /// 事件发布接口 (services 和巡检任务共用)
    pub publisher: Arc<dyn NotificationPublisher>,
    /// 合同生命周期服务
    pub contracts: ContractService,
    /// 请假生命周期服务
    pub leaves: LeaveService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/hr.db, 自动迁移)
    /// 3. 通知中心与发布接口
    /// 4. 领域服务
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| anyhow::anyhow!("database init failed: {e}"))?;

        let hub = Arc::new(NotificationHub::new(config.hub_channel_capacity));
        let publisher: Arc<dyn NotificationPublisher> = Arc::new(HubPublisher::new(hub.clone()));

        Ok(Self::with_parts(config.clone(), db.pool, hub, publisher))
    }

    /// 从现成的组件构造状态 (测试和嵌入式场景)
    pub fn with_parts(
        config: Config,
        pool: SqlitePool,
        hub: Arc<NotificationHub>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        let contracts = ContractService::new(pool.clone(), publisher.clone());
        let leaves = LeaveService::new(pool.clone(), publisher.clone());
        Self {
            config,
            db: pool,
            hub,
            publisher,
            contracts,
            leaves,
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 HTTP 服务器启动之前调用。
    ///
    /// 启动的任务：
    /// - HR 巡检任务 (HrMonitor, 固定间隔, 启动时立即执行一次)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let monitor = HrMonitor::new(
            self.db.clone(),
            self.contracts.clone(),
            self.leaves.clone(),
            self.publisher.clone(),
            Duration::from_secs(self.config.monitor_interval_secs),
        );
        let token = tasks.shutdown_token();
        tasks.spawn("hr_monitor", async move {
            monitor.run(token).await;
        });
    }

    /// 获取数据库连接池
    pub fn get_db(&self) -> SqlitePool {
        self.db.clone()
    }
}
