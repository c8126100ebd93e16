//! HR Server - 人力资源管理后端
//!
//! # 架构概述
//!
//! 本模块是 HR 后端的主入口，提供以下核心功能：
//!
//! - **领域服务** (`services`): 合同/请假状态机与定时巡检
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **通知** (`notify`): WebSocket 广播中心
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! hr-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── services/      # 合同、请假、巡检 (领域规则层)
//! ├── api/           # HTTP 路由和处理器
//! ├── notify/        # 通知中心与发布接口
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{BackgroundTasks, Config, Server, ServerState};
pub use db::DbService;
pub use notify::{NotificationHub, NotificationPublisher};
pub use services::{ContractService, DomainError, HrMonitor, LeaveService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不是错误
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("WORK_DIR")
        .map(|dir| format!("{dir}/logs"))
        .ok();

    init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   __  __  ____       _____
  / / / / / __ \     / ___/___  ______   _____  _____
 / /_/ / / /_/ /_____\__ \/ _ \/ ___/ | / / _ \/ ___/
/ __  / / _, _/_____/__/ /  __/ /   | |/ /  __/ /
/_/ /_/ /_/ |_|     /____/\___/_/    |___/\___/_/
"#
    );
}
