// ==========================================
// ERS 文件校验系统 - 配置层
// ==========================================
// 职责: 分批与行流配置管理，支持 JSON 文件与环境变量覆写
// ==========================================

pub mod batch_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use batch_config_trait::BatchConfigReader;
pub use config_manager::{config_keys, ConfigManager, ENV_PREFIX};
