// ==========================================
// ERS 文件校验系统 - 核心库
// ==========================================
// 技术栈: Rust + tokio + zip/quick-xml + csv
// 系统定位: 员工持股计划申报文件的导入、校验与分批提交管道
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 行流/识别/校验/提交
pub mod importer;

// 配置层 - 分批配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::SchemeFamily;

// 领域实体
pub use domain::{
    Row, SchemeData, SchemeInfo, SheetInfo, ValidationError, ValidatorRow, ProcessOutcome,
};

// 管道
pub use importer::{
    BatchSubmitter, FileProcessor, FileRequest, ImportError, ImportResult, SchemaRegistry,
    SheetAggregator,
};

// 配置
pub use config::{BatchConfigReader, ConfigManager};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ERS 文件校验系统";
