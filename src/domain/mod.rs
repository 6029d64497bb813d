// ==========================================
// ERS 文件校验系统 - 领域模型层
// ==========================================
// 职责: 定义申报、模板、行、校验错误等领域实体
// 红线: 不含解析逻辑，不含提交逻辑
// ==========================================

pub mod row;
pub mod scheme;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use row::{column_letter, Cell, CellRef, Row, ValidationError, ValidatorRow};
pub use scheme::{ProcessOutcome, SchemeData, SchemeInfo, SheetSummary};
pub use sheet::SheetInfo;
pub use types::SchemeFamily;
