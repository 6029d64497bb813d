// ==========================================
// ERS 文件校验系统 - 导入层
// ==========================================
// 职责: 字节流 → 行流 → 识别/规范化/校验 → 分批提交
// 支持: ODS（zip + content.xml）, CSV
// ==========================================

// 模块声明
pub mod adapters;
pub mod audit;
pub mod batch_submitter;
pub mod error;
pub mod file_processor;
pub mod pipeline_trait;
pub mod row_normalizer;
pub mod row_validator;
pub mod rule_engine;
pub mod schema_registry;
pub mod sheet_aggregator;
pub mod sheet_identifier;
pub mod stream_extractor;

#[cfg(test)]
mod test_support;

// 重导出核心类型
pub use adapters::{FsByteSource, InMemorySessionStore, JsonLinesTransport};
pub use audit::{TracingAuditSink, AUDIT_TARGET};
pub use batch_submitter::{plan_slices, BatchSettings, BatchSubmitter};
pub use error::{BoxError, ImportError, ImportResult, RuleEngineError};
pub use file_processor::{FileProcessor, FileRequest, InputFormat};
pub use row_normalizer::{construct_column_data, is_blank_row};
pub use row_validator::RowValidator;
pub use rule_engine::{CatalogRuleEngine, CellCheck, CellRule, RuleCatalog};
pub use schema_registry::SchemaRegistry;
pub use sheet_aggregator::{validate_header_row, SheetAggregator};
pub use sheet_identifier::SheetIdentifier;
pub use stream_extractor::{csv_rows, CsvRowStream, OdsDocument, OdsRowStream, RawRow, RowEvent};

// 重导出 Trait 接口
pub use pipeline_trait::{
    AuditSink, ByteSource, ContentReader, RuleEngine, SessionStore, SubmissionTransport,
};
