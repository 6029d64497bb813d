// ==========================================
// ERS 文件校验系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 除 RuleEngine 外均为对当前文件的终止性错误
// ==========================================

use crate::domain::ValidationError;
use thiserror::Error;

/// 协作方错误的统一装箱类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件/流错误 =====
    #[error("stream error: {0}")]
    Stream(String),

    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("file read error: {0}")]
    FileRead(String),

    // ===== 表格识别错误 =====
    #[error("could not set the validator: unrecognised sheet name '{sheet_name}'")]
    UnrecognizedSheet { sheet_name: String },

    #[error("{sheet_scheme} is not equal to {declared_scheme}")]
    SchemeMismatch {
        sheet_name: String,
        sheet_scheme: String,
        declared_scheme: String,
    },

    #[error("Header doesn't match for sheet '{sheet_name}': {message}")]
    HeaderMismatch { sheet_name: String, message: String },

    #[error("file does not match any known template: {0}")]
    UnknownTemplate(String),

    #[error(
        "no data in sheet '{sheet_name}': headers end at row {header_row}, data expected from cell A{first_data_row}"
    )]
    EmptyFile {
        sheet_name: String,
        header_row: usize,
        first_data_row: usize,
    },

    // ===== 数据校验错误 =====
    #[error("row validation failed in sheet '{sheet_name}' at row {row_index} ({} error(s))", .errors.len())]
    RowValidation {
        sheet_name: String,
        row_index: usize,
        errors: Vec<ValidationError>,
    },

    // ===== 规则引擎内部故障（原样透传，不转换为数据错误）=====
    #[error(transparent)]
    RuleEngine(#[from] RuleEngineError),

    // ===== 下游错误 =====
    #[error("submission failed for sheet '{sheet_name}': {source}")]
    Submission {
        sheet_name: String,
        #[source]
        source: BoxError,
    },

    #[error("callback persistence failed for file '{file_ref}': {source}")]
    Persistence {
        file_ref: String,
        #[source]
        source: BoxError,
    },

    // ===== 配置错误 =====
    #[error("invalid config value (key: {key}, value: {value}): {message}")]
    ConfigValue {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 审计用的错误类别标签
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::Stream(_) | ImportError::FileRead(_) => "stream",
            ImportError::XmlParse(_) | ImportError::CsvParse(_) => "parse",
            ImportError::UnrecognizedSheet { .. } => "unrecognised_sheet",
            ImportError::SchemeMismatch { .. } => "scheme_mismatch",
            ImportError::HeaderMismatch { .. } | ImportError::UnknownTemplate(_) => "shape",
            ImportError::EmptyFile { .. } => "empty_file",
            ImportError::RowValidation { .. } => "row_validation",
            ImportError::RuleEngine(_) => "rule_engine",
            ImportError::Submission { .. } => "submission",
            ImportError::Persistence { .. } => "persistence",
            ImportError::ConfigValue { .. } => "config",
            ImportError::Internal(_) | ImportError::Other(_) => "internal",
        }
    }
}

/// 规则引擎错误（引擎自身故障，区别于数据校验失败）
#[derive(Error, Debug)]
pub enum RuleEngineError {
    #[error("unknown rule set: {0}")]
    UnknownRuleSet(String),

    #[error("rule catalog error: {0}")]
    Catalog(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

// 实现 From<zip::result::ZipError>
impl From<zip::result::ZipError> for ImportError {
    fn from(err: zip::result::ZipError) -> Self {
        ImportError::Stream(err.to_string())
    }
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ImportError {
    fn from(err: quick_xml::Error) -> Self {
        ImportError::XmlParse(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
