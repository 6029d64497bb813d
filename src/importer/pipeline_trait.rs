// ==========================================
// ERS 文件校验系统 - 外部协作方 Trait
// ==========================================
// 职责: 定义管道依赖的外部协作方接口（不包含实现）
// 协作方: 字节源 / 规则引擎 / 审计 / 提交通道 / 回调存储
// ==========================================

use crate::domain::{SchemeData, SchemeInfo, ValidationError, ValidatorRow};
use crate::importer::error::{BoxError, ImportError, ImportResult, RuleEngineError};
use async_trait::async_trait;
use std::io::{Read, Seek};

/// 可随机读取的字节流（zip 归档需要 Seek）
pub trait ContentReader: Read + Seek + Send {}

impl<T: Read + Seek + Send> ContentReader for T {}

// ==========================================
// ByteSource Trait
// ==========================================
// 用途: 按下载引用打开字节流
// 实现者: FsByteSource
pub trait ByteSource: Send + Sync {
    /// 打开下载引用对应的字节流
    ///
    /// # 返回
    /// - Err(ImportError::Stream): 无法打开（终止性错误）
    fn open(&self, reference: &str) -> ImportResult<Box<dyn ContentReader>>;
}

// ==========================================
// RuleEngine Trait
// ==========================================
// 用途: 按规则集校验一行
// 实现者: CatalogRuleEngine
pub trait RuleEngine: Send + Sync {
    /// 校验一行
    ///
    /// # 参数
    /// - rule_set_id: 规则集标识（来自 SheetInfo）
    /// - row: 按列字母寻址的校验行
    ///
    /// # 返回
    /// - Ok(vec![]): 校验通过
    /// - Ok(errors): 单元格级校验失败
    /// - Err: 引擎自身故障（调用方原样透传）
    fn validate(
        &self,
        rule_set_id: &str,
        row: &ValidatorRow,
    ) -> Result<Vec<ValidationError>, RuleEngineError>;
}

// ==========================================
// AuditSink Trait
// ==========================================
// 用途: 审计事件投递（即发即弃）
// 实现者: TracingAuditSink
pub trait AuditSink: Send + Sync {
    /// 表格识别失败（未登记表名 / 计划族不一致）
    fn sheet_resolution_failed(&self, scheme_info: &SchemeInfo, sheet_name: &str, reason: &str);

    /// 行校验失败（携带完整错误列表）
    fn row_validation_failed(
        &self,
        scheme_info: &SchemeInfo,
        sheet_name: &str,
        errors: &[ValidationError],
    );

    /// 批次提交成功
    fn batch_submitted(&self, scheme_data: &SchemeData, employer_ref: &str);

    /// 批次提交失败
    fn batch_submission_failed(&self, scheme_data: &SchemeData, employer_ref: &str, reason: &str);

    /// 单个文件的总行数
    fn total_rows(&self, scheme_info: &SchemeInfo, total_rows: usize);

    /// 运行期异常
    fn runtime_exception(&self, scheme_info: &SchemeInfo, context: &str, error: &ImportError);
}

// ==========================================
// SubmissionTransport Trait
// ==========================================
// 用途: 向下游提交服务发送一个批次
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, scheme_data: &SchemeData, employer_ref: &str) -> Result<(), BoxError>;
}

// ==========================================
// SessionStore Trait
// ==========================================
// 用途: 持久化文件处理完成状态（回调记录）
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save_callback(&self, file_ref: &str, total_rows: usize) -> Result<(), BoxError>;
}
