// ==========================================
// ERS 文件校验系统 - 审计事件（tracing 实现）
// ==========================================
// 审计事件统一写入 target = "ers_audit"，
// 由订阅者（日志/JSON 输出）负责投递
// ==========================================

use crate::domain::{SchemeData, SchemeInfo, ValidationError};
use crate::importer::error::ImportError;
use crate::importer::pipeline_trait::AuditSink;
use tracing::{error, info, warn};

pub const AUDIT_TARGET: &str = "ers_audit";

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn sheet_resolution_failed(&self, scheme_info: &SchemeInfo, sheet_name: &str, reason: &str) {
        warn!(
            target: AUDIT_TARGET,
            event = "sheet_resolution_failed",
            scheme_ref = %scheme_info.scheme_ref,
            scheme_type = %scheme_info.scheme_type,
            sheet_name = %sheet_name,
            reason = %reason,
            "表格识别失败"
        );
    }

    fn row_validation_failed(
        &self,
        scheme_info: &SchemeInfo,
        sheet_name: &str,
        errors: &[ValidationError],
    ) {
        let detail = serde_json::to_string(errors).unwrap_or_default();
        warn!(
            target: AUDIT_TARGET,
            event = "row_validation_failed",
            scheme_ref = %scheme_info.scheme_ref,
            sheet_name = %sheet_name,
            error_count = errors.len(),
            errors = %detail,
            "行校验失败"
        );
    }

    fn batch_submitted(&self, scheme_data: &SchemeData, employer_ref: &str) {
        info!(
            target: AUDIT_TARGET,
            event = "batch_submitted",
            scheme_ref = %scheme_data.scheme_info.scheme_ref,
            sheet_name = %scheme_data.sheet_name,
            employer_ref = %employer_ref,
            rows = scheme_data.row_count(),
            num_of_slices = ?scheme_data.num_of_slices,
            "批次已提交"
        );
    }

    fn batch_submission_failed(&self, scheme_data: &SchemeData, employer_ref: &str, reason: &str) {
        error!(
            target: AUDIT_TARGET,
            event = "batch_submission_failed",
            scheme_ref = %scheme_data.scheme_info.scheme_ref,
            sheet_name = %scheme_data.sheet_name,
            employer_ref = %employer_ref,
            reason = %reason,
            "批次提交失败"
        );
    }

    fn total_rows(&self, scheme_info: &SchemeInfo, total_rows: usize) {
        info!(
            target: AUDIT_TARGET,
            event = "total_rows",
            scheme_ref = %scheme_info.scheme_ref,
            tax_year = %scheme_info.tax_year,
            total_rows = total_rows,
            "文件总行数"
        );
    }

    fn runtime_exception(&self, scheme_info: &SchemeInfo, context: &str, error: &ImportError) {
        error!(
            target: AUDIT_TARGET,
            event = "runtime_exception",
            scheme_ref = %scheme_info.scheme_ref,
            context = %context,
            kind = error.kind(),
            error = %error,
            "运行期异常"
        );
    }
}
