// ==========================================
// ERS 文件校验系统 - 行校验器
// ==========================================
// 职责: 规范化一行 → 交给规则引擎 → 返回规范化单元格或校验错误
// 红线: 引擎故障原样透传，不包装、不审计为行错误
// ==========================================

use crate::domain::{Row, SchemeInfo, SheetInfo, ValidatorRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::pipeline_trait::{AuditSink, RuleEngine};
use crate::importer::row_normalizer::construct_column_data;
use std::sync::Arc;
use tracing::warn;

pub struct RowValidator {
    engine: Arc<dyn RuleEngine>,
    audit: Arc<dyn AuditSink>,
}

impl RowValidator {
    pub fn new(engine: Arc<dyn RuleEngine>, audit: Arc<dyn AuditSink>) -> Self {
        Self { engine, audit }
    }

    /// 生成一行校验通过的数据
    ///
    /// # 参数
    /// - cells: 原始单元格
    /// - row_index: 表内行号（1 起）
    /// - sheet: 已确定的表格模板
    /// - scheme_info: 计划元数据（审计用）
    ///
    /// # 返回
    /// - Ok(cells): 长度恰为 sheet.column_count()
    /// - Err(RowValidation): 规则未通过（已审计一次）
    /// - Err(RuleEngine): 引擎故障
    pub fn generate_row_data(
        &self,
        cells: Vec<String>,
        row_index: usize,
        sheet: &SheetInfo,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<Vec<String>> {
        let row = Row {
            index: row_index,
            cells: construct_column_data(cells, sheet.column_count()),
        };

        let errors = self
            .engine
            .validate(sheet.rule_set_id, &ValidatorRow::from_row(&row))?;

        if errors.is_empty() {
            return Ok(row.cells);
        }

        warn!(
            sheet_name = sheet.sheet_name,
            row_index = row_index,
            error_count = errors.len(),
            first_error = %errors[0],
            "行校验失败"
        );
        self.audit
            .row_validation_failed(scheme_info, sheet.sheet_name, &errors);
        Err(ImportError::RowValidation {
            sheet_name: sheet.sheet_name.to_string(),
            row_index,
            errors,
        })
    }
}
