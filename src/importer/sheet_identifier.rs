// ==========================================
// ERS 文件校验系统 - 表格识别器
// ==========================================
// 职责: 表名 → 模板；核对模板计划族与申报计划类型
// 审计: 每条失败路径恰好一次，成功不审计
// ==========================================

use crate::domain::{SchemeInfo, SheetInfo};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::pipeline_trait::AuditSink;
use crate::importer::schema_registry::SchemaRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SheetIdentifier {
    registry: &'static SchemaRegistry,
    audit: Arc<dyn AuditSink>,
}

impl SheetIdentifier {
    pub fn new(registry: &'static SchemaRegistry, audit: Arc<dyn AuditSink>) -> Self {
        Self { registry, audit }
    }

    /// 识别并确定表格模板
    ///
    /// # 返回
    /// - Ok(SheetInfo): 表名已登记且计划族一致
    /// - Err(UnrecognizedSheet): 表名未登记
    /// - Err(SchemeMismatch): 计划族不一致（大小写不敏感）
    pub fn identify_and_define_sheet(
        &self,
        sheet_name: &str,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<&'static SheetInfo> {
        let sheet = match self.registry.lookup(sheet_name) {
            Some(sheet) => sheet,
            None => {
                warn!(sheet_name = %sheet_name, "未登记的表名");
                self.audit
                    .sheet_resolution_failed(scheme_info, sheet_name, "could not set the validator");
                return Err(ImportError::UnrecognizedSheet {
                    sheet_name: sheet_name.to_string(),
                });
            }
        };

        if !sheet.scheme_family.matches(&scheme_info.scheme_type) {
            let sheet_scheme = sheet.scheme_family.code().to_lowercase();
            let declared_scheme = scheme_info.scheme_type.trim().to_lowercase();
            let reason = format!("{} is not equal to {}", sheet_scheme, declared_scheme);

            warn!(sheet_name = %sheet_name, reason = %reason, "计划族不一致");
            self.audit
                .sheet_resolution_failed(scheme_info, sheet_name, &reason);
            return Err(ImportError::SchemeMismatch {
                sheet_name: sheet_name.to_string(),
                sheet_scheme,
                declared_scheme,
            });
        }

        debug!(
            sheet_name = %sheet_name,
            rule_set_id = sheet.rule_set_id,
            columns = sheet.column_count(),
            "表格模板已确定"
        );
        Ok(sheet)
    }
}
