// ==========================================
// 单元测试辅助: 模板行 + 协作方替身
// ==========================================

use crate::domain::{SchemeData, SchemeInfo, ValidationError};
use crate::importer::error::ImportError;
use crate::importer::pipeline_trait::AuditSink;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

/// 按模板生成标题行 + 表头行
pub fn header_block(sheet: &crate::domain::SheetInfo) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = (1..sheet.header_row_count)
        .map(|_| vec![String::new()])
        .collect();
    if let Some(first) = rows.first_mut() {
        first[0] = sheet.sheet_title.to_string();
    }
    rows.push(sheet.headers.iter().map(|h| h.to_string()).collect());
    rows
}

pub fn scheme_info(scheme_type: &str) -> SchemeInfo {
    SchemeInfo {
        scheme_ref: "XA1100000000000".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 4, 6, 0, 0, 0).unwrap(),
        scheme_id: "123PA12345678".to_string(),
        tax_year: "2023/24".to_string(),
        scheme_name: "MyScheme".to_string(),
        scheme_type: scheme_type.to_string(),
    }
}

// ==========================================
// RecordingAuditSink - 记录审计事件
// ==========================================
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<String>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AuditSink for RecordingAuditSink {
    fn sheet_resolution_failed(&self, _scheme_info: &SchemeInfo, sheet_name: &str, reason: &str) {
        self.record(format!("sheet_resolution_failed:{}:{}", sheet_name, reason));
    }

    fn row_validation_failed(
        &self,
        _scheme_info: &SchemeInfo,
        sheet_name: &str,
        errors: &[ValidationError],
    ) {
        self.record(format!("row_validation_failed:{}:{}", sheet_name, errors.len()));
    }

    fn batch_submitted(&self, scheme_data: &SchemeData, _employer_ref: &str) {
        self.record(format!(
            "batch_submitted:{}:{}",
            scheme_data.sheet_name,
            scheme_data.row_count()
        ));
    }

    fn batch_submission_failed(&self, scheme_data: &SchemeData, _employer_ref: &str, _reason: &str) {
        self.record(format!("batch_submission_failed:{}", scheme_data.sheet_name));
    }

    fn total_rows(&self, _scheme_info: &SchemeInfo, total_rows: usize) {
        self.record(format!("total_rows:{}", total_rows));
    }

    fn runtime_exception(&self, _scheme_info: &SchemeInfo, context: &str, error: &ImportError) {
        self.record(format!("runtime_exception:{}:{}", context, error.kind()));
    }
}
