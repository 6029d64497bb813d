// ==========================================
// ERS 文件校验系统 - 表格模板定义
// ==========================================
// 职责: SheetInfo（模板注册表条目，进程启动时加载，之后只读）
// ==========================================

use crate::domain::types::SchemeFamily;
use serde::Serialize;

// ==========================================
// SheetInfo - 表格模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetInfo {
    pub scheme_family: SchemeFamily,
    pub header_row_count: usize, // 表头所在行号，同时是数据起始偏移
    pub sheet_name: &'static str,
    pub sheet_title: &'static str,
    pub rule_set_id: &'static str,
    pub headers: &'static [&'static str],
}

impl SheetInfo {
    /// 期望列数（= 表头标签数）
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// 第一条数据行的行号（1 起）
    pub fn first_data_row(&self) -> usize {
        self.header_row_count + 1
    }
}
