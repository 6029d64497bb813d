// ==========================================
// ERS 文件校验系统 - 申报与表格数据模型
// ==========================================
// 职责: SchemeInfo（申报身份，不可变）/ SchemeData（单表校验结果）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

// ==========================================
// SchemeInfo - 申报身份
// ==========================================
// 每个上传文件创建一次，整条管道只读传递
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeInfo {
    pub scheme_ref: String,
    pub timestamp: DateTime<Utc>,
    pub scheme_id: String,
    pub tax_year: String,
    pub scheme_name: String,
    pub scheme_type: String, // 申报的计划族代码（CSOP/EMI/SIP/OTHER）
}

// ==========================================
// SchemeData - 单个表格的规范化数据
// ==========================================
// 由表格聚合器创建；分批提交时只复制出子切片，不做原地修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeData {
    pub scheme_info: SchemeInfo,
    pub sheet_name: String,
    /// 仅拆分后的子批次携带：总切片数
    pub num_of_slices: Option<usize>,
    pub data: Vec<Vec<String>>,
}

impl SchemeData {
    pub fn new(scheme_info: SchemeInfo, sheet_name: impl Into<String>, data: Vec<Vec<String>>) -> Self {
        Self {
            scheme_info,
            sheet_name: sheet_name.into(),
            num_of_slices: None,
            data,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// 复制出 `range` 行区间作为第 k/n 个子批次
    ///
    /// 区间越界部分被截断（最后一片自然更短）
    pub fn slice(&self, range: Range<usize>, num_of_slices: usize) -> SchemeData {
        let end = range.end.min(self.data.len());
        let start = range.start.min(end);
        SchemeData {
            scheme_info: self.scheme_info.clone(),
            sheet_name: self.sheet_name.clone(),
            num_of_slices: Some(num_of_slices),
            data: self.data[start..end].to_vec(),
        }
    }
}

// ==========================================
// 处理结果汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub sheet_name: String,
    pub rows: usize,
    pub submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub process_id: uuid::Uuid,
    pub sheets: Vec<SheetSummary>,
    pub submissions: usize, // 全部表格的提交批次数
    pub total_rows: usize,  // 全部表格的数据行数
}
