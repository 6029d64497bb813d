// ==========================================
// ERS 文件校验系统 - 分批提交器
// ==========================================
// 职责: 按最大行数拆分 SchemeData，顺序提交各切片
// 红线: 同一表格的切片严格按序提交；不回滚已提交批次
// ==========================================

use crate::domain::SchemeData;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::pipeline_trait::{AuditSink, SubmissionTransport};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 分批配置（由 BatchConfigReader 读取）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub split_large_schemes: bool,
    pub max_rows_per_submission: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            split_large_schemes: true,
            max_rows_per_submission: 10_000,
        }
    }
}

/// 计算切片区间
///
/// - 未启用拆分 / 上限为 0 / 行数不超过上限: 单个区间
/// - 否则 ceil(rows / max) 个区间，除最后一个外均为 max 行
pub fn plan_slices(row_count: usize, settings: &BatchSettings) -> Vec<Range<usize>> {
    let max = settings.max_rows_per_submission;
    if !settings.split_large_schemes || max == 0 || row_count <= max {
        return vec![0..row_count];
    }

    (0..row_count)
        .step_by(max)
        .map(|start| start..(start + max).min(row_count))
        .collect()
}

pub struct BatchSubmitter {
    transport: Arc<dyn SubmissionTransport>,
    audit: Arc<dyn AuditSink>,
    settings: BatchSettings,
}

impl BatchSubmitter {
    pub fn new(
        transport: Arc<dyn SubmissionTransport>,
        audit: Arc<dyn AuditSink>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            transport,
            audit,
            settings,
        }
    }

    /// 提交一个表格的数据
    ///
    /// # 返回
    /// - Ok(n): 提交的批次数
    /// - Err(Submission): 某一切片提交失败（之前的切片不回滚）
    pub async fn send_scheme(&self, scheme_data: &SchemeData, employer_ref: &str) -> ImportResult<usize> {
        let slices = plan_slices(scheme_data.row_count(), &self.settings);

        if slices.len() == 1 {
            self.send_scheme_data(scheme_data, employer_ref).await?;
            return Ok(1);
        }

        let num_of_slices = slices.len();
        info!(
            sheet_name = %scheme_data.sheet_name,
            rows = scheme_data.row_count(),
            slices = num_of_slices,
            "表格行数超过上限，分批提交"
        );
        for range in slices {
            let batch = scheme_data.slice(range, num_of_slices);
            self.send_scheme_data(&batch, employer_ref).await?;
        }
        Ok(num_of_slices)
    }

    /// 提交单个批次，并将结果报告给审计
    pub async fn send_scheme_data(&self, scheme_data: &SchemeData, employer_ref: &str) -> ImportResult<()> {
        match self.transport.submit(scheme_data, employer_ref).await {
            Ok(()) => {
                debug!(
                    sheet_name = %scheme_data.sheet_name,
                    rows = scheme_data.row_count(),
                    "批次已提交"
                );
                self.audit.batch_submitted(scheme_data, employer_ref);
                Ok(())
            }
            Err(source) => {
                error!(
                    sheet_name = %scheme_data.sheet_name,
                    error = %source,
                    "批次提交失败"
                );
                self.audit
                    .batch_submission_failed(scheme_data, employer_ref, &source.to_string());
                Err(ImportError::Submission {
                    sheet_name: scheme_data.sheet_name.clone(),
                    source,
                })
            }
        }
    }
}
