// ==========================================
// ERS 文件校验系统 - 文件处理器
// ==========================================
// 职责: 单个文件的完整处理流程
// 流程:
//   1. 读取分批配置
//   2. 打开字节流 → 惰性行流 → 表格聚合（阻塞线程池中顺序执行）
//   3. 各表并发提交，同表切片顺序提交
//   4. 审计总行数 → 保存回调记录
// 红线: 任一终止性错误先审计为运行期异常，再原样返回；已提交批次不回滚
// ==========================================

use crate::config::BatchConfigReader;
use crate::domain::{ProcessOutcome, SchemeData, SchemeInfo, SheetSummary};
use crate::importer::batch_submitter::BatchSubmitter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::pipeline_trait::{
    AuditSink, ByteSource, RuleEngine, SessionStore, SubmissionTransport,
};
use crate::importer::row_validator::RowValidator;
use crate::importer::schema_registry::SchemaRegistry;
use crate::importer::sheet_aggregator::SheetAggregator;
use crate::importer::sheet_identifier::SheetIdentifier;
use crate::importer::stream_extractor::{csv_rows, OdsDocument};
use futures::future::{join_all, try_join_all};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// FileRequest - 单个文件的处理请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// zip + content.xml，可含多个表
    Ods,
    /// 单表 CSV，表名由调用方给出
    Csv { sheet_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub file_ref: String,     // 回调记录键
    pub download_ref: String, // 交给 ByteSource 的引用
    pub employer_ref: String,
    pub format: InputFormat,
}

impl FileRequest {
    /// 按扩展名推断格式；CSV 的表名取文件名（去扩展名）
    pub fn from_path(path: &Path, employer_ref: impl Into<String>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_csv = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let format = if is_csv {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            InputFormat::Csv { sheet_name: stem }
        } else {
            InputFormat::Ods
        };

        Self {
            file_ref: file_name,
            download_ref: path.to_string_lossy().into_owned(),
            employer_ref: employer_ref.into(),
            format,
        }
    }
}

// ==========================================
// FileProcessor - 文件处理器
// ==========================================
pub struct FileProcessor<C>
where
    C: BatchConfigReader,
{
    // 配置读取器
    config: C,

    // 外部协作方
    source: Arc<dyn ByteSource>,
    engine: Arc<dyn RuleEngine>,
    audit: Arc<dyn AuditSink>,
    transport: Arc<dyn SubmissionTransport>,
    sessions: Arc<dyn SessionStore>,

    // 只读模板注册表
    registry: &'static SchemaRegistry,
}

impl<C> FileProcessor<C>
where
    C: BatchConfigReader,
{
    /// 创建文件处理器
    ///
    /// # 参数
    /// - config: 分批配置读取器
    /// - source: 字节源
    /// - engine: 规则引擎
    /// - audit: 审计
    /// - transport: 提交通道
    /// - sessions: 回调记录存储
    pub fn new(
        config: C,
        source: Arc<dyn ByteSource>,
        engine: Arc<dyn RuleEngine>,
        audit: Arc<dyn AuditSink>,
        transport: Arc<dyn SubmissionTransport>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            source,
            engine,
            audit,
            transport,
            sessions,
            registry: SchemaRegistry::global(),
        }
    }

    /// 处理单个文件
    ///
    /// # 返回
    /// - Ok(ProcessOutcome): 各表行数与提交批次数
    /// - Err: 任一终止性错误（已审计）
    #[instrument(skip(self, request, scheme_info), fields(file_ref = %request.file_ref, process_id = tracing::field::Empty))]
    pub async fn process_file(
        &self,
        request: &FileRequest,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<ProcessOutcome> {
        let process_id = Uuid::new_v4();
        tracing::Span::current().record("process_id", tracing::field::display(process_id));
        info!(
            scheme_ref = %scheme_info.scheme_ref,
            scheme_type = %scheme_info.scheme_type,
            "开始处理文件"
        );

        match self.run(process_id, request, scheme_info).await {
            Ok(outcome) => {
                info!(
                    sheets = outcome.sheets.len(),
                    submissions = outcome.submissions,
                    total_rows = outcome.total_rows,
                    "文件处理完成"
                );
                Ok(outcome)
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "文件处理失败");
                self.audit
                    .runtime_exception(scheme_info, &request.file_ref, &e);
                Err(e)
            }
        }
    }

    /// 并发处理多个文件（文件之间无共享可变状态）
    pub async fn process_files(
        &self,
        requests: &[(FileRequest, SchemeInfo)],
    ) -> Vec<ImportResult<ProcessOutcome>> {
        info!(count = requests.len(), "开始批量处理文件");

        let tasks = requests
            .iter()
            .map(|(request, scheme_info)| self.process_file(request, scheme_info));
        let results = join_all(tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量处理完成"
        );
        results
    }

    async fn run(
        &self,
        process_id: Uuid,
        request: &FileRequest,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<ProcessOutcome> {
        // === 步骤 1: 读取配置 ===
        let settings = self
            .config
            .get_batch_settings()
            .await
            .map_err(|e| anyhow::anyhow!("读取分批配置失败: {}", e))?;
        let max_columns = self
            .config
            .get_max_columns_per_row()
            .await
            .map_err(|e| anyhow::anyhow!("读取列数上限失败: {}", e))?;
        debug!(?settings, max_columns, "配置已读取");

        // === 步骤 2: 抽取 + 聚合（阻塞读取与解析放到阻塞线程池） ===
        let source = self.source.clone();
        let aggregator = SheetAggregator::new(
            SheetIdentifier::new(self.registry, self.audit.clone()),
            RowValidator::new(self.engine.clone(), self.audit.clone()),
        );
        let owned_request = request.clone();
        let owned_scheme_info = scheme_info.clone();
        let span = tracing::Span::current();
        let sheets = tokio::task::spawn_blocking(move || {
            span.in_scope(|| {
                extract(
                    source.as_ref(),
                    &aggregator,
                    &owned_request,
                    &owned_scheme_info,
                    max_columns,
                )
            })
        })
        .await
        .map_err(|e| ImportError::Internal(format!("extraction task failed: {}", e)))??;
        info!(sheets = sheets.len(), "表格聚合完成");

        // === 步骤 3: 提交（跨表并发，同表顺序） ===
        let submitter = BatchSubmitter::new(self.transport.clone(), self.audit.clone(), settings);
        let employer_ref = request.employer_ref.as_str();
        let tasks = sheets.iter().map(|scheme_data| {
            let submitter = &submitter;
            async move {
                let submissions = submitter.send_scheme(scheme_data, employer_ref).await?;
                Ok::<_, ImportError>(SheetSummary {
                    sheet_name: scheme_data.sheet_name.clone(),
                    rows: scheme_data.row_count(),
                    submissions,
                })
            }
        });
        let summaries = try_join_all(tasks).await?;

        // === 步骤 4: 记账 ===
        let total_rows: usize = summaries.iter().map(|s| s.rows).sum();
        let submissions: usize = summaries.iter().map(|s| s.submissions).sum();
        self.audit.total_rows(scheme_info, total_rows);

        self.sessions
            .save_callback(&request.file_ref, total_rows)
            .await
            .map_err(|source| ImportError::Persistence {
                file_ref: request.file_ref.clone(),
                source,
            })?;

        Ok(ProcessOutcome {
            process_id,
            sheets: summaries,
            submissions,
            total_rows,
        })
    }
}

/// 字节流 → 行流 → 聚合（同步执行）
fn extract(
    source: &dyn ByteSource,
    aggregator: &SheetAggregator,
    request: &FileRequest,
    scheme_info: &SchemeInfo,
    max_columns: usize,
) -> ImportResult<Vec<SchemeData>> {
    let reader = source.open(&request.download_ref)?;

    match &request.format {
        InputFormat::Ods => {
            let mut document = OdsDocument::open(reader)?.with_max_columns(max_columns);
            let rows = document.rows()?;
            aggregator.get_data(rows, scheme_info)
        }
        InputFormat::Csv { sheet_name } => {
            let data = aggregator.get_csv_data(csv_rows(reader), sheet_name, scheme_info)?;
            Ok(vec![data])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_csv_path() {
        let request = FileRequest::from_path(Path::new("/tmp/in/Other_Grants_V4.CSV"), "emp");
        assert_eq!(request.file_ref, "Other_Grants_V4.CSV");
        assert_eq!(request.download_ref, "/tmp/in/Other_Grants_V4.CSV");
        assert_eq!(
            request.format,
            InputFormat::Csv {
                sheet_name: "Other_Grants_V4".to_string()
            }
        );
    }

    #[test]
    fn test_request_from_ods_path() {
        let request = FileRequest::from_path(Path::new("return.ods"), "emp");
        assert_eq!(request.format, InputFormat::Ods);
        assert_eq!(request.employer_ref, "emp");
    }
}
