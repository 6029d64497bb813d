// ==========================================
// ERS 文件校验系统 - 分批配置读取 Trait
// ==========================================
// 职责: 定义管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::batch_submitter::BatchSettings;
use crate::importer::error::BoxError;
use async_trait::async_trait;

// ==========================================
// BatchConfigReader Trait
// ==========================================
// 用途: 文件处理器读取分批与行流配置
// 实现者: ConfigManager
#[async_trait]
pub trait BatchConfigReader: Send + Sync {
    /// 是否启用大表拆分
    ///
    /// # 默认值
    /// - true
    async fn is_split_large_schemes_enabled(&self) -> Result<bool, BoxError>;

    /// 单批次最大行数
    ///
    /// # 默认值
    /// - 10000（0 表示不拆分）
    async fn get_max_rows_per_submission(&self) -> Result<usize, BoxError>;

    /// 单行展开列数上限
    ///
    /// # 默认值
    /// - 1024
    async fn get_max_columns_per_row(&self) -> Result<usize, BoxError>;

    /// 外部规则目录路径
    ///
    /// # 返回
    /// - None: 使用内置规则目录
    async fn get_rule_catalog_path(&self) -> Result<Option<String>, BoxError>;

    /// 组合读取分批配置
    async fn get_batch_settings(&self) -> Result<BatchSettings, BoxError> {
        Ok(BatchSettings {
            split_large_schemes: self.is_split_large_schemes_enabled().await?,
            max_rows_per_submission: self.get_max_rows_per_submission().await?,
        })
    }
}
