// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use ers_file_ingest::config::BatchConfigReader;
use ers_file_ingest::importer::BoxError;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub split_large_schemes: bool,
    pub max_rows_per_submission: usize,
    pub max_columns_per_row: usize,
    pub rule_catalog_path: Option<String>,
    pub fail: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            split_large_schemes: true,
            max_rows_per_submission: 10_000,
            max_columns_per_row: 1024,
            rule_catalog_path: None,
            fail: false,
        }
    }

    /// 指定单批最大行数
    pub fn with_max_rows(max_rows: usize) -> Self {
        let mut config = Self::default();
        config.max_rows_per_submission = max_rows;
        config
    }

    /// 关闭拆分
    pub fn unsplit() -> Self {
        let mut config = Self::default();
        config.split_large_schemes = false;
        config
    }

    /// 配置读取失败
    pub fn failing() -> Self {
        let mut config = Self::default();
        config.fail = true;
        config
    }
}

#[async_trait]
impl BatchConfigReader for MockConfig {
    async fn is_split_large_schemes_enabled(&self) -> Result<bool, BoxError> {
        if self.fail {
            return Err("config store unavailable".into());
        }
        Ok(self.split_large_schemes)
    }

    async fn get_max_rows_per_submission(&self) -> Result<usize, BoxError> {
        Ok(self.max_rows_per_submission)
    }

    async fn get_max_columns_per_row(&self) -> Result<usize, BoxError> {
        Ok(self.max_columns_per_row)
    }

    async fn get_rule_catalog_path(&self) -> Result<Option<String>, BoxError> {
        Ok(self.rule_catalog_path.clone())
    }
}
