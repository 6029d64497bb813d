// ==========================================
// ERS 文件校验系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 来源优先级: 环境变量 ERS_INGEST_<KEY> > JSON 配置文件 > 内置默认值
// ==========================================

use crate::config::batch_config_trait::BatchConfigReader;
use crate::importer::error::{BoxError, ImportError, ImportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;
use tracing::{info, warn};

/// 环境变量覆写前缀
pub const ENV_PREFIX: &str = "ERS_INGEST_";

pub(crate) fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn is_false(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "n" | "off"
    )
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Default)]
pub struct ConfigManager {
    values: RwLock<HashMap<String, String>>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象加载配置
    ///
    /// # 参数
    /// - json: 形如 {"max_rows_per_submission": 10000, "split_large_schemes": true}
    ///
    /// # 返回
    /// - Err(ConfigValue): 顶层不是对象，或值不是标量
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        let parsed: Value = serde_json::from_str(json).map_err(|e| ImportError::ConfigValue {
            key: "<root>".to_string(),
            value: String::new(),
            message: e.to_string(),
        })?;

        let object = match parsed {
            Value::Object(map) => map,
            other => {
                return Err(ImportError::ConfigValue {
                    key: "<root>".to_string(),
                    value: other.to_string(),
                    message: "配置文件顶层必须是 JSON 对象".to_string(),
                })
            }
        };

        let mut values = HashMap::new();
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                other => {
                    return Err(ImportError::ConfigValue {
                        key,
                        value: other.to_string(),
                        message: "配置值必须是字符串、数字或布尔值".to_string(),
                    })
                }
            };
            values.insert(key, text);
        }

        Ok(Self {
            values: RwLock::new(values),
        })
    }

    /// 从 JSON 文件加载配置
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ImportError::FileRead(format!("{}: {}", path.display(), e)))?;
        let manager = Self::from_json_str(&json)?;
        info!(path = %path.display(), "配置文件已加载");
        Ok(manager)
    }

    /// 应用进程环境变量覆写
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::vars())
    }

    /// 应用 `ERS_INGEST_<KEY>` 形式的覆写（键名转小写）
    pub fn with_overrides<I>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                let key = key.to_lowercase();
                info!(config_key = %key, "环境变量覆写配置");
                self.set_config_value(&key, &value);
            }
        }
        self
    }

    pub fn set_config_value(&self, key: &str, value: &str) {
        match self.values.write() {
            Ok(mut values) => {
                values.insert(key.to_string(), value.to_string());
            }
            Err(e) => warn!(config_key = %key, error = %e, "配置写锁获取失败"),
        }
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 未配置
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, BoxError> {
        let values = self
            .values
            .read()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        Ok(values.get(key).cloned())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, BoxError> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON 格式，键有序）
    pub fn get_config_snapshot(&self) -> Result<String, BoxError> {
        let values = self
            .values
            .read()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        let ordered: BTreeMap<&String, &String> = values.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    fn parse_or_default<T>(&self, key: &str, default: T) -> Result<T, BoxError>
    where
        T: std::str::FromStr + std::fmt::Display + Copy,
    {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.trim().parse::<T>().unwrap_or_else(|_| {
            warn!(
                config_key = key,
                raw_value = %value,
                default = %default,
                "配置值格式错误，使用默认值"
            );
            default
        }))
    }
}

// ==========================================
// BatchConfigReader 实现
// ==========================================
#[async_trait]
impl BatchConfigReader for ConfigManager {
    async fn is_split_large_schemes_enabled(&self) -> Result<bool, BoxError> {
        let value = self.get_config_or_default(config_keys::SPLIT_LARGE_SCHEMES, "true")?;
        if is_true(&value) {
            Ok(true)
        } else if is_false(&value) {
            Ok(false)
        } else {
            warn!(
                config_key = config_keys::SPLIT_LARGE_SCHEMES,
                raw_value = %value,
                "配置值格式错误，使用默认值 true"
            );
            Ok(true)
        }
    }

    async fn get_max_rows_per_submission(&self) -> Result<usize, BoxError> {
        self.parse_or_default(config_keys::MAX_ROWS_PER_SUBMISSION, 10_000usize)
    }

    async fn get_max_columns_per_row(&self) -> Result<usize, BoxError> {
        self.parse_or_default(config_keys::MAX_COLUMNS_PER_ROW, 1024usize)
    }

    async fn get_rule_catalog_path(&self) -> Result<Option<String>, BoxError> {
        Ok(self
            .get_config_value(config_keys::RULE_CATALOG_PATH)?
            .filter(|p| !p.trim().is_empty()))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 分批提交
    pub const SPLIT_LARGE_SCHEMES: &str = "split_large_schemes";
    pub const MAX_ROWS_PER_SUBMISSION: &str = "max_rows_per_submission";

    // 行流
    pub const MAX_COLUMNS_PER_ROW: &str = "max_columns_per_row";

    // 规则目录（未配置时使用内置目录）
    pub const RULE_CATALOG_PATH: &str = "rule_catalog_path";
}
