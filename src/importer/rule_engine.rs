// ==========================================
// ERS 文件校验系统 - 规则目录引擎
// ==========================================
// 职责: 从 JSON 规则目录加载各规则集，按列校验单元格
// 规则: 空值仅在 required 时报错；非空值执行对应检查
// ==========================================

use crate::domain::{CellRef, ValidationError, ValidatorRow};
use crate::importer::error::RuleEngineError;
use crate::importer::pipeline_trait::RuleEngine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// 随程序发布的默认规则目录
const BUNDLED_CATALOG: &str = include_str!("../../config/validation_rules.json");

// ==========================================
// CellCheck - 单元格检查类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellCheck {
    Required,
    Date,
    Integer,
    Decimal { max_dp: usize },
    YesNo,
    MaxLength { max: usize },
}

impl CellCheck {
    /// 非空值是否通过检查
    fn accepts(&self, value: &str) -> bool {
        match self {
            CellCheck::Required => true,
            CellCheck::Date => {
                value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            }
            CellCheck::Integer => is_integer(value),
            CellCheck::Decimal { max_dp } => is_decimal(value, *max_dp),
            CellCheck::YesNo => {
                value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("no")
            }
            CellCheck::MaxLength { max } => value.chars().count() <= *max,
        }
    }
}

fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(value: &str, max_dp: usize) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    match unsigned.split_once('.') {
        None => is_integer(unsigned),
        Some((whole, fraction)) => {
            is_integer(whole)
                && !fraction.is_empty()
                && fraction.len() <= max_dp
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

// ==========================================
// CellRule - 单列规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRule {
    pub column: String,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub required: bool,
    pub check: CellCheck,
}

impl CellRule {
    /// 校验单个单元格值（缺失列视为空值）
    fn evaluate(&self, value: Option<&str>, row_index: usize) -> Option<ValidationError> {
        let value = value.map(str::trim).unwrap_or("");
        let passed = if value.is_empty() {
            !(self.required || self.check == CellCheck::Required)
        } else {
            self.check.accepts(value)
        };

        if passed {
            return None;
        }
        Some(ValidationError {
            cell: CellRef {
                column: self.column.clone(),
                row: row_index,
            },
            code: self.code.clone(),
            message: self.message.clone(),
        })
    }
}

// ==========================================
// RuleCatalog - 规则目录
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleCatalog {
    pub rule_sets: HashMap<String, Vec<CellRule>>,
}

impl RuleCatalog {
    pub fn from_json(json: &str) -> Result<Self, RuleEngineError> {
        serde_json::from_str(json).map_err(|e| RuleEngineError::Catalog(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleEngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RuleEngineError::Catalog(format!("无法读取规则目录 {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), rule_sets = catalog.rule_sets.len(), "规则目录已加载");
        Ok(catalog)
    }

    pub fn bundled() -> Result<Self, RuleEngineError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn rules(&self, rule_set_id: &str) -> Option<&[CellRule]> {
        self.rule_sets.get(rule_set_id).map(Vec::as_slice)
    }
}

// ==========================================
// CatalogRuleEngine - 基于规则目录的引擎
// ==========================================
pub struct CatalogRuleEngine {
    catalog: RuleCatalog,
}

impl CatalogRuleEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    /// 优先加载指定路径，未指定时使用内置目录
    pub fn load(path: Option<&str>) -> Result<Self, RuleEngineError> {
        let catalog = match path {
            Some(path) if !path.trim().is_empty() => RuleCatalog::from_path(path)?,
            _ => RuleCatalog::bundled()?,
        };
        Ok(Self::new(catalog))
    }
}

impl RuleEngine for CatalogRuleEngine {
    fn validate(
        &self,
        rule_set_id: &str,
        row: &ValidatorRow,
    ) -> Result<Vec<ValidationError>, RuleEngineError> {
        let rules = self
            .catalog
            .rules(rule_set_id)
            .ok_or_else(|| RuleEngineError::UnknownRuleSet(rule_set_id.to_string()))?;

        let errors: Vec<ValidationError> = rules
            .iter()
            .filter_map(|rule| {
                let value = row.cell(&rule.column).map(|c| c.value.as_str());
                rule.evaluate(value, row.row_index)
            })
            .collect();

        if !errors.is_empty() {
            debug!(
                rule_set_id = %rule_set_id,
                row_index = row.row_index,
                error_count = errors.len(),
                "行校验未通过"
            );
        }
        Ok(errors)
    }
}
