// ==========================================
// ERS 文件校验系统 - 领域类型定义
// ==========================================
// 职责: 计划族（scheme family）等封闭枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计划族 (Scheme Family)
// ==========================================
// 每个计划族拥有自己的一组表格模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemeFamily {
    Csop,  // 公司股票期权计划
    Emi,   // 企业管理激励
    Sip,   // 股份激励计划
    Other, // 其他（兜底族）
}

impl SchemeFamily {
    /// 计划族代码（大写短码）
    pub fn code(&self) -> &'static str {
        match self {
            SchemeFamily::Csop => "CSOP",
            SchemeFamily::Emi => "EMI",
            SchemeFamily::Sip => "SIP",
            SchemeFamily::Other => "OTHER",
        }
    }

    /// 从代码解析（大小写不敏感，忽略首尾空白）
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "CSOP" => Some(SchemeFamily::Csop),
            "EMI" => Some(SchemeFamily::Emi),
            "SIP" => Some(SchemeFamily::Sip),
            "OTHER" => Some(SchemeFamily::Other),
            _ => None,
        }
    }

    /// 判断申报的计划类型是否属于本计划族
    pub fn matches(&self, declared_scheme_type: &str) -> bool {
        self.code().eq_ignore_ascii_case(declared_scheme_type.trim())
    }
}

impl fmt::Display for SchemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(SchemeFamily::from_code("csop"), Some(SchemeFamily::Csop));
        assert_eq!(SchemeFamily::from_code(" Other "), Some(SchemeFamily::Other));
        assert_eq!(SchemeFamily::from_code("SAYE"), None);
    }

    #[test]
    fn test_matches_declared_type() {
        assert!(SchemeFamily::Emi.matches("emi"));
        assert!(!SchemeFamily::Emi.matches("CSOP"));
    }
}
