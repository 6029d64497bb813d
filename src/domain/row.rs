// ==========================================
// ERS 文件校验系统 - 行与校验错误模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 列序号（0 起）→ 列字母: 0→A, 25→Z, 26→AA
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// ==========================================
// Row - 规范化后的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub index: usize, // 表内行号（1 起）
    pub cells: Vec<String>,
}

// ==========================================
// CellRef - 单元格坐标
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub column: String,
    pub row: usize,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// 规则引擎的输入单元格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub column: String,
    pub row: usize,
    pub value: String,
}

// ==========================================
// ValidatorRow - 按列字母寻址的校验行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRow {
    pub row_index: usize,
    pub cells: Vec<Cell>,
}

impl ValidatorRow {
    pub fn from_row(row: &Row) -> Self {
        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(idx, value)| Cell {
                column: column_letter(idx),
                row: row.index,
                value: value.clone(),
            })
            .collect();

        Self {
            row_index: row.index,
            cells,
        }
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.column.eq_ignore_ascii_case(column))
    }
}

// ==========================================
// ValidationError - 单元格级校验错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub cell: CellRef,
    pub code: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.cell, self.code, self.message)
    }
}
