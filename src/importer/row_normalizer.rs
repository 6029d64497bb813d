// ==========================================
// ERS 文件校验系统 - 行形状规范化
// ==========================================
// 职责: 截断/补齐到期望列数；识别空白行
// 红线: 纯函数，无失败路径
// ==========================================

/// 规范化为恰好 `expected_count` 列
///
/// - 多余列: 截断，仅保留前 `expected_count` 列
/// - 不足列: 右侧补空字符串
/// - 相等: 原样返回
pub fn construct_column_data(mut cells: Vec<String>, expected_count: usize) -> Vec<String> {
    cells.truncate(expected_count);
    cells.resize(expected_count, String::new());
    cells
}

/// 所有单元格去除首尾空白后均为空
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}
