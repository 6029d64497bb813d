// ==========================================
// ERS 文件校验系统 - 表格聚合器
// ==========================================
// 职责: 驱动 识别 → 表头校验 → 行规范化/校验，按表产出 SchemeData
// 流程:
//   1. SheetStart → 识别模板（失败即终止）
//   2. 表头行之前为标题行，直接跳过
//   3. 表头行严格比对列数与标签
//   4. 数据行: 规范化 → 空白行跳过 → 重复行逐一展开校验（不超过表格行数上限）
// 红线: 行流单次顺序消费，状态仅存在于本次调用的 SheetBuilder 中
// ==========================================

use crate::domain::{column_letter, SchemeData, SchemeInfo, SheetInfo};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_normalizer::{construct_column_data, is_blank_row};
use crate::importer::row_validator::RowValidator;
use crate::importer::sheet_identifier::SheetIdentifier;
use crate::importer::stream_extractor::{RawRow, RowEvent, MAX_SHEET_ROWS};
use tracing::{debug, info, instrument, warn};

pub struct SheetAggregator {
    identifier: SheetIdentifier,
    validator: RowValidator,
}

impl SheetAggregator {
    pub fn new(identifier: SheetIdentifier, validator: RowValidator) -> Self {
        Self {
            identifier,
            validator,
        }
    }

    /// 多表文件（ODS）: 每个已识别的表产出一个 SchemeData
    ///
    /// # 返回
    /// - Ok(list): 至少一个表含数据；无数据的表被跳过
    /// - Err(UnknownTemplate): 文件中没有任何表，或表外出现数据
    /// - Err(EmptyFile): 所有表都没有数据行
    #[instrument(skip(self, rows, scheme_info), fields(scheme_ref = %scheme_info.scheme_ref))]
    pub fn get_data<I>(&self, rows: I, scheme_info: &SchemeInfo) -> ImportResult<Vec<SchemeData>>
    where
        I: IntoIterator<Item = ImportResult<RowEvent>>,
    {
        let mut results = Vec::new();
        let mut current: Option<SheetBuilder> = None;
        let mut first_empty: Option<&'static SheetInfo> = None;
        let mut sheet_seen = false;

        for event in rows {
            match event? {
                RowEvent::SheetStart(name) => {
                    if let Some(builder) = current.take() {
                        self.close_sheet(builder, scheme_info, &mut results, &mut first_empty)?;
                    }
                    let sheet = self.identifier.identify_and_define_sheet(&name, scheme_info)?;
                    debug!(sheet_name = %name, "开始读取表格");
                    current = Some(SheetBuilder::new(sheet));
                    sheet_seen = true;
                }
                RowEvent::Row(raw) => match current.as_mut() {
                    Some(builder) => builder.push(raw, &self.validator, scheme_info)?,
                    None if is_blank_row(&raw.cells) => {}
                    None => {
                        return Err(ImportError::UnknownTemplate(
                            "row data found before any sheet".to_string(),
                        ))
                    }
                },
            }
        }

        if let Some(builder) = current.take() {
            self.close_sheet(builder, scheme_info, &mut results, &mut first_empty)?;
        }

        if !sheet_seen {
            return Err(ImportError::UnknownTemplate(
                "file contains no sheets".to_string(),
            ));
        }
        if results.is_empty() {
            if let Some(sheet) = first_empty {
                return Err(empty_file_error(sheet));
            }
        }

        info!(sheets = results.len(), "文件聚合完成");
        Ok(results)
    }

    /// 单表文件（CSV）: 表名取自文件名，文件内无标题/表头行
    #[instrument(skip(self, rows, scheme_info), fields(scheme_ref = %scheme_info.scheme_ref))]
    pub fn get_csv_data<I>(
        &self,
        rows: I,
        sheet_name: &str,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<SchemeData>
    where
        I: IntoIterator<Item = ImportResult<RowEvent>>,
    {
        let sheet_name = sheet_name.strip_suffix(".csv").unwrap_or(sheet_name);
        let sheet = self
            .identifier
            .identify_and_define_sheet(sheet_name, scheme_info)?;
        let mut builder = SheetBuilder::headerless(sheet);

        for event in rows {
            match event? {
                RowEvent::Row(raw) => builder.push(raw, &self.validator, scheme_info)?,
                RowEvent::SheetStart(name) => {
                    return Err(ImportError::UnknownTemplate(format!(
                        "unexpected sheet '{}' in CSV input",
                        name
                    )))
                }
            }
        }

        let (sheet, data) = builder.finish();
        if data.is_empty() {
            return Err(empty_file_error(sheet));
        }
        info!(sheet_name = sheet.sheet_name, rows = data.len(), "CSV 聚合完成");
        Ok(SchemeData::new(scheme_info.clone(), sheet.sheet_name, data))
    }

    fn close_sheet(
        &self,
        builder: SheetBuilder,
        scheme_info: &SchemeInfo,
        results: &mut Vec<SchemeData>,
        first_empty: &mut Option<&'static SheetInfo>,
    ) -> ImportResult<()> {
        let (sheet, data) = builder.finish();
        if data.is_empty() {
            warn!(sheet_name = sheet.sheet_name, "表格无数据行，跳过");
            first_empty.get_or_insert(sheet);
            return Ok(());
        }
        debug!(sheet_name = sheet.sheet_name, rows = data.len(), "表格读取完成");
        results.push(SchemeData::new(scheme_info.clone(), sheet.sheet_name, data));
        Ok(())
    }
}

/// 表头校验: 列数与标签均须一致（忽略尾部空列、空白差异与大小写）
///
/// # 返回
/// - Ok(n): 模板列数
/// - Err(HeaderMismatch)
pub fn validate_header_row(cells: &[String], sheet: &SheetInfo) -> ImportResult<usize> {
    let used = cells
        .iter()
        .rposition(|c| !c.trim().is_empty())
        .map_or(0, |last| last + 1);
    let expected = sheet.column_count();

    if used != expected {
        return Err(ImportError::HeaderMismatch {
            sheet_name: sheet.sheet_name.to_string(),
            message: format!("expected {} columns, found {}", expected, used),
        });
    }

    for (idx, (actual, label)) in cells.iter().zip(sheet.headers.iter()).enumerate() {
        if normalize_label(actual) != normalize_label(label) {
            return Err(ImportError::HeaderMismatch {
                sheet_name: sheet.sheet_name.to_string(),
                message: format!(
                    "column {} expected '{}', found '{}'",
                    column_letter(idx),
                    label,
                    actual.trim()
                ),
            });
        }
    }

    Ok(expected)
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn empty_file_error(sheet: &SheetInfo) -> ImportError {
    ImportError::EmptyFile {
        sheet_name: sheet.sheet_name.to_string(),
        header_row: sheet.header_row_count,
        first_data_row: sheet.first_data_row(),
    }
}

// ==========================================
// SheetBuilder - 单表累积状态
// ==========================================
struct SheetBuilder {
    sheet: &'static SheetInfo,
    next_row: usize,           // 下一物理行的行号（1 起）
    columns: usize,            // 表头校验后确定的列数
    row_limit: Option<usize>,  // 有数据行的行号上限（CSV 不限）
    data: Vec<Vec<String>>,
}

impl SheetBuilder {
    fn new(sheet: &'static SheetInfo) -> Self {
        Self {
            sheet,
            next_row: 1,
            columns: sheet.column_count(),
            row_limit: Some(MAX_SHEET_ROWS),
            data: Vec::new(),
        }
    }

    /// 无标题/表头行（CSV），首行即数据起始行
    fn headerless(sheet: &'static SheetInfo) -> Self {
        Self {
            sheet,
            next_row: sheet.first_data_row(),
            columns: sheet.column_count(),
            row_limit: None,
            data: Vec::new(),
        }
    }

    fn push(
        &mut self,
        raw: RawRow,
        validator: &RowValidator,
        scheme_info: &SchemeInfo,
    ) -> ImportResult<()> {
        let RawRow { cells, repeated } = raw;
        let start = self.next_row;
        let end = start.checked_add(repeated.max(1)).ok_or_else(|| {
            ImportError::XmlParse(format!(
                "sheet '{}': row {} repeated {} time(s) overflows the row counter",
                self.sheet.sheet_name, start, repeated
            ))
        })?;
        self.next_row = end;

        let header_row = self.sheet.header_row_count;
        if (start..end).contains(&header_row) {
            self.columns = validate_header_row(&cells, self.sheet)?;
        }

        let data_start = start.max(self.sheet.first_data_row());
        if data_start >= end {
            return Ok(());
        }

        let normalized = construct_column_data(cells, self.columns);
        if is_blank_row(&normalized) {
            return Ok(());
        }

        if let Some(limit) = self.row_limit {
            if end - 1 > limit {
                return Err(ImportError::XmlParse(format!(
                    "sheet '{}': row {} repeated {} time(s) exceeds the {} row limit",
                    self.sheet.sheet_name, start, repeated, limit
                )));
            }
        }

        // 重复行逐行展开，每行独立校验
        for row_index in data_start..end {
            let row = validator.generate_row_data(
                normalized.clone(),
                row_index,
                self.sheet,
                scheme_info,
            )?;
            self.data.push(row);
        }
        Ok(())
    }

    fn finish(self) -> (&'static SheetInfo, Vec<Vec<String>>) {
        (self.sheet, self.data)
    }
}
