// ==========================================
// ODS 文件构建器 - 用于集成测试
// ==========================================

use chrono::{TimeZone, Utc};
use ers_file_ingest::domain::{SchemeInfo, SheetInfo};
use ers_file_ingest::importer::SchemaRegistry;
use std::io::{Cursor, Write};

/// 单个物理行: 单元格值，或直接写入的 table-row 片段
enum RowSpec {
    Cells(Vec<String>),
    Xml(String),
}

/// 单个表格: 表名 + 物理行
pub struct SheetBuilder {
    name: String,
    rows: Vec<RowSpec>,
    trailing_rows: bool,
}

impl SheetBuilder {
    /// 以模板的标题行与表头行开头
    pub fn template(sheet_name: &str) -> Self {
        let sheet = SchemaRegistry::global()
            .lookup(sheet_name)
            .expect("registered sheet");
        Self {
            name: sheet_name.to_string(),
            rows: header_block(sheet).into_iter().map(RowSpec::Cells).collect(),
            trailing_rows: true,
        }
    }

    /// 任意表名，无预置行
    pub fn raw(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
            trailing_rows: true,
        }
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows
            .push(RowSpec::Cells(cells.iter().map(|c| c.to_string()).collect()));
        self
    }

    pub fn rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows.extend(rows.into_iter().map(RowSpec::Cells));
        self
    }

    /// 原样写入一个 table-row 片段（用于构造特殊属性）
    pub fn xml_row(mut self, xml: &str) -> Self {
        self.rows.push(RowSpec::Xml(xml.to_string()));
        self
    }

    /// 不追加表格末尾的重复空行
    pub fn without_trailing_rows(mut self) -> Self {
        self.trailing_rows = false;
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(r#"<table:table table:name="{}">"#, escape(&self.name));
        for spec in &self.rows {
            let row = match spec {
                RowSpec::Cells(cells) => cells,
                RowSpec::Xml(fragment) => {
                    xml.push_str(fragment);
                    continue;
                }
            };
            xml.push_str("<table:table-row>");
            for cell in row {
                if cell.is_empty() {
                    xml.push_str("<table:table-cell/>");
                } else {
                    xml.push_str(&format!(
                        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(cell)
                    ));
                }
            }
            // 表格软件在行尾写出的大量重复空列
            xml.push_str(r#"<table:table-cell table:number-columns-repeated="16369"/>"#);
            xml.push_str("</table:table-row>");
        }
        // 表格末尾的大量重复空行
        if self.trailing_rows {
            xml.push_str(
                r#"<table:table-row table:number-rows-repeated="1048000"><table:table-cell table:number-columns-repeated="16384"/></table:table-row>"#,
            );
        }
        xml.push_str("</table:table>");
        xml
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 模板标题行（第 1 行为标题）+ 表头行
pub fn header_block(sheet: &SheetInfo) -> Vec<Vec<String>> {
    let mut rows = vec![vec![sheet.sheet_title.to_string()]];
    for _ in 2..sheet.header_row_count {
        rows.push(Vec::new());
    }
    rows.push(sheet.headers.iter().map(|h| h.to_string()).collect());
    rows
}

/// 组装 zip + content.xml
pub fn ods_bytes(sheets: &[SheetBuilder]) -> Vec<u8> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:spreadsheet>"#,
    );
    for sheet in sheets {
        content.push_str(&sheet.to_xml());
    }
    content.push_str("</office:spreadsheet></office:body></office:document-content>");

    zip_entries(&[
        ("mimetype", "application/vnd.oasis.opendocument.spreadsheet"),
        ("content.xml", &content),
    ])
}

/// 任意条目的 zip 包
pub fn zip_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn scheme_info(scheme_type: &str) -> SchemeInfo {
    SchemeInfo {
        scheme_ref: "XA1100000000000".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 4, 6, 0, 0, 0).unwrap(),
        scheme_id: "123PA12345678".to_string(),
        tax_year: "2023/24".to_string(),
        scheme_name: "MyScheme".to_string(),
        scheme_type: scheme_type.to_string(),
    }
}

/// CSOP 期权授予表的一行有效数据
pub fn csop_granted_row(n: usize) -> Vec<String> {
    vec![
        "2015-06-04".to_string(),
        format!("First{}", n),
        String::new(),
        "Last".to_string(),
        "AB123456C".to_string(),
        "123/XA1234".to_string(),
        "100.00".to_string(),
        "10.1234".to_string(),
        format!("{}.5", n),
    ]
}

/// EMI 调整表的一行有效数据（14 列）
pub fn emi_adjustment_row(n: usize) -> Vec<String> {
    vec![
        "yes".to_string(),
        "no".to_string(),
        "no".to_string(),
        String::new(),
        "2015-06-04".to_string(),
        format!("First{}", n),
        String::new(),
        "Last".to_string(),
        "AB123456C".to_string(),
        "123/XA1234".to_string(),
        "10.1234".to_string(),
        "100.00".to_string(),
        "10.1234".to_string(),
        "10.1234".to_string(),
    ]
}
