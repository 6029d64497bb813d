// ==========================================
// ERS 文件校验系统 - 行流提取器
// ==========================================
// 职责: 把上传文件转换为惰性、有序、单次遍历的原始行序列
// 支持: ODS（zip 内的 content.xml）/ CSV
// 红线: 不把整个文档读入内存
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{BufRead, BufReader, Read, Seek};
use tracing::debug;
use zip::ZipArchive;

/// ODS 压缩包内的内容文档名
pub const CONTENT_ENTRY_NAME: &str = "content.xml";

/// 单行展开列数上限（防止 number-columns-repeated 撑爆内存）
pub const DEFAULT_MAX_COLUMNS: usize = 1024;

/// 表格行数上限（有数据的行号不得超过此值）
pub const MAX_SHEET_ROWS: usize = 1_048_576;

// ==========================================
// RawRow / RowEvent - 行流产物
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<String>,
    /// 连续重复次数（ODS number-rows-repeated，默认 1）
    pub repeated: usize,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells, repeated: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// 新表格开始（表名）
    SheetStart(String),
    Row(RawRow),
}

// ==========================================
// OdsDocument - zip 归档
// ==========================================
pub struct OdsDocument<R: Read + Seek> {
    archive: ZipArchive<R>,
    max_columns: usize,
}

impl<R: Read + Seek> OdsDocument<R> {
    /// 打开 zip 归档
    ///
    /// # 返回
    /// - Err(ImportError::Stream): 不是可读的 zip 归档
    pub fn open(reader: R) -> ImportResult<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| ImportError::Stream(format!("not a readable zip archive: {}", e)))?;

        Ok(Self {
            archive,
            max_columns: DEFAULT_MAX_COLUMNS,
        })
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns.max(1);
        self
    }

    /// 定位 content.xml 并返回惰性行流
    ///
    /// # 返回
    /// - Err(ImportError::Stream): 归档内没有 content.xml
    pub fn rows(&mut self) -> ImportResult<OdsRowStream<BufReader<impl Read + '_>>> {
        let entry = self.archive.by_name(CONTENT_ENTRY_NAME).map_err(|e| {
            ImportError::Stream(format!(
                "{} not found in archive: {}",
                CONTENT_ENTRY_NAME, e
            ))
        })?;

        debug!(entry = CONTENT_ENTRY_NAME, "定位内容文档");
        Ok(OdsRowStream::new(BufReader::new(entry), self.max_columns))
    }
}

// ==========================================
// XmlStep - 解析步骤（已脱离读缓冲区的所有权值）
// ==========================================
#[derive(Debug)]
enum XmlStep {
    TableStart(String),
    RowStart { repeated: usize },
    RowEmpty { repeated: usize },
    RowEnd,
    CellStart { repeated: usize },
    CellEmpty { repeated: usize },
    CellEnd,
    ParagraphStart,
    ParagraphEmpty,
    ParagraphEnd,
    AnnotationStart,
    AnnotationEnd,
    Spaces(usize),
    Tab,
    LineBreak,
    Text(String),
    Eof,
    Other,
}

fn is_cell(local_name: &[u8]) -> bool {
    local_name == b"table-cell" || local_name == b"covered-table-cell"
}

/// 读取数值属性（按本地名匹配），缺失或非法时为 1
fn repeat_attr(e: &BytesStart<'_>, key: &[u8]) -> ImportResult<usize> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ImportError::XmlParse(err.to_string()))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr.unescape_value()?;
            return Ok(value.trim().parse::<usize>().unwrap_or(1).max(1));
        }
    }
    Ok(1)
}

fn string_attr(e: &BytesStart<'_>, key: &[u8]) -> ImportResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ImportError::XmlParse(err.to_string()))?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

// ==========================================
// RowCells - 单行单元格累积（处理列重复）
// ==========================================
struct RowCells {
    cells: Vec<String>,
    pending_empty: usize,
    max_columns: usize,
}

impl RowCells {
    fn new(max_columns: usize) -> Self {
        Self {
            cells: Vec::new(),
            pending_empty: 0,
            max_columns,
        }
    }

    fn push(&mut self, value: String, repeated: usize) {
        let repeated = repeated.max(1);

        // 空单元格先挂起；行尾的空单元格直接丢弃
        if value.is_empty() {
            self.pending_empty = self.pending_empty.saturating_add(repeated);
            return;
        }

        let fill = self
            .pending_empty
            .min(self.max_columns.saturating_sub(self.cells.len()));
        self.cells.resize(self.cells.len() + fill, String::new());
        self.pending_empty = 0;

        let room = self.max_columns.saturating_sub(self.cells.len());
        for _ in 0..repeated.min(room) {
            self.cells.push(value.clone());
        }
    }

    fn finish(self) -> Vec<String> {
        self.cells
    }
}

// ==========================================
// OdsRowStream - content.xml 惰性行流
// ==========================================
pub struct OdsRowStream<B: BufRead> {
    reader: Reader<B>,
    buf: Vec<u8>,
    max_columns: usize,
    done: bool,
}

impl<B: BufRead> OdsRowStream<B> {
    pub fn new(inner: B, max_columns: usize) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            max_columns,
            done: false,
        }
    }

    fn next_step(&mut self) -> ImportResult<XmlStep> {
        self.buf.clear();
        let step = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"table" => XmlStep::TableStart(string_attr(&e, b"name")?.unwrap_or_default()),
                b"table-row" => XmlStep::RowStart {
                    repeated: repeat_attr(&e, b"number-rows-repeated")?,
                },
                name if is_cell(name) => XmlStep::CellStart {
                    repeated: repeat_attr(&e, b"number-columns-repeated")?,
                },
                b"p" => XmlStep::ParagraphStart,
                b"annotation" => XmlStep::AnnotationStart,
                _ => XmlStep::Other,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                // 自闭合的空表同样需要识别表名
                b"table" => XmlStep::TableStart(string_attr(&e, b"name")?.unwrap_or_default()),
                b"table-row" => XmlStep::RowEmpty {
                    repeated: repeat_attr(&e, b"number-rows-repeated")?,
                },
                name if is_cell(name) => XmlStep::CellEmpty {
                    repeated: repeat_attr(&e, b"number-columns-repeated")?,
                },
                b"p" => XmlStep::ParagraphEmpty,
                b"s" => XmlStep::Spaces(repeat_attr(&e, b"c")?),
                b"tab" => XmlStep::Tab,
                b"line-break" => XmlStep::LineBreak,
                _ => XmlStep::Other,
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"table-row" => XmlStep::RowEnd,
                name if is_cell(name) => XmlStep::CellEnd,
                b"p" => XmlStep::ParagraphEnd,
                b"annotation" => XmlStep::AnnotationEnd,
                _ => XmlStep::Other,
            },
            Event::Text(t) => XmlStep::Text(t.unescape()?.into_owned()),
            Event::CData(c) => XmlStep::Text(String::from_utf8_lossy(&c).into_owned()),
            Event::Eof => XmlStep::Eof,
            _ => XmlStep::Other,
        };
        Ok(step)
    }

    fn next_event(&mut self) -> ImportResult<Option<RowEvent>> {
        loop {
            match self.next_step()? {
                XmlStep::TableStart(name) => return Ok(Some(RowEvent::SheetStart(name))),
                XmlStep::RowStart { repeated } => {
                    return self.read_row(repeated).map(|row| Some(RowEvent::Row(row)))
                }
                XmlStep::RowEmpty { repeated } => {
                    return Ok(Some(RowEvent::Row(RawRow {
                        cells: Vec::new(),
                        repeated,
                    })))
                }
                XmlStep::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    fn read_row(&mut self, repeated: usize) -> ImportResult<RawRow> {
        let mut cells = RowCells::new(self.max_columns);
        loop {
            match self.next_step()? {
                XmlStep::CellStart { repeated } => {
                    let text = self.read_cell_text()?;
                    cells.push(text, repeated);
                }
                XmlStep::CellEmpty { repeated } => cells.push(String::new(), repeated),
                XmlStep::RowEnd => {
                    return Ok(RawRow {
                        cells: cells.finish(),
                        repeated,
                    })
                }
                XmlStep::Eof => {
                    return Err(ImportError::XmlParse(
                        "unexpected end of document inside a table row".to_string(),
                    ))
                }
                _ => {}
            }
        }
    }

    /// 单元格文本: 多个段落以换行连接，批注内容忽略
    fn read_cell_text(&mut self) -> ImportResult<String> {
        let mut text = String::new();
        let mut paragraphs = 0usize;
        let mut in_paragraph = false;
        let mut annotation_depth = 0usize;

        loop {
            match self.next_step()? {
                XmlStep::CellEnd => return Ok(text),
                XmlStep::Eof => {
                    return Err(ImportError::XmlParse(
                        "unexpected end of document inside a table cell".to_string(),
                    ))
                }
                XmlStep::AnnotationStart => annotation_depth += 1,
                XmlStep::AnnotationEnd => annotation_depth = annotation_depth.saturating_sub(1),
                _ if annotation_depth > 0 => {}
                XmlStep::ParagraphStart | XmlStep::ParagraphEmpty => {
                    if paragraphs > 0 {
                        text.push('\n');
                    }
                    paragraphs += 1;
                    in_paragraph = true;
                }
                XmlStep::ParagraphEnd => in_paragraph = false,
                XmlStep::Text(s) if in_paragraph => text.push_str(&s),
                XmlStep::Spaces(n) if in_paragraph => text.extend(std::iter::repeat(' ').take(n)),
                XmlStep::Tab if in_paragraph => text.push('\t'),
                XmlStep::LineBreak if in_paragraph => text.push('\n'),
                _ => {}
            }
        }
    }
}

impl<B: BufRead> Iterator for OdsRowStream<B> {
    type Item = ImportResult<RowEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ==========================================
// CsvRowStream - CSV 惰性行流
// ==========================================
// 每条记录对应一个物理起始行；csv 会跳过纯空行，
// 这里以重复空行补齐，保证行号与物理行一致
pub struct CsvRowStream<R: Read> {
    records: StringRecordsIntoIter<R>,
    next_line: u64,
    pending: Option<RawRow>,
}

/// 构造 CSV 行流（无表头记录，允许行长度不一致）
pub fn csv_rows<R: Read>(reader: R) -> CsvRowStream<R> {
    let records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records();

    CsvRowStream {
        records,
        next_line: 1,
        pending: None,
    }
}

impl<R: Read> Iterator for CsvRowStream<R> {
    type Item = ImportResult<RowEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.pending.take() {
            return Some(Ok(RowEvent::Row(row)));
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let row = RawRow::new(record.iter().map(str::to_string).collect());
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(self.next_line);
        let gap = line.saturating_sub(self.next_line) as usize;
        self.next_line = line + 1;

        if gap > 0 {
            self.pending = Some(row);
            return Some(Ok(RowEvent::Row(RawRow {
                cells: Vec::new(),
                repeated: gap,
            })));
        }

        Some(Ok(RowEvent::Row(row)))
    }
}
