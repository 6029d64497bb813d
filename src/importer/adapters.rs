// ==========================================
// ERS 文件校验系统 - 本地协作方实现
// ==========================================
// FsByteSource:        下载引用 = 本地路径
// JsonLinesTransport:  每个批次写一行 JSON
// InMemorySessionStore: 回调记录保存在内存
// ==========================================

use crate::domain::SchemeData;
use crate::importer::error::{BoxError, ImportError, ImportResult};
use crate::importer::pipeline_trait::{ByteSource, ContentReader, SessionStore, SubmissionTransport};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

// ==========================================
// FsByteSource
// ==========================================
#[derive(Debug, Default, Clone)]
pub struct FsByteSource {
    root: Option<PathBuf>,
}

impl FsByteSource {
    /// 引用相对于 `root` 解析
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl ByteSource for FsByteSource {
    fn open(&self, reference: &str) -> ImportResult<Box<dyn ContentReader>> {
        let path = match &self.root {
            Some(root) => root.join(reference),
            None => PathBuf::from(reference),
        };
        let file = File::open(&path)
            .map_err(|e| ImportError::Stream(format!("无法打开 {}: {}", path.display(), e)))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

// ==========================================
// JsonLinesTransport
// ==========================================
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionRecord<'a> {
    employer_ref: &'a str,
    #[serde(flatten)]
    scheme_data: &'a SchemeData,
}

pub struct JsonLinesTransport<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, BoxError> {
        self.writer
            .into_inner()
            .map_err(|_| BoxError::from("transport writer poisoned"))
    }
}

#[async_trait]
impl<W: Write + Send> SubmissionTransport for JsonLinesTransport<W> {
    async fn submit(&self, scheme_data: &SchemeData, employer_ref: &str) -> Result<(), BoxError> {
        let line = serde_json::to_string(&SubmissionRecord {
            employer_ref,
            scheme_data,
        })?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| BoxError::from("transport writer poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

// ==========================================
// InMemorySessionStore
// ==========================================
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    callbacks: Mutex<HashMap<String, usize>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_rows(&self, file_ref: &str) -> Option<usize> {
        self.callbacks
            .lock()
            .ok()
            .and_then(|map| map.get(file_ref).copied())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_callback(&self, file_ref: &str, total_rows: usize) -> Result<(), BoxError> {
        let mut callbacks = self
            .callbacks
            .lock()
            .map_err(|_| BoxError::from("session store poisoned"))?;
        callbacks.insert(file_ref.to_string(), total_rows);
        Ok(())
    }
}
