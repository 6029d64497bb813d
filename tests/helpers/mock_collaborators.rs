// ==========================================
// Mock 外部协作方 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use ers_file_ingest::domain::{SchemeData, SchemeInfo, ValidationError};
use ers_file_ingest::importer::{
    AuditSink, BoxError, ByteSource, CatalogRuleEngine, ContentReader, FileProcessor, ImportError,
    ImportResult, InMemorySessionStore, SessionStore, SubmissionTransport,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

// ==========================================
// MemoryByteSource - 内存字节源
// ==========================================
#[derive(Default)]
pub struct MemoryByteSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryByteSource {
    pub fn with_file(mut self, reference: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(reference.to_string(), bytes);
        self
    }
}

impl ByteSource for MemoryByteSource {
    fn open(&self, reference: &str) -> ImportResult<Box<dyn ContentReader>> {
        match self.files.get(reference) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(ImportError::Stream(format!("no such download: {}", reference))),
        }
    }
}

// ==========================================
// RecordingAuditSink - 记录审计事件
// ==========================================
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<String>>,
    validation_errors: Mutex<Vec<ValidationError>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.validation_errors.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AuditSink for RecordingAuditSink {
    fn sheet_resolution_failed(&self, _scheme_info: &SchemeInfo, sheet_name: &str, reason: &str) {
        self.record(format!("sheet_resolution_failed:{}:{}", sheet_name, reason));
    }

    fn row_validation_failed(
        &self,
        _scheme_info: &SchemeInfo,
        sheet_name: &str,
        errors: &[ValidationError],
    ) {
        self.validation_errors
            .lock()
            .unwrap()
            .extend_from_slice(errors);
        self.record(format!("row_validation_failed:{}:{}", sheet_name, errors.len()));
    }

    fn batch_submitted(&self, scheme_data: &SchemeData, _employer_ref: &str) {
        self.record(format!(
            "batch_submitted:{}:{}",
            scheme_data.sheet_name,
            scheme_data.row_count()
        ));
    }

    fn batch_submission_failed(&self, scheme_data: &SchemeData, _employer_ref: &str, _reason: &str) {
        self.record(format!("batch_submission_failed:{}", scheme_data.sheet_name));
    }

    fn total_rows(&self, _scheme_info: &SchemeInfo, total_rows: usize) {
        self.record(format!("total_rows:{}", total_rows));
    }

    fn runtime_exception(&self, _scheme_info: &SchemeInfo, _context: &str, error: &ImportError) {
        self.record(format!("runtime_exception:{}", error.kind()));
    }
}

// ==========================================
// RecordingTransport - 记录提交的批次
// ==========================================
#[derive(Default)]
pub struct RecordingTransport {
    pub batches: Mutex<Vec<SchemeData>>,
    pub fail_sheet: Option<String>,
}

impl RecordingTransport {
    pub fn failing_for(sheet_name: &str) -> Self {
        Self {
            fail_sheet: Some(sheet_name.to_string()),
            ..Default::default()
        }
    }

    pub fn batches(&self) -> Vec<SchemeData> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn submit(&self, scheme_data: &SchemeData, _employer_ref: &str) -> Result<(), BoxError> {
        if self.fail_sheet.as_deref() == Some(scheme_data.sheet_name.as_str()) {
            return Err("submission service returned 503".into());
        }
        self.batches.lock().unwrap().push(scheme_data.clone());
        Ok(())
    }
}

// ==========================================
// FailingSessionStore - 回调保存失败
// ==========================================
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn save_callback(&self, _file_ref: &str, _total_rows: usize) -> Result<(), BoxError> {
        Err("session cache unavailable".into())
    }
}

// ==========================================
// 测试装配
// ==========================================
pub struct Harness<C: ers_file_ingest::config::BatchConfigReader> {
    pub processor: FileProcessor<C>,
    pub audit: Arc<RecordingAuditSink>,
    pub transport: Arc<RecordingTransport>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// 以内置规则目录装配文件处理器
pub fn harness<C>(config: C, source: MemoryByteSource, transport: RecordingTransport) -> Harness<C>
where
    C: ers_file_ingest::config::BatchConfigReader,
{
    let audit = Arc::new(RecordingAuditSink::default());
    let transport = Arc::new(transport);
    let sessions = Arc::new(InMemorySessionStore::new());
    let engine = CatalogRuleEngine::load(None).expect("bundled rule catalog");

    let processor = FileProcessor::new(
        config,
        Arc::new(source),
        Arc::new(engine),
        audit.clone(),
        transport.clone(),
        sessions.clone(),
    );

    Harness {
        processor,
        audit,
        transport,
        sessions,
    }
}
