// ==========================================
// 多文件并发处理测试
// ==========================================
// 测试目标: 同一处理器并发处理多个文件，互不影响
// ==========================================

mod helpers;

use ers_file_ingest::importer::{
    ByteSource, CatalogRuleEngine, ContentReader, FileProcessor, FileRequest, ImportError, ImportResult,
    InMemorySessionStore, InputFormat,
};
use helpers::mock_collaborators::{harness, MemoryByteSource, RecordingAuditSink, RecordingTransport};
use helpers::mock_config::MockConfig;
use helpers::ods_builder::{csop_granted_row, emi_adjustment_row, ods_bytes, scheme_info, SheetBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn request(reference: &str) -> FileRequest {
    FileRequest {
        file_ref: reference.to_string(),
        download_ref: reference.to_string(),
        employer_ref: "EMP".to_string(),
        format: InputFormat::Ods,
    }
}

#[tokio::test]
async fn test_files_processed_independently() {
    let source = MemoryByteSource::default()
        .with_file(
            "a.ods",
            ods_bytes(&[SheetBuilder::template("CSOP_OptionsGranted_V4")
                .rows((1..=4).map(csop_granted_row).collect())]),
        )
        .with_file(
            "b.ods",
            ods_bytes(&[SheetBuilder::template("EMI40_Adjustments_V4")
                .rows((1..=7).map(emi_adjustment_row).collect())]),
        )
        .with_file(
            "c.ods",
            ods_bytes(&[SheetBuilder::template("EMI40_Adjustments_V4")
                .rows(vec![emi_adjustment_row(1)])]),
        );
    let h = harness(MockConfig::with_max_rows(3), source, RecordingTransport::default());

    let requests = vec![
        (request("a.ods"), scheme_info("CSOP")),
        (request("b.ods"), scheme_info("EMI")),
        // 申报类型不符，仅此文件失败
        (request("c.ods"), scheme_info("SIP")),
    ];
    let results = h.processor.process_files(&requests).await;

    assert_eq!(results.len(), 3);
    let a = results[0].as_ref().unwrap();
    let b = results[1].as_ref().unwrap();
    assert!(results[2].is_err());

    assert_eq!((a.total_rows, a.submissions), (4, 2));
    assert_eq!((b.total_rows, b.submissions), (7, 3));
    assert_ne!(a.process_id, b.process_id);

    assert_eq!(h.sessions.total_rows("a.ods"), Some(4));
    assert_eq!(h.sessions.total_rows("b.ods"), Some(7));
    assert_eq!(h.sessions.total_rows("c.ods"), None);

    // 同一表格的切片按序提交
    let emi_sizes: Vec<usize> = h
        .transport
        .batches()
        .iter()
        .filter(|b| b.sheet_name == "EMI40_Adjustments_V4")
        .map(|b| b.row_count())
        .collect();
    assert_eq!(emi_sizes, vec![3, 3, 1]);
}

// ==========================================
// 抽取阶段在阻塞线程池中并行执行
// ==========================================

/// 记录同时处于 open 中的文件数
struct SlowByteSource {
    inner: MemoryByteSource,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ByteSource for SlowByteSource {
    fn open(&self, reference: &str) -> ImportResult<Box<dyn ContentReader>> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(200));
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.inner.open(reference)
    }
}

#[tokio::test]
async fn test_extraction_of_files_overlaps() {
    let source = Arc::new(SlowByteSource {
        inner: MemoryByteSource::default()
            .with_file(
                "a.ods",
                ods_bytes(&[SheetBuilder::template("CSOP_OptionsGranted_V4")
                    .rows(vec![csop_granted_row(1)])]),
            )
            .with_file(
                "b.ods",
                ods_bytes(&[SheetBuilder::template("CSOP_OptionsGranted_V4")
                    .rows(vec![csop_granted_row(2)])]),
            ),
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
    });
    let processor = FileProcessor::new(
        MockConfig::default(),
        source.clone(),
        Arc::new(CatalogRuleEngine::load(None).unwrap()),
        Arc::new(RecordingAuditSink::default()),
        Arc::new(RecordingTransport::default()),
        Arc::new(InMemorySessionStore::new()),
    );

    let requests = vec![
        (request("a.ods"), scheme_info("CSOP")),
        (request("b.ods"), scheme_info("CSOP")),
    ];
    let results = processor.process_files(&requests).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(source.max_active.load(Ordering::SeqCst), 2);
}

/// open 时直接 panic 的字节源
struct PanickingByteSource;

impl ByteSource for PanickingByteSource {
    fn open(&self, _reference: &str) -> ImportResult<Box<dyn ContentReader>> {
        panic!("storage driver crashed");
    }
}

#[tokio::test]
async fn test_crashed_extraction_is_internal_error() {
    let audit = Arc::new(RecordingAuditSink::default());
    let processor = FileProcessor::new(
        MockConfig::default(),
        Arc::new(PanickingByteSource),
        Arc::new(CatalogRuleEngine::load(None).unwrap()),
        audit.clone(),
        Arc::new(RecordingTransport::default()),
        Arc::new(InMemorySessionStore::new()),
    );

    let err = processor
        .process_file(&request("a.ods"), &scheme_info("CSOP"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Internal(_)));
    assert_eq!(audit.events(), vec!["runtime_exception:internal"]);
}
