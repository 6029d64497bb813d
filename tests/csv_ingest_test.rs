// ==========================================
// CSV 导入 集成测试
// ==========================================
// 测试目标: 单表 CSV（表名取自文件名）经文件系统字节源完整处理
// ==========================================

mod helpers;

use ers_file_ingest::importer::{
    CatalogRuleEngine, FileProcessor, FileRequest, FsByteSource, ImportError, InMemorySessionStore,
};
use ers_file_ingest::logging;
use helpers::mock_collaborators::{RecordingAuditSink, RecordingTransport};
use helpers::mock_config::MockConfig;
use helpers::ods_builder::scheme_info;
use std::sync::Arc;

struct CsvHarness {
    processor: FileProcessor<MockConfig>,
    transport: Arc<RecordingTransport>,
    audit: Arc<RecordingAuditSink>,
}

fn csv_harness(config: MockConfig) -> CsvHarness {
    let transport = Arc::new(RecordingTransport::default());
    let audit = Arc::new(RecordingAuditSink::default());
    let processor = FileProcessor::new(
        config,
        Arc::new(FsByteSource::default()),
        Arc::new(CatalogRuleEngine::load(None).unwrap()),
        audit.clone(),
        transport.clone(),
        Arc::new(InMemorySessionStore::new()),
    );
    CsvHarness {
        processor,
        transport,
        audit,
    }
}

#[tokio::test]
async fn test_csv_other_grants() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Other_Grants_V4.csv");
    std::fs::write(
        &path,
        "2014-12-10,10,1.1234,100.00\n\n2014-12-11,20,2.5,3\n,,,\n",
    )
    .unwrap();

    let h = csv_harness(MockConfig::default());
    let request = FileRequest::from_path(&path, "EMP-001");
    let outcome = h
        .processor
        .process_file(&request, &scheme_info("OTHER"))
        .await
        .unwrap();

    assert_eq!(outcome.total_rows, 2);
    let batches = h.transport.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].sheet_name, "Other_Grants_V4");
    assert_eq!(
        batches[0].data[1],
        vec!["2014-12-11", "20", "2.5", "3"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_csv_error_references_physical_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Other_Grants_V4.csv");
    // 第 3 个物理行日期非法 → 表内第 12 行
    std::fs::write(
        &path,
        "2014-12-10,10,1.1234,100.00\n\n10/12/2014,10,1,1\n",
    )
    .unwrap();

    let h = csv_harness(MockConfig::default());
    let err = h
        .processor
        .process_file(&FileRequest::from_path(&path, "EMP"), &scheme_info("OTHER"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::RowValidation { row_index: 12, .. }));
    let errors = h.audit.validation_errors();
    assert_eq!(errors[0].cell.to_string(), "A12");
}

#[tokio::test]
async fn test_csv_named_for_unknown_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grants.csv");
    std::fs::write(&path, "2014-12-10,10,1.1234,100.00\n").unwrap();

    let h = csv_harness(MockConfig::default());
    let err = h
        .processor
        .process_file(&FileRequest::from_path(&path, "EMP"), &scheme_info("OTHER"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::UnrecognizedSheet { .. }));
}

#[tokio::test]
async fn test_csv_only_blank_lines_is_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SIP_Out_V4.csv");
    std::fs::write(&path, "\n , ,\n").unwrap();

    let h = csv_harness(MockConfig::default());
    let err = h
        .processor
        .process_file(&FileRequest::from_path(&path, "EMP"), &scheme_info("SIP"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::EmptyFile { .. }));
}
