// ==========================================
// ERS 文件校验系统 - 命令行入口
// ==========================================
// 用法:
//   ers-file-ingest <file> <scheme_type> [scheme_ref]
//
// 环境变量:
//   ERS_INGEST_CONFIG_FILE  JSON 配置文件
//   ERS_INGEST_OUTPUT       批次输出（JSON 行），默认 <file>.submissions.jsonl
//   ERS_INGEST_<KEY>        覆写单个配置项（见 config_keys）
// ==========================================

use chrono::{DateTime, Datelike, Utc};
use ers_file_ingest::config::{BatchConfigReader, ConfigManager};
use ers_file_ingest::importer::{
    BoxError, CatalogRuleEngine, FileProcessor, FileRequest, FsByteSource, InMemorySessionStore,
    JsonLinesTransport, TracingAuditSink,
};
use ers_file_ingest::{logging, SchemeFamily, SchemeInfo};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 英国税年（4 月 6 日起算），如 "2024/25"
fn tax_year(now: DateTime<Utc>) -> String {
    let start = if (now.month(), now.day()) >= (4, 6) {
        now.year()
    } else {
        now.year() - 1
    };
    format!("{}/{:02}", start, (start + 1) % 100)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: ers-file-ingest <file> <scheme_type> [scheme_ref]";
    let file = PathBuf::from(args.next().ok_or(usage)?);
    let scheme_type = args.next().ok_or(usage)?;
    let scheme_ref = args.next().unwrap_or_else(|| "UNKNOWN".to_string());

    if SchemeFamily::from_code(&scheme_type).is_none() {
        return Err(format!("unknown scheme type '{}' (expected CSOP, EMI, SIP or OTHER)", scheme_type).into());
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", ers_file_ingest::APP_NAME, ers_file_ingest::VERSION);
    tracing::info!("==================================================");

    // 配置: 文件 → 环境变量覆写
    let config = match std::env::var("ERS_INGEST_CONFIG_FILE") {
        Ok(path) => ConfigManager::from_path(path)?,
        Err(_) => ConfigManager::new(),
    }
    .with_env_overrides();
    tracing::debug!(config = %config.get_config_snapshot()?, "生效配置");

    let catalog_path = config.get_rule_catalog_path().await?;
    let engine = CatalogRuleEngine::load(catalog_path.as_deref())?;

    let output = std::env::var("ERS_INGEST_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut name = file.as_os_str().to_owned();
            name.push(".submissions.jsonl");
            PathBuf::from(name)
        });
    tracing::info!(output = %output.display(), "批次输出文件");

    let sessions = Arc::new(InMemorySessionStore::new());
    let processor = FileProcessor::new(
        config,
        Arc::new(FsByteSource::default()),
        Arc::new(engine),
        Arc::new(TracingAuditSink),
        Arc::new(JsonLinesTransport::new(BufWriter::new(File::create(&output)?))),
        sessions.clone(),
    );

    let now = Utc::now();
    let scheme_name = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let scheme_info = SchemeInfo {
        scheme_ref: scheme_ref.clone(),
        timestamp: now,
        scheme_id: scheme_ref,
        tax_year: tax_year(now),
        scheme_name,
        scheme_type,
    };

    let request = FileRequest::from_path(Path::new(&file), "CLI");
    let outcome = processor.process_file(&request, &scheme_info).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
