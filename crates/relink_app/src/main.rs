//! relink: batch repair of stale game links in video descriptions.
//!
//! Attaches to a running, logged-in Chrome, walks the configured record
//! list, repairs each description (replace the legacy link or prepend the
//! canonical one), saves, verifies, and writes a plain-text report.

mod config;
mod logging;
mod sink;

use std::sync::Arc;

use anyhow::Context;
use relink_engine::{AtomicFileWriter, BatchRunner, CdpDriver, ReportJournal, SourceRecord};
use relink_logging::relink_info;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::load()?;
    logging::initialize(cfg.log_destination);

    let records = config::load_records(&cfg.links_path, &cfg.channel)?;
    relink_info!(
        "Loaded {} records for channel {:?}",
        records.len(),
        cfg.channel
    );

    let runtime = tokio::runtime::Runtime::new().context("tokio runtime")?;
    runtime.block_on(run(cfg, records))
}

async fn run(cfg: AppConfig, records: Vec<SourceRecord>) -> anyhow::Result<()> {
    let driver = CdpDriver::connect(cfg.cdp_settings())
        .await
        .context("could not attach to the running browser; is Chrome up with remote debugging?")?;

    let journal = ReportJournal::create(cfg.journal_path())?;
    let sink = sink::JournalSink::new(journal);
    let runner = BatchRunner::new(Arc::new(driver), cfg.article_base.clone())
        .with_save_settings(cfg.save_settings());

    let timestamp = chrono::Utc::now().to_rfc3339();
    let report = runner.run(&records, &timestamp, &sink).await;

    let writer = AtomicFileWriter::new(cfg.report_dir.clone());
    let path = writer.write(&cfg.report_filename, &report.render())?;
    relink_info!("Report saved to {:?}", path);

    println!(
        "Batch complete: {} success, {} skipped, {} failed (report: {})",
        report.success.len(),
        report.skipped.len(),
        report.failed.len(),
        path.display()
    );
    Ok(())
}
