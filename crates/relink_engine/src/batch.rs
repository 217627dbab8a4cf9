//! Sequential batch orchestration over the shared editor session.

use std::sync::Arc;

use relink_core::{
    plan_mutation, select_description, BatchReport, MutationPlan, Outcome, VideoRecord,
};
use relink_logging::{relink_debug, relink_info, relink_warn};

use crate::driver::EditorDriver;
use crate::executor::execute_plan;
use crate::save::{save_and_verify, SaveSettings};
use crate::types::{BatchEvent, BatchSink, SourceRecord, StepError};

/// Runs the whole record list against one editor session.
///
/// Records are processed strictly in input order and strictly one at a
/// time: the remote surface is a single shared page and is not safe for
/// concurrent mutation. Any failure inside one record is converted to an
/// outcome; it never aborts the batch.
pub struct BatchRunner {
    driver: Arc<dyn EditorDriver>,
    article_base: String,
    save: SaveSettings,
}

enum Disposition {
    Updated,
    AlreadyUpdated,
}

impl BatchRunner {
    pub fn new(driver: Arc<dyn EditorDriver>, article_base: impl Into<String>) -> Self {
        Self {
            driver,
            article_base: article_base.into(),
            save: SaveSettings::default(),
        }
    }

    pub fn with_save_settings(mut self, save: SaveSettings) -> Self {
        self.save = save;
        self
    }

    pub async fn run(
        &self,
        records: &[SourceRecord],
        timestamp: &str,
        sink: &dyn BatchSink,
    ) -> BatchReport {
        let mut report = BatchReport::new(timestamp);
        let total = records.len();
        relink_info!("Starting batch over {total} records");

        for (index, record) in records.iter().enumerate() {
            // Identifier extraction happens before anything remote; a
            // record without one is skipped under its source URL.
            let Some(video_id) = relink_core::extract_video_id(&record.video_url) else {
                let outcome = Outcome::Skipped(StepError::InvalidIdentifier.to_string());
                relink_warn!("[{}/{total}] {}: invalid identifier", index + 1, record.video_url);
                self.file(&mut report, sink, index, record.video_url.clone(), outcome);
                continue;
            };

            sink.emit(BatchEvent::RecordStarted {
                index,
                total,
                id: video_id.clone(),
            });
            relink_info!("[{}/{total}] Processing video {video_id}", index + 1);

            let record = VideoRecord {
                target_link: relink_core::target_link(&self.article_base, &video_id),
                video_id: video_id.clone(),
            };
            let outcome = match self.process(&record).await {
                Ok(Disposition::Updated) => Outcome::Success,
                Ok(Disposition::AlreadyUpdated) => Outcome::Skipped("Already updated".to_string()),
                Err(err) => {
                    relink_warn!("[{}/{total}] {video_id}: {err}", index + 1);
                    if let Some(detail) = err.detail() {
                        relink_debug!("  {detail}");
                    }
                    Outcome::Failed(err.to_string())
                }
            };
            self.file(&mut report, sink, index, video_id, outcome);
        }

        relink_info!(
            "Batch complete: {} success, {} skipped, {} failed",
            report.success.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }

    /// One record, editor already shared: navigate, disambiguate, plan,
    /// execute, save-and-verify.
    async fn process(&self, record: &VideoRecord) -> Result<Disposition, StepError> {
        let driver = self.driver.as_ref();
        driver.navigate(&record.video_id).await?;

        let regions = driver.editable_regions().await?;
        let texts: Vec<&str> = regions.iter().map(|r| r.text.as_str()).collect();
        let choice = select_description(&texts).map_err(|_| StepError::FieldNotFound)?;
        let field = &regions[choice.index];
        relink_info!("  Selected region {} ({:?})", choice.index, choice.confidence);

        let plan = plan_mutation(&field.text, &record.target_link);
        match &plan {
            MutationPlan::NoOp => {
                relink_info!("  Already updated, skipping");
                return Ok(Disposition::AlreadyUpdated);
            }
            MutationPlan::Replace { .. } => relink_info!("  Action: replace legacy link"),
            MutationPlan::Prepend { .. } => relink_info!("  Action: prepend link"),
        }

        execute_plan(driver, field, &plan).await?;
        save_and_verify(driver, &self.save).await?;
        Ok(Disposition::Updated)
    }

    fn file(
        &self,
        report: &mut BatchReport,
        sink: &dyn BatchSink,
        index: usize,
        id: String,
        outcome: Outcome,
    ) {
        sink.emit(BatchEvent::OutcomeDecided {
            index,
            id: id.clone(),
            outcome: outcome.clone(),
        });
        report.push(id, outcome);
    }
}
