//! Batch progress sink: logs transitions and journals decided outcomes.

use relink_core::Outcome;
use relink_engine::{BatchEvent, BatchSink, ReportJournal};
use relink_logging::{relink_error, relink_info};

/// Appends every decided outcome to the journal the moment it is known,
/// so an interrupted run still leaves its findings on disk.
pub struct JournalSink {
    journal: ReportJournal,
}

impl JournalSink {
    pub fn new(journal: ReportJournal) -> Self {
        Self { journal }
    }
}

impl BatchSink for JournalSink {
    fn emit(&self, event: BatchEvent) {
        match event {
            BatchEvent::RecordStarted { .. } => {}
            BatchEvent::OutcomeDecided { id, outcome, .. } => {
                match &outcome {
                    Outcome::Success => relink_info!("  {id}: success"),
                    Outcome::Skipped(reason) => relink_info!("  {id}: skipped ({reason})"),
                    Outcome::Failed(reason) => relink_error!("  {id}: failed ({reason})"),
                }
                if let Err(err) = self.journal.append_outcome(&id, &outcome) {
                    relink_error!("Could not journal outcome for {id}: {err}");
                }
            }
        }
    }
}
