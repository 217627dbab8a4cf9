//! Batch report model: per-record outcomes and the final text rendering.

/// Terminal classification of one record. Every record ends in exactly one
/// outcome; the three sets partition the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Accumulated run results, one entry per processed record, in input
/// order. Built incrementally; rendered once at the end of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub timestamp: String,
    pub success: Vec<String>,
    pub skipped: Vec<(String, String)>,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..Self::default()
        }
    }

    /// Files `outcome` for the record identified by `id`.
    pub fn push(&mut self, id: impl Into<String>, outcome: Outcome) {
        let id = id.into();
        match outcome {
            Outcome::Success => self.success.push(id),
            Outcome::Skipped(reason) => self.skipped.push((id, reason)),
            Outcome::Failed(reason) => self.failed.push((id, reason)),
        }
    }

    pub fn total(&self) -> usize {
        self.success.len() + self.skipped.len() + self.failed.len()
    }

    /// Renders the human-readable report file: timestamp, the three count
    /// totals, then the failed, skipped and success sections.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("BATCH REPORT (Retry/Prepend)\n");
        out.push_str(&format!("Timestamp: {}\n", self.timestamp));
        out.push_str(&format!(
            "Success: {}, Skipped: {}, Failed: {}\n",
            self.success.len(),
            self.skipped.len(),
            self.failed.len()
        ));
        out.push_str("\nFAILED:\n");
        for (id, reason) in &self.failed {
            out.push_str(&format!("- {id}: {reason}\n"));
        }
        out.push_str("\nSKIPPED:\n");
        for (id, reason) in &self.skipped {
            out.push_str(&format!("- {id}: {reason}\n"));
        }
        out.push_str("\nSUCCESS:\n");
        out.push_str(&self.success.join(", "));
        out.push('\n');
        out
    }
}
