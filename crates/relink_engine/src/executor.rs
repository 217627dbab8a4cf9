//! Mutation execution: turns a plan into selection and typing operations.

use relink_core::{detect_legacy_link, MutationPlan};

use crate::driver::{CandidateField, EditorDriver};
use crate::types::StepError;

/// Executes `plan` against the selected description field.
///
/// Replace anchors the edit to one text run: the runs are walked in
/// depth-first order and the first run whose own text carries the legacy
/// link gets its matched range selected and overtyped. The planner saw the
/// match at region level, but rich-text editors may split a string across
/// several runs; when no single run carries it the edit is abandoned with
/// `AnchorNotFound` and the record fails on its own.
///
/// Must be called at most once per record. Does not persist anything.
pub async fn execute_plan(
    driver: &dyn EditorDriver,
    field: &CandidateField,
    plan: &MutationPlan,
) -> Result<(), StepError> {
    match plan {
        MutationPlan::NoOp => Ok(()),
        MutationPlan::Replace { new_text, .. } => {
            let runs = driver.text_runs(&field.handle).await?;
            for run in &runs {
                let Some(span) = detect_legacy_link(&run.text) else {
                    continue;
                };
                // Selection offsets are UTF-16 code units, matching DOM
                // Range semantics. Astral characters count as two.
                let start = run.text[..span.start].encode_utf16().count();
                let len = run.text[span.start..span.end].encode_utf16().count();
                driver
                    .select_run_range(&run.handle, start, start + len)
                    .await?;
                driver.type_text(new_text).await?;
                return Ok(());
            }
            Err(StepError::AnchorNotFound)
        }
        MutationPlan::Prepend { new_text } => {
            driver.select_region_start(&field.handle).await?;
            driver.type_text(new_text).await?;
            Ok(())
        }
    }
}
