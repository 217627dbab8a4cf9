//! Relink core: pure decision logic for description link repair.
//!
//! Everything here is deterministic and IO-free: link pattern detection,
//! description-field selection, mutation planning, record identifier
//! extraction and the batch report model. The async engine drives the
//! remote editor; this crate only decides what should happen.
mod fields;
mod links;
mod plan;
mod record;
mod report;

pub use fields::{select_description, FieldChoice, FieldConfidence, FieldSelectError};
pub use links::{
    contains_target_link, detect_legacy_link, MatchSpan, LEGACY_LINK_PREFIX, MAP_LINK_LABEL,
    PREPEND_LABEL,
};
pub use plan::{plan_mutation, MutationPlan};
pub use record::{extract_video_id, target_link, VideoRecord};
pub use report::{BatchReport, Outcome};
