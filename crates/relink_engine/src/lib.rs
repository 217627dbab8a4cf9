//! Relink engine: drives the remote description editor through a narrow
//! driver seam and runs the sequential batch.
mod batch;
mod cdp;
mod driver;
mod executor;
mod persist;
mod save;
mod types;

pub use batch::BatchRunner;
pub use cdp::{CdpDriver, CdpSettings};
pub use driver::{
    CandidateField, DriverError, EditorDriver, RegionHandle, RunHandle, SaveControl, TextRun,
};
pub use executor::execute_plan;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, ReportJournal};
pub use save::{save_and_verify, SaveSettings};
pub use types::{BatchEvent, BatchSink, NullSink, SourceRecord, StepError};
