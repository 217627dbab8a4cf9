//! The narrow capability seam between the engine and the remote editor.
//!
//! Everything the batch needs from the outside world goes through
//! [`EditorDriver`]: navigation, region discovery, selection and typing
//! primitives, and the save control. The engine never touches a transport
//! directly, so tests run against a scripted in-memory implementation.

use thiserror::Error;

/// Opaque reference to one editable region on the current page, valid
/// until the next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionHandle(pub u32);

/// Opaque reference to one text-bearing leaf inside a region's editable
/// subtree, in depth-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHandle {
    pub region: u32,
    pub run: u32,
}

/// An editable region as discovered on the page: its full text content in
/// page order plus the live handle. Ephemeral, rebuilt per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateField {
    pub text: String,
    pub handle: RegionHandle,
}

/// One text-bearing leaf of a region, used for range-anchored mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub handle: RunHandle,
}

/// Observed state of the editor's save control. The editor has no save
/// event; `Disabled` doubles as "no pending changes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveControl {
    Enabled,
    Disabled,
    Missing,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("editor navigation timed out: {0}")]
    NavigationTimeout(String),
    #[error("browser connection lost: {0}")]
    ConnectionLost(String),
    #[error("stale handle: {0}")]
    StaleHandle(String),
    #[error("driver internal error: {0}")]
    Internal(String),
}

/// Capability set the batch consumes. One implementation talks CDP to a
/// real browser; tests provide a scripted one.
#[async_trait::async_trait]
pub trait EditorDriver: Send + Sync {
    /// Opens the editor surface for `video_id` and waits until it is
    /// ready. `NavigationTimeout` when the surface does not come up
    /// within the bounded wait.
    async fn navigate(&self, video_id: &str) -> Result<(), DriverError>;

    /// All editable regions on the current page, in page order.
    async fn editable_regions(&self) -> Result<Vec<CandidateField>, DriverError>;

    /// Text-bearing leaves of one region, depth-first.
    async fn text_runs(&self, region: &RegionHandle) -> Result<Vec<TextRun>, DriverError>;

    /// Selects `start..end` inside one text run and focuses the
    /// surrounding editable subtree. Offsets count UTF-16 code units, the
    /// unit DOM `Range` boundaries use; callers must not pass character or
    /// byte offsets.
    async fn select_run_range(
        &self,
        run: &RunHandle,
        start: usize,
        end: usize,
    ) -> Result<(), DriverError>;

    /// Collapses the selection to the very start of the region's editable
    /// subtree.
    async fn select_region_start(&self, region: &RegionHandle) -> Result<(), DriverError>;

    /// Types `text` over the current selection (or at the collapsed
    /// caret).
    async fn type_text(&self, text: &str) -> Result<(), DriverError>;

    /// Current state of the save control.
    async fn save_control(&self) -> Result<SaveControl, DriverError>;

    /// Activates the save control. Completion is inferred by polling
    /// [`EditorDriver::save_control`], not reported here.
    async fn trigger_save(&self) -> Result<(), DriverError>;
}
