use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use relink_engine::{
    save_and_verify, CandidateField, DriverError, EditorDriver, RegionHandle, RunHandle,
    SaveControl, SaveSettings, StepError, TextRun,
};

/// Driver stub exposing only the save control: scripted reads are served
/// first, then the fallback state forever.
struct ControlScript {
    reads: Mutex<VecDeque<SaveControl>>,
    fallback: SaveControl,
    triggers: AtomicUsize,
}

impl ControlScript {
    fn new(reads: &[SaveControl], fallback: SaveControl) -> Self {
        Self {
            reads: Mutex::new(reads.iter().copied().collect()),
            fallback,
            triggers: AtomicUsize::new(0),
        }
    }

    fn triggers(&self) -> usize {
        self.triggers.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EditorDriver for ControlScript {
    async fn navigate(&self, _video_id: &str) -> Result<(), DriverError> {
        unreachable!("save controller never navigates")
    }

    async fn editable_regions(&self) -> Result<Vec<CandidateField>, DriverError> {
        unreachable!("save controller never queries regions")
    }

    async fn text_runs(&self, _region: &RegionHandle) -> Result<Vec<TextRun>, DriverError> {
        unreachable!("save controller never reads runs")
    }

    async fn select_run_range(
        &self,
        _run: &RunHandle,
        _start: usize,
        _end: usize,
    ) -> Result<(), DriverError> {
        unreachable!("save controller never selects")
    }

    async fn select_region_start(&self, _region: &RegionHandle) -> Result<(), DriverError> {
        unreachable!("save controller never selects")
    }

    async fn type_text(&self, _text: &str) -> Result<(), DriverError> {
        unreachable!("save controller never types")
    }

    async fn save_control(&self) -> Result<SaveControl, DriverError> {
        Ok(self
            .reads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback))
    }

    async fn trigger_save(&self) -> Result<(), DriverError> {
        self.triggers.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn fast_settings() -> SaveSettings {
    SaveSettings {
        ready_timeout: Duration::from_millis(50),
        settle_timeout: Duration::from_millis(100),
        poll_interval: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn control_stuck_enabled_is_a_save_failure() {
    let driver = ControlScript::new(&[], SaveControl::Enabled);
    let err = save_and_verify(&driver, &fast_settings()).await.unwrap_err();
    assert!(matches!(err, StepError::SaveFailed(_)));
    assert_eq!(driver.triggers(), 1);
}

#[tokio::test]
async fn enabled_then_disabled_within_window_succeeds() {
    let driver = ControlScript::new(
        &[
            SaveControl::Enabled,  // ready phase
            SaveControl::Enabled,  // still saving
            SaveControl::Enabled,  // still saving
        ],
        SaveControl::Disabled,
    );
    save_and_verify(&driver, &fast_settings()).await.unwrap();
    assert_eq!(driver.triggers(), 1);
}

#[tokio::test]
async fn control_never_armed_but_disabled_means_nothing_pending() {
    let driver = ControlScript::new(&[], SaveControl::Disabled);
    save_and_verify(&driver, &fast_settings()).await.unwrap();
    // Nothing was pending, so nothing was triggered.
    assert_eq!(driver.triggers(), 0);
}

#[tokio::test]
async fn missing_control_is_a_save_failure() {
    let driver = ControlScript::new(&[], SaveControl::Missing);
    let err = save_and_verify(&driver, &fast_settings()).await.unwrap_err();
    assert!(matches!(err, StepError::SaveFailed(_)));
    assert_eq!(driver.triggers(), 0);
}

#[tokio::test]
async fn settle_race_resolved_by_final_recheck() {
    // A zero settle window forces exactly one in-window sample (still
    // Enabled); only the final re-check observes Disabled.
    let driver = ControlScript::new(
        &[SaveControl::Enabled, SaveControl::Enabled],
        SaveControl::Disabled,
    );

    let settings = SaveSettings {
        ready_timeout: Duration::from_millis(50),
        settle_timeout: Duration::ZERO,
        poll_interval: Duration::from_millis(10),
    };
    save_and_verify(&driver, &settings).await.unwrap();
    assert_eq!(driver.triggers(), 1);
}
