//! Save-and-verify: bounded two-sided polling over the save control.
//!
//! The editor exposes no "save succeeded" event. The only observable is
//! the save control's enabled/disabled toggle, where disabled means "no
//! pending changes". Completion is therefore inferred from an enabled →
//! disabled transition, with a final re-check to absorb the race where
//! the editor settles faster than the poll cadence.

use std::time::Duration;

use tokio::time::Instant;

use crate::driver::{DriverError, EditorDriver, SaveControl};
use crate::types::StepError;

#[derive(Debug, Clone)]
pub struct SaveSettings {
    /// How long to wait for the control to arm after a mutation.
    pub ready_timeout: Duration,
    /// How long to wait for the control to disarm after triggering.
    pub settle_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(3),
            settle_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Triggers persistence of the pending mutation and confirms it settled.
pub async fn save_and_verify(
    driver: &dyn EditorDriver,
    settings: &SaveSettings,
) -> Result<(), StepError> {
    let armed = poll_for(
        driver,
        SaveControl::Enabled,
        settings.ready_timeout,
        settings.poll_interval,
    )
    .await?;
    if !armed {
        // The control never armed. Disabled at this point means nothing
        // was pending (the editor may have settled on its own); anything
        // else is a failure.
        return match driver.save_control().await? {
            SaveControl::Disabled => Ok(()),
            state => Err(StepError::SaveFailed(format!(
                "save control never became ready (state {state:?})"
            ))),
        };
    }

    driver.trigger_save().await?;

    let settled = poll_for(
        driver,
        SaveControl::Disabled,
        settings.settle_timeout,
        settings.poll_interval,
    )
    .await?;
    if settled {
        return Ok(());
    }
    // One more look: the save may have completed between the last poll
    // and the deadline.
    match driver.save_control().await? {
        SaveControl::Disabled => Ok(()),
        state => Err(StepError::SaveFailed(format!(
            "save control still {state:?} after settle window"
        ))),
    }
}

/// Polls the save control until it reads `want` or `timeout` elapses.
/// Always samples at least once.
async fn poll_for(
    driver: &dyn EditorDriver,
    want: SaveControl,
    timeout: Duration,
    interval: Duration,
) -> Result<bool, DriverError> {
    let deadline = Instant::now() + timeout;
    loop {
        if driver.save_control().await? == want {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}
