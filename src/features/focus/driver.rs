//! Per-session tick driver.
//!
//! Each running session owns one task on the tokio runtime that wakes once a
//! second and asks its target to tick the session. The task holds only a weak
//! reference to the target, so dropping the service ends every driver.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Granularity of every session countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What a driver should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// End the driver loop.
    Stop,
}

/// Something a driver can tick.
pub(crate) trait Tick: Send + Sync + 'static {
    /// Advance session `id` on behalf of the driver carrying `epoch`.
    fn tick(&self, id: &str, epoch: u64) -> TickOutcome;
}

/// Handle to a running driver task. Dropping it cancels the task.
#[derive(Debug)]
pub(crate) struct Driver {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl Driver {
    /// Spawn a driver that ticks `id` every [`TICK_PERIOD`], first tick one
    /// period from now.
    pub fn spawn<T: Tick>(runtime: &Handle, target: Weak<T>, id: String, epoch: u64) -> Self {
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let Some(target) = target.upgrade() else {
                    break;
                };
                if target.tick(&id, epoch) == TickOutcome::Stop {
                    break;
                }
            }

            log::trace!("driver for session {id} (epoch {epoch}) finished");
        });

        Self { epoch, handle }
    }

    /// Epoch this driver was spawned with.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
