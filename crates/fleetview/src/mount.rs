//! Mounting a list view onto a record provider.
//!
//! A [`Mount`] is one lifetime of a list view. Mounting publishes a loading
//! snapshot, runs a single fetch on the tokio runtime and publishes the
//! terminal snapshot when it completes. Snapshots travel over a
//! [`tokio::sync::watch`] channel, so a consumer always sees the latest one.
//!
//! There is no cancellation. Unmounting drops the receiving side; a fetch that
//! is still running finishes and its result goes nowhere.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::provider::{RecordProvider, Snapshot};

/// Which of the two view presentations a snapshot selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The fetch is in flight.
    Loading,
    /// The fetch has finished (successfully or not).
    Populated,
}

impl Phase {
    /// The phase a snapshot belongs to.
    #[must_use]
    pub fn of(snapshot: &Snapshot) -> Self {
        if snapshot.loading {
            Self::Loading
        } else {
            Self::Populated
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Populated => write!(f, "populated"),
        }
    }
}

/// A mounted list view bound to one provider fetch.
#[derive(Debug)]
pub struct Mount {
    rx: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

/// Mount a view onto `provider`.
///
/// Must be called from within a tokio runtime.
pub fn mount(provider: Arc<dyn RecordProvider>) -> Mount {
    let (tx, rx) = watch::channel(Snapshot::loading());
    let name = provider.name();
    debug!(provider = name, "Mounting list view");

    let task = tokio::spawn(async move {
        let snapshot = match provider.fetch().await {
            Ok(records) => {
                info!(provider = name, count = records.len(), "Fetch resolved");
                Snapshot::resolved(records)
            }
            Err(err) => {
                warn!(provider = name, error = %err, "Fetch failed");
                Snapshot::failed(err.to_string())
            }
        };

        if tx.send(snapshot).is_err() {
            debug!(provider = name, "View unmounted before fetch resolved");
        }
    });

    Mount { rx, task }
}

impl Mount {
    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// The phase of the latest snapshot.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::of(&self.rx.borrow())
    }

    /// Wait until the fetch has resolved and return the terminal snapshot.
    ///
    /// If the fetch task dies without publishing (a panicking provider), the
    /// result is a failed snapshot rather than an endless wait.
    pub async fn resolved(&mut self) -> Snapshot {
        match self.rx.wait_for(Snapshot::is_terminal).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => {
                warn!("Fetch task ended without a result");
                Snapshot::failed("fetch task ended without a result")
            }
        }
    }

    /// Wait for the next snapshot change and return it.
    ///
    /// Returns `None` once no further snapshots can arrive.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Tear the view down.
    ///
    /// A fetch still in flight is left to finish unobserved.
    pub fn unmount(self) {
        let Self { rx, task } = self;
        drop(rx);
        if !task.is_finished() {
            debug!("Unmounted with fetch still in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::provider::MemoryProvider;
    use crate::record::Record;

    fn sample() -> Vec<Record> {
        vec![Record::new("1", "Car A", "Acme", "X1")]
    }

    #[test]
    fn test_phase_of() {
        assert_eq!(Phase::of(&Snapshot::loading()), Phase::Loading);
        assert_eq!(Phase::of(&Snapshot::resolved(vec![])), Phase::Populated);
        assert_eq!(Phase::of(&Snapshot::failed("x")), Phase::Populated);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Loading.to_string(), "loading");
        assert_eq!(Phase::Populated.to_string(), "populated");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_starts_loading() {
        let provider = MemoryProvider::new(sample()).with_latency(Duration::from_secs(1));
        let mount = mount(Arc::new(provider));

        assert_eq!(mount.phase(), Phase::Loading);
        assert!(mount.snapshot().loading);
        mount.unmount();
    }

    #[tokio::test]
    async fn test_mount_resolves_to_populated() {
        let mut mount = mount(Arc::new(MemoryProvider::new(sample())));

        let snapshot = mount.resolved().await;
        assert!(!snapshot.loading);
        assert_eq!(snapshot.records, sample());
        assert_eq!(mount.phase(), Phase::Populated);
    }

    #[tokio::test]
    async fn test_mount_failed_fetch_resolves_with_error() {
        let provider = MemoryProvider::new(sample()).failing("backend offline");
        let mut mount = mount(Arc::new(provider));

        let snapshot = mount.resolved().await;
        assert!(!snapshot.loading);
        assert!(snapshot.records.is_empty());
        assert!(snapshot.error.unwrap().contains("backend offline"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_is_one_way() {
        let provider = MemoryProvider::new(sample()).with_latency(Duration::from_millis(10));
        let mut mount = mount(Arc::new(provider));

        let mut phases = vec![mount.phase()];
        while let Some(snapshot) = mount.changed().await {
            phases.push(Phase::of(&snapshot));
        }

        assert_eq!(phases, vec![Phase::Loading, Phase::Populated]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_before_resolution() {
        let provider = MemoryProvider::new(sample()).with_latency(Duration::from_secs(5));
        let mount = mount(Arc::new(provider));
        mount.unmount();

        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    #[tokio::test]
    async fn test_shared_provider_separate_mounts() {
        let provider: Arc<dyn RecordProvider> = Arc::new(MemoryProvider::new(sample()));
        let mut first = mount(Arc::clone(&provider));
        let mut second = mount(provider);

        assert_eq!(first.resolved().await, second.resolved().await);
    }
}
