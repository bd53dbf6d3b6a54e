use nexus_core::{Provider, Translator};

use crate::api::GenerateProgress;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Home screen status while a Wrap is being generated
#[derive(Clone, PartialEq)]
pub enum AppState {
    Idle,
    Syncing { provider: Provider, current: usize, total: usize },
    Fetching,
    Ready,
    NoRecap,
    Failed(String),
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        matches!(self, AppState::Syncing { .. } | AppState::Fetching)
    }

    /// Syncs take the first 80% of the bar, the fetch the rest
    pub fn progress(&self) -> f32 {
        match self {
            AppState::Syncing { current, total, .. } => {
                if *total > 0 {
                    0.80 * (*current as f32 / *total as f32)
                } else {
                    0.0
                }
            }
            AppState::Fetching => 0.90,
            AppState::Ready => 1.0,
            AppState::Idle | AppState::NoRecap | AppState::Failed(_) => 0.0,
        }
    }

    pub fn status(&self, t: &Translator) -> String {
        match self {
            AppState::Idle => String::new(),
            AppState::Syncing { provider, .. } => {
                t.t_with("home.syncing", &[("provider", t.t(provider.label_key()))])
            }
            AppState::Fetching => t.t("home.fetching"),
            AppState::Ready => t.t("home.ready"),
            AppState::NoRecap => t.t("home.noRecap"),
            AppState::Failed(error) => t.t_with("home.failed", &[("error", error.clone())]),
        }
    }
}

pub type ProgressReceiver = Receiver<GenerateProgress>;

/// Next message from the worker without blocking.
///
/// A worker that hangs up before reporting `Done` or `Error` shows up as an
/// error so the UI never waits on a dead channel.
pub fn poll_progress(receiver: &ProgressReceiver) -> Option<GenerateProgress> {
    match receiver.try_recv() {
        Ok(progress) => Some(progress),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            tracing::warn!("Generate worker exited without a result");
            Some(GenerateProgress::Error("worker stopped unexpectedly".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::Language;
    use std::sync::mpsc;

    fn syncing(provider: Provider, current: usize, total: usize) -> AppState {
        AppState::Syncing {
            provider,
            current,
            total,
        }
    }

    #[test]
    fn busy_only_while_work_is_in_flight() {
        assert!(!AppState::Idle.is_busy());
        assert!(AppState::Fetching.is_busy());
        assert!(syncing(Provider::Steam, 1, 2).is_busy());
        assert!(!AppState::Failed("boom".into()).is_busy());
    }

    #[test]
    fn progress_grows_through_the_syncs() {
        let first = syncing(Provider::Steam, 1, 2);
        let second = syncing(Provider::Riot, 2, 2);
        assert!(first.progress() < second.progress());
        assert!(second.progress() < AppState::Fetching.progress());
    }

    #[test]
    fn status_is_localized() {
        let t = Translator::new(Language::En);
        assert_eq!(syncing(Provider::Riot, 1, 1).status(&t), "Syncing Riot Games...");
        assert_eq!(
            AppState::Failed("timeout".into()).status(&t),
            "Something went wrong: timeout"
        );
    }

    #[test]
    fn idle_worker_yields_nothing() {
        let (_tx, rx) = mpsc::channel();
        assert!(poll_progress(&rx).is_none());
    }

    #[test]
    fn hung_up_worker_becomes_an_error() {
        let (tx, rx) = mpsc::channel();
        tx.send(GenerateProgress::Fetching).unwrap();
        drop(tx);

        assert!(matches!(poll_progress(&rx), Some(GenerateProgress::Fetching)));
        assert!(matches!(poll_progress(&rx), Some(GenerateProgress::Error(_))));
    }
}
