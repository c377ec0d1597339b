use crate::config::BnbConfig;
use log::warn;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thousands::Separable;

/// The clock is only read once every this many nodes.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Node and time budget of a solve, shared by every thread of the search.
/// Once a limit is hit, every subsequent [`Cutoff::tick`] reports that the search must stop.
#[derive(Debug)]
pub struct Cutoff {
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    nodes: AtomicU64,
    stopped: AtomicBool,
    reason: OnceLock<String>,
}

impl Cutoff {
    pub fn new(config: &BnbConfig, start: Instant) -> Self {
        let deadline = config.time_limit_s.and_then(|s| {
            match Duration::try_from_secs_f64(s) {
                Ok(d) => start.checked_add(d),
                Err(_) => {
                    warn!("[BNB] ignoring invalid time limit of {s}s");
                    None
                }
            }
        });
        Self {
            node_limit: config.node_limit,
            deadline,
            nodes: AtomicU64::new(0),
            stopped: AtomicBool::new(false),
            reason: OnceLock::new(),
        }
    }

    /// Registers the visit of a node. Returns `true` if the search has to stop.
    pub fn tick(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        let n_nodes = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(limit) = self.node_limit {
            if n_nodes > limit {
                self.stop(format!("node limit of {} reached", limit.separate_with_commas()));
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if n_nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stop("time limit reached".to_string());
                return true;
            }
        }
        false
    }

    fn stop(&self, reason: String) {
        let _ = self.reason.set(reason);
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Why the search was stopped, `None` if no limit was hit.
    pub fn reason(&self) -> Option<&str> {
        self.reason.get().map(String::as_str)
    }
}
