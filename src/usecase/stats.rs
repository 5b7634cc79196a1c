use serde::Serialize;
use std::time::{Duration, Instant};

/// Operation counters and wall-clock timer for one analysis run.
///
/// Every stage takes `&mut Metrics`; one instance belongs to exactly one run and is
/// never reset mid-run.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    dfs_visits: u64,
    edges_visited: u64,
    kahn_pushes: u64,
    kahn_pops: u64,
    relaxations: u64,
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop_timer(&mut self) {
        self.stopped = Some(Instant::now());
    }

    /// `None` unless the timer was started and then stopped.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started, self.stopped) {
            (Some(start), Some(stop)) => stop.checked_duration_since(start),
            _ => None,
        }
    }

    pub fn count_dfs_visit(&mut self) {
        self.dfs_visits += 1;
    }

    pub fn count_edge_visited(&mut self) {
        self.edges_visited += 1;
    }

    pub fn count_kahn_push(&mut self) {
        self.kahn_pushes += 1;
    }

    pub fn count_kahn_pop(&mut self) {
        self.kahn_pops += 1;
    }

    pub fn count_relaxation(&mut self) {
        self.relaxations += 1;
    }

    pub fn dfs_visits(&self) -> u64 {
        self.dfs_visits
    }

    pub fn edges_visited(&self) -> u64 {
        self.edges_visited
    }

    pub fn kahn_pushes(&self) -> u64 {
        self.kahn_pushes
    }

    pub fn kahn_pops(&self) -> u64 {
        self.kahn_pops
    }

    pub fn relaxations(&self) -> u64 {
        self.relaxations
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dfs_visits: self.dfs_visits,
            edges_visited: self.edges_visited,
            kahn_pushes: self.kahn_pushes,
            kahn_pops: self.kahn_pops,
            relaxations: self.relaxations,
            elapsed_nanos: self
                .elapsed()
                .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub dfs_visits: u64,
    pub edges_visited: u64,
    pub kahn_pushes: u64,
    pub kahn_pops: u64,
    pub relaxations: u64,
    pub elapsed_nanos: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_independent() {
        let mut m = Metrics::new();
        m.count_dfs_visit();
        m.count_dfs_visit();
        m.count_edge_visited();
        m.count_kahn_push();
        m.count_kahn_pop();
        m.count_kahn_pop();
        m.count_kahn_pop();
        m.count_relaxation();

        let snap = m.snapshot();
        assert_eq!(snap.dfs_visits, 2);
        assert_eq!(snap.edges_visited, 1);
        assert_eq!(snap.kahn_pushes, 1);
        assert_eq!(snap.kahn_pops, 3);
        assert_eq!(snap.relaxations, 1);
    }

    #[test]
    fn elapsed_requires_start_then_stop() {
        let mut m = Metrics::new();
        assert_eq!(m.elapsed(), None);

        m.start_timer();
        assert_eq!(m.elapsed(), None);
        assert_eq!(m.snapshot().elapsed_nanos, None);

        m.stop_timer();
        assert!(m.elapsed().is_some());
        assert!(m.snapshot().elapsed_nanos.is_some());
    }

    #[test]
    fn stop_without_start_is_undefined() {
        let mut m = Metrics::new();
        m.stop_timer();
        assert_eq!(m.elapsed(), None);
    }
}
