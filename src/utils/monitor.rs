use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// 單一建置階段的統計
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub items: usize,
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
}

/// 建置監控：記錄每個階段的耗時與處理數量，CLI 版本額外取樣行程記憶體
pub struct BuildMonitor {
    enabled: bool,
    started: Instant,
    phases: Mutex<Vec<PhaseStats>>,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl BuildMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: Instant::now(),
            phases: Mutex::new(Vec::new()),
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new()),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&self, phase: &str, items: usize, elapsed: Duration) {
        if !self.enabled {
            return;
        }

        let stats = PhaseStats {
            phase: phase.to_string(),
            items,
            elapsed,
            memory_mb: self.sample_memory_mb(),
        };

        match stats.memory_mb {
            Some(mb) => tracing::info!(
                "📊 {} - {} items in {:?}, memory {}MB",
                stats.phase,
                stats.items,
                stats.elapsed,
                mb
            ),
            None => tracing::info!(
                "📊 {} - {} items in {:?}",
                stats.phase,
                stats.items,
                stats.elapsed
            ),
        }

        if let Ok(mut phases) = self.phases.lock() {
            phases.push(stats);
        }
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases
            .lock()
            .map(|phases| phases.clone())
            .unwrap_or_default()
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak = self.phases().iter().filter_map(|p| p.memory_mb).max();
        match peak {
            Some(mb) => tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                mb
            ),
            None => tracing::info!("📊 Final Stats - Total Time: {:?}", self.started.elapsed()),
        }
    }

    #[cfg(feature = "cli")]
    fn sample_memory_mb(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn sample_memory_mb(&self) -> Option<u64> {
        None
    }
}

impl Default for BuildMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = BuildMonitor::default();
        monitor.record("extract", 10, Duration::from_millis(3));
        assert!(!monitor.is_enabled());
        assert!(monitor.phases().is_empty());
    }

    #[test]
    fn test_enabled_monitor_keeps_phase_order() {
        let monitor = BuildMonitor::new(true);
        monitor.record("extract", 300, Duration::from_millis(1));
        monitor.record("transform", 300, Duration::from_millis(2));

        let phases = monitor.phases();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].phase, "extract");
        assert_eq!(phases[1].phase, "transform");
        assert_eq!(phases[1].items, 300);
    }
}
