//! Process metrics source.

use sysinfo::{Pid, System};

/// Supplies named gauge readings once per poll.
pub trait MetricsSource: Send {
    fn sample(&mut self) -> Vec<(&'static str, f64)>;
}

/// Host memory and current-process statistics via `sysinfo`.
pub struct SysinfoSource {
    system: System,
    pid: Option<Pid>,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "process metrics unavailable");
                None
            }
        };
        Self {
            system: System::new(),
            pid,
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn sample(&mut self) -> Vec<(&'static str, f64)> {
        self.system.refresh_memory();
        let mut out = vec![
            ("TotalMemory", self.system.total_memory() as f64),
            ("UsedMemory", self.system.used_memory() as f64),
            ("FreeMemory", self.system.free_memory() as f64),
            ("AvailableMemory", self.system.available_memory() as f64),
            ("TotalSwap", self.system.total_swap() as f64),
            ("UsedSwap", self.system.used_swap() as f64),
        ];

        let Some(pid) = self.pid else { return out };
        if !self.system.refresh_process(pid) {
            return out;
        }
        if let Some(p) = self.system.process(pid) {
            out.push(("ProcessResident", p.memory() as f64));
            out.push(("ProcessVirtual", p.virtual_memory() as f64));
            out.push(("ProcessCpuUsage", f64::from(p.cpu_usage())));
            out.push(("ProcessRunTime", p.run_time() as f64));
        }
        out
    }
}
