//! Host environment detection
//!
//! Probing is an injected collaborator so callers and tests can replace it
//! with a fixed profile.

use super::EnvironmentProfile;

/// Source of the execution environment profile
pub trait EnvironmentProbe: Send + Sync {
    /// Describe the environment the iteration will run in
    fn probe(&self) -> EnvironmentProfile;
}

/// Probe that inspects the current process' host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl HostProbe {
    /// Memory assumed when the host cannot be queried
    const FALLBACK_AVAILABLE_MEMORY: u64 = 1_073_741_824;

    /// Hosts below this much available memory are constrained
    const CONSTRAINED_MEMORY: u64 = 512 * 1024 * 1024;

    fn available_memory() -> u64 {
        #[cfg(feature = "host-probe")]
        {
            let mut system = sysinfo::System::new();
            system.refresh_memory();
            // Zero means the platform does not report memory
            match system.available_memory() {
                0 => Self::FALLBACK_AVAILABLE_MEMORY,
                bytes => bytes,
            }
        }
        #[cfg(not(feature = "host-probe"))]
        {
            Self::FALLBACK_AVAILABLE_MEMORY
        }
    }

    fn core_count() -> usize {
        #[cfg(feature = "host-probe")]
        {
            num_cpus::get().max(1)
        }
        #[cfg(not(feature = "host-probe"))]
        {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

impl EnvironmentProbe for HostProbe {
    fn probe(&self) -> EnvironmentProfile {
        let core_count = Self::core_count();
        let available_memory_bytes = Self::available_memory();
        let is_mobile = cfg!(any(target_os = "android", target_os = "ios"));
        let is_web = cfg!(target_arch = "wasm32");

        EnvironmentProfile {
            core_count,
            available_memory_bytes,
            is_constrained: is_constrained(core_count, available_memory_bytes),
            is_mobile,
            is_web,
        }
    }
}

fn is_constrained(core_count: usize, available_memory_bytes: u64) -> bool {
    core_count <= 2 || available_memory_bytes < HostProbe::CONSTRAINED_MEMORY
}

/// Probe returning a predetermined profile
#[derive(Debug, Clone)]
pub struct FixedProbe(pub EnvironmentProfile);

impl EnvironmentProbe for FixedProbe {
    fn probe(&self) -> EnvironmentProfile {
        self.0.clone()
    }
}
