//! Host environment adapter

use crate::ports::EnvPort;

/// Host environment adapter backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct HostEnvAdapter;

impl HostEnvAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl EnvPort for HostEnvAdapter {
    fn logical_cores(&self) -> usize {
        num_cpus::get()
    }
}
