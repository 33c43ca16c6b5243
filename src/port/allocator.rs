use super::{LoopbackProbe, PortProbe};
use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Forward-scanning host port allocator.
///
/// Each call to [`allocate`](Self::allocate) probes `start`, `start + 1`, ...
/// until a port passes the probe or the attempt bound runs out. Ports handed
/// out earlier in the same run are remembered and skipped without probing:
/// the OS probe releases its socket immediately, so it cannot see ports this
/// run has already promised to another service.
pub struct PortAllocator<P = LoopbackProbe> {
    probe: P,
    max_attempts: u32,
    allocated_ports: HashSet<u16>,
}

impl PortAllocator<LoopbackProbe> {
    pub fn new() -> Self {
        Self::with_probe(LoopbackProbe)
    }
}

impl Default for PortAllocator<LoopbackProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PortProbe> PortAllocator<P> {
    pub fn with_probe(probe: P) -> Self {
        Self {
            probe,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            allocated_ports: HashSet::new(),
        }
    }

    /// Set how many candidates a single allocation may probe.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Find the first free port at or after `start`.
    ///
    /// Every candidate counts towards the attempt bound, including ones
    /// skipped because this run already assigned them. Running past
    /// `u16::MAX` ends the scan early.
    pub fn allocate(&mut self, start: u16) -> Result<u16> {
        let mut candidate = Some(start);
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let Some(port) = candidate else {
                break;
            };
            candidate = port.checked_add(1);
            attempts += 1;

            if self.allocated_ports.contains(&port) {
                tracing::info!("Port {} is already assigned in this run", port);
                continue;
            }

            match self.probe.probe(port) {
                Ok(()) => {
                    self.allocated_ports.insert(port);
                    tracing::info!("Assigned port {} for backend", port);
                    return Ok(port);
                }
                Err(e) => tracing::warn!("Port {} is in use: {}", port, e),
            }
        }

        tracing::error!("Could not find a free port after {} attempts", attempts);
        Err(Error::PortExhausted { start, attempts })
    }

    /// Ports handed out so far, ascending.
    pub fn allocated_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.allocated_ports.iter().copied().collect();
        ports.sort_unstable();
        ports
    }
}
