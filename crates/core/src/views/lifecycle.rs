use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Proof that a request was started by a container in a given generation.
/// Results are only applied while the generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "pass the ticket back to the matching finish_* call"]
pub struct Ticket {
    generation: u64,
}

/// Mount state of one container.
///
/// Generations are unique across every container in the process, so a ticket
/// from one container (or from a panel that has since been replaced) is never
/// accepted by another.
#[derive(Debug)]
pub struct Lifecycle {
    mounted: bool,
    generation: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// A fresh, mounted lifecycle.
    pub fn new() -> Self {
        Self {
            mounted: true,
            generation: next_generation(),
        }
    }

    pub fn issue(&self) -> Ticket {
        Ticket {
            generation: self.generation,
        }
    }

    /// Whether a result carrying `ticket` may still touch state.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.generation == self.generation
    }

    /// Forget every request in flight. Their results will be discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation = next_generation();
    }

    pub fn remount(&mut self) {
        self.mounted = true;
    }
}

/// What the host should do after a mutation or fetch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Followup {
    /// Nothing further.
    None,
    /// Re-fetch the container's data; the backend is the only source of truth.
    Refetch,
}
