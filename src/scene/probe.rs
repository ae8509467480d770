// probe.rs - One-time capability probe
//
// The page answers two questions before the first real frame: can it create
// an accelerated 2D context at all, and does its blur filter render
// correctly. Probing may be async on the page side, so results come back
// with a ticket; tickets from before a teardown or a newer probe are stale.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Capabilities {
    pub accelerated_context: bool,
    pub blur_filter_reliable: bool,
}

pub trait CapabilityProbe {
    fn probe(&self) -> Capabilities;
}

impl<F> CapabilityProbe for F
where
    F: Fn() -> Capabilities,
{
    fn probe(&self) -> Capabilities {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    generation: u32,
}

impl ProbeTicket {
    pub fn generation(self) -> u32 {
        self.generation
    }

    pub fn from_generation(generation: u32) -> Self {
        Self { generation }
    }
}

/// Hands out tickets and accepts only the newest one, once.
#[derive(Debug, Default)]
pub(crate) struct ProbeGate {
    generation: u32,
    in_flight: bool,
}

impl ProbeGate {
    pub fn begin(&mut self) -> ProbeTicket {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = true;
        ProbeTicket {
            generation: self.generation,
        }
    }

    pub fn accept(&mut self, ticket: ProbeTicket) -> bool {
        if !self.in_flight || ticket.generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Drop whatever is in flight.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = false;
    }
}
