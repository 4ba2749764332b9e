use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Half-open delivery window `[start, end)`. A missing bound means the
/// window is unconstrained on that side.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindow {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        TimeWindow { start, end }
    }

    pub fn unconstrained() -> Self {
        TimeWindow::default()
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn is_unconstrained(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_well_formed(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start < end,
            _ => true,
        }
    }

    /// Earliest admissible service time for a raw arrival: an early truck
    /// waits at the start bound.
    pub fn service_time(&self, arrival: Timestamp) -> Timestamp {
        match self.start {
            Some(start) if arrival < start => start,
            _ => arrival,
        }
    }

    /// Service must begin strictly before the end bound.
    pub fn admits(&self, service_time: Timestamp) -> bool {
        match self.end {
            Some(end) => service_time < end,
            None => true,
        }
    }
}

#[derive(Default)]
pub struct TimeWindowBuilder {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindowBuilder {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    pub fn build(self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }
}
