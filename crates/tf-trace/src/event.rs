//! Traversal events consumed by the aggregator.

use tf_core::{AgentId, LinkId, VehicleId};

/// The four event kinds the aggregator reacts to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    EntersTraffic,
    LeavesTraffic,
    LinkEnter,
    LinkLeave,
}

impl EventKind {
    /// Parse the `kind` column of an event file.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "enters_traffic" => Some(EventKind::EntersTraffic),
            "leaves_traffic" => Some(EventKind::LeavesTraffic),
            "link_enter"     => Some(EventKind::LinkEnter),
            "link_leave"     => Some(EventKind::LinkLeave),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::EntersTraffic => "enters_traffic",
            EventKind::LeavesTraffic => "leaves_traffic",
            EventKind::LinkEnter     => "link_enter",
            EventKind::LinkLeave     => "link_leave",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event of the simulated trace.
///
/// Traffic events name the driver directly.  Link events only name the
/// vehicle; its driver is whoever most recently entered traffic with it.
///
/// A car trip on links `a → b → c` produces:
///
/// ```text
/// EntersTraffic(a)  LinkLeave(a)  LinkEnter(b)  LinkLeave(b)  LinkEnter(c)  LeavesTraffic(c)
/// └──── start ────┘ └── end ────┘ └── start ──┘ └── end ────┘ └── start ──┘ └──── end ────┘
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TraceEvent {
    EntersTraffic { time: f64, vehicle: VehicleId, agent: AgentId, link: LinkId },
    LeavesTraffic { time: f64, vehicle: VehicleId, agent: AgentId, link: LinkId },
    LinkEnter     { time: f64, vehicle: VehicleId, link: LinkId },
    LinkLeave     { time: f64, vehicle: VehicleId, link: LinkId },
}

impl TraceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TraceEvent::EntersTraffic { .. } => EventKind::EntersTraffic,
            TraceEvent::LeavesTraffic { .. } => EventKind::LeavesTraffic,
            TraceEvent::LinkEnter { .. }     => EventKind::LinkEnter,
            TraceEvent::LinkLeave { .. }     => EventKind::LinkLeave,
        }
    }

    pub fn time(&self) -> f64 {
        match *self {
            TraceEvent::EntersTraffic { time, .. }
            | TraceEvent::LeavesTraffic { time, .. }
            | TraceEvent::LinkEnter { time, .. }
            | TraceEvent::LinkLeave { time, .. } => time,
        }
    }

    pub fn vehicle(&self) -> VehicleId {
        match *self {
            TraceEvent::EntersTraffic { vehicle, .. }
            | TraceEvent::LeavesTraffic { vehicle, .. }
            | TraceEvent::LinkEnter { vehicle, .. }
            | TraceEvent::LinkLeave { vehicle, .. } => vehicle,
        }
    }

    pub fn link(&self) -> LinkId {
        match *self {
            TraceEvent::EntersTraffic { link, .. }
            | TraceEvent::LeavesTraffic { link, .. }
            | TraceEvent::LinkEnter { link, .. }
            | TraceEvent::LinkLeave { link, .. } => link,
        }
    }

    /// The agent named by the event itself (traffic events only).
    pub fn agent(&self) -> Option<AgentId> {
        match *self {
            TraceEvent::EntersTraffic { agent, .. } | TraceEvent::LeavesTraffic { agent, .. } => Some(agent),
            TraceEvent::LinkEnter { .. } | TraceEvent::LinkLeave { .. } => None,
        }
    }
}
