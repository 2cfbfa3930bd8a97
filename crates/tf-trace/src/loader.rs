//! CSV loaders for link lengths and event streams.
//!
//! # Link CSV
//!
//! ```csv
//! link_id,length_m
//! 0,120.5
//! 1,800
//! ```
//!
//! # Event CSV
//!
//! One row per event, in stream order.  `agent` is required for the traffic
//! kinds and ignored for link kinds.
//!
//! ```csv
//! time,kind,vehicle,agent,link
//! 25200,enters_traffic,7,7,0
//! 25260,link_leave,7,,0
//! 25260,link_enter,7,,1
//! 25320,leaves_traffic,7,7,1
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tf_core::{AgentId, LinkId, VehicleId};

use crate::{EventKind, LinkTable, TraceError, TraceEvent};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRecord {
    link_id:  u32,
    length_m: f64,
}

#[derive(Deserialize)]
struct EventRecord {
    time:    f64,
    kind:    String,
    vehicle: u32,
    agent:   Option<u32>,
    link:    u32,
}

// ── Links ─────────────────────────────────────────────────────────────────────

/// Load a [`LinkTable`] from a CSV file.
pub fn load_links_csv(path: &Path) -> Result<LinkTable, TraceError> {
    let file = std::fs::File::open(path).map_err(TraceError::Io)?;
    load_links_reader(file)
}

/// Like [`load_links_csv`] but accepts any `Read` source.
pub fn load_links_reader<R: Read>(reader: R) -> Result<LinkTable, TraceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = LinkTable::new();
    for result in csv_reader.deserialize::<LinkRecord>() {
        let row = result.map_err(|e| TraceError::Parse(e.to_string()))?;
        if !(row.length_m.is_finite() && row.length_m >= 0.0) {
            return Err(TraceError::Parse(format!(
                "link {}: length must be a non-negative number, got {}",
                row.link_id, row.length_m
            )));
        }
        table.insert(LinkId(row.link_id), row.length_m);
    }
    log::debug!("loaded {} links", table.len());
    Ok(table)
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Load an event stream from a CSV file.
pub fn load_events_csv(path: &Path) -> Result<Vec<TraceEvent>, TraceError> {
    let file = std::fs::File::open(path).map_err(TraceError::Io)?;
    load_events_reader(file)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
///
/// Only parses; ordering and enter/exit pairing are checked during replay.
pub fn load_events_reader<R: Read>(reader: R) -> Result<Vec<TraceEvent>, TraceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();
    for (line, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let row = result.map_err(|e| TraceError::Parse(e.to_string()))?;
        // +2: one for the header, one for 1-based line numbers.
        let event = parse_event(row).map_err(|msg| TraceError::Parse(format!("row {}: {msg}", line + 2)))?;
        events.push(event);
    }
    log::debug!("loaded {} events", events.len());
    Ok(events)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_event(row: EventRecord) -> Result<TraceEvent, String> {
    let kind = EventKind::parse(&row.kind).ok_or_else(|| format!("unknown event kind {:?}", row.kind))?;
    let time    = row.time;
    let vehicle = VehicleId(row.vehicle);
    let link    = LinkId(row.link);
    let agent   = || {
        row.agent
            .map(AgentId)
            .ok_or_else(|| format!("{kind} event without an agent"))
    };
    Ok(match kind {
        EventKind::EntersTraffic => TraceEvent::EntersTraffic { time, vehicle, agent: agent()?, link },
        EventKind::LeavesTraffic => TraceEvent::LeavesTraffic { time, vehicle, agent: agent()?, link },
        EventKind::LinkEnter     => TraceEvent::LinkEnter { time, vehicle, link },
        EventKind::LinkLeave     => TraceEvent::LinkLeave { time, vehicle, link },
    })
}
