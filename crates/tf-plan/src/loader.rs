//! CSV plan loader.
//!
//! # CSV format
//!
//! One row per plan element, listed in the order the agent experienced them.
//! Rows for different agents may be interleaved; rows for the same agent must
//! keep plan order.
//!
//! ```csv
//! agent_id,element,act_type,start_time,end_time,mode,departure_time,travel_time,distance
//! 0,activity,home,,25200,,,,
//! 0,leg,,,,car,25200,1200,15000
//! 0,activity,work,26400,61200,,,,
//! 0,leg,,,,car,61200,1500,15500
//! 0,activity,home,62700,,,,,
//! ```
//!
//! Empty cells are undefined values: an activity without `start_time` is
//! unbounded towards the past, a leg without `distance` has no recorded
//! route length.  A leg without `departure_time`/`travel_time` loads with a
//! NaN time, which stop-based features later reject.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tf_core::AgentId;

use crate::{Activity, Leg, PlanElement, PlanError, Population, TransportMode};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ElementRecord {
    agent_id:       u32,
    element:        String,
    act_type:       Option<String>,
    start_time:     Option<f64>,
    end_time:       Option<f64>,
    mode:           Option<String>,
    departure_time: Option<f64>,
    travel_time:    Option<f64>,
    distance:       Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Population`] from a plan CSV file.
pub fn load_plans_csv(path: &Path) -> Result<Population, PlanError> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_plans_reader(file)
}

/// Like [`load_plans_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded data.
pub fn load_plans_reader<R: Read>(reader: R) -> Result<Population, PlanError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: HashMap<u32, Vec<PlanElement>> = HashMap::new();
    let mut rows = 0usize;

    for (line, result) in csv_reader.deserialize::<ElementRecord>().enumerate() {
        let row = result.map_err(|e| PlanError::Parse(e.to_string()))?;
        let agent = row.agent_id;
        let element = parse_element(row).map_err(|msg| {
            // +2: one for the header, one for 1-based line numbers.
            PlanError::Parse(format!("row {}: {msg}", line + 2))
        })?;
        by_agent.entry(agent).or_default().push(element);
        rows += 1;
    }

    let population: Population = by_agent
        .into_iter()
        .map(|(agent, elements)| (AgentId(agent), elements.into_iter().collect()))
        .collect();

    log::debug!("loaded {} plan elements for {} agents", rows, population.len());
    Ok(population)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_element(row: ElementRecord) -> Result<PlanElement, String> {
    match row.element.trim() {
        "activity" => Ok(PlanElement::Activity(Activity {
            act_type:   row.act_type.unwrap_or_default(),
            start_time: row.start_time,
            end_time:   row.end_time,
        })),
        "leg" => {
            let mode = row
                .mode
                .as_deref()
                .map(TransportMode::parse)
                .ok_or_else(|| "leg without a mode".to_string())?;
            Ok(PlanElement::Leg(Leg {
                mode,
                departure_time: row.departure_time.unwrap_or(f64::NAN),
                travel_time:    row.travel_time.unwrap_or(f64::NAN),
                distance:       row.distance,
            }))
        }
        other => Err(format!(
            "invalid element {other:?}: expected \"activity\" or \"leg\""
        )),
    }
}
