//! Synthetic scenario: an 8-link network, five agents' plans, and the
//! traversal events those plans produce.
//!
//! ```text
//!   home_a ──0──▶ connector ──1──▶ downtown ──6──▶ park
//!          ◀──3──           ◀──2──          ◀──7──
//!   home_b ──4──▶ park
//!          ◀──5──
//! ```

use anyhow::{Context, Result};

use tf_core::{AgentId, LinkId, VehicleId};
use tf_plan::Population;
use tf_trace::{LinkTable, TraceEvent};

pub const LINKS_CSV: &str = "\
link_id,length_m
0,1500
1,1000
2,1000
3,1500
4,2000
5,2000
6,2000
7,2000
";

// Agent 1 commutes; agent 2 also drives to lunch; agent 3 only walks;
// agent 4 commutes on the other side of town; agent 5 drives one way.
pub const PLANS_CSV: &str = "\
agent_id,element,act_type,start_time,end_time,mode,departure_time,travel_time,distance
1,activity,home,,28800,,,,
1,leg,,,,car,28800,200,2500
1,activity,work,29000,61200,,,,
1,leg,,,,car,61200,200,2500
1,activity,home,61400,,,,,
2,activity,home,,27000,,,,
2,leg,,,,car,27000,200,2500
2,activity,work,27200,43200,,,,
2,leg,,,,car,43200,160,2000
2,activity,lunch,43360,46800,,,,
2,leg,,,,car,46800,160,2000
2,activity,work,46960,63000,,,,
2,leg,,,,car,63000,200,2500
2,activity,home,63200,,,,,
3,activity,home,,30000,,,,
3,leg,,,,walk,30000,900,1100
3,activity,shop,30900,32400,,,,
3,leg,,,,walk,32400,900,1100
3,activity,home,33300,,,,,
4,activity,home,,29700,,,,
4,leg,,,,car,29700,160,2000
4,activity,work,29860,60300,,,,
4,leg,,,,car,60300,160,2000
4,activity,home,60460,,,,,
5,activity,home,,32400,,,,
5,leg,,,,car,32400,160,2000
5,activity,visit,32560,,,,,
";

/// Link sequence of each agent's car legs, in plan order.
const ROUTES: &[(u32, &[&[u32]])] = &[
    (1, &[&[0, 1], &[2, 3]]),
    (2, &[&[0, 1], &[6], &[7], &[2, 3]]),
    (4, &[&[4], &[5]]),
    (5, &[&[4]]),
];

/// A driver outside the study population crossing town at 08:00.
const THROUGH_AGENT: u32 = 99;

fn route_of(agent: AgentId, leg: usize) -> Option<&'static [u32]> {
    ROUTES
        .iter()
        .find(|(a, _)| *a == agent.raw())
        .and_then(|(_, legs)| legs.get(leg).copied())
}

/// Events of one car trip along `route`, departing at `departure`.
///
/// Each link takes a share of `travel_time` proportional to its length.
fn trip_events(
    out:         &mut Vec<TraceEvent>,
    links:       &LinkTable,
    agent:       AgentId,
    route:       &[u32],
    departure:   f64,
    travel_time: f64,
) -> Result<()> {
    let vehicle = VehicleId(agent.raw());
    let lengths = route
        .iter()
        .map(|&l| links.length(LinkId(l)))
        .collect::<Result<Vec<f64>, _>>()?;
    let total: f64 = lengths.iter().sum();

    let mut t = departure;
    out.push(TraceEvent::EntersTraffic { time: t, vehicle, agent, link: LinkId(route[0]) });
    for (i, (&link, &len)) in route.iter().zip(&lengths).enumerate() {
        t += travel_time * len / total;
        let link = LinkId(link);
        match route.get(i + 1) {
            Some(&next) => {
                out.push(TraceEvent::LinkLeave { time: t, vehicle, link });
                out.push(TraceEvent::LinkEnter { time: t, vehicle, link: LinkId(next) });
            }
            None => out.push(TraceEvent::LeavesTraffic { time: t, vehicle, agent, link }),
        }
    }
    Ok(())
}

/// The full event stream, ordered by time.
pub fn events(population: &Population, links: &LinkTable) -> Result<Vec<TraceEvent>> {
    let mut out = Vec::new();
    for (agent, plan) in population.iter() {
        for (i, leg) in plan.car_legs().enumerate() {
            let route = route_of(agent, i).with_context(|| format!("no route for {agent} car leg {i}"))?;
            trip_events(&mut out, links, agent, route, leg.departure_time, leg.travel_time)?;
        }
    }
    trip_events(&mut out, links, AgentId(THROUGH_AGENT), &[0, 1], 28_800.0, 180.0)?;

    // Stable: one vehicle's events keep their generated order.
    out.sort_by(|a, b| a.time().total_cmp(&b.time()));
    Ok(out)
}
