//! The write path: event replay into per-agent traces.

use tf_core::{AgentId, AggregationStrategy, LinkId};

use crate::{
    AgentFilter, AgentTrace, AllAgents, FastMap, LinkTable, TraceError, TraceEvent, TraceResult,
    TraceSet, VehicleDrivers,
};

/// Consumes traversal events and builds one [`AgentTrace`] per driver.
///
/// # Type parameter
///
/// `F` decides which agents are aggregated.  The default [`AllAgents`]
/// keeps everyone; pass a `HashSet<AgentId>` to restrict the replay to the
/// population under analysis.
///
/// # Errors
///
/// Any protocol violation or unknown link aborts the replay.  Traces are
/// only trustworthy for a complete, consistent stream, so there is no
/// skip-and-continue mode.
pub struct TrajectoryAggregator<F: AgentFilter = AllAgents> {
    strategy: AggregationStrategy,
    links:    LinkTable,
    filter:   F,
    drivers:  VehicleDrivers,
    traces:   FastMap<AgentId, AgentTrace>,
    /// Events handled so far, including ignored ones.
    handled:  u64,
    /// Link events whose vehicle had no accepted driver.
    ignored:  u64,
}

impl TrajectoryAggregator<AllAgents> {
    /// An aggregator that keeps a trace for every agent in the stream.
    pub fn new(strategy: AggregationStrategy, links: LinkTable) -> Self {
        Self::with_filter(strategy, links, AllAgents)
    }
}

impl<F: AgentFilter> TrajectoryAggregator<F> {
    pub fn with_filter(strategy: AggregationStrategy, links: LinkTable, filter: F) -> Self {
        Self {
            strategy,
            links,
            filter,
            drivers: VehicleDrivers::new(),
            traces:  FastMap::default(),
            handled: 0,
            ignored: 0,
        }
    }

    pub fn strategy(&self) -> AggregationStrategy {
        self.strategy
    }

    pub fn drivers(&self) -> &VehicleDrivers {
        &self.drivers
    }

    /// The trace built so far for `agent`.
    pub fn trace(&self, agent: AgentId) -> Option<&AgentTrace> {
        self.traces.get(&agent)
    }

    /// `agent` starts traversing `link` at `time`.
    ///
    /// Agents rejected by the filter are ignored.
    pub fn on_unit_start(&mut self, link: LinkId, agent: AgentId, time: f64) -> TraceResult<()> {
        if !self.filter.accepts(agent) {
            return Ok(());
        }
        let strategy = self.strategy;
        self.traces
            .entry(agent)
            .or_insert_with(|| AgentTrace::new(strategy))
            .start(link, time)
            .map_err(|violation| TraceError::Protocol { agent, link, time, violation })
    }

    /// `agent` finishes traversing `link` at `time`, having covered `magnitude`.
    ///
    /// Agents rejected by the filter are ignored.
    pub fn on_unit_end(&mut self, link: LinkId, agent: AgentId, time: f64, magnitude: f64) -> TraceResult<()> {
        if !self.filter.accepts(agent) {
            return Ok(());
        }
        let strategy = self.strategy;
        let record = self.traces
            .entry(agent)
            .or_insert_with(|| AgentTrace::new(strategy))
            .end(link, time, magnitude)
            .map_err(|violation| TraceError::Protocol { agent, link, time, violation })?;
        if record.is_degenerate() {
            log::debug!("{agent} traversed {link} in zero time at t={time}");
        }
        Ok(())
    }

    /// Dispatch one event.
    ///
    /// Traffic events update the vehicle→driver table before the traversal
    /// they open or close is forwarded, so link events in between resolve to
    /// the right driver.
    pub fn handle(&mut self, event: &TraceEvent) -> TraceResult<()> {
        self.handled += 1;
        match *event {
            TraceEvent::EntersTraffic { time, vehicle, agent, link } => {
                if !self.filter.accepts(agent) {
                    return Ok(());
                }
                if let Some(previous) = self.drivers.enter(vehicle, agent) {
                    log::debug!("{vehicle} re-entered traffic with {agent}, superseding {previous}");
                }
                self.on_unit_start(link, agent, time)
            }
            TraceEvent::LeavesTraffic { time, vehicle, agent, link } => {
                if !self.filter.accepts(agent) {
                    return Ok(());
                }
                self.drivers.leave(vehicle);
                let length = self.links.length(link)?;
                self.on_unit_end(link, agent, time, length)
            }
            TraceEvent::LinkEnter { time, vehicle, link } => match self.drivers.driver_of(vehicle) {
                Some(agent) => self.on_unit_start(link, agent, time),
                None => {
                    self.ignored += 1;
                    Ok(())
                }
            },
            TraceEvent::LinkLeave { time, vehicle, link } => match self.drivers.driver_of(vehicle) {
                Some(agent) => {
                    let length = self.links.length(link)?;
                    self.on_unit_end(link, agent, time, length)
                }
                None => {
                    self.ignored += 1;
                    Ok(())
                }
            },
        }
    }

    /// Handle every event in order, stopping at the first error.
    ///
    /// Returns the number of events consumed.
    pub fn replay<I>(&mut self, events: I) -> TraceResult<u64>
    where
        I: IntoIterator<Item = TraceEvent>,
    {
        let before = self.handled;
        for event in events {
            self.handle(&event)?;
        }
        Ok(self.handled - before)
    }

    /// Start a new iteration of the event stream: forget which agent drives
    /// which vehicle.  Accumulated traces are kept.
    pub fn reset(&mut self) {
        self.drivers.reset();
    }

    /// End the write phase and hand the traces over for querying.
    ///
    /// Open bins are sealed.  A traversal that never ended (the stream
    /// stopped while the agent was on a link) is dropped with a warning.
    pub fn finish(mut self) -> TraceSet {
        let mut dangling = 0usize;
        for (agent, trace) in self.traces.iter_mut() {
            if let Some((link, entered_at)) = trace.seal() {
                log::warn!("{agent} still on {link} since t={entered_at} at end of replay; segment dropped");
                dangling += 1;
            }
        }
        log::info!(
            "replay finished: {} events, {} agents traced, {} link events without a tracked driver, {} dangling segments",
            self.handled,
            self.traces.len(),
            self.ignored,
            dangling,
        );
        TraceSet::new(self.strategy, self.traces)
    }
}
