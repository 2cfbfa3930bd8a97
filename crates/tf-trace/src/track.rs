//! One agent's trajectory under either aggregation strategy.

use tf_core::{AggregationStrategy, LinkId};

use crate::{BinnedStore, IntervalRecord, IntervalStore, ProtocolViolation, SegmentState, TraceResult};

/// The storage half of an [`AgentTrace`]: the two interchangeable strategies.
#[derive(Clone, Debug)]
pub enum TraceStore {
    Intervals(IntervalStore),
    Binned(BinnedStore),
}

impl TraceStore {
    pub fn new(strategy: AggregationStrategy) -> Self {
        match strategy {
            AggregationStrategy::Intervals => TraceStore::Intervals(IntervalStore::new()),
            AggregationStrategy::Binned { bin_size_secs } => {
                TraceStore::Binned(BinnedStore::new(bin_size_secs))
            }
        }
    }

    /// Quantity accrued within `[start, end)`.
    pub fn query(&self, start: f64, end: f64) -> TraceResult<f64> {
        match self {
            TraceStore::Intervals(store) => store.query(start, end),
            TraceStore::Binned(store) => store.query(start, end),
        }
    }

    /// Everything the store has recorded.
    pub fn total(&self) -> f64 {
        match self {
            TraceStore::Intervals(store) => store.total(),
            TraceStore::Binned(store) => store.total(),
        }
    }

    fn on_start(&mut self, time: f64) {
        if let TraceStore::Binned(store) = self {
            store.on_start(time);
        }
    }

    fn add(&mut self, record: IntervalRecord) {
        match self {
            TraceStore::Intervals(store) => store.push(record),
            TraceStore::Binned(store) => store.add(record),
        }
    }
}

/// Traversal state plus accumulated storage for one agent.
#[derive(Clone, Debug)]
pub struct AgentTrace {
    state: SegmentState,
    store: TraceStore,
}

impl AgentTrace {
    pub fn new(strategy: AggregationStrategy) -> Self {
        Self { state: SegmentState::Idle, store: TraceStore::new(strategy) }
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// The agent enters `link` at `time`.
    pub fn start(&mut self, link: LinkId, time: f64) -> Result<(), ProtocolViolation> {
        self.state.start(link, time)?;
        self.store.on_start(time);
        Ok(())
    }

    /// The agent leaves `link` at `time` having covered `value`.
    pub fn end(&mut self, link: LinkId, time: f64, value: f64) -> Result<IntervalRecord, ProtocolViolation> {
        let record = self.state.end(link, time, value)?;
        self.store.add(record);
        Ok(record)
    }

    /// Quantity accrued within `[start, end)`.
    pub fn query(&self, start: f64, end: f64) -> TraceResult<f64> {
        self.store.query(start, end)
    }

    /// Close the write phase: seal any open bin and drop an unfinished
    /// traversal.  Returns the dropped traversal's `(link, entered_at)`.
    pub(crate) fn seal(&mut self) -> Option<(LinkId, f64)> {
        if let TraceStore::Binned(store) = &mut self.store {
            store.flush();
        }
        match std::mem::take(&mut self.state) {
            SegmentState::Active { link, entered_at } => Some((link, entered_at)),
            SegmentState::Idle => None,
        }
    }
}
