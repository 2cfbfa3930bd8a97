//! Link lengths: the magnitude accrued by each link traversal.

use tf_core::LinkId;

use crate::{FastMap, TraceError, TraceResult};

/// Maps each link to its length in metres.
#[derive(Clone, Debug, Default)]
pub struct LinkTable {
    lengths: FastMap<LinkId, f64>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) `link`'s length.
    pub fn insert(&mut self, link: LinkId, length_m: f64) {
        self.lengths.insert(link, length_m);
    }

    /// Length of `link`, or [`TraceError::UnknownLink`].
    pub fn length(&self, link: LinkId) -> TraceResult<f64> {
        self.lengths
            .get(&link)
            .copied()
            .ok_or(TraceError::UnknownLink(link))
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

impl FromIterator<(LinkId, f64)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (LinkId, f64)>>(iter: I) -> Self {
        Self { lengths: iter.into_iter().collect() }
    }
}
