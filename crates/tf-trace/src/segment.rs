//! Per-agent traversal state.

use tf_core::LinkId;

use crate::{IntervalRecord, ProtocolViolation};

/// Whether an agent is currently traversing a link.
///
/// ```text
/// Idle ──start(link, t0)──▶ Active { link, entered_at: t0 }
/// Active { link, t0 } ──end(link, t1, v)──▶ Idle      emits IntervalRecord(t0, t1, v)
/// ```
///
/// Any other transition is a [`ProtocolViolation`]: the event stream is
/// assumed to match every enter with exactly one later exit on the same link.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum SegmentState {
    #[default]
    Idle,
    Active { link: LinkId, entered_at: f64 },
}

impl SegmentState {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, SegmentState::Active { .. })
    }

    /// Open a traversal of `link` at `time`.
    pub fn start(&mut self, link: LinkId, time: f64) -> Result<(), ProtocolViolation> {
        if let SegmentState::Active { link, entered_at } = *self {
            return Err(ProtocolViolation::AlreadyActive { link, since: entered_at });
        }
        *self = SegmentState::Active { link, entered_at: time };
        Ok(())
    }

    /// Close the traversal of `link` at `time`, returning the completed record.
    ///
    /// On error the state is left untouched.
    pub fn end(&mut self, link: LinkId, time: f64, value: f64) -> Result<IntervalRecord, ProtocolViolation> {
        let SegmentState::Active { link: open, entered_at } = *self else {
            return Err(ProtocolViolation::NotActive);
        };
        if open != link {
            return Err(ProtocolViolation::UnitMismatch { expected: open });
        }
        if time < entered_at {
            return Err(ProtocolViolation::EndsBeforeStart { start: entered_at, end: time });
        }
        *self = SegmentState::Idle;
        Ok(IntervalRecord { start: entered_at, end: time, value })
    }
}
