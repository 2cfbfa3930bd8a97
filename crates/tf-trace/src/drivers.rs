//! Vehicle → driver table.

use tf_core::{AgentId, VehicleId};

use crate::FastMap;

/// Who is driving each vehicle that is currently in traffic.
///
/// An entry exists only between a vehicle's `EntersTraffic` and its matching
/// `LeavesTraffic`.  The same vehicle may be driven by different agents over
/// disjoint time windows.
#[derive(Clone, Debug, Default)]
pub struct VehicleDrivers {
    drivers: FastMap<VehicleId, AgentId>,
}

impl VehicleDrivers {
    pub fn new() -> Self {
        Self::default()
    }

    /// `agent` starts driving `vehicle`.  Returns the driver it supersedes,
    /// if the vehicle never left traffic under its previous driver.
    pub fn enter(&mut self, vehicle: VehicleId, agent: AgentId) -> Option<AgentId> {
        self.drivers.insert(vehicle, agent)
    }

    /// `vehicle` leaves traffic.  Returns its driver, if one was recorded.
    pub fn leave(&mut self, vehicle: VehicleId) -> Option<AgentId> {
        self.drivers.remove(&vehicle)
    }

    #[inline]
    pub fn driver_of(&self, vehicle: VehicleId) -> Option<AgentId> {
        self.drivers.get(&vehicle).copied()
    }

    /// Number of vehicles currently in traffic.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Forget every mapping.
    pub fn reset(&mut self) {
        self.drivers.clear();
    }
}
