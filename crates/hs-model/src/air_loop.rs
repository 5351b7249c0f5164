//! Air loops and their outdoor-air subsystem.

use hs_controls::OutdoorAirController;
use hs_core::{AirLoopId, EquipId, NodeId, ScheduleId, SpmId, TerminalId};
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Role a component plays on the supply path. Each slot holds at most one
/// piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirSlot {
    SupplyFan,
    HeatingCoil,
    CoolingCoil,
    SupplementalHeatingCoil,
    Humidifier,
    EvaporativeCooler,
}

/// End of the supply path a component is inserted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyEnd {
    /// Directly after the supply inlet node.
    Inlet,
    /// Directly before the supply outlet node.
    Outlet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NightCycle {
    #[default]
    StayOff,
    CycleOnAny,
    CycleOnControlZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizingLoad {
    #[default]
    Sensible,
    VentilationRequirement,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirLoopSizing {
    pub load_to_size_on: SizingLoad,
    pub central_cooling_supply_c: f64,
    pub central_heating_supply_c: f64,
    pub preheat_c: f64,
    pub precool_c: f64,
    pub all_outdoor_air_cooling: bool,
    pub all_outdoor_air_heating: bool,
    pub min_system_air_flow_ratio: f64,
}

impl Default for AirLoopSizing {
    fn default() -> Self {
        Self {
            load_to_size_on: SizingLoad::Sensible,
            central_cooling_supply_c: 12.8,
            central_heating_supply_c: 12.8,
            preheat_c: 7.0,
            precool_c: 12.8,
            all_outdoor_air_cooling: false,
            all_outdoor_air_heating: false,
            min_system_air_flow_ratio: 0.3,
        }
    }
}

/// Outdoor-air mixer, its controller and the two side streams through which
/// outdoor air enters and relief air leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorAirSystem {
    pub mixer: EquipId,
    pub controller: OutdoorAirController,
    pub outdoor_air_node: NodeId,
    pub relief_node: NodeId,
    /// Outdoor air node to mixer.
    pub oa_stream: Segment,
    /// Mixer to relief node.
    pub relief_stream: Segment,
    pub heat_recovery: Option<EquipId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirLoop {
    pub id: AirLoopId,
    pub name: String,
    pub supply_inlet: NodeId,
    pub supply_outlet: NodeId,
    pub demand_inlet: NodeId,
    pub demand_outlet: NodeId,
    pub supply: Segment,
    pub supply_fan: Option<EquipId>,
    pub heating_coil: Option<EquipId>,
    pub cooling_coil: Option<EquipId>,
    pub supplemental_heating_coil: Option<EquipId>,
    pub humidifier: Option<EquipId>,
    pub evaporative_cooler: Option<EquipId>,
    pub outdoor_air: Option<OutdoorAirSystem>,
    pub setpoint_managers: Vec<SpmId>,
    pub terminals: Vec<TerminalId>,
    pub sizing: AirLoopSizing,
    pub availability: Option<ScheduleId>,
    pub night_cycle: NightCycle,
    pub dedicated_outdoor_air: bool,
}

impl AirLoop {
    pub fn slot(&self, slot: AirSlot) -> Option<EquipId> {
        match slot {
            AirSlot::SupplyFan => self.supply_fan,
            AirSlot::HeatingCoil => self.heating_coil,
            AirSlot::CoolingCoil => self.cooling_coil,
            AirSlot::SupplementalHeatingCoil => self.supplemental_heating_coil,
            AirSlot::Humidifier => self.humidifier,
            AirSlot::EvaporativeCooler => self.evaporative_cooler,
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: AirSlot) -> &mut Option<EquipId> {
        match slot {
            AirSlot::SupplyFan => &mut self.supply_fan,
            AirSlot::HeatingCoil => &mut self.heating_coil,
            AirSlot::CoolingCoil => &mut self.cooling_coil,
            AirSlot::SupplementalHeatingCoil => &mut self.supplemental_heating_coil,
            AirSlot::Humidifier => &mut self.humidifier,
            AirSlot::EvaporativeCooler => &mut self.evaporative_cooler,
        }
    }

    pub fn heat_recovery(&self) -> Option<EquipId> {
        self.outdoor_air.as_ref().and_then(|oa| oa.heat_recovery)
    }

    pub fn controller(&self) -> Option<&OutdoorAirController> {
        self.outdoor_air.as_ref().map(|oa| &oa.controller)
    }

    pub fn controller_mut(&mut self) -> Option<&mut OutdoorAirController> {
        self.outdoor_air.as_mut().map(|oa| &mut oa.controller)
    }
}
