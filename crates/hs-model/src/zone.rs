//! Thermal zones and their sizing parameters.

use hs_core::{NodeId, ScheduleId, TerminalId, ZoneHvacId, ZoneId};
use serde::{Deserialize, Serialize};

/// How a zone's sizing accounts for air delivered by a dedicated outdoor-air
/// system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoasControlStrategy {
    #[default]
    NeutralSupplyAir,
    NeutralDehumidifiedSupplyAir,
    ColdSupplyAir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSizing {
    pub cooling_design_supply_air_c: f64,
    pub heating_design_supply_air_c: f64,
    /// Minimum cooling airflow as a fraction of the design flow.
    pub cooling_min_air_flow_fraction: f64,
    pub account_for_doas: bool,
    pub doas_control_strategy: DoasControlStrategy,
    pub doas_low_setpoint_c: f64,
    pub doas_high_setpoint_c: f64,
}

impl Default for ZoneSizing {
    fn default() -> Self {
        Self {
            cooling_design_supply_air_c: 14.0,
            heating_design_supply_air_c: 40.0,
            cooling_min_air_flow_fraction: 0.0,
            account_for_doas: false,
            doas_control_strategy: DoasControlStrategy::NeutralSupplyAir,
            doas_low_setpoint_c: 21.1,
            doas_high_setpoint_c: 23.9,
        }
    }
}

/// Equipment serving a zone, in load-distribution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEquipmentRef {
    Terminal(TerminalId),
    ZoneHvac(ZoneHvacId),
}

/// Description of a zone handed to [`crate::Model::add_zone`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSpec {
    pub name: String,
    pub floor_area_m2: f64,
    /// Design outdoor-air requirement.
    pub outdoor_air_m3ps: f64,
    pub has_humidistat: bool,
    pub heating_setpoint_c: Option<f64>,
    pub cooling_setpoint_c: Option<f64>,
    pub ventilation_schedule: Option<ScheduleId>,
}

impl ZoneSpec {
    /// A heated and cooled zone with no outdoor-air requirement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floor_area_m2: 0.0,
            outdoor_air_m3ps: 0.0,
            has_humidistat: false,
            heating_setpoint_c: Some(21.0),
            cooling_setpoint_c: Some(24.0),
            ventilation_schedule: None,
        }
    }

    pub fn with_floor_area(mut self, m2: f64) -> Self {
        self.floor_area_m2 = m2;
        self
    }

    pub fn with_outdoor_air(mut self, m3ps: f64) -> Self {
        self.outdoor_air_m3ps = m3ps;
        self
    }

    pub fn with_humidistat(mut self) -> Self {
        self.has_humidistat = true;
        self
    }

    pub fn with_ventilation_schedule(mut self, schedule: ScheduleId) -> Self {
        self.ventilation_schedule = Some(schedule);
        self
    }

    pub fn heated_only(mut self) -> Self {
        self.cooling_setpoint_c = None;
        self
    }

    pub fn cooled_only(mut self) -> Self {
        self.heating_setpoint_c = None;
        self
    }

    pub fn unconditioned(mut self) -> Self {
        self.heating_setpoint_c = None;
        self.cooling_setpoint_c = None;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub floor_area_m2: f64,
    pub outdoor_air_m3ps: f64,
    pub has_humidistat: bool,
    pub heating_setpoint_c: Option<f64>,
    pub cooling_setpoint_c: Option<f64>,
    pub ventilation_schedule: Option<ScheduleId>,
    /// Node where supply terminals deliver and return paths start.
    pub air_node: NodeId,
    pub sizing: ZoneSizing,
    pub equipment: Vec<ZoneEquipmentRef>,
}

impl Zone {
    pub fn is_heated(&self) -> bool {
        self.heating_setpoint_c.is_some()
    }

    pub fn is_cooled(&self) -> bool {
        self.cooling_setpoint_c.is_some()
    }

    pub fn is_conditioned(&self) -> bool {
        self.is_heated() || self.is_cooled()
    }

    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.equipment.iter().filter_map(|e| match e {
            ZoneEquipmentRef::Terminal(t) => Some(*t),
            ZoneEquipmentRef::ZoneHvac(_) => None,
        })
    }

    pub fn zone_hvac(&self) -> impl Iterator<Item = ZoneHvacId> + '_ {
        self.equipment.iter().filter_map(|e| match e {
            ZoneEquipmentRef::ZoneHvac(u) => Some(*u),
            ZoneEquipmentRef::Terminal(_) => None,
        })
    }
}
