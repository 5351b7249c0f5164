//! Air terminals binding an air loop to a zone.

use hs_core::{AirLoopId, CompId, EquipId, TerminalId, ZoneId};
use serde::{Deserialize, Serialize};

/// Default VAV minimum airflow as a fraction of design flow.
pub const VAV_MIN_FLOW_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    Uncontrolled,
    VavReheat,
    VavNoReheat,
    ParallelFanPoweredReheat,
    DoasSingleDuct,
}

impl TerminalKind {
    pub fn class(self) -> &'static str {
        match self {
            TerminalKind::Uncontrolled => "AirTerminal:SingleDuct:ConstantVolume:NoReheat",
            TerminalKind::VavReheat => "AirTerminal:SingleDuct:VAV:Reheat",
            TerminalKind::VavNoReheat | TerminalKind::DoasSingleDuct => {
                "AirTerminal:SingleDuct:VAV:NoReheat"
            }
            TerminalKind::ParallelFanPoweredReheat => "AirTerminal:SingleDuct:ParallelPIU:Reheat",
        }
    }

    pub fn default_min_flow_fraction(self) -> f64 {
        match self {
            TerminalKind::VavReheat
            | TerminalKind::VavNoReheat
            | TerminalKind::ParallelFanPoweredReheat => VAV_MIN_FLOW_FRACTION,
            TerminalKind::Uncontrolled | TerminalKind::DoasSingleDuct => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamperHeatingAction {
    Normal,
    Reverse,
    ReverseWithLimits,
    SingleMaximum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSpec {
    pub kind: TerminalKind,
    pub reheat_coil: Option<EquipId>,
    pub fan: Option<EquipId>,
    pub min_flow_fraction: f64,
    pub damper_action: Option<DamperHeatingAction>,
    pub max_reheat_air_c: Option<f64>,
}

impl TerminalSpec {
    pub fn new(kind: TerminalKind) -> Self {
        Self {
            kind,
            reheat_coil: None,
            fan: None,
            min_flow_fraction: kind.default_min_flow_fraction(),
            damper_action: None,
            max_reheat_air_c: None,
        }
    }

    pub fn with_reheat_coil(mut self, coil: EquipId) -> Self {
        self.reheat_coil = Some(coil);
        self
    }

    pub fn with_fan(mut self, fan: EquipId) -> Self {
        self.fan = Some(fan);
        self
    }

    pub fn with_min_flow_fraction(mut self, fraction: f64) -> Self {
        self.min_flow_fraction = fraction;
        self
    }

    pub fn with_damper_action(mut self, action: DamperHeatingAction) -> Self {
        self.damper_action = Some(action);
        self
    }

    pub fn with_max_reheat_air(mut self, c: f64) -> Self {
        self.max_reheat_air_c = Some(c);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub id: TerminalId,
    pub name: String,
    pub kind: TerminalKind,
    pub air_loop: AirLoopId,
    pub zone: ZoneId,
    pub reheat_coil: Option<EquipId>,
    pub fan: Option<EquipId>,
    pub min_flow_fraction: f64,
    pub damper_action: Option<DamperHeatingAction>,
    pub max_reheat_air_c: Option<f64>,
    /// Component from the air loop demand inlet to the zone air node.
    pub comp: CompId,
}
