//! Zone-level forced-air and radiant units.

use std::fmt;
use std::str::FromStr;

use hs_core::{EquipId, HsError, ScheduleId, ZoneHvacId, ZoneId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneHvacKind {
    PackagedTerminalAirConditioner,
    PackagedTerminalHeatPump,
    FourPipeFanCoil,
    WaterToAirHeatPump,
    BaseboardElectric,
    BaseboardWater,
    UnitHeater,
    WindowAirConditioner,
    EnergyRecoveryVentilator,
}

impl ZoneHvacKind {
    pub fn class(self) -> &'static str {
        match self {
            ZoneHvacKind::PackagedTerminalAirConditioner => "ZoneHVAC:PackagedTerminalAirConditioner",
            ZoneHvacKind::PackagedTerminalHeatPump => "ZoneHVAC:PackagedTerminalHeatPump",
            ZoneHvacKind::FourPipeFanCoil => "ZoneHVAC:FourPipeFanCoil",
            ZoneHvacKind::WaterToAirHeatPump => "ZoneHVAC:WaterToAirHeatPump",
            ZoneHvacKind::BaseboardElectric => "ZoneHVAC:Baseboard:Convective:Electric",
            ZoneHvacKind::BaseboardWater => "ZoneHVAC:Baseboard:Convective:Water",
            ZoneHvacKind::UnitHeater => "ZoneHVAC:UnitHeater",
            ZoneHvacKind::WindowAirConditioner => "ZoneHVAC:WindowAirConditioner",
            ZoneHvacKind::EnergyRecoveryVentilator => "ZoneHVAC:EnergyRecoveryVentilator",
        }
    }
}

/// Capacity control method of a four-pipe fan coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FanCoilCapacityControl {
    ConstantFanVariableFlow,
    #[default]
    CyclingFan,
    VariableFanVariableFlow,
    VariableFanConstantFlow,
}

impl FanCoilCapacityControl {
    pub const ALL: [FanCoilCapacityControl; 4] = [
        FanCoilCapacityControl::ConstantFanVariableFlow,
        FanCoilCapacityControl::CyclingFan,
        FanCoilCapacityControl::VariableFanVariableFlow,
        FanCoilCapacityControl::VariableFanConstantFlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FanCoilCapacityControl::ConstantFanVariableFlow => "ConstantFanVariableFlow",
            FanCoilCapacityControl::CyclingFan => "CyclingFan",
            FanCoilCapacityControl::VariableFanVariableFlow => "VariableFanVariableFlow",
            FanCoilCapacityControl::VariableFanConstantFlow => "VariableFanConstantFlow",
        }
    }

    /// Whether the unit's fan modulates, which calls for a variable-volume fan.
    pub fn has_variable_fan(self) -> bool {
        matches!(
            self,
            FanCoilCapacityControl::VariableFanVariableFlow
                | FanCoilCapacityControl::VariableFanConstantFlow
        )
    }
}

impl fmt::Display for FanCoilCapacityControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanCoilCapacityControl {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FanCoilCapacityControl::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HsError::unknown_tag("fan coil capacity control", s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneHvacSpec {
    pub kind: ZoneHvacKind,
    pub fan: Option<EquipId>,
    pub heating_coil: Option<EquipId>,
    pub cooling_coil: Option<EquipId>,
    pub supplemental_heating_coil: Option<EquipId>,
    pub heat_recovery: Option<EquipId>,
    pub capacity_control: Option<FanCoilCapacityControl>,
    /// Whether the unit brings in outdoor air for ventilation.
    pub outdoor_air: bool,
    pub availability: Option<ScheduleId>,
}

impl ZoneHvacSpec {
    pub fn new(kind: ZoneHvacKind) -> Self {
        Self {
            kind,
            fan: None,
            heating_coil: None,
            cooling_coil: None,
            supplemental_heating_coil: None,
            heat_recovery: None,
            capacity_control: None,
            outdoor_air: false,
            availability: None,
        }
    }

    pub fn with_fan(mut self, fan: EquipId) -> Self {
        self.fan = Some(fan);
        self
    }

    pub fn with_heating_coil(mut self, coil: EquipId) -> Self {
        self.heating_coil = Some(coil);
        self
    }

    pub fn with_cooling_coil(mut self, coil: EquipId) -> Self {
        self.cooling_coil = Some(coil);
        self
    }

    pub fn with_supplemental_heating_coil(mut self, coil: EquipId) -> Self {
        self.supplemental_heating_coil = Some(coil);
        self
    }

    pub fn with_heat_recovery(mut self, hx: EquipId) -> Self {
        self.heat_recovery = Some(hx);
        self
    }

    pub fn with_capacity_control(mut self, control: FanCoilCapacityControl) -> Self {
        self.capacity_control = Some(control);
        self
    }

    pub fn with_outdoor_air(mut self, enabled: bool) -> Self {
        self.outdoor_air = enabled;
        self
    }

    pub fn with_availability(mut self, schedule: ScheduleId) -> Self {
        self.availability = Some(schedule);
        self
    }

    /// Subcomponents in a fixed order.
    pub(crate) fn components(&self) -> impl Iterator<Item = EquipId> {
        [
            self.fan,
            self.heating_coil,
            self.cooling_coil,
            self.supplemental_heating_coil,
            self.heat_recovery,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneHvac {
    pub id: ZoneHvacId,
    pub name: String,
    pub zone: ZoneId,
    pub kind: ZoneHvacKind,
    pub fan: Option<EquipId>,
    pub heating_coil: Option<EquipId>,
    pub cooling_coil: Option<EquipId>,
    pub supplemental_heating_coil: Option<EquipId>,
    pub heat_recovery: Option<EquipId>,
    pub capacity_control: Option<FanCoilCapacityControl>,
    pub outdoor_air: bool,
    pub availability: Option<ScheduleId>,
}
