//! Fan factory, parameterized by the system a fan serves.

use hs_core::inh2o;
use hs_model::{EquipmentKind, FanKind, FanSpec, Model};
use serde::{Deserialize, Serialize};
use uom::si::pressure::pascal;

use crate::common::{check_efficiency, check_finite};
use crate::curves::{SINGLE_ZONE_FAN_PART_LOAD, VAV_FAN_PART_LOAD};
use crate::error::ComponentResult;
use crate::traits::EquipmentFactory;
use crate::vintage::Vintage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanArchetype {
    VavSupply,
    ConstantVolumeSupply,
    PackagedSingleZone,
    DedicatedOutdoorAir,
    FanCoil,
    PackagedTerminal,
    UnitHeater,
    Residential,
    EnergyRecoveryVentilator,
    FanPoweredBox,
    EvaporativeCooler,
}

impl FanArchetype {
    pub fn default_kind(self) -> FanKind {
        match self {
            FanArchetype::VavSupply | FanArchetype::DedicatedOutdoorAir => FanKind::VariableVolume,
            FanArchetype::ConstantVolumeSupply
            | FanArchetype::FanPoweredBox
            | FanArchetype::EvaporativeCooler => FanKind::ConstantVolume,
            FanArchetype::PackagedSingleZone
            | FanArchetype::FanCoil
            | FanArchetype::PackagedTerminal
            | FanArchetype::UnitHeater
            | FanArchetype::Residential
            | FanArchetype::EnergyRecoveryVentilator => FanKind::OnOff,
        }
    }

    pub fn pressure_rise_inh2o(self) -> f64 {
        match self {
            FanArchetype::VavSupply | FanArchetype::DedicatedOutdoorAir => 4.0,
            FanArchetype::ConstantVolumeSupply | FanArchetype::PackagedSingleZone => 2.5,
            FanArchetype::FanCoil | FanArchetype::PackagedTerminal => 1.33,
            FanArchetype::EnergyRecoveryVentilator => 1.0,
            FanArchetype::Residential | FanArchetype::EvaporativeCooler => 0.5,
            FanArchetype::FanPoweredBox => 0.3,
            FanArchetype::UnitHeater => 0.2,
        }
    }

    pub fn fan_efficiency(self) -> f64 {
        match self {
            FanArchetype::VavSupply
            | FanArchetype::DedicatedOutdoorAir
            | FanArchetype::ConstantVolumeSupply
            | FanArchetype::PackagedSingleZone => 0.6,
            _ => 0.52,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FanParams {
    pub archetype: FanArchetype,
    pub kind: FanKind,
    pub vintage: Vintage,
}

impl FanParams {
    pub fn new(archetype: FanArchetype, vintage: Vintage) -> Self {
        Self {
            archetype,
            kind: archetype.default_kind(),
            vintage,
        }
    }

    pub fn with_kind(mut self, kind: FanKind) -> Self {
        self.kind = kind;
        self
    }
}

impl EquipmentFactory for FanParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let pressure_rise = inh2o(self.archetype.pressure_rise_inh2o());
        let pressure_rise_pa = check_finite(pressure_rise.get::<pascal>(), "fan pressure rise")?;
        let motor_efficiency = check_efficiency(self.vintage.fan_motor_efficiency(), "fan motor efficiency")?;
        let part_load_coefficients = match (self.kind, self.archetype) {
            (FanKind::VariableVolume, FanArchetype::VavSupply) => Some(VAV_FAN_PART_LOAD),
            (FanKind::VariableVolume, _) => Some(SINGLE_ZONE_FAN_PART_LOAD),
            _ => None,
        };
        Ok(EquipmentKind::Fan(FanSpec {
            kind: self.kind,
            pressure_rise_pa,
            fan_efficiency: self.archetype.fan_efficiency(),
            motor_efficiency,
            motor_in_airstream_fraction: 1.0,
            part_load_coefficients,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vav_fan_is_variable_volume_with_reset_curve() {
        let model = Model::new();
        let EquipmentKind::Fan(spec) = FanParams::new(FanArchetype::VavSupply, Vintage::Ashrae2019)
            .kind(&model)
            .unwrap()
        else {
            panic!("expected a fan");
        };
        assert_eq!(spec.kind, FanKind::VariableVolume);
        assert_eq!(spec.part_load_coefficients, Some(VAV_FAN_PART_LOAD));
        assert!((spec.pressure_rise_pa - 996.3556).abs() < 1e-3);
        assert!((spec.total_efficiency() - 0.6 * 0.936).abs() < 1e-12);
    }

    #[test]
    fn fan_coil_can_be_made_variable() {
        let model = Model::new();
        let params = FanParams::new(FanArchetype::FanCoil, Vintage::DoeRefPre1980)
            .with_kind(FanKind::VariableVolume);
        let EquipmentKind::Fan(spec) = params.kind(&model).unwrap() else {
            panic!("expected a fan");
        };
        assert_eq!(spec.part_load_coefficients, Some(SINGLE_ZONE_FAN_PART_LOAD));
        assert_eq!(spec.motor_efficiency, 0.85);
    }
}
