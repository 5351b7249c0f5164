//! Air-to-air sensible and latent heat-recovery exchanger.

use hs_model::{EquipmentKind, HeatRecoverySpec, HeatRecoveryType, Model};

use crate::common::check_fraction;
use crate::error::ComponentResult;
use crate::traits::EquipmentFactory;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatRecoveryParams {
    pub sensible_effectiveness: f64,
    pub latent_effectiveness: f64,
    pub exchanger_type: HeatRecoveryType,
    pub economizer_lockout: bool,
}

impl Default for HeatRecoveryParams {
    fn default() -> Self {
        Self {
            sensible_effectiveness: 0.76,
            latent_effectiveness: 0.68,
            exchanger_type: HeatRecoveryType::Rotary,
            economizer_lockout: true,
        }
    }
}

impl HeatRecoveryParams {
    /// Sensible-only plate exchanger.
    pub fn sensible(effectiveness: f64) -> Self {
        Self {
            sensible_effectiveness: effectiveness,
            latent_effectiveness: 0.0,
            exchanger_type: HeatRecoveryType::Plate,
            ..Self::default()
        }
    }

    pub fn with_effectiveness(mut self, sensible: f64, latent: f64) -> Self {
        self.sensible_effectiveness = sensible;
        self.latent_effectiveness = latent;
        self
    }
}

/// Apply effectiveness ratios to an existing exchanger.
pub fn set_effectiveness(spec: &mut HeatRecoverySpec, sensible: f64, latent: f64) -> ComponentResult<()> {
    let sensible = check_fraction(sensible, "sensible effectiveness")?;
    let latent = check_fraction(latent, "latent effectiveness")?;
    spec.set_sensible(sensible);
    spec.set_latent(latent);
    Ok(())
}

impl EquipmentFactory for HeatRecoveryParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let mut spec = HeatRecoverySpec {
            sensible_heating_100: 0.0,
            latent_heating_100: 0.0,
            sensible_heating_75: 0.0,
            latent_heating_75: 0.0,
            sensible_cooling_100: 0.0,
            latent_cooling_100: 0.0,
            sensible_cooling_75: 0.0,
            latent_cooling_75: 0.0,
            exchanger_type: self.exchanger_type,
            economizer_lockout: self.economizer_lockout,
        };
        set_effectiveness(&mut spec, self.sensible_effectiveness, self.latent_effectiveness)?;
        Ok(EquipmentKind::AirHeatRecovery(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_enthalpy_wheel() {
        let model = Model::new();
        let EquipmentKind::AirHeatRecovery(spec) = HeatRecoveryParams::default().kind(&model).unwrap() else {
            panic!("expected heat recovery");
        };
        assert_eq!(spec.sensible_heating_100, 0.76);
        assert_eq!(spec.latent_cooling_75, 0.68);
        assert_eq!(spec.exchanger_type, HeatRecoveryType::Rotary);
    }

    #[test]
    fn effectiveness_outside_unit_interval_is_rejected() {
        let model = Model::new();
        let params = HeatRecoveryParams::default().with_effectiveness(1.3, 0.5);
        assert!(params.kind(&model).is_err());
    }
}
