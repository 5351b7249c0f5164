//! Pump factory.
//!
//! Heads are specified in inches of water column, the unit prototype-building
//! tables use, and stored on the pump in pascals.

use hs_core::inh2o;
use hs_model::{EquipmentKind, Model, PumpControl, PumpSpec, PumpSpeed};
use uom::si::pressure::pascal;

use crate::common::{check_efficiency, check_finite};
use crate::curves::VARIABLE_SPEED_PUMP_PART_LOAD;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::EquipmentFactory;

#[derive(Debug, Clone, PartialEq)]
pub struct PumpParams {
    pub speed: PumpSpeed,
    pub head_inh2o: f64,
    pub motor_efficiency: f64,
    pub control: PumpControl,
}

impl PumpParams {
    pub fn constant(head_inh2o: f64) -> Self {
        Self {
            speed: PumpSpeed::Constant,
            head_inh2o,
            motor_efficiency: 0.9,
            control: PumpControl::Intermittent,
        }
    }

    pub fn variable(head_inh2o: f64) -> Self {
        Self {
            speed: PumpSpeed::Variable,
            ..Self::constant(head_inh2o)
        }
    }

    pub fn continuous(mut self) -> Self {
        self.control = PumpControl::Continuous;
        self
    }
}

impl EquipmentFactory for PumpParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let head = check_finite(self.head_inh2o, "pump head")?;
        if head < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "pump head must be non-negative",
            });
        }
        let motor_efficiency = check_efficiency(self.motor_efficiency, "pump motor efficiency")?;
        Ok(EquipmentKind::Pump(PumpSpec {
            speed: self.speed,
            rated_head_pa: inh2o(head).get::<pascal>(),
            motor_efficiency,
            control: self.control,
            part_load_coefficients: match self.speed {
                PumpSpeed::Variable => Some(VARIABLE_SPEED_PUMP_PART_LOAD),
                PumpSpeed::Constant => None,
            },
        }))
    }
}
