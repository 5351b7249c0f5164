//! Heating and cooling coil factories.
//!
//! Water coils take their rated water temperatures from the sizing block of
//! the loop they are connected to, so a coil on a low-temperature hot-water
//! loop is rated at 120 °F entering water rather than 180 °F.

use hs_core::{LoopId, delta_r_to_k, f_to_c};
use hs_model::{
    Capacity, CoolingCoilSpec, CoolingSource, EquipmentKind, FuelType, HeatingCoilSpec,
    HeatingSource, Model, WaterCoilDesign,
};

use crate::common::{check_efficiency, check_finite, check_positive};
use crate::design_temps::{DesignTemperature, DesignTemperatureTable};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::EquipmentFactory;

/// Rated water temperatures when a coil is built without a loop.
const DEFAULT_HOT_WATER_SUPPLY_F: f64 = 180.0;
const DEFAULT_HOT_WATER_DELTA_F: f64 = 20.0;
const DEFAULT_CHILLED_WATER_SUPPLY_F: f64 = 44.0;
const DEFAULT_CHILLED_WATER_DELTA_F: f64 = 10.1;
const COOLING_COIL_INLET_AIR_F: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub enum HeatingCoilParams {
    Water {
        plant_loop: Option<LoopId>,
        inlet_air_c: f64,
        outlet_air_c: f64,
    },
    Baseboard {
        plant_loop: Option<LoopId>,
    },
    Fuel {
        fuel: FuelType,
        efficiency: f64,
    },
    Electric,
    DxHeatPump {
        cop: f64,
        min_outdoor_c: f64,
    },
    WaterToAirHeatPump {
        plant_loop: Option<LoopId>,
        cop: f64,
    },
}

impl HeatingCoilParams {
    /// Central-system hot-water coil rated from preheat to heating supply air.
    pub fn water(plant_loop: Option<LoopId>, temps: &DesignTemperatureTable) -> Self {
        HeatingCoilParams::Water {
            plant_loop,
            inlet_air_c: temps.celsius(DesignTemperature::Preheat),
            outlet_air_c: temps.celsius(DesignTemperature::Heating),
        }
    }

    /// Terminal reheat coil rated from cold-deck to zone heating supply air.
    pub fn water_reheat(plant_loop: Option<LoopId>, temps: &DesignTemperatureTable) -> Self {
        HeatingCoilParams::Water {
            plant_loop,
            inlet_air_c: temps.celsius(DesignTemperature::Cooling),
            outlet_air_c: temps.celsius(DesignTemperature::ZoneHeating),
        }
    }

    pub fn gas() -> Self {
        HeatingCoilParams::Fuel {
            fuel: FuelType::NaturalGas,
            efficiency: 0.8,
        }
    }

    pub fn dx_heat_pump() -> Self {
        HeatingCoilParams::DxHeatPump {
            cop: 3.3,
            min_outdoor_c: -12.2,
        }
    }

    pub fn water_to_air(plant_loop: Option<LoopId>) -> Self {
        HeatingCoilParams::WaterToAirHeatPump {
            plant_loop,
            cop: 4.2,
        }
    }
}

fn water_design(
    model: &Model,
    plant_loop: Option<LoopId>,
    heating: bool,
    inlet_air_c: f64,
    outlet_air_c: f64,
) -> ComponentResult<WaterCoilDesign> {
    let (supply_c, delta_k) = match plant_loop {
        Some(id) => {
            let sizing = &model.plant_loop(id)?.sizing;
            (sizing.design_exit_temp_c, sizing.design_delta_t_k)
        }
        None if heating => (
            f_to_c(DEFAULT_HOT_WATER_SUPPLY_F),
            delta_r_to_k(DEFAULT_HOT_WATER_DELTA_F),
        ),
        None => (
            f_to_c(DEFAULT_CHILLED_WATER_SUPPLY_F),
            delta_r_to_k(DEFAULT_CHILLED_WATER_DELTA_F),
        ),
    };
    let outlet_water_c = if heating {
        supply_c - delta_k
    } else {
        supply_c + delta_k
    };
    Ok(WaterCoilDesign {
        inlet_water_c: check_finite(supply_c, "coil inlet water temperature")?,
        outlet_water_c: check_finite(outlet_water_c, "coil outlet water temperature")?,
        inlet_air_c: check_finite(inlet_air_c, "coil inlet air temperature")?,
        outlet_air_c: check_finite(outlet_air_c, "coil outlet air temperature")?,
    })
}

impl EquipmentFactory for HeatingCoilParams {
    fn kind(&self, model: &Model) -> ComponentResult<EquipmentKind> {
        let source = match *self {
            HeatingCoilParams::Water {
                plant_loop,
                inlet_air_c,
                outlet_air_c,
            } => {
                if outlet_air_c <= inlet_air_c {
                    return Err(ComponentError::NonPhysical {
                        what: "heating coil must raise air temperature",
                    });
                }
                HeatingSource::HotWater(water_design(model, plant_loop, true, inlet_air_c, outlet_air_c)?)
            }
            HeatingCoilParams::Baseboard { .. } => HeatingSource::HotWaterBaseboard,
            HeatingCoilParams::Fuel { fuel, efficiency } => {
                if matches!(fuel, FuelType::Electricity | FuelType::DistrictCooling) {
                    return Err(ComponentError::NotSupported {
                        what: "fuel-fired heating coil needs a combustible fuel",
                    });
                }
                HeatingSource::Fuel {
                    fuel,
                    efficiency: check_efficiency(efficiency, "burner efficiency")?,
                }
            }
            HeatingCoilParams::Electric => HeatingSource::Electric { efficiency: 1.0 },
            HeatingCoilParams::DxHeatPump { cop, min_outdoor_c } => HeatingSource::DxHeatPump {
                cop: check_positive(cop, "heat pump COP")?,
                min_outdoor_c: check_finite(min_outdoor_c, "heat pump minimum outdoor temperature")?,
            },
            HeatingCoilParams::WaterToAirHeatPump { cop, .. } => HeatingSource::WaterToAirHeatPump {
                cop: check_positive(cop, "heat pump COP")?,
            },
        };
        Ok(EquipmentKind::HeatingCoil(HeatingCoilSpec {
            source,
            capacity: Capacity::Autosize,
        }))
    }

    fn demand_loop(&self) -> Option<LoopId> {
        match *self {
            HeatingCoilParams::Water { plant_loop, .. }
            | HeatingCoilParams::Baseboard { plant_loop }
            | HeatingCoilParams::WaterToAirHeatPump { plant_loop, .. } => plant_loop,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoolingCoilParams {
    Water {
        plant_loop: Option<LoopId>,
        inlet_air_c: f64,
        outlet_air_c: f64,
    },
    DxSingleSpeed {
        cop: f64,
    },
    DxTwoSpeed {
        high_cop: f64,
        low_cop: f64,
    },
    WaterToAirHeatPump {
        plant_loop: Option<LoopId>,
        cop: f64,
    },
}

impl CoolingCoilParams {
    pub fn water(plant_loop: Option<LoopId>, temps: &DesignTemperatureTable) -> Self {
        CoolingCoilParams::Water {
            plant_loop,
            inlet_air_c: f_to_c(COOLING_COIL_INLET_AIR_F),
            outlet_air_c: temps.celsius(DesignTemperature::Cooling),
        }
    }

    pub fn dx() -> Self {
        CoolingCoilParams::DxSingleSpeed { cop: 3.0 }
    }

    pub fn dx_two_speed() -> Self {
        CoolingCoilParams::DxTwoSpeed {
            high_cop: 3.0,
            low_cop: 3.0,
        }
    }

    pub fn water_to_air(plant_loop: Option<LoopId>) -> Self {
        CoolingCoilParams::WaterToAirHeatPump {
            plant_loop,
            cop: 3.4,
        }
    }
}

impl EquipmentFactory for CoolingCoilParams {
    fn kind(&self, model: &Model) -> ComponentResult<EquipmentKind> {
        let source = match *self {
            CoolingCoilParams::Water {
                plant_loop,
                inlet_air_c,
                outlet_air_c,
            } => {
                if outlet_air_c >= inlet_air_c {
                    return Err(ComponentError::NonPhysical {
                        what: "cooling coil must lower air temperature",
                    });
                }
                CoolingSource::ChilledWater(water_design(model, plant_loop, false, inlet_air_c, outlet_air_c)?)
            }
            CoolingCoilParams::DxSingleSpeed { cop } => CoolingSource::DxSingleSpeed {
                cop: check_positive(cop, "DX cooling COP")?,
            },
            CoolingCoilParams::DxTwoSpeed { high_cop, low_cop } => CoolingSource::DxTwoSpeed {
                high_cop: check_positive(high_cop, "DX cooling COP")?,
                low_cop: check_positive(low_cop, "DX cooling COP")?,
            },
            CoolingCoilParams::WaterToAirHeatPump { cop, .. } => CoolingSource::WaterToAirHeatPump {
                cop: check_positive(cop, "heat pump COP")?,
            },
        };
        Ok(EquipmentKind::CoolingCoil(CoolingCoilSpec {
            source,
            capacity: Capacity::Autosize,
        }))
    }

    fn demand_loop(&self) -> Option<LoopId> {
        match *self {
            CoolingCoilParams::Water { plant_loop, .. }
            | CoolingCoilParams::WaterToAirHeatPump { plant_loop, .. } => plant_loop,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::{LoopRole, LoopType, PlantSizing};

    #[test]
    fn water_coil_follows_loop_sizing() {
        let mut model = Model::new();
        let hw = model.add_plant_loop(
            "Hot Water Loop",
            LoopRole::HotWater,
            PlantSizing::new(LoopType::Heating, f_to_c(120.0), delta_r_to_k(10.0)),
        );
        let temps = DesignTemperatureTable::standard();
        let coil = HeatingCoilParams::water(Some(hw), &temps)
            .add(&mut model, "AHU Heating Coil")
            .unwrap();

        let eq = model.equipment(coil).unwrap();
        let EquipmentKind::HeatingCoil(spec) = &eq.kind else {
            panic!("expected a heating coil");
        };
        let HeatingSource::HotWater(design) = spec.source else {
            panic!("expected a water coil");
        };
        assert!((design.inlet_water_c - f_to_c(120.0)).abs() < 1e-9);
        assert!((design.outlet_water_c - f_to_c(110.0)).abs() < 1e-9);
        assert_eq!(eq.demand_loop(), Some(hw));
        assert_eq!(model.plant_loop(hw).unwrap().demand.branches.len(), 1);
    }

    #[test]
    fn loopless_chilled_water_coil_uses_defaults() {
        let model = Model::new();
        let temps = DesignTemperatureTable::standard();
        let EquipmentKind::CoolingCoil(spec) = CoolingCoilParams::water(None, &temps).kind(&model).unwrap() else {
            panic!("expected a cooling coil");
        };
        let CoolingSource::ChilledWater(design) = spec.source else {
            panic!("expected a water coil");
        };
        assert!((design.inlet_water_c - f_to_c(44.0)).abs() < 1e-9);
        assert!(design.outlet_water_c > design.inlet_water_c);
    }

    #[test]
    fn electric_fuel_coil_is_rejected() {
        let model = Model::new();
        let params = HeatingCoilParams::Fuel {
            fuel: FuelType::Electricity,
            efficiency: 1.0,
        };
        assert!(matches!(params.kind(&model), Err(ComponentError::NotSupported { .. })));
    }
}
