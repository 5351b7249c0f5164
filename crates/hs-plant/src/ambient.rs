//! Ambient loop: district heating and district cooling in series, holding
//! the loop between two limits for water-to-water and water-to-air heat
//! pumps.

use hs_components::{DistrictParams, EquipmentFactory, PumpParams};
use hs_core::{HsResult, LoopId, delta_r_to_k, f_to_c};
use hs_model::{LoopRole, LoopType, Model, PlantSizing};
use tracing::info;

use crate::common::{add_closure_pipes, add_dual_setpoint, add_supply_pump};

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLoopConfig {
    pub low_f: f64,
    pub high_f: f64,
    pub pump_head_inh2o: f64,
}

impl Default for AmbientLoopConfig {
    fn default() -> Self {
        Self {
            low_f: 65.0,
            high_f: 75.0,
            pump_head_inh2o: 720.0,
        }
    }
}

pub fn add_ambient_loop(model: &mut Model, name: &str, config: &AmbientLoopConfig) -> HsResult<LoopId> {
    let (low_c, high_c) = (f_to_c(config.low_f), f_to_c(config.high_f));
    let sizing = PlantSizing::new(LoopType::Heating, high_c, delta_r_to_k(10.0));
    let id = model.add_plant_loop(name, LoopRole::Ambient, sizing);
    let loop_name = model.plant_loop(id)?.name.clone();

    add_supply_pump(model, id, &PumpParams::variable(config.pump_head_inh2o), "Pump")?;
    let heating = DistrictParams::heating().add(model, &format!("{loop_name} District Heating"))?;
    let cooling = DistrictParams::cooling().add(model, &format!("{loop_name} District Cooling"))?;
    model.add_supply_branch(id, &[heating, cooling])?;
    add_closure_pipes(model, id)?;
    add_dual_setpoint(model, id, LoopRole::Ambient.canonical_name(), low_c, high_c)?;

    info!(plant_loop = %loop_name, "built ambient loop");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::SchemaVersion;

    #[test]
    fn district_objects_share_one_branch() {
        let mut model = Model::with_schema_version(SchemaVersion::new(3, 6, 0));
        let id = add_ambient_loop(&mut model, "Ambient Loop", &AmbientLoopConfig::default()).unwrap();
        let branch = &model.plant_loop(id).unwrap().supply.branches[0];
        let classes: Vec<_> = branch
            .equipment()
            .map(|e| model.equipment(e).unwrap().class())
            .collect();
        assert_eq!(classes, vec!["DistrictHeating", "DistrictCooling"]);
    }
}
