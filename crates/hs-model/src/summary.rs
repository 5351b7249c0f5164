//! Serializable overview of a synthesized model.

use std::collections::BTreeMap;

use hs_core::EquipId;
use serde::Serialize;

use crate::model::Model;
use crate::plant_loop::LoopRole;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantLoopSummary {
    pub name: String,
    pub role: LoopRole,
    pub design_exit_temp_c: f64,
    pub design_delta_t_k: f64,
    pub supply: Vec<String>,
    pub demand: Vec<String>,
    pub setpoint_managers: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalSummary {
    pub name: String,
    pub zone: String,
    pub class: &'static str,
    pub reheat_coil: Option<String>,
    pub min_flow_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirLoopSummary {
    pub name: String,
    /// Supply path components in flow order.
    pub supply: Vec<String>,
    pub economizer: Option<String>,
    pub demand_controlled_ventilation: bool,
    pub heat_recovery: Option<String>,
    pub setpoint_managers: Vec<String>,
    pub terminals: Vec<TerminalSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneHvacSummary {
    pub name: String,
    pub zone: String,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub schema_version: String,
    pub zones: usize,
    pub plant_loops: Vec<PlantLoopSummary>,
    pub air_loops: Vec<AirLoopSummary>,
    pub zone_hvac: Vec<ZoneHvacSummary>,
    pub equipment_by_class: BTreeMap<&'static str, usize>,
    pub control_programs: usize,
}

impl Model {
    fn names_of(&self, ids: impl Iterator<Item = EquipId>) -> Vec<String> {
        ids.filter_map(|id| self.equipment(id).ok().map(|e| e.name.clone()))
            .collect()
    }

    fn spm_names(&self, ids: &[hs_core::SpmId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.setpoint_manager(id).ok().map(|s| s.name.clone()))
            .collect()
    }

    fn zone_name(&self, id: hs_core::ZoneId) -> String {
        self.zone(id).map(|z| z.name.clone()).unwrap_or_default()
    }

    pub fn summary(&self) -> ModelSummary {
        let plant_loops = self
            .plant_loops()
            .iter()
            .map(|l| PlantLoopSummary {
                name: l.name.clone(),
                role: l.role,
                design_exit_temp_c: l.sizing.design_exit_temp_c,
                design_delta_t_k: l.sizing.design_delta_t_k,
                supply: self.names_of(l.supply_equipment()),
                demand: self.names_of(l.demand_equipment()),
                setpoint_managers: self.spm_names(&l.setpoint_managers),
                properties: l.properties.clone(),
            })
            .collect();

        let air_loops = self
            .air_loops()
            .iter()
            .map(|a| {
                let controller = a.controller();
                AirLoopSummary {
                    name: a.name.clone(),
                    supply: self.names_of(a.supply.equipment()),
                    economizer: controller.map(|c| c.economizer.to_string()),
                    demand_controlled_ventilation: controller
                        .is_some_and(|c| c.demand_controlled_ventilation),
                    heat_recovery: self.names_of(a.heat_recovery().into_iter()).pop(),
                    setpoint_managers: self.spm_names(&a.setpoint_managers),
                    terminals: a
                        .terminals
                        .iter()
                        .filter_map(|&t| self.terminal(t).ok())
                        .map(|t| TerminalSummary {
                            name: t.name.clone(),
                            zone: self.zone_name(t.zone),
                            class: t.kind.class(),
                            reheat_coil: self.names_of(t.reheat_coil.into_iter()).pop(),
                            min_flow_fraction: t.min_flow_fraction,
                        })
                        .collect(),
                }
            })
            .collect();

        let zone_hvac = self
            .zone_hvac_units()
            .iter()
            .map(|u| ZoneHvacSummary {
                name: u.name.clone(),
                zone: self.zone_name(u.zone),
                class: u.kind.class(),
            })
            .collect();

        let mut equipment_by_class = BTreeMap::new();
        for e in self.all_equipment() {
            *equipment_by_class.entry(e.class()).or_insert(0) += 1;
        }

        ModelSummary {
            schema_version: self.schema_version().to_string(),
            zones: self.zones().len(),
            plant_loops,
            air_loops,
            zone_hvac,
            equipment_by_class,
            control_programs: self.programs().len(),
        }
    }
}
