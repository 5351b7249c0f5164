//! Chilled-water loop builder: pumping archetypes and waterside economizer.

use std::fmt;
use std::str::FromStr;

use hs_components::{
    ChillerParams, DistrictParams, EquipmentFactory, FluidHeatExchangerParams, PumpParams, Vintage,
};
use hs_core::{EquipId, HsError, HsResult, LoopId, delta_r_to_k, f_to_c};
use hs_model::{
    Attachment, CommonPipe, CondenserType, HeatExchangerControl, LoopRole, LoopType, Model,
    PlantSizing, SpmOwner,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::common::{add_closure_pipes, add_scheduled_setpoint, add_supply_pump, loop_name};
use crate::sources::CoolingSource;

/// Name of the chiller-side loop of a heat-exchanger-decoupled plant.
pub const PRIMARY_LOOP_SUFFIX: &str = "Primary";

/// Cooling medium of the chillers on a chilled-water loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChilledWaterCooling {
    AirCooled,
    #[default]
    WaterCooled,
}

impl ChilledWaterCooling {
    pub fn condenser(self) -> CondenserType {
        match self {
            ChilledWaterCooling::AirCooled => CondenserType::AirCooled,
            ChilledWaterCooling::WaterCooled => CondenserType::WaterCooled,
        }
    }
}

impl fmt::Display for ChilledWaterCooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChilledWaterCooling::AirCooled => "AirCooled",
            ChilledWaterCooling::WaterCooled => "WaterCooled",
        })
    }
}

impl FromStr for ChilledWaterCooling {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AirCooled" => Ok(ChilledWaterCooling::AirCooled),
            "WaterCooled" => Ok(ChilledWaterCooling::WaterCooled),
            _ => Err(HsError::unknown_tag("chilled water loop cooling type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChilledWaterPumping {
    /// One constant-speed pump serving chillers and coils.
    #[default]
    ConstantPrimary,
    /// Constant-speed primary and variable-speed secondary pumps on one loop,
    /// decoupled by a common pipe.
    ConstantPrimaryVariableSecondaryCommonPipe,
    /// Separate primary (chiller) and secondary (coil) loops coupled by a
    /// heat exchanger.
    ConstantPrimaryVariableSecondaryHeatExchanger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatersideEconomizer {
    /// In series upstream of the chillers.
    Integrated,
    /// On its own branch, interlocked with one chiller.
    NonIntegrated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChilledWaterLoopConfig {
    pub source: CoolingSource,
    pub pumping: ChilledWaterPumping,
    /// Condenser loop for water-cooled chillers and the waterside economizer.
    pub condenser_loop: Option<LoopId>,
    pub waterside_economizer: Option<WatersideEconomizer>,
    /// Give each chiller its own constant-speed pump on its branch instead of
    /// a header pump.
    pub dedicated_chiller_pumps: bool,
    pub supply_f: f64,
    pub delta_f: f64,
    pub constant_primary_head_inh2o: f64,
    pub primary_head_inh2o: f64,
    pub secondary_head_inh2o: f64,
    pub vintage: Vintage,
}

impl Default for ChilledWaterLoopConfig {
    fn default() -> Self {
        Self {
            source: CoolingSource::default(),
            pumping: ChilledWaterPumping::default(),
            condenser_loop: None,
            waterside_economizer: None,
            dedicated_chiller_pumps: false,
            supply_f: 44.0,
            delta_f: 10.1,
            constant_primary_head_inh2o: 720.0,
            primary_head_inh2o: 180.0,
            secondary_head_inh2o: 540.0,
            vintage: Vintage::default(),
        }
    }
}

/// Chilled-water plant handles returned by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ChilledWaterPlant {
    /// Loop the cooling coils connect to.
    pub coil_loop: LoopId,
    /// Chiller-side loop when decoupled by a heat exchanger.
    pub primary_loop: Option<LoopId>,
    pub chillers: Vec<EquipId>,
    pub economizer: Option<EquipId>,
}

fn plant_sizing(config: &ChilledWaterLoopConfig) -> PlantSizing {
    PlantSizing::new(LoopType::Cooling, f_to_c(config.supply_f), delta_r_to_k(config.delta_f))
}

/// Chillers (or the district object) on supply branches, each optionally
/// preceded by its own pump.
fn add_cooling_sources(
    model: &mut Model,
    id: LoopId,
    config: &ChilledWaterLoopConfig,
) -> HsResult<Vec<EquipId>> {
    let name = loop_name(model, id)?;
    let supply_c = f_to_c(config.supply_f);
    match config.source {
        CoolingSource::District => {
            let district = DistrictParams::cooling().add(model, &format!("{name} District Cooling"))?;
            model.add_supply_branch(id, &[district])?;
            Ok(vec![district])
        }
        CoolingSource::Chillers { condenser, count } => {
            let mut chillers = Vec::with_capacity(count as usize);
            for i in 0..count.max(1) {
                let mut params = ChillerParams::new(condenser, config.vintage, supply_c);
                if let (CondenserType::WaterCooled, Some(cw)) = (condenser, config.condenser_loop) {
                    params = params.with_condenser_loop(cw);
                }
                let chiller_name = if count > 1 {
                    format!("{name} Chiller {}", i + 1)
                } else {
                    format!("{name} Chiller")
                };
                let chiller = params.add(model, &chiller_name)?;
                if config.dedicated_chiller_pumps {
                    let pump = PumpParams::constant(config.constant_primary_head_inh2o)
                        .add(model, &format!("{chiller_name} Pump"))?;
                    model.add_supply_branch(id, &[pump, chiller])?;
                } else {
                    model.add_supply_branch(id, &[chiller])?;
                }
                chillers.push(chiller);
            }
            Ok(chillers)
        }
    }
}

fn header_pump_head(config: &ChilledWaterLoopConfig) -> f64 {
    match config.pumping {
        ChilledWaterPumping::ConstantPrimary => config.constant_primary_head_inh2o,
        _ => config.primary_head_inh2o,
    }
}

/// Build the chilled-water plant. Returns `None` when water-cooled chillers
/// are requested without a condenser loop.
pub fn add_chilled_water_loop(
    model: &mut Model,
    name: &str,
    config: &ChilledWaterLoopConfig,
) -> HsResult<Option<ChilledWaterPlant>> {
    if config.source.needs_condenser_loop() && config.condenser_loop.is_none() {
        warn!(plant_loop = name, "water-cooled chillers need a condenser water loop; skipping");
        return Ok(None);
    }
    let canonical = LoopRole::ChilledWater.canonical_name();
    let supply_c = f_to_c(config.supply_f);

    let mut plant = match config.pumping {
        ChilledWaterPumping::ConstantPrimary | ChilledWaterPumping::ConstantPrimaryVariableSecondaryCommonPipe => {
            let id = model.add_plant_loop(name, LoopRole::ChilledWater, plant_sizing(config));
            if !config.dedicated_chiller_pumps {
                let label = match config.pumping {
                    ChilledWaterPumping::ConstantPrimary => "Pump",
                    _ => "Primary Pump",
                };
                add_supply_pump(model, id, &PumpParams::constant(header_pump_head(config)), label)?;
            }
            let chillers = add_cooling_sources(model, id, config)?;
            if config.pumping == ChilledWaterPumping::ConstantPrimaryVariableSecondaryCommonPipe {
                let loop_name = loop_name(model, id)?;
                let secondary = PumpParams::variable(config.secondary_head_inh2o)
                    .add(model, &format!("{loop_name} Secondary Pump"))?;
                model.add_demand_inlet_equipment(id, secondary)?;
                model.plant_loop_mut(id)?.common_pipe = CommonPipe::CommonPipe;
            }
            add_closure_pipes(model, id)?;
            add_scheduled_setpoint(model, id, canonical, supply_c)?;
            ChilledWaterPlant {
                coil_loop: id,
                primary_loop: None,
                chillers,
                economizer: None,
            }
        }
        ChilledWaterPumping::ConstantPrimaryVariableSecondaryHeatExchanger => {
            add_decoupled_plant(model, name, config)?
        }
    };

    if let Some(kind) = config.waterside_economizer {
        plant.economizer = add_waterside_economizer(model, &plant, config, kind)?;
    }
    let coil_loop_name = loop_name(model, plant.coil_loop)?;
    info!(
        plant_loop = %coil_loop_name,
        chillers = plant.chillers.len(),
        pumping = ?config.pumping,
        "built chilled water loop"
    );
    Ok(Some(plant))
}

/// Primary loop with the chillers, secondary loop with the coils, and a
/// heat exchanger between them.
fn add_decoupled_plant(
    model: &mut Model,
    name: &str,
    config: &ChilledWaterLoopConfig,
) -> HsResult<ChilledWaterPlant> {
    let canonical = LoopRole::ChilledWater.canonical_name();
    let supply_c = f_to_c(config.supply_f);

    let primary = model.add_plant_loop(
        &format!("{name} {PRIMARY_LOOP_SUFFIX}"),
        LoopRole::ChilledWater,
        plant_sizing(config),
    );
    if !config.dedicated_chiller_pumps {
        add_supply_pump(model, primary, &PumpParams::constant(config.primary_head_inh2o), "Pump")?;
    }
    let chillers = add_cooling_sources(model, primary, config)?;

    let secondary = model.add_plant_loop(name, LoopRole::ChilledWater, plant_sizing(config));
    add_supply_pump(model, secondary, &PumpParams::variable(config.secondary_head_inh2o), "Pump")?;

    let secondary_name = loop_name(model, secondary)?;
    let primary_name = loop_name(model, primary)?;
    let hx = FluidHeatExchangerParams::new(HeatExchangerControl::UncontrolledOn)
        .on_demand_of(primary)
        .add(model, &format!("{secondary_name} Heat Exchanger"))?;
    model.add_supply_branch(secondary, &[hx])?;

    add_closure_pipes(model, primary)?;
    add_closure_pipes(model, secondary)?;
    add_scheduled_setpoint(model, primary, canonical, supply_c)?;
    add_scheduled_setpoint(model, secondary, canonical, supply_c)?;

    {
        let p = model.plant_loop_mut(primary)?;
        p.set_property("is_primary_loop", "true");
        p.set_property("secondary_loop_name", secondary_name.clone());
    }
    {
        let s = model.plant_loop_mut(secondary)?;
        s.set_property("is_secondary_loop", "true");
        s.set_property("primary_loop_name", primary_name.clone());
    }
    debug!(primary = %primary_name, secondary = %secondary_name, "coupled chilled water loops");

    Ok(ChilledWaterPlant {
        coil_loop: secondary,
        primary_loop: Some(primary),
        chillers,
        economizer: None,
    })
}

fn add_waterside_economizer(
    model: &mut Model,
    plant: &ChilledWaterPlant,
    config: &ChilledWaterLoopConfig,
    kind: WatersideEconomizer,
) -> HsResult<Option<EquipId>> {
    let Some(cw) = config.condenser_loop else {
        warn!("waterside economizer needs a condenser water loop; skipping");
        return Ok(None);
    };
    let chw = plant.primary_loop.unwrap_or(plant.coil_loop);
    let chw_name = loop_name(model, chw)?;
    let hx_name = format!("{chw_name} Waterside Economizer");

    let hx = match kind {
        WatersideEconomizer::Integrated => {
            let hx = FluidHeatExchangerParams::new(HeatExchangerControl::CoolingSetpointModulated)
                .on_demand_of(cw)
                .add(model, &hx_name)?;
            model.add_supply_inlet_equipment(chw, hx)?;

            // The operation scheme only runs the chillers and the exchanger
            // together when every branch carries the loop setpoint.
            let plant_loop = model.plant_loop(chw)?;
            let template = plant_loop
                .setpoint_managers
                .first()
                .map(|&spm| model.setpoint_manager(spm).cloned())
                .transpose()?
                .ok_or_else(|| HsError::not_found("SetpointManager", chw_name.clone()))?;
            let outlets: Vec<_> = plant_loop.supply.branch_outlet_nodes().collect();
            for (i, node) in outlets.into_iter().enumerate() {
                let spm = template.clone_to(format!("{chw_name} Branch {} Setpoint Manager", i + 1), node);
                model.add_setpoint_manager(SpmOwner::PlantLoop(chw), spm)?;
            }
            hx
        }
        WatersideEconomizer::NonIntegrated => {
            let Some(&chiller) = plant.chillers.first() else {
                warn!(plant_loop = %chw_name, "no chiller to interlock the economizer with; skipping");
                return Ok(None);
            };
            // A pump on the chiller branch moves upstream of the splitter so it
            // can drive either path.
            let supply = &model.plant_loop(chw)?.supply;
            if let Some(branch) = supply.branch_containing(chiller) {
                let branch_pumps: Vec<_> = model
                    .loop_pumps(chw)?
                    .into_iter()
                    .filter(|&p| supply.branches[branch].contains(p))
                    .collect();
                for pump in branch_pumps {
                    model.relocate_to_supply_inlet(chw, pump)?;
                }
            }
            let (chiller_inlet, _) = model.equipment_nodes(chiller, Attachment::PlantSupply(chw))?;
            let condenser_inlet = match model.equipment_nodes(chiller, Attachment::PlantDemand(cw)) {
                Ok((inlet, _)) => inlet,
                Err(_) => model.plant_loop(cw)?.demand.inlet,
            };
            let hx = FluidHeatExchangerParams::new(HeatExchangerControl::CoolingSetpointOnOffWithComponentOverride)
                .with_override(chiller_inlet, condenser_inlet)
                .on_demand_of(cw)
                .add(model, &hx_name)?;
            model.add_supply_branch(chw, &[hx])?;
            hx
        }
    };
    debug!(economizer = %hx_name, kind = ?kind, "added waterside economizer");
    Ok(Some(hx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::EquipmentKind;

    fn condenser_loop(model: &mut Model) -> LoopId {
        model.add_plant_loop(
            "Condenser Water Loop",
            LoopRole::CondenserWater,
            PlantSizing::new(LoopType::Condenser, 29.4, 5.6),
        )
    }

    #[test]
    fn water_cooled_without_condenser_loop_is_skipped() {
        let mut model = Model::new();
        let plant = add_chilled_water_loop(&mut model, "Chilled Water Loop", &ChilledWaterLoopConfig::default()).unwrap();
        assert!(plant.is_none());
        assert!(model.plant_loops().is_empty());
    }

    #[test]
    fn common_pipe_puts_secondary_pump_on_demand() {
        let mut model = Model::new();
        let config = ChilledWaterLoopConfig {
            source: CoolingSource::Chillers {
                condenser: CondenserType::AirCooled,
                count: 2,
            },
            pumping: ChilledWaterPumping::ConstantPrimaryVariableSecondaryCommonPipe,
            ..Default::default()
        };
        let plant = add_chilled_water_loop(&mut model, "Chilled Water Loop", &config).unwrap().unwrap();
        assert_eq!(plant.chillers.len(), 2);
        let lp = model.plant_loop(plant.coil_loop).unwrap();
        assert_eq!(lp.common_pipe, CommonPipe::CommonPipe);
        let demand_inlet: Vec<_> = lp.demand.inlet_series.equipment().collect();
        assert_eq!(demand_inlet.len(), 1);
        assert!(matches!(model.equipment(demand_inlet[0]).unwrap().kind, EquipmentKind::Pump(_)));
    }

    #[test]
    fn heat_exchanger_pumping_splits_primary_and_secondary() {
        let mut model = Model::new();
        let cw = condenser_loop(&mut model);
        let config = ChilledWaterLoopConfig {
            pumping: ChilledWaterPumping::ConstantPrimaryVariableSecondaryHeatExchanger,
            condenser_loop: Some(cw),
            ..Default::default()
        };
        let plant = add_chilled_water_loop(&mut model, "Chilled Water Loop", &config).unwrap().unwrap();
        let primary = model.plant_loop(plant.primary_loop.unwrap()).unwrap();
        let secondary = model.plant_loop(plant.coil_loop).unwrap();
        assert_eq!(primary.name, "Chilled Water Loop Primary");
        assert_eq!(secondary.name, "Chilled Water Loop");
        assert_eq!(primary.property("is_primary_loop"), Some("true"));
        assert_eq!(primary.property("secondary_loop_name"), Some("Chilled Water Loop"));
        assert_eq!(secondary.property("primary_loop_name"), Some("Chilled Water Loop Primary"));
        assert_eq!(model.equipment(plant.chillers[0]).unwrap().demand_loop(), Some(cw));
        model.topology().unwrap();
    }

    #[test]
    fn integrated_economizer_clones_setpoints_to_branches() {
        let mut model = Model::new();
        let cw = condenser_loop(&mut model);
        let config = ChilledWaterLoopConfig {
            condenser_loop: Some(cw),
            waterside_economizer: Some(WatersideEconomizer::Integrated),
            ..Default::default()
        };
        let plant = add_chilled_water_loop(&mut model, "Chilled Water Loop", &config).unwrap().unwrap();
        let hx = plant.economizer.unwrap();
        let lp = model.plant_loop(plant.coil_loop).unwrap();
        let inlet: Vec<_> = lp.supply.inlet_series.equipment().collect();
        assert_eq!(inlet.last(), Some(&hx));
        // one loop setpoint plus one per supply branch (chiller and bypass)
        assert_eq!(lp.setpoint_managers.len(), 1 + lp.supply.branches.len());
        for node in lp.supply.branch_outlet_nodes() {
            assert_eq!(model.setpoint_managers_on(node).count(), 1);
        }
    }

    #[test]
    fn non_integrated_economizer_relocates_the_chiller_pump() {
        let mut model = Model::new();
        let cw = condenser_loop(&mut model);
        let config = ChilledWaterLoopConfig {
            condenser_loop: Some(cw),
            waterside_economizer: Some(WatersideEconomizer::NonIntegrated),
            dedicated_chiller_pumps: true,
            ..Default::default()
        };
        let plant = add_chilled_water_loop(&mut model, "Chilled Water Loop", &config).unwrap().unwrap();
        let lp = model.plant_loop(plant.coil_loop).unwrap();
        let pumps = model.loop_pumps(plant.coil_loop).unwrap();
        assert_eq!(pumps.len(), 1);
        assert!(lp.supply.inlet_series.contains(pumps[0]));

        let hx = plant.economizer.unwrap();
        assert!(lp.supply.branch_containing(hx).is_some());
        let EquipmentKind::FluidHeatExchanger(spec) = &model.equipment(hx).unwrap().kind else {
            panic!("expected a heat exchanger");
        };
        let chiller_inlet = model
            .equipment_nodes(plant.chillers[0], Attachment::PlantSupply(plant.coil_loop))
            .unwrap()
            .0;
        assert_eq!(spec.component_override.unwrap().supply_inlet, chiller_inlet);
        assert_eq!(model.equipment(hx).unwrap().demand_loop(), Some(cw));
    }
}
