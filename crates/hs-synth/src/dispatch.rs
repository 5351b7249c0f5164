//! System type dispatcher.
//!
//! Resolves a system type plus three fuel tags to plant loops and one air
//! system or zone equipment builder. A combination with no matching
//! equipment is logged and reported as `Ok(false)`; only contract
//! violations (unknown handles) come back as errors.

use hs_air::{
    AirCooling, AirHeating, BaseboardHeating, DoasConfig, DoasSupply, ErvConfig,
    EvaporativeCoolerConfig, FanCoilConfig, PszConfig, PthpConfig, PtacConfig, PvavConfig,
    ResidentialConfig, ResidentialSystem, UnitHeaterConfig, VavConfig, VavTerminal,
    WaterToAirHeatPumpConfig, WindowAcConfig, add_baseboards, add_doas, add_ervs,
    add_evaporative_coolers, add_fan_coils, add_psz, add_ptacs, add_pthps, add_pvav,
    add_residential_systems, add_unit_heaters, add_vav, add_water_to_air_heat_pumps,
    add_window_acs, total_outdoor_air,
};
use hs_core::{HsError, HsResult, LoopId, ZoneId};
use hs_model::{FanKind, LoopRole, Model};
use hs_plant::{
    AmbientLoopConfig, ChilledWaterLoopConfig, CondenserWaterLoopConfig, CoolingSource,
    GroundLoopConfig, HeatPumpLoopConfig, HeatSource, HotWaterLoopConfig,
    get_or_add_ambient_loop, get_or_add_chilled_water_loop, get_or_add_condenser_water_loop,
    get_or_add_ground_loop, get_or_add_heat_pump_loop, get_or_add_hot_water_loop,
};
use tracing::{info, warn};

use crate::fuel::Fuel;
use crate::options::{AirMedium, ArchetypeOptions};
use crate::system_type::SystemType;

/// Why a dispatch stopped early.
enum Stop {
    /// Already logged; the caller gets `Ok(false)`.
    Unsupported,
    Error(HsError),
}

impl From<HsError> for Stop {
    fn from(err: HsError) -> Self {
        Stop::Error(err)
    }
}

type Step<T> = Result<T, Stop>;

/// Build `system_type` for `zones`.
///
/// Returns `Ok(false)` when the system cannot be built from the given fuels
/// (a warning says why) or when a DOAS would serve zones without an
/// outdoor-air requirement. A refused call leaves the model unchanged.
/// Compound types build the ventilation system and the zone-conditioning
/// system with zone ventilation turned off for both.
pub fn synthesize(
    model: &mut Model,
    system_type: &SystemType,
    main_heat_fuel: Option<Fuel>,
    zone_heat_fuel: Option<Fuel>,
    cool_fuel: Option<Fuel>,
    zones: &[ZoneId],
    options: &ArchetypeOptions,
) -> HsResult<bool> {
    if zones.is_empty() {
        warn!(system = %system_type, "no zones to serve, nothing built");
        return Ok(false);
    }
    let mut dispatch = Dispatch {
        model,
        system: system_type,
        zones,
        main_heat: main_heat_fuel,
        zone_heat: zone_heat_fuel,
        cool: cool_fuel,
        options,
    };
    match dispatch.build() {
        Ok(()) => {
            info!(system = %system_type, zones = zones.len(), "synthesized system");
            Ok(true)
        }
        Err(Stop::Unsupported) => Ok(false),
        Err(Stop::Error(err)) => Err(err),
    }
}

/// [`synthesize`] from a system type tag. An unrecognized tag is logged and
/// builds nothing.
pub fn synthesize_tag(
    model: &mut Model,
    tag: &str,
    main_heat_fuel: Option<Fuel>,
    zone_heat_fuel: Option<Fuel>,
    cool_fuel: Option<Fuel>,
    zones: &[ZoneId],
    options: &ArchetypeOptions,
) -> HsResult<bool> {
    match tag.parse::<SystemType>() {
        Ok(system) => synthesize(model, &system, main_heat_fuel, zone_heat_fuel, cool_fuel, zones, options),
        Err(err) => {
            warn!(%err, "nothing built");
            Ok(false)
        }
    }
}

struct Dispatch<'a> {
    model: &'a mut Model,
    system: &'a SystemType,
    zones: &'a [ZoneId],
    main_heat: Option<Fuel>,
    zone_heat: Option<Fuel>,
    cool: Option<Fuel>,
    options: &'a ArchetypeOptions,
}

impl Dispatch<'_> {
    fn unsupported(&self, what: &'static str, fuel: Option<Fuel>) -> Stop {
        warn!(
            system = %self.system,
            what,
            fuel = fuel.map_or("none", Fuel::as_str),
            "unsupported combination, nothing built"
        );
        Stop::Unsupported
    }

    fn required(&self, fuel: Option<Fuel>, what: &'static str) -> Step<Fuel> {
        fuel.ok_or_else(|| self.unsupported(what, None))
    }

    fn optional<T>(&mut self, fuel: Option<Fuel>, pick: fn(&mut Self, Fuel) -> Step<T>) -> Step<Option<T>> {
        fuel.map(|f| pick(self, f)).transpose()
    }

    // Fuel checks run before the first plant loop is resolved, so a refused
    // combination leaves the model as it was.

    fn heats_with(&self, fuel: Option<Fuel>, what: &'static str) -> Step<()> {
        match fuel {
            Some(f) if f.heat_source().is_none() => Err(self.unsupported(what, fuel)),
            _ => Ok(()),
        }
    }

    fn cools_with(&self, fuel: Option<Fuel>, what: &'static str) -> Step<()> {
        match fuel {
            None | Some(Fuel::Electricity | Fuel::DistrictCooling) => Ok(()),
            other => Err(self.unsupported(what, other)),
        }
    }

    fn has_outdoor_air(&self) -> Step<()> {
        if total_outdoor_air(self.model, self.zones)? > 0.0 {
            return Ok(());
        }
        warn!(
            system = %self.system,
            zones = self.zones.len(),
            "zones have no outdoor air requirement, nothing built"
        );
        Err(Stop::Unsupported)
    }

    // Plant loops

    fn hot_water(&mut self, fuel: Fuel) -> Step<LoopId> {
        let Some(source) = fuel.heat_source() else {
            return Err(self.unsupported("hot water plant", Some(fuel)));
        };
        let config = HotWaterLoopConfig {
            source,
            tier: fuel.forced_tier().unwrap_or(self.options.hot_water_tier),
            vintage: self.options.vintage,
            ..HotWaterLoopConfig::default()
        };
        Ok(get_or_add_hot_water_loop(self.model, &config)?)
    }

    fn chilled_water(&mut self, fuel: Fuel) -> Step<LoopId> {
        let source = match fuel {
            Fuel::Electricity => CoolingSource::Chillers {
                condenser: self.options.chilled_water_cooling.condenser(),
                count: 1,
            },
            Fuel::DistrictCooling => CoolingSource::District,
            _ => return Err(self.unsupported("chilled water plant", Some(fuel))),
        };
        let role = LoopRole::ChilledWater;
        let registered = !self.model.registered_loops(role, role.canonical_name()).is_empty();
        let condenser_loop = if source.needs_condenser_loop() && !registered {
            Some(get_or_add_condenser_water_loop(self.model, &CondenserWaterLoopConfig::default())?)
        } else {
            None
        };
        let config = ChilledWaterLoopConfig {
            source,
            condenser_loop,
            vintage: self.options.vintage,
            ..ChilledWaterLoopConfig::default()
        };
        get_or_add_chilled_water_loop(self.model, &config)?.ok_or(Stop::Unsupported)
    }

    fn heat_pump_source_loop(&mut self) -> Step<LoopId> {
        if let (Some(Fuel::DistrictHeating), Some(Fuel::DistrictCooling)) = (self.main_heat, self.cool) {
            return Ok(get_or_add_ambient_loop(self.model, &AmbientLoopConfig::default())?);
        }
        let heating = match self.main_heat {
            Some(fuel) => fuel
                .heat_source()
                .ok_or_else(|| self.unsupported("heat pump loop heating", Some(fuel)))?,
            None => HeatSource::default(),
        };
        let config = HeatPumpLoopConfig {
            cooling: self.options.heat_pump_loop_cooling,
            heating,
            vintage: self.options.vintage,
            ..HeatPumpLoopConfig::default()
        };
        Ok(get_or_add_heat_pump_loop(self.model, &config)?)
    }

    // Coils

    /// Heating coil of a packaged unit, chosen by fuel alone.
    fn unit_heating(&mut self, fuel: Fuel) -> Step<AirHeating> {
        match fuel {
            Fuel::NaturalGas | Fuel::Propane | Fuel::FuelOil => Ok(AirHeating::Gas),
            Fuel::Electricity => Ok(AirHeating::Electric),
            Fuel::DistrictHeating | Fuel::AirSourceHeatPump => Ok(AirHeating::HotWater(self.hot_water(fuel)?)),
            Fuel::DistrictCooling => Err(self.unsupported("heating fuel", Some(fuel))),
        }
    }

    /// Main heating coil of a central air loop, chosen by the heating medium.
    fn air_loop_heating(&mut self, fuel: Fuel) -> Step<AirHeating> {
        match self.options.air_heating {
            AirMedium::Water => Ok(AirHeating::HotWater(self.hot_water(fuel)?)),
            AirMedium::Gas => self.unit_heating(fuel),
            AirMedium::Dx => Ok(AirHeating::HeatPump),
        }
    }

    fn air_loop_cooling(&mut self, fuel: Fuel) -> Step<AirCooling> {
        match (self.options.air_cooling, fuel) {
            (AirMedium::Water, _) | (AirMedium::Dx, Fuel::DistrictCooling) => {
                Ok(AirCooling::ChilledWater(self.chilled_water(fuel)?))
            }
            (AirMedium::Dx, Fuel::Electricity) => Ok(AirCooling::Dx),
            _ => Err(self.unsupported("air loop cooling", Some(fuel))),
        }
    }

    fn packaged_cooling(&mut self, fuel: Fuel) -> Step<AirCooling> {
        match fuel {
            Fuel::Electricity => Ok(AirCooling::Dx),
            Fuel::DistrictCooling => Ok(AirCooling::ChilledWater(self.chilled_water(fuel)?)),
            _ => Err(self.unsupported("cooling fuel", Some(fuel))),
        }
    }

    /// Units with a built-in compressor run on electricity.
    fn dx_cooling(&self) -> Step<()> {
        match self.cool {
            None | Some(Fuel::Electricity) => Ok(()),
            other => Err(self.unsupported("DX cooling fuel", other)),
        }
    }

    /// Electric resistance or a hot-water coil on the plant making heat
    /// from `fuel`.
    fn water_or_electric(&mut self, fuel: Fuel) -> Step<AirHeating> {
        match fuel {
            Fuel::Electricity => Ok(AirHeating::Electric),
            _ => Ok(AirHeating::HotWater(self.hot_water(fuel)?)),
        }
    }

    /// Reheat from the zone heating fuel, falling back to the main one.
    fn reheat_terminal(&mut self) -> Step<VavTerminal> {
        match self.zone_heat.or(self.main_heat) {
            Some(fuel) => Ok(VavTerminal::Reheat(self.water_or_electric(fuel)?)),
            None => Ok(VavTerminal::NoReheat),
        }
    }

    fn pfp_terminal(&mut self) -> Step<VavTerminal> {
        let fuel = self.zone_heat.unwrap_or(Fuel::Electricity);
        Ok(VavTerminal::ParallelFanPowered(self.water_or_electric(fuel)?))
    }

    /// Both halves or neither: a refused half rolls the model back to where
    /// it was before the ventilation system went in.
    fn paired(&mut self, ventilation: &SystemType, conditioning: &SystemType) -> Step<()> {
        let options = self.options.without_zone_ventilation();
        let before = self.model.clone();
        for half in [ventilation, conditioning] {
            let built = synthesize(
                self.model,
                half,
                self.main_heat,
                self.zone_heat,
                self.cool,
                self.zones,
                &options,
            )?;
            if !built {
                *self.model = before;
                warn!(system = %self.system, refused = %half, "compound system not built");
                return Err(Stop::Unsupported);
            }
        }
        Ok(())
    }

    fn build(&mut self) -> Step<()> {
        let system = self.system;
        let zones = self.zones;
        let vintage = self.options.vintage;
        let outdoor_air = self.options.zone_ventilation;

        match system {
            SystemType::Ptac => {
                self.dx_cooling()?;
                let heating = self.optional(self.main_heat, Self::water_or_electric)?;
                let config = PtacConfig {
                    heating,
                    outdoor_air,
                    vintage,
                    ..PtacConfig::default()
                };
                add_ptacs(self.model, zones, &config)?;
            }
            SystemType::Pthp => {
                self.dx_cooling()?;
                let config = PthpConfig {
                    outdoor_air,
                    vintage,
                    ..PthpConfig::default()
                };
                add_pthps(self.model, zones, &config)?;
            }
            SystemType::PszAc | SystemType::PszVav => {
                self.cools_with(self.cool, "cooling fuel")?;
                self.heats_with(self.main_heat, "heating fuel")?;
                let cooling = self.optional(self.cool, Self::packaged_cooling)?;
                let heating = self.optional(self.main_heat, Self::unit_heating)?;
                let fan = match system {
                    SystemType::PszVav => FanKind::VariableVolume,
                    _ => FanKind::OnOff,
                };
                let config = PszConfig {
                    heating,
                    cooling,
                    fan,
                    outdoor_air,
                    vintage,
                    ..PszConfig::default()
                };
                add_psz(self.model, zones, &config)?;
            }
            SystemType::PszHp => {
                self.dx_cooling()?;
                let config = PszConfig {
                    heating: Some(AirHeating::HeatPump),
                    cooling: Some(AirCooling::Dx),
                    outdoor_air,
                    vintage,
                    ..PszConfig::default()
                };
                add_psz(self.model, zones, &config)?;
            }
            SystemType::PvavReheat | SystemType::PvavPfpBoxes => {
                let cool = self.required(self.cool, "cooling fuel")?;
                self.cools_with(Some(cool), "cooling fuel")?;
                self.heats_with(self.main_heat, "heating fuel")?;
                self.heats_with(self.zone_heat, "zone heating fuel")?;
                let cooling = match self.packaged_cooling(cool)? {
                    AirCooling::Dx => AirCooling::DxTwoSpeed,
                    other => other,
                };
                let heating = self.optional(self.main_heat, Self::unit_heating)?;
                let terminal = match system {
                    SystemType::PvavPfpBoxes => self.pfp_terminal()?,
                    _ => self.reheat_terminal()?,
                };
                let config = PvavConfig {
                    heating,
                    cooling,
                    terminal,
                    outdoor_air,
                    vintage,
                    ..PvavConfig::default()
                };
                add_pvav(self.model, zones, &config)?;
            }
            SystemType::VavReheat | SystemType::VavNoReheat | SystemType::VavPfpBoxes | SystemType::VavGasReheat => {
                let cool = self.required(self.cool, "cooling fuel")?;
                self.cools_with(Some(cool), "cooling fuel")?;
                self.heats_with(self.main_heat, "heating fuel")?;
                self.heats_with(self.zone_heat, "zone heating fuel")?;
                let cooling = self.air_loop_cooling(cool)?;
                let heating = self.optional(self.main_heat, Self::air_loop_heating)?;
                let terminal = match system {
                    SystemType::VavNoReheat => VavTerminal::NoReheat,
                    SystemType::VavPfpBoxes => self.pfp_terminal()?,
                    SystemType::VavGasReheat => VavTerminal::Reheat(AirHeating::Gas),
                    _ => self.reheat_terminal()?,
                };
                let config = VavConfig {
                    heating,
                    cooling,
                    terminal,
                    outdoor_air,
                    vintage,
                    ..VavConfig::default()
                };
                add_vav(self.model, zones, &config)?;
            }
            SystemType::Doas | SystemType::DoasColdSupply => {
                self.has_outdoor_air()?;
                self.cools_with(self.cool, "cooling fuel")?;
                self.heats_with(self.main_heat, "heating fuel")?;
                let cooling = self.optional(self.cool, Self::air_loop_cooling)?;
                let heating = self.optional(self.main_heat, Self::air_loop_heating)?;
                let supply = match system {
                    SystemType::DoasColdSupply => DoasSupply::Cold,
                    _ => DoasSupply::Neutral,
                };
                let config = DoasConfig {
                    heating,
                    cooling,
                    supply,
                    vintage,
                    ..DoasConfig::default()
                };
                add_doas(self.model, zones, &config)?.ok_or(Stop::Unsupported)?;
            }
            SystemType::Ervs => {
                let config = ErvConfig {
                    vintage,
                    ..ErvConfig::default()
                };
                add_ervs(self.model, zones, &config)?;
            }
            SystemType::FanCoil => {
                let cool = self.required(self.cool, "cooling fuel")?;
                self.cools_with(Some(cool), "cooling fuel")?;
                self.heats_with(self.main_heat, "heating fuel")?;
                let chilled_water_loop = self.chilled_water(cool)?;
                let hot_water_loop = match self.main_heat {
                    None | Some(Fuel::Electricity) => None,
                    Some(fuel) => Some(self.hot_water(fuel)?),
                };
                let config = FanCoilConfig {
                    hot_water_loop,
                    capacity_control: self.options.fan_coil_control,
                    outdoor_air,
                    vintage,
                };
                add_fan_coils(self.model, zones, chilled_water_loop, &config)?;
            }
            SystemType::WaterSourceHeatPumps | SystemType::GroundSourceHeatPumps => {
                let source_loop = match system {
                    SystemType::GroundSourceHeatPumps => {
                        get_or_add_ground_loop(self.model, &GroundLoopConfig::default())?
                    }
                    _ => self.heat_pump_source_loop()?,
                };
                let config = WaterToAirHeatPumpConfig { outdoor_air, vintage };
                add_water_to_air_heat_pumps(self.model, zones, source_loop, &config)?;
            }
            SystemType::Baseboards => {
                let fuel = self.required(self.main_heat.or(self.zone_heat), "heating fuel")?;
                let heating = match fuel {
                    Fuel::Electricity => BaseboardHeating::Electric,
                    _ => BaseboardHeating::HotWater(self.hot_water(fuel)?),
                };
                add_baseboards(self.model, zones, heating)?;
            }
            SystemType::UnitHeaters => {
                let fuel = self.required(self.main_heat.or(self.zone_heat), "heating fuel")?;
                let heating = self.unit_heating(fuel)?;
                add_unit_heaters(self.model, zones, &UnitHeaterConfig { heating, vintage })?;
            }
            SystemType::WindowAc => {
                self.dx_cooling()?;
                add_window_acs(self.model, zones, &WindowAcConfig { outdoor_air, vintage })?;
            }
            SystemType::ResidentialAc | SystemType::ForcedAirFurnace | SystemType::ResidentialAirSourceHeatPump => {
                let residential = match system {
                    SystemType::ResidentialAc => ResidentialSystem::AirConditioner,
                    SystemType::ResidentialAirSourceHeatPump => ResidentialSystem::HeatPump,
                    _ => ResidentialSystem::Furnace,
                };
                if residential != ResidentialSystem::Furnace {
                    self.dx_cooling()?;
                }
                let config = ResidentialConfig {
                    system: residential,
                    outdoor_air,
                    vintage,
                };
                add_residential_systems(self.model, zones, &config)?;
            }
            SystemType::EvaporativeCooler => {
                let heating = self.optional(self.main_heat, Self::unit_heating)?;
                let config = EvaporativeCoolerConfig {
                    heating,
                    vintage,
                    ..EvaporativeCoolerConfig::default()
                };
                add_evaporative_coolers(self.model, zones, &config)?;
            }
            SystemType::WithDoas(inner) => self.paired(&SystemType::Doas, inner)?,
            SystemType::WithErvs(inner) => self.paired(&SystemType::Ervs, inner)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::ZoneSpec;

    fn zones(model: &mut Model, n: usize) -> Vec<ZoneId> {
        (1..=n)
            .map(|i| {
                model
                    .add_zone(ZoneSpec::new(format!("Zone {i}")).with_outdoor_air(0.05))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn no_zones_builds_nothing() {
        let mut model = Model::new();
        let built = synthesize(
            &mut model,
            &SystemType::VavReheat,
            Some(Fuel::NaturalGas),
            None,
            Some(Fuel::Electricity),
            &[],
            &ArchetypeOptions::default(),
        )
        .unwrap();
        assert!(!built);
        assert!(model.plant_loops().is_empty());
    }

    #[test]
    fn gas_cooling_is_unsupported() {
        let mut model = Model::new();
        let z = zones(&mut model, 1);
        let built = synthesize(
            &mut model,
            &SystemType::VavReheat,
            Some(Fuel::NaturalGas),
            None,
            Some(Fuel::NaturalGas),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap();
        assert!(!built);
        assert!(model.air_loops().is_empty());
    }

    #[test]
    fn unknown_tag_is_a_no_op() {
        let mut model = Model::new();
        let z = zones(&mut model, 1);
        let built = synthesize_tag(
            &mut model,
            "Chilled Beams",
            None,
            None,
            Some(Fuel::Electricity),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap();
        assert!(!built);
        assert!(model.all_equipment().is_empty());
    }

    #[test]
    fn air_source_heat_pump_fuel_builds_low_temperature_water() {
        let mut model = Model::new();
        let z = zones(&mut model, 2);
        let options = ArchetypeOptions::default();
        assert!(
            synthesize(
                &mut model,
                &SystemType::Baseboards,
                Some(Fuel::AirSourceHeatPump),
                None,
                None,
                &z,
                &options,
            )
            .unwrap()
        );
        let hw = model.plant_loop_named("Hot Water Loop").unwrap();
        let supply_c = model.plant_loop(hw).unwrap().sizing.design_exit_temp_c;
        assert_eq!(hs_plant::HotWaterTier::of_supply_c(supply_c), hs_plant::HotWaterTier::LowTemperature);
    }

    #[test]
    fn district_heat_and_cooling_feed_heat_pumps_from_the_ambient_loop() {
        let mut model = Model::new();
        let z = zones(&mut model, 1);
        let built = synthesize(
            &mut model,
            &SystemType::WaterSourceHeatPumps,
            Some(Fuel::DistrictHeating),
            None,
            Some(Fuel::DistrictCooling),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap();
        assert!(built);
        assert_eq!(model.plant_loops().len(), 1);
        assert_eq!(model.plant_loops()[0].role, LoopRole::Ambient);
    }

    #[test]
    fn paired_systems_leave_ventilation_to_the_doas() {
        let mut model = Model::new();
        let z = zones(&mut model, 2);
        let built = synthesize(
            &mut model,
            &SystemType::Ptac.with_doas(),
            Some(Fuel::Electricity),
            None,
            Some(Fuel::Electricity),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap();
        assert!(built);
        assert_eq!(model.air_loops().len(), 1);
        assert!(model.air_loops()[0].dedicated_outdoor_air);
        assert_eq!(model.zone_hvac_units().len(), 2);
        assert!(model.zone_hvac_units().iter().all(|u| !u.outdoor_air));
    }
}
