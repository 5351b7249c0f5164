//! HVAC templates: flat equipment-type identifiers translated into one or
//! two dispatcher calls, followed by enrichment of the air loops they build.
//!
//! An identifier reads `[DOAS_]<air side>[_<cooling plant>][_<heating>]`,
//! e.g. `VAV_Chiller_Boiler`, `PSZAC_ElectricBaseboard` or
//! `DOAS_FCU_ACChiller_ASHP`. Heat-only identifiers name the zone heat
//! alone (`ElectricBaseboard`). Only the combinations listed by
//! [`EquipmentType::catalog`] parse.

use std::fmt;
use std::str::FromStr;

use hs_air::{add_humidifier, attach_heat_recovery};
use hs_components::{HeatRecoveryParams, Vintage};
use hs_controls::EconomizerType;
use hs_core::{AirLoopId, HsError, HsResult, ScheduleId, ZoneId, ensure_fraction};
use hs_model::Model;
use hs_plant::{ChilledWaterCooling, HeatPumpLoopCooling};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dispatch::synthesize;
use crate::fuel::Fuel;
use crate::options::{AirMedium, ArchetypeOptions};
use crate::system_type::SystemType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirSide {
    Vav,
    Pvav,
    PszAc,
    PszVav,
    PszHp,
    Ptac,
    Pthp,
    FanCoil,
    WaterSourceHeatPump,
    GroundSourceHeatPump,
    WindowAc,
    Furnace,
    ResidentialAc,
    ResidentialHeatPump,
    EvaporativeCoolers,
}

impl AirSide {
    pub const ALL: [AirSide; 15] = [
        AirSide::Vav,
        AirSide::Pvav,
        AirSide::PszAc,
        AirSide::PszVav,
        AirSide::PszHp,
        AirSide::Ptac,
        AirSide::Pthp,
        AirSide::FanCoil,
        AirSide::WaterSourceHeatPump,
        AirSide::GroundSourceHeatPump,
        AirSide::WindowAc,
        AirSide::Furnace,
        AirSide::ResidentialAc,
        AirSide::ResidentialHeatPump,
        AirSide::EvaporativeCoolers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AirSide::Vav => "VAV",
            AirSide::Pvav => "PVAV",
            AirSide::PszAc => "PSZAC",
            AirSide::PszVav => "PSZVAV",
            AirSide::PszHp => "PSZHP",
            AirSide::Ptac => "PTAC",
            AirSide::Pthp => "PTHP",
            AirSide::FanCoil => "FCU",
            AirSide::WaterSourceHeatPump => "WSHP",
            AirSide::GroundSourceHeatPump => "GSHP",
            AirSide::WindowAc => "WindowAC",
            AirSide::Furnace => "Furnace",
            AirSide::ResidentialAc => "ResidentialAC",
            AirSide::ResidentialHeatPump => "ResidentialHP",
            AirSide::EvaporativeCoolers => "EvapCoolers",
        }
    }

    /// Air sides a DOAS can be paired with.
    fn pairs_with_doas(self) -> bool {
        matches!(
            self,
            AirSide::FanCoil
                | AirSide::Ptac
                | AirSide::Pthp
                | AirSide::WaterSourceHeatPump
                | AirSide::GroundSourceHeatPump
                | AirSide::WindowAc
        )
    }

    /// Valid (cooling plant, heating) pairs.
    fn combinations(self) -> Vec<(Option<CoolingPlant>, Option<Heating>)> {
        use CoolingPlant::*;
        use Heating::*;

        let chilled = [Chiller, AirCooledChiller, DistrictCooling];
        let hot_water = [Boiler, AirSourceHeatPump, DistrictHeating];
        let dx = |heating: &[Option<Heating>]| heating.iter().map(|&h| (None, h)).collect::<Vec<_>>();
        let with_aux = |heating: &[Heating]| {
            let mut all = vec![None];
            all.extend(heating.iter().copied().map(Some));
            all.extend(Heating::AUXILIARY.into_iter().map(Some));
            all
        };
        let cross = |cooling: &[CoolingPlant], heating: &[Heating]| {
            cooling
                .iter()
                .flat_map(|&c| heating.iter().map(move |&h| (Some(c), Some(h))))
                .collect::<Vec<_>>()
        };

        match self {
            AirSide::Vav => cross(&chilled, &[Boiler, AirSourceHeatPump, DistrictHeating, GasCoil, ParallelFanPowered]),
            AirSide::Pvav => dx(&[None, Some(Boiler), Some(AirSourceHeatPump), Some(DistrictHeating), Some(ParallelFanPowered)]),
            AirSide::PszAc => dx(&with_aux(&[GasCoil, ElectricCoil, AirSourceHeatPump, DistrictHeating])),
            AirSide::PszVav => dx(&[None, Some(GasCoil), Some(ElectricCoil), Some(AirSourceHeatPump), Some(DistrictHeating)]),
            AirSide::Ptac => dx(&with_aux(&[ElectricCoil, Boiler, AirSourceHeatPump, DistrictHeating])),
            AirSide::WindowAc | AirSide::EvaporativeCoolers => dx(&with_aux(&[])),
            AirSide::FanCoil => cross(&chilled, &[Boiler, AirSourceHeatPump, DistrictHeating, ElectricCoil]),
            AirSide::WaterSourceHeatPump => {
                let mut all = cross(&[CoolingTower, FluidCooler, EvaporativeFluidCooler], &hot_water);
                all.push((Some(DistrictCooling), Some(DistrictHeating)));
                all
            }
            AirSide::PszHp
            | AirSide::Pthp
            | AirSide::GroundSourceHeatPump
            | AirSide::Furnace
            | AirSide::ResidentialAc
            | AirSide::ResidentialHeatPump => vec![(None, None)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoolingPlant {
    Chiller,
    AirCooledChiller,
    DistrictCooling,
    CoolingTower,
    FluidCooler,
    EvaporativeFluidCooler,
}

impl CoolingPlant {
    pub const ALL: [CoolingPlant; 6] = [
        CoolingPlant::Chiller,
        CoolingPlant::AirCooledChiller,
        CoolingPlant::DistrictCooling,
        CoolingPlant::CoolingTower,
        CoolingPlant::FluidCooler,
        CoolingPlant::EvaporativeFluidCooler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CoolingPlant::Chiller => "Chiller",
            CoolingPlant::AirCooledChiller => "ACChiller",
            CoolingPlant::DistrictCooling => "DCW",
            CoolingPlant::CoolingTower => "CoolingTower",
            CoolingPlant::FluidCooler => "FluidCooler",
            CoolingPlant::EvaporativeFluidCooler => "EvapFluidCooler",
        }
    }

    fn is_chilled_water(self) -> bool {
        matches!(
            self,
            CoolingPlant::Chiller | CoolingPlant::AirCooledChiller | CoolingPlant::DistrictCooling
        )
    }

    fn apply(self, options: &mut ArchetypeOptions) {
        match self {
            CoolingPlant::Chiller => options.chilled_water_cooling = ChilledWaterCooling::WaterCooled,
            CoolingPlant::AirCooledChiller => options.chilled_water_cooling = ChilledWaterCooling::AirCooled,
            CoolingPlant::DistrictCooling => {}
            CoolingPlant::CoolingTower => options.heat_pump_loop_cooling = HeatPumpLoopCooling::CoolingTower,
            CoolingPlant::FluidCooler => options.heat_pump_loop_cooling = HeatPumpLoopCooling::FluidCooler,
            CoolingPlant::EvaporativeFluidCooler => {
                options.heat_pump_loop_cooling = HeatPumpLoopCooling::EvaporativeFluidCoolerSingleSpeed
            }
        }
    }
}

/// Heating named by the last identifier token: a plant or coil heating the
/// main system, or auxiliary zone heat added next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heating {
    Boiler,
    AirSourceHeatPump,
    DistrictHeating,
    GasCoil,
    ElectricCoil,
    /// Parallel fan-powered boxes with electric reheat.
    ParallelFanPowered,
    ElectricBaseboard,
    BoilerBaseboard,
    AirSourceHeatPumpBaseboard,
    DistrictHeatingBaseboard,
    GasHeaters,
}

impl Heating {
    pub const ALL: [Heating; 11] = [
        Heating::Boiler,
        Heating::AirSourceHeatPump,
        Heating::DistrictHeating,
        Heating::GasCoil,
        Heating::ElectricCoil,
        Heating::ParallelFanPowered,
        Heating::ElectricBaseboard,
        Heating::BoilerBaseboard,
        Heating::AirSourceHeatPumpBaseboard,
        Heating::DistrictHeatingBaseboard,
        Heating::GasHeaters,
    ];

    pub const AUXILIARY: [Heating; 5] = [
        Heating::ElectricBaseboard,
        Heating::BoilerBaseboard,
        Heating::AirSourceHeatPumpBaseboard,
        Heating::DistrictHeatingBaseboard,
        Heating::GasHeaters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Heating::Boiler => "Boiler",
            Heating::AirSourceHeatPump => "ASHP",
            Heating::DistrictHeating => "DHW",
            Heating::GasCoil => "GasCoil",
            Heating::ElectricCoil => "ElectricCoil",
            Heating::ParallelFanPowered => "PFP",
            Heating::ElectricBaseboard => "ElectricBaseboard",
            Heating::BoilerBaseboard => "BoilerBaseboard",
            Heating::AirSourceHeatPumpBaseboard => "ASHPBaseboard",
            Heating::DistrictHeatingBaseboard => "DHWBaseboard",
            Heating::GasHeaters => "GasHeaters",
        }
    }

    pub fn is_auxiliary(self) -> bool {
        Heating::AUXILIARY.contains(&self)
    }

    fn is_hot_water(self) -> bool {
        matches!(self, Heating::Boiler | Heating::AirSourceHeatPump | Heating::DistrictHeating)
    }

    pub fn fuel(self) -> Fuel {
        match self {
            Heating::Boiler | Heating::GasCoil | Heating::BoilerBaseboard | Heating::GasHeaters => Fuel::NaturalGas,
            Heating::AirSourceHeatPump | Heating::AirSourceHeatPumpBaseboard => Fuel::AirSourceHeatPump,
            Heating::DistrictHeating | Heating::DistrictHeatingBaseboard => Fuel::DistrictHeating,
            Heating::ElectricCoil | Heating::ParallelFanPowered | Heating::ElectricBaseboard => Fuel::Electricity,
        }
    }
}

/// A parsed equipment-type identifier. `air` is `None` for heat-only
/// equipment, whose `heating` is then auxiliary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EquipmentType {
    pub doas: bool,
    pub air: Option<AirSide>,
    pub cooling: Option<CoolingPlant>,
    pub heating: Option<Heating>,
}

/// One dispatcher call.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchCall {
    pub system: SystemType,
    pub main_heat_fuel: Option<Fuel>,
    pub zone_heat_fuel: Option<Fuel>,
    pub cool_fuel: Option<Fuel>,
    pub options: ArchetypeOptions,
}

impl EquipmentType {
    /// Every valid identifier.
    pub fn catalog() -> Vec<EquipmentType> {
        let mut all = Vec::new();
        for doas in [false, true] {
            for air in AirSide::ALL {
                if doas && !air.pairs_with_doas() {
                    continue;
                }
                all.extend(air.combinations().into_iter().map(|(cooling, heating)| EquipmentType {
                    doas,
                    air: Some(air),
                    cooling,
                    heating,
                }));
            }
        }
        all.extend(Heating::AUXILIARY.into_iter().map(|h| EquipmentType {
            doas: false,
            air: None,
            cooling: None,
            heating: Some(h),
        }));
        all
    }

    fn main_heating(&self) -> Option<Heating> {
        self.heating.filter(|h| !h.is_auxiliary())
    }

    fn auxiliary_heating(&self) -> Option<Heating> {
        self.heating.filter(|h| h.is_auxiliary())
    }

    /// Whether the main system heats the zones it serves.
    pub fn main_heats(&self) -> bool {
        match self.air {
            None | Some(AirSide::WindowAc) | Some(AirSide::EvaporativeCoolers) => false,
            Some(AirSide::Vav) | Some(AirSide::PszAc) | Some(AirSide::PszVav) | Some(AirSide::Ptac) => {
                self.main_heating().is_some()
            }
            Some(_) => true,
        }
    }

    /// Whether the main system cools the zones it serves.
    pub fn main_cools(&self) -> bool {
        !matches!(self.air, None | Some(AirSide::Furnace))
    }

    /// The dispatcher call building the main system, `None` for heat-only
    /// equipment.
    pub fn main_call(&self, vintage: Vintage) -> Option<DispatchCall> {
        let air = self.air?;
        let mut options = ArchetypeOptions {
            vintage,
            ..ArchetypeOptions::default()
        };
        if let Some(cooling) = self.cooling {
            cooling.apply(&mut options);
        }
        let heating = self.main_heating();
        options.air_heating = match heating {
            Some(h) if h.is_hot_water() => AirMedium::Water,
            _ => AirMedium::Gas,
        };
        options.air_cooling = match self.cooling {
            Some(c) if c.is_chilled_water() => AirMedium::Water,
            _ => AirMedium::Dx,
        };
        let heat_fuel = heating.map(Heating::fuel);
        let cool_fuel = match (air, self.cooling) {
            (AirSide::Furnace, _) => None,
            (_, Some(CoolingPlant::DistrictCooling)) => Some(Fuel::DistrictCooling),
            _ => Some(Fuel::Electricity),
        };

        let (system, main_heat_fuel, zone_heat_fuel) = match air {
            AirSide::Vav => match heating {
                Some(Heating::GasCoil) => (SystemType::VavGasReheat, heat_fuel, None),
                Some(Heating::ParallelFanPowered) => {
                    (SystemType::VavPfpBoxes, heat_fuel, Some(Fuel::Electricity))
                }
                _ => (SystemType::VavReheat, heat_fuel, heat_fuel),
            },
            AirSide::Pvav => match heating {
                Some(Heating::ParallelFanPowered) => {
                    (SystemType::PvavPfpBoxes, heat_fuel, Some(Fuel::Electricity))
                }
                Some(_) => (SystemType::PvavReheat, heat_fuel, heat_fuel),
                None => (SystemType::PvavReheat, Some(Fuel::NaturalGas), Some(Fuel::Electricity)),
            },
            AirSide::PszAc => (SystemType::PszAc, heat_fuel, None),
            AirSide::PszVav => (SystemType::PszVav, heat_fuel, None),
            AirSide::PszHp => (SystemType::PszHp, None, None),
            AirSide::Ptac => (SystemType::Ptac, heat_fuel, None),
            AirSide::Pthp => (SystemType::Pthp, None, None),
            AirSide::FanCoil => (SystemType::FanCoil, heat_fuel, None),
            AirSide::WaterSourceHeatPump => (SystemType::WaterSourceHeatPumps, heat_fuel, None),
            AirSide::GroundSourceHeatPump => (SystemType::GroundSourceHeatPumps, None, None),
            AirSide::WindowAc => (SystemType::WindowAc, None, None),
            AirSide::Furnace => (SystemType::ForcedAirFurnace, Some(Fuel::NaturalGas), None),
            AirSide::ResidentialAc => (SystemType::ResidentialAc, Some(Fuel::NaturalGas), None),
            AirSide::ResidentialHeatPump => (SystemType::ResidentialAirSourceHeatPump, None, None),
            AirSide::EvaporativeCoolers => (SystemType::EvaporativeCooler, None, None),
        };
        let system = if self.doas { system.with_doas() } else { system };
        Some(DispatchCall {
            system,
            main_heat_fuel,
            zone_heat_fuel,
            cool_fuel,
            options,
        })
    }

    /// The dispatcher call adding auxiliary zone heat, if any.
    pub fn auxiliary_call(&self, vintage: Vintage) -> Option<DispatchCall> {
        let heating = self.auxiliary_heating()?;
        let system = match heating {
            Heating::GasHeaters => SystemType::UnitHeaters,
            _ => SystemType::Baseboards,
        };
        Some(DispatchCall {
            system,
            main_heat_fuel: Some(heating.fuel()),
            zone_heat_fuel: None,
            cool_fuel: None,
            options: ArchetypeOptions {
                vintage,
                ..ArchetypeOptions::default()
            },
        })
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::with_capacity(4);
        if self.doas {
            tokens.push("DOAS");
        }
        tokens.extend(self.air.map(AirSide::as_str));
        tokens.extend(self.cooling.map(CoolingPlant::as_str));
        tokens.extend(self.heating.map(Heating::as_str));
        f.write_str(&tokens.join("_"))
    }
}

impl FromStr for EquipmentType {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HsError::unknown_tag("equipment type", s);
        let mut tokens = s.trim().split('_').peekable();
        let doas = tokens.next_if_eq(&"DOAS").is_some();
        let air = tokens
            .next_if(|t| AirSide::ALL.iter().any(|a| a.as_str() == *t))
            .and_then(|t| AirSide::ALL.into_iter().find(|a| a.as_str() == t));
        let cooling = tokens
            .next_if(|t| CoolingPlant::ALL.iter().any(|c| c.as_str() == *t))
            .and_then(|t| CoolingPlant::ALL.into_iter().find(|c| c.as_str() == t));
        let heating = tokens
            .next_if(|t| Heating::ALL.iter().any(|h| h.as_str() == *t))
            .and_then(|t| Heating::ALL.into_iter().find(|h| h.as_str() == t));
        if tokens.next().is_some() {
            return Err(bad());
        }
        let parsed = EquipmentType {
            doas,
            air,
            cooling,
            heating,
        };
        if EquipmentType::catalog().contains(&parsed) {
            Ok(parsed)
        } else {
            Err(bad())
        }
    }
}

impl TryFrom<String> for EquipmentType {
    type Error = HsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EquipmentType> for String {
    fn from(t: EquipmentType) -> Self {
        t.to_string()
    }
}

/// An HVAC template as carried on a group of rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct HvacTemplate {
    pub name: String,
    pub equipment_type: EquipmentType,
    pub vintage: Vintage,
    /// Economizer written to every outdoor-air controller; `None` keeps what
    /// the builder chose.
    pub economizer: Option<EconomizerType>,
    pub demand_controlled_ventilation: bool,
    pub sensible_heat_recovery: f64,
    pub latent_heat_recovery: f64,
    /// Name of the schedule that makes a DOAS available.
    pub doas_availability_schedule: Option<String>,
}

impl HvacTemplate {
    pub fn new(name: impl Into<String>, equipment_type: EquipmentType) -> Self {
        Self {
            name: name.into(),
            equipment_type,
            vintage: Vintage::default(),
            economizer: None,
            demand_controlled_ventilation: false,
            sensible_heat_recovery: 0.0,
            latent_heat_recovery: 0.0,
            doas_availability_schedule: None,
        }
    }
}

/// Zones split by the loads they condition. Unconditioned zones are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneBuckets {
    pub heated_and_cooled: Vec<ZoneId>,
    pub cooled_only: Vec<ZoneId>,
    pub heated_only: Vec<ZoneId>,
}

pub fn partition_zones(model: &Model, zones: &[ZoneId]) -> HsResult<ZoneBuckets> {
    let mut buckets = ZoneBuckets::default();
    for &id in zones {
        let zone = model.zone(id)?;
        match (zone.is_heated(), zone.is_cooled()) {
            (true, true) => buckets.heated_and_cooled.push(id),
            (false, true) => buckets.cooled_only.push(id),
            (true, false) => buckets.heated_only.push(id),
            (false, false) => debug!(zone = %zone.name, "unconditioned zone skipped"),
        }
    }
    Ok(buckets)
}

/// What a template built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOutcome {
    /// Every dispatcher call succeeded.
    pub built: bool,
    pub air_loops: Vec<AirLoopId>,
}

/// Build `template` for `zones` and enrich the air loops it creates.
pub fn apply_template(model: &mut Model, template: &HvacTemplate, zones: &[ZoneId]) -> HsResult<TemplateOutcome> {
    let sensible = ensure_fraction(template.sensible_heat_recovery, "sensible heat recovery")?;
    let latent = ensure_fraction(template.latent_heat_recovery, "latent heat recovery")?;
    let doas_availability = template
        .doas_availability_schedule
        .as_deref()
        .map(|name| model.schedule_named(name))
        .transpose()?;

    let equipment = template.equipment_type;
    let buckets = partition_zones(model, zones)?;
    let mut main_zones = buckets.heated_and_cooled.clone();
    if equipment.main_cools() {
        main_zones.extend(&buckets.cooled_only);
    }
    if equipment.main_heats() {
        main_zones.extend(&buckets.heated_only);
    }
    let mut auxiliary_zones = buckets.heated_and_cooled.clone();
    auxiliary_zones.extend(&buckets.heated_only);

    let first_new_loop = model.air_loops().len();
    let mut built = true;
    let calls = [
        equipment.main_call(template.vintage).map(|c| (c, main_zones)),
        equipment.auxiliary_call(template.vintage).map(|c| (c, auxiliary_zones)),
    ];
    for (call, zones) in calls.into_iter().flatten() {
        if zones.is_empty() {
            continue;
        }
        built &= synthesize(
            model,
            &call.system,
            call.main_heat_fuel,
            call.zone_heat_fuel,
            call.cool_fuel,
            &zones,
            &call.options,
        )?;
    }

    let air_loops: Vec<AirLoopId> = model.air_loops()[first_new_loop..].iter().map(|l| l.id).collect();
    let enrichment = Enrichment {
        economizer: template.economizer,
        demand_controlled_ventilation: template.demand_controlled_ventilation,
        heat_recovery: (sensible > 0.0 || latent > 0.0)
            .then(|| HeatRecoveryParams::default().with_effectiveness(sensible, latent)),
        doas_availability,
    };
    for &air in &air_loops {
        enrichment.apply(model, air)?;
    }

    info!(
        template = %template.name,
        equipment_type = %equipment,
        zones = zones.len(),
        air_loops = air_loops.len(),
        built,
        "applied HVAC template"
    );
    Ok(TemplateOutcome { built, air_loops })
}

struct Enrichment {
    economizer: Option<EconomizerType>,
    demand_controlled_ventilation: bool,
    heat_recovery: Option<HeatRecoveryParams>,
    doas_availability: Option<ScheduleId>,
}

impl Enrichment {
    fn apply(&self, model: &mut Model, air: AirLoopId) -> HsResult<()> {
        let served: Vec<ZoneId> = model
            .air_loop(air)?
            .terminals
            .iter()
            .map(|&t| model.terminal(t).map(|t| t.zone))
            .collect::<HsResult<_>>()?;

        let air_loop = model.air_loop(air)?;
        let dedicated = air_loop.dedicated_outdoor_air;
        let has_outdoor_air = air_loop.outdoor_air.is_some();
        if dedicated && let Some(schedule) = self.doas_availability {
            model.air_loop_mut(air)?.availability = Some(schedule);
        }
        if !has_outdoor_air {
            return Ok(());
        }

        let ventilation = common_ventilation_schedule(model, air, &served)?;
        let controller = model.outdoor_air_controller_mut(air)?;
        if let (Some(economizer), false) = (self.economizer, dedicated) {
            controller.set_economizer(economizer);
        }
        controller.demand_controlled_ventilation = self.demand_controlled_ventilation;
        if let Some(schedule) = ventilation {
            controller.minimum_fraction_schedule = Some(schedule);
        }

        if let Some(params) = &self.heat_recovery {
            attach_heat_recovery(model, air, params)?;
        }
        let humidistat = served
            .iter()
            .map(|&z| model.zone(z).map(|z| z.has_humidistat))
            .collect::<HsResult<Vec<_>>>()?
            .contains(&true);
        if humidistat {
            add_humidifier(model, air)?;
        }
        Ok(())
    }
}

/// The ventilation schedule every served zone agrees on. Zones without one,
/// or with different ones, leave the controller's default in place.
fn common_ventilation_schedule(model: &Model, air: AirLoopId, served: &[ZoneId]) -> HsResult<Option<ScheduleId>> {
    let schedules = served
        .iter()
        .map(|&z| model.zone(z).map(|z| z.ventilation_schedule))
        .collect::<HsResult<Vec<_>>>()?;
    match schedules.split_first() {
        Some((&Some(first), rest)) if rest.iter().all(|&s| s == Some(first)) => Ok(Some(first)),
        _ => {
            if schedules.iter().any(Option::is_some) {
                debug!(
                    air_loop = %model.air_loop(air)?.name,
                    zones = served.len(),
                    "zone ventilation schedules disagree, keeping the outdoor air controller default"
                );
            }
            Ok(None)
        }
    }
}
