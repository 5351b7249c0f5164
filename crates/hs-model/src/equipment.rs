//! Equipment records and their performance parameters.
//!
//! Every coil, fan, pump, heat source or sink, heat exchanger and pipe is an
//! [`Equipment`]. Its [`EquipmentKind`] carries the parameters the equipment
//! factories set; its placements record where it sits in the node graph. A
//! water coil, for example, is placed twice: once on an air loop and once on
//! a plant loop demand branch.

use hs_core::{AirLoopId, CompId, EquipId, LoopId, NodeId, ScheduleId, ZoneHvacId};
use serde::{Deserialize, Serialize};

use crate::curve::Curve;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Capacity {
    #[default]
    Autosize,
    Watts(f64),
}

impl Capacity {
    pub fn is_autosized(self) -> bool {
        matches!(self, Capacity::Autosize)
    }
}

/// Fuel burned or purchased by a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    NaturalGas,
    Propane,
    FuelOilNo2,
    Electricity,
    DistrictHeating,
    DistrictCooling,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::NaturalGas => "NaturalGas",
            FuelType::Propane => "Propane",
            FuelType::FuelOilNo2 => "FuelOilNo2",
            FuelType::Electricity => "Electricity",
            FuelType::DistrictHeating => "DistrictHeating",
            FuelType::DistrictCooling => "DistrictCooling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpSpeed {
    Constant,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpControl {
    Intermittent,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PumpSpec {
    pub speed: PumpSpeed,
    pub rated_head_pa: f64,
    pub motor_efficiency: f64,
    pub control: PumpControl,
    /// Part-load power coefficients, variable-speed pumps only.
    pub part_load_coefficients: Option<[f64; 4]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilerFlowMode {
    ConstantFlow,
    LeavingSetpointModulated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoilerSpec {
    pub fuel: FuelType,
    pub nominal_efficiency: f64,
    pub capacity: Capacity,
    pub design_water_outlet_c: f64,
    pub max_leaving_water_c: f64,
    pub flow_mode: BoilerFlowMode,
    pub efficiency_curve: Option<Curve>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CondenserType {
    AirCooled,
    WaterCooled,
    EvaporativelyCooled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressorType {
    Centrifugal,
    Screw,
    Reciprocating,
    Scroll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChillerSpec {
    pub condenser: CondenserType,
    pub compressor: CompressorType,
    pub reference_cop: f64,
    pub capacity: Capacity,
    pub leaving_chilled_water_c: f64,
    pub entering_condenser_fluid_c: f64,
    pub capacity_curve: Curve,
    pub eir_curve: Curve,
    pub eir_part_load_curve: Curve,
}

/// Cooling towers and fluid coolers, by fan control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatRejectionKind {
    CoolingTowerSingleSpeed,
    CoolingTowerTwoSpeed,
    CoolingTowerVariableSpeed,
    FluidCoolerSingleSpeed,
    FluidCoolerTwoSpeed,
    EvaporativeFluidCoolerSingleSpeed,
    EvaporativeFluidCoolerTwoSpeed,
}

impl HeatRejectionKind {
    pub fn class(self) -> &'static str {
        match self {
            HeatRejectionKind::CoolingTowerSingleSpeed => "CoolingTower:SingleSpeed",
            HeatRejectionKind::CoolingTowerTwoSpeed => "CoolingTower:TwoSpeed",
            HeatRejectionKind::CoolingTowerVariableSpeed => "CoolingTower:VariableSpeed",
            HeatRejectionKind::FluidCoolerSingleSpeed => "FluidCooler:SingleSpeed",
            HeatRejectionKind::FluidCoolerTwoSpeed => "FluidCooler:TwoSpeed",
            HeatRejectionKind::EvaporativeFluidCoolerSingleSpeed => "EvaporativeFluidCooler:SingleSpeed",
            HeatRejectionKind::EvaporativeFluidCoolerTwoSpeed => "EvaporativeFluidCooler:TwoSpeed",
        }
    }

    pub fn is_cooling_tower(self) -> bool {
        matches!(
            self,
            HeatRejectionKind::CoolingTowerSingleSpeed
                | HeatRejectionKind::CoolingTowerTwoSpeed
                | HeatRejectionKind::CoolingTowerVariableSpeed
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatRejectionSpec {
    pub kind: HeatRejectionKind,
    pub design_approach_k: Option<f64>,
    pub design_range_k: Option<f64>,
    pub design_inlet_wet_bulb_c: Option<f64>,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistrictService {
    Heating,
    Cooling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistrictSpec {
    pub service: DistrictService,
    /// Object class the target schema version uses for this service.
    pub class: &'static str,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatPumpSource {
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatPumpMode {
    Heating,
    Cooling,
}

/// Central water-heating or water-cooling heat pump.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantHeatPumpSpec {
    pub source: HeatPumpSource,
    pub mode: HeatPumpMode,
    pub reference_cop: f64,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatExchangerControl {
    UncontrolledOn,
    OperationSchemeModulated,
    CoolingSetpointModulated,
    CoolingSetpointOnOffWithComponentOverride,
    HeatingSetpointModulated,
}

impl HeatExchangerControl {
    pub fn as_str(self) -> &'static str {
        match self {
            HeatExchangerControl::UncontrolledOn => "UncontrolledOn",
            HeatExchangerControl::OperationSchemeModulated => "OperationSchemeModulated",
            HeatExchangerControl::CoolingSetpointModulated => "CoolingSetpointModulated",
            HeatExchangerControl::CoolingSetpointOnOffWithComponentOverride => {
                "CoolingSetpointOnOffWithComponentOverride"
            }
            HeatExchangerControl::HeatingSetpointModulated => "HeatingSetpointModulated",
        }
    }
}

/// Nodes whose loop temperatures decide when a heat exchanger overrides the
/// component it is interlocked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentOverride {
    pub supply_inlet: NodeId,
    pub demand_inlet: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FluidHeatExchangerSpec {
    pub control: HeatExchangerControl,
    pub min_temperature_difference_k: f64,
    pub component_override: Option<ComponentOverride>,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSourceSpec {
    /// Outlet temperature schedule, written by a control program.
    pub schedule: ScheduleId,
}

/// Rated water and air temperatures of a water coil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterCoilDesign {
    pub inlet_water_c: f64,
    pub outlet_water_c: f64,
    pub inlet_air_c: f64,
    pub outlet_air_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeatingSource {
    HotWater(WaterCoilDesign),
    HotWaterBaseboard,
    Fuel { fuel: FuelType, efficiency: f64 },
    Electric { efficiency: f64 },
    DxHeatPump { cop: f64, min_outdoor_c: f64 },
    WaterToAirHeatPump { cop: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatingCoilSpec {
    pub source: HeatingSource,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoolingSource {
    ChilledWater(WaterCoilDesign),
    DxSingleSpeed { cop: f64 },
    DxTwoSpeed { high_cop: f64, low_cop: f64 },
    WaterToAirHeatPump { cop: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingCoilSpec {
    pub source: CoolingSource,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanKind {
    ConstantVolume,
    VariableVolume,
    OnOff,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FanSpec {
    pub kind: FanKind,
    pub pressure_rise_pa: f64,
    pub fan_efficiency: f64,
    pub motor_efficiency: f64,
    pub motor_in_airstream_fraction: f64,
    /// Part-load power coefficients, variable-volume fans only.
    pub part_load_coefficients: Option<[f64; 5]>,
}

impl FanSpec {
    pub fn total_efficiency(&self) -> f64 {
        self.fan_efficiency * self.motor_efficiency
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatRecoveryType {
    Plate,
    Rotary,
}

/// Sensible and latent effectiveness of an air-to-air exchanger at 100% and
/// 75% of design flow, for heating and cooling.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatRecoverySpec {
    pub sensible_heating_100: f64,
    pub latent_heating_100: f64,
    pub sensible_heating_75: f64,
    pub latent_heating_75: f64,
    pub sensible_cooling_100: f64,
    pub latent_cooling_100: f64,
    pub sensible_cooling_75: f64,
    pub latent_cooling_75: f64,
    pub exchanger_type: HeatRecoveryType,
    pub economizer_lockout: bool,
}

impl HeatRecoverySpec {
    pub fn set_sensible(&mut self, effectiveness: f64) {
        self.sensible_heating_100 = effectiveness;
        self.sensible_heating_75 = effectiveness;
        self.sensible_cooling_100 = effectiveness;
        self.sensible_cooling_75 = effectiveness;
    }

    pub fn set_latent(&mut self, effectiveness: f64) {
        self.latent_heating_100 = effectiveness;
        self.latent_heating_75 = effectiveness;
        self.latent_cooling_100 = effectiveness;
        self.latent_cooling_75 = effectiveness;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HumidifierSpec {
    pub rated_capacity: Capacity,
    pub rated_power: Capacity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaporativeCoolerSpec {
    pub effectiveness: f64,
    pub recirculating_pump_power_w: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentKind {
    Pump(PumpSpec),
    Boiler(BoilerSpec),
    Chiller(ChillerSpec),
    HeatRejection(HeatRejectionSpec),
    District(DistrictSpec),
    PlantHeatPump(PlantHeatPumpSpec),
    FluidHeatExchanger(FluidHeatExchangerSpec),
    TemperatureSource(TemperatureSourceSpec),
    Pipe,
    HeatingCoil(HeatingCoilSpec),
    CoolingCoil(CoolingCoilSpec),
    Fan(FanSpec),
    AirHeatRecovery(HeatRecoverySpec),
    Humidifier(HumidifierSpec),
    EvaporativeCooler(EvaporativeCoolerSpec),
    OutdoorAirMixer,
}

impl EquipmentKind {
    /// Object class in the target model.
    pub fn class(&self) -> &'static str {
        match self {
            EquipmentKind::Pump(p) => match p.speed {
                PumpSpeed::Constant => "Pump:ConstantSpeed",
                PumpSpeed::Variable => "Pump:VariableSpeed",
            },
            EquipmentKind::Boiler(_) => "Boiler:HotWater",
            EquipmentKind::Chiller(_) => "Chiller:Electric:EIR",
            EquipmentKind::HeatRejection(h) => h.kind.class(),
            EquipmentKind::District(d) => d.class,
            EquipmentKind::PlantHeatPump(h) => match h.mode {
                HeatPumpMode::Heating => "HeatPump:PlantLoop:EIR:Heating",
                HeatPumpMode::Cooling => "HeatPump:PlantLoop:EIR:Cooling",
            },
            EquipmentKind::FluidHeatExchanger(_) => "HeatExchanger:FluidToFluid",
            EquipmentKind::TemperatureSource(_) => "PlantComponent:TemperatureSource",
            EquipmentKind::Pipe => "Pipe:Adiabatic",
            EquipmentKind::HeatingCoil(c) => match c.source {
                HeatingSource::HotWater(_) => "Coil:Heating:Water",
                HeatingSource::HotWaterBaseboard => "Coil:Heating:Water:Baseboard",
                HeatingSource::Fuel { .. } => "Coil:Heating:Fuel",
                HeatingSource::Electric { .. } => "Coil:Heating:Electric",
                HeatingSource::DxHeatPump { .. } => "Coil:Heating:DX:SingleSpeed",
                HeatingSource::WaterToAirHeatPump { .. } => {
                    "Coil:Heating:WaterToAirHeatPump:EquationFit"
                }
            },
            EquipmentKind::CoolingCoil(c) => match c.source {
                CoolingSource::ChilledWater(_) => "Coil:Cooling:Water",
                CoolingSource::DxSingleSpeed { .. } => "Coil:Cooling:DX:SingleSpeed",
                CoolingSource::DxTwoSpeed { .. } => "Coil:Cooling:DX:TwoSpeed",
                CoolingSource::WaterToAirHeatPump { .. } => {
                    "Coil:Cooling:WaterToAirHeatPump:EquationFit"
                }
            },
            EquipmentKind::Fan(f) => match f.kind {
                FanKind::ConstantVolume => "Fan:ConstantVolume",
                FanKind::VariableVolume => "Fan:VariableVolume",
                FanKind::OnOff => "Fan:OnOff",
            },
            EquipmentKind::AirHeatRecovery(_) => "HeatExchanger:AirToAir:SensibleAndLatent",
            EquipmentKind::Humidifier(_) => "Humidifier:Steam:Electric",
            EquipmentKind::EvaporativeCooler(_) => "EvaporativeCooler:Direct:ResearchSpecial",
            EquipmentKind::OutdoorAirMixer => "OutdoorAir:Mixer",
        }
    }

    /// True for coils that need a plant loop on their water side.
    pub fn needs_plant_water(&self) -> bool {
        match self {
            EquipmentKind::HeatingCoil(c) => matches!(
                c.source,
                HeatingSource::HotWater(_)
                    | HeatingSource::HotWaterBaseboard
                    | HeatingSource::WaterToAirHeatPump { .. }
            ),
            EquipmentKind::CoolingCoil(c) => matches!(
                c.source,
                CoolingSource::ChilledWater(_) | CoolingSource::WaterToAirHeatPump { .. }
            ),
            _ => false,
        }
    }
}

/// Which loop side or air stream a placement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attachment {
    PlantSupply(LoopId),
    PlantDemand(LoopId),
    AirSupply(AirLoopId),
    OutdoorAirStream(AirLoopId),
    ReliefStream(AirLoopId),
}

/// One graph component standing for a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub comp: CompId,
    pub at: Attachment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: EquipId,
    pub name: String,
    pub kind: EquipmentKind,
    pub placements: Vec<Placement>,
    pub availability: Option<ScheduleId>,
    /// Zone-level unit this equipment is a subcomponent of.
    pub container: Option<ZoneHvacId>,
}

impl Equipment {
    pub fn class(&self) -> &'static str {
        self.kind.class()
    }

    pub fn placement(&self, at: Attachment) -> Option<CompId> {
        self.placements.iter().find(|p| p.at == at).map(|p| p.comp)
    }

    /// Plant loop whose supply side holds this equipment.
    pub fn supplying_loop(&self) -> Option<LoopId> {
        self.placements.iter().find_map(|p| match p.at {
            Attachment::PlantSupply(id) => Some(id),
            _ => None,
        })
    }

    /// Plant loop whose demand side holds this equipment.
    pub fn demand_loop(&self) -> Option<LoopId> {
        self.placements.iter().find_map(|p| match p.at {
            Attachment::PlantDemand(id) => Some(id),
            _ => None,
        })
    }
}
