//! Plant-side equipment factories: heat sources and sinks, heat exchangers
//! and pipes, plus the air-side humidifier and evaporative cooler that share
//! their autosized-capacity conventions.

use hs_core::{LoopId, NodeId, ScheduleId, f_to_c};
use hs_model::{
    BoilerFlowMode, BoilerSpec, Capacity, ChillerSpec, ComponentOverride, CompressorType,
    CondenserType, DistrictService, DistrictSpec, EquipmentKind, EvaporativeCoolerSpec,
    FluidHeatExchangerSpec, FuelType, HeatExchangerControl, HeatPumpMode, HeatPumpSource,
    HeatRejectionKind, HeatRejectionSpec, HumidifierSpec, Model, PlantHeatPumpSpec,
    TemperatureSourceSpec,
};

use crate::common::{check_efficiency, check_finite, check_positive};
use crate::curves::{boiler_efficiency_curve, chiller_curves};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::EquipmentFactory;
use crate::vintage::Vintage;

#[derive(Debug, Clone, PartialEq)]
pub struct BoilerParams {
    pub fuel: FuelType,
    pub efficiency: f64,
    pub design_water_outlet_c: f64,
    pub flow_mode: BoilerFlowMode,
}

impl BoilerParams {
    pub fn new(fuel: FuelType, vintage: Vintage, design_water_outlet_c: f64) -> Self {
        let efficiency = match fuel {
            FuelType::Electricity => 1.0,
            _ => vintage.boiler_efficiency(),
        };
        Self {
            fuel,
            efficiency,
            design_water_outlet_c,
            flow_mode: BoilerFlowMode::LeavingSetpointModulated,
        }
    }
}

impl EquipmentFactory for BoilerParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        if matches!(self.fuel, FuelType::DistrictHeating | FuelType::DistrictCooling) {
            return Err(ComponentError::NotSupported {
                what: "district energy is a district object, not a boiler",
            });
        }
        let curve = match self.fuel {
            FuelType::Electricity => None,
            _ => Some(boiler_efficiency_curve()?),
        };
        Ok(EquipmentKind::Boiler(BoilerSpec {
            fuel: self.fuel,
            nominal_efficiency: check_efficiency(self.efficiency, "boiler efficiency")?,
            capacity: Capacity::Autosize,
            design_water_outlet_c: check_finite(self.design_water_outlet_c, "boiler outlet temperature")?,
            max_leaving_water_c: f_to_c(203.0),
            flow_mode: self.flow_mode,
            efficiency_curve: curve,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChillerParams {
    pub condenser: CondenserType,
    pub compressor: CompressorType,
    pub cop: f64,
    pub leaving_chilled_water_c: f64,
    /// Design entering condenser fluid; 35 °C for air-cooled chillers.
    pub entering_condenser_fluid_c: f64,
    /// Condenser loop whose demand side the chiller rejects heat to.
    pub condenser_loop: Option<LoopId>,
}

impl ChillerParams {
    pub fn new(condenser: CondenserType, vintage: Vintage, leaving_chilled_water_c: f64) -> Self {
        let (compressor, entering) = match condenser {
            CondenserType::WaterCooled => (CompressorType::Centrifugal, 29.4),
            _ => (CompressorType::Scroll, 35.0),
        };
        Self {
            condenser,
            compressor,
            cop: vintage.chiller_cop(condenser),
            leaving_chilled_water_c,
            entering_condenser_fluid_c: entering,
            condenser_loop: None,
        }
    }

    pub fn with_condenser_loop(mut self, id: LoopId) -> Self {
        self.condenser_loop = Some(id);
        self
    }
}

impl EquipmentFactory for ChillerParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        if self.condenser != CondenserType::WaterCooled && self.condenser_loop.is_some() {
            return Err(ComponentError::InvalidArg {
                what: "only water-cooled chillers connect to a condenser loop",
            });
        }
        let curves = chiller_curves(self.condenser)?;
        Ok(EquipmentKind::Chiller(ChillerSpec {
            condenser: self.condenser,
            compressor: self.compressor,
            reference_cop: check_positive(self.cop, "chiller COP")?,
            capacity: Capacity::Autosize,
            leaving_chilled_water_c: check_finite(self.leaving_chilled_water_c, "chilled water temperature")?,
            entering_condenser_fluid_c: check_finite(self.entering_condenser_fluid_c, "condenser temperature")?,
            capacity_curve: curves.capacity,
            eir_curve: curves.eir,
            eir_part_load_curve: curves.eir_part_load,
        }))
    }

    fn demand_loop(&self) -> Option<LoopId> {
        self.condenser_loop
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatRejectionParams {
    pub kind: HeatRejectionKind,
    pub design_approach_k: Option<f64>,
    pub design_range_k: Option<f64>,
    pub design_inlet_wet_bulb_c: Option<f64>,
}

impl HeatRejectionParams {
    pub fn new(kind: HeatRejectionKind) -> Self {
        Self {
            kind,
            design_approach_k: None,
            design_range_k: None,
            design_inlet_wet_bulb_c: None,
        }
    }

    /// Rate a cooling tower at a design wet bulb, approach and range.
    pub fn rated(mut self, wet_bulb_c: f64, approach_k: f64, range_k: f64) -> Self {
        self.design_inlet_wet_bulb_c = Some(wet_bulb_c);
        self.design_approach_k = Some(approach_k);
        self.design_range_k = Some(range_k);
        self
    }
}

impl EquipmentFactory for HeatRejectionParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let approach = self
            .design_approach_k
            .map(|k| check_positive(k, "tower approach"))
            .transpose()?;
        let range = self
            .design_range_k
            .map(|k| check_positive(k, "tower range"))
            .transpose()?;
        let wet_bulb = self
            .design_inlet_wet_bulb_c
            .map(|c| check_finite(c, "tower inlet wet bulb"))
            .transpose()?;
        if approach.is_some() && !self.kind.is_cooling_tower() {
            return Err(ComponentError::NotSupported {
                what: "design approach applies to cooling towers only",
            });
        }
        Ok(EquipmentKind::HeatRejection(HeatRejectionSpec {
            kind: self.kind,
            design_approach_k: approach,
            design_range_k: range,
            design_inlet_wet_bulb_c: wet_bulb,
            capacity: Capacity::Autosize,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistrictParams {
    pub service: DistrictService,
}

impl DistrictParams {
    pub fn heating() -> Self {
        Self {
            service: DistrictService::Heating,
        }
    }

    pub fn cooling() -> Self {
        Self {
            service: DistrictService::Cooling,
        }
    }
}

impl EquipmentFactory for DistrictParams {
    fn kind(&self, model: &Model) -> ComponentResult<EquipmentKind> {
        let class = match self.service {
            DistrictService::Heating => model.schema_version().district_heating_class(),
            DistrictService::Cooling => "DistrictCooling",
        };
        Ok(EquipmentKind::District(DistrictSpec {
            service: self.service,
            class,
            capacity: Capacity::Autosize,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantHeatPumpParams {
    pub source: HeatPumpSource,
    pub mode: HeatPumpMode,
    pub cop: f64,
}

impl PlantHeatPumpParams {
    pub fn air_source_heating() -> Self {
        Self {
            source: HeatPumpSource::Air,
            mode: HeatPumpMode::Heating,
            cop: 3.0,
        }
    }
}

impl EquipmentFactory for PlantHeatPumpParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        Ok(EquipmentKind::PlantHeatPump(PlantHeatPumpSpec {
            source: self.source,
            mode: self.mode,
            reference_cop: check_positive(self.cop, "heat pump COP")?,
            capacity: Capacity::Autosize,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FluidHeatExchangerParams {
    pub control: HeatExchangerControl,
    pub min_temperature_difference_k: f64,
    pub component_override: Option<ComponentOverride>,
    /// Loop on the demand side of the exchanger, when it is a plant coupling.
    pub demand_loop: Option<LoopId>,
}

impl FluidHeatExchangerParams {
    pub fn new(control: HeatExchangerControl) -> Self {
        Self {
            control,
            min_temperature_difference_k: 0.0,
            component_override: None,
            demand_loop: None,
        }
    }

    /// Interlock with a component: the exchanger runs when the loop feeding
    /// `demand_inlet` is colder than the one at `supply_inlet`.
    pub fn with_override(mut self, supply_inlet: NodeId, demand_inlet: NodeId) -> Self {
        self.component_override = Some(ComponentOverride {
            supply_inlet,
            demand_inlet,
        });
        self
    }

    pub fn on_demand_of(mut self, id: LoopId) -> Self {
        self.demand_loop = Some(id);
        self
    }
}

impl EquipmentFactory for FluidHeatExchangerParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let needs_override = self.control == HeatExchangerControl::CoolingSetpointOnOffWithComponentOverride;
        if needs_override != self.component_override.is_some() {
            return Err(ComponentError::InvalidArg {
                what: "component override nodes go with the component-override control mode",
            });
        }
        let dt = check_finite(self.min_temperature_difference_k, "heat exchanger temperature difference")?;
        Ok(EquipmentKind::FluidHeatExchanger(FluidHeatExchangerSpec {
            control: self.control,
            min_temperature_difference_k: dt,
            component_override: self.component_override,
            capacity: Capacity::Autosize,
        }))
    }

    fn demand_loop(&self) -> Option<LoopId> {
        self.demand_loop
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSourceParams {
    pub schedule: ScheduleId,
}

impl EquipmentFactory for TemperatureSourceParams {
    fn kind(&self, model: &Model) -> ComponentResult<EquipmentKind> {
        model.schedule(self.schedule)?;
        Ok(EquipmentKind::TemperatureSource(TemperatureSourceSpec {
            schedule: self.schedule,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipeParams;

impl EquipmentFactory for PipeParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        Ok(EquipmentKind::Pipe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HumidifierParams;

impl EquipmentFactory for HumidifierParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        Ok(EquipmentKind::Humidifier(HumidifierSpec {
            rated_capacity: Capacity::Autosize,
            rated_power: Capacity::Autosize,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaporativeCoolerParams {
    pub effectiveness: f64,
    pub recirculating_pump_power_w: f64,
}

impl Default for EvaporativeCoolerParams {
    fn default() -> Self {
        Self {
            effectiveness: 0.7,
            recirculating_pump_power_w: 60.0,
        }
    }
}

impl EquipmentFactory for EvaporativeCoolerParams {
    fn kind(&self, _model: &Model) -> ComponentResult<EquipmentKind> {
        let power = check_finite(self.recirculating_pump_power_w, "evaporative cooler pump power")?;
        if power < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "evaporative cooler pump power must be non-negative",
            });
        }
        Ok(EquipmentKind::EvaporativeCooler(EvaporativeCoolerSpec {
            effectiveness: check_efficiency(self.effectiveness, "evaporative cooler effectiveness")?,
            recirculating_pump_power_w: power,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::SchemaVersion;

    #[test]
    fn district_heating_class_follows_schema_version() {
        let old = Model::with_schema_version(SchemaVersion::new(3, 6, 0));
        let new = Model::with_schema_version(SchemaVersion::new(3, 7, 0));
        let EquipmentKind::District(a) = DistrictParams::heating().kind(&old).unwrap() else {
            panic!("expected district");
        };
        let EquipmentKind::District(b) = DistrictParams::heating().kind(&new).unwrap() else {
            panic!("expected district");
        };
        assert_eq!(a.class, "DistrictHeating");
        assert_eq!(b.class, "DistrictHeatingWater");
    }

    #[test]
    fn boiler_efficiency_tracks_vintage() {
        let model = Model::new();
        let EquipmentKind::Boiler(spec) = BoilerParams::new(FuelType::NaturalGas, Vintage::DoeRefPre1980, 82.2)
            .kind(&model)
            .unwrap()
        else {
            panic!("expected a boiler");
        };
        assert_eq!(spec.nominal_efficiency, 0.75);
        assert!(spec.efficiency_curve.is_some());
        assert!(BoilerParams::new(FuelType::DistrictHeating, Vintage::Ashrae2019, 82.2)
            .kind(&model)
            .is_err());
    }

    #[test]
    fn override_mode_requires_nodes() {
        let model = Model::new();
        let hx = FluidHeatExchangerParams::new(HeatExchangerControl::CoolingSetpointOnOffWithComponentOverride);
        assert!(hx.kind(&model).is_err());
        let n = NodeId::from_index(0);
        assert!(hx.with_override(n, n).kind(&model).is_ok());
    }

    #[test]
    fn air_cooled_chiller_cannot_take_condenser_loop() {
        let model = Model::new();
        let params = ChillerParams::new(CondenserType::AirCooled, Vintage::Ashrae2019, 6.7)
            .with_condenser_loop(LoopId::from_index(0));
        assert!(params.kind(&model).is_err());
    }
}
