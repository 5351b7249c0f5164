//! Integration tests for equipment factories against a live model.

use hs_components::{
    BoilerParams, ChillerParams, CoolingCoilParams, DesignTemperature, DesignTemperatureTable,
    EquipmentFactory, FanArchetype, FanParams, HeatingCoilParams, PumpParams, Vintage,
};
use hs_core::{delta_r_to_k, f_to_c};
use hs_model::{
    CondenserType, EquipmentKind, FuelType, HeatingSource, LoopRole, LoopType, Model, PlantSizing,
};

fn hot_water_model() -> (Model, hs_core::LoopId) {
    let mut model = Model::new();
    let hw = model.add_plant_loop(
        "Hot Water Loop",
        LoopRole::HotWater,
        PlantSizing::new(LoopType::Heating, f_to_c(180.0), delta_r_to_k(20.0)),
    );
    (model, hw)
}

#[test]
fn supply_equipment_and_coils_share_a_loop() {
    let (mut model, hw) = hot_water_model();
    let pump = PumpParams::variable(720.0).add(&mut model, "Hot Water Loop Pump").unwrap();
    let boiler = BoilerParams::new(FuelType::NaturalGas, Vintage::Ashrae2019, f_to_c(180.0))
        .add(&mut model, "Hot Water Loop Boiler")
        .unwrap();
    model.add_supply_inlet_equipment(hw, pump).unwrap();
    model.add_supply_branch(hw, &[boiler]).unwrap();

    let temps = DesignTemperatureTable::standard();
    for zone in ["Z1", "Z2"] {
        HeatingCoilParams::water_reheat(Some(hw), &temps)
            .add(&mut model, &format!("{zone} Reheat Coil"))
            .unwrap();
    }

    let plant = model.plant_loop(hw).unwrap();
    assert_eq!(plant.demand.branches.len(), 2);
    assert_eq!(plant.supply_equipment().collect::<Vec<_>>(), vec![pump, boiler]);
    assert_eq!(model.loop_pumps(hw).unwrap(), vec![pump]);
}

#[test]
fn reheat_coil_is_rated_to_zone_heating_temperature() {
    let (mut model, hw) = hot_water_model();
    let mut temps = DesignTemperatureTable::single_zone_packaged();
    temps.set_fahrenheit(DesignTemperature::ZoneHeating, 110.0).unwrap();
    let coil = HeatingCoilParams::water_reheat(Some(hw), &temps)
        .add(&mut model, "Reheat Coil")
        .unwrap();
    let EquipmentKind::HeatingCoil(spec) = &model.equipment(coil).unwrap().kind else {
        panic!("expected a heating coil");
    };
    let HeatingSource::HotWater(design) = spec.source else {
        panic!("expected a water coil");
    };
    assert!((design.outlet_air_c - f_to_c(110.0)).abs() < 1e-9);
}

#[test]
fn water_cooled_chiller_rejects_to_condenser_demand() {
    let mut model = Model::new();
    let cw = model.add_plant_loop(
        "Condenser Water Loop",
        LoopRole::CondenserWater,
        PlantSizing::new(LoopType::Condenser, f_to_c(85.0), delta_r_to_k(10.0)),
    );
    let chiller = ChillerParams::new(CondenserType::WaterCooled, Vintage::Ashrae2019, f_to_c(44.0))
        .with_condenser_loop(cw)
        .add(&mut model, "Chiller")
        .unwrap();
    assert_eq!(model.equipment(chiller).unwrap().demand_loop(), Some(cw));
    assert_eq!(model.equipment(chiller).unwrap().class(), "Chiller:Electric:EIR");
}

#[test]
fn names_are_made_unique() {
    let mut model = Model::new();
    let a = CoolingCoilParams::dx().add(&mut model, "DX Coil").unwrap();
    let b = CoolingCoilParams::dx().add(&mut model, "DX Coil").unwrap();
    assert_eq!(model.equipment(a).unwrap().name, "DX Coil");
    assert_eq!(model.equipment(b).unwrap().name, "DX Coil 1");

    let fan = FanParams::new(FanArchetype::UnitHeater, Vintage::Ashrae2019)
        .add(&mut model, "Unit Heater Fan")
        .unwrap();
    assert_eq!(model.equipment(fan).unwrap().class(), "Fan:OnOff");
}
