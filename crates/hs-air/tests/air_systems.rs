//! Air systems wired to real plant loops.

use hs_air::{
    AirCooling, AirHeating, DoasConfig, FanCoilConfig, VavConfig, VavTerminal, add_doas,
    add_fan_coils, add_vav,
};
use hs_core::ZoneId;
use hs_model::{Model, ZoneSpec};
use hs_plant::{
    ChilledWaterCooling, ChilledWaterLoopConfig, CondenserWaterLoopConfig, CoolingSource,
    HotWaterLoopConfig, get_or_add_chilled_water_loop, get_or_add_condenser_water_loop,
    get_or_add_hot_water_loop,
};
use proptest::prelude::*;

fn office_zones(model: &mut Model, n: usize) -> Vec<ZoneId> {
    (1..=n)
        .map(|i| {
            model
                .add_zone(ZoneSpec::new(format!("Office {i}")).with_outdoor_air(0.05))
                .unwrap()
        })
        .collect()
}

#[test]
fn water_vav_reheat_serves_every_zone_from_plant_loops() {
    let mut model = Model::new();
    let zones = office_zones(&mut model, 3);
    let hw = get_or_add_hot_water_loop(&mut model, &HotWaterLoopConfig::default()).unwrap();
    let cw = get_or_add_condenser_water_loop(&mut model, &CondenserWaterLoopConfig::default()).unwrap();
    let chw = get_or_add_chilled_water_loop(
        &mut model,
        &ChilledWaterLoopConfig {
            condenser_loop: Some(cw),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    let config = VavConfig {
        heating: Some(AirHeating::HotWater(hw)),
        cooling: AirCooling::ChilledWater(chw),
        terminal: VavTerminal::Reheat(AirHeating::HotWater(hw)),
        ..VavConfig::default()
    };
    let air = add_vav(&mut model, &zones, &config).unwrap();

    let air_loop = model.air_loop(air).unwrap();
    assert!(air_loop.supply_fan.is_some());
    assert!(air_loop.heating_coil.is_some());
    assert!(air_loop.cooling_coil.is_some());
    assert_eq!(air_loop.terminals.len(), zones.len());

    // main heating coil + one reheat coil per zone, plus the bypass
    let hw_branches = &model.plant_loop(hw).unwrap().demand.branches;
    assert_eq!(hw_branches.len(), 1 + zones.len() + 1);
    model.topology().unwrap();
}

#[test]
fn air_cooled_fan_coils_share_the_chilled_water_loop() {
    let mut model = Model::new();
    let zones = office_zones(&mut model, 2);
    let chw = get_or_add_chilled_water_loop(
        &mut model,
        &ChilledWaterLoopConfig {
            source: CoolingSource::Chillers {
                condenser: ChilledWaterCooling::AirCooled.condenser(),
                count: 1,
            },
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    let units = add_fan_coils(&mut model, &zones, chw, &FanCoilConfig::default()).unwrap();
    assert_eq!(units.len(), 2);
    assert!(model.plant_loops().iter().all(|l| l.name != "Condenser Water Loop"));
}

#[test]
fn doas_with_vav_keeps_ventilation_on_the_doas() {
    let mut model = Model::new();
    let zones = office_zones(&mut model, 2);
    let doas = add_doas(&mut model, &zones, &DoasConfig::default()).unwrap().unwrap();
    let vav = add_vav(
        &mut model,
        &zones,
        &VavConfig {
            outdoor_air: false,
            ..VavConfig::default()
        },
    )
    .unwrap();

    assert!(model.air_loop(doas).unwrap().outdoor_air.is_some());
    assert!(model.air_loop(vav).unwrap().outdoor_air.is_none());
    for &z in &zones {
        assert_eq!(model.zone(z).unwrap().terminals().count(), 2);
    }
}

proptest! {
    #[test]
    fn terminals_carry_the_configured_minimum_flow(fraction in 0.0f64..=1.0) {
        let mut model = Model::new();
        let zones = office_zones(&mut model, 2);
        let config = VavConfig {
            min_flow_fraction: fraction,
            ..VavConfig::default()
        };
        let air = add_vav(&mut model, &zones, &config).unwrap();
        for &t in &model.air_loop(air).unwrap().terminals {
            prop_assert_eq!(model.terminal(t).unwrap().min_flow_fraction, fraction);
        }
    }

    #[test]
    fn out_of_range_minimum_flow_is_rejected(fraction in 1.0001f64..10.0) {
        let mut model = Model::new();
        let zones = office_zones(&mut model, 1);
        let config = VavConfig {
            min_flow_fraction: fraction,
            ..VavConfig::default()
        };
        prop_assert!(add_vav(&mut model, &zones, &config).is_err());
    }
}
