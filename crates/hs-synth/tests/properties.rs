//! Structural properties of synthesized systems.

use hs_components::DualTemperature;
use hs_core::ZoneId;
use hs_model::{LoopRole, Model, TerminalKind, VAV_MIN_FLOW_FRACTION, ZoneSpec};
use hs_synth::{ArchetypeOptions, Fuel, SystemType, synthesize};
use proptest::prelude::*;

fn zones(model: &mut Model, n: usize, outdoor_air: f64) -> Vec<ZoneId> {
    (1..=n)
        .map(|i| {
            model
                .add_zone(ZoneSpec::new(format!("Zone {i}")).with_outdoor_air(outdoor_air))
                .unwrap()
        })
        .collect()
}

fn loops_with_role(model: &Model, role: LoopRole) -> usize {
    model.plant_loops().iter().filter(|l| l.role == role).count()
}

#[test]
fn repeated_synthesis_shares_plant_loops() {
    let mut model = Model::new();
    let z = zones(&mut model, 2, 0.05);
    let options = ArchetypeOptions::default();
    for _ in 0..2 {
        let built = synthesize(
            &mut model,
            &SystemType::VavReheat,
            Some(Fuel::NaturalGas),
            Some(Fuel::NaturalGas),
            Some(Fuel::Electricity),
            &z,
            &options,
        )
        .unwrap();
        assert!(built);
    }

    assert_eq!(loops_with_role(&model, LoopRole::HotWater), 1);
    assert_eq!(loops_with_role(&model, LoopRole::ChilledWater), 1);
    assert_eq!(loops_with_role(&model, LoopRole::CondenserWater), 1);
    assert_eq!(model.air_loops().len(), 2);
}

#[test]
fn fan_coils_after_vav_reuse_the_same_plant() {
    let mut model = Model::new();
    let z = zones(&mut model, 2, 0.05);
    let options = ArchetypeOptions::default();
    let fuels = (Some(Fuel::NaturalGas), Some(Fuel::NaturalGas), Some(Fuel::Electricity));
    for system in [SystemType::VavReheat, SystemType::FanCoil] {
        assert!(synthesize(&mut model, &system, fuels.0, fuels.1, fuels.2, &z, &options).unwrap());
    }
    assert_eq!(model.plant_loops().len(), 3);
}

#[test]
fn vav_reheat_has_one_fan_and_coil_set_and_a_terminal_per_zone() {
    let mut model = Model::new();
    let z = zones(&mut model, 4, 0.05);
    assert!(
        synthesize(
            &mut model,
            &SystemType::VavReheat,
            Some(Fuel::NaturalGas),
            Some(Fuel::Electricity),
            Some(Fuel::Electricity),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap()
    );

    let air_loop = &model.air_loops()[0];
    let supply: Vec<_> = air_loop.supply.equipment().collect();
    assert!(supply.contains(&air_loop.supply_fan.unwrap()));
    assert!(supply.contains(&air_loop.heating_coil.unwrap()));
    assert!(supply.contains(&air_loop.cooling_coil.unwrap()));
    let fans = supply
        .iter()
        .filter(|&&e| model.equipment(e).unwrap().class().starts_with("Fan:"))
        .count();
    assert_eq!(fans, 1);

    assert_eq!(air_loop.terminals.len(), z.len());
    for &t in &air_loop.terminals {
        let terminal = model.terminal(t).unwrap();
        assert_eq!(terminal.kind, TerminalKind::VavReheat);
        assert_eq!(terminal.min_flow_fraction, VAV_MIN_FLOW_FRACTION);
        assert!(terminal.reheat_coil.is_some());
    }
    let mut served: Vec<_> = air_loop.terminals.iter().map(|&t| model.terminal(t).unwrap().zone).collect();
    served.dedup();
    assert_eq!(served, z);
}

#[test]
fn doas_for_zones_without_outdoor_air_builds_nothing() {
    let mut model = Model::new();
    let z = zones(&mut model, 3, 0.0);
    let built = synthesize(
        &mut model,
        &SystemType::Doas,
        Some(Fuel::NaturalGas),
        None,
        Some(Fuel::Electricity),
        &z,
        &ArchetypeOptions::default(),
    )
    .unwrap();
    assert!(!built);
    assert!(model.air_loops().is_empty());
    assert!(model.plant_loops().is_empty());
}

#[test]
fn refused_heating_fuel_leaves_no_plant_behind() {
    let systems = [
        SystemType::FanCoil,
        SystemType::VavReheat,
        SystemType::PvavReheat,
        SystemType::PszAc,
        SystemType::Doas,
    ];
    for system in systems {
        for cool in [Fuel::Electricity, Fuel::DistrictCooling] {
            let mut model = Model::new();
            let z = zones(&mut model, 2, 0.05);
            let built = synthesize(
                &mut model,
                &system,
                Some(Fuel::DistrictCooling),
                None,
                Some(cool),
                &z,
                &ArchetypeOptions::default(),
            )
            .unwrap();
            assert!(!built, "{system} heated by district cooling");
            let names: Vec<_> = model.plant_loops().iter().map(|l| l.name.as_str()).collect();
            assert!(names.is_empty(), "{system} with {cool:?} cooling left {names:?}");
            assert!(model.air_loops().is_empty());
        }
    }
}

#[test]
fn refused_zone_heating_fuel_leaves_no_plant_behind() {
    let mut model = Model::new();
    let z = zones(&mut model, 2, 0.05);
    let built = synthesize(
        &mut model,
        &SystemType::VavReheat,
        Some(Fuel::NaturalGas),
        Some(Fuel::DistrictCooling),
        Some(Fuel::Electricity),
        &z,
        &ArchetypeOptions::default(),
    )
    .unwrap();
    assert!(!built);
    assert!(model.plant_loops().is_empty());
}

#[test]
fn compound_system_without_outdoor_air_builds_no_zone_units() {
    let mut model = Model::new();
    let z = zones(&mut model, 3, 0.0);
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
    assert!(!built);
    assert!(model.zone_hvac_units().is_empty());
    assert!(model.air_loops().is_empty());
}

#[test]
fn compound_system_rolls_back_the_doas_when_the_zone_units_are_refused() {
    let mut model = Model::new();
    let z = zones(&mut model, 2, 0.05);
    let built = synthesize(
        &mut model,
        &SystemType::WindowAc.with_doas(),
        Some(Fuel::NaturalGas),
        None,
        Some(Fuel::DistrictCooling),
        &z,
        &ArchetypeOptions::default(),
    )
    .unwrap();
    assert!(!built);
    assert!(model.air_loops().is_empty());
    assert!(model.plant_loops().is_empty());
    assert!(model.zone_hvac_units().is_empty());
    assert_eq!(model.zones().len(), 2);
}

#[test]
fn psz_builds_one_air_loop_per_zone() {
    for system in [SystemType::PszAc, SystemType::PszVav] {
        for n in [1, 3, 7] {
            let mut model = Model::new();
            let z = zones(&mut model, n, 0.05);
            assert!(
                synthesize(
                    &mut model,
                    &system,
                    Some(Fuel::NaturalGas),
                    None,
                    Some(Fuel::Electricity),
                    &z,
                    &ArchetypeOptions::default(),
                )
                .unwrap()
            );
            assert_eq!(model.air_loops().len(), n, "{system} with {n} zones");
            for air_loop in model.air_loops() {
                assert_eq!(air_loop.terminals.len(), 1);
            }
        }
    }
}

proptest! {
    #[test]
    fn design_temperatures_round_trip(f in -100.0f64..400.0) {
        let c = DualTemperature::from_fahrenheit(f).celsius();
        let back = DualTemperature::from_celsius(c).fahrenheit();
        prop_assert!((back - f).abs() < 1e-6);
    }

    #[test]
    fn psz_cardinality_holds_for_any_zone_count(n in 1usize..12) {
        let mut model = Model::new();
        let z = zones(&mut model, n, 0.02);
        let built = synthesize(
            &mut model,
            &SystemType::PszAc,
            Some(Fuel::Electricity),
            None,
            Some(Fuel::Electricity),
            &z,
            &ArchetypeOptions::default(),
        )
        .unwrap();
        prop_assert!(built);
        prop_assert_eq!(model.air_loops().len(), n);
    }
}
