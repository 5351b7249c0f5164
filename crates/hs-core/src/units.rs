// hs-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

/// Pascals per inch of water column (conventional, 4 °C).
pub const PA_PER_INH2O: f64 = 249.0889;

/// A pump or fan head given in inches of water column.
#[inline]
pub fn inh2o(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v * PA_PER_INH2O)
}

#[inline]
fn deg_f(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
fn deg_c(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Convert a °F reading to °C.
#[inline]
pub fn f_to_c(v: f64) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    deg_f(v).get::<degree_celsius>()
}

/// Convert a °C reading to °F.
#[inline]
pub fn c_to_f(v: f64) -> f64 {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    deg_c(v).get::<degree_fahrenheit>()
}

/// Convert a temperature difference in °R (= °F interval) to K.
#[inline]
pub fn delta_r_to_k(v: f64) -> f64 {
    use uom::si::temperature_interval::{degree_fahrenheit, kelvin};
    TempInterval::new::<degree_fahrenheit>(v).get::<kelvin>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uom::si::pressure::{kilopascal, pascal};

    #[test]
    fn reference_temperatures() {
        assert!((f_to_c(32.0)).abs() < 1e-9);
        assert!((f_to_c(212.0) - 100.0).abs() < 1e-9);
        assert!((c_to_f(-40.0) + 40.0).abs() < 1e-9);
        assert!((delta_r_to_k(18.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn head_conversion() {
        assert!((inh2o(1.0).get::<pascal>() - 249.0889).abs() < 1e-9);
        assert!((inh2o(4.0).get::<kilopascal>() - 0.996_355_6).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn fahrenheit_celsius_round_trip(f in -100.0f64..400.0) {
            prop_assert!((c_to_f(f_to_c(f)) - f).abs() < 1e-6);
        }

        #[test]
        fn rankine_interval_is_five_ninths_of_a_kelvin(r in 0.0f64..100.0) {
            prop_assert!((delta_r_to_k(r) * 1.8 - r).abs() < 1e-9);
        }
    }
}
