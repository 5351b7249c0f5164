//! Design supply-air temperatures.
//!
//! The table is authored in °F; every entry also carries its °C value. The
//! only way to change an entry is through a setter that recomputes the other
//! unit, so the pair cannot drift apart.

use hs_core::{HsResult, c_to_f, ensure_finite, f_to_c};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DesignTemperature {
    Preheat,
    Precool,
    Heating,
    Cooling,
    ZoneHeating,
    ZoneCooling,
}

impl DesignTemperature {
    pub const ALL: [DesignTemperature; 6] = [
        DesignTemperature::Preheat,
        DesignTemperature::Precool,
        DesignTemperature::Heating,
        DesignTemperature::Cooling,
        DesignTemperature::ZoneHeating,
        DesignTemperature::ZoneCooling,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A temperature held in both °F and °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DualTemperature {
    f: f64,
    c: f64,
}

impl DualTemperature {
    pub fn from_fahrenheit(f: f64) -> Self {
        Self { f, c: f_to_c(f) }
    }

    pub fn from_celsius(c: f64) -> Self {
        Self { f: c_to_f(c), c }
    }

    pub fn fahrenheit(self) -> f64 {
        self.f
    }

    pub fn celsius(self) -> f64 {
        self.c
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignTemperatureTable {
    entries: [DualTemperature; 6],
}

impl Default for DesignTemperatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DesignTemperatureTable {
    /// Preheat 45 °F, precool/heating/cooling 55 °F, zone heating 104 °F,
    /// zone cooling 55 °F.
    pub fn standard() -> Self {
        let f = DualTemperature::from_fahrenheit;
        Self {
            entries: [f(45.0), f(55.0), f(55.0), f(55.0), f(104.0), f(55.0)],
        }
    }

    /// Table for packaged single-zone systems, whose reheat-limited equipment
    /// needs a hotter zone heating supply temperature (122 °F).
    pub fn single_zone_packaged() -> Self {
        let mut table = Self::standard();
        table.entries[DesignTemperature::ZoneHeating.index()] = DualTemperature::from_fahrenheit(122.0);
        table
    }

    pub fn get(&self, which: DesignTemperature) -> DualTemperature {
        self.entries[which.index()]
    }

    pub fn fahrenheit(&self, which: DesignTemperature) -> f64 {
        self.get(which).fahrenheit()
    }

    pub fn celsius(&self, which: DesignTemperature) -> f64 {
        self.get(which).celsius()
    }

    pub fn set_fahrenheit(&mut self, which: DesignTemperature, f: f64) -> HsResult<()> {
        let f = ensure_finite(f, "design temperature")?;
        self.entries[which.index()] = DualTemperature::from_fahrenheit(f);
        Ok(())
    }

    pub fn set_celsius(&mut self, which: DesignTemperature, c: f64) -> HsResult<()> {
        let c = ensure_finite(c, "design temperature")?;
        self.entries[which.index()] = DualTemperature::from_celsius(c);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (DesignTemperature, DualTemperature)> + '_ {
        DesignTemperature::ALL.into_iter().map(|w| (w, self.get(w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn consistent(t: DualTemperature) -> bool {
        (f_to_c(t.fahrenheit()) - t.celsius()).abs() < 1e-9
    }

    #[test]
    fn standard_values() {
        let table = DesignTemperatureTable::standard();
        assert_eq!(table.fahrenheit(DesignTemperature::Preheat), 45.0);
        assert_eq!(table.fahrenheit(DesignTemperature::ZoneHeating), 104.0);
        assert!((table.celsius(DesignTemperature::ZoneHeating) - 40.0).abs() < 1e-9);
        assert!((table.celsius(DesignTemperature::Cooling) - 12.777_777_8).abs() < 1e-6);
        assert!(table.iter().all(|(_, t)| consistent(t)));
    }

    #[test]
    fn single_zone_override_keeps_units_in_step() {
        let table = DesignTemperatureTable::single_zone_packaged();
        assert_eq!(table.fahrenheit(DesignTemperature::ZoneHeating), 122.0);
        assert!((table.celsius(DesignTemperature::ZoneHeating) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_override_is_rejected() {
        let mut table = DesignTemperatureTable::standard();
        assert!(table.set_fahrenheit(DesignTemperature::Heating, f64::NAN).is_err());
        assert_eq!(table.fahrenheit(DesignTemperature::Heating), 55.0);
    }

    proptest! {
        #[test]
        fn fahrenheit_round_trip(f in -100.0f64..300.0) {
            let t = DualTemperature::from_fahrenheit(f);
            prop_assert!((c_to_f(t.celsius()) - f).abs() < 1e-6);
        }

        #[test]
        fn every_override_recomputes_celsius(
            idx in 0usize..6,
            f in -40.0f64..250.0,
            c in -40.0f64..120.0,
        ) {
            let which = DesignTemperature::ALL[idx];
            let mut table = DesignTemperatureTable::standard();
            table.set_fahrenheit(which, f).unwrap();
            prop_assert!(consistent(table.get(which)));
            table.set_celsius(which, c).unwrap();
            prop_assert!(consistent(table.get(which)));
            prop_assert!((table.celsius(which) - c).abs() < 1e-12);
        }
    }
}
