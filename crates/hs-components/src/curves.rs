//! Reference performance curve sets.

use hs_model::{CondenserType, Curve, CurveForm};

use crate::error::ComponentResult;

/// Part-load power coefficients of a variable-speed pump.
pub const VARIABLE_SPEED_PUMP_PART_LOAD: [f64; 4] = [0.0, 0.0216, -0.0325, 1.0095];

/// Part-load power coefficients of a multi-zone VAV fan with static pressure
/// reset.
pub const VAV_FAN_PART_LOAD: [f64; 5] = [0.040_759_894, 0.088_044_97, -0.072_926_12, 0.943_739_823, 0.0];

/// Part-load power coefficients of a single-zone variable-speed fan.
pub const SINGLE_ZONE_FAN_PART_LOAD: [f64; 5] = [0.027_827_882, 0.026_583_195, -0.087_068_7, 1.030_919_75, 0.0];

/// Capacity, EIR and part-load EIR curves of an electric chiller.
#[derive(Debug, Clone, PartialEq)]
pub struct ChillerCurves {
    pub capacity: Curve,
    pub eir: Curve,
    pub eir_part_load: Curve,
}

pub fn chiller_curves(condenser: CondenserType) -> ComponentResult<ChillerCurves> {
    let curves = match condenser {
        CondenserType::WaterCooled => ChillerCurves {
            capacity: Curve::new(
                "Water Cooled Chiller CapFT",
                CurveForm::Biquadratic,
                &[0.257_896, 0.038_901_6, -0.000_217_08, 0.046_868_4, -0.000_942_84, -0.000_343_44],
                (5.0, 10.0),
            )?
            .with_y_range(24.0, 35.0),
            eir: Curve::new(
                "Water Cooled Chiller EIRFT",
                CurveForm::Biquadratic,
                &[0.933_884, -0.058_212, 0.004_500_36, 0.002_43, 0.000_486, -0.001_215],
                (5.0, 10.0),
            )?
            .with_y_range(24.0, 35.0),
            eir_part_load: Curve::new(
                "Water Cooled Chiller EIRFPLR",
                CurveForm::Quadratic,
                &[0.222_903, 0.313_387, 0.463_710],
                (0.0, 1.0),
            )?,
        },
        CondenserType::AirCooled | CondenserType::EvaporativelyCooled => ChillerCurves {
            capacity: Curve::new(
                "Air Cooled Chiller CapFT",
                CurveForm::Biquadratic,
                &[1.043_382_5, 0.040_707_3, 0.000_450_6, -0.004_151_4, -0.000_088_6, -0.000_346_7],
                (5.0, 10.0),
            )?
            .with_y_range(24.0, 52.0),
            eir: Curve::new(
                "Air Cooled Chiller EIRFT",
                CurveForm::Biquadratic,
                &[0.596_191_5, -0.009_949_6, 0.000_788_8, 0.000_450_6, 0.000_487_5, -0.000_762_3],
                (5.0, 10.0),
            )?
            .with_y_range(24.0, 52.0),
            eir_part_load: Curve::new(
                "Air Cooled Chiller EIRFPLR",
                CurveForm::Quadratic,
                &[0.141, 0.655, 0.204],
                (0.0, 1.0),
            )?,
        },
    };
    Ok(curves)
}

/// Boiler efficiency as a function of part-load ratio.
pub fn boiler_efficiency_curve() -> ComponentResult<Curve> {
    Ok(Curve::new(
        "Boiler Efficiency",
        CurveForm::Quadratic,
        &[0.97, 0.0633, -0.0333],
        (0.0, 1.0),
    )?)
}
