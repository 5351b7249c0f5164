//! hs-components: equipment factories for the HVAC topology synthesizer.
//!
//! Each factory is a small parameter struct implementing
//! [`EquipmentFactory`]. The factory validates its parameters, derives the
//! [`hs_model::EquipmentKind`] (performance curves, rated temperatures,
//! efficiencies by vintage) and adds the equipment to a model.
//!
//! # Example
//!
//! ```no_run
//! use hs_components::{EquipmentFactory, FanArchetype, FanParams, Vintage};
//! use hs_model::Model;
//!
//! let mut model = Model::new();
//! let fan = FanParams::new(FanArchetype::VavSupply, Vintage::Ashrae2019)
//!     .add(&mut model, "VAV Supply Fan")
//!     .unwrap();
//! assert_eq!(model.equipment(fan).unwrap().class(), "Fan:VariableVolume");
//! ```

pub mod coils;
pub mod common;
pub mod curves;
pub mod design_temps;
pub mod error;
pub mod fans;
pub mod heat_recovery;
pub mod plant;
pub mod pumps;
pub mod traits;
pub mod vintage;

pub use coils::{CoolingCoilParams, HeatingCoilParams};
pub use curves::{ChillerCurves, boiler_efficiency_curve, chiller_curves};
pub use design_temps::{DesignTemperature, DesignTemperatureTable, DualTemperature};
pub use error::{ComponentError, ComponentResult};
pub use fans::{FanArchetype, FanParams};
pub use heat_recovery::{HeatRecoveryParams, set_effectiveness};
pub use plant::{
    BoilerParams, ChillerParams, DistrictParams, EvaporativeCoolerParams,
    FluidHeatExchangerParams, HeatRejectionParams, HumidifierParams, PipeParams,
    PlantHeatPumpParams, TemperatureSourceParams,
};
pub use pumps::PumpParams;
pub use traits::EquipmentFactory;
pub use vintage::Vintage;
