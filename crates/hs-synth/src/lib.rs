//! hs-synth: prototype HVAC system synthesis.
//!
//! [`synthesize`] maps a [`SystemType`] and three fuel tags onto the shared
//! plant loops of `hs_plant` and one air system or zone equipment builder
//! of `hs_air`. [`apply_template`] sits on top of it: it translates a flat
//! [`EquipmentType`] identifier into one or two dispatcher calls, splits the
//! zones between the main system and auxiliary zone heat, and then enriches
//! the air loops it built (economizer, demand-controlled ventilation, heat
//! recovery, humidification, ventilation schedule).
//!
//! # Example
//!
//! ```no_run
//! use hs_model::{Model, ZoneSpec};
//! use hs_synth::{ArchetypeOptions, Fuel, SystemType, synthesize};
//!
//! let mut model = Model::new();
//! let zone = model.add_zone(ZoneSpec::new("Office").with_outdoor_air(0.1)).unwrap();
//! let built = synthesize(
//!     &mut model,
//!     &SystemType::VavReheat,
//!     Some(Fuel::NaturalGas),
//!     Some(Fuel::NaturalGas),
//!     Some(Fuel::Electricity),
//!     &[zone],
//!     &ArchetypeOptions::default(),
//! )
//! .unwrap();
//! assert!(built);
//! ```

pub mod dispatch;
pub mod fuel;
pub mod options;
pub mod system_type;
pub mod template;

pub use dispatch::{synthesize, synthesize_tag};
pub use fuel::Fuel;
pub use options::{AirMedium, ArchetypeOptions};
pub use system_type::SystemType;
pub use template::{
    AirSide, CoolingPlant, DispatchCall, EquipmentType, Heating, HvacTemplate, TemplateOutcome,
    ZoneBuckets, apply_template, partition_zones,
};
