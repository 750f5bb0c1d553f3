//! Water demand engine for multi-facility tourist destinations.
//!
//! Daily demand is built from a base load (visitor sanitation and staff)
//! plus one set of components per enabled facility, then raised by a
//! distribution-loss allowance and priced by the cubic meter.
//!
//! # Usage
//!
//! ```rust
//! use twd_core::cost::{CostModel, CostTier};
//! use twd_core::estimate::compute;
//! use twd_core::facility::{FacilityModule, PoolParams};
//! use twd_core::scenario::{Percent, ScenarioInput};
//!
//! let input = ScenarioInput::default();
//! let modules = [FacilityModule::Pool(PoolParams::default())];
//! let (breakdown, aggregate) = compute(
//!     &input,
//!     &modules,
//!     Percent::new(20.0).unwrap(),
//!     &CostModel::from(CostTier::Medium),
//! );
//! assert_eq!(breakdown.len(), 3);
//! assert!(aggregate.total_liters > aggregate.subtotal_liters);
//! ```

pub mod cost;
pub mod demand;
pub mod error;
pub mod estimate;
pub mod facility;
pub mod report;
pub mod request;
pub mod scenario;
pub mod standards;
