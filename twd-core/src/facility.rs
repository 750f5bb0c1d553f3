//! Facility modules and their demand formulas.
//!
//! Each module is a variant of [`FacilityModule`] carrying its own parameter
//! record. A module that is not enabled is simply not passed to the
//! estimator, so it contributes nothing and produces no components.

use serde::{Deserialize, Serialize};

use crate::demand::{ComponentSource, DemandComponent};
use crate::error::{check_non_negative, Result};
use crate::scenario::{Percent, ScenarioInput};
use crate::standards::Standards;

pub const VISITOR_SANITATION: &str = "General Visitor Sanitation";
pub const OPERATIONAL_STAFF: &str = "Operational Staff";
pub const RESTAURANT_CONSUMPTION: &str = "Restaurant Guest Consumption";
pub const KITCHEN_OPERATIONS: &str = "Kitchen Operations (Cooking & Washing)";
pub const KITCHEN_STAFF: &str = "Kitchen Staff";
pub const CLUB_BEVERAGE: &str = "Club/Bar Beverage Service";
pub const CLUB_SANITATION: &str = "Club/Bar Visitor Sanitation";
pub const ACCOMMODATION: &str = "Accommodation (Glamping/Hotel)";
pub const POOL_TOPUP: &str = "Pool Top-up (Evaporation, etc.)";
pub const LIVESTOCK_SHEEP: &str = "Livestock Drinking (Sheep)";
pub const LIVESTOCK_POULTRY: &str = "Livestock Drinking (Poultry)";
pub const PEN_CLEANING: &str = "Pen & Area Cleaning";
pub const LANDSCAPE_IRRIGATION: &str = "Landscape/Garden Irrigation";

/// Restaurant / food court.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantParams {
    /// Share of effective visitors who eat on site
    pub dining_percent: Percent,
    pub kitchen_staff_count: u32,
}

impl Default for RestaurantParams {
    fn default() -> Self {
        RestaurantParams {
            dining_percent: Percent(80.0),
            kitchen_staff_count: 40,
        }
    }
}

/// Club / bar / lounge, open at night.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubParams {
    pub capacity: u32,
    pub nightly_attendance_percent: Percent,
}

impl Default for ClubParams {
    fn default() -> Self {
        ClubParams {
            capacity: 150,
            nightly_attendance_percent: Percent(75.0),
        }
    }
}

/// Hotel or glamping accommodation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccommodationParams {
    pub bed_count: u32,
}

impl Default for AccommodationParams {
    fn default() -> Self {
        AccommodationParams { bed_count: 10 }
    }
}

/// Swimming pool, sized by surface and mean depth.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolParams {
    pub surface_area_m2: f64,
    pub average_depth_m: f64,
}

impl Default for PoolParams {
    fn default() -> Self {
        PoolParams {
            surface_area_m2: 200.0,
            average_depth_m: 1.5,
        }
    }
}

impl PoolParams {
    pub fn volume_m3(&self) -> f64 {
        self.surface_area_m2 * self.average_depth_m
    }
}

/// Mini zoo / petting farm.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZooParams {
    pub sheep_count: u32,
    pub poultry_count: u32,
    /// Daily pen and area cleaning, litres; taken as given
    pub cleaning_liters_per_day: f64,
}

impl Default for ZooParams {
    fn default() -> Self {
        ZooParams {
            sheep_count: 20,
            poultry_count: 50,
            cleaning_liters_per_day: 5000.0,
        }
    }
}

/// Irrigated landscape / gardens.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeParams {
    pub area_m2: f64,
}

impl Default for LandscapeParams {
    fn default() -> Self {
        LandscapeParams { area_m2: 2000.0 }
    }
}

/// An enabled facility module.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum FacilityModule {
    Restaurant(RestaurantParams),
    Club(ClubParams),
    Accommodation(AccommodationParams),
    Pool(PoolParams),
    Zoo(ZooParams),
    Landscape(LandscapeParams),
}

impl FacilityModule {
    pub fn source(&self) -> ComponentSource {
        match self {
            FacilityModule::Restaurant(_) => ComponentSource::Restaurant,
            FacilityModule::Club(_) => ComponentSource::Club,
            FacilityModule::Accommodation(_) => ComponentSource::Accommodation,
            FacilityModule::Pool(_) => ComponentSource::Pool,
            FacilityModule::Zoo(_) => ComponentSource::Zoo,
            FacilityModule::Landscape(_) => ComponentSource::Landscape,
        }
    }

    /// Check the real-valued parameters. Counts are unsigned and percentages
    /// are range-checked on construction, so only areas, depths and volumes
    /// can still be out of range here.
    pub fn validate(&self) -> Result<()> {
        match self {
            FacilityModule::Pool(p) => {
                check_non_negative("surface_area_m2", p.surface_area_m2)?;
                check_non_negative("average_depth_m", p.average_depth_m)
            }
            FacilityModule::Zoo(z) => {
                check_non_negative("cleaning_liters_per_day", z.cleaning_liters_per_day)
            }
            FacilityModule::Landscape(l) => check_non_negative("area_m2", l.area_m2),
            FacilityModule::Restaurant(_)
            | FacilityModule::Club(_)
            | FacilityModule::Accommodation(_) => Ok(()),
        }
    }

    /// Daily demand components of this module.
    pub fn components(&self, effective_visitors: u64, standards: &Standards) -> Vec<DemandComponent> {
        let source = self.source();
        match self {
            FacilityModule::Restaurant(p) => {
                let dining_visitors = p.dining_percent.of(effective_visitors as f64);
                vec![
                    DemandComponent::new(
                        RESTAURANT_CONSUMPTION,
                        source,
                        dining_visitors * standards.restaurant_consumption,
                    ),
                    DemandComponent::new(
                        KITCHEN_OPERATIONS,
                        source,
                        dining_visitors * standards.restaurant_kitchen_ops,
                    ),
                    DemandComponent::new(
                        KITCHEN_STAFF,
                        source,
                        f64::from(p.kitchen_staff_count) * standards.staff_kitchen,
                    ),
                ]
            }
            FacilityModule::Club(p) => {
                let club_visitors = p.nightly_attendance_percent.of(f64::from(p.capacity));
                vec![
                    DemandComponent::new(CLUB_BEVERAGE, source, club_visitors * standards.club_beverage),
                    DemandComponent::new(
                        CLUB_SANITATION,
                        source,
                        club_visitors * standards.club_sanitation,
                    ),
                ]
            }
            FacilityModule::Accommodation(p) => vec![DemandComponent::new(
                ACCOMMODATION,
                source,
                f64::from(p.bed_count) * standards.accommodation_bed,
            )],
            FacilityModule::Pool(p) => vec![DemandComponent::new(
                POOL_TOPUP,
                source,
                p.volume_m3() * 1000.0 * standards.pool_topup_fraction,
            )],
            FacilityModule::Zoo(p) => vec![
                DemandComponent::new(
                    LIVESTOCK_SHEEP,
                    source,
                    f64::from(p.sheep_count) * standards.livestock_sheep,
                ),
                DemandComponent::new(
                    LIVESTOCK_POULTRY,
                    source,
                    f64::from(p.poultry_count) * standards.livestock_poultry,
                ),
                DemandComponent::new(PEN_CLEANING, source, p.cleaning_liters_per_day),
            ],
            FacilityModule::Landscape(p) => vec![DemandComponent::new(
                LANDSCAPE_IRRIGATION,
                source,
                p.area_m2 * standards.landscape_irrigation,
            )],
        }
    }
}

/// The always-on base load: visitor sanitation and operational staff.
pub fn base_components(input: &ScenarioInput, standards: &Standards) -> Vec<DemandComponent> {
    vec![
        DemandComponent::new(
            VISITOR_SANITATION,
            ComponentSource::Base,
            input.effective_visitors() as f64 * standards.visitor_sanitation,
        ),
        DemandComponent::new(
            OPERATIONAL_STAFF,
            ComponentSource::Base,
            f64::from(input.staff_count) * standards.staff_general,
        ),
    ]
}

/// One optional slot per facility; `None` means the facility is disabled.
///
/// This is the shape facility choices take in request files.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitySelection {
    pub restaurant: Option<RestaurantParams>,
    pub club: Option<ClubParams>,
    pub accommodation: Option<AccommodationParams>,
    pub pool: Option<PoolParams>,
    pub zoo: Option<ZooParams>,
    pub landscape: Option<LandscapeParams>,
}

impl Default for FacilitySelection {
    /// Only the restaurant is enabled.
    fn default() -> Self {
        FacilitySelection {
            restaurant: Some(RestaurantParams::default()),
            club: None,
            accommodation: None,
            pool: None,
            zoo: None,
            landscape: None,
        }
    }
}

impl FacilitySelection {
    pub fn none() -> Self {
        FacilitySelection {
            restaurant: None,
            ..FacilitySelection::default()
        }
    }

    /// Every facility enabled with its default parameters.
    pub fn all() -> Self {
        FacilitySelection {
            restaurant: Some(RestaurantParams::default()),
            club: Some(ClubParams::default()),
            accommodation: Some(AccommodationParams::default()),
            pool: Some(PoolParams::default()),
            zoo: Some(ZooParams::default()),
            landscape: Some(LandscapeParams::default()),
        }
    }

    /// The enabled modules, in a fixed facility order.
    pub fn enabled_modules(&self) -> Vec<FacilityModule> {
        let mut modules = Vec::new();
        if let Some(p) = &self.restaurant {
            modules.push(FacilityModule::Restaurant(p.clone()));
        }
        if let Some(p) = &self.club {
            modules.push(FacilityModule::Club(p.clone()));
        }
        if let Some(p) = &self.accommodation {
            modules.push(FacilityModule::Accommodation(p.clone()));
        }
        if let Some(p) = &self.pool {
            modules.push(FacilityModule::Pool(p.clone()));
        }
        if let Some(p) = &self.zoo {
            modules.push(FacilityModule::Zoo(p.clone()));
        }
        if let Some(p) = &self.landscape {
            modules.push(FacilityModule::Landscape(p.clone()));
        }
        modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn volumes(components: &[DemandComponent]) -> Vec<f64> {
        components.iter().map(|c| c.liters_per_day).collect()
    }

    #[test]
    fn test_base_components() {
        let input = ScenarioInput {
            base_visitors_per_day: 750,
            peak_multiplier: 2.0,
            scenario: Scenario::Peak,
            staff_count: 60,
        };
        let components = base_components(&input, &Standards::BUILT_IN);
        assert_eq!(components[0].label, VISITOR_SANITATION);
        assert_eq!(volumes(&components), vec![15000.0, 3000.0]);
    }

    #[test]
    fn test_restaurant() {
        let module = FacilityModule::Restaurant(RestaurantParams {
            dining_percent: Percent::new(80.0).unwrap(),
            kitchen_staff_count: 40,
        });
        let components = module.components(1000, &Standards::BUILT_IN);
        assert_eq!(components.len(), 3);
        assert_eq!(volumes(&components), vec![12000.0, 2400.0, 4000.0]);
        assert!(components.iter().all(|c| c.source == ComponentSource::Restaurant));
    }

    #[test]
    fn test_club() {
        let module = FacilityModule::Club(ClubParams::default());
        let components = module.components(0, &Standards::BUILT_IN);
        // 150 * 75% = 112.5 club visitors
        assert_eq!(volumes(&components), vec![562.5, 1125.0]);
    }

    #[test]
    fn test_accommodation() {
        let module = FacilityModule::Accommodation(AccommodationParams { bed_count: 10 });
        let components = module.components(500, &Standards::BUILT_IN);
        assert_eq!(volumes(&components), vec![1500.0]);
    }

    #[test]
    fn test_pool() {
        let module = FacilityModule::Pool(PoolParams {
            surface_area_m2: 200.0,
            average_depth_m: 1.5,
        });
        let components = module.components(0, &Standards::BUILT_IN);
        assert_eq!(components.len(), 1);
        assert!(approx(components[0].liters_per_day, 15000.0));
    }

    #[test]
    fn test_pool_zero_depth_is_zero_demand() {
        let module = FacilityModule::Pool(PoolParams {
            surface_area_m2: 200.0,
            average_depth_m: 0.0,
        });
        assert!(module.validate().is_ok());
        assert_eq!(module.components(0, &Standards::BUILT_IN)[0].liters_per_day, 0.0);
    }

    #[test]
    fn test_zoo_cleaning_is_pass_through() {
        let module = FacilityModule::Zoo(ZooParams::default());
        let components = module.components(0, &Standards::BUILT_IN);
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].liters_per_day, 100.0);
        assert!(approx(components[1].liters_per_day, 30.0));
        assert_eq!(components[2].label, PEN_CLEANING);
        assert_eq!(components[2].liters_per_day, 5000.0);
    }

    #[test]
    fn test_landscape() {
        let module = FacilityModule::Landscape(LandscapeParams::default());
        assert_eq!(volumes(&module.components(0, &Standards::BUILT_IN)), vec![3000.0]);
    }

    #[test]
    fn test_validate_rejects_negative_areas() {
        let pool = FacilityModule::Pool(PoolParams {
            surface_area_m2: -1.0,
            average_depth_m: 1.0,
        });
        assert!(pool.validate().is_err());
        let landscape = FacilityModule::Landscape(LandscapeParams { area_m2: -10.0 });
        assert!(landscape.validate().is_err());
        let zoo = FacilityModule::Zoo(ZooParams {
            cleaning_liters_per_day: f64::NAN,
            ..ZooParams::default()
        });
        assert!(zoo.validate().is_err());
    }

    #[test]
    fn test_selection_enabled_modules() {
        assert_eq!(FacilitySelection::none().enabled_modules().len(), 0);
        let default_modules = FacilitySelection::default().enabled_modules();
        assert_eq!(default_modules.len(), 1);
        assert_eq!(default_modules[0].source(), ComponentSource::Restaurant);
        let all = FacilitySelection::all().enabled_modules();
        assert_eq!(all.len(), 6);
        assert_eq!(all[5].source(), ComponentSource::Landscape);
    }

    #[test]
    fn test_selection_from_json() {
        let selection: FacilitySelection =
            serde_json::from_str(r#"{"restaurant": null, "pool": {"average_depth_m": 2.0}}"#)
                .unwrap();
        assert!(selection.restaurant.is_none());
        let pool = selection.pool.unwrap();
        assert_eq!(pool.surface_area_m2, 200.0);
        assert_eq!(pool.volume_m3(), 400.0);
    }
}
