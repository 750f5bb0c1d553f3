use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{DemandError, Result};

/// Embedded CSV copy of the built-in standards table (`key,value,unit`).
pub static STANDARDS_CSV: &str = include_str!("../../fixtures/standards.csv");

/// Per-capita and per-unit water consumption standards.
///
/// Values are litres per day unless the unit says otherwise. The table is
/// immutable configuration: build one with [`Standards::BUILT_IN`], or parse
/// an override table with [`Standards::parse_standards_csv`].
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Standards {
    /// L/visitor/day (toilets, hand washing)
    pub visitor_sanitation: f64,
    /// L/staff/day
    pub staff_general: f64,
    /// L/kitchen staff/day
    pub staff_kitchen: f64,
    /// L/dining visitor/day
    pub restaurant_consumption: f64,
    /// L/dining visitor/day (cooking and washing)
    pub restaurant_kitchen_ops: f64,
    /// L/bed/day
    pub accommodation_bed: f64,
    /// L/head/day
    pub livestock_sheep: f64,
    /// L/head/day
    pub livestock_poultry: f64,
    /// L/m2/day
    pub landscape_irrigation: f64,
    /// Fraction of pool volume replaced per day (evaporation, splash-out, backwash)
    pub pool_topup_fraction: f64,
    /// L/club visitor/night (glass washing, ice)
    pub club_beverage: f64,
    /// L/club visitor/night
    pub club_sanitation: f64,
}

const KEYS: [(&str, &str); 12] = [
    ("visitor_sanitation", "L/visitor/day"),
    ("staff_general", "L/staff/day"),
    ("staff_kitchen", "L/staff/day"),
    ("restaurant_consumption", "L/dining visitor/day"),
    ("restaurant_kitchen_ops", "L/dining visitor/day"),
    ("accommodation_bed", "L/bed/day"),
    ("livestock_sheep", "L/head/day"),
    ("livestock_poultry", "L/head/day"),
    ("landscape_irrigation", "L/m2/day"),
    ("pool_topup_fraction", "fraction of pool volume/day"),
    ("club_beverage", "L/club visitor/night"),
    ("club_sanitation", "L/club visitor/night"),
];

impl Standards {
    pub const BUILT_IN: Standards = Standards {
        visitor_sanitation: 10.0,
        staff_general: 50.0,
        staff_kitchen: 100.0,
        restaurant_consumption: 15.0,
        restaurant_kitchen_ops: 3.0,
        accommodation_bed: 150.0,
        livestock_sheep: 5.0,
        livestock_poultry: 0.6,
        landscape_irrigation: 1.5,
        pool_topup_fraction: 0.05,
        club_beverage: 5.0,
        club_sanitation: 10.0,
    };

    /// List every standard as `(key, value, unit)`, in table order.
    pub fn entries(&self) -> Vec<(&'static str, f64, &'static str)> {
        KEYS.iter()
            .map(|(key, unit)| (*key, self.value_of(key).unwrap_or_default(), *unit))
            .collect()
    }

    fn value_of(&self, key: &str) -> Option<f64> {
        let value = match key {
            "visitor_sanitation" => self.visitor_sanitation,
            "staff_general" => self.staff_general,
            "staff_kitchen" => self.staff_kitchen,
            "restaurant_consumption" => self.restaurant_consumption,
            "restaurant_kitchen_ops" => self.restaurant_kitchen_ops,
            "accommodation_bed" => self.accommodation_bed,
            "livestock_sheep" => self.livestock_sheep,
            "livestock_poultry" => self.livestock_poultry,
            "landscape_irrigation" => self.landscape_irrigation,
            "pool_topup_fraction" => self.pool_topup_fraction,
            "club_beverage" => self.club_beverage,
            "club_sanitation" => self.club_sanitation,
            _ => return None,
        };
        Some(value)
    }

    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        let slot = match key {
            "visitor_sanitation" => &mut self.visitor_sanitation,
            "staff_general" => &mut self.staff_general,
            "staff_kitchen" => &mut self.staff_kitchen,
            "restaurant_consumption" => &mut self.restaurant_consumption,
            "restaurant_kitchen_ops" => &mut self.restaurant_kitchen_ops,
            "accommodation_bed" => &mut self.accommodation_bed,
            "livestock_sheep" => &mut self.livestock_sheep,
            "livestock_poultry" => &mut self.livestock_poultry,
            "landscape_irrigation" => &mut self.landscape_irrigation,
            "pool_topup_fraction" => &mut self.pool_topup_fraction,
            "club_beverage" => &mut self.club_beverage,
            "club_sanitation" => &mut self.club_sanitation,
            _ => return None,
        };
        Some(slot)
    }

    /// Parse a standards table from CSV.
    ///
    /// Expected columns (with headers): `key,value,unit`. The unit column is
    /// informational. Every known key must appear exactly once.
    pub fn parse_standards_csv(csv_object: &str) -> Result<Standards> {
        let mut standards = Standards::BUILT_IN;
        let mut seen: Vec<&'static str> = Vec::with_capacity(KEYS.len());
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let key = record.get(0).unwrap_or("");
            let raw_value = record.get(1).unwrap_or("");
            let known = KEYS
                .iter()
                .map(|(k, _)| *k)
                .find(|k| *k == key)
                .ok_or_else(|| DemandError::Standards(format!("unknown key '{key}'")))?;
            if seen.contains(&known) {
                return Err(DemandError::Standards(format!("duplicate key '{key}'")));
            }
            let value: f64 = raw_value.parse().map_err(|_| {
                DemandError::Standards(format!("value '{raw_value}' for '{key}' is not a number"))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(DemandError::Standards(format!(
                    "value for '{key}' must be a non-negative number"
                )));
            }
            if let Some(slot) = standards.slot(known) {
                *slot = value;
            }
            seen.push(known);
        }
        if let Some((missing, _)) = KEYS.iter().find(|(k, _)| !seen.contains(k)) {
            return Err(DemandError::Standards(format!("missing key '{missing}'")));
        }
        log::debug!("[TWD Debug] standards: parsed {} entries", seen.len());
        Ok(standards)
    }
}

impl Default for Standards {
    fn default() -> Self {
        Standards::BUILT_IN
    }
}
