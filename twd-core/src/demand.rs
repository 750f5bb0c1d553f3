use serde::{Deserialize, Serialize};
use std::fmt;

/// The facility a demand component belongs to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSource {
    Base,
    Restaurant,
    Club,
    Accommodation,
    Pool,
    Zoo,
    Landscape,
    /// Distribution-loss reserve; only ever appears in report rows
    LossReserve,
}

impl fmt::Display for ComponentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentSource::Base => "Base",
            ComponentSource::Restaurant => "Restaurant",
            ComponentSource::Club => "Club",
            ComponentSource::Accommodation => "Accommodation",
            ComponentSource::Pool => "Pool",
            ComponentSource::Zoo => "Zoo",
            ComponentSource::Landscape => "Landscape",
            ComponentSource::LossReserve => "Loss Reserve",
        };
        write!(f, "{name}")
    }
}

/// One line of daily demand, in litres per day.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DemandComponent {
    pub label: String,
    pub source: ComponentSource,
    pub liters_per_day: f64,
}

impl DemandComponent {
    pub fn new(label: &str, source: ComponentSource, liters_per_day: f64) -> Self {
        DemandComponent {
            label: label.to_string(),
            source,
            liters_per_day,
        }
    }
}

/// All components produced by the base load and the enabled facilities,
/// in the order they were produced.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct DemandBreakdown(pub Vec<DemandComponent>);

impl DemandBreakdown {
    pub fn components(&self) -> &[DemandComponent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every component, in production order.
    pub fn subtotal(&self) -> f64 {
        self.0.iter().fold(0.0, |acc, c| acc + c.liters_per_day)
    }

    /// Sum of the components of a single facility.
    pub fn total_for(&self, source: ComponentSource) -> f64 {
        self.0
            .iter()
            .filter(|c| c.source == source)
            .fold(0.0, |acc, c| acc + c.liters_per_day)
    }

    pub fn find(&self, label: &str) -> Option<&DemandComponent> {
        self.0.iter().find(|c| c.label == label)
    }

    pub fn extend(&mut self, components: Vec<DemandComponent>) {
        self.0.extend(components);
    }
}
