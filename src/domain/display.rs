// Display formatting according to the user's unit and currency preferences
use super::units::{DistanceUnit, EfficiencyUnit, VolumeUnit, l_per_100km_to_mpg};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Shown in dashboards where a value is undefined.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPreferences {
    #[serde(default)]
    pub distance_unit: DistanceUnit,
    #[serde(default)]
    pub volume_unit: VolumeUnit,
    #[serde(default)]
    pub efficiency_unit: EfficiencyUnit,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for UnitPreferences {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::default(),
            volume_unit: VolumeUnit::default(),
            efficiency_unit: EfficiencyUnit::default(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    prefs: UnitPreferences,
}

impl DisplayFormatter {
    pub fn new(prefs: UnitPreferences) -> Self {
        let mut prefs = prefs;
        if prefs.currency.trim().is_empty() {
            prefs.currency = default_currency();
        }
        Self { prefs }
    }

    pub fn efficiency_label(&self) -> &'static str {
        self.prefs.efficiency_unit.label()
    }

    /// `"<currency> / <volume>"`, the unit of a price-per-volume chart.
    pub fn cost_per_volume_unit(&self) -> String {
        format!("{} / {}", self.prefs.currency, self.prefs.volume_unit.symbol())
    }

    pub fn money(&self, amount: Decimal) -> String {
        format!("{} {}", self.prefs.currency, two_places(amount))
    }

    pub fn cost_per_volume(&self, per_liter: Option<Decimal>) -> Option<String> {
        let value = self.prefs.volume_unit.price_from_per_liter(per_liter?);
        Some(format!(
            "{} {} / {}",
            self.prefs.currency,
            two_places(value),
            self.prefs.volume_unit.symbol()
        ))
    }

    /// Price per litre as a chart value in the preferred volume unit.
    pub fn cost_per_volume_value(&self, per_liter: Decimal) -> Option<f64> {
        self.prefs.volume_unit.price_from_per_liter(per_liter).to_f64()
    }

    pub fn consumption(&self, l_per_100km: Option<f64>, mpg: Option<f64>) -> Option<String> {
        let value = match self.prefs.efficiency_unit {
            EfficiencyUnit::LitersPer100Km => l_per_100km?,
            EfficiencyUnit::Mpg => mpg?,
        };
        Some(format!("{:.1} {}", value, self.efficiency_label()))
    }

    /// Consumption given only in L/100km, converted when MPG is preferred.
    pub fn consumption_value(&self, l_per_100km: f64) -> Option<f64> {
        match self.prefs.efficiency_unit {
            EfficiencyUnit::LitersPer100Km => Some(l_per_100km),
            EfficiencyUnit::Mpg => l_per_100km_to_mpg(l_per_100km),
        }
    }

    pub fn consumption_from_l_per_100km(&self, l_per_100km: Option<f64>) -> Option<String> {
        let value = self.consumption_value(l_per_100km?)?;
        Some(format!("{:.1} {}", value, self.efficiency_label()))
    }

    pub fn distance_value(&self, km: f64) -> i64 {
        self.prefs.distance_unit.convert_from_km(km).round_ties_even() as i64
    }

    pub fn distance(&self, km: f64) -> String {
        format!("{} {}", self.distance_value(km), self.prefs.distance_unit.symbol())
    }

    pub fn distance_per_day(&self, km_per_day: Option<f64>) -> Option<String> {
        Some(format!(
            "{} {}/day",
            self.distance_value(km_per_day?),
            self.prefs.distance_unit.symbol()
        ))
    }

    pub fn volume(&self, liters: Decimal) -> String {
        match self.prefs.volume_unit {
            VolumeUnit::Liters => two_places(liters),
            VolumeUnit::Gallons => {
                let gallons = self
                    .prefs
                    .volume_unit
                    .convert_from_liters(liters.to_f64().unwrap_or_default());
                format!("{:.2}", gallons)
            }
        }
    }

    pub fn cost_per_distance(
        &self,
        per_km: Option<Decimal>,
        per_mile: Option<Decimal>,
    ) -> Option<String> {
        let value = match self.prefs.distance_unit {
            DistanceUnit::Kilometers => per_km?,
            DistanceUnit::Miles => per_mile?,
        };
        Some(format!(
            "{} {} / {}",
            self.prefs.currency,
            two_places(value),
            self.prefs.distance_unit.symbol()
        ))
    }
}

/// Round half to even at two places and always print both decimals.
fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

pub fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}
