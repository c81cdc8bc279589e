// Unit conversion between metric and imperial measures
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const MILES_PER_KM: f64 = 0.621371;
pub const KM_PER_MILE: f64 = 1.60934;
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Decimal twins of the float constants, for money divided by distance or volume.
pub const MILES_PER_KM_DECIMAL: Decimal = dec!(0.621371);
pub const LITERS_PER_GALLON_DECIMAL: Decimal = dec!(3.78541);

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / LITERS_PER_GALLON
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * LITERS_PER_GALLON
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Convert from kilometres to the selected unit
    pub fn convert_from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km_to_miles(km),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "gal")]
    Gallons,
}

impl VolumeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liters => "L",
            VolumeUnit::Gallons => "gal",
        }
    }

    pub fn convert_from_liters(&self, liters: f64) -> f64 {
        match self {
            VolumeUnit::Liters => liters,
            VolumeUnit::Gallons => liters_to_gallons(liters),
        }
    }

    /// Convert a price per litre into a price per selected unit
    pub fn price_from_per_liter(&self, per_liter: Decimal) -> Decimal {
        match self {
            VolumeUnit::Liters => per_liter,
            VolumeUnit::Gallons => per_liter * LITERS_PER_GALLON_DECIMAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyUnit {
    #[default]
    #[serde(rename = "l_per_100km")]
    LitersPer100Km,
    #[serde(rename = "mpg")]
    Mpg,
}

impl EfficiencyUnit {
    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyUnit::LitersPer100Km => "L/100km",
            EfficiencyUnit::Mpg => "MPG",
        }
    }
}

/// Convert a consumption figure in L/100km into miles per gallon.
pub fn l_per_100km_to_mpg(l_per_100km: f64) -> Option<f64> {
    let gallons = liters_to_gallons(l_per_100km);
    if gallons > 0.0 {
        Some(km_to_miles(100.0) / gallons)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_use_shared_constants() {
        assert!((km_to_miles(100.0) - 62.1371).abs() < 1e-9);
        assert_eq!(miles_to_km(1.0), 1.60934);
        assert_eq!(gallons_to_liters(2.0), 7.57082);
        assert!((liters_to_gallons(3.78541) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_is_approximate() {
        let km = 1234.5;
        let back = miles_to_km(km_to_miles(km));
        assert!((back - km).abs() < 0.01);

        let liters = 42.0;
        let back = gallons_to_liters(liters_to_gallons(liters));
        assert!((back - liters).abs() < 1e-9);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(DistanceUnit::Miles.symbol(), "mi");
        assert_eq!(VolumeUnit::Gallons.symbol(), "gal");
        assert_eq!(EfficiencyUnit::Mpg.label(), "MPG");
        assert_eq!(EfficiencyUnit::default().label(), "L/100km");
    }

    #[test]
    fn test_price_per_gallon() {
        assert_eq!(
            VolumeUnit::Gallons.price_from_per_liter(dec!(2)),
            dec!(7.57082)
        );
        assert_eq!(VolumeUnit::Liters.price_from_per_liter(dec!(2)), dec!(2));
    }

    #[test]
    fn test_mpg_from_l_per_100km() {
        let mpg = l_per_100km_to_mpg(8.0).unwrap();
        assert!((mpg - 29.4).abs() < 0.05);
        assert!(l_per_100km_to_mpg(0.0).is_none());
    }
}
