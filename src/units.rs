//! SenML unit symbols
//!
//! Units are compared by string identity only. The associated constants
//! cover the SenML units registry; any other symbol decodes unchanged.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The unit of a measurement value (`u`) or the base unit of a pack (`bu`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(Cow<'static, str>);

impl Unit {
    pub const METER: Unit = Unit::from_static("m");
    pub const KILOGRAM: Unit = Unit::from_static("kg");
    pub const SECOND: Unit = Unit::from_static("s");
    pub const AMPERE: Unit = Unit::from_static("A");
    pub const KELVIN: Unit = Unit::from_static("K");
    pub const CANDELA: Unit = Unit::from_static("cd");
    pub const MOLE: Unit = Unit::from_static("mol");
    pub const HERTZ: Unit = Unit::from_static("Hz");
    pub const RADIAN: Unit = Unit::from_static("rad");
    pub const STERADIAN: Unit = Unit::from_static("sr");
    pub const NEWTON: Unit = Unit::from_static("N");
    pub const PASCAL: Unit = Unit::from_static("Pa");
    pub const JOULE: Unit = Unit::from_static("J");
    pub const WATT: Unit = Unit::from_static("W");
    pub const COULOMB: Unit = Unit::from_static("C");
    pub const VOLT: Unit = Unit::from_static("V");
    pub const FARAD: Unit = Unit::from_static("F");
    pub const OHM: Unit = Unit::from_static("Ohm");
    pub const SIEMENS: Unit = Unit::from_static("S");
    pub const WEBER: Unit = Unit::from_static("Wb");
    pub const TESLA: Unit = Unit::from_static("T");
    pub const HENRY: Unit = Unit::from_static("H");
    /// Degrees Celsius
    pub const CELSIUS: Unit = Unit::from_static("Cel");
    pub const LUMEN: Unit = Unit::from_static("lm");
    pub const LUX: Unit = Unit::from_static("lux");
    pub const BECQUEREL: Unit = Unit::from_static("Bq");
    pub const GRAY: Unit = Unit::from_static("Gy");
    pub const SIEVERT: Unit = Unit::from_static("Sv");
    pub const KATAL: Unit = Unit::from_static("kat");
    /// Square meter (area)
    pub const SQUARE_METER: Unit = Unit::from_static("m2");
    /// Cubic meter (volume)
    pub const CUBIC_METER: Unit = Unit::from_static("m3");
    /// Liter (volume)
    pub const LITER: Unit = Unit::from_static("l");
    /// Meter per second (velocity)
    pub const METER_PER_SECOND: Unit = Unit::from_static("m/s");
    /// Meter per square second (acceleration)
    pub const METER_PER_SQUARE_SECOND: Unit = Unit::from_static("m/s2");
    /// Cubic meter per second (flow rate)
    pub const CUBIC_METER_PER_SECOND: Unit = Unit::from_static("m3/s");
    /// Liter per second (flow rate)
    pub const LITER_PER_SECOND: Unit = Unit::from_static("l/s");
    /// Watt per square meter (irradiance)
    pub const WATT_PER_SQUARE_METER: Unit = Unit::from_static("W/m2");
    /// Candela per square meter (luminance)
    pub const CANDELA_PER_SQUARE_METER: Unit = Unit::from_static("cd/m2");
    /// Bit (information content)
    pub const BIT: Unit = Unit::from_static("bit");
    /// Bit per second (data rate)
    pub const BIT_PER_SECOND: Unit = Unit::from_static("bit/s");
    /// Degrees latitude
    pub const DEGREES_LATITUDE: Unit = Unit::from_static("lat");
    /// Degrees longitude
    pub const DEGREES_LONGITUDE: Unit = Unit::from_static("lon");
    /// pH value (acidity; logarithmic quantity)
    pub const PH: Unit = Unit::from_static("pH");
    /// Decibel (logarithmic quantity)
    pub const DECIBEL: Unit = Unit::from_static("dB");
    /// Decibel relative to 1 W (power level)
    pub const DECIBEL_1W: Unit = Unit::from_static("dBW");
    /// Bel (sound pressure level; logarithmic quantity)
    pub const BEL: Unit = Unit::from_static("Bspl");
    /// Counter value
    pub const COUNT: Unit = Unit::from_static("count");
    /// Ratio, e.g. the value of a switch
    pub const SWITCH: Unit = Unit::from_static("/");
    pub const PERCENTAGE: Unit = Unit::from_static("%");
    /// Percentage of relative humidity
    pub const RELATIVE_HUMIDITY: Unit = Unit::from_static("%RH");
    /// Percentage of remaining battery energy level
    pub const ENERGY_LEVEL: Unit = Unit::from_static("%EL");
    /// Seconds of remaining battery energy
    pub const ENERGY_REMAINING: Unit = Unit::from_static("EL");
    /// Events per second
    pub const EVENT_RATE: Unit = Unit::from_static("1/s");
    /// Heart beats per minute
    pub const BEATS_PER_MINUTE: Unit = Unit::from_static("beat/min");
    /// Cumulative number of heart beats
    pub const BEATS: Unit = Unit::from_static("beats");
    /// Siemens per meter (conductivity)
    pub const SIEMENS_PER_METER: Unit = Unit::from_static("S/m");

    /// Create a unit from a static symbol
    pub const fn from_static(symbol: &'static str) -> Self {
        Unit(Cow::Borrowed(symbol))
    }

    /// The unit symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty symbol, which means "no unit"
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Unit {
    fn from(symbol: &'static str) -> Self {
        Unit::from_static(symbol)
    }
}

impl From<String> for Unit {
    fn from(symbol: String) -> Self {
        Unit(Cow::Owned(symbol))
    }
}

impl AsRef<str> for Unit {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_identity() {
        assert_eq!(Unit::CELSIUS, Unit::from(String::from("Cel")));
        assert_ne!(Unit::AMPERE, Unit::VOLT);
        assert_eq!(Unit::RELATIVE_HUMIDITY.as_str(), "%RH");
    }

    #[test]
    fn test_default_unit_is_empty() {
        assert!(Unit::default().is_empty());
        assert!(!Unit::SWITCH.is_empty());
    }
}
