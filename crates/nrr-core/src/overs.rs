// Base-6 over notation and decimal overs.
//
// Scorecards write a duration as "W.B": W completed overs plus B balls,
// where B runs 0-5. Rate arithmetic needs decimal overs (W + B/6).

use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u8 = 6;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OversError {
    #[error("invalid overs `{input}`: balls must be between 0 and 5")]
    BallsOutOfRange { input: String },

    #[error("invalid overs `{input}`: expected a value like 14.3")]
    NotANumber { input: String },

    #[error("cannot express {value} as overs")]
    InvalidDecimal { value: f64 },
}

// ---------------------------------------------------------------------------
// Overs
// ---------------------------------------------------------------------------

/// A duration in overs, stored as completed overs plus extra balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Overs {
    whole: u32,
    balls: u8,
}

impl Overs {
    /// Build from components. `balls` must be in 0..=5.
    pub fn new(whole: u32, balls: u8) -> Result<Self, OversError> {
        if balls >= BALLS_PER_OVER {
            return Err(OversError::BallsOutOfRange {
                input: format!("{whole}.{balls}"),
            });
        }
        Ok(Overs { whole, balls })
    }

    /// A whole number of overs with no extra balls.
    pub fn complete(whole: u32) -> Self {
        Overs { whole, balls: 0 }
    }

    pub fn whole(&self) -> u32 {
        self.whole
    }

    pub fn balls(&self) -> u8 {
        self.balls
    }

    /// Decimal overs for rate arithmetic: `whole + balls / 6`.
    pub fn to_decimal(&self) -> f64 {
        f64::from(self.whole) + f64::from(self.balls) / f64::from(BALLS_PER_OVER)
    }

    /// Convert decimal overs back to base-6 notation.
    ///
    /// The fractional part is rounded to the nearest ball. A fraction that
    /// rounds up to a sixth ball carries into the next over, so 14.999
    /// becomes 15.0 rather than 14.6.
    pub fn from_decimal(value: f64) -> Result<Self, OversError> {
        if !value.is_finite() || value < 0.0 || value >= f64::from(u32::MAX) {
            return Err(OversError::InvalidDecimal { value });
        }
        let whole = value.floor();
        let balls = ((value - whole) * f64::from(BALLS_PER_OVER)).round() as u8;
        let whole = whole as u32;
        if balls == BALLS_PER_OVER {
            Ok(Overs {
                whole: whole + 1,
                balls: 0,
            })
        } else {
            Ok(Overs { whole, balls })
        }
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole, self.balls)
    }
}

impl FromStr for Overs {
    type Err = OversError;

    /// Parse `"W.B"` or a bare `"W"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let not_a_number = || OversError::NotANumber {
            input: trimmed.to_string(),
        };

        let (whole_str, balls_str) = match trimmed.split_once('.') {
            Some((w, b)) => (w, Some(b)),
            None => (trimmed, None),
        };

        let whole: u32 = whole_str.parse().map_err(|_| not_a_number())?;

        let balls: u32 = match balls_str {
            None => 0,
            Some(b) if b.starts_with('-') => {
                return Err(OversError::BallsOutOfRange {
                    input: trimmed.to_string(),
                })
            }
            Some(b) => b.parse().map_err(|_| not_a_number())?,
        };

        if balls >= u32::from(BALLS_PER_OVER) {
            return Err(OversError::BallsOutOfRange {
                input: trimmed.to_string(),
            });
        }

        Ok(Overs {
            whole,
            balls: balls as u8,
        })
    }
}

// Data files write overs either as strings ("90.3") or as bare numbers
// (90.3). Both are read as base-6 notation.
impl<'de> Deserialize<'de> for Overs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OversVisitor;

        impl<'de> Visitor<'de> for OversVisitor {
            type Value = Overs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("overs in W.B notation, as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Overs, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Overs, E> {
                self.visit_str(&v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Overs, E> {
                let whole = u32::try_from(v).map_err(E::custom)?;
                Ok(Overs::complete(whole))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Overs, E> {
                let whole = u32::try_from(v).map_err(E::custom)?;
                Ok(Overs::complete(whole))
            }
        }

        deserializer.deserialize_any(OversVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_balls() {
        let overs: Overs = "14.3".parse().unwrap();
        assert_eq!(overs.whole(), 14);
        assert_eq!(overs.balls(), 3);
    }

    #[test]
    fn bare_whole_number_has_zero_balls() {
        let overs: Overs = "20".parse().unwrap();
        assert_eq!(overs, Overs::complete(20));
        assert_eq!(overs.to_string(), "20.0");
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        let overs: Overs = "  7.2\n".parse().unwrap();
        assert_eq!(overs, Overs::new(7, 2).unwrap());
    }

    #[test]
    fn to_decimal_uses_sixths() {
        let overs: Overs = "14.3".parse().unwrap();
        assert!((overs.to_decimal() - 14.5).abs() < 1e-12);
        let overs: Overs = "0.1".parse().unwrap();
        assert!((overs.to_decimal() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn from_decimal_half_over_is_three_balls() {
        assert_eq!(Overs::from_decimal(14.5).unwrap().to_string(), "14.3");
    }

    #[test]
    fn from_decimal_carries_sixth_ball() {
        assert_eq!(Overs::from_decimal(14.999).unwrap().to_string(), "15.0");
        assert_eq!(Overs::from_decimal(19.95).unwrap().to_string(), "20.0");
    }

    #[test]
    fn five_sixths_stays_five_balls() {
        let value = 14.0 + 5.0 / 6.0;
        assert_eq!(Overs::from_decimal(value).unwrap().to_string(), "14.5");
    }

    #[test]
    fn every_base6_value_round_trips() {
        for whole in 0..=60u32 {
            for balls in 0..BALLS_PER_OVER {
                let text = format!("{whole}.{balls}");
                let parsed: Overs = text.parse().unwrap();
                let back = Overs::from_decimal(parsed.to_decimal()).unwrap();
                assert_eq!(back.to_string(), text);
            }
        }
    }

    #[test]
    fn rejects_ball_digit_above_five() {
        let err = "14.6".parse::<Overs>().unwrap_err();
        assert!(matches!(err, OversError::BallsOutOfRange { .. }));
        let err = "14.10".parse::<Overs>().unwrap_err();
        assert!(matches!(err, OversError::BallsOutOfRange { .. }));
    }

    #[test]
    fn rejects_negative_ball_digit() {
        let err = "14.-1".parse::<Overs>().unwrap_err();
        assert!(matches!(err, OversError::BallsOutOfRange { .. }));
    }

    #[test]
    fn rejects_non_numeric() {
        for input in ["", "abc", "fourteen.3", "14.x", "-2.0", "1.2.3"] {
            let err = input.parse::<Overs>().unwrap_err();
            assert!(
                matches!(err, OversError::NotANumber { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn new_rejects_six_balls() {
        assert!(Overs::new(3, 6).is_err());
        assert!(Overs::new(3, 5).is_ok());
    }

    #[test]
    fn from_decimal_rejects_negative_and_nan() {
        assert!(Overs::from_decimal(-0.5).is_err());
        assert!(Overs::from_decimal(f64::NAN).is_err());
        assert!(Overs::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn deserializes_from_string_and_number() {
        let from_str: Overs = serde_json::from_str("\"90.3\"").unwrap();
        let from_num: Overs = serde_json::from_str("90.3").unwrap();
        let from_int: Overs = serde_json::from_str("90").unwrap();
        assert_eq!(from_str, Overs::new(90, 3).unwrap());
        assert_eq!(from_num, Overs::new(90, 3).unwrap());
        assert_eq!(from_int, Overs::complete(90));
    }

    #[test]
    fn deserialize_rejects_bad_balls() {
        assert!(serde_json::from_str::<Overs>("\"12.7\"").is_err());
        assert!(serde_json::from_str::<Overs>("12.7").is_err());
    }
}
