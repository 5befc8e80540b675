//! Decimal rounding of angles.
//!
//! Scaling by a power of ten in binary floating point drifts (`1.005 * 100`
//! is `100.49999999999999`), so `adjust` works on the value's shortest
//! round-trip decimal digits instead and rounds them in exact integer
//! arithmetic.

/// Exponent used for look angles: two decimal places.
pub const LOOK_ANGLE_EXPONENT: f64 = -2.0;

/// Divisor cap for [`adjust`]. An `f64` has at most 17 significant digits,
/// so any larger divisor rounds the mantissa the same way.
const MAX_DIVISOR_DIGITS: i32 = 30;

/// Rounding mode for [`adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Ceiling,
    Floor,
    /// Round half toward positive infinity (`-0.5` becomes `0`).
    Nearest,
}

impl Rounding {
    /// Round to an integer.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Ceiling => value.ceil(),
            Self::Floor => value.floor(),
            Self::Nearest => {
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
        }
    }

    /// Divide `n` by a positive `divisor`, rounding the quotient.
    fn apply_scaled(self, n: i128, divisor: i128) -> i128 {
        match self {
            Self::Ceiling => -(-n).div_euclid(divisor),
            Self::Floor => n.div_euclid(divisor),
            Self::Nearest => (2 * n + divisor).div_euclid(2 * divisor),
        }
    }
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceil" | "ceiling" => Ok(Self::Ceiling),
            "floor" => Ok(Self::Floor),
            "round" | "nearest" => Ok(Self::Nearest),
            other => Err(format!("unknown rounding mode '{other}'")),
        }
    }
}

/// Round `value` to the decimal place `10^exponent` using `mode`.
///
/// `exponent` is usually zero or negative (`-2` keeps two decimals). An
/// exponent of zero applies `mode` directly. Returns NaN when `value` is NaN,
/// when `exponent` is not an integer, or when a non-zero exponent is paired
/// with an infinite value.
pub fn adjust(mode: Rounding, value: f64, exponent: f64) -> f64 {
    if exponent == 0.0 {
        return mode.apply(value);
    }
    if value.is_nan() || !exponent.is_finite() || exponent.fract() != 0.0 {
        return f64::NAN;
    }
    if value.is_infinite() {
        return f64::NAN;
    }
    // Beyond +-400 places every finite f64 rounds the same way.
    let places = (-exponent).clamp(-400.0, 400.0) as i32;
    adjust_places(mode, value, places)
}

/// Direction from origin to target in degrees, in `[-180, 180]`, rounded to
/// two decimals.
pub fn find_angle(origin_x: f64, origin_y: f64, target_x: f64, target_y: f64) -> f64 {
    let dy = target_y - origin_y;
    let dx = target_x - origin_x;
    let theta = dy.atan2(dx).to_degrees();
    adjust(Rounding::Nearest, theta, LOOK_ANGLE_EXPONENT)
}

fn adjust_places(mode: Rounding, value: f64, places: i32) -> f64 {
    if value == 0.0 {
        return value;
    }
    let Some((mantissa, scale)) = decimal_parts(value) else {
        return f64::NAN;
    };

    // value * 10^places == mantissa * 10^shift
    let shift = scale + places;
    if shift >= 0 {
        // Already an integer at this place.
        return value;
    }
    let divisor = 10_i128.pow(shift.unsigned_abs().min(MAX_DIVISOR_DIGITS as u32));
    let rounded = mode.apply_scaled(mantissa, divisor);
    format!("{rounded}e{}", -places)
        .parse()
        .unwrap_or(f64::NAN)
}

/// Shortest round-trip decimal form of a finite `value` as
/// `(mantissa, scale)` with `value == mantissa * 10^scale`.
fn decimal_parts(value: f64) -> Option<(i128, i32)> {
    let text = format!("{value:e}");
    let (digits, exp) = text.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let mantissa: i128 = format!("{int}{frac}").parse().ok()?;
    let scale = exp - i32::try_from(frac.len()).ok()?;
    Some((if negative { -mantissa } else { mantissa }, scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_avoids_binary_drift() {
        // Plain arithmetic gives (1.005 * 100.0).round() / 100.0 == 1.0.
        assert_eq!(adjust(Rounding::Nearest, 1.005, -2.0), 1.01);
        assert_eq!(adjust(Rounding::Nearest, 1.045, -2.0), 1.05);
        assert_eq!(adjust(Rounding::Nearest, 12.345, -2.0), 12.35);
    }

    #[test]
    fn nearest_rounds_half_up() {
        assert_eq!(adjust(Rounding::Nearest, -1.005, -2.0), -1.0);
        assert_eq!(adjust(Rounding::Nearest, 2.5, 0.0), 3.0);
        assert_eq!(adjust(Rounding::Nearest, -2.5, 0.0), -2.0);
        assert_eq!(adjust(Rounding::Nearest, -0.5, 0.0), 0.0);
    }

    #[test]
    fn floor_and_ceiling() {
        assert_eq!(adjust(Rounding::Floor, 1.239, -2.0), 1.23);
        assert_eq!(adjust(Rounding::Ceiling, 1.231, -2.0), 1.24);
        assert_eq!(adjust(Rounding::Floor, -1.231, -2.0), -1.24);
        assert_eq!(adjust(Rounding::Ceiling, -1.239, -2.0), -1.23);
        assert_eq!(adjust(Rounding::Floor, 0.1 + 0.2, -2.0), 0.3);
    }

    #[test]
    fn every_significant_digit_counts() {
        // 0.30000000000000004 is above 0.3, so ceiling moves it up.
        assert_eq!(adjust(Rounding::Ceiling, 0.1 + 0.2, -2.0), 0.31);
        // Just below the half-way point.
        assert_eq!(adjust(Rounding::Nearest, 1.0049999999999997, -2.0), 1.0);
        assert_eq!(adjust(Rounding::Ceiling, 1.0000000000000002, -2.0), 1.01);
        assert_eq!(adjust(Rounding::Floor, 0.9999999999999999, -2.0), 0.99);
    }

    #[test]
    fn large_magnitudes_still_round() {
        assert_eq!(adjust(Rounding::Nearest, 12345678901234.567, -2.0), 12345678901234.57);
        assert_eq!(adjust(Rounding::Floor, 12345678901234.567, -2.0), 12345678901234.56);
        assert_eq!(adjust(Rounding::Nearest, 123456789012345.67, -2.0), 123456789012345.67);
        assert_eq!(adjust(Rounding::Nearest, 123456789.0, 3.0), 123457000.0);
    }

    #[test]
    fn extreme_exponents() {
        assert_eq!(adjust(Rounding::Nearest, 1.5, -400.0), 1.5);
        assert_eq!(adjust(Rounding::Nearest, 1.5, 400.0), 0.0);
        assert_eq!(adjust(Rounding::Floor, 5e-324, -2.0), 0.0);
        assert_eq!(adjust(Rounding::Ceiling, 5e-324, -2.0), 0.01);
    }

    #[test]
    fn zero_exponent_rounds_directly() {
        assert_eq!(adjust(Rounding::Ceiling, 1.2, 0.0), 2.0);
        assert_eq!(adjust(Rounding::Floor, 1.8, 0.0), 1.0);
        assert_eq!(adjust(Rounding::Nearest, 1.4, 0.0), 1.0);
        assert_eq!(adjust(Rounding::Nearest, f64::INFINITY, 0.0), f64::INFINITY);
    }

    #[test]
    fn positive_exponent_rounds_to_tens() {
        assert_eq!(adjust(Rounding::Nearest, 1234.0, 1.0), 1230.0);
        assert_eq!(adjust(Rounding::Nearest, 1235.0, 1.0), 1240.0);
        assert_eq!(adjust(Rounding::Floor, 1299.0, 2.0), 1200.0);
    }

    #[test]
    fn invalid_input_is_nan() {
        assert!(adjust(Rounding::Nearest, f64::NAN, -2.0).is_nan());
        assert!(adjust(Rounding::Nearest, 1.5, 0.5).is_nan());
        assert!(adjust(Rounding::Nearest, 1.5, f64::NAN).is_nan());
        assert!(adjust(Rounding::Nearest, f64::INFINITY, -2.0).is_nan());
    }

    #[test]
    fn adjust_is_idempotent() {
        let samples = [
            0.0, 1.005, -1.005, 0.1 + 0.2, 179.999, -179.995, 33.3333, 1e-9, 123456.789, -0.004,
            89.99999999,
        ];
        for mode in [Rounding::Ceiling, Rounding::Floor, Rounding::Nearest] {
            for &x in &samples {
                let once = adjust(mode, x, -2.0);
                let twice = adjust(mode, once, -2.0);
                assert_eq!(once, twice, "mode {mode:?} value {x}");
            }
        }
    }

    #[test]
    fn tiny_values_round_to_zero() {
        assert_eq!(adjust(Rounding::Nearest, 1e-10, -2.0), 0.0);
        assert_eq!(adjust(Rounding::Ceiling, 1e-10, -2.0), 0.01);
    }

    #[test]
    fn find_angle_round_trips_unit_circle() {
        let samples = [
            0.0, 30.0, 45.0, 90.0, 120.25, 180.0, -150.5, -90.0, -45.75, -0.33, 12.34, -89.0,
        ];
        for theta in samples {
            let rad = f64::to_radians(theta);
            let got = find_angle(0.0, 0.0, rad.cos(), rad.sin());
            assert!((got - theta).abs() < 1e-9, "theta {theta} got {got}");
        }
    }

    #[test]
    fn find_angle_axes() {
        assert_eq!(find_angle(0.0, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(find_angle(0.0, 0.0, 0.0, 1.0), 90.0);
        assert_eq!(find_angle(0.0, 0.0, -1.0, 0.0), 180.0);
        assert_eq!(find_angle(0.0, 0.0, 0.0, -1.0), -90.0);
        assert_eq!(find_angle(10.0, 10.0, 10.0, 5.0), -90.0);
    }

    #[test]
    fn find_angle_rounds_to_two_decimals() {
        let a = find_angle(0.0, 0.0, 3.0, 1.0);
        // atan(1/3) = 18.43494882...
        assert_eq!(a, 18.43);
    }

    #[test]
    fn rounding_parses_mode_names() {
        assert_eq!("round".parse::<Rounding>(), Ok(Rounding::Nearest));
        assert_eq!("ceil".parse::<Rounding>(), Ok(Rounding::Ceiling));
        assert_eq!("floor".parse::<Rounding>(), Ok(Rounding::Floor));
        assert!("up".parse::<Rounding>().is_err());
    }
}
