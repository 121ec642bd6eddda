//! Number formatting
//!
//! Turns an integer into the fixed width digit string the renderer prints,
//! after checking it against the mask's [`DisplayRange`].

use core::fmt;

use heapless::String;

use crate::mask::{DisplayRange, MAX_CELLS};

/// Longest string [`format_number`] produces
pub type NumberText = String<{ MAX_CELLS + 1 }>;

/// A number to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Number {
    /// Unsigned value, never shows a sign
    Unsigned(u32),
    /// Signed value
    Signed(i32),
}

impl Number {
    /// Sign and magnitude
    pub fn split(self) -> (bool, u32) {
        match self {
            Number::Unsigned(v) => (false, v),
            Number::Signed(v) => (v < 0, v.unsigned_abs()),
        }
    }

    /// Whether the value fits in `range`
    pub fn fits(self, range: &DisplayRange) -> bool {
        match self {
            Number::Unsigned(v) => range.contains_unsigned(v),
            Number::Signed(v) => range.contains_signed(v),
        }
    }
}

macro_rules! number_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(v: $ty) -> Self {
                    Number::$variant(v.into())
                }
            }
        )*
    };
}

number_from!(Unsigned: u8, u16, u32);
number_from!(Signed: i8, i16, i32);

/// A number outside the range the mask can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeViolation {
    /// Rejected value
    pub value: Number,
    /// Range it was checked against
    pub range: DisplayRange,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Number::Unsigned(v) => write!(f, "{}", v)?,
            Number::Signed(v) => write!(f, "{}", v)?,
        }
        write!(
            f,
            " outside display range {}..={}",
            self.range.underflow, self.range.overflow
        )
    }
}

/// Format `value` as `width` characters
///
/// Negative values give up the leading position to the sign. With
/// `strip_zeros` the leading zeros are removed, leaving at least one `0`.
pub fn format_number(
    value: Number,
    range: &DisplayRange,
    width: usize,
    strip_zeros: bool,
) -> Result<NumberText, RangeViolation> {
    if !value.fits(range) {
        return Err(RangeViolation {
            value,
            range: *range,
        });
    }

    let (negative, mut magnitude) = value.split();
    let width = width.min(MAX_CELLS);
    let reserved = usize::from(negative);

    let mut digits = [b'0'; MAX_CELLS];
    for slot in digits[reserved.min(width)..width].iter_mut().rev() {
        *slot = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
    }

    let mut text = NumberText::new();
    if strip_zeros {
        let start = digits[..width]
            .iter()
            .position(|&d| d != b'0')
            .unwrap_or(width);
        if negative {
            push(&mut text, b'-');
        }
        if start == width {
            push(&mut text, b'0');
        }
        for &d in &digits[start..width] {
            push(&mut text, d);
        }
    } else {
        if negative && width > 0 {
            digits[0] = b'-';
        }
        for &d in &digits[..width] {
            push(&mut text, d);
        }
    }
    Ok(text)
}

fn push(text: &mut NumberText, ch: u8) {
    // Capacity is MAX_CELLS + 1 and at most width + 1 characters are pushed
    let _ = text.push(ch as char);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::compile;
    use proptest::prelude::*;

    fn fmt(mask: &str, value: impl Into<Number>, strip: bool) -> Result<NumberText, RangeViolation> {
        let (mask, range) = compile(mask).unwrap();
        format_number(value.into(), &range, mask.numeric_width(), strip)
    }

    #[test]
    fn test_stripped() {
        assert_eq!(fmt("8888", 42u32, true).unwrap().as_str(), "42");
        assert_eq!(fmt("8888", 1000u32, true).unwrap().as_str(), "1000");
        assert_eq!(fmt("8888", 7u8, true).unwrap().as_str(), "7");
    }

    #[test]
    fn test_padded() {
        assert_eq!(fmt("8888", 42u32, false).unwrap().as_str(), "0042");
        assert_eq!(fmt("8888", 0u32, false).unwrap().as_str(), "0000");
    }

    #[test]
    fn test_zero_keeps_one_digit() {
        assert_eq!(fmt("8888", 0u32, true).unwrap().as_str(), "0");
        assert_eq!(fmt("-88", 0i32, true).unwrap().as_str(), "0");
    }

    #[test]
    fn test_negative() {
        assert_eq!(fmt("-88", -5i32, true).unwrap().as_str(), "-5");
        assert_eq!(fmt("-88", -5i32, false).unwrap().as_str(), "-05");
        assert_eq!(fmt("-88", -99i8, false).unwrap().as_str(), "-99");
        assert_eq!(fmt("-88", -10i16, true).unwrap().as_str(), "-10");
    }

    #[test]
    fn test_positive_signed() {
        assert_eq!(fmt("-88", 42i32, true).unwrap().as_str(), "42");
        assert_eq!(fmt("-88", 42i32, false).unwrap().as_str(), "042");
    }

    #[test]
    fn test_range_boundaries() {
        assert!(fmt("8888", 9999u32, true).is_ok());
        let err = fmt("8888", 10000u32, true).unwrap_err();
        assert_eq!(err.value, Number::Unsigned(10000));
        assert_eq!(err.range.overflow, 9999);

        assert!(fmt("-88", -99i32, true).is_ok());
        assert!(fmt("-88", -100i32, true).is_err());
        assert!(fmt("-88", 150i32, true).is_err());
    }

    #[test]
    fn test_unsigned_mask_rejects_negatives() {
        assert!(fmt("8888", -1i32, true).is_err());
    }

    #[test]
    fn test_single_digit_prefix() {
        assert_eq!(fmt("188", 199u32, true).unwrap().as_str(), "199");
        assert!(fmt("188", 200u32, true).is_err());
    }

    #[test]
    fn test_extreme_values() {
        assert!(fmt("-888", i32::MIN, true).is_err());
        assert!(fmt("888", u32::MAX, true).is_err());
    }

    #[test]
    fn test_violation_message() {
        let err = fmt("88", 100u32, true).unwrap_err();
        assert_eq!(err.to_string(), "100 outside display range 0..=99");
    }

    proptest! {
        #[test]
        fn prop_padded_has_fixed_width(v in 0u32..=9999) {
            let text = fmt("8888", v, false).unwrap();
            prop_assert_eq!(text.len(), 4);
            prop_assert_eq!(text.parse::<u32>().unwrap(), v);
        }

        #[test]
        fn prop_stripped_matches_decimal(v in -999i32..=999) {
            let text = fmt("-888", v, true).unwrap();
            let expected = v.to_string();
            prop_assert_eq!(text.as_str(), expected.as_str());
        }
    }
}
