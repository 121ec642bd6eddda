//! Mask cell kinds

/// One cell of a display mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellKind {
    /// Full seven segment digit (`8`)
    Digit,
    /// Half digit that only shows a one (`1`)
    SingleDigit,
    /// Minus sign (`-`)
    Sign,
    /// Decimal point (`.`)
    Point,
    /// Colon (`:`)
    Colon,
    /// Point, colon or both (`|`)
    DualPunct,
}

impl CellKind {
    /// Classify a mask symbol
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'8' => Some(CellKind::Digit),
            b'1' => Some(CellKind::SingleDigit),
            b'-' => Some(CellKind::Sign),
            b'.' => Some(CellKind::Point),
            b':' => Some(CellKind::Colon),
            b'|' => Some(CellKind::DualPunct),
            _ => None,
        }
    }

    /// The mask symbol for this cell
    pub const fn symbol(self) -> u8 {
        match self {
            CellKind::Digit => b'8',
            CellKind::SingleDigit => b'1',
            CellKind::Sign => b'-',
            CellKind::Point => b'.',
            CellKind::Colon => b':',
            CellKind::DualPunct => b'|',
        }
    }

    /// Number of segment buffer bits the cell occupies
    pub const fn width(self) -> u8 {
        match self {
            CellKind::Digit => 7,
            CellKind::DualPunct => 2,
            CellKind::SingleDigit | CellKind::Sign | CellKind::Point | CellKind::Colon => 1,
        }
    }

    /// Point, colon or dual punctuation cell
    pub const fn is_punctuation(self) -> bool {
        matches!(self, CellKind::Point | CellKind::Colon | CellKind::DualPunct)
    }

    /// Cell that takes part in the number field (digits and sign)
    pub const fn is_numeric(self) -> bool {
        matches!(self, CellKind::Digit | CellKind::SingleDigit | CellKind::Sign)
    }

    /// Whether `ch` can be shown in this cell
    ///
    /// Digits show anything except punctuation. Dual cells show punctuation
    /// or a blank. Every other cell shows only its own symbol or a blank.
    pub const fn can_host(self, ch: u8) -> bool {
        match self {
            CellKind::Digit => !is_punctuation_char(ch),
            CellKind::DualPunct => matches!(ch, b':' | b'.' | b'|' | b' '),
            _ => ch == self.symbol() || ch == b' ',
        }
    }
}

/// Characters that decorate a digit rather than occupy one
pub const fn is_punctuation_char(ch: u8) -> bool {
    matches!(ch, b'.' | b':' | b'|')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CellKind; 6] = [
        CellKind::Digit,
        CellKind::SingleDigit,
        CellKind::Sign,
        CellKind::Point,
        CellKind::Colon,
        CellKind::DualPunct,
    ];

    #[test]
    fn test_symbol_roundtrip() {
        for kind in ALL {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellKind::from_symbol(b'7'), None);
        assert_eq!(CellKind::from_symbol(b' '), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(CellKind::Digit.width(), 7);
        assert_eq!(CellKind::DualPunct.width(), 2);
        assert_eq!(CellKind::Sign.width(), 1);
        assert_eq!(CellKind::SingleDigit.width(), 1);
    }

    #[test]
    fn test_digit_hosting() {
        assert!(CellKind::Digit.can_host(b'4'));
        assert!(CellKind::Digit.can_host(b'-'));
        assert!(CellKind::Digit.can_host(b'A'));
        assert!(CellKind::Digit.can_host(b' '));
        assert!(!CellKind::Digit.can_host(b'.'));
        assert!(!CellKind::Digit.can_host(b':'));
        assert!(!CellKind::Digit.can_host(b'|'));
    }

    #[test]
    fn test_dual_punct_hosting() {
        for ch in [b'.', b':', b'|', b' '] {
            assert!(CellKind::DualPunct.can_host(ch));
        }
        assert!(!CellKind::DualPunct.can_host(b'8'));
        assert!(!CellKind::DualPunct.can_host(b'-'));
    }

    #[test]
    fn test_single_symbol_hosting() {
        assert!(CellKind::Sign.can_host(b'-'));
        assert!(CellKind::Sign.can_host(b' '));
        assert!(!CellKind::Sign.can_host(b'1'));
        assert!(CellKind::SingleDigit.can_host(b'1'));
        assert!(!CellKind::SingleDigit.can_host(b'2'));
        assert!(CellKind::Point.can_host(b'.'));
        assert!(!CellKind::Point.can_host(b':'));
        assert!(CellKind::Colon.can_host(b':'));
        assert!(!CellKind::Colon.can_host(b'.'));
    }
}
