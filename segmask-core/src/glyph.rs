//! Seven segment glyph table
//!
//! Patterns are stored in `GFEDCBA` bit order, bit 0 being segment A:
//!
//! ```text
//!      __A__
//!     |     |
//!    F|     |B
//!     |__G__|
//!     |     |
//!    E|     |C
//!     |__D__|
//! ```

/// First code point with a glyph (space)
pub const FIRST_GLYPH: u8 = 32;

/// Last code point with a glyph (degree symbol)
pub const LAST_GLYPH: u8 = 128;

/// Code point used for the degree symbol
pub const DEGREE: u8 = 128;

/// Pattern with every segment off
pub const BLANK: u8 = 0;

/// Segment patterns for code points `FIRST_GLYPH..=LAST_GLYPH`
static GLYPHS: [u8; (LAST_GLYPH - FIRST_GLYPH) as usize + 1] = [
    0b0000000, //  32 space
    0b0110000, //  33 !
    0b0100010, //  34 "
    0b1000001, //  35 #
    0b1101101, //  36 $
    0b1010010, //  37 %
    0b1111100, //  38 &
    0b0100000, //  39 '
    0b0111001, //  40 (
    0b0001111, //  41 )
    0b0100001, //  42 *
    0b1110000, //  43 +
    0b0001000, //  44 ,
    0b1000000, //  45 -
    0b0001000, //  46 .
    0b1010010, //  47 /
    0b0111111, //  48 0
    0b0000110, //  49 1
    0b1011011, //  50 2
    0b1001111, //  51 3
    0b1100110, //  52 4
    0b1101101, //  53 5
    0b1111101, //  54 6
    0b0000111, //  55 7
    0b1111111, //  56 8
    0b1101111, //  57 9
    0b1001000, //  58 :
    0b1001000, //  59 ;
    0b0111001, //  60 <
    0b1001000, //  61 =
    0b0001111, //  62 >
    0b1010011, //  63 ?
    0b1011111, //  64 @
    0b1110111, //  65 A
    0b1111100, //  66 B
    0b0111001, //  67 C
    0b1011110, //  68 D
    0b1111001, //  69 E
    0b1110001, //  70 F
    0b0111101, //  71 G
    0b1110110, //  72 H
    0b0000110, //  73 I
    0b0011110, //  74 J
    0b1110110, //  75 K
    0b0111000, //  76 L
    0b0010101, //  77 M
    0b0110111, //  78 N
    0b0111111, //  79 O
    0b1110011, //  80 P
    0b1100111, //  81 Q
    0b0110001, //  82 R
    0b1101101, //  83 S
    0b1111000, //  84 T
    0b0111110, //  85 U
    0b0011100, //  86 V
    0b0101010, //  87 W
    0b1110110, //  88 X
    0b1101110, //  89 Y
    0b1011011, //  90 Z
    0b0111001, //  91 [
    0b1100100, //  92 \\
    0b0001111, //  93 ]
    0b0100011, //  94 ^
    0b0001000, //  95 _
    0b0100000, //  96 `
    0b1110111, //  97 a
    0b1111100, //  98 b
    0b1011000, //  99 c
    0b1011110, // 100 d
    0b1111001, // 101 e
    0b1110001, // 102 f
    0b1101111, // 103 g
    0b1110100, // 104 h
    0b0000100, // 105 i
    0b0011110, // 106 j
    0b1110110, // 107 k
    0b0011000, // 108 l
    0b0010101, // 109 m
    0b1010100, // 110 n
    0b1011100, // 111 o
    0b1110011, // 112 p
    0b1100111, // 113 q
    0b1010000, // 114 r
    0b1101101, // 115 s
    0b1111000, // 116 t
    0b0111110, // 117 u
    0b0011100, // 118 v
    0b0101010, // 119 w
    0b1110110, // 120 x
    0b1101110, // 121 y
    0b1011011, // 122 z
    0b0111001, // 123 {
    0b0110000, // 124 |
    0b0001111, // 125 }
    0b1000000, // 126 ~
    0b0000000, // 127 DEL
    0b1100011, // 128 degree
];

/// Characters [`decode_digit`] will recognise
const DECODABLE: &[u8] = b"0123456789- ";

/// Look up the segment pattern for a character
///
/// Code points outside the table render blank.
pub fn glyph(ch: u8) -> u8 {
    if (FIRST_GLYPH..=LAST_GLYPH).contains(&ch) {
        GLYPHS[(ch - FIRST_GLYPH) as usize]
    } else {
        BLANK
    }
}

/// Map a character to the code point used for glyph lookup
///
/// ASCII maps to itself and `°` to [`DEGREE`]. Everything else maps to a
/// code point without a glyph so it still takes up one blank cell.
pub fn code_point(ch: char) -> u8 {
    match ch {
        '°' => DEGREE,
        c if c.is_ascii() => c as u8,
        _ => 0,
    }
}

/// Recover a digit, minus or space from a rendered pattern
///
/// Several letters share patterns with digits (`O`/`0`, `S`/`5`), so the
/// reverse lookup is limited to the characters the number formatter emits.
pub fn decode_digit(pattern: u8) -> Option<char> {
    DECODABLE
        .iter()
        .find(|&&ch| glyph(ch) == pattern & 0x7F)
        .map(|&ch| ch as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_patterns() {
        assert_eq!(glyph(b'0'), 0b0111111);
        assert_eq!(glyph(b'1'), 0b0000110);
        assert_eq!(glyph(b'8'), 0b1111111);
        assert_eq!(glyph(b'-'), 0b1000000);
    }

    #[test]
    fn test_out_of_range_is_blank() {
        assert_eq!(glyph(0), BLANK);
        assert_eq!(glyph(31), BLANK);
        assert_eq!(glyph(129), BLANK);
        assert_eq!(glyph(255), BLANK);
        assert_eq!(glyph(b' '), BLANK);
        assert_eq!(glyph(127), BLANK);
    }

    #[test]
    fn test_degree_symbol() {
        assert_eq!(glyph(DEGREE), 0b1100011);
    }

    #[test]
    fn test_code_points() {
        assert_eq!(code_point('7'), b'7');
        assert_eq!(code_point('°'), DEGREE);
        assert_eq!(glyph(code_point('é')), BLANK);
    }

    #[test]
    fn test_decode_digits() {
        for ch in b'0'..=b'9' {
            assert_eq!(decode_digit(glyph(ch)), Some(ch as char));
        }
        assert_eq!(decode_digit(glyph(b'-')), Some('-'));
        assert_eq!(decode_digit(BLANK), Some(' '));
        assert_eq!(decode_digit(glyph(b'A')), None);
    }
}
