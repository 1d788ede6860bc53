//! Character classification tables.
//!
//! ASCII is resolved with a single lookup into a 128 entry table, anything above that
//! goes through the unicode `XID` tables and the list of `Zs` spaces.

use bitflags::bitflags;
use unicode_xid::UnicodeXID;

const DEC: u16 = 1 << 0;
const HXD: u16 = 1 << 1;
const OCT: u16 = 1 << 2;
const BIN: u16 = 1 << 3;
const SEP: u16 = 1 << 4;
const IDS: u16 = 1 << 5;
const IDP: u16 = 1 << 6;
const WSP: u16 = 1 << 7;
const LNT: u16 = 1 << 8;

bitflags! {
    /// The lexical categories a code point belongs to.
    pub struct CharFlags: u16 {
        const DECIMAL = DEC;
        const HEX = HXD;
        const OCTAL = OCT;
        const BINARY = BIN;
        /// The numeric separator `_`.
        const SEPARATOR = SEP;
        const IDENT_START = IDS;
        const IDENT_PART = IDP;
        const WHITESPACE = WSP;
        const LINE_TERMINATOR = LNT;
    }
}

const __: u16 = 0;
const WS: u16 = WSP;
const LT: u16 = LNT;
const ID: u16 = IDS | IDP;
const HL: u16 = IDS | IDP | HXD;
const BN: u16 = DEC | HXD | OCT | BIN | IDP;
const OC: u16 = DEC | HXD | OCT | IDP;
const DC: u16 = DEC | HXD | IDP;
const US: u16 = IDS | IDP | SEP;

#[rustfmt::skip]
static ASCII_FLAGS: [u16; 128] = [
    //  0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F   //
       __, __, __, __, __, __, __, __, __, WS, LT, WS, WS, LT, __, __, // 0
       __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
       WS, __, __, __, ID, __, __, __, __, __, __, __, __, __, __, __, // 2
       BN, BN, OC, OC, OC, OC, OC, OC, DC, DC, __, __, __, __, __, __, // 3
       __, HL, HL, HL, HL, HL, HL, ID, ID, ID, ID, ID, ID, ID, ID, ID, // 4
       ID, ID, ID, ID, ID, ID, ID, ID, ID, ID, ID, __, __, __, __, US, // 5
       __, HL, HL, HL, HL, HL, HL, ID, ID, ID, ID, ID, ID, ID, ID, ID, // 6
       ID, ID, ID, ID, ID, ID, ID, ID, ID, ID, ID, __, __, __, __, __, // 7
];

// Unicode spaces, designated by the `Zs` unicode property
const UNICODE_SPACES: [char; 16] = [
    '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{202F}', '\u{205F}', '\u{3000}',
];

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';
const BOM: char = '\u{FEFF}';

/// Classify an ASCII byte, bytes above `0x7F` yield no categories.
#[inline]
pub fn byte_flags(byte: u8) -> CharFlags {
    match ASCII_FLAGS.get(byte as usize) {
        Some(bits) => CharFlags::from_bits_truncate(*bits),
        None => CharFlags::empty(),
    }
}

/// Classify any code point.
pub fn char_flags(c: char) -> CharFlags {
    if c.is_ascii() {
        return byte_flags(c as u8);
    }

    let mut flags = CharFlags::empty();
    if c == '\u{2028}' || c == '\u{2029}' {
        flags |= CharFlags::LINE_TERMINATOR;
    } else if c == BOM || UNICODE_SPACES.contains(&c) {
        flags |= CharFlags::WHITESPACE;
    } else if UnicodeXID::is_xid_start(c) {
        flags |= CharFlags::IDENT_START | CharFlags::IDENT_PART;
    } else if UnicodeXID::is_xid_continue(c) || c == ZWNJ || c == ZWJ {
        flags |= CharFlags::IDENT_PART;
    }
    flags
}

#[inline]
pub fn is_id_start(c: char) -> bool {
    char_flags(c).contains(CharFlags::IDENT_START)
}

#[inline]
pub fn is_id_part(c: char) -> bool {
    char_flags(c).contains(CharFlags::IDENT_PART)
}

#[inline]
pub fn is_linebreak(c: char) -> bool {
    char_flags(c).contains(CharFlags::LINE_TERMINATOR)
}

#[inline]
pub fn is_whitespace(c: char) -> bool {
    char_flags(c).contains(CharFlags::WHITESPACE)
}

/// Whether `byte` is a digit in `radix`, only 2, 8, 10 and 16 are valid radixes.
#[inline]
pub fn is_radix_digit(byte: u8, radix: u32) -> bool {
    let flag = match radix {
        2 => CharFlags::BINARY,
        8 => CharFlags::OCTAL,
        16 => CharFlags::HEX,
        _ => CharFlags::DECIMAL,
    };
    byte_flags(byte).contains(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_belong_to_several_categories() {
        let one = char_flags('1');
        assert!(one.contains(CharFlags::DECIMAL | CharFlags::HEX | CharFlags::OCTAL | CharFlags::BINARY));
        let eight = char_flags('8');
        assert!(eight.contains(CharFlags::DECIMAL | CharFlags::HEX));
        assert!(!eight.contains(CharFlags::OCTAL));
        assert!(char_flags('f').contains(CharFlags::HEX | CharFlags::IDENT_START));
        assert!(!char_flags('g').contains(CharFlags::HEX));
    }

    #[test]
    fn separator_is_an_identifier_char() {
        assert!(char_flags('_').contains(CharFlags::SEPARATOR | CharFlags::IDENT_START));
        assert!(is_id_start('$'));
        assert!(!is_id_start('5'));
        assert!(is_id_part('5'));
    }

    #[test]
    fn unicode_categories() {
        assert!(is_id_start('é'));
        assert!(is_id_start('日'));
        assert!(is_id_part(ZWJ));
        assert!(!is_id_start(ZWJ));
        assert!(is_whitespace('\u{3000}'));
        assert!(is_whitespace(BOM));
        assert!(is_linebreak('\u{2028}'));
        assert!(is_linebreak('\r'));
        assert!(!is_linebreak('\u{00A0}'));
    }

    #[test]
    fn radix_digits() {
        assert!(is_radix_digit(b'1', 2));
        assert!(!is_radix_digit(b'2', 2));
        assert!(is_radix_digit(b'7', 8));
        assert!(!is_radix_digit(b'8', 8));
        assert!(is_radix_digit(b'F', 16));
        assert!(!is_radix_digit(b'_', 10));
    }
}
