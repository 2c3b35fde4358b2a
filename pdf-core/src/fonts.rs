/// The standard PDF fonts this engine can place. They need no embedding
/// and are shared by every page of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 2] = [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold];

    /// Resource name used in content streams (e.g. "F1").
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }

    /// BaseFont name written into the font dictionary.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Returns the width of a character in 1/1000 em units.
    /// Latin-1 letters and unmapped characters use a default width.
    pub fn char_width(&self, ch: char) -> u16 {
        let code = ch as u32;
        if (32..=126).contains(&code) {
            let index = (code - 32) as usize;
            return match self {
                BuiltinFont::Helvetica => HELVETICA_WIDTHS[index],
                BuiltinFont::HelveticaBold => HELVETICA_BOLD_WIDTHS[index],
            };
        }
        match WIN_ANSI_EXTRAS.iter().find(|extra| extra.0 == ch) {
            Some(&(_, _, regular, bold)) => match self {
                BuiltinFont::Helvetica => regular,
                BuiltinFont::HelveticaBold => bold,
            },
            None => DEFAULT_WIDTH,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure(&self, text: &str, font_size: f64) -> f64 {
        let total: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        total as f64 * font_size / 1000.0
    }
}

/// Adobe AFM widths for Helvetica, ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32..=47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48..=63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64..=79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80..=95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96..=111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112..=126
];

/// Adobe AFM widths for Helvetica-Bold, ASCII 32..=126, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32..=47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48..=63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64..=79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80..=95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96..=111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112..=126
];

const DEFAULT_WIDTH: u16 = 556;

/// Byte for `ch` under WinAnsiEncoding, or `None` when the standard
/// fonts have no glyph for it.
pub fn win_ansi_code(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(ch as u8),
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|extra| extra.0 == ch)
            .map(|extra| extra.1),
    }
}

/// WinAnsi 0x80..=0x9F: character, code, Helvetica and Helvetica-Bold
/// AFM widths.
const WIN_ANSI_EXTRAS: [(char, u8, u16, u16); 27] = [
    ('\u{20ac}', 0x80, 556, 556), // Euro
    ('\u{201a}', 0x82, 222, 278), // quotesinglbase
    ('\u{0192}', 0x83, 556, 556), // florin
    ('\u{201e}', 0x84, 333, 500), // quotedblbase
    ('\u{2026}', 0x85, 1000, 1000), // ellipsis
    ('\u{2020}', 0x86, 556, 556), // dagger
    ('\u{2021}', 0x87, 556, 556), // daggerdbl
    ('\u{02c6}', 0x88, 333, 333), // circumflex
    ('\u{2030}', 0x89, 1000, 1000), // perthousand
    ('\u{0160}', 0x8a, 667, 667), // Scaron
    ('\u{2039}', 0x8b, 333, 333), // guilsinglleft
    ('\u{0152}', 0x8c, 1000, 1000), // OE
    ('\u{017d}', 0x8e, 611, 611), // Zcaron
    ('\u{2018}', 0x91, 222, 278), // quoteleft
    ('\u{2019}', 0x92, 222, 278), // quoteright
    ('\u{201c}', 0x93, 333, 500), // quotedblleft
    ('\u{201d}', 0x94, 333, 500), // quotedblright
    ('\u{2022}', 0x95, 350, 350), // bullet
    ('\u{2013}', 0x96, 556, 556), // endash
    ('\u{2014}', 0x97, 1000, 1000), // emdash
    ('\u{02dc}', 0x98, 333, 333), // tilde
    ('\u{2122}', 0x99, 1000, 1000), // trademark
    ('\u{0161}', 0x9a, 500, 556), // scaron
    ('\u{203a}', 0x9b, 333, 333), // guilsinglright
    ('\u{0153}', 0x9c, 944, 944), // oe
    ('\u{017e}', 0x9e, 500, 500), // zcaron
    ('\u{0178}', 0x9f, 667, 667), // Ydieresis
];
