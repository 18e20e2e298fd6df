//! The hiragana syllable table and per-kana vowel and row classification.

use std::fmt;

use crate::error::DrillError;

/// Vowel column of the syllable table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vowel {
    A,
    I,
    U,
    E,
    O,
}

impl Vowel {
    pub const ALL: [Vowel; 5] = [Vowel::A, Vowel::I, Vowel::U, Vowel::E, Vowel::O];

    fn index(self) -> usize {
        self as usize
    }
}

/// Consonant row of the syllable table, in table-scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Row {
    A,
    K,
    S,
    T,
    N,
    H,
    M,
    Y,
    R,
    W,
    G,
    Z,
    D,
    B,
    P,
}

impl Row {
    pub const ALL: [Row; 15] = [
        Row::A,
        Row::K,
        Row::S,
        Row::T,
        Row::N,
        Row::H,
        Row::M,
        Row::Y,
        Row::R,
        Row::W,
        Row::G,
        Row::Z,
        Row::D,
        Row::B,
        Row::P,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Hiragana table indexed by `[Row][Vowel]`. The や and わ rows reuse the
/// あ-row glyphs for their empty cells.
const TABLE: [[char; 5]; 15] = [
    ['あ', 'い', 'う', 'え', 'お'],
    ['か', 'き', 'く', 'け', 'こ'],
    ['さ', 'し', 'す', 'せ', 'そ'],
    ['た', 'ち', 'つ', 'て', 'と'],
    ['な', 'に', 'ぬ', 'ね', 'の'],
    ['は', 'ひ', 'ふ', 'へ', 'ほ'],
    ['ま', 'み', 'む', 'め', 'も'],
    ['や', 'い', 'ゆ', 'え', 'よ'],
    ['ら', 'り', 'る', 'れ', 'ろ'],
    ['わ', 'い', 'う', 'え', 'を'],
    ['が', 'ぎ', 'ぐ', 'げ', 'ご'],
    ['ざ', 'じ', 'ず', 'ぜ', 'ぞ'],
    ['だ', 'ぢ', 'づ', 'で', 'ど'],
    ['ば', 'び', 'ぶ', 'べ', 'ぼ'],
    ['ぱ', 'ぴ', 'ぷ', 'ぺ', 'ぽ'],
];

/// Glyph at the given table cell.
pub fn cell(row: Row, vowel: Vowel) -> char {
    TABLE[row.index()][vowel.index()]
}

/// One kana treated as an atomic phonetic symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SyllabicUnit {
    symbol: char,
}

impl SyllabicUnit {
    /// Construct a unit, rejecting symbols outside the table.
    pub fn new(symbol: char) -> Result<Self, DrillError> {
        let unit = Self { symbol };
        unit.vowel()?;
        Ok(unit)
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn vowel(&self) -> Result<Vowel, DrillError> {
        classify_vowel(self.symbol)
    }

    pub fn row(&self) -> Result<Row, DrillError> {
        classify_row(self.symbol)
    }

    /// The unit in the same consonant row carrying `vowel`.
    pub fn substitute_vowel(&self, vowel: Vowel) -> Result<Self, DrillError> {
        let row = self.row()?;
        Ok(Self {
            symbol: cell(row, vowel),
        })
    }
}

impl fmt::Display for SyllabicUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

pub fn classify_vowel(symbol: char) -> Result<Vowel, DrillError> {
    TABLE
        .iter()
        .find_map(|row| {
            row.iter()
                .position(|&c| c == symbol)
                .map(|column| Vowel::ALL[column])
        })
        .ok_or_else(|| DrillError::UnknownSymbol(symbol.to_string()))
}

/// Consonant row of `symbol`. Glyphs shared between rows resolve to the
/// first row in scan order, which for い, う and え is the vowel-only あ row.
pub fn classify_row(symbol: char) -> Result<Row, DrillError> {
    if matches!(symbol, 'い' | 'う' | 'え') {
        return Ok(Row::A);
    }

    TABLE
        .iter()
        .position(|row| row.contains(&symbol))
        .map(|index| Row::ALL[index])
        .ok_or_else(|| DrillError::UnknownSymbol(symbol.to_string()))
}
