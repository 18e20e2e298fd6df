//! Rule-based conjugation of verb bases into the drilled forms.
//!
//! A verb is first classified into one of three paradigms, after which each
//! (class, form) pair is handled by an exhaustive match. Rules are applied
//! independently to the kana base and, when present, to the kanji form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::kana::{SyllabicUnit, Vowel};
use crate::error::DrillError;

/// Class-1 verbs ending in -iru/-eru, matched on their kanji form only.
pub const CLASS_ONE_EXCEPTIONS: [&str; 8] = [
    "帰る", "滑る", "入る", "切る", "知る", "要る", "走る", "減る",
];

/// The grammatical form being drilled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetForm {
    /// Polite non-past.
    #[serde(rename = "ます", alias = "masu")]
    Masu,
    /// Connective.
    #[serde(rename = "て", alias = "te")]
    Te,
    /// Plain past.
    #[serde(rename = "た", alias = "ta")]
    Ta,
    /// Plain negative.
    #[serde(rename = "ない", alias = "nai")]
    Nai,
}

impl TargetForm {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetForm::Masu => "ます",
            TargetForm::Te => "て",
            TargetForm::Ta => "た",
            TargetForm::Nai => "ない",
        }
    }
}

impl fmt::Display for TargetForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetForm {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ます" | "masu" => Ok(TargetForm::Masu),
            "て" | "te" => Ok(TargetForm::Te),
            "た" | "ta" => Ok(TargetForm::Ta),
            "ない" | "nai" => Ok(TargetForm::Nai),
            other => Err(DrillError::UnsupportedForm(other.to_string())),
        }
    }
}

/// Inflection paradigm of a verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConjugationClass {
    /// Consonant stem (godan).
    Consonant,
    /// Vowel stem (ichidan).
    Vowel,
    /// する and くる.
    Irregular,
}

impl ConjugationClass {
    /// Class number as taught: 1, 2 or 3.
    pub fn number(self) -> u8 {
        match self {
            ConjugationClass::Consonant => 1,
            ConjugationClass::Vowel => 2,
            ConjugationClass::Irregular => 3,
        }
    }
}

pub fn classify(base: &str, kanji: Option<&str>) -> Result<ConjugationClass, DrillError> {
    if base == "する" || base == "くる" {
        return Ok(ConjugationClass::Irregular);
    }

    let mut chars = base.chars();

    if chars.next_back() != Some('る') {
        return Ok(ConjugationClass::Consonant);
    }

    let Some(previous) = chars.next_back() else {
        return Err(DrillError::UnknownSymbol(base.to_string()));
    };

    match SyllabicUnit::new(previous)?.vowel()? {
        Vowel::U | Vowel::A | Vowel::O => Ok(ConjugationClass::Consonant),
        Vowel::I | Vowel::E => {
            if kanji.is_some_and(|k| CLASS_ONE_EXCEPTIONS.contains(&k)) {
                Ok(ConjugationClass::Consonant)
            } else {
                Ok(ConjugationClass::Vowel)
            }
        }
    }
}

/// Accepted answers for `base`/`kanji` in `form`: kanji form first, then kana.
pub fn conjugate(
    base: &str,
    kanji: Option<&str>,
    class: ConjugationClass,
    form: TargetForm,
) -> Result<Vec<String>, DrillError> {
    match class {
        ConjugationClass::Consonant => conjugate_consonant(base, kanji, form),
        ConjugationClass::Vowel => Ok(with_suffix(base, kanji, vowel_suffix(form))),
        ConjugationClass::Irregular => conjugate_irregular(base, kanji, form),
    }
}

/// Everything except the final character.
fn strip_last(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next_back();
    chars.as_str()
}

fn last_unit(base: &str) -> Result<SyllabicUnit, DrillError> {
    let last = base
        .chars()
        .next_back()
        .ok_or_else(|| DrillError::UnknownSymbol(base.to_string()))?;
    SyllabicUnit::new(last)
}

/// Strip the final unit of both strings and append `suffix`.
fn with_suffix(base: &str, kanji: Option<&str>, suffix: &str) -> Vec<String> {
    let mut answers = Vec::with_capacity(2);

    if let Some(kanji) = kanji {
        answers.push(format!("{}{suffix}", strip_last(kanji)));
    }

    answers.push(format!("{}{suffix}", strip_last(base)));
    answers
}

fn vowel_suffix(form: TargetForm) -> &'static str {
    match form {
        TargetForm::Masu => "ます",
        TargetForm::Te => "て",
        TargetForm::Ta => "た",
        TargetForm::Nai => "ない",
    }
}

/// Sound-change endings for the て and た forms, keyed by the final unit.
fn sound_change(last: char) -> Option<(&'static str, &'static str)> {
    match last {
        'う' | 'つ' | 'る' => Some(("って", "った")),
        'ぶ' | 'む' | 'ぬ' => Some(("んで", "んだ")),
        'く' => Some(("いて", "いた")),
        'ぐ' => Some(("いで", "いだ")),
        'す' => Some(("して", "した")),
        _ => None,
    }
}

fn conjugate_consonant(
    base: &str,
    kanji: Option<&str>,
    form: TargetForm,
) -> Result<Vec<String>, DrillError> {
    let last = last_unit(base)?;

    match form {
        TargetForm::Masu => {
            let stem = last.substitute_vowel(Vowel::I)?;
            Ok(with_suffix(base, kanji, &format!("{stem}ます")))
        }
        TargetForm::Nai => {
            let stem = match last.substitute_vowel(Vowel::A)?.symbol() {
                'あ' => 'わ',
                other => other,
            };
            Ok(with_suffix(base, kanji, &format!("{stem}ない")))
        }
        TargetForm::Te | TargetForm::Ta => {
            let (te, ta) = sound_change(last.symbol())
                .ok_or_else(|| DrillError::UnknownSymbol(last.symbol().to_string()))?;

            let (ending, geminate) = match form {
                TargetForm::Te => (te, "って"),
                _ => (ta, "った"),
            };

            // 行く is the one く-verb taking the geminate ending.
            let pick = |text: &str, iku: &str| {
                let ending = if text == iku { geminate } else { ending };
                format!("{}{ending}", strip_last(text))
            };

            let mut answers = Vec::with_capacity(2);

            if let Some(kanji) = kanji {
                answers.push(pick(kanji, "行く"));
            }

            answers.push(pick(base, "いく"));
            Ok(answers)
        }
    }
}

fn conjugate_irregular(
    base: &str,
    kanji: Option<&str>,
    form: TargetForm,
) -> Result<Vec<String>, DrillError> {
    let kuru = base == "くる";

    let answers = match form {
        TargetForm::Masu => {
            let first = base
                .chars()
                .next()
                .ok_or_else(|| DrillError::UnknownSymbol(base.to_string()))?;
            let stem = SyllabicUnit::new(first)?.substitute_vowel(Vowel::I)?;
            let mut answers = Vec::with_capacity(2);

            if let Some(kanji) = kanji {
                answers.push(format!("{}ます", strip_last(kanji)));
            }

            answers.push(format!("{stem}ます"));
            answers
        }
        TargetForm::Te if kuru => vec!["来て".to_string(), "きて".to_string()],
        TargetForm::Ta if kuru => vec!["来た".to_string(), "きた".to_string()],
        TargetForm::Nai if kuru => vec!["来ない".to_string(), "こない".to_string()],
        TargetForm::Te => vec!["して".to_string()],
        TargetForm::Ta => vec!["した".to_string()],
        TargetForm::Nai => vec!["しない".to_string()],
    };

    Ok(answers)
}
