use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::engine::alias::AliasTable;
use crate::engine::conjugation::TargetForm;
use crate::error::DrillError;

/// Weight given to every pair when the history is first created.
pub const INITIAL_WEIGHT: f64 = 1.0;
/// Weight given to pairs added to an existing history, so new content comes up sooner.
pub const FRESH_WEIGHT: f64 = 3.0;
/// Consecutive right answers after which past errors are forgiven.
const MASTERY_STREAK: u32 = 5;

/// Performance record for one (verb base, form) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub verb_base: String,
    pub verb_kanji: Option<String>,
    pub verb_form: TargetForm,
    #[serde(rename = "sample_time")]
    pub sample_count: u32,
    #[serde(rename = "error_time")]
    pub error_count: u32,
    #[serde(rename = "right_time")]
    pub right_count: u32,
    #[serde(rename = "continue_error_time")]
    pub continue_error_count: u32,
    #[serde(rename = "continue_right_time")]
    pub continue_right_count: u32,
    pub relative_weight: f64,
}

impl HistoryRecord {
    pub fn new(base: &str, kanji: Option<&str>, form: TargetForm, weight: f64) -> Self {
        Self {
            verb_base: base.to_string(),
            verb_kanji: kanji.map(str::to_string),
            verb_form: form,
            sample_count: 0,
            error_count: 0,
            right_count: 0,
            continue_error_count: 0,
            continue_right_count: 0,
            relative_weight: weight,
        }
    }

    /// Apply one attempt and recompute the weight.
    pub fn record(&mut self, correct: bool) {
        self.sample_count += 1;

        if correct {
            self.right_count += 1;
            self.continue_right_count += 1;
            self.continue_error_count = 0;

            if self.continue_right_count > MASTERY_STREAK {
                self.continue_right_count = 0;
                self.error_count = 0;
            }
        } else {
            self.error_count += 1;
            self.continue_error_count += 1;
            self.continue_right_count = 0;
        }

        self.relative_weight = self.weight();
    }

    /// Errors, especially recent ones, raise the weight; practice lowers it.
    pub fn weight(&self) -> f64 {
        let numerator =
            1.0 + 3.0 * self.error_count as f64 + 5.0 * self.continue_error_count as f64;
        let denominator = 1.0
            + self.sample_count as f64
            + self.right_count as f64
            + 2.0 * self.continue_right_count as f64;
        numerator / denominator
    }
}

/// Bring the persisted history in line with the catalog.
///
/// Without a history every catalog pair starts at [`INITIAL_WEIGHT`]. With one,
/// only the missing pairs are appended, at `fresh_weight`, after the existing rows.
pub fn reconcile(
    catalog: &Catalog,
    existing: Option<Vec<HistoryRecord>>,
    fresh_weight: f64,
) -> Vec<HistoryRecord> {
    let Some(mut records) = existing else {
        let records = missing_pairs(catalog, &HashSet::new(), INITIAL_WEIGHT);
        tracing::info!(records = records.len(), "created practice history");
        return records;
    };

    let known: HashSet<(String, TargetForm)> = records
        .iter()
        .map(|r| (r.verb_base.clone(), r.verb_form))
        .collect();
    let known_bases: HashSet<&str> = known.iter().map(|(base, _)| base.as_str()).collect();
    let known_forms: HashSet<TargetForm> = known.iter().map(|&(_, form)| form).collect();

    let new_bases = catalog
        .verbs
        .iter()
        .any(|v| !known_bases.contains(v.base.as_str()));
    let new_forms = catalog.forms.iter().any(|f| !known_forms.contains(f));

    if new_bases && new_forms {
        tracing::warn!(
            "catalog gained both verbs and forms since the last run; \
             adding every missing pair once"
        );
    }

    let missing = missing_pairs(catalog, &known, fresh_weight);

    if !missing.is_empty() {
        tracing::info!(added = missing.len(), "reconciled practice history");
    }

    records.extend(missing);
    records
}

/// One new record per catalog pair not in `known`, in catalog order.
///
/// A base listed twice in the catalog still yields a single row per form.
fn missing_pairs(
    catalog: &Catalog,
    known: &HashSet<(String, TargetForm)>,
    weight: f64,
) -> Vec<HistoryRecord> {
    let mut added = HashSet::new();
    let mut records = Vec::new();

    for (verb, form) in catalog.pairs() {
        let key = (verb.base.clone(), form);

        if known.contains(&key) {
            continue;
        }

        if !added.insert(key) {
            tracing::debug!(base = %verb.base, %form, "skipping repeated catalog verb");
            continue;
        }

        records.push(HistoryRecord::new(
            &verb.base,
            verb.kanji.as_deref(),
            form,
            weight,
        ));
    }

    records
}

pub fn weights(records: &[HistoryRecord]) -> Vec<f64> {
    records.iter().map(|r| r.relative_weight).collect()
}

/// Draw a record index proportionally to the relative weights.
pub fn draw<R: Rng + ?Sized>(records: &[HistoryRecord], rng: &mut R) -> Result<usize, DrillError> {
    let table = AliasTable::new(&weights(records))?;
    Ok(table.sample(rng))
}

/// Index of the unique record for `base` in `form`.
pub fn find_record(
    records: &[HistoryRecord],
    base: &str,
    form: TargetForm,
) -> Result<Option<usize>, DrillError> {
    let mut matches = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.verb_base == base && r.verb_form == form)
        .map(|(index, _)| index);

    let first = matches.next();

    if matches.next().is_some() {
        return Err(DrillError::DuplicateRecord {
            base: base.to_string(),
            form,
        });
    }

    Ok(first)
}

/// Record an attempt on the matching row.
pub fn record_attempt(
    records: &mut [HistoryRecord],
    base: &str,
    form: TargetForm,
    correct: bool,
) -> Result<usize, DrillError> {
    let index = find_record(records, base, form)?.ok_or_else(|| DrillError::MissingRecord {
        base: base.to_string(),
        form,
    })?;

    records[index].record(correct);
    Ok(index)
}

/// The `n` records with the highest relative weight, hardest first.
pub fn hardest(records: &[HistoryRecord], n: usize) -> Vec<&HistoryRecord> {
    let mut sorted: Vec<&HistoryRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.relative_weight.total_cmp(&a.relative_weight));
    sorted.truncate(n);
    sorted
}
