use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::engine::conjugation::TargetForm;
use crate::engine::history::{self, HistoryRecord};
use crate::session::prompt::Prompt;
use crate::session::verb::Verb;
use crate::store::HistoryStore;
use crate::store::schema::HistoryData;

/// A drawn (verb, form) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draw {
    pub base: String,
    pub kanji: Option<String>,
    pub form: TargetForm,
}

/// Totals for one run of the quiz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: usize,
    pub correct: usize,
}

impl SessionSummary {
    pub fn incorrect(&self) -> usize {
        self.rounds - self.correct
    }

    pub fn accuracy(&self) -> f64 {
        if self.rounds == 0 {
            return 100.0;
        }
        self.correct as f64 / self.rounds as f64 * 100.0
    }
}

/// Drives the draw, quiz, check and record loop over a persisted history.
pub struct PracticeSession<S> {
    history: HistoryData,
    store: S,
    rng: SmallRng,
}

impl<S: HistoryStore> PracticeSession<S> {
    /// Load the history from `store` and reconcile it with `catalog`.
    pub fn open(
        catalog: &Catalog,
        store: S,
        fresh_weight: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        let existing = match store.load_history()? {
            Some(data) if data.needs_reset() => {
                tracing::warn!(
                    version = data.schema_version,
                    "practice history has a stale schema, starting over"
                );
                None
            }
            Some(data) => Some(data.records),
            None => None,
        };

        let records = history::reconcile(catalog, existing, fresh_weight);

        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            history: HistoryData::new(records),
            store,
            rng,
        })
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.history.records
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pick the next pair, favouring heavily weighted records.
    pub fn draw_next(&mut self) -> Result<Draw> {
        let index = history::draw(&self.history.records, &mut self.rng)?;
        let record = &self.history.records[index];

        Ok(Draw {
            base: record.verb_base.clone(),
            kanji: record.verb_kanji.clone(),
            form: record.verb_form,
        })
    }

    /// Update the record for an answered verb and persist the whole history.
    pub fn record_attempt(&mut self, verb: &Verb) -> Result<()> {
        let index = history::record_attempt(
            &mut self.history.records,
            &verb.base,
            verb.form,
            verb.is_correct,
        )?;

        let record = &self.history.records[index];
        tracing::debug!(
            base = %record.verb_base,
            form = %record.verb_form,
            correct = verb.is_correct,
            weight = record.relative_weight,
            "recorded attempt"
        );

        self.store
            .save_history(&self.history)
            .context("saving practice history")
    }

    /// Play one round: draw, conjugate, ask, check and record.
    pub fn play_round<P: Prompt + ?Sized>(&mut self, prompt: &mut P) -> Result<Verb> {
        let draw = self.draw_next()?;
        let mut verb = Verb::new(&draw.base, draw.kanji.as_deref(), draw.form);
        verb.conjugate()?;

        let answer = prompt.ask(&verb.question())?;
        verb.check(&answer);
        prompt.feedback(&verb)?;

        self.record_attempt(&verb)?;
        Ok(verb)
    }

    pub fn run_quiz<P: Prompt + ?Sized>(
        &mut self,
        rounds: usize,
        prompt: &mut P,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        for _ in 0..rounds {
            let verb = self.play_round(prompt)?;
            summary.rounds += 1;

            if verb.is_correct {
                summary.correct += 1;
            }
        }

        Ok(summary)
    }
}
