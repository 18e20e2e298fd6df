use std::fmt;

use crate::engine::conjugation::{self, ConjugationClass, TargetForm};
use crate::error::DrillError;

/// One quiz item: a verb to put into a target form.
#[derive(Clone, Debug)]
pub struct Verb {
    pub base: String,
    pub kanji: Option<String>,
    pub form: TargetForm,
    pub class: Option<ConjugationClass>,
    pub accepted_answers: Vec<String>,
    pub user_answer: Option<String>,
    pub is_correct: bool,
}

impl Verb {
    pub fn new(base: &str, kanji: Option<&str>, form: TargetForm) -> Self {
        Self {
            base: base.to_string(),
            kanji: kanji.map(str::to_string),
            form,
            class: None,
            accepted_answers: Vec::new(),
            user_answer: None,
            is_correct: false,
        }
    }

    /// Classify the verb and compute its accepted answers.
    pub fn conjugate(&mut self) -> Result<(), DrillError> {
        let class = conjugation::classify(&self.base, self.kanji.as_deref())?;
        self.accepted_answers =
            conjugation::conjugate(&self.base, self.kanji.as_deref(), class, self.form)?;
        self.class = Some(class);
        Ok(())
    }

    /// Exact membership test against the accepted answers.
    pub fn check(&mut self, answer: &str) -> bool {
        self.is_correct = self.accepted_answers.iter().any(|a| a == answer);
        self.user_answer = Some(answer.to_string());
        self.is_correct
    }

    pub fn question(&self) -> String {
        match &self.kanji {
            Some(kanji) => format!(
                "Please enter the {}形 of {kanji} ({}): ",
                self.form, self.base
            ),
            None => format!("Please enter the {}形 of {}: ", self.form, self.base),
        }
    }

    /// Accepted answers rendered as `[ a or b]`.
    pub fn answer_list(&self) -> String {
        format!("[ {}]", self.accepted_answers.join(" or "))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kanji {
            Some(kanji) => write!(f, "verb: {kanji} ({})", self.base)?,
            None => write!(f, "verb: {}", self.base)?,
        }

        write!(
            f,
            ", required form: {}, right answer: {}",
            self.form,
            self.answer_list()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conjugate_and_check() {
        let mut verb = Verb::new("かく", Some("書く"), TargetForm::Masu);
        verb.conjugate().unwrap();
        assert_eq!(verb.class, Some(ConjugationClass::Consonant));
        assert_eq!(verb.accepted_answers, ["書きます", "かきます"]);

        assert!(verb.check("かきます"));
        assert!(verb.is_correct);
        assert!(!verb.check("かきます "));
        assert!(!verb.is_correct);
        assert_eq!(verb.user_answer.as_deref(), Some("かきます "));
    }

    #[test]
    fn test_question() {
        let verb = Verb::new("かく", Some("書く"), TargetForm::Te);
        assert_eq!(verb.question(), "Please enter the て形 of 書く (かく): ");

        let verb = Verb::new("する", None, TargetForm::Nai);
        assert_eq!(verb.question(), "Please enter the ない形 of する: ");
    }

    #[test]
    fn test_display() {
        let mut verb = Verb::new("くる", Some("来る"), TargetForm::Nai);
        verb.conjugate().unwrap();
        assert_eq!(
            verb.to_string(),
            "verb: 来る (くる), required form: ない, right answer: [ 来ない or こない]"
        );
    }

    #[test]
    fn test_conjugate_unknown_symbol() {
        let mut verb = Verb::new("ぱんる", None, TargetForm::Te);
        assert_eq!(
            verb.conjugate(),
            Err(DrillError::UnknownSymbol("ん".to_string()))
        );
        assert!(verb.accepted_answers.is_empty());
    }
}
