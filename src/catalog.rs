use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_embed::RustEmbed;

use crate::engine::conjugation::TargetForm;

/// Kanji column value meaning the verb has no kanji form.
pub const NO_KANJI: &str = "None";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogVerb {
    pub base: String,
    pub kanji: Option<String>,
}

/// Verbs and forms available for drilling, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub verbs: Vec<CatalogVerb>,
    pub forms: Vec<TargetForm>,
}

impl Catalog {
    /// Load both catalogs, falling back to the bundled ones for missing paths.
    pub fn load(verbs: Option<&Path>, forms: Option<&Path>) -> Result<Self> {
        let verbs = match verbs {
            Some(path) => read_file(path)?,
            None => embedded("verbs.jvp")?,
        };
        let forms = match forms {
            Some(path) => read_file(path)?,
            None => embedded("forms.jvp")?,
        };

        let catalog = Self {
            verbs: parse_verbs(&verbs),
            forms: parse_forms(&forms)?,
        };

        tracing::debug!(
            verbs = catalog.verbs.len(),
            forms = catalog.forms.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Every (verb, form) pair, verbs outermost.
    pub fn pairs(&self) -> impl Iterator<Item = (&CatalogVerb, TargetForm)> {
        self.verbs
            .iter()
            .flat_map(|verb| self.forms.iter().map(move |&form| (verb, form)))
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))
}

fn embedded(name: &str) -> Result<String> {
    let file = Assets::get(name).with_context(|| format!("missing bundled catalog {name}"))?;
    let text = std::str::from_utf8(&file.data)
        .with_context(|| format!("bundled catalog {name} is not UTF-8"))?;
    Ok(text.to_string())
}

/// Parse `base kanji` lines. Blank lines are skipped; a missing kanji column
/// reads the same as `None`.
pub fn parse_verbs(text: &str) -> Vec<CatalogVerb> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let base = tokens.next()?;
            let kanji = tokens.next().filter(|&k| k != NO_KANJI);
            Some(CatalogVerb {
                base: base.to_string(),
                kanji: kanji.map(str::to_string),
            })
        })
        .collect()
}

pub fn parse_forms(text: &str) -> Result<Vec<TargetForm>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.parse::<TargetForm>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;

    #[test]
    fn test_parse_verbs() {
        let verbs = parse_verbs("かく 書く\n\n  する None\nみる 見る\n");
        assert_eq!(verbs.len(), 3);
        assert_eq!(verbs[0].base, "かく");
        assert_eq!(verbs[0].kanji.as_deref(), Some("書く"));
        assert_eq!(verbs[1].base, "する");
        assert_eq!(verbs[1].kanji, None);
    }

    #[test]
    fn test_parse_forms() {
        let forms = parse_forms("ます\nて\n\nた\nnai\n").unwrap();
        assert_eq!(
            forms,
            [TargetForm::Masu, TargetForm::Te, TargetForm::Ta, TargetForm::Nai]
        );
    }

    #[test]
    fn test_parse_forms_rejects_unknown() {
        let err = parse_forms("ます\nよう\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DrillError>(),
            Some(&DrillError::UnsupportedForm("よう".to_string()))
        );
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::load(None, None).unwrap();
        assert!(!catalog.verbs.is_empty());
        assert_eq!(catalog.forms.len(), 4);
        assert_eq!(
            catalog.pairs().count(),
            catalog.verbs.len() * catalog.forms.len()
        );
    }

    #[test]
    fn test_bundled_verbs_conjugate() {
        use crate::engine::conjugation::{classify, conjugate};

        let catalog = Catalog::load(None, None).unwrap();
        for (verb, form) in catalog.pairs() {
            let class = classify(&verb.base, verb.kanji.as_deref()).unwrap();
            let answers = conjugate(&verb.base, verb.kanji.as_deref(), class, form).unwrap();
            assert!(!answers.is_empty(), "{} {form}", verb.base);
        }
    }
}
