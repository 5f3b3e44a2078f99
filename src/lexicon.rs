// src/lexicon.rs
//! # Lexicon Store
//!
//! Three read-only mappings loaded once per language:
//! - sentiment words, keyed by stem → signed polarity weight
//! - boosters, keyed by lowercase token form → additive intensifier
//! - negators, keyed by lowercase token form → negation strength
//!
//! Resource layout: `<base_dir>/<language>/{sentiment_words,boosters,negations}.csv`,
//! headerless, two columns `key,weight`. Loading is all-or-nothing: a missing
//! file or a single malformed row fails the whole store.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::LexiconLoadError;

pub const SENTIMENT_WORDS_FILE: &str = "sentiment_words.csv";
pub const BOOSTERS_FILE: &str = "boosters.csv";
pub const NEGATIONS_FILE: &str = "negations.csv";

pub const DEFAULT_LEXICON_DIR: &str = "resources";
pub const DEFAULT_LANGUAGE: &str = "es";

#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    sentiment_words: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negators: HashMap<String, f64>,
}

impl LexiconStore {
    /// Load the three lexicons for `language` under `base_dir`.
    pub fn load(base_dir: impl AsRef<Path>, language: &str) -> Result<Self, LexiconLoadError> {
        let dir = base_dir.as_ref().join(language);

        let sentiment_words = load_weights(&dir.join(SENTIMENT_WORDS_FILE), KeyCase::AsIs)?;
        let boosters = load_weights(&dir.join(BOOSTERS_FILE), KeyCase::Lower)?;
        let negators = load_weights(&dir.join(NEGATIONS_FILE), KeyCase::Lower)?;

        info!(
            dir = %dir.display(),
            language,
            sentiment_words = sentiment_words.len(),
            boosters = boosters.len(),
            negators = negators.len(),
            "lexicons loaded"
        );

        Ok(Self {
            sentiment_words,
            boosters,
            negators,
        })
    }

    /// Build a store from in-memory maps. Booster and negator keys are lowercased.
    pub fn from_maps(
        sentiment_words: HashMap<String, f64>,
        boosters: HashMap<String, f64>,
        negators: HashMap<String, f64>,
    ) -> Self {
        fn lower(m: HashMap<String, f64>) -> HashMap<String, f64> {
            m.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
        }
        Self {
            sentiment_words,
            boosters: lower(boosters),
            negators: lower(negators),
        }
    }

    /// Polarity of a stem; 0.0 when absent.
    #[inline]
    pub fn lookup_sentiment(&self, stem: &str) -> f64 {
        self.sentiment_words.get(stem).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn lookup_booster(&self, key: &str) -> Option<f64> {
        self.boosters.get(key).copied()
    }

    #[inline]
    pub fn lookup_negator(&self, key: &str) -> Option<f64> {
        self.negators.get(key).copied()
    }

    /// (sentiment words, boosters, negators)
    pub fn sizes(&self) -> (usize, usize, usize) {
        (
            self.sentiment_words.len(),
            self.boosters.len(),
            self.negators.len(),
        )
    }
}

#[derive(Clone, Copy)]
enum KeyCase {
    AsIs,
    Lower,
}

fn load_weights(path: &Path, case: KeyCase) -> Result<HashMap<String, f64>, LexiconLoadError> {
    let file = File::open(path).map_err(|source| LexiconLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut out = HashMap::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(path, source))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // blank line
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != 2 {
            return Err(LexiconLoadError::ColumnCount {
                path: path.to_path_buf(),
                line,
                found: record.len(),
            });
        }

        let raw = &record[1];
        let weight: f64 = raw
            .parse()
            .ok()
            .filter(|w: &f64| w.is_finite())
            .ok_or_else(|| LexiconLoadError::InvalidWeight {
                path: path.to_path_buf(),
                line,
                raw: raw.to_string(),
            })?;

        let key = match case {
            KeyCase::AsIs => record[0].to_string(),
            KeyCase::Lower => record[0].to_lowercase(),
        };
        out.insert(key, weight);
    }

    debug!(path = %path.display(), entries = out.len(), "lexicon file parsed");
    Ok(out)
}

fn csv_error(path: &Path, source: csv::Error) -> LexiconLoadError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    LexiconLoadError::Csv {
        path: path.to_path_buf(),
        line,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_lexicons(dir: &Path, sentiment: &str, boosters: &str, negations: &str) {
        let es = dir.join("es");
        fs::create_dir_all(&es).unwrap();
        fs::write(es.join(SENTIMENT_WORDS_FILE), sentiment).unwrap();
        fs::write(es.join(BOOSTERS_FILE), boosters).unwrap();
        fs::write(es.join(NEGATIONS_FILE), negations).unwrap();
    }

    #[test]
    fn loads_all_three_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_lexicons(
            tmp.path(),
            "buen,1.0\ninjust,-1.5\n\n",
            "Muy,1.0\nbastante,0.5\n",
            "no,1.0\n",
        );

        let lex = LexiconStore::load(tmp.path(), "es").unwrap();
        assert_eq!(lex.sizes(), (2, 2, 1));
        assert_eq!(lex.lookup_sentiment("injust"), -1.5);
        assert_eq!(lex.lookup_sentiment("desconocido"), 0.0);
        // booster keys are lowercased at load time
        assert_eq!(lex.lookup_booster("muy"), Some(1.0));
        assert_eq!(lex.lookup_booster("Muy"), None);
        assert_eq!(lex.lookup_negator("no"), Some(1.0));
        assert_eq!(lex.lookup_negator("nunca"), None);
    }

    #[test]
    fn missing_file_fails_whole_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_lexicons(tmp.path(), "buen,1.0\n", "muy,1.0\n", "no,1.0\n");
        fs::remove_file(tmp.path().join("es").join(NEGATIONS_FILE)).unwrap();

        let err = LexiconStore::load(tmp.path(), "es").unwrap_err();
        assert!(matches!(err, LexiconLoadError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn unknown_language_is_a_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_lexicons(tmp.path(), "buen,1.0\n", "muy,1.0\n", "no,1.0\n");
        assert!(LexiconStore::load(tmp.path(), "fr").is_err());
    }

    #[test]
    fn non_numeric_weight_is_rejected_with_line() {
        let tmp = tempfile::tempdir().unwrap();
        write_lexicons(tmp.path(), "buen,1.0\nmal,abc\n", "muy,1.0\n", "no,1.0\n");

        match LexiconStore::load(tmp.path(), "es").unwrap_err() {
            LexiconLoadError::InvalidWeight { line, raw, .. } => {
                assert_eq!(line, 2);
                assert_eq!(raw, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_lexicons(tmp.path(), "buen,1.0\n", "muy,1.0,extra\n", "no,1.0\n");

        let err = LexiconStore::load(tmp.path(), "es").unwrap_err();
        assert!(
            matches!(err, LexiconLoadError::ColumnCount { found: 3, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn from_maps_lowercases_trigger_keys() {
        let lex = LexiconStore::from_maps(
            HashMap::from([("buen".to_string(), 1.0)]),
            HashMap::from([("MUY".to_string(), 1.0)]),
            HashMap::from([("No".to_string(), 0.8)]),
        );
        assert_eq!(lex.lookup_booster("muy"), Some(1.0));
        assert_eq!(lex.lookup_negator("no"), Some(0.8));
    }
}
