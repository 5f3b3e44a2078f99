// src/nlp/pipeline.rs
//! Built-in rule-based Spanish pipeline.
//!
//! Order of stages per input text:
//! 1) sentence split on Unicode sentence boundaries (UAX #29)
//! 2) word-boundary tokenization, whitespace dropped, punctuation kept
//! 3) lemma = lowercase form (apocopated adjectives expanded)
//! 4) stem = Snowball Spanish stem of the lemma
//! 5) POS from closed-class lists, orthography, then suffix rules
//! 6) stop-word flag from the Spanish stop list

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stop_word;
use super::{Document, NlpPipeline, PartOfSpeech, Sentence, Token};
use crate::error::PipelineError;

/// Default cap on input size (1 MiB).
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

static RE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}+$").expect("punct regex"));
static RE_SYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{S}+$").expect("symbol regex"));
static RE_NUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Nd}+([.,]\p{Nd}+)*$").expect("number regex"));

pub struct RuleBasedPipeline {
    stemmer: Stemmer,
    max_text_bytes: usize,
}

impl Default for RuleBasedPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleBasedPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBasedPipeline")
            .field("stemmer", &"snowball-spanish")
            .field("max_text_bytes", &self.max_text_bytes)
            .finish()
    }
}

impl RuleBasedPipeline {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_TEXT_BYTES)
    }

    pub fn with_limit(max_text_bytes: usize) -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Spanish),
            max_text_bytes,
        }
    }

    /// Snowball stem of an already-lemmatized word.
    pub fn stem(&self, lemma: &str) -> String {
        self.stemmer.stem(lemma).into_owned()
    }

    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        sentence
            .split_word_bounds()
            .filter(|w| !w.chars().all(char::is_whitespace))
            .enumerate()
            .map(|(i, w)| self.make_token(w, i == 0))
            .collect()
    }

    fn make_token(&self, text: &str, sentence_initial: bool) -> Token {
        let lower = text.to_lowercase();
        let lemma = lemmatize(&lower);
        let stem = self.stem(&lemma);
        let pos = tag(text, &lower, sentence_initial);
        let is_stop = is_stop_word(&lower);
        Token::new(text, lemma, stem, pos, is_stop)
    }
}

impl NlpPipeline for RuleBasedPipeline {
    fn process(&self, text: &str) -> Result<Document, PipelineError> {
        if text.len() > self.max_text_bytes {
            return Err(PipelineError::InputTooLarge {
                size: text.len(),
                limit: self.max_text_bytes,
            });
        }

        let sentences = text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Sentence::new(s, self.tokenize(s)))
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Document::new(sentences))
    }
}

/// Lowercase lemma; apocopated forms map to their full adjective.
fn lemmatize(lower: &str) -> String {
    let full = match lower {
        "gran" => "grande",
        "buen" => "bueno",
        "mal" => "malo",
        "primer" => "primero",
        "tercer" => "tercero",
        "algún" => "alguno",
        "ningún" => "ninguno",
        "cualquier" => "cualquiera",
        other => other,
    };
    full.to_string()
}

const DETERMINERS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
    "ese", "esa", "esos", "esas", "aquel", "aquella", "aquellos", "aquellas", "mi", "mis", "tu",
    "tus", "su", "sus", "nuestro", "nuestra", "nuestros", "nuestras", "cada", "algún", "alguna",
    "algunos", "algunas", "ningún", "ninguna", "todo", "toda", "todos", "todas", "otro", "otra",
    "otros", "otras",
];
const ADPOSITIONS: &[&str] = &[
    "a", "al", "ante", "bajo", "con", "contra", "de", "del", "desde", "durante", "en", "entre",
    "hacia", "hasta", "mediante", "para", "por", "según", "sin", "sobre", "tras",
];
const CCONJ: &[&str] = &["y", "e", "o", "u", "ni", "pero", "sino"];
const SCONJ: &[&str] = &["que", "porque", "aunque", "si", "como", "cuando", "mientras", "pues"];
const PRONOUNS: &[&str] = &[
    "yo", "tú", "él", "ella", "ello", "nosotros", "nosotras", "vosotros", "vosotras", "ellos",
    "ellas", "me", "te", "se", "nos", "os", "le", "les", "lo", "usted", "ustedes", "esto", "eso",
    "aquello", "algo", "nada", "nadie", "alguien", "quien", "quién", "qué", "mí", "ti",
];
const AUXILIARIES: &[&str] = &[
    "ser", "es", "son", "era", "eran", "fue", "fueron", "sea", "sido", "estar", "está", "están",
    "estaba", "estaban", "estuvo", "he", "has", "ha", "hemos", "han", "había", "habían", "hay",
];
const ADVERBS: &[&str] = &[
    "muy", "no", "nunca", "jamás", "tampoco", "bastante", "demasiado", "más", "menos", "tan",
    "bien", "siempre", "ya", "también", "aquí", "allí", "hoy", "ayer", "casi", "poco", "mucho",
    "sí", "realmente", "super", "súper",
];
const ADJECTIVES: &[&str] = &[
    "gran", "grande", "grandes", "buen", "bueno", "buena", "buenos", "buenas", "mal", "malo",
    "mala", "malos", "malas", "mejor", "mejores", "peor", "peores", "justo", "justa", "injusto",
    "injusta", "feliz", "felices", "triste", "tristes", "nuevo", "nueva", "viejo", "vieja",
    "bonito", "bonita", "feo", "fea", "perfecto", "perfecta",
];
const INTERJECTIONS: &[&str] = &["ay", "ojalá", "vaya", "olé", "hola", "bravo"];

const ADJ_SUFFIXES: &[&str] = &[
    "ísimo", "ísima", "ísimos", "ísimas", "isimo", "isima", "oso", "osa", "osos", "osas", "ble",
    "bles", "ivo", "iva", "ivos", "ivas", "ico", "ica", "icos", "icas", "ario", "aria", "ente",
    "ante", "al", "ales",
];
const VERB_SUFFIXES: &[&str] = &["ando", "iendo", "ar", "er", "ir", "aba", "aron", "ieron", "ó"];

fn tag(text: &str, lower: &str, sentence_initial: bool) -> PartOfSpeech {
    if RE_PUNCT.is_match(text) {
        return PartOfSpeech::Punct;
    }
    if RE_NUM.is_match(text) {
        return PartOfSpeech::Num;
    }
    if RE_SYM.is_match(text) {
        return PartOfSpeech::Sym;
    }

    let closed: [(&[&str], PartOfSpeech); 9] = [
        (DETERMINERS, PartOfSpeech::Det),
        (ADPOSITIONS, PartOfSpeech::Adp),
        (CCONJ, PartOfSpeech::Cconj),
        (SCONJ, PartOfSpeech::Sconj),
        (PRONOUNS, PartOfSpeech::Pron),
        (AUXILIARIES, PartOfSpeech::Aux),
        (ADVERBS, PartOfSpeech::Adv),
        (ADJECTIVES, PartOfSpeech::Adj),
        (INTERJECTIONS, PartOfSpeech::Intj),
    ];
    for (words, pos) in closed {
        if words.contains(&lower) {
            return pos;
        }
    }

    if !sentence_initial && text.chars().next().is_some_and(char::is_uppercase) {
        return PartOfSpeech::Propn;
    }

    let chars = lower.chars().count();
    if chars > 6 && lower.ends_with("mente") {
        return PartOfSpeech::Adv;
    }
    if chars > 4 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Adj;
    }
    if chars > 3 && VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Verb;
    }
    if !text.chars().any(char::is_alphanumeric) {
        return PartOfSpeech::X;
    }
    PartOfSpeech::Noun
}
