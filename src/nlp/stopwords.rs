// src/nlp/stopwords.rs
//! Spanish stop words (lowercase).

use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOP_WORDS_ES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "al", "algo", "algunas", "algunos", "ante", "antes", "aquel", "aquella",
        "aquellas", "aquello", "aquellos", "aqui", "aquí", "cada", "casi", "como", "cómo",
        "con", "contra", "cual", "cuales", "cuando", "cuándo", "de", "del", "desde",
        "donde", "dónde", "durante", "e", "el", "él", "ella", "ellas", "ellos", "en",
        "entre", "era", "erais", "eran", "eras", "eres", "es", "esa", "esas", "ese",
        "eso", "esos", "esta", "está", "estaba", "estaban", "estado", "estamos", "estan",
        "están", "estar", "estas", "este", "esto", "estos", "estoy", "fue", "fueron",
        "fui", "fuimos", "ha", "había", "habían", "han", "has", "hasta", "hay", "he",
        "hemos", "hizo", "hoy", "la", "las", "le", "les", "lo", "los", "me", "mi", "mí",
        "mis", "mucho", "muchos", "nos", "nosotros", "o", "os", "otra", "otras", "otro",
        "otros", "para", "pero", "poco", "por", "porque", "que", "qué", "quien", "quién",
        "se", "sea", "ser", "si", "sí", "sido", "siempre", "sin", "sobre", "son", "su",
        "sus", "suya", "suyo", "también", "te", "ti", "tiene", "tienen", "todo", "todos",
        "tu", "tú", "tus", "u", "un", "una", "unas", "uno", "unos", "usted", "ustedes",
        "vosotros", "y", "ya", "yo",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(lower: &str) -> bool {
    STOP_WORDS_ES.contains(lower)
}
