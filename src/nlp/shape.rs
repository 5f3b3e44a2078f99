// src/nlp/shape.rs
//! Orthographic word shape.
//!
//! Letters map to `X`/`x` by case, digits to `d`, anything else is kept.
//! A run of the same shape character is capped at four, so `HORRIBLE` has
//! shape `XXXX` and `Madrid` has shape `Xxxxx`.

const MAX_SHAPE_RUN: usize = 4;

pub fn word_shape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;

    for ch in text.chars() {
        let s = if ch.is_alphabetic() {
            if ch.is_uppercase() {
                'X'
            } else {
                'x'
            }
        } else if ch.is_numeric() {
            'd'
        } else {
            ch
        };

        if Some(s) == last {
            run += 1;
        } else {
            last = Some(s);
            run = 1;
        }
        if run <= MAX_SHAPE_RUN {
            out.push(s);
        }
    }
    out
}

/// Share of the token's chars that the shape marks as uppercase letters.
pub fn uppercase_shape_ratio(text: &str, shape: &str) -> f64 {
    let len = text.chars().count();
    if len == 0 {
        return 0.0;
    }
    shape.chars().filter(|&c| c == 'X').count() as f64 / len as f64
}
