// src/aggregate.rs
//! Score aggregation: token → sentence → document.
//!
//! Per token: `effective = sentiment * negation`; positives clamp up to at least
//! `1.0` after adding the booster, negatives clamp down to at most `-1.0` after
//! subtracting it. A sentence keeps only its strongest positive and strongest
//! negative token (summed); the document applies the same rule to sentences.

use crate::annotate::{DocumentScores, TokenScores};

/// Clamped contribution of one token, `None` when it carries no polarity.
pub fn token_score(t: &TokenScores) -> Option<f64> {
    let effective = t.effective();
    if effective > 0.0 {
        Some(f64::max(1.0, effective + t.booster_weight))
    } else if effective < 0.0 {
        Some(f64::min(-1.0, effective - t.booster_weight))
    } else {
        None
    }
}

/// Max positive + min negative; 0.0 for each missing side.
pub fn strongest_pair_sum<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut max_score = 0.0_f64;
    let mut min_score = 0.0_f64;
    for s in scores {
        if s > max_score {
            max_score = s;
        } else if s < min_score {
            min_score = s;
        }
    }
    max_score + min_score
}

pub fn sentence_score(tokens: &[TokenScores]) -> f64 {
    strongest_pair_sum(tokens.iter().filter_map(token_score))
}

/// Fill every `sentence_score` and the `global_score` in place.
pub fn aggregate(scores: &mut DocumentScores) {
    for sentence in scores.sentences.iter_mut() {
        sentence.sentence_score = sentence_score(&sentence.tokens);
    }
    scores.global_score = strongest_pair_sum(scores.sentences.iter().map(|s| s.sentence_score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::SentenceScores;
    use rand::Rng;

    fn ts(sentiment: f64, negation: f64, booster: f64) -> TokenScores {
        TokenScores {
            sentiment_weight: sentiment,
            negation_weight: negation,
            booster_weight: booster,
        }
    }

    /// Token scoring exactly `v` (|v| >= 1, no booster).
    fn scoring(v: f64) -> TokenScores {
        ts(v, 1.0, 0.0)
    }

    #[test]
    fn neutral_token_contributes_nothing() {
        assert_eq!(token_score(&TokenScores::default()), None);
        // booster alone does not create polarity
        assert_eq!(token_score(&ts(0.0, 1.0, 3.0)), None);
    }

    #[test]
    fn weak_polarity_is_clamped_to_unit() {
        assert_eq!(token_score(&ts(0.4, 1.0, 0.0)), Some(1.0));
        assert_eq!(token_score(&ts(-0.4, 1.0, 0.0)), Some(-1.0));
        assert_eq!(token_score(&ts(2.5, 1.0, 0.0)), Some(2.5));
    }

    #[test]
    fn booster_pushes_away_from_zero_on_both_sides() {
        assert_eq!(token_score(&ts(1.5, 1.0, 1.0)), Some(2.5));
        assert_eq!(token_score(&ts(-1.5, 1.0, 1.0)), Some(-2.5));
    }

    #[test]
    fn negation_flips_then_clamps_down() {
        // w = 2, n = 0.3 -> -0.6 -> clamped to -1
        assert_eq!(token_score(&ts(2.0, -0.3, 0.0)), Some(-1.0));
        assert_eq!(token_score(&ts(2.0, -1.0, 0.5)), Some(-2.5));
    }

    #[test]
    fn sentence_keeps_one_positive_and_one_negative() {
        let tokens = [
            scoring(1.0),
            scoring(1.5),
            TokenScores::default(),
            scoring(1.2),
            scoring(-1.3),
        ];
        let s = sentence_score(&tokens);
        assert!((s - 0.2).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn sentence_without_polarity_is_zero() {
        assert_eq!(sentence_score(&[]), 0.0);
        assert_eq!(sentence_score(&[TokenScores::default(); 4]), 0.0);
    }

    #[test]
    fn document_uses_same_rule_over_sentences() {
        let mut doc = DocumentScores {
            sentences: vec![
                SentenceScores {
                    sentence_score: 0.0,
                    tokens: vec![scoring(-2.0)],
                },
                SentenceScores {
                    sentence_score: 0.0,
                    tokens: vec![scoring(1.0)],
                },
                SentenceScores {
                    sentence_score: 0.0,
                    tokens: vec![scoring(1.5)],
                },
            ],
            global_score: 0.0,
        };
        aggregate(&mut doc);

        let per: Vec<f64> = doc.sentences.iter().map(|s| s.sentence_score).collect();
        assert_eq!(per, [-2.0, 1.0, 1.5]);
        assert_eq!(doc.global_score, -0.5);
    }

    #[test]
    fn empty_document_scores_zero() {
        let mut doc = DocumentScores::default();
        aggregate(&mut doc);
        assert_eq!(doc.global_score, 0.0);
        assert!(doc.sentences.is_empty());
    }

    #[test]
    fn random_sentences_stay_within_extremes() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let n = rng.random_range(0..12);
            let tokens: Vec<TokenScores> = (0..n)
                .map(|_| {
                    let w = if rng.random_bool(0.4) {
                        0.0
                    } else {
                        rng.random_range(-3.0..3.0)
                    };
                    let neg = if rng.random_bool(0.2) { -1.0 } else { 1.0 };
                    ts(w, neg, rng.random_range(0.0..2.0))
                })
                .collect();

            let contributions: Vec<f64> = tokens.iter().filter_map(token_score).collect();
            let hi = contributions.iter().copied().fold(0.0, f64::max);
            let lo = contributions.iter().copied().fold(0.0, f64::min);

            assert!(contributions.iter().all(|c| c.abs() >= 1.0));
            assert_eq!(sentence_score(&tokens), hi + lo);
        }
    }
}
