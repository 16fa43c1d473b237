//! Sentiment scoring
//!
//! The ranking stage only sees the [`SentimentScorer`] trait, so any scorer
//! (lexicon, model, or a fixed stub in tests) can be injected. The bundled
//! [`LexiconScorer`] is a rule-based valence scorer: each known word carries a
//! valence on a -4..=4 scale, adjusted by nearby boosters, negations,
//! capitalization, a "but" contrast and trailing punctuation, then summed and
//! normalized into a compound score in [-1, 1].

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::SentimentScore;

/// Text to sentiment capability
///
/// Implementations must be pure and must not panic on any input, including
/// empty text.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> SentimentScore + Send + Sync,
{
    fn score(&self, text: &str) -> SentimentScore {
        self(text)
    }
}

// Empirically derived adjustments
const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;
const EXCLAMATION_STEP: f64 = 0.292;
const QUESTION_STEP: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;

#[rustfmt::skip]
const LEXICON_ENTRIES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8), ("amazed", 2.2), ("attentive", 1.5), ("awesome", 3.1),
    ("beautiful", 2.9), ("best", 3.2), ("better", 1.9), ("brilliant", 2.8),
    ("calm", 1.3), ("charming", 2.2), ("cheerful", 2.5), ("clean", 1.7),
    ("comfortable", 2.3), ("comfy", 2.1), ("convenient", 1.8), ("cool", 1.3),
    ("cozy", 2.0), ("delicious", 2.7), ("delight", 2.9), ("delightful", 2.8),
    ("enjoy", 2.2), ("enjoyed", 2.3), ("excellent", 2.7), ("fabulous", 2.4),
    ("fantastic", 2.6), ("favorite", 2.0), ("fine", 0.8), ("fresh", 1.3),
    ("friendly", 2.2), ("fun", 2.3), ("generous", 2.3), ("glad", 2.0),
    ("good", 1.9), ("gorgeous", 3.0), ("gracious", 2.6), ("great", 3.1),
    ("happy", 2.7), ("helpful", 1.8), ("impressed", 2.1), ("impressive", 2.3),
    ("incredible", 2.2), ("joy", 2.8), ("kind", 2.4), ("like", 1.5),
    ("liked", 1.8), ("love", 3.2), ("loved", 2.9), ("lovely", 2.8),
    ("nice", 1.8), ("ok", 1.2), ("okay", 0.9), ("outstanding", 3.0),
    ("peaceful", 2.2), ("perfect", 2.7), ("pleasant", 2.3), ("pleased", 1.9),
    ("polite", 1.2), ("positive", 2.6), ("recommend", 1.5), ("recommended", 1.6),
    ("relaxing", 2.2), ("remarkable", 2.3), ("satisfied", 1.8), ("spacious", 1.0),
    ("spotless", 1.5), ("stunning", 2.6), ("success", 2.7), ("superb", 3.1),
    ("terrific", 2.1), ("thank", 1.5), ("thanks", 1.9), ("top", 0.8),
    ("welcoming", 1.7), ("wonderful", 2.7), ("worth", 0.9), ("wow", 2.8),
    ("yummy", 2.4),
    // negative
    ("angry", -2.3), ("annoying", -1.7), ("avoid", -1.1), ("awful", -2.0),
    ("bad", -2.5), ("bland", -0.9), ("boring", -1.3), ("broken", -2.1),
    ("bugs", -1.3), ("cold", -0.5), ("complain", -1.4), ("complaint", -1.2),
    ("cramped", -1.0), ("crap", -1.6), ("dirty", -1.9), ("disappointed", -1.9),
    ("disappointing", -2.2), ("disgusting", -2.4), ("dislike", -1.6),
    ("dissatisfied", -1.6), ("dreadful", -2.5), ("expensive", -0.8),
    ("fail", -2.5), ("failed", -2.3), ("filthy", -2.6), ("frustrated", -2.2),
    ("frustrating", -1.9), ("gross", -2.1), ("hassle", -1.3), ("hate", -2.7),
    ("hated", -3.2), ("horrible", -2.5), ("hostile", -2.2), ("ignored", -1.6),
    ("lousy", -2.5), ("mediocre", -0.8), ("mess", -1.5), ("messy", -1.5),
    ("nasty", -2.6), ("noisy", -0.7), ("overpriced", -1.4), ("pathetic", -2.0),
    ("poor", -2.1), ("problem", -1.7), ("problems", -1.7), ("regret", -1.8),
    ("ridiculous", -1.5), ("rude", -2.0), ("sad", -2.1), ("scam", -2.3),
    ("shame", -2.2), ("sick", -2.3), ("slow", -0.8), ("smelly", -1.6),
    ("stale", -1.2), ("stinks", -1.9), ("sucks", -1.5), ("terrible", -2.1),
    ("ugly", -2.3), ("unacceptable", -2.0), ("unclean", -1.6),
    ("unfriendly", -1.5), ("unhappy", -1.8), ("unpleasant", -2.1),
    ("upset", -1.6), ("useless", -1.8), ("waste", -1.8), ("wasted", -2.2),
    ("worse", -2.1), ("worst", -3.1), ("wrong", -2.1),
];

#[rustfmt::skip]
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
    "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
    "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
    "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "wasnt", "werent", "oughtn't",
    "shan't", "shouldn't", "wasn't", "weren't", "without", "wont", "wouldnt",
    "won't", "wouldn't", "rarely", "seldom", "despite",
];

#[rustfmt::skip]
const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably",
    "decidedly", "deeply", "enormously", "entirely", "especially",
    "exceptionally", "extremely", "fabulously", "greatly", "highly", "hugely",
    "incredibly", "intensely", "majorly", "more", "most", "particularly",
    "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "truly", "unbelievably",
    "unusually", "utterly", "very",
];

#[rustfmt::skip]
const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat",
];

static LEXICON: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| LEXICON_ENTRIES.iter().copied().collect());

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    BOOSTERS_UP
        .iter()
        .map(|w| (*w, BOOST_INCR))
        .chain(BOOSTERS_DOWN.iter().map(|w| (*w, BOOST_DECR)))
        .collect()
});

/// Rule-based lexicon scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::EMPTY;
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_differential = is_cap_differential(&tokens);

        let mut valences = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let word = lowered[i].as_str();
            if BOOSTERS.contains_key(word) {
                valences.push(0.0);
                continue;
            }
            if word == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
                valences.push(0.0);
                continue;
            }
            valences.push(word_valence(&tokens, &lowered, i, cap_differential));
        }

        apply_but_contrast(&lowered, &mut valences);
        aggregate(&valences, text)
    }
}

fn word_valence(tokens: &[&str], lowered: &[String], i: usize, cap_differential: bool) -> f64 {
    let Some(&base) = LEXICON.get(lowered[i].as_str()) else {
        return 0.0;
    };

    let mut valence = base;
    if cap_differential && is_all_caps(tokens[i]) {
        valence += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
    }

    // Look back up to three tokens for boosters and negations
    for distance in 1..=3usize {
        if i < distance {
            break;
        }
        let prev = lowered[i - distance].as_str();
        if LEXICON.contains_key(prev) {
            continue;
        }
        let mut boost = booster_scalar(tokens[i - distance], prev, valence, cap_differential);
        if distance == 2 {
            boost *= 0.95;
        } else if distance == 3 {
            boost *= 0.9;
        }
        valence += boost;
        valence = negation_adjust(valence, lowered, i, distance);
    }

    least_adjust(valence, lowered, i)
}

fn booster_scalar(token: &str, lowered: &str, valence: f64, cap_differential: bool) -> f64 {
    let Some(&scalar) = BOOSTERS.get(lowered) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -scalar } else { scalar };
    if cap_differential && is_all_caps(token) {
        scalar += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
    }
    scalar
}

fn negation_adjust(valence: f64, lowered: &[String], i: usize, distance: usize) -> f64 {
    let prev = lowered[i - distance].as_str();
    match distance {
        2 if prev == "never" && matches!(lowered[i - 1].as_str(), "so" | "this") => valence * 1.25,
        2 if prev == "without" && lowered[i - 1] == "doubt" => valence,
        3 if prev == "never"
            && (matches!(lowered[i - 2].as_str(), "so" | "this")
                || matches!(lowered[i - 1].as_str(), "so" | "this")) =>
        {
            valence * 1.25
        }
        3 if prev == "without" && (lowered[i - 2] == "doubt" || lowered[i - 1] == "doubt") => {
            valence
        }
        _ if is_negation(prev) => valence * NEGATION_SCALAR,
        _ => valence,
    }
}

fn least_adjust(valence: f64, lowered: &[String], i: usize) -> f64 {
    if i >= 1 && lowered[i - 1] == "least" {
        let qualified = i >= 2 && matches!(lowered[i - 2].as_str(), "at" | "very");
        if !qualified {
            return valence * NEGATION_SCALAR;
        }
    }
    valence
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// Words before "but" are damped, words after it amplified
fn apply_but_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_STEP,
        _ => QUESTION_MAX,
    };
    exclamations * EXCLAMATION_STEP + question_amp
}

fn aggregate(valences: &[f64], text: &str) -> SentimentScore {
    let emphasis = punctuation_emphasis(text);

    let mut sum: f64 = valences.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neutral_count = 0.0;
    for &v in valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral_count;
    if total == 0.0 {
        return SentimentScore::EMPTY;
    }

    SentimentScore {
        negative: round_to(neg_sum.abs() / total, 3),
        neutral: round_to(neutral_count / total, 3),
        positive: round_to(pos_sum / total, 3),
        compound: round_to(compound, 4),
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Round to `places` decimals; a result of zero is always `+0.0`
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Split on whitespace, trimming edge punctuation from word-like tokens
///
/// Tokens that would shrink to two characters or fewer are kept as-is so
/// emoticons such as ":)" survive.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are shouted
fn is_cap_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}
