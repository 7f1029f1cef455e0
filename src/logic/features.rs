//! Lexical feature extraction for URL strings.
//!
//! Seven closed-form features computed over the raw URL text. The order of
//! [`FeatureVector::as_array`] is the order the model was trained with and
//! must not change without retraining.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of features the classifier expects.
pub const FEATURE_COUNT: usize = 7;

/// Characters counted as "special" in URLs.
const SPECIAL_CHARS: [char; 9] = ['@', '?', '-', '=', '_', '&', '%', '.', '/'];

/// Keywords that frequently show up in phishing URLs. Matched as plain
/// substrings of the lowercased URL, each keyword counted at most once.
const SUSPICIOUS_KEYWORDS: [&str; 10] = [
    "login", "secure", "account", "update", "verify", "bank", "free", "click", "signin",
    "ebayisapi",
];

/// Fixed-order numeric summary of a URL, used as classifier input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub url_length: f64,
    pub num_digits: f64,
    pub num_special_chars: f64,
    pub has_https: f64,
    pub num_dots: f64,
    pub suspicious_word_count: f64,
    pub entropy: f64,
}

impl FeatureVector {
    /// Extract features from a URL string.
    ///
    /// Infallible: any string, including the empty string, produces a
    /// vector. The empty string yields all zeros.
    pub fn extract(url: &str) -> Self {
        let lowered = url.to_lowercase();

        let url_length = url.chars().count();
        let num_digits = url.chars().filter(|c| c.is_ascii_digit()).count();
        let num_special_chars = url.chars().filter(|c| SPECIAL_CHARS.contains(c)).count();
        let has_https = if lowered.starts_with("https") { 1.0 } else { 0.0 };
        let num_dots = url.chars().filter(|&c| c == '.').count();
        let suspicious_word_count = SUSPICIOUS_KEYWORDS
            .iter()
            .filter(|word| lowered.contains(*word))
            .count();

        Self {
            url_length: url_length as f64,
            num_digits: num_digits as f64,
            num_special_chars: num_special_chars as f64,
            has_https,
            num_dots: num_dots as f64,
            suspicious_word_count: suspicious_word_count as f64,
            entropy: shannon_entropy(url),
        }
    }

    /// Feature values in training order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.url_length,
            self.num_digits,
            self.num_special_chars,
            self.has_https,
            self.num_dots,
            self.suspicious_word_count,
            self.entropy,
        ]
    }
}

/// Shannon entropy in bits over the character frequency distribution.
///
/// 0.0 for the empty string (no division by zero, no log of zero).
fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}
