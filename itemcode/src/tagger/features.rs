//! Feature extraction for the sequence tagger.

use super::tokenizer::Token;
use super::types::BioTag;

/// Collapse a word into its shape: `A` for uppercase, `a` for lowercase,
/// `9` for digits, `x` for other letters, the character itself otherwise.
/// Runs of the same class are kept up to four characters.
pub fn word_shape(word: &str) -> String {
    let mut shape = String::new();
    let mut last: Option<char> = None;
    let mut run = 0;

    for c in word.chars() {
        let class = if c.is_ascii_uppercase() {
            'A'
        } else if c.is_ascii_lowercase() {
            'a'
        } else if c.is_ascii_digit() {
            '9'
        } else if c.is_alphanumeric() {
            'x'
        } else {
            c
        };

        if last == Some(class) {
            run += 1;
        } else {
            run = 1;
            last = Some(class);
        }
        if run <= 4 {
            shape.push(class);
        }
    }

    shape
}

fn length_bucket(len: usize) -> &'static str {
    match len {
        0..=3 => "short",
        4..=6 => "mid",
        7..=10 => "long",
        _ => "xlong",
    }
}

fn prefix(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

fn suffix(word: &str, n: usize) -> &str {
    let count = word.chars().count();
    if count <= n {
        return word;
    }
    match word.char_indices().nth(count - n) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

/// Features of token `i`, given the tag predicted for the previous token.
pub fn token_features(tokens: &[Token<'_>], i: usize, prev_tag: BioTag) -> Vec<String> {
    let word = tokens[i].text;
    let lower = word.to_lowercase();
    let len = word.chars().count();
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    let has_alpha = word.chars().any(|c| c.is_ascii_alphabetic());

    let mut features = vec![
        "bias".to_string(),
        format!("w={}", lower),
        format!("shape={}", word_shape(word)),
        format!("pre3={}", prefix(&lower, 3)),
        format!("suf3={}", suffix(&lower, 3)),
        format!("len={}", length_bucket(len)),
        format!("digit={}", has_digit),
        format!("alpha={}", has_alpha),
        format!("alnum_mix={}", has_digit && has_alpha),
        format!("prev_tag={}", prev_tag.as_str()),
    ];

    match i.checked_sub(1).map(|p| tokens[p].text) {
        Some(prev) => {
            features.push(format!("prev_w={}", prev.to_lowercase()));
            features.push(format!("prev_shape={}", word_shape(prev)));
        }
        None => features.push("bos".to_string()),
    }

    match tokens.get(i + 1).map(|t| t.text) {
        Some(next) => {
            features.push(format!("next_w={}", next.to_lowercase()));
            features.push(format!("next_shape={}", word_shape(next)));
        }
        None => features.push("eos".to_string()),
    }

    features.push(format!(
        "prev_tag+shape={}+{}",
        prev_tag.as_str(),
        word_shape(word)
    ));

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::tokenizer::tokenize;

    #[test]
    fn test_word_shape() {
        assert_eq!(word_shape("AB1234"), "AA9999");
        assert_eq!(word_shape("DD1391100"), "AA9999");
        assert_eq!(word_shape("Nike"), "Aaaa");
        assert_eq!(word_shape("シャツ"), "xxx");
        assert_eq!(word_shape("-"), "-");
    }

    #[test]
    fn test_prefix_suffix_are_char_safe() {
        assert_eq!(prefix("シャツ長袖", 3), "シャツ");
        assert_eq!(suffix("シャツ長袖", 3), "ツ長袖");
        assert_eq!(suffix("ab", 3), "ab");
    }

    #[test]
    fn test_token_features_include_context() {
        let tokens = tokenize("NIKE AB1234 AIR");
        let features = token_features(&tokens, 1, BioTag::Outside);
        assert!(features.contains(&"w=ab1234".to_string()));
        assert!(features.contains(&"prev_w=nike".to_string()));
        assert!(features.contains(&"next_w=air".to_string()));
        assert!(features.contains(&"alnum_mix=true".to_string()));

        let first = token_features(&tokens, 0, BioTag::Outside);
        assert!(first.contains(&"bos".to_string()));
    }
}
