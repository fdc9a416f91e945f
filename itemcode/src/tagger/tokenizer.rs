//! Whitespace and character-class tokenizer.
//!
//! A token is a maximal run of ASCII alphanumerics, a maximal run of other
//! alphanumeric characters (kana, kanji, accented letters), or a single
//! punctuation/symbol character. Whitespace only separates tokens.

/// A token with its byte offsets in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text, always `&source[start..end]`
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    AsciiWord,
    Word,
    Symbol,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_ascii_alphanumeric() {
        CharClass::AsciiWord
    } else if c.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Symbol
    }
}

/// Split `text` into tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, CharClass)> = None;

    for (idx, c) in text.char_indices() {
        let class = classify(c);

        if let Some((start, run_class)) = current {
            let continues = run_class == class && class != CharClass::Symbol;
            if continues {
                continue;
            }
            tokens.push(Token {
                text: &text[start..idx],
                start,
                end: idx,
            });
            current = None;
        }

        if class != CharClass::Space {
            current = Some((idx, class));
        }
    }

    if let Some((start, _)) = current {
        tokens.push(Token {
            text: &text[start..],
            start,
            end: text.len(),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_splits_on_whitespace() {
        assert_eq!(
            texts("NIKE AB1234 AIR FORCE"),
            vec!["NIKE", "AB1234", "AIR", "FORCE"]
        );
    }

    #[test]
    fn test_separates_scripts_and_symbols() {
        assert_eq!(
            texts("Tシャツ 綿100% DD1391-100"),
            vec!["T", "シャツ", "綿", "100", "%", "DD1391", "-", "100"]
        );
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let text = "品番 AB1234";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2);
        assert_eq!(&text[tokens[1].start..tokens[1].end], "AB1234");
        assert_eq!(tokens[1].start, "品番 ".len());
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }
}
