/// Reduce text to the key used by the lexical index.
///
/// Surrounding whitespace is trimmed, inner whitespace runs collapse to a
/// single space and the result is lowercased. Case folding is the only
/// character-level normalization: diacritics and Unicode forms are kept as is.
pub fn degrade(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_only() {
        assert_eq!(degrade("Dog"), "dog");
        assert_eq!(degrade("ÁRBOL"), "árbol");
        assert_eq!(degrade("café"), "café");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(degrade("  hot   Dog \t"), "hot dog");
        assert_eq!(degrade(""), "");
    }

    #[test]
    fn case_variants_share_a_key() {
        for word in ["straße", "Ñandú", "dog", "NEW york"] {
            assert_eq!(degrade(word), degrade(&word.to_uppercase()));
        }
    }
}
