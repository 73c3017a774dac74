//! Romaji tokenization and input-variant generation.
//!
//! A reading such as `"sushi"` or `"chu-toro"` is split into mora tokens
//! (several splits when the input is ambiguous) and every token sequence is
//! expanded into the spellings an IME user might type: `si` for `shi`, `kka`
//! or `xtuka` for っか, `n'` before vowels, `aa` for `a-`, and so on.

mod cache;
mod table;
mod tokenizer;
mod variants;

pub use cache::{generate_variants, try_generate_variants, VariantCache};
pub use tokenizer::{tokenize, MoraToken, TokenSequence, MAX_TOKENIZATIONS};
pub use variants::{expand, expand_into, token_options, VariantSet, MAX_VARIANTS};

use crate::error::ReadingError;

/// Checks that `reading` is non-empty and uses only `a-z` and `-`.
pub fn validate_reading(reading: &str) -> Result<(), ReadingError> {
    if reading.is_empty() {
        return Err(ReadingError::Empty);
    }
    match reading
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_lowercase() || c == '-'))
    {
        Some((pos, ch)) => Err(ReadingError::InvalidChar { ch, pos }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reading() {
        assert_eq!(validate_reading("tamago"), Ok(()));
        assert_eq!(validate_reading("ko-hi-"), Ok(()));
        assert_eq!(validate_reading(""), Err(ReadingError::Empty));
        assert_eq!(
            validate_reading("Toro"),
            Err(ReadingError::InvalidChar { ch: 'T', pos: 0 })
        );
        assert_eq!(
            validate_reading("ebi ten"),
            Err(ReadingError::InvalidChar { ch: ' ', pos: 3 })
        );
    }
}
