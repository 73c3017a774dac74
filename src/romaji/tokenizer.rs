// Breadth-first tokenization of a reading into mora sequences.
//
// Ambiguous input ("nya" = ん + や or にゃ) forks the parse instead of committing
// to one reading; every completed fork is returned.

use std::collections::VecDeque;

use tracing::debug;

use super::table::{is_consonant, match_syllable};

/// Upper bound on completed token sequences per reading.
pub const MAX_TOKENIZATIONS: usize = 8;

/// One mora of a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoraToken {
    /// A known romaji syllable such as "ka", "shi" or "kyo".
    Syllable(&'static str),
    /// っ: doubles the next syllable's consonant.
    Sokuon,
    /// ん
    Hatsuon,
    /// ー, written as `-` in readings.
    Chouon,
    /// Input the vocabulary does not cover, carried through verbatim.
    Literal(String),
}

pub type TokenSequence = Vec<MoraToken>;

struct Partial {
    pos: usize,
    tokens: TokenSequence,
}

impl Partial {
    fn push(&self, token: MoraToken, advance: usize) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens);
        tokens.push(token);
        Self {
            pos: self.pos + advance,
            tokens,
        }
    }
}

/// Splits `reading` into every plausible mora sequence.
///
/// Never fails and never returns an empty list. Branch order is fixed, so the
/// output order is stable for a given input.
pub fn tokenize(reading: &str) -> Vec<TokenSequence> {
    let r = reading.to_ascii_lowercase();
    let mut results: Vec<TokenSequence> = Vec::new();
    let mut queue = VecDeque::from([Partial {
        pos: 0,
        tokens: Vec::new(),
    }]);

    while results.len() < MAX_TOKENIZATIONS {
        let Some(cur) = queue.pop_front() else {
            break;
        };
        let rest = &r[cur.pos..];
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            results.push(cur.tokens);
            continue;
        };
        let c2 = chars.next();
        let c3 = chars.next();

        if c == '-' {
            queue.push_back(cur.push(MoraToken::Chouon, 1));
            continue;
        }

        // Doubled consonant: consume only the first letter; nn is left to ん.
        if Some(c) == c2 && is_consonant(c) && c != 'n' {
            queue.push_back(cur.push(MoraToken::Sokuon, 1));
            continue;
        }

        if c == 'n' {
            match c2 {
                Some('n') => {
                    queue.push_back(cur.push(MoraToken::Hatsuon, 2));
                    continue;
                }
                // ん + ya/yu/yo; the syllable match below still sees nya/nyu/nyo.
                Some('y') if matches!(c3, Some('a' | 'u' | 'o')) => {
                    queue.push_back(cur.push(MoraToken::Hatsuon, 1));
                }
                None | Some('-') => {
                    queue.push_back(cur.push(MoraToken::Hatsuon, 1));
                    continue;
                }
                Some(next) if is_consonant(next) && next != 'y' => {
                    queue.push_back(cur.push(MoraToken::Hatsuon, 1));
                    continue;
                }
                _ => {}
            }
        }

        match match_syllable(rest) {
            Some(syllable) => queue.push_back(cur.push(MoraToken::Syllable(syllable), syllable.len())),
            None => queue.push_back(cur.push(MoraToken::Literal(c.to_string()), c.len_utf8())),
        }
    }

    if results.is_empty() {
        debug!(reading, "tokenizer produced no sequence, using literal fallback");
        return vec![vec![MoraToken::Literal(reading.to_string())]];
    }
    results
}
