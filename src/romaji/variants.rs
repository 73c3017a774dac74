// Expansion of token sequences into typeable spellings.
//
// Most tokens expand independently through the equivalence table, but three
// need context: っ borrows the next syllable's consonant, ん only allows `n'`
// before a vowel or `y`, and ー echoes the last vowel typed so far.

use std::borrow::Cow;
use std::collections::HashSet;

use super::table::{
    alternatives, first_consonant, is_vowel, last_vowel, HATSUON_SPELLINGS, SOKUON_SPELLINGS,
};
use super::tokenizer::MoraToken;

/// Upper bound on spellings kept per reading.
pub const MAX_VARIANTS: usize = 4096;

/// Insertion-ordered set of spellings that stops accepting at a fixed size.
#[derive(Debug, Clone)]
pub struct VariantSet {
    order: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl VariantSet {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    /// Adds `s` unless already present. Returns `false` once the set is full.
    pub fn insert(&mut self, s: &str) -> bool {
        if self.is_full() {
            return false;
        }
        if !self.seen.contains(s) {
            self.seen.insert(s.to_string());
            self.order.push(s.to_string());
        }
        !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.seen.contains(s)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Context-free spellings of a single token.
pub fn token_options(token: &MoraToken) -> Vec<Cow<'static, str>> {
    match token {
        MoraToken::Chouon => vec![Cow::Borrowed("-")],
        MoraToken::Sokuon => SOKUON_SPELLINGS.iter().map(|&s| Cow::Borrowed(s)).collect(),
        MoraToken::Hatsuon => HATSUON_SPELLINGS.iter().map(|&s| Cow::Borrowed(s)).collect(),
        MoraToken::Syllable(s) => match alternatives(s) {
            Some(group) => group.iter().map(|&s| Cow::Borrowed(s)).collect(),
            None => vec![Cow::Borrowed(*s)],
        },
        MoraToken::Literal(s) => vec![Cow::Owned(s.clone())],
    }
}

fn starts_with_vowel_or_y(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c == 'y' || is_vowel(c))
}

struct Expander<'a> {
    tokens: &'a [MoraToken],
    out: &'a mut VariantSet,
}

impl Expander<'_> {
    /// Depth-first walk. Returns `false` once the output is full so every
    /// caller up the stack can stop early.
    fn walk(&mut self, idx: usize, built: &mut String, vowel: Option<char>) -> bool {
        let tokens = self.tokens;
        let Some(token) = tokens.get(idx) else {
            return self.out.insert(built);
        };

        match token {
            MoraToken::Chouon => {
                if !self.emit(idx + 1, built, "-", vowel) {
                    return false;
                }
                match vowel {
                    Some(v) => self.emit(idx + 1, built, v.encode_utf8(&mut [0; 4]), vowel),
                    None => true,
                }
            }
            MoraToken::Sokuon => match tokens.get(idx + 1) {
                // A trailing っ spells as a bare small tsu.
                None => SOKUON_SPELLINGS.iter().all(|&xtu| {
                    let v = last_vowel(xtu).or(vowel);
                    self.emit(idx + 1, built, xtu, v)
                }),
                Some(next) => token_options(next).iter().all(|next_opt| {
                    let prefixed = SOKUON_SPELLINGS.iter().all(|&xtu| {
                        let v = last_vowel(next_opt).or(last_vowel(xtu)).or(vowel);
                        self.emit_pair(idx + 2, built, xtu, next_opt, v)
                    });
                    if !prefixed {
                        return false;
                    }
                    match first_consonant(next_opt) {
                        Some(cons) => {
                            let v = last_vowel(next_opt).or(vowel);
                            let doubled = cons.encode_utf8(&mut [0; 4]).to_owned();
                            self.emit_pair(idx + 2, built, &doubled, next_opt, v)
                        }
                        None => true,
                    }
                }),
            },
            MoraToken::Hatsuon => {
                let apostrophe_ok = tokens.get(idx + 1).is_some_and(|next| {
                    token_options(next)
                        .iter()
                        .any(|o| starts_with_vowel_or_y(o))
                });
                HATSUON_SPELLINGS
                    .iter()
                    .filter(|&&opt| apostrophe_ok || opt != "n'")
                    .all(|&opt| {
                        let v = last_vowel(opt).or(vowel);
                        self.emit(idx + 1, built, opt, v)
                    })
            }
            _ => token_options(token).iter().all(|opt| {
                let v = last_vowel(opt).or(vowel);
                self.emit(idx + 1, built, opt, v)
            }),
        }
    }

    fn emit(&mut self, idx: usize, built: &mut String, piece: &str, vowel: Option<char>) -> bool {
        let mark = built.len();
        built.push_str(piece);
        let more = self.walk(idx, built, vowel);
        built.truncate(mark);
        more
    }

    fn emit_pair(
        &mut self,
        idx: usize,
        built: &mut String,
        first: &str,
        second: &str,
        vowel: Option<char>,
    ) -> bool {
        let mark = built.len();
        built.push_str(first);
        built.push_str(second);
        let more = self.walk(idx, built, vowel);
        built.truncate(mark);
        more
    }
}

/// Expands one token sequence into `out`, stopping early when `out` fills up.
///
/// Returns `false` if the set became full during expansion.
pub fn expand_into(tokens: &[MoraToken], out: &mut VariantSet) -> bool {
    if out.is_full() {
        return false;
    }
    let mut built = String::new();
    Expander { tokens, out }.walk(0, &mut built, None)
}

/// Every spelling of one token sequence, in generation order.
pub fn expand(tokens: &[MoraToken]) -> Vec<String> {
    let mut out = VariantSet::with_cap(MAX_VARIANTS);
    expand_into(tokens, &mut out);
    out.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use MoraToken::*;

    fn has(v: &[String], s: &str) -> bool {
        v.iter().any(|x| x == s)
    }

    #[test]
    fn test_equivalence_expansion() {
        let v = expand(&[Syllable("su"), Syllable("shi")]);
        assert_eq!(v, vec!["sushi", "susi", "suci"]);
    }

    #[test]
    fn test_sokuon_doubles_or_prefixes() {
        let v = expand(&[Syllable("i"), Sokuon, Syllable("ka")]);
        assert_eq!(v, vec!["ixtuka", "iltuka", "ixtsuka", "iltsuka", "ikka"]);
    }

    #[test]
    fn test_sokuon_follows_each_next_spelling() {
        let v = expand(&[Sokuon, Syllable("chi")]);
        assert!(has(&v, "cchi"));
        assert!(has(&v, "tti"));
        assert!(has(&v, "xtuci"));
        assert!(!has(&v, "xtu"));
    }

    #[test]
    fn test_trailing_sokuon() {
        let v = expand(&[Syllable("a"), Sokuon]);
        assert_eq!(v, vec!["axtu", "altu", "axtsu", "altsu"]);
    }

    #[test]
    fn test_sokuon_before_vowel_has_no_doubling() {
        let v = expand(&[Sokuon, Syllable("a")]);
        assert_eq!(v, vec!["xtua", "ltua", "xtsua", "ltsua"]);
    }

    #[test]
    fn test_hatsuon_apostrophe_only_before_vowel_or_y() {
        let before_consonant = expand(&[Hatsuon, Syllable("ka")]);
        assert_eq!(before_consonant, vec!["nka", "nnka", "xnka"]);

        let before_vowel = expand(&[Hatsuon, Syllable("a")]);
        assert!(has(&before_vowel, "n'a"));

        let before_y = expand(&[Hatsuon, Syllable("ya")]);
        assert!(has(&before_y, "n'ya"));
        assert!(has(&before_y, "nnxya"));

        let at_end = expand(&[Syllable("ra"), Syllable("me"), Hatsuon]);
        assert_eq!(at_end, vec!["ramen", "ramenn", "ramexn"]);
    }

    #[test]
    fn test_chouon_echoes_last_vowel() {
        let v = expand(&[Syllable("ka"), Chouon]);
        assert_eq!(v, vec!["ka-", "kaa"]);
    }

    #[test]
    fn test_chouon_echo_survives_hatsuon() {
        let v = expand(&[Syllable("ko"), Hatsuon, Chouon]);
        assert!(has(&v, "kon-"));
        assert!(has(&v, "kono"));
    }

    #[test]
    fn test_leading_chouon_has_no_echo() {
        assert_eq!(expand(&[Chouon]), vec!["-"]);
    }

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(expand(&[Syllable("ka"), Literal("!".into())]), vec!["ka!"]);
    }

    #[test]
    fn test_empty_sequence_yields_empty_string() {
        assert_eq!(expand(&[]), vec![String::new()]);
    }

    #[test]
    fn test_variant_set_caps_and_dedups() {
        let mut set = VariantSet::with_cap(2);
        assert!(set.insert("a"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        assert!(!set.insert("c"));
        assert_eq!(set.into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_expansion_stops_at_cap() {
        let tokens = vec![Syllable("shi"); 12];
        let v = expand(&tokens);
        assert_eq!(v.len(), MAX_VARIANTS);
        assert_eq!(v[0], "shi".repeat(12));
    }
}
