// Static romaji data: the syllable vocabulary the tokenizer matches against and
// the spelling equivalence groups the variant generator expands into.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Spellings of the small "っ" when typed on its own.
pub const SOKUON_SPELLINGS: &[&str] = &["xtu", "ltu", "xtsu", "ltsu"];

/// Spellings of "ん". `n'` is only offered before a vowel or `y`.
pub const HATSUON_SPELLINGS: &[&str] = &["n", "nn", "xn", "n'"];

/// Longest entry in [`SYLLABLES`] (e.g. "shya").
pub const MAX_SYLLABLE_LEN: usize = 4;

/// Every syllable the tokenizer recognizes. Order is irrelevant: matching is
/// longest-first by length, and two distinct entries of equal length can never
/// both match at the same position.
const SYLLABLES: &[&str] = &[
    // vowels
    "a", "i", "u", "e", "o",
    // consonant + vowel
    "ka", "ki", "ku", "ke", "ko",
    "sa", "si", "su", "se", "so",
    "ta", "ti", "tu", "te", "to",
    "na", "ni", "nu", "ne", "no",
    "ha", "hi", "hu", "he", "ho",
    "ma", "mi", "mu", "me", "mo",
    "ya", "yi", "yu", "ye", "yo",
    "ra", "ri", "ru", "re", "ro",
    "wa", "wi", "wu", "we", "wo",
    "ga", "gi", "gu", "ge", "go",
    "za", "zi", "zu", "ze", "zo",
    "da", "di", "du", "de", "do",
    "ba", "bi", "bu", "be", "bo",
    "pa", "pi", "pu", "pe", "po",
    "fa", "fi", "fu", "fe", "fo",
    "ja", "ji", "ju", "je", "jo",
    "qa", "qi", "qu", "qe", "qo",
    "xa", "xi", "xu", "xe", "xo",
    "la", "li", "lu", "le", "lo",
    // wh-
    "wha", "whi", "whu", "whe", "who",
    // contracted (yoon)
    "kya", "kyu", "kyo",
    "gya", "gyu", "gyo",
    "sya", "syu", "syo",
    "shya", "shyu", "shyo",
    "tya", "tyu", "tyo",
    "chya", "chyu", "chyo",
    "nya", "nyu", "nyo",
    "hya", "hyu", "hyo",
    "bya", "byu", "byo",
    "pya", "pyu", "pyo",
    "mya", "myu", "myo",
    "rya", "ryu", "ryo",
    "jya", "jyu", "jyo",
    "zya", "zyu", "zyo",
    "dya", "dyu", "dyo",
    "fya", "fyu", "fyo",
    // irregular
    "shi", "chi", "tsu",
    // irregular contracted
    "sha", "shu", "sho",
    "cha", "chu", "cho",
    "cya", "cyu", "cyo",
    // foreign sounds
    "fwa", "fwi", "fyi", "fwu", "fwe", "fye", "fwo",
    "qwa", "qwi", "qyi", "qwu", "qwe", "qye", "qwo",
    "qya", "qyu", "qyo",
    "swa", "swi", "swu", "swe", "swo",
    "tsa", "tsi", "tse", "tso",
    "tha", "thi", "thu", "the", "tho",
    "twa", "twi", "twu", "twe", "two",
    "gwa", "gwi", "gwu", "gwe", "gwo",
    "dha", "dhi", "dhu", "dhe", "dho",
    "dwa", "dwi", "dwu", "dwe", "dwo",
];

/// Interchangeable spellings of one sound, the way a Japanese IME accepts them.
///
/// A spelling listed in several groups (`ci`, `ji`, `zi`) resolves to the group
/// listed last.
const EQUIV_GROUPS: &[&[&str]] = &[
    // し ち つ ふ じ
    &["shi", "si", "ci"],
    &["chi", "ti", "ci"],
    &["tsu", "tu"],
    &["fu", "hu"],
    &["ji", "zi"],
    // づ ぢ
    &["du", "zu"],
    &["di", "ji", "zi"],
    // しゃ行
    &["sha", "sya", "shya"],
    &["shu", "syu", "shyu"],
    &["sho", "syo", "shyo"],
    // ちゃ行
    &["cha", "tya", "cya", "chya"],
    &["chu", "tyu", "cyu", "chyu"],
    &["cho", "tyo", "cyo", "chyo"],
    // じゃ行
    &["ja", "zya", "jya"],
    &["ju", "zyu", "jyu"],
    &["jo", "zyo", "jyo"],
    // ふぁ行
    &["fa", "fwa"],
    &["fi", "fwi", "fyi"],
    &["fe", "fye"],
    &["fo", "fwo"],
    // うぃ うぇ, and wha/who accepted as plain wa/wo
    &["wi", "whi"],
    &["we", "whe"],
    &["wa", "wha"],
    &["wo", "who"],
    // いぇ
    &["ye", "ie"],
    // くぁ行
    &["qa", "qwa"],
    &["qi", "qwi", "qyi"],
    &["qu", "qwu"],
    &["qe", "qwe", "qye"],
    &["qo", "qwo"],
    // small kana
    &["xa", "la"],
    &["xi", "li", "lyi", "xyi"],
    &["xu", "lu"],
    &["xe", "le", "lye", "xye"],
    &["xo", "lo"],
];

/// Small ゃゅょ: the plain syllable plus its `x`/`l` prefixed spellings.
const SMALL_Y: &[(&str, &[&str])] = &[
    ("ya", &["ya", "xya", "lya"]),
    ("yu", &["yu", "xyu", "lyu"]),
    ("yo", &["yo", "xyo", "lyo"]),
];

fn syllable_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| SYLLABLES.iter().copied().collect())
}

fn equiv_map() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map = HashMap::new();
        for &group in EQUIV_GROUPS {
            for &spelling in group {
                map.insert(spelling, group);
            }
        }
        for &(syllable, spellings) in SMALL_Y {
            map.insert(syllable, spellings);
        }
        map
    })
}

/// Longest known syllable at the start of `rest`.
pub fn match_syllable(rest: &str) -> Option<&'static str> {
    let set = syllable_set();
    (1..=MAX_SYLLABLE_LEN.min(rest.len()))
        .rev()
        .filter(|&len| rest.is_char_boundary(len))
        .find_map(|len| set.get(&rest[..len]).copied())
}

/// Alternate spellings of a syllable, or `None` when it only spells itself.
pub fn alternatives(syllable: &str) -> Option<&'static [&'static str]> {
    equiv_map().get(syllable).copied()
}

pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

pub fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

/// Last vowel letter in `s`, if any.
pub fn last_vowel(s: &str) -> Option<char> {
    s.chars().rev().find(|&c| is_vowel(c))
}

/// First consonant letter of `s`, skipping leading non-letters; `None` when a
/// vowel comes first.
pub fn first_consonant(s: &str) -> Option<char> {
    for c in s.chars() {
        if is_consonant(c) {
            return Some(c);
        }
        if is_vowel(c) {
            return None;
        }
    }
    None
}
