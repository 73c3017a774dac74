// Built-in game data: the sushi menu, result ranks and the chef's lines.
// Readings use the game's romaji alphabet (a-z, `-` for ー).

/// Plates drawn in shuffled order for the whole round: (name, reading).
pub const RANDOM_SUSHI: &[(&str, &str)] = &[
    ("まぐろ", "maguro"), ("サーモン", "sa-mon"), ("いくら", "ikura"), ("たまご", "tamago"),
    ("えび", "ebi"), ("いか", "ika"), ("たこ", "tako"), ("うに", "uni"),
    ("ほたて", "hotate"), ("あなご", "anago"), ("はまち", "hamachi"), ("あじ", "aji"),
    ("ぶり", "buri"), ("えんがわ", "engawa"), ("とびこ", "tobiko"), ("しらこ", "shirako"),
    ("かっぱ巻き", "kappamaki"), ("鉄火巻き", "tekkamaki"), ("ねぎとろ", "negitoro"),
    ("中トロ", "chu-toro"), ("大トロ", "o-toro"), ("しめさば", "shimesaba"),
    ("かんぴょう巻き", "kanpyo-maki"), ("こんにゃく", "konnyaku"), ("納豆巻き", "nattoumaki"),
    ("いなり寿司", "inarizushi"), ("ちらし寿司", "chirashizushi"), ("かにみそ", "kanimiso"),
    ("ほっき貝", "hokkigai"), ("ツナマヨ", "tsunamayo"), ("コーン", "ko-n"),
    ("ハンバーグ", "hanba-gu"), ("ローストビーフ", "ro-sutobi-fu"), ("茶碗蒸し", "chawanmushi"),
    ("フィッシュフライ", "fisshufurai"), ("にゃんこ巻き", "nyankomaki"),
];

/// Themed groups served back to back once the round is under way: (id, plates).
pub const SUSHI_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "hikarimono",
        &[("こはだ", "kohada"), ("いわし", "iwashi"), ("さんま", "sanma"), ("さより", "sayori")],
    ),
    (
        "gunkan",
        &[
            ("うに軍艦", "unigunkan"),
            ("いくら軍艦", "ikuragunkan"),
            ("ねぎとろ軍艦", "negitorogunkan"),
        ],
    ),
    (
        "quantum",
        &[
            ("量子マグロ", "ryoushimaguro"),
            ("シュレディンガーのサーモン", "shuredinga-nosa-mon"),
            ("重ね合わせ玉子", "kasaneawasetamago"),
        ],
    ),
];

/// Result rank, checked from the highest threshold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rank {
    pub min_score: u64,
    pub name: &'static str,
    pub emoji: &'static str,
    pub comment: &'static str,
}

pub const RANKS: &[Rank] = &[
    Rank { min_score: 5000, name: "伝説の寿司マスター", emoji: "🌟", comment: "弟子にしてください" },
    Rank { min_score: 3000, name: "量子寿司職人", emoji: "⚛️", comment: "うちで働かないか？" },
    Rank { min_score: 1500, name: "創作寿司の達人", emoji: "🔥", comment: "いい仕事してたね" },
    Rank { min_score: 700, name: "見習い寿司タイパー", emoji: "🍣", comment: "もうちょい頑張れ！" },
    Rank { min_score: 300, name: "迷える寿司客", emoji: "😵‍💫", comment: "お茶でも飲む？" },
    Rank { min_score: 0, name: "概念未満", emoji: "👻", comment: "…お会計だけでいい？" },
];

/// First rank whose threshold `score` meets.
pub fn rank_for(score: u64) -> &'static Rank {
    RANKS
        .iter()
        .find(|r| score >= r.min_score)
        .unwrap_or(&RANKS[RANKS.len() - 1])
}

/// Situations the chef comments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum ChefTrigger {
    Start,
    Capture1,
    Simul2,
    Simul3,
    Simul4,
    Combo5,
    Combo10,
    Missed,
    LongComplete,
    Last10,
    Idle,
}

impl ChefTrigger {
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Self::Start => &["いらっしゃい！何でも握るよ！"],
            Self::Capture1 => &["へい、お待ち！", "あいよ！", "いい食いっぷりだ！", "はい一丁！"],
            Self::Simul2 => &[
                "おっと！二貫同時！",
                "両手で握った甲斐があった！",
                "二貫同時とは…やるねぇ！",
            ],
            Self::Simul3 => &[
                "な…何が起きた！？",
                "大将の目が追いつかない！",
                "三貫同時！？正気か！？",
            ],
            Self::Simul4 => &["伝説だ…伝説が生まれた…", "この光景、一生忘れない…"],
            Self::Combo5 => &["止まらないね！", "いい手つきだ！"],
            Self::Combo10 => &["天才寿司タイパーの誕生だ！", "もう弟子入りしてくれ！"],
            Self::Missed => &[
                "あー、流れちゃった…",
                "あの寿司は自由を求めていたんだ",
                "惜しかったねぇ…",
            ],
            Self::LongComplete => &["長いネタお見事！", "心肺機能も握りの一部"],
            Self::Last10 => &["ラストスパートだ！", "最後の追い込み！"],
            Self::Idle => &["…お茶でもどうぞ", "大将暇になってきた", "…ガリでもつまむ？"],
        }
    }
}

/// One of `trigger`'s lines, chosen by `pick` (wrapped to the line count).
pub fn chef_line(trigger: ChefTrigger, pick: usize) -> &'static str {
    let lines = trigger.lines();
    lines[pick % lines.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(rank_for(0).name, "概念未満");
        assert_eq!(rank_for(299).min_score, 0);
        assert_eq!(rank_for(300).min_score, 300);
        assert_eq!(rank_for(4999).min_score, 3000);
        assert_eq!(rank_for(1_000_000).min_score, 5000);
    }

    #[test]
    fn test_chef_line_wraps() {
        assert_eq!(chef_line(ChefTrigger::Start, 7), "いらっしゃい！何でも握るよ！");
        assert_eq!(chef_line(ChefTrigger::Combo5, 3), "いい手つきだ！");
    }
}
