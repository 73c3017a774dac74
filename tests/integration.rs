// Integration tests (native) for the `quantum-sushi` crate.
// These exercise the public API without any wasm or browser functionality.

use quantum_sushi::{
    GameConfig, GameEvent, MoraToken, Phase, ReadingError, Session, SushiMenu, VariantCache,
    generate_variants, tokenize, try_generate_variants,
};

fn has(variants: &[String], s: &str) -> bool {
    variants.iter().any(|v| v == s)
}

#[test]
fn shi_equivalence() {
    let v = generate_variants("sushi");
    assert!(has(&v, "sushi"));
    assert!(has(&v, "susi"));
    assert!(has(&v, "suci"));
}

#[test]
fn gemination_spellings() {
    let v = generate_variants("ikka");
    assert!(has(&v, "ikka"));
    assert!(has(&v, "ixtuka"));
    assert!(has(&v, "iltsuka"));
}

#[test]
fn long_vowel_spellings() {
    let v = generate_variants("ka-");
    assert!(has(&v, "ka-"));
    assert!(has(&v, "kaa"));
}

#[test]
fn nya_keeps_both_readings() {
    let v = generate_variants("nya");
    assert!(has(&v, "nya"));
    assert!(has(&v, "nnya"));
    assert!(has(&v, "n'ya"));
}

#[test]
fn apostrophe_only_before_vowel_or_y() {
    let v = generate_variants("kanpyo-maki");
    assert!(!v.iter().any(|s| s.contains('\'')));
    let v = generate_variants("kanimiso");
    assert!(has(&v, "kanimiso"));
}

#[test]
fn unknown_characters_pass_through() {
    let v = generate_variants("寿司");
    assert_eq!(&v[..], &["寿司".to_string()]);
    assert_eq!(tokenize("q"), vec![vec![MoraToken::Literal("q".into())]]);
}

#[test]
fn boundary_check_rejects_bad_readings() {
    assert_eq!(try_generate_variants(""), Err(ReadingError::Empty));
    assert_eq!(
        try_generate_variants("Sushi"),
        Err(ReadingError::InvalidChar { ch: 'S', pos: 0 })
    );
    assert!(try_generate_variants("sushi").is_ok());
}

#[test]
fn separate_caches_agree() {
    let a = VariantCache::new();
    let b = VariantCache::new();
    assert_eq!(a.variants("chu-toro"), b.variants("chu-toro"));
    assert_eq!(a.len(), 1);
}

// Plays a whole round with a perfect typist: every plate on the belt is typed
// as soon as it appears, so the round ends once the menu is used up.
#[test]
fn perfect_round_serves_whole_menu() {
    let menu = SushiMenu::builtin();
    let total = menu.len() as u32;
    let mut session = Session::new(GameConfig::default(), menu, 2024);
    session.start(0.0);

    let mut now = 0.0;
    let mut next_second = 1000.0;
    let mut ended = false;
    while now < 70_000.0 {
        if now >= next_second {
            session.second_elapsed();
            next_second += 1000.0;
        }
        let events = session.tick(now);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Missed { .. })));
        if events.contains(&GameEvent::Ended) {
            ended = true;
            break;
        }
        let readings: Vec<String> = session
            .items()
            .iter()
            .filter(|s| !s.is_captured())
            .map(|s| s.def().reading.clone())
            .collect();
        for r in readings {
            for c in r.chars() {
                session.key(c, now);
            }
        }
        now += 16.0;
    }

    assert!(ended, "round did not end");
    assert_eq!(session.phase(), Phase::Result);
    let summary = session.summary();
    assert_eq!(summary.plates, total);
    assert_eq!(session.stats().max_combo, total);
    assert!(summary.share_text().contains(summary.rank.name));
}
