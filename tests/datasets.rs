// Invariants of the built-in menu, ranks and chef lines.
// Native-only: nothing here touches browser APIs.

use std::collections::HashSet;

use quantum_sushi::data::{ChefTrigger, RANKS, RANDOM_SUSHI, SUSHI_GROUPS};
use quantum_sushi::romaji::validate_reading;
use quantum_sushi::{SushiMenu, TypingTarget, generate_variants};

#[test]
fn builtin_menu_validates() {
    let menu = SushiMenu::builtin();
    menu.validate().expect("builtin menu should be valid");
    let group_plates: usize = SUSHI_GROUPS.iter().map(|(_, items)| items.len()).sum();
    assert_eq!(menu.len(), RANDOM_SUSHI.len() + group_plates);
}

#[test]
fn readings_are_unique_across_menu() {
    let mut seen = HashSet::new();
    let all = RANDOM_SUSHI
        .iter()
        .chain(SUSHI_GROUPS.iter().flat_map(|(_, items)| items.iter()));
    for (name, reading) in all {
        assert!(!name.is_empty(), "empty name for reading '{}'", reading);
        assert!(validate_reading(reading).is_ok(), "invalid reading '{}' for '{}'", reading, name);
        assert!(seen.insert(*reading), "duplicate reading '{}'", reading);
    }
}

#[test]
fn group_ids_are_unique() {
    let mut ids = HashSet::new();
    for (id, items) in SUSHI_GROUPS {
        assert!(ids.insert(*id), "duplicate group '{}'", id);
        assert!(!items.is_empty(), "group '{}' is empty", id);
    }
}

#[test]
fn every_reading_is_typeable_as_written() {
    for def in SushiMenu::builtin().iter() {
        let variants = generate_variants(&def.reading);
        assert_eq!(variants[0], def.reading, "canonical spelling must come first");

        let mut target = TypingTarget::for_reading(&def.reading);
        for c in def.reading.chars() {
            target.feed(c);
        }
        assert!(target.is_captured(), "typing '{}' did not capture it", def.reading);
    }
}

#[test]
fn ranks_descend_to_zero() {
    for pair in RANKS.windows(2) {
        assert!(pair[0].min_score > pair[1].min_score);
    }
    assert_eq!(RANKS.last().map(|r| r.min_score), Some(0));
}

#[test]
fn every_trigger_has_lines() {
    let triggers = [
        ChefTrigger::Start,
        ChefTrigger::Capture1,
        ChefTrigger::Simul2,
        ChefTrigger::Simul3,
        ChefTrigger::Simul4,
        ChefTrigger::Combo5,
        ChefTrigger::Combo10,
        ChefTrigger::Missed,
        ChefTrigger::LongComplete,
        ChefTrigger::Last10,
        ChefTrigger::Idle,
    ];
    for t in triggers {
        assert!(!t.lines().is_empty(), "{:?} has no lines", t);
    }
}
