//! Sushi menu: the (name, reading) pairs a round draws from.

use std::collections::HashSet;

use crate::data::{RANDOM_SUSHI, SUSHI_GROUPS};
use crate::error::MenuError;
use crate::romaji::validate_reading;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SushiDef {
    pub name: String,
    pub reading: String,
}

impl SushiDef {
    pub fn new(name: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reading: reading.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SushiGroup {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "sushis"))]
    pub items: Vec<SushiDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SushiMenu {
    #[cfg_attr(feature = "serde", serde(rename = "random_sushis", default))]
    pub random: Vec<SushiDef>,
    #[cfg_attr(feature = "serde", serde(rename = "sushi_groups", default))]
    pub groups: Vec<SushiGroup>,
}

impl SushiMenu {
    /// The menu shipped with the game.
    pub fn builtin() -> Self {
        let def = |&(name, reading): &(&str, &str)| SushiDef::new(name, reading);
        Self {
            random: RANDOM_SUSHI.iter().map(def).collect(),
            groups: SUSHI_GROUPS
                .iter()
                .map(|&(id, items)| SushiGroup {
                    id: id.to_string(),
                    items: items.iter().map(def).collect(),
                })
                .collect(),
        }
    }

    /// Parses and validates `{ "random_sushis": [...], "sushi_groups": [...] }`.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let menu: Self = serde_json::from_str(json)?;
        menu.validate()?;
        Ok(menu)
    }

    /// Checks names, readings and ids; every reading must be unique across the
    /// whole menu so a round never serves the same plate twice.
    pub fn validate(&self) -> Result<(), MenuError> {
        let mut readings = HashSet::new();
        for (i, def) in self.random.iter().enumerate() {
            check_def(def, &format!("random_sushis[{i}]"), &mut readings)?;
        }

        let mut ids = HashSet::new();
        for (gi, group) in self.groups.iter().enumerate() {
            if group.id.is_empty() {
                return Err(MenuError::EmptyGroupId { index: gi });
            }
            if !ids.insert(group.id.as_str()) {
                return Err(MenuError::DuplicateGroupId(group.id.clone()));
            }
            if group.items.is_empty() {
                return Err(MenuError::EmptyGroup(group.id.clone()));
            }
            for (si, def) in group.items.iter().enumerate() {
                let location = format!("sushi_groups[{gi}].sushis[{si}] (id={})", group.id);
                check_def(def, &location, &mut readings)?;
            }
        }
        Ok(())
    }

    /// Every definition, random pool first.
    pub fn iter(&self) -> impl Iterator<Item = &SushiDef> {
        self.random
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.items.iter()))
    }

    pub fn find(&self, reading: &str) -> Option<&SushiDef> {
        self.iter().find(|d| d.reading == reading)
    }

    pub fn group(&self, id: &str) -> Option<&SushiGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

fn check_def<'a>(
    def: &'a SushiDef,
    location: &str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), MenuError> {
    if def.name.is_empty() {
        return Err(MenuError::EmptyName {
            location: location.to_string(),
        });
    }
    validate_reading(&def.reading).map_err(|source| MenuError::InvalidReading {
        location: location.to_string(),
        reading: def.reading.clone(),
        source,
    })?;
    if !seen.insert(def.reading.as_str()) {
        return Err(MenuError::DuplicateReading {
            location: location.to_string(),
            reading: def.reading.clone(),
        });
    }
    Ok(())
}
