// Loading a dex JSON export and expanding it into one row per form.

use std::path::Path;

use anyhow::Context;
use dexscrape_model::{DexSpecies, PyLiteral, SpeciesRow};
use serde::Deserialize;
use serde_json::Value;

use crate::ExportError;

/// JSON pointer of the species list in the species export.
pub const SPECIES_POINTER: &str = "/pokemon";

/// JSON pointer of the species list in a per-generation export.
pub const GENERATION_POINTER: &str = "/injectRpcs/1/1/pokemon";

/// Rules applied while turning species into rows.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Where the species list sits in the input document.
    pub pointer: String,
    /// Species whose named variants are all written as the root species.
    /// `Arceus-Fire` is skipped, `Arceus` is kept.
    pub collapsed_roots: Vec<String>,
    /// Form names written with no evolutions.
    pub evolutionless_forms: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Options for the species export.
impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pointer: SPECIES_POINTER.to_string(),
            collapsed_roots: names(&["Arceus"]),
            evolutionless_forms: names(&["Arceus", "Deoxys"]),
        }
    }
}

impl ExportOptions {
    /// Options for the per-generation exports, which also collapse Silvally.
    pub fn generation() -> Self {
        Self {
            pointer: GENERATION_POINTER.to_string(),
            collapsed_roots: names(&["Arceus", "Silvally"]),
            evolutionless_forms: names(&["Arceus", "Deoxys", "Silvally"]),
        }
    }

    /// True when `name` is a variant of a collapsed root, not the root itself.
    pub fn is_collapsed(&self, name: &str) -> bool {
        self.collapsed_roots
            .iter()
            .any(|root| name.starts_with(root.as_str()) && name != root)
    }

    fn is_evolutionless(&self, name: &str) -> bool {
        self.evolutionless_forms.iter().any(|form| form == name)
    }
}

/// Parse a JSON document and deserialize the species list at `pointer`.
pub fn load_species(json: &str, pointer: &str) -> Result<Vec<DexSpecies>, ExportError> {
    let document: Value = serde_json::from_str(json)?;
    let list = document
        .pointer(pointer)
        .ok_or_else(|| ExportError::MissingKey(pointer.to_string()))?
        .as_array()
        .ok_or_else(|| ExportError::NotAList(pointer.to_string()))?;

    list.iter()
        .enumerate()
        .map(|(index, entry)| {
            DexSpecies::deserialize(entry).map_err(|source| ExportError::Species {
                pointer: pointer.to_string(),
                index,
                source,
            })
        })
        .collect()
}

/// Read a JSON file and load the species list at `pointer`.
pub fn read_species(path: &Path, pointer: &str) -> anyhow::Result<Vec<DexSpecies>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let species =
        load_species(&json, pointer).with_context(|| format!("Failed to load species from {}", path.display()))?;
    tracing::info!(path = %path.display(), species = species.len(), "Loaded species");
    Ok(species)
}

/// One row per form of `species`, all sharing the same moves column.
pub fn expand_rows(
    species: &DexSpecies,
    options: &ExportOptions,
    moves: Option<&PyLiteral>,
) -> Vec<SpeciesRow> {
    species
        .alts
        .iter()
        .map(|alt| {
            let name = alt.display_name(&species.name);
            let evolutions = if options.is_evolutionless(&name) {
                Vec::new()
            } else {
                species.evos.clone()
            };
            SpeciesRow {
                types: alt.types.clone(),
                abilities: alt.abilities.clone(),
                tier: alt.tier().to_string(),
                stats: alt.stats,
                evolutions,
                moves: moves.cloned(),
                name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "pokemon": [
            {"name": "Bulbasaur", "evos": ["Ivysaur"], "alts": [
                {"suffix": "", "types": ["Grass", "Poison"], "abilities": ["Overgrow", "Chlorophyll"],
                 "hp": 45, "atk": 49, "def": 49, "spa": 65, "spd": 65, "spe": 45, "formats": ["LC"]}
            ]},
            {"name": "Deoxys", "evos": ["Nothing"], "alts": [
                {"suffix": "", "types": ["Psychic"], "abilities": ["Pressure"],
                 "hp": 50, "atk": 150, "def": 50, "spa": 150, "spd": 50, "spe": 150, "formats": ["Uber"]},
                {"suffix": "Attack", "types": ["Psychic"], "abilities": ["Pressure"],
                 "hp": 50, "atk": 180, "def": 20, "spa": 180, "spd": 20, "spe": 150, "formats": []}
            ]},
            {"name": "Arceus-Fire", "evos": [], "alts": [
                {"suffix": "", "types": ["Fire"], "abilities": ["Multitype"],
                 "hp": 120, "atk": 120, "def": 120, "spa": 120, "spd": 120, "spe": 120, "formats": ["Uber"]}
            ]}
        ]
    }"#;

    #[test]
    fn test_load_species() {
        let species = load_species(EXPORT, SPECIES_POINTER).unwrap();
        assert_eq!(species.len(), 3);
        assert_eq!(species[1].alts[1].suffix, "Attack");
    }

    #[test]
    fn test_missing_pointer_is_fatal() {
        let err = load_species(EXPORT, GENERATION_POINTER).unwrap_err();
        assert!(matches!(err, ExportError::MissingKey(ref p) if p == GENERATION_POINTER));

        let err = load_species(r#"{"pokemon": {"name": "x"}}"#, SPECIES_POINTER).unwrap_err();
        assert!(matches!(err, ExportError::NotAList(_)));
    }

    #[test]
    fn test_missing_species_key_is_fatal() {
        let json = r#"{"pokemon": [{"name": "Mew", "alts": []}]}"#;
        let err = load_species(json, SPECIES_POINTER).unwrap_err();
        assert!(matches!(err, ExportError::Species { index: 0, .. }));
        assert!(err.to_string().contains("evos"));
    }

    #[test]
    fn test_generation_pointer() {
        let json = r#"{"injectRpcs": [["x"], ["dump-gens", {"pokemon": []}]]}"#;
        assert!(load_species(json, GENERATION_POINTER).unwrap().is_empty());
    }

    #[test]
    fn test_expand_forms() {
        let species = load_species(EXPORT, SPECIES_POINTER).unwrap();
        let options = ExportOptions::default();

        let rows = expand_rows(&species[0], &options, None);
        assert_eq!(
            rows[0].to_line(),
            "Bulbasaur;['Grass', 'Poison'];['Overgrow', 'Chlorophyll'];LC;45;49;49;65;65;45;['Ivysaur']"
        );

        let rows = expand_rows(&species[1], &options, None);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Deoxys", "Deoxys-Attack"]);
        // the bare form is evolution-less; the named variant keeps its list
        assert!(rows[0].evolutions.is_empty());
        assert_eq!(rows[1].evolutions, vec!["Nothing"]);
        assert_eq!(rows[1].tier, "");
    }

    #[test]
    fn test_collapsed_roots() {
        let options = ExportOptions::default();
        assert!(options.is_collapsed("Arceus-Fire"));
        assert!(!options.is_collapsed("Silvally-Water"));
        assert!(!options.is_collapsed("Arceus"));
        assert!(!options.is_collapsed("Deoxys-Attack"));

        let generation = ExportOptions::generation();
        assert!(generation.is_collapsed("Arceus-Fire"));
        assert!(generation.is_collapsed("Silvally-Water"));
        assert!(!generation.is_collapsed("Silvally"));
    }

    #[test]
    fn test_moves_shared_by_forms() {
        let species = load_species(EXPORT, SPECIES_POINTER).unwrap();
        let moves = PyLiteral::str_list(["Psycho Boost"]);
        let rows = expand_rows(&species[1], &ExportOptions::default(), Some(&moves));
        assert!(rows.iter().all(|r| r.moves.as_ref() == Some(&moves)));
        assert!(rows[1].to_line().ends_with(";['Nothing'];['Psycho Boost']"));
    }

    #[test]
    fn test_silvally_evolutions_by_export() {
        let json = r#"{"pokemon": [{"name": "Silvally", "evos": ["Nothing"], "alts": [
            {"suffix": "", "types": ["Normal"], "abilities": ["RKS System"],
             "hp": 95, "atk": 95, "def": 95, "spa": 95, "spd": 95, "spe": 95, "formats": ["PU"]}
        ]}]}"#;
        let species = load_species(json, SPECIES_POINTER).unwrap();

        let rows = expand_rows(&species[0], &ExportOptions::default(), None);
        assert_eq!(rows[0].evolutions, vec!["Nothing"]);

        let rows = expand_rows(&species[0], &ExportOptions::generation(), None);
        assert!(rows[0].evolutions.is_empty());
    }
}
