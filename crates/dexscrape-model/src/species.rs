use serde::{Deserialize, Serialize};

use crate::literal::{LiteralError, PyLiteral};

/// Header row of the species files, without the optional moves column.
pub const SPECIES_HEADER: &str =
    "Name;Types;Abilities;Tier;HP;Attack;Defense;Special Attack;Special Defense;Speed;Next Evolution(s)";

/// Header row when the moves column is written.
pub const SPECIES_HEADER_WITH_MOVES: &str =
    "Name;Types;Abilities;Tier;HP;Attack;Defense;Special Attack;Special Defense;Speed;Next Evolution(s);Moves";

/// A species entry from a competitive dex JSON export.
///
/// Every field is required: a species without `evos` or `alts` is a
/// malformed export and fails deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexSpecies {
    pub name: String,
    /// Species this one evolves into.
    pub evos: Vec<String>,
    /// One entry per form; the base form has an empty suffix.
    pub alts: Vec<AltForm>,
}

/// A form of a species (base, mega, regional, gendered, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltForm {
    pub suffix: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    #[serde(flatten)]
    pub stats: BaseStats,
    /// Competitive formats, most relevant first.
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl AltForm {
    /// Display name of this form: `Deoxys` or `Deoxys-Attack`.
    pub fn display_name(&self, species: &str) -> String {
        if self.suffix.is_empty() {
            species.to_string()
        } else {
            format!("{species}-{}", self.suffix)
        }
    }

    /// The first listed format, or empty when the form has none.
    pub fn tier(&self) -> &str {
        self.formats.first().map(String::as_str).unwrap_or("")
    }
}

/// One output line of a species file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesRow {
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub tier: String,
    pub stats: BaseStats,
    pub evolutions: Vec<String>,
    /// Pre-rendered moves column; `None` leaves the column out.
    pub moves: Option<PyLiteral>,
}

#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field '{field}': {source}")]
    Literal {
        field: &'static str,
        #[source]
        source: LiteralError,
    },

    #[error("field '{field}' is not a list of strings")]
    NotStringList { field: &'static str },

    #[error("field '{field}' is not a number: {value}")]
    NotNumber { field: &'static str, value: String },
}

const BASE_FIELDS: usize = 11;

impl SpeciesRow {
    /// Render as a semicolon-delimited line (no trailing newline).
    pub fn to_line(&self) -> String {
        let s = &self.stats;
        let mut fields = vec![
            self.name.clone(),
            PyLiteral::str_list(self.types.iter().cloned()).to_string(),
            PyLiteral::str_list(self.abilities.iter().cloned()).to_string(),
            self.tier.clone(),
            s.hp.to_string(),
            s.atk.to_string(),
            s.def.to_string(),
            s.spa.to_string(),
            s.spd.to_string(),
            s.spe.to_string(),
            PyLiteral::str_list(self.evolutions.iter().cloned()).to_string(),
        ];
        if let Some(moves) = &self.moves {
            fields.push(moves.to_string());
        }
        fields.join(";")
    }

    /// Parse a line written by [`SpeciesRow::to_line`].
    pub fn from_line(line: &str) -> Result<Self, RowError> {
        let fields: Vec<&str> = line.splitn(BASE_FIELDS + 1, ';').collect();
        if fields.len() < BASE_FIELDS {
            return Err(RowError::FieldCount { expected: BASE_FIELDS, found: fields.len() });
        }

        let list = |field: &'static str, text: &str| -> Result<Vec<String>, RowError> {
            let literal: PyLiteral = text
                .parse()
                .map_err(|source| RowError::Literal { field, source })?;
            literal.as_str_list().ok_or(RowError::NotStringList { field })
        };
        let stat = |field: &'static str, text: &str| -> Result<u16, RowError> {
            text.trim().parse().map_err(|_| RowError::NotNumber {
                field,
                value: text.to_string(),
            })
        };

        let moves = match fields.get(BASE_FIELDS) {
            Some(text) => Some(
                text.parse()
                    .map_err(|source| RowError::Literal { field: "moves", source })?,
            ),
            None => None,
        };

        Ok(Self {
            name: fields[0].to_string(),
            types: list("types", fields[1])?,
            abilities: list("abilities", fields[2])?,
            tier: fields[3].to_string(),
            stats: BaseStats {
                hp: stat("hp", fields[4])?,
                atk: stat("atk", fields[5])?,
                def: stat("def", fields[6])?,
                spa: stat("spa", fields[7])?,
                spd: stat("spd", fields[8])?,
                spe: stat("spe", fields[9])?,
            },
            evolutions: list("evolutions", fields[10])?,
            moves,
        })
    }
}
