use serde::{Deserialize, Serialize};

use crate::literal::PyLiteral;

/// Header row of the global move list file.
pub const MOVE_LIST_HEADER: &str = "Index;Name;Type;Category;Contest;PP;Power;Accuracy;Gen";

/// How a species acquires a move. Wiki pages list the pools in this order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearnMethod {
    LevelUp,
    Machine,
    Tutor,
    Breeding,
}

impl LearnMethod {
    const POOL_ORDER: [LearnMethod; 4] = [
        LearnMethod::LevelUp,
        LearnMethod::Machine,
        LearnMethod::Tutor,
        LearnMethod::Breeding,
    ];

    /// The learn method of the `index`-th move pool on a species page.
    pub fn from_pool_index(index: usize) -> Option<Self> {
        Self::POOL_ORDER.get(index).copied()
    }
}

/// A move a species can learn, as scraped from one table row.
///
/// The database site only yields names; the wiki fills in the attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learn_method: Option<LearnMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pp: Option<u16>,
}

impl MoveRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attribute dict for the detailed moves column.
    fn details_literal(&self) -> PyLiteral {
        let text = |v: &Option<String>| PyLiteral::Str(v.clone().unwrap_or_default());
        PyLiteral::Dict(vec![
            (PyLiteral::Str("Type".into()), text(&self.move_type)),
            (PyLiteral::Str("Category".into()), text(&self.category)),
            (PyLiteral::Str("Power".into()), PyLiteral::opt_int(self.power)),
            (PyLiteral::Str("Accuracy".into()), PyLiteral::opt_int(self.accuracy)),
            (PyLiteral::Str("PP".into()), PyLiteral::opt_int(self.pp)),
        ])
    }
}

/// Moves as a list of names, duplicates kept: `['Tackle', 'Growl']`.
pub fn move_names_literal(moves: &[MoveRecord]) -> PyLiteral {
    PyLiteral::str_list(moves.iter().map(|m| m.name.clone()))
}

/// Moves as a dict keyed by name. A later pool overwrites an earlier entry
/// for the same move but keeps its position.
pub fn move_details_literal(moves: &[MoveRecord]) -> PyLiteral {
    let mut entries = Vec::new();
    for m in moves {
        PyLiteral::dict_insert(&mut entries, PyLiteral::Str(m.name.clone()), m.details_literal());
    }
    PyLiteral::Dict(entries)
}

/// One row of the wiki's global move list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveListing {
    /// Index cell text as printed on the page.
    pub index: String,
    pub name: String,
    pub move_type: String,
    pub category: String,
    pub contest: String,
    pub pp: Option<u16>,
    pub power: Option<u16>,
    pub accuracy: Option<u16>,
    pub generation: u8,
}

impl MoveListing {
    /// Semicolon-delimited line, absent numbers written as `None`.
    /// Footnote asterisks never reach the output.
    pub fn to_line(&self) -> String {
        let num = |v: Option<u16>| v.map_or_else(|| "None".to_string(), |n| n.to_string());
        let line = [
            self.index.clone(),
            self.name.clone(),
            self.move_type.clone(),
            self.category.clone(),
            self.contest.clone(),
            num(self.pp),
            num(self.power),
            num(self.accuracy),
            self.generation.to_string(),
        ]
        .join(";");
        line.replace('*', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thunderbolt() -> MoveRecord {
        MoveRecord {
            name: "Thunderbolt".into(),
            learn_method: Some(LearnMethod::Machine),
            move_type: Some("Electric".into()),
            category: Some("Special".into()),
            power: Some(90),
            accuracy: Some(100),
            pp: Some(15),
        }
    }

    #[test]
    fn test_pool_order() {
        assert_eq!(LearnMethod::from_pool_index(0), Some(LearnMethod::LevelUp));
        assert_eq!(LearnMethod::from_pool_index(3), Some(LearnMethod::Breeding));
        assert_eq!(LearnMethod::from_pool_index(4), None);
    }

    #[test]
    fn test_names_literal_keeps_duplicates() {
        let moves = vec![MoveRecord::named("Tackle"), MoveRecord::named("Tackle")];
        assert_eq!(move_names_literal(&moves).to_string(), "['Tackle', 'Tackle']");
    }

    #[test]
    fn test_details_literal() {
        let mut tutor = thunderbolt();
        tutor.learn_method = Some(LearnMethod::Tutor);
        tutor.pp = Some(24);
        let moves = vec![thunderbolt(), MoveRecord::named("Growl"), tutor];

        let literal = move_details_literal(&moves);
        assert_eq!(
            literal.to_string(),
            "{'Thunderbolt': {'Type': 'Electric', 'Category': 'Special', 'Power': 90, 'Accuracy': 100, 'PP': 24}, \
             'Growl': {'Type': '', 'Category': '', 'Power': None, 'Accuracy': None, 'PP': None}}"
        );
    }

    #[test]
    fn test_listing_line() {
        let listing = MoveListing {
            index: "1".into(),
            name: "Pound".into(),
            move_type: "Normal".into(),
            category: "Physical".into(),
            contest: "Tough*".into(),
            pp: Some(35),
            power: Some(40),
            accuracy: None,
            generation: 1,
        };
        assert_eq!(listing.to_line(), "1;Pound;Normal;Physical;Tough;35;40;None;1");
    }
}
