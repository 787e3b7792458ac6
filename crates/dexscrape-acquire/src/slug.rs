// Species name -> database-site URL slug.
//
// The site keys species pages by lowercase name and selects forms with a
// `?form=` query. A handful of names need literal remaps because the site
// uses Unicode glyphs the ASCII export names lack.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

/// Whole-name remaps, matched against the lowercased name.
const EXACT_NAMES: &[(&str, &str)] = &[
    ("nidoran-m", "nidoran\u{2642}"),
    ("nidoran-f", "nidoran\u{2640}"),
    ("flabebe", "flab\u{e9}b\u{e9}"),
    ("farfetch'd", "farfetch\u{2019}d"),
];

/// Single-letter gender suffixes spelled out by the site.
const SUFFIX_NAMES: &[(&str, &str)] = &[("m", "male"), ("f", "female")];

/// Species whose hyphen is part of the base name, not a form separator.
const HYPHENATED_SPECIES: &[&str] = &["ho-oh", "porygon-z", "jangmo-o", "kommo-o", "hakamo-o"];

const FORM_MARKER: &str = "?form=";

/// The last path segment of a species page URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedSlug(String);

impl NormalizedSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slug without the form query; shared by every form of a species.
    pub fn base(&self) -> &str {
        self.0.split_once(FORM_MARKER).map_or(self.0.as_str(), |(base, _)| base)
    }

    pub fn form(&self) -> Option<&str> {
        self.0.split_once(FORM_MARKER).map(|(_, form)| form)
    }
}

impl fmt::Display for NormalizedSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Resolve a species display name to its slug.
///
/// Never fails: unrecognized names still produce a best-effort slug.
/// Numeric form suffixes (`Zygarde-10%` -> `zygarde?form=10`) pass through.
pub fn resolve(name: &str) -> NormalizedSlug {
    let name: String = name.nfc().collect::<String>().to_lowercase().replace('%', "");

    if let Some(glyph_name) = lookup(EXACT_NAMES, &name) {
        return NormalizedSlug(glyph_name.to_string());
    }

    let Some(pos) = name.find('-') else {
        return NormalizedSlug(name);
    };
    if HYPHENATED_SPECIES.contains(&name.as_str()) {
        return NormalizedSlug(name);
    }

    let suffix = form_suffix(&name, pos);
    NormalizedSlug(format!("{}{FORM_MARKER}{suffix}", &name[..pos]))
}

/// Text after the first hyphen up to the last space (or the end), without
/// apostrophes. Empty when the last space precedes the hyphen.
fn form_suffix(name: &str, pos: usize) -> String {
    let end = name.rfind(' ').unwrap_or(name.len());
    let suffix = name.get(pos + 1..end).unwrap_or("").replace('\'', "");
    match lookup(SUFFIX_NAMES, &suffix) {
        Some(long) => long.to_string(),
        None => suffix,
    }
}
