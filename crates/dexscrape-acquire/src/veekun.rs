use dexscrape_model::MoveRecord;
use regex::Regex;
use scraper::{Html, Node, Selector};
use std::sync::LazyLock;

use crate::fetch::PageFetcher;
use crate::layout::{self, NodeWalk};
use crate::sites::SiteConfig;
use crate::slug;

/// Class signature of the per-species move table.
const MOVES_TABLE: &str = "table.dex-pokemon-moves.dex-pokemon-pokemon-moves.striped-rows";

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z ]+").expect("valid regex"));

/// Where the move links sit inside the move table.
#[derive(Debug, Clone)]
pub struct MovesLayout {
    /// Learn-method sections among the table's child nodes. The leading
    /// nodes are column groups and the header.
    pub sections: NodeWalk,
    /// Rows among a section's child nodes; the others are whitespace.
    pub rows: NodeWalk,
    /// `href` prefix of move-detail links (items and abilities share the row shape).
    pub link_prefix: String,
}

impl Default for MovesLayout {
    fn default() -> Self {
        Self {
            sections: NodeWalk::new(7, 2),
            rows: NodeWalk::new(1, 2),
            link_prefix: "/dex/moves/".to_string(),
        }
    }
}

/// Fetch a species page and extract its move names.
///
/// Fetch failures and missing tables are logged and yield an empty list.
pub async fn scrape_moves<F: PageFetcher>(
    fetcher: &F,
    sites: &SiteConfig,
    species: &str,
) -> Vec<MoveRecord> {
    let slug = slug::resolve(species);
    let url = sites.veekun_pokemon_url(slug.as_str());

    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(species, slug = %slug, error = %e, "Could not get page");
            return Vec::new();
        }
    };

    let document = Html::parse_document(&html);
    let moves = locate_moves(&document, &MovesLayout::default());
    if moves.is_empty() {
        tracing::warn!(species, slug = %slug, "Empty move list");
    } else {
        tracing::info!(species, slug = %slug, moves = moves.len(), "Extracted move names");
    }
    moves
}

/// Locate the move table and extract one record per move link.
///
/// A missing table or a cell without a move link is skipped, never an error.
pub fn locate_moves(document: &Html, layout: &MovesLayout) -> Vec<MoveRecord> {
    let table_sel = Selector::parse(MOVES_TABLE).expect("valid selector");
    let Some(table) = document.select(&table_sel).next() else {
        tracing::debug!("Could not find the move table");
        return Vec::new();
    };

    let sections = layout::child_nodes(*table);
    let mut moves = Vec::new();

    for section in layout.sections.select(&sections) {
        let rows = layout::child_nodes(section);
        for row in layout.rows.select(&rows) {
            match move_link_name(row, &layout.link_prefix) {
                Some(name) => moves.push(MoveRecord::named(name)),
                None => tracing::trace!("Skipping row without a move link"),
            }
        }
    }

    moves
}

/// Name of the row's first link, if that link points at a move page.
fn move_link_name(row: ego_tree::NodeRef<'_, Node>, prefix: &str) -> Option<String> {
    let link = layout::first_element(row, "a")?;
    let href = link.value().as_element()?.attr("href")?;
    if !href.starts_with(prefix) {
        return None;
    }
    Some(sanitize_move_name(layout::node_text(link).trim()))
}

/// Replace each run of characters outside `[0-9a-zA-Z ]` with one apostrophe.
///
/// The site mixes typographic apostrophes and non-breaking hyphens into
/// move names; this folds them onto `'`. Legitimate hyphens are folded too.
pub fn sanitize_move_name(name: &str) -> String {
    NON_NAME_CHARS.replace_all(name, "'").into_owned()
}
