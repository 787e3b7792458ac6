// Detailed move pools from the wiki's species articles.
//
// An article carries one boxed table per learn method (level-up, machine,
// tutor, breeding). The leading columns of a pool differ by method and
// species, but the trailing six (move, type, category, power, accuracy,
// PP) are stable, so cells are addressed from the end of the row.

use dexscrape_model::{LearnMethod, MoveRecord};
use scraper::{ElementRef, Html, Selector};

use crate::fetch::PageFetcher;
use crate::layout::{self, ColumnOffset, NodeWalk, RowCells};
use crate::normalize;
use crate::sites::SiteConfig;

/// Cell positions of the move attributes within a pool row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSchema {
    pub name: ColumnOffset,
    pub move_type: ColumnOffset,
    pub category: ColumnOffset,
    pub power: ColumnOffset,
    pub accuracy: ColumnOffset,
    pub pp: ColumnOffset,
}

impl Default for PoolSchema {
    fn default() -> Self {
        Self {
            name: ColumnOffset::FromEnd(11),
            move_type: ColumnOffset::FromEnd(9),
            category: ColumnOffset::FromEnd(7),
            power: ColumnOffset::FromEnd(5),
            accuracy: ColumnOffset::FromEnd(3),
            pp: ColumnOffset::FromEnd(1),
        }
    }
}

/// How move-pool tables are found on an article.
#[derive(Debug, Clone)]
pub struct WikiLayout {
    /// Leading `table.roundy` boxes that belong to the article header.
    pub title_boxes: usize,
    /// A move box holds exactly this many nested tables; the last is the pool.
    pub nested_tables: usize,
    /// Row-node count of a pool with no moves.
    pub empty_pool_nodes: usize,
    pub rows: NodeWalk,
    pub schema: PoolSchema,
}

impl Default for WikiLayout {
    fn default() -> Self {
        Self {
            title_boxes: 2,
            nested_tables: 3,
            empty_pool_nodes: 4,
            rows: NodeWalk::new(3, 2),
            schema: PoolSchema::default(),
        }
    }
}

/// Fetch a species article and extract every move pool.
///
/// Fetch failures are logged and yield an empty list.
pub async fn scrape_moves<F: PageFetcher>(
    fetcher: &F,
    sites: &SiteConfig,
    species: &str,
) -> Vec<MoveRecord> {
    let url = sites.wiki_species_url(species);

    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(species, url = %url, error = %e, "Could not get page");
            return Vec::new();
        }
    };

    let document = Html::parse_document(&html);
    let moves = locate_pools(&document, &WikiLayout::default());
    if moves.is_empty() {
        tracing::warn!(species, url = %url, "Empty move list");
    } else {
        tracing::info!(species, moves = moves.len(), "Extracted move pools");
    }
    moves
}

/// Extract the move records of every pool on the page, in page order.
pub fn locate_pools(document: &Html, layout: &WikiLayout) -> Vec<MoveRecord> {
    let box_sel = Selector::parse("table.roundy").expect("valid selector");

    let mut moves = Vec::new();
    let pools = document
        .select(&box_sel)
        .skip(layout.title_boxes)
        .filter_map(|candidate| pool_table(candidate, layout.nested_tables));

    for (index, pool) in pools.enumerate() {
        let method = LearnMethod::from_pool_index(index);
        let rows = layout::row_nodes(*pool);
        if rows.len() == layout.empty_pool_nodes {
            tracing::debug!(pool = index, "Skipping empty move pool");
            continue;
        }

        let before = moves.len();
        for row in layout.rows.select(&rows) {
            match read_row(&RowCells::of(row), &layout.schema, method) {
                Some(record) => moves.push(record),
                None => tracing::trace!(pool = index, "Skipping malformed pool row"),
            }
        }
        tracing::debug!(pool = index, method = ?method, moves = moves.len() - before, "Read move pool");
    }

    moves
}

/// The pool table inside a move box: the box has a `<big>` title and
/// exactly `nested` descendant tables.
fn pool_table(candidate: ElementRef<'_>, nested: usize) -> Option<ElementRef<'_>> {
    let big_sel = Selector::parse("big").expect("valid selector");
    let table_sel = Selector::parse("table").expect("valid selector");

    candidate.select(&big_sel).next()?;
    let tables: Vec<ElementRef> = candidate.select(&table_sel).collect();
    if tables.len() != nested {
        return None;
    }
    tables.last().copied()
}

fn read_row(cells: &RowCells<'_>, schema: &PoolSchema, method: Option<LearnMethod>) -> Option<MoveRecord> {
    let name = cells.span_text(schema.name)?;
    if name.is_empty() {
        return None;
    }
    Some(MoveRecord {
        name,
        learn_method: method,
        move_type: Some(cells.span_text(schema.move_type)?),
        category: Some(cells.span_text(schema.category)?),
        power: normalize::parse_number(&cells.span_text(schema.power)?),
        accuracy: normalize::parse_number(&cells.span_text(schema.accuracy)?),
        pp: normalize::parse_number(&cells.text(schema.pp)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticPages;

    const TITLE_BOXES: &str = r#"<table class="roundy"><tr><td>Bulbasaur</td></tr></table>
<table class="roundy"><tr><td>Seed Pokemon</td></tr></table>"#;

    /// A move box: title plus wrapper, legend, and pool tables.
    fn move_box(title: &str, pool_rows: &str) -> String {
        format!(
            r#"<table class="roundy"><tr><td><big>{title}</big></td></tr><tr><td><table><tr><td><table><tr><td>Legend</td></tr></table></td></tr><tr><td><table class="sortable">
<tr><th>Lv.</th><th>Move</th><th>Type</th><th>Cat.</th><th>Pwr.</th><th>Acc.</th><th>PP</th></tr>{pool_rows}</table></td></tr></table></td></tr></table>"#
        )
    }

    fn row(leading: &[&str], name: &str, ty: &str, cat: &str, pwr: &str, acc: &str, pp: &str) -> String {
        let mut out = String::from("\n<tr>");
        for cell in leading {
            out.push_str(&format!("<td>{cell}</td>\n"));
        }
        out.push_str(&format!(
            "<td><a href=\"/wiki/{name}_(move)\"><span>{name}</span></a></td>\n\
             <td><a href=\"/wiki/{ty}_(type)\"><span>{ty}</span></a></td>\n\
             <td><span>{cat}</span></td>\n\
             <td><span>{pwr}</span></td>\n\
             <td><span>{acc}</span></td>\n\
             <td>{pp}\n</td></tr>"
        ));
        out
    }

    /// Pool body: rows plus the newline before `</table>`.
    fn pool(rows: &[String]) -> String {
        format!("{}\n", rows.concat())
    }

    fn article(boxes: &[String]) -> String {
        format!("<html><body>{TITLE_BOXES}\n{}</body></html>", boxes.join("\n"))
    }

    #[test]
    fn test_trailing_columns_stable() {
        let level_up = move_box(
            "By leveling up",
            &pool(&[
                row(&["1"], "Tackle", "Normal", "Physical", "40", "100%", "35"),
                row(&["3"], "Growl", "Normal", "Status", "—", "100%", "40"),
            ]),
        );
        let machine = move_box(
            "By TM/HM",
            &pool(&[row(&["TM24", "extra"], "Thunderbolt", "Electric", "Special", "90", "100%", "15")]),
        );

        let doc = Html::parse_document(&article(&[level_up, machine]));
        let moves = locate_pools(&doc, &WikiLayout::default());

        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].name, "Tackle");
        assert_eq!(moves[0].learn_method, Some(LearnMethod::LevelUp));
        assert_eq!(moves[0].power, Some(40));
        assert_eq!(moves[0].accuracy, Some(100));
        assert_eq!(moves[0].pp, Some(35));

        assert_eq!(moves[1].name, "Growl");
        assert_eq!(moves[1].category.as_deref(), Some("Status"));
        assert_eq!(moves[1].power, None);

        // two leading columns instead of one, same trailing fields
        assert_eq!(moves[2].name, "Thunderbolt");
        assert_eq!(moves[2].learn_method, Some(LearnMethod::Machine));
        assert_eq!(moves[2].move_type.as_deref(), Some("Electric"));
        assert_eq!(moves[2].power, Some(90));
    }

    #[test]
    fn test_empty_pool_skipped() {
        // four row nodes: whitespace, header, whitespace, placeholder
        let empty = move_box("By breeding", "\n<tr><td colspan=\"7\">None</td></tr>");
        let tutor = move_box(
            "By tutoring",
            &pool(&[row(&[], "Seed Bomb", "Grass", "Physical", "80", "100%", "15")]),
        );

        let doc = Html::parse_document(&article(&[empty, tutor]));
        let moves = locate_pools(&doc, &WikiLayout::default());

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].name, "Seed Bomb");
        // the empty pool still takes the first pool slot
        assert_eq!(moves[0].learn_method, Some(LearnMethod::Machine));
    }

    #[test]
    fn test_short_row_skipped() {
        let level_up = move_box(
            "By leveling up",
            &pool(&[
                "\n<tr><td>Footnote</td></tr>".to_string(),
                row(&["7"], "Vine Whip", "Grass", "Physical", "45", "100%", "25"),
            ]),
        );

        let doc = Html::parse_document(&article(&[level_up]));
        let moves = locate_pools(&doc, &WikiLayout::default());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].name, "Vine Whip");
    }

    #[test]
    fn test_boxes_without_title_ignored() {
        let untitled = move_box("x", &pool(&[row(&["1"], "Tackle", "Normal", "Physical", "40", "100%", "35")]))
            .replace("<big>x</big>", "x");
        let doc = Html::parse_document(&article(&[untitled]));
        assert!(locate_pools(&doc, &WikiLayout::default()).is_empty());
    }

    #[tokio::test]
    async fn test_scrape_moves() {
        let html = article(&[move_box(
            "By leveling up",
            &pool(&[row(&["1"], "Tackle", "Normal", "Physical", "40", "100%", "35")]),
        )]);
        let pages = StaticPages::new()
            .with_page("https://bulbapedia.bulbagarden.net/wiki/Bulbasaur_(Pokemon)", html);

        let moves = scrape_moves(&pages, &SiteConfig::default(), "Bulbasaur").await;
        assert_eq!(moves.len(), 1);

        let missing = scrape_moves(&pages, &SiteConfig::default(), "Ivysaur").await;
        assert!(missing.is_empty());
    }
}
