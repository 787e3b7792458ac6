use anyhow::{Context, Result};
use dexscrape_model::MoveListing;
use scraper::{Html, Selector};

use crate::fetch::PageFetcher;
use crate::layout::{self, ColumnOffset, NodeWalk, RowCells};
use crate::normalize;
use crate::sites::SiteConfig;

const GENERATIONS: &[(&str, u8)] = &[
    ("I", 1),
    ("II", 2),
    ("III", 3),
    ("IV", 4),
    ("V", 5),
    ("VI", 6),
    ("VII", 7),
    ("VIII", 8),
    ("IX", 9),
];

/// Cell positions in a row of the global move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSchema {
    pub index: ColumnOffset,
    pub name: ColumnOffset,
    pub move_type: ColumnOffset,
    pub category: ColumnOffset,
    pub contest: ColumnOffset,
    pub pp: ColumnOffset,
    pub power: ColumnOffset,
    pub accuracy: ColumnOffset,
    pub generation: ColumnOffset,
}

impl Default for ListSchema {
    fn default() -> Self {
        Self {
            index: ColumnOffset::FromStart(1),
            name: ColumnOffset::FromStart(3),
            move_type: ColumnOffset::FromStart(5),
            category: ColumnOffset::FromStart(7),
            contest: ColumnOffset::FromStart(9),
            pp: ColumnOffset::FromStart(11),
            power: ColumnOffset::FromStart(13),
            accuracy: ColumnOffset::FromStart(15),
            generation: ColumnOffset::FromStart(17),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListLayout {
    pub table: String,
    pub rows: NodeWalk,
    pub schema: ListSchema,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self {
            table: r#"table[border="1"]"#.to_string(),
            rows: NodeWalk::new(3, 2),
            schema: ListSchema::default(),
        }
    }
}

/// Fetch the wiki's move list and extract every row.
///
/// Unlike the per-species scrapers there is only one page here, so a
/// failed fetch is an error.
pub async fn scrape_move_list<F: PageFetcher>(fetcher: &F, sites: &SiteConfig) -> Result<Vec<MoveListing>> {
    let url = sites.wiki_move_list_url();
    tracing::info!(url = %url, "Fetching move list");
    let html = fetcher
        .fetch(&url)
        .await
        .with_context(|| format!("Failed to fetch move list from {url}"))?;

    let document = Html::parse_document(&html);
    let listings = locate_listings(&document, &ListLayout::default())?;
    if listings.is_empty() {
        tracing::warn!(url = %url, "Empty move list");
    } else {
        tracing::info!(moves = listings.len(), "Parsed move list");
    }
    Ok(listings)
}

/// Extract listings from the first table matching the layout's selector.
/// A missing table yields an empty list.
pub fn locate_listings(document: &Html, layout: &ListLayout) -> Result<Vec<MoveListing>> {
    let table_sel = Selector::parse(&layout.table)
        .map_err(|e| anyhow::anyhow!("Invalid table selector '{}': {e}", layout.table))?;
    let Some(table) = document.select(&table_sel).next() else {
        tracing::debug!(selector = %layout.table, "Could not find the move list table");
        return Ok(Vec::new());
    };

    let rows = layout::row_nodes(*table);
    let listings = layout
        .rows
        .select(&rows)
        .filter_map(|row| {
            let listing = read_listing(&RowCells::of(row), &layout.schema);
            if listing.is_none() {
                tracing::debug!("Skipping malformed move list row");
            }
            listing
        })
        .collect();
    Ok(listings)
}

fn read_listing(cells: &RowCells<'_>, schema: &ListSchema) -> Option<MoveListing> {
    let generation = cells.text(schema.generation)?.replace('*', "");
    Some(MoveListing {
        index: cells.text(schema.index)?,
        name: cells.link_text(schema.name)?,
        move_type: cells.span_text(schema.move_type)?,
        category: cells.span_text(schema.category)?,
        contest: cells.span_text(schema.contest)?,
        pp: normalize::parse_number(&cells.text(schema.pp)?),
        power: normalize::parse_number(&cells.text(schema.power)?),
        accuracy: normalize::parse_number(&cells.text(schema.accuracy)?),
        generation: roman_generation(generation.trim())?,
    })
}

fn roman_generation(numeral: &str) -> Option<u8> {
    GENERATIONS
        .iter()
        .find(|(roman, _)| *roman == numeral)
        .map(|(_, number)| *number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticPages;

    fn listing_row(cells: &[&str]) -> String {
        let mut out = String::from("\n<tr>");
        for cell in cells {
            out.push_str(&format!("\n<td>{cell}</td>"));
        }
        out.push_str("\n</tr>");
        out
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><table class=\"toc\"><tr><td>Contents</td></tr></table>\n\
             <table border=\"1\">\n<tr><th>#</th><th>Name</th></tr>{}\n</table></body></html>",
            rows.concat()
        )
    }

    fn pound() -> String {
        listing_row(&[
            "001",
            "<a href=\"/wiki/Pound_(move)\">Pound</a>",
            "<a><span>Normal</span></a>",
            "<span>Physical</span>",
            "<span>Tough</span>",
            "35",
            "40",
            "100%",
            "I",
        ])
    }

    #[test]
    fn test_locate_listings() {
        let hidden_power = listing_row(&[
            "237",
            "<a href=\"/wiki/Hidden_Power_(move)\">Hidden Power</a>",
            "<span>Normal</span>",
            "<span>Special</span>",
            "<span>Clever</span>",
            "15",
            "60*",
            "100%",
            "II*",
        ]);
        let doc = Html::parse_document(&page(&[pound(), hidden_power]));
        let listings = locate_listings(&doc, &ListLayout::default()).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].to_line(), "001;Pound;Normal;Physical;Tough;35;40;100;1");
        assert_eq!(listings[1].power, Some(60));
        assert_eq!(listings[1].generation, 2);
    }

    #[test]
    fn test_non_numeric_cells() {
        let struggle = listing_row(&[
            "165",
            "<a>Struggle</a>",
            "<span>Normal</span>",
            "<span>Physical</span>",
            "<span>Tough</span>",
            "1",
            "50",
            "\u{2014}%",
            "I",
        ]);
        let doc = Html::parse_document(&page(&[struggle]));
        let listings = locate_listings(&doc, &ListLayout::default()).unwrap();
        assert_eq!(listings[0].to_line(), "165;Struggle;Normal;Physical;Tough;1;50;None;1");
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let no_link = listing_row(&["2", "Karate Chop", "x", "x", "x", "25", "50", "100%", "I"]);
        let bad_gen = listing_row(&["3", "<a>Double Slap</a>", "x", "x", "x", "10", "15", "85%", "X"]);
        let doc = Html::parse_document(&page(&[no_link, bad_gen, pound()]));

        let listings = locate_listings(&doc, &ListLayout::default()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "Pound");
    }

    #[tokio::test]
    async fn test_scrape_move_list() {
        let sites = SiteConfig::default();
        let pages = StaticPages::new().with_page(sites.wiki_move_list_url(), page(&[pound()]));
        assert_eq!(scrape_move_list(&pages, &sites).await.unwrap().len(), 1);

        let err = scrape_move_list(&StaticPages::new(), &sites).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch move list"));
    }
}
