use dexscrape_model::MoveRecord;

use crate::fetch::PageFetcher;
use crate::sites::SiteConfig;
use crate::{bulbapedia, veekun};

/// Which site a species' move pool is scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Database site: move names only, keyed by resolved slug.
    Veekun,
    /// Wiki: every learn-method pool with full attributes.
    Bulbapedia,
}

impl MoveSource {
    /// Scrape one species. Never fails; problems are logged and give an empty list.
    pub async fn moves_for<F: PageFetcher>(
        self,
        fetcher: &F,
        sites: &SiteConfig,
        species: &str,
    ) -> Vec<MoveRecord> {
        match self {
            MoveSource::Veekun => veekun::scrape_moves(fetcher, sites, species).await,
            MoveSource::Bulbapedia => bulbapedia::scrape_moves(fetcher, sites, species).await,
        }
    }
}
