/// Base URLs and client identity for the scraped sites.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Pokémon database site (move names per species).
    pub veekun_url: String,
    /// Wiki (detailed move pools and the global move list).
    pub wiki_url: String,
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            veekun_url: "https://veekun.com".to_string(),
            wiki_url: "https://bulbapedia.bulbagarden.net".to_string(),
            user_agent: "dexscrape/0.1 (pokemon data tool)".to_string(),
        }
    }
}

impl SiteConfig {
    /// Species page on the database site; the slug is the last path segment.
    pub fn veekun_pokemon_url(&self, slug: &str) -> String {
        format!("{}/dex/pokemon/{slug}", self.veekun_url.trim_end_matches('/'))
    }

    /// Species article on the wiki, e.g. `/wiki/Mr._Mime_(Pokemon)`.
    pub fn wiki_species_url(&self, name: &str) -> String {
        format!(
            "{}/wiki/{}_(Pokemon)",
            self.wiki_url.trim_end_matches('/'),
            name.replace(' ', "_")
        )
    }

    pub fn wiki_move_list_url(&self) -> String {
        format!("{}/wiki/List_of_moves", self.wiki_url.trim_end_matches('/'))
    }
}
