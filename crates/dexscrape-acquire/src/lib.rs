pub mod bulbapedia;
pub mod fetch;
pub mod layout;
pub mod move_list;
pub mod normalize;
pub mod sites;
pub mod slug;
pub mod source;
pub mod veekun;

pub use fetch::{HttpFetcher, PageFetcher, StaticPages};
pub use sites::SiteConfig;
pub use slug::NormalizedSlug;
pub use source::MoveSource;
