pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod filename;
pub mod license;
pub mod model;
pub mod page;

pub use crate::discovery::Discovery;
pub use crate::error::ScrapeError;
pub use crate::fetcher::{Fetch, RateLimitedFetcher};
pub use crate::filename::suggest_filename;
pub use crate::model::ImageMetadata;

/// Discovers a random wikiHow image with usable licensing metadata and
/// downloads its bytes. Blocks, with polite pauses between requests, until
/// one is found; transport and structural errors abort.
pub fn gather() -> Result<ImageMetadata, ScrapeError> {
    let mut discovery = Discovery::new(RateLimitedFetcher::new());
    discovery.run()
}
