use std::fmt;

use log::{debug, info};
use rand::Rng;

use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetcher::Fetch;
use crate::model::{ChoiceInfo, ImageMetadata};
use crate::page::{choose, Page};

/// First contact: wikiHow assigns a random article.
pub const START_URL: &str = "https://www.wikihow.com/Special:Randomizer";

/// Prefix for resolving site-relative links.
pub const SITE_DOMAIN: &str = "https://www.wikihow.com";

/// Why a discovery round was abandoned. Either way the loop resumes at the
/// entry-page step; it never re-picks among the remaining candidates of the
/// same entry page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Restart {
    NoCandidates,
    RightsReserved,
}

impl fmt::Display for Restart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restart::NoCandidates => write!(f, "entry page has no image candidates"),
            Restart::RightsReserved => write!(f, "detail page is all-rights-reserved"),
        }
    }
}

enum State {
    SeekingPage,
    SeekingImage {
        base: String,
        base_index: usize,
        detail_url: String,
    },
}

/// Drives the whole pipeline: random entry page, candidate selection, detail
/// page, metadata extraction, image download. Generic over [`Fetch`] so tests
/// can run it against scripted responses.
pub struct Discovery<F> {
    fetcher: F,
    entry_url: String,
    domain: String,
}

impl<F: Fetch> Discovery<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_site(fetcher, START_URL, SITE_DOMAIN)
    }

    /// Point discovery at a different site root. Used by tests to target a
    /// local mock server.
    pub fn with_site(fetcher: F, entry_url: &str, domain: &str) -> Self {
        Self {
            fetcher,
            entry_url: entry_url.to_string(),
            domain: domain.to_string(),
        }
    }

    /// Runs discovery until an image with usable licensing metadata is found,
    /// then downloads the image bytes as the final request. Transport and
    /// structural errors abort; everything else restarts the loop.
    pub fn run(&mut self) -> Result<ImageMetadata, ScrapeError> {
        let mut metadata = self.fetch_minimum()?;
        info!("Fetching image itself ...");
        let image = self.fetcher.fetch(&metadata.image.url)?;
        metadata.image.data = Some(image.body);
        Ok(metadata)
    }

    /// Makes as few requests as possible to determine the metadata of a
    /// random image. The returned metadata has no image bytes yet.
    fn fetch_minimum(&mut self) -> Result<ImageMetadata, ScrapeError> {
        let mut rng = rand::thread_rng();
        let mut state = State::SeekingPage;

        loop {
            state = match state {
                State::SeekingPage => self.seek_page(&mut rng)?,
                State::SeekingImage {
                    base,
                    base_index,
                    detail_url,
                } => {
                    info!("Fetching image metadata ...");
                    let detail = self.fetcher.fetch(&detail_url)?;
                    match extract(&detail, &self.domain)? {
                        Some(mut metadata) => {
                            metadata.choice = Some(ChoiceInfo {
                                base,
                                base_index,
                                image_metadata: detail_url,
                            });
                            return Ok(metadata);
                        }
                        None => {
                            info!("Restarting: {}", Restart::RightsReserved);
                            State::SeekingPage
                        }
                    }
                }
            };
        }
    }

    fn seek_page<R: Rng>(&mut self, rng: &mut R) -> Result<State, ScrapeError> {
        info!("Fetching entry page ...");
        let entry = self.fetcher.fetch(&self.entry_url)?;
        debug!("Got {}", entry.final_url);

        let page = Page::parse(&entry.text());
        let candidates = page.find_candidates();
        let Some(candidate) = choose(&candidates, rng) else {
            info!("Restarting: {}", Restart::NoCandidates);
            return Ok(State::SeekingPage);
        };
        debug!("Chose candidate #{}: {}", candidate.index, candidate.href);
        // The candidate query only matches site-relative image links.
        debug_assert!(candidate.href.starts_with('/'));

        Ok(State::SeekingImage {
            base: entry.final_url,
            base_index: candidate.index,
            detail_url: format!("{}{}", self.domain, candidate.href),
        })
    }
}
