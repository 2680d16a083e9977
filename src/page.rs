use rand::seq::SliceRandom;
use rand::Rng;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::model::Candidate;

// Most fragile part of the whole tool: the CSS selector that finds image
// candidates on an entry page. Breaks whenever wikiHow reworks its markup.
const CANDIDATE_SELECTOR: &str = r#"li.hasimage>div.largeimage>a[data-href^="/Image:"]"#;

/// A parsed page plus the two structural queries the scraper needs. Callers
/// never touch the underlying document directly, so the query mechanism
/// stays swappable.
pub struct Page {
    document: Html,
}

/// Attributes and text pulled out of a single matched element.
#[derive(Debug, Clone)]
pub struct ElementFields {
    pub href: Option<String>,
    pub src: Option<String>,
    pub text: String,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// All image candidates on this page, in document order. An empty result
    /// is an expected outcome, not an error: it tells the caller to fetch a
    /// fresh entry page.
    pub fn find_candidates(&self) -> Vec<Candidate> {
        let selector = Selector::parse(CANDIDATE_SELECTOR).unwrap();
        self.document
            .select(&selector)
            .filter_map(|element| element.value().attr("data-href"))
            .enumerate()
            .map(|(index, href)| Candidate {
                index,
                href: href.to_string(),
            })
            .collect()
    }

    /// Exactly one element must match `selector`; any other count means the
    /// site's markup changed incompatibly and the tool cannot safely proceed.
    pub fn find_single(&self, selector_str: &str) -> Result<ElementFields, ScrapeError> {
        let selector = Selector::parse(selector_str).unwrap();
        let matches: Vec<ElementRef> = self.document.select(&selector).collect();
        if matches.len() != 1 {
            return Err(ScrapeError::StructureMismatch {
                selector: selector_str.to_string(),
                found: matches.len(),
            });
        }

        let element = matches[0];
        Ok(ElementFields {
            href: element.value().attr("href").map(str::to_string),
            src: element.value().attr("src").map(str::to_string),
            text: element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string(),
        })
    }
}

/// Uniform random choice over the candidate list. `None` on an empty list.
pub fn choose<'a, R: Rng>(candidates: &'a [Candidate], rng: &mut R) -> Option<&'a Candidate> {
    candidates.choose(rng)
}
