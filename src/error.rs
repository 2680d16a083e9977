use thiserror::Error;

/// Errors that can occur while discovering and downloading an image
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport failure or non-2xx response while fetching a URL
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A required structural query did not match exactly once, meaning the
    /// site's markup changed incompatibly
    #[error("Expected 1 result for selector `{selector}`, found {found}")]
    StructureMismatch { selector: String, found: usize },

    /// An element matched but lacks the attribute the scraper needs
    #[error("Element matched by `{selector}` has no `{attribute}` attribute")]
    MissingAttribute { selector: String, attribute: String },

    /// Failed to write the downloaded image to disk
    #[error("Failed to write image file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize metadata for output
    #[error("Failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
}
