use thiserror::Error;

/// Transport-level failure retrieving one feed. Never raised for bad content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Http(e) if e.is_timeout())
    }
}

/// Failure of one parsing strategy on one payload.
///
/// Contained inside the parser chain: the next strategy is tried and the
/// run carries on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document ended inside <{open}>")]
    UnexpectedEof { open: String },

    #[error("no <item> or <entry> elements with a title")]
    NoEntries,

    #[error("no <item> or <entry> blocks found")]
    NoBlocks,
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("no feeds selected for analysis")]
    NoFeedsSelected,

    #[error("failed to build feed client: {0}")]
    Client(#[from] FetchError),
}
