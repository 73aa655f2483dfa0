//! Cursor handling for the GitHub `Link` response header.
//!
//! The header carries a comma separated list of entries such as
//! `<https://api.github.com/orgs/acme/repos?page=2>; rel="next"`. Parsing is
//! best-effort: anything that does not look like a well-formed entry is
//! skipped, and a missing `next` relation simply means the walk is over.

use reqwest::header::{HeaderMap, LINK};
use tracing::debug;
use url::Url;

const LINKS_DELIMITER: char = ',';
const LINK_PARAM_DELIMITER: char = ';';
const REL_PARAM: &str = "rel";

/// Related pages advertised by one response
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    /// Parse the value of a `Link` header.
    pub fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();

        for entry in header.split(LINKS_DELIMITER) {
            let mut segments = entry.split(LINK_PARAM_DELIMITER);

            let target = match segments.next().map(str::trim) {
                Some(target) => target,
                None => continue,
            };
            let target = match target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                Some(target) => target,
                None => continue,
            };

            for param in segments {
                let mut parts = param.trim().splitn(2, '=');
                let (name, value) = match (parts.next(), parts.next()) {
                    (Some(name), Some(value)) => (name.trim(), value.trim()),
                    _ => continue,
                };
                if name != REL_PARAM {
                    continue;
                }

                let relation = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);

                let slot = match relation {
                    "first" => &mut links.first,
                    "last" => &mut links.last,
                    "prev" => &mut links.prev,
                    "next" => &mut links.next,
                    _ => continue,
                };
                *slot = Some(target.to_string());
            }
        }

        links
    }

    /// Read the `Link` header from a response, if any.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// The `next` relation as an absolute URL. Unparsable targets end the walk.
    pub fn next_url(&self) -> Option<Url> {
        let next = self.next.as_deref()?;
        match Url::parse(next) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(next, "Ignoring unparsable next page link: {}", e);
                None
            }
        }
    }
}

/// One decoded page of a paginated resource
#[derive(Debug)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub next: Option<Url>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next: None,
        }
    }
}
