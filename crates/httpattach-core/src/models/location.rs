use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{AttachError, AttachResult};

/// Location of the document the import targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    url: Url,
}

impl DocumentLocation {
    pub fn parse(location: &str) -> AttachResult<Self> {
        let url = Url::parse(location.trim())?;
        Ok(Self { url })
    }

    /// True only for `http` and `https` documents.
    pub fn is_network_origin(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// `scheme://host[:port]` of a network document; the base for upload paths.
    pub fn origin(&self) -> AttachResult<String> {
        if !self.is_network_origin() {
            return Err(AttachError::InvalidLocation(format!(
                "'{}' documents have no network origin",
                self.url.scheme()
            )));
        }
        Ok(self.url.origin().ascii_serialization())
    }
}

impl FromStr for DocumentLocation {
    type Err = AttachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Ambient execution context of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    pub location: DocumentLocation,
}

impl ImportContext {
    pub fn new(location: DocumentLocation) -> Self {
        Self { location }
    }

    pub fn from_location(location: &str) -> AttachResult<Self> {
        Ok(Self::new(DocumentLocation::parse(location)?))
    }
}
