// changelog markup formats

pub mod rst;
pub mod types;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use rst::RstTools;
pub use types::{Section, SectionMap};

/// knowledge about one markup format: parsing, formatting and the blank entry
pub trait FormatTools: Send + Sync {
    /// short name used in configuration
    fn name(&self) -> &'static str;

    /// extension of fragment files written in this format
    fn file_extension(&self) -> &'static str;

    /// unexpanded template for a new fragment
    ///
    /// the template is rendered with a `categories` sequence bound.
    fn new_template(&self) -> &'static str;

    /// parse document text into sections. never fails.
    fn parse_text(&self, text: &str) -> SectionMap;

    /// render sections back into document text
    fn format_sections(&self, sections: &SectionMap) -> String;

    /// render a top-level entry title
    fn format_header(&self, title: &str) -> String;
}

/// supported markup formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    #[default]
    Rst,
}

impl Format {
    pub fn tools(&self) -> Box<dyn FormatTools> {
        match self {
            Format::Rst => Box::new(RstTools::new()),
        }
    }

    /// guess the format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "rst" => Some(Format::Rst),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Rst => write!(f, "rst"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rst" | "restructuredtext" => Ok(Format::Rst),
            _ => Err(Error::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("rst".parse::<Format>().unwrap(), Format::Rst);
        assert_eq!("ReStructuredText".parse::<Format>().unwrap(), Format::Rst);
        assert!(matches!(
            "md".parse::<Format>(),
            Err(Error::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&Format::Rst).unwrap();
        assert_eq!(json, "\"rst\"");
        let parsed: Format = serde_json::from_str("\"RestructuredText\"").unwrap();
        assert_eq!(parsed, Format::Rst);
        assert!(serde_json::from_str::<Format>("\"md\"").is_err());
    }

    #[test]
    fn test_format_tools() {
        let tools = Format::Rst.tools();
        assert_eq!(tools.name(), "rst");
        assert_eq!(tools.file_extension(), "rst");
        assert_eq!(Format::from_extension("RST"), Some(Format::Rst));
        assert_eq!(Format::from_extension("md"), None);
    }
}
