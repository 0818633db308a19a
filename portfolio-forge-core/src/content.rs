//! Portfolio content schema and model-response parsing.
//!
//! The generative model is asked to reshape raw user data into this schema.
//! Its reply is free text expected to carry one fenced ```json block; block
//! extraction is a narrow, total parsing step (no block yields an empty
//! object), while [`PortfolioContent::from_value`] is the strict gate that
//! rejects content missing any top-level section before the pipeline touches
//! a remote host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Top-level section keys, in serialization order.
pub const SECTIONS: [&str; 5] = ["home", "aboutMe", "skills", "work", "contact"];

/// Schema description embedded in the formatting prompt. Kept next to the
/// types so the two cannot drift apart.
pub const INTERFACE_DEFINITION: &str = r#"{
    home: {
      name: string
      description: string
      location: string
      availability: string
      image: {
        src: string
        alt: string
      }
      socialLinks: {
        github: string
        twitter: string
        dribbble: string
      }
    }
    aboutMe: {
      image: {
        src: string
        alt: string
      }
      aboutMe: string
      socialLinks: {
        twitter: string
        github: string
      }
      quickFacts: {
        column1: string[]
        column2: string[]
      }
      outro: string
    }
    skills: {
      skills: Array<{
        name: string
        icon: string
      }>
    }
    work: {
      projects: Array<{
        title: string
        description: string
        image: string
        technologies: string[]
      }>
    }
    contact: {
      email: string
      phone: string
      header: string
      socialLinks: {
        [key: string]: string
      }
    }
  }"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeSection {
    pub name: String,
    pub description: String,
    pub location: String,
    pub availability: String,
    pub image: Image,
    pub social_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickFacts {
    pub column1: Vec<String>,
    pub column2: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutMeSection {
    pub image: Image,
    pub about_me: String,
    pub social_links: BTreeMap<String, String>,
    pub quick_facts: QuickFacts,
    pub outro: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkSection {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSection {
    pub email: String,
    pub phone: String,
    pub header: String,
    pub social_links: BTreeMap<String, String>,
}

/// Schema-shaped content for one portfolio: five sections, one per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioContent {
    pub home: HomeSection,
    pub about_me: AboutMeSection,
    pub skills: SkillsSection,
    pub work: WorkSection,
    pub contact: ContactSection,
}

impl PortfolioContent {
    /// Parse a JSON value into the schema, requiring every top-level section.
    ///
    /// Leaf fields are lenient (missing ones default to empty), but a value
    /// that is not an object or lacks a section key is rejected so malformed
    /// content never reaches the publish step.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ContentError> {
        let map = value.as_object().ok_or(ContentError::NotAnObject)?;
        for section in SECTIONS {
            if !map.contains_key(section) {
                return Err(ContentError::MissingSection(section.to_string()));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Extract the single ```json fenced block expected in a model response.
///
/// The grammar is deliberately narrow: scan for the first fence whose tag is
/// `json` and return its body. Fences with other tags are skipped; a missing
/// or unterminated block yields `None` and the caller falls back to an empty
/// object rather than failing the call.
pub fn extract_json_block(text: &str) -> Option<String> {
    let fence = "```";
    let mut search = text;
    loop {
        let start = search.find(fence)?;
        let after = &search[start + fence.len()..];
        let line_end = after.find('\n')?;
        let tag = after[..line_end].trim();
        let rest = &after[line_end + 1..];
        if !tag.eq_ignore_ascii_case("json") {
            search = after;
            continue;
        }
        let end = rest.find(fence)?;
        return Some(rest[..end].trim().to_string());
    }
}

/// Turn a raw model response into validated content.
///
/// No fenced block is not a hard failure here; the empty fallback object
/// then fails section validation, which is the actual gate.
pub fn parse_model_response(text: &str) -> Result<PortfolioContent, ContentError> {
    let value = match extract_json_block(text) {
        Some(block) if !block.is_empty() => serde_json::from_str(&block)?,
        _ => serde_json::Value::Object(Default::default()),
    };
    PortfolioContent::from_value(value)
}
