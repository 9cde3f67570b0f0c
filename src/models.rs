//! Typed model of the vendor's daily review document.
//!
//! The vendor serves one loosely-typed JSON object per trading day whose
//! members are report sections keyed by short codes (`"tcrd"`, `"sqry"`,
//! `"jryw"`, ...). Everything dynamic about that document is resolved here,
//! once, at the deserialization boundary:
//!
//! - each section's kind becomes a [`SectionBody`] variant chosen by its
//!   key, so formatters never re-inspect key strings;
//! - vendor defaults are applied to missing fields;
//! - sections that cannot render (empty `tab_title`, non-object values)
//!   are dropped during parsing.
//!
//! Section order follows the source document: [`DailyReport`] deserializes
//! through a map visitor that collects entries in the order the stream
//! yields them. Nothing in the model is mutated after parse.
//!
//! Field names mirror the vendor's JSON (`concept_zdf`, `top2_stocks`, ...)
//! so the serde mapping stays one-to-one.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::BriefingError;

/// Section key carrying the thematic-hotspot payload.
pub const KEY_CONCEPTS: &str = "tcrd";
/// Section key carrying the community hot-stock digest.
pub const KEY_HOT_STOCKS: &str = "sqry";

/// One day's review document: renderable sections in source order.
#[derive(Debug)]
pub struct DailyReport {
    pub sections: Vec<ReportSection>,
}

/// A single renderable section of the report.
#[derive(Debug)]
pub struct ReportSection {
    /// The short code this section was keyed under in the source object.
    pub key: String,
    /// Heading shown for the section. Never empty; sections without one
    /// are dropped at parse time.
    pub tab_title: String,
    /// Optional secondary heading. Empty strings are normalized to `None`.
    pub title: Option<String>,
    /// Optional lead-in line. Empty strings are normalized to `None`.
    pub sub_title: Option<String>,
    pub body: SectionBody,
}

/// Section payload, dispatched by key once at parse time.
#[derive(Debug)]
pub enum SectionBody {
    /// `"tcrd"`: thematic hotspots with catalyst and leading stocks.
    Concepts(Vec<ConceptHighlight>),
    /// `"sqry"`: community buzz ranked by discussion count.
    HotStocks(Vec<HotStock>),
    /// Any other key whose content is a list of describable items.
    Items(Vec<ListItem>),
    /// Content of a shape this renderer has no formatter for; the section
    /// still contributes its headings and separator.
    Empty,
}

/// A trending concept from the thematic-hotspot section.
#[derive(Debug, Deserialize)]
pub struct ConceptHighlight {
    #[serde(default = "default_concept_name")]
    pub concept_name: String,
    /// Day's percentage change for the concept index, as the vendor
    /// formats it (e.g. `"5.00"`).
    #[serde(default = "default_concept_zdf")]
    pub concept_zdf: String,
    #[serde(default)]
    pub hot_spot: HotSpot,
    #[serde(default)]
    pub top2_stocks: Vec<ConceptStock>,
}

/// Why a concept is trending. Only the first reason is rendered.
#[derive(Debug, Default, Deserialize)]
pub struct HotSpot {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub hot_reason: Vec<String>,
}

/// A leading stock inside a concept entry.
#[derive(Debug, Deserialize)]
pub struct ConceptStock {
    pub stock_name: String,
    pub stock_zdf: String,
}

/// One entry of the community hot-stock digest.
#[derive(Debug, Deserialize)]
pub struct HotStock {
    #[serde(default)]
    pub name: String,
    /// Percentage change as a string; may not parse as a number.
    #[serde(default)]
    pub zdf: String,
    /// Discussion count.
    #[serde(default = "default_cnt")]
    pub cnt: String,
}

/// A generic list entry: free-form description plus an item type used
/// only to filter out inline images.
#[derive(Debug, Deserialize)]
pub struct ListItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// HTML-bearing description; non-string values collapse to `""`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub desc: String,
}

fn default_concept_name() -> String {
    "未知概念".to_string()
}

fn default_concept_zdf() -> String {
    "0.00".to_string()
}

fn default_cnt() -> String {
    "0".to_string()
}

/// Accept any JSON value where a string is expected; non-strings read
/// as `""` so one odd item cannot abort the run.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

/// Element-wise [`lenient_string`] over a JSON array.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect())
}

/// Raw section shape before key dispatch.
#[derive(Deserialize)]
struct RawSection {
    #[serde(default)]
    tab_title: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sub_title: Option<String>,
    #[serde(default)]
    content: Value,
}

/// Digest wrapper the vendor uses for the `"sqry"` payload.
#[derive(Deserialize)]
struct StockDigest {
    #[serde(default)]
    hot_stock: Vec<HotStock>,
}

impl ReportSection {
    /// Turn one `(key, value)` entry of the source object into a section.
    ///
    /// Returns `Ok(None)` for entries that are skipped by design: values
    /// that are not objects, and sections without a `tab_title`.
    fn from_entry(key: &str, value: Value) -> Result<Option<Self>, String> {
        if !value.is_object() {
            return Ok(None);
        }
        let raw: RawSection =
            serde_json::from_value(value).map_err(|e| format!("section {key:?}: {e}"))?;
        if raw.tab_title.is_empty() {
            return Ok(None);
        }
        let body = SectionBody::from_content(key, raw.content)?;
        Ok(Some(ReportSection {
            key: key.to_string(),
            tab_title: raw.tab_title,
            title: raw.title.filter(|t| !t.is_empty()),
            sub_title: raw.sub_title.filter(|s| !s.is_empty()),
            body,
        }))
    }
}

impl SectionBody {
    /// Resolve a section's payload once, by key. Content of the wrong
    /// container shape degrades to [`SectionBody::Empty`]; content of the
    /// right shape but with malformed entries is an error.
    fn from_content(key: &str, content: Value) -> Result<Self, String> {
        let decode_err = |e: serde_json::Error| format!("section {key:?} content: {e}");
        match key {
            KEY_CONCEPTS => {
                if !content.is_array() {
                    return Ok(SectionBody::Empty);
                }
                let concepts: Vec<ConceptHighlight> =
                    serde_json::from_value(content).map_err(decode_err)?;
                Ok(SectionBody::Concepts(concepts))
            }
            KEY_HOT_STOCKS => {
                if !content.is_object() {
                    return Ok(SectionBody::Empty);
                }
                let digest: StockDigest = serde_json::from_value(content).map_err(decode_err)?;
                Ok(SectionBody::HotStocks(digest.hot_stock))
            }
            _ => {
                if !content.is_array() {
                    return Ok(SectionBody::Empty);
                }
                let items: Vec<ListItem> = serde_json::from_value(content).map_err(decode_err)?;
                Ok(SectionBody::Items(items))
            }
        }
    }
}

impl<'de> Deserialize<'de> for DailyReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = DailyReport;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of report sections")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sections = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    let value: Value = map.next_value()?;
                    if let Some(section) =
                        ReportSection::from_entry(&key, value).map_err(de::Error::custom)?
                    {
                        sections.push(section);
                    }
                }
                Ok(DailyReport { sections })
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

/// Parse a response body into a [`DailyReport`].
///
/// The live endpoint wraps the report in a `data` member; raw captures of
/// the document omit it. `data` wins when present, otherwise the whole
/// body is treated as the report.
pub fn parse_report(body: &str) -> Result<DailyReport, BriefingError> {
    #[derive(Deserialize)]
    struct Envelope {
        data: Option<DailyReport>,
    }

    match serde_json::from_str::<Envelope>(body).map_err(to_parse_error)? {
        Envelope { data: Some(report) } => Ok(report),
        Envelope { data: None } => serde_json::from_str(body).map_err(to_parse_error),
    }
}

/// Split serde failures into the two halves of the error taxonomy:
/// syntactically broken JSON versus well-formed JSON of the wrong shape.
fn to_parse_error(e: serde_json::Error) -> BriefingError {
    use serde_json::error::Category;
    match e.classify() {
        Category::Data => BriefingError::Shape(e.to_string()),
        _ => BriefingError::Json(e),
    }
}
