//! Front-matter extraction.
//!
//! A document may open with a metadata block fenced by delimiter lines:
//!
//! ```text
//! ---                      +++                     ---json
//! title: Hello World       title = "Hello World"   { "title": "Hello World" }
//! ---                      +++                     ---
//! ```
//!
//! `---` alone means YAML. A language tag right after the opening fence
//! (`---yaml`, `---toml`, `---json`) selects the parser; `+++` fences are
//! TOML. The block must start on the first line (a UTF-8 BOM is skipped). If
//! no closing fence is found the rest of the file is treated as front matter.
//!
//! Every format is parsed into a `serde_json::Value` so title lookup is the
//! same whatever the source syntax.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported front matter language: {0}")]
    Language(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
    Json,
}

/// Parsed front-matter block.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub format: FrontMatterFormat,
    pub data: Value,
}

impl FrontMatter {
    /// Resolve the `title` field.
    ///
    /// Strings are trimmed and must be non-empty; numbers are rendered as
    /// written. Anything else (null, booleans, lists, tables) counts as no
    /// title.
    pub fn title(&self) -> Option<String> {
        match self.data.get("title")? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Extract and parse the leading front-matter block.
///
/// Returns `Ok(None)` when the document does not open with a fence.
pub fn extract(content: &str) -> Result<Option<FrontMatter>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (first, rest) = split_first_line(content);

    let (format, close) = if let Some(tag) = first.strip_prefix("---") {
        // `----` and longer is a thematic break, not a fence
        if tag.starts_with('-') {
            return Ok(None);
        }
        (language_format(tag.trim())?, "---")
    } else if first.trim_end() == "+++" {
        (FrontMatterFormat::Toml, "+++")
    } else {
        return Ok(None);
    };

    let body = block_body(rest, close);
    let data = parse_block(format, body)?;
    Ok(Some(FrontMatter { format, data }))
}

/// Extract only the title. A missing block yields `None`.
pub fn extract_title(content: &str) -> Result<Option<String>, FrontMatterError> {
    Ok(extract(content)?.and_then(|fm| fm.title()))
}

fn language_format(tag: &str) -> Result<FrontMatterFormat, FrontMatterError> {
    match tag.to_ascii_lowercase().as_str() {
        "" | "yaml" | "yml" => Ok(FrontMatterFormat::Yaml),
        "toml" => Ok(FrontMatterFormat::Toml),
        "json" => Ok(FrontMatterFormat::Json),
        other => Err(FrontMatterError::Language(other.to_string())),
    }
}

/// Split off the first line, without its terminator.
fn split_first_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(i) => (s[..i].strip_suffix('\r').unwrap_or(&s[..i]), &s[i + 1..]),
        None => (s.strip_suffix('\r').unwrap_or(s), ""),
    }
}

/// Everything up to the first line that is exactly the closing fence.
fn block_body<'a>(rest: &'a str, close: &str) -> &'a str {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']).trim_end() == close {
            return &rest[..offset];
        }
        offset += line.len();
    }
    rest
}

fn parse_block(format: FrontMatterFormat, body: &str) -> Result<Value, FrontMatterError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    let value = match format {
        FrontMatterFormat::Yaml => serde_yaml::from_str::<Value>(body)?,
        FrontMatterFormat::Toml => toml::from_str::<Value>(body)?,
        FrontMatterFormat::Json => serde_json::from_str::<Value>(body)?,
    };
    Ok(value)
}
