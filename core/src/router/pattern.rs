//! Path patterns: static segments, `:name` params and `:name(.*)` catch-alls.

use std::collections::BTreeMap;

use tracing::warn;

/// Params extracted from a matched path, keyed by name.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    /// Swallows the rest of the path, possibly nothing.
    CatchAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Self {
        let segments = split(raw)
            .map(|seg| match seg.strip_prefix(':') {
                Some(rest) => match rest.strip_suffix("(.*)") {
                    Some(name) => Segment::CatchAll(name.to_string()),
                    None => Segment::Param(rest.to_string()),
                },
                None => Segment::Static(seg.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a bare path (no query or fragment). Trailing and repeated
    /// slashes are ignored, static segments compare ASCII case-insensitively
    /// and captured values are percent-decoded.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split(path).collect();
        let mut params = Params::new();
        let mut idx = 0;

        for segment in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    match parts.get(idx) {
                        Some(part) if part.eq_ignore_ascii_case(expected) => {}
                        _ => return None,
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(idx)?;
                    params.insert(name.clone(), decode(value));
                    idx += 1;
                }
                Segment::CatchAll(name) => {
                    params.insert(name.clone(), decode(&parts[idx..].join("/")));
                    idx = parts.len();
                }
            }
        }

        (idx == parts.len()).then_some(params)
    }

    /// Fill the pattern back in. Returns the name of the first missing
    /// param on failure; catch-alls default to empty.
    pub fn build(&self, params: &Params) -> Result<String, String> {
        let mut out = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => out.push(s.clone()),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => out.push(urlencoding::encode(value).into_owned()),
                    _ => return Err(name.clone()),
                },
                Segment::CatchAll(name) => {
                    if let Some(rest) = params.get(name).filter(|rest| !rest.is_empty()) {
                        out.push(rest.trim_matches('/').to_string());
                    }
                }
            }
        }
        Ok(format!("/{}", out.join("/")))
    }
}

/// Malformed escapes are kept as written.
fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            warn!(raw, %err, "param is not valid percent-encoded utf-8");
            raw.to_string()
        }
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|seg| !seg.is_empty())
}
