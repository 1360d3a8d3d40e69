//! Browser-style navigation history under an optional base path.
//!
//! Entries are stored without the base; [`History::href`] adds it back for
//! display and [`History::strip_base`] removes it from incoming URLs.

#[derive(Debug, Clone)]
pub struct History {
    base: String,
    entries: Vec<String>,
    index: usize,
}

impl History {
    /// `base` of `""` or `"/"` means the app is served from the root.
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        let base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self {
            base,
            entries: vec!["/".to_string()],
            index: 0,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry after the current one, dropping any forward entries.
    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.into());
        self.index += 1;
    }

    pub fn replace(&mut self, location: impl Into<String>) {
        self.entries[self.index] = location.into();
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn strip_base<'a>(&self, url: &'a str) -> &'a str {
        if self.base.is_empty() {
            return url;
        }
        match url.strip_prefix(self.base.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with(['/', '?', '#']) => rest,
            _ => url,
        }
    }

    pub fn href(&self, location: &str) -> String {
        format!("{}{location}", self.base)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}
