//! Shell-style glob matching over literal path strings
//!
//! Patterns follow fnmatch rules: `*` matches any run of characters,
//! separators included, `?` matches a single character and `[...]` / `[!...]`
//! match a character class. Matching covers the whole candidate string and
//! knows nothing about path structure, so `/a/*` matches `/a/b/c` but not
//! `/ab`. There is no escape character and no brace alternation.
//!
//! Each pattern is translated once into an anchored [`regex::Regex`].

use regex::Regex;
use std::fmt;

use crate::error::Result;
use crate::error::input::invalid_pattern;

/// A compiled exclusion pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a glob pattern
    pub fn new(source: &str) -> Result<Self> {
        let translated = translate(source);
        let regex =
            Regex::new(&translated).map_err(|e| invalid_pattern(source, e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern text as written by the user
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An ordered list of compiled exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<Pattern>,
}

impl ExclusionRules {
    /// Compile every pattern, failing on the first one that cannot be compiled
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

/// Translate a glob into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"(?s)\A");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push_str(r"\z");
    out
}

/// Index of the `]` closing a class whose body starts at `start`
///
/// A leading `!` and a `]` right after the opening bracket (or after the `!`)
/// belong to the class body.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut items = String::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            let (lo, hi) = (body[k], body[k + 2]);
            // Reversed ranges match nothing
            if lo <= hi {
                items.push_str(&format!(r"\x{{{:X}}}-\x{{{:X}}}", lo as u32, hi as u32));
            }
            k += 3;
        } else {
            items.push_str(&format!(r"\x{{{:X}}}", body[k] as u32));
            k += 1;
        }
    }

    match (items.is_empty(), negated) {
        (true, true) => ".".to_string(),
        (true, false) => r"[^\x{0}-\x{10FFFF}]".to_string(),
        (false, true) => format!("[^{items}]"),
        (false, false) => format!("[{items}]"),
    }
}
