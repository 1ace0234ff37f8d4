//! Sentinel marker processing for template file contents.
//!
//! Templates guard feature-specific code with markers written in one of three
//! host syntaxes:
//!
//! ```text
//! // BOLT_REACT_START            {/* BOLT_REACT_START */}       <!-- BOLT_REACT_START -->
//! ...                            ...                            ...
//! // BOLT_REACT_END              {/* BOLT_REACT_END */}         <!-- BOLT_REACT_END -->
//! import x; // BOLT_VUE_ONLY     <A/>{/* BOLT_VUE_ONLY */}      <p/><!-- BOLT_VUE_ONLY -->
//! name: "x", // BOLT_ID_REPLACE
//! ```
//!
//! All syntaxes share one grammar, parameterized by their delimiters. Text is
//! tokenized into lines of text and marker segments, START/END markers are
//! paired with a stack, and the passes below rewrite the token stream:
//!
//! 1. regions and ONLY lines of excluded keywords are deleted,
//! 2. REPLACE lines get their last quoted literal rewritten,
//! 3. every remaining marker is stripped.

use crate::args::ResolvedArgs;
use crate::constants::{HTML_DEBUG_NOTICE, MARKER_PREFIX};
use crate::error::Result;
use log::debug;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
    Only,
    Replace,
}

impl MarkerKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "START" => Some(Self::Start),
            "END" => Some(Self::End),
            "ONLY" => Some(Self::Only),
            "REPLACE" => Some(Self::Replace),
            _ => None,
        }
    }
}

/// Delimiters of one marker syntax. A syntax without a closing delimiter is a
/// line comment: the marker runs to the end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSyntax {
    pub open: &'static str,
    pub close: Option<&'static str>,
}

pub const LINE_COMMENT: MarkerSyntax = MarkerSyntax { open: "//", close: None };
pub const BLOCK_MARKUP: MarkerSyntax = MarkerSyntax { open: "{/*", close: Some("*/}") };
pub const HTML_COMMENT: MarkerSyntax = MarkerSyntax { open: "<!--", close: Some("-->") };

/// Syntaxes recognized by [`MarkerTransformer::new`].
pub const SYNTAXES: [MarkerSyntax; 3] = [LINE_COMMENT, BLOCK_MARKUP, HTML_COMMENT];

impl MarkerSyntax {
    fn pattern(&self) -> String {
        let tail = match self.close {
            Some(close) => format!(r"[ \t]*{}", regex::escape(close)),
            None => ".*".to_string(),
        };
        format!(
            r"{}[ \t]*{}(?P<keyword>[A-Za-z0-9_-]+)_(?P<kind>START|END|ONLY|REPLACE)\b{}",
            regex::escape(self.open),
            regex::escape(MARKER_PREFIX),
            tail
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Marker {
    id: usize,
    kind: MarkerKind,
    /// Uppercased keyword or argument name.
    keyword: String,
    raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Marker(Marker),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    segments: Vec<Segment>,
    eol: &'static str,
}

impl Line {
    fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.segments.iter().filter_map(|seg| match seg {
            Segment::Marker(marker) => Some(marker),
            Segment::Text(_) => None,
        })
    }

    fn has_markers(&self) -> bool {
        self.markers().next().is_some()
    }
}

fn is_blank(segments: &[Segment]) -> bool {
    segments.iter().all(|seg| matches!(seg, Segment::Text(text) if text.trim().is_empty()))
}

fn trim_trailing(segments: &mut [Segment]) {
    if let Some(Segment::Text(text)) = segments.last_mut() {
        let trimmed = text.trim_end().len();
        text.truncate(trimmed);
    }
}

/// Rewrites the quoted literal nearest the end of `text` to hold `value`,
/// keeping its quote character.
fn replace_last_literal(text: &str, value: &str) -> Option<String> {
    let close = text.rfind(['"', '\''])?;
    let quote = &text[close..close + 1];
    let open = text[..close].rfind(quote)?;
    Some(format!("{}{quote}{value}{quote}{}", &text[..open], &text[close + 1..]))
}

/// A tokenized file.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    /// START marker id to the id of the END marker closing it.
    regions: HashMap<usize, usize>,
}

impl Document {
    fn new(lines: Vec<Line>) -> Self {
        let mut stack: Vec<(String, usize)> = Vec::new();
        let mut regions = HashMap::new();
        for marker in lines.iter().flat_map(|line| line.markers()) {
            match marker.kind {
                MarkerKind::Start => stack.push((marker.keyword.clone(), marker.id)),
                MarkerKind::End => {
                    // Unclosed regions opened inside this one stay stray.
                    if let Some(pos) = stack.iter().rposition(|(kw, _)| *kw == marker.keyword) {
                        regions.insert(stack[pos].1, marker.id);
                        stack.truncate(pos);
                    }
                }
                MarkerKind::Only | MarkerKind::Replace => {}
            }
        }
        Self { lines, regions }
    }

    /// Whether any sentinel marker is left in the document.
    pub fn has_markers(&self) -> bool {
        self.lines.iter().any(Line::has_markers)
    }

    #[cfg(test)]
    fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Deletes every region and ONLY line tagged with an excluded keyword.
    ///
    /// Text before a region's START and after its END survives, joined on one
    /// line with a single whitespace seam; the line is dropped when nothing
    /// but whitespace is left. Markers of other keywords and stray START/END
    /// markers are kept as they are.
    pub fn strip_excluded<S: AsRef<str>>(&mut self, keyword_excludes: &[S]) {
        let excluded = |keyword: &str| {
            keyword_excludes.iter().any(|k| k.as_ref().eq_ignore_ascii_case(keyword))
        };

        let mut out = Vec::with_capacity(self.lines.len());
        let mut current: Vec<Segment> = Vec::new();
        let mut skip_until: Option<usize> = None;
        let mut touched = false;
        let mut drop_line = false;
        let mut seam = false;

        for line in std::mem::take(&mut self.lines) {
            for mut seg in line.segments {
                if let Some(end) = skip_until {
                    if matches!(&seg, Segment::Marker(m) if m.id == end) {
                        skip_until = None;
                        seam = true;
                    }
                    continue;
                }
                // Whitespace on both sides of a removed inline region collapses
                // to the whitespace before it.
                if std::mem::take(&mut seam) {
                    if let (Some(Segment::Text(before)), Segment::Text(after)) =
                        (current.last(), &mut seg)
                    {
                        if before.ends_with(char::is_whitespace) {
                            *after = after.trim_start().to_string();
                        }
                    }
                }
                if let Segment::Marker(marker) = &seg {
                    if excluded(&marker.keyword) {
                        match marker.kind {
                            MarkerKind::Start => {
                                if let Some(&end) = self.regions.get(&marker.id) {
                                    skip_until = Some(end);
                                    touched = true;
                                    continue;
                                }
                            }
                            MarkerKind::Only => drop_line = true,
                            MarkerKind::End | MarkerKind::Replace => {}
                        }
                    }
                }
                current.push(seg);
            }

            if skip_until.is_some() {
                continue;
            }

            let mut segments = std::mem::take(&mut current);
            let blank = is_blank(&segments);
            if !(drop_line || (touched && blank)) {
                if touched {
                    trim_trailing(&mut segments);
                }
                out.push(Line { segments, eol: line.eol });
            }
            touched = false;
            drop_line = false;
            seam = false;
        }

        self.lines = out;
    }

    /// Rewrites the last quoted literal of each REPLACE line whose tag names
    /// a resolved argument.
    pub fn inject_values(&mut self, args: &ResolvedArgs) {
        let values: HashMap<String, String> =
            args.iter().map(|(name, value)| (name.to_uppercase(), value.to_string())).collect();

        for line in &mut self.lines {
            let Some(value) = line
                .markers()
                .filter(|m| m.kind == MarkerKind::Replace)
                .find_map(|m| values.get(&m.keyword))
            else {
                continue;
            };

            let mut replaced = false;
            for seg in line.segments.iter_mut().rev() {
                if let Segment::Text(text) = seg {
                    if let Some(new_text) = replace_last_literal(text, value) {
                        *text = new_text;
                        replaced = true;
                        break;
                    }
                }
            }
            if !replaced {
                debug!("No quoted literal to replace on line {:?}", line.segments);
            }
        }
    }

    /// Removes every remaining marker, keeping the code they guarded.
    ///
    /// A line holding nothing but markers and whitespace is removed with its
    /// line terminator.
    pub fn strip_markers(&mut self) {
        self.lines = std::mem::take(&mut self.lines)
            .into_iter()
            .filter_map(|line| {
                if !line.has_markers() {
                    return Some(line);
                }
                let mut segments: Vec<Segment> = line
                    .segments
                    .into_iter()
                    .filter(|seg| matches!(seg, Segment::Text(_)))
                    .collect();
                if is_blank(&segments) {
                    return None;
                }
                trim_trailing(&mut segments);
                Some(Line { segments, eol: line.eol })
            })
            .collect();
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for seg in &line.segments {
                match seg {
                    Segment::Text(text) => out.push_str(text),
                    Segment::Marker(marker) => out.push_str(&marker.raw),
                }
            }
            out.push_str(line.eol);
        }
        out
    }
}

/// Applies feature exclusion, value injection and marker cleanup to file text.
#[derive(Debug)]
pub struct MarkerTransformer {
    patterns: Vec<Regex>,
    disabled_script: Regex,
}

impl MarkerTransformer {
    /// Creates a transformer recognizing all built-in syntaxes.
    pub fn new() -> Result<Self> {
        Self::with_syntaxes(&SYNTAXES)
    }

    pub fn with_syntaxes(syntaxes: &[MarkerSyntax]) -> Result<Self> {
        let patterns = syntaxes
            .iter()
            .map(|syntax| Regex::new(&syntax.pattern()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let disabled_script =
            Regex::new(r"(?s)<!--[ \t]*(?P<script><script\b.*?</script>)[ \t]*-->")?;
        Ok(Self { patterns, disabled_script })
    }

    fn parse_line(&self, body: &str, eol: &'static str, next_id: &mut usize) -> Line {
        let mut found: Vec<(usize, usize, MarkerKind, String)> = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(body) {
                let (Some(whole), Some(keyword), Some(kind)) =
                    (caps.get(0), caps.name("keyword"), caps.name("kind"))
                else {
                    continue;
                };
                if let Some(kind) = MarkerKind::from_tag(kind.as_str()) {
                    found.push((whole.start(), whole.end(), kind, keyword.as_str().to_uppercase()));
                }
            }
        }
        found.sort_by_key(|(start, ..)| *start);

        let mut segments = Vec::new();
        let mut pos = 0;
        for (start, end, kind, keyword) in found {
            // Another syntax already claimed this span.
            if start < pos {
                continue;
            }
            if start > pos {
                segments.push(Segment::Text(body[pos..start].to_string()));
            }
            segments.push(Segment::Marker(Marker {
                id: *next_id,
                kind,
                keyword,
                raw: body[start..end].to_string(),
            }));
            *next_id += 1;
            pos = end;
        }
        if pos < body.len() || segments.is_empty() {
            segments.push(Segment::Text(body[pos..].to_string()));
        }
        Line { segments, eol }
    }

    /// Tokenizes text into lines of text and marker segments.
    pub fn parse(&self, text: &str) -> Document {
        let mut next_id = 0;
        let lines = text
            .split_inclusive('\n')
            .map(|raw| {
                let (body, eol) = if let Some(body) = raw.strip_suffix("\r\n") {
                    (body, "\r\n")
                } else if let Some(body) = raw.strip_suffix('\n') {
                    (body, "\n")
                } else {
                    (raw, "")
                };
                self.parse_line(body, eol, &mut next_id)
            })
            .collect();
        Document::new(lines)
    }

    /// Runs exclusion, injection and cleanup in order. Text without markers
    /// comes back unchanged, so running this over already clean text is a no-op.
    pub fn clean<S: AsRef<str>>(
        &self,
        text: &str,
        keyword_excludes: &[S],
        args: &ResolvedArgs,
    ) -> String {
        let mut document = self.parse(text);
        if !document.has_markers() {
            return text.to_string();
        }
        document.strip_excluded(keyword_excludes);
        document.inject_values(args);
        document.strip_markers();
        document.render()
    }

    /// Removes the debug notice and re-enables commented out script elements
    /// of HTML templates.
    pub fn finalize_html(&self, text: &str) -> String {
        let text = text.replace(HTML_DEBUG_NOTICE, "");
        self.disabled_script.replace_all(&text, "$script").into_owned()
    }

    /// Transforms the contents of a file with the given extension.
    pub fn transform<S: AsRef<str>>(
        &self,
        text: &str,
        extension: &str,
        keyword_excludes: &[S],
        args: &ResolvedArgs,
    ) -> String {
        let text = self.clean(text, keyword_excludes, args);
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case("html") || extension.eq_ignore_ascii_case("htm") {
            self.finalize_html(&text)
        } else {
            text
        }
    }
}
