use crate::error::{BasketError, Result};
use crate::filename::{extension_of, sanitize_filename};
use crate::model::BasketEntry;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Template used when the caller does not supply one.
pub const DEFAULT_TEMPLATE: &str = "V-{group}_{label}_{seq:003}";

/// Widest zero padding accepted for `{seq:N}`; wider requests stay verbatim.
const MAX_SEQUENCE_WIDTH: usize = 32;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_]+)(?::(\d+))?\}").expect("token pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Sequence { width: usize },
    Label,
    Group,
    Extension,
}

/// A parsed file name template.
///
/// Recognised tokens are `{n}` / `{seq}` (optionally `{seq:003}`), `{label}`,
/// `{group}` and `{ext}`. Anything else in braces is copied through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

/// Knobs that change how a rendered name is finished off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append the source extension when the template has no `{ext}` token
    pub append_extension: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            append_extension: true,
        }
    }
}

/// One entry paired with the name the template produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedName<'a> {
    pub entry: &'a BasketEntry,
    /// 1-based position in the basket
    pub position: usize,
    pub name: String,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Err(BasketError::validation("template is empty"));
        }

        let mut segments = Vec::new();
        let mut last = 0;
        for caps in TOKEN_RE.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            let width = caps.get(2).map(|w| w.as_str());
            segments.push(
                token_segment(&caps[1], width)
                    .unwrap_or_else(|| Segment::Literal(whole.as_str().to_string())),
            );
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_extension_token(&self) -> bool {
        self.segments.contains(&Segment::Extension)
    }

    /// Render the name for `entry` at 1-based `position`.
    pub fn render_entry(
        &self,
        position: usize,
        entry: &BasketEntry,
        options: RenderOptions,
    ) -> String {
        let source_name = entry.file_name();
        let ext = extension_of(&source_name);

        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Sequence { width } => {
                    rendered.push_str(&format!("{:0width$}", position, width = *width));
                },
                Segment::Label => rendered.push_str(&entry.label),
                Segment::Group => rendered.push_str(&entry.group_index.to_string()),
                Segment::Extension => rendered.push_str(ext),
            }
        }

        if options.append_extension
            && !self.has_extension_token()
            && !ext.is_empty()
            && !rendered.ends_with(ext)
        {
            rendered.push_str(ext);
        }

        sanitize_filename(&rendered)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn token_segment(name: &str, width: Option<&str>) -> Option<Segment> {
    match (name, width) {
        ("n" | "seq", None) => Some(Segment::Sequence { width: 0 }),
        ("n" | "seq", Some(width)) => {
            let width: usize = width.parse().ok()?;
            (width <= MAX_SEQUENCE_WIDTH).then_some(Segment::Sequence { width })
        },
        ("label", None) => Some(Segment::Label),
        ("group", None) => Some(Segment::Group),
        ("ext", None) => Some(Segment::Extension),
        _ => None,
    }
}

/// Render every entry in basket order. Pure: same input, same output.
pub fn render<'a>(
    entries: &'a [BasketEntry],
    template: &Template,
    options: RenderOptions,
) -> Vec<RenderedName<'a>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| RenderedName {
            entry,
            position: index + 1,
            name: template.render_entry(index + 1, entry, options),
        })
        .collect()
}
