// Insight text domain model - styled spans lexed from markdown-flavoured replies
use serde::Serialize;

const BOLD_MARKER: &str = "**";
const HEADING_MARKER: &str = "###";

/// A run of response text tagged with how it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum StyledSpan {
    Bold(String),
    Plain(String),
}

impl StyledSpan {
    pub fn text(&self) -> &str {
        match self {
            StyledSpan::Bold(text) | StyledSpan::Plain(text) => text,
        }
    }
}

/// Split a model reply into bold and plain spans.
///
/// Scans left to right. At each position a `**` opens a bold span only if a
/// closing `**` follows on the same line; the shortest such span wins. A
/// `###` heading marker becomes its own plain span and is kept verbatim.
/// Everything between tokens is emitted as a plain span, including empty
/// text before, after or between adjacent tokens. An unmatched `**` stays
/// as literal text inside the surrounding plain span.
pub fn format_response(raw: &str) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < raw.len() {
        let rest = &raw[pos..];

        let token = if rest.starts_with(BOLD_MARKER) {
            closing_bold(&rest[BOLD_MARKER.len()..]).map(|inner_len| {
                let inner = &rest[BOLD_MARKER.len()..BOLD_MARKER.len() + inner_len];
                (
                    StyledSpan::Bold(inner.to_string()),
                    inner_len + 2 * BOLD_MARKER.len(),
                )
            })
        } else if rest.starts_with(HEADING_MARKER) {
            Some((
                StyledSpan::Plain(HEADING_MARKER.to_string()),
                HEADING_MARKER.len(),
            ))
        } else {
            None
        };

        match token {
            Some((span, consumed)) => {
                spans.push(StyledSpan::Plain(raw[plain_start..pos].to_string()));
                spans.push(span);
                pos += consumed;
                plain_start = pos;
            }
            None => {
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    spans.push(StyledSpan::Plain(raw[plain_start..].to_string()));
    spans
}

/// Length of the bold body when a closing marker exists before the next newline.
fn closing_bold(body: &str) -> Option<usize> {
    let line = body.split('\n').next().unwrap_or_default();
    line.find(BOLD_MARKER)
}

/// Unstyled text of a span sequence.
pub fn plain_text(spans: &[StyledSpan]) -> String {
    spans.iter().map(StyledSpan::text).collect()
}
