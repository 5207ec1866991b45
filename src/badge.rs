// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG badge rendering.
//!
//! Badges follow the shields.io two-segment layout: a grey label segment
//! showing `owner/repository` and a colored message segment. Text is drawn at
//! ten times its size and scaled down with `transform="scale(.1)"`, so anchor
//! positions are expressed in that enlarged coordinate space.

use std::{borrow::Cow, fmt::Write as _};

use tracing::error;

use crate::error::Error;

/// Fill color of the label segment.
pub const LABEL_COLOR: &str = "#555";

/// Fill color of the message segment on error badges.
pub const ERROR_COLOR: &str = "#e05d44";

/// Image served when even the error badge cannot be rendered.
pub const FALLBACK_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>Error</text></svg>";

const CHAR_WIDTH: usize = 7;
const SEGMENT_PADDING: usize = 10;
const ERROR_OWNER: &str = "gitpulse";
const ERROR_REPOSITORY: &str = "error";

/// Returns the pixel width of a segment holding `text`.
///
/// The estimate uses a fixed 7 px per character plus 10 px of padding.
///
/// # Examples
///
/// ```
/// use gitpulse::segment_width;
///
/// assert_eq!(segment_width(""), 10);
/// assert_eq!(segment_width("Rust"), 38);
/// ```
pub fn segment_width(text: &str,) -> usize
{
    SEGMENT_PADDING + CHAR_WIDTH * text.chars().count()
}

/// Pixel geometry of a two-segment badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct BadgeLayout
{
    /// Width of the label segment.
    pub label_width:   usize,
    /// Width of the message segment.
    pub message_width: usize,
    /// Width of the whole badge.
    pub total_width:   usize,
    /// Anchor of the label text in the 10x text coordinate space.
    pub label_x:       usize,
    /// Anchor of the message text in the 10x text coordinate space.
    pub message_x:     usize,
}

impl BadgeLayout
{
    /// Computes the geometry for the given label and message texts.
    pub fn compute(label: &str, message: &str,) -> Self
    {
        let label_width = segment_width(label,);
        let message_width = segment_width(message,);

        Self {
            label_width,
            message_width,
            total_width: label_width + message_width,
            label_x: label_width * 5,
            message_x: (label_width + message_width / 2) * 10,
        }
    }
}

/// Dynamic values rendered into a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct BadgeContent<'a,>
{
    /// Account shown in bold at the start of the label.
    pub owner:      &'a str,
    /// Repository shown after the account in the label.
    pub repository: &'a str,
    /// Text of the message segment.
    pub message:    &'a str,
    /// Fill color of the message segment, including the leading `#`.
    pub color:      &'a str,
}

/// Renders a complete SVG document for the provided content.
///
/// # Errors
///
/// Returns [`Error::RenderFailure`] when the template cannot be filled.
///
/// # Example
///
/// ```
/// use gitpulse::{BadgeContent, render_badge};
///
/// # fn main() -> Result<(), gitpulse::Error> {
/// let svg = render_badge(&BadgeContent {
///     owner:      "octocat",
///     repository: "Hello-World",
///     message:    "HTML",
///     color:      "#007acc",
/// },)?;
/// assert!(svg.contains("Hello-World"));
/// # Ok(())
/// # }
/// ```
pub fn render_badge(content: &BadgeContent<'_,>,) -> Result<String, Error,>
{
    let label = format!("{}/{}", content.owner, content.repository);
    let layout = BadgeLayout::compute(&label, content.message,);

    let owner = escape_xml(content.owner,);
    let repository = escape_xml(content.repository,);
    let message = escape_xml(content.message,);
    let title = escape_xml(&label,);
    let color = escape_xml(content.color,);
    let BadgeLayout {
        label_width,
        message_width,
        total_width,
        label_x,
        message_x,
    } = layout;

    let mut buffer = String::with_capacity(1536,);
    writeln!(
        buffer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total_width}\" height=\"20\" role=\"img\" aria-label=\"{title}: {message}\">"
    )?;
    writeln!(buffer, "  <title>{title}: {message}</title>")?;
    buffer.push_str(
        "  <linearGradient id=\"b\" x2=\"0\" y2=\"100%\">\n    <stop offset=\"0\" stop-color=\"#bbb\" stop-opacity=\".1\"/>\n    <stop offset=\"1\" stop-opacity=\".1\"/>\n  </linearGradient>\n",
    );
    writeln!(
        buffer,
        "  <clipPath id=\"a\">\n    <rect width=\"{total_width}\" height=\"20\" rx=\"3\" fill=\"#fff\"/>\n  </clipPath>"
    )?;
    writeln!(
        buffer,
        "  <g clip-path=\"url(#a)\">\n    <path fill=\"{LABEL_COLOR}\" d=\"M0 0h{label_width}v20H0z\"/>\n    <path fill=\"{color}\" d=\"M{label_width} 0h{message_width}v20H{label_width}z\"/>\n    <path fill=\"url(#b)\" d=\"M0 0h{total_width}v20H0z\"/>\n  </g>"
    )?;
    buffer.push_str(
        "  <g fill=\"#fff\" text-anchor=\"middle\" font-family=\"Verdana,Geneva,DejaVu Sans,sans-serif\" font-size=\"110\">\n",
    );
    let label_spans =
        format!("<tspan font-weight=\"bold\">{owner}</tspan><tspan>/{repository}</tspan>");
    writeln!(
        buffer,
        "    <text x=\"{label_x}\" y=\"150\" fill=\"#010101\" fill-opacity=\".3\" transform=\"scale(.1)\">{label_spans}</text>"
    )?;
    writeln!(buffer, "    <text x=\"{label_x}\" y=\"140\" transform=\"scale(.1)\">{label_spans}</text>")?;
    writeln!(
        buffer,
        "    <text x=\"{message_x}\" y=\"150\" fill=\"#010101\" fill-opacity=\".3\" transform=\"scale(.1)\">{message}</text>"
    )?;
    writeln!(buffer, "    <text x=\"{message_x}\" y=\"140\" transform=\"scale(.1)\">{message}</text>")?;
    buffer.push_str("  </g>\n</svg>\n",);

    Ok(buffer,)
}

/// Renders an error badge carrying `message` in the error color.
///
/// Never fails: if rendering breaks, the failure is logged and
/// [`FALLBACK_SVG`] is returned instead.
pub fn render_error_badge(message: &str,) -> String
{
    let content = BadgeContent {
        owner: ERROR_OWNER,
        repository: ERROR_REPOSITORY,
        message,
        color: ERROR_COLOR,
    };

    render_badge(&content,).unwrap_or_else(|failure| {
        error!(error = %failure, "failed to render error badge");
        FALLBACK_SVG.to_owned()
    },)
}

fn escape_xml(value: &str,) -> Cow<'_, str,>
{
    if value.chars().any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''),) {
        let mut escaped = String::with_capacity(value.len() + 16,);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;",),
                '<' => escaped.push_str("&lt;",),
                '>' => escaped.push_str("&gt;",),
                '\"' => escaped.push_str("&quot;",),
                '\'' => escaped.push_str("&apos;",),
                other => escaped.push(other,),
            }
        }
        Cow::Owned(escaped,)
    } else {
        Cow::Borrowed(value,)
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;

    fn sample_content() -> BadgeContent<'static,>
    {
        BadgeContent {
            owner:      "octocat",
            repository: "Hello-World",
            message:    "HTML",
            color:      "#007acc",
        }
    }

    proptest! {
        #[test]
        fn segment_width_grows_with_text(shorter in "[a-zA-Z0-9/ -]{0,30}", extra in "[a-zA-Z0-9]{1,10}") {
            let longer = format!("{shorter}{extra}");
            prop_assert!(segment_width(&shorter) < segment_width(&longer));
        }
    }

    #[test]
    fn segment_width_uses_seven_pixels_per_character()
    {
        assert_eq!(segment_width(""), 10);
        assert_eq!(segment_width("octocat/Hello-World"), 10 + 7 * 19);
    }

    #[test]
    fn segment_width_counts_characters_not_bytes()
    {
        assert_eq!(segment_width("日本"), segment_width("ab"));
    }

    #[test]
    fn layout_places_anchors_in_scaled_space()
    {
        let layout = BadgeLayout::compute("octocat/Hello-World", "HTML",);
        assert_eq!(layout.label_width, 143);
        assert_eq!(layout.message_width, 38);
        assert_eq!(layout.total_width, 181);
        assert_eq!(layout.label_x, 715);
        assert_eq!(layout.message_x, (143 + 19) * 10);
    }

    #[test]
    fn render_badge_includes_dynamic_content()
    {
        let svg = render_badge(&sample_content(),).expect("expected badge to render",);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"181\""));
        assert!(svg.contains("<tspan font-weight=\"bold\">octocat</tspan><tspan>/Hello-World</tspan>"));
        assert!(svg.contains(">HTML</text>"));
        assert!(svg.contains("fill=\"#007acc\""));
        assert!(svg.contains("fill=\"#555\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn render_badge_is_deterministic()
    {
        let first = render_badge(&sample_content(),).expect("first render",);
        let second = render_badge(&sample_content(),).expect("second render",);
        assert_eq!(first, second);
    }

    #[test]
    fn render_badge_escapes_dynamic_content()
    {
        let content = BadgeContent {
            owner:      "a&b",
            repository: "<repo>",
            message:    "C\"++'",
            color:      "#fff",
        };
        let svg = render_badge(&content,).expect("expected badge to render",);
        assert!(svg.contains("a&amp;b"));
        assert!(svg.contains("&lt;repo&gt;"));
        assert!(svg.contains("C&quot;++&apos;"));
        assert!(!svg.contains("<repo>"));
    }

    #[test]
    fn error_badge_uses_error_color_and_keeps_hyphens()
    {
        let svg = render_error_badge("User or repo not-found",);
        assert!(svg.contains(ERROR_COLOR));
        assert!(svg.contains("gitpulse"));
        assert!(svg.contains("/error"));
        assert!(svg.contains("User or repo not-found"));
    }

    #[test]
    fn escape_xml_returns_borrowed_when_no_escaping_needed()
    {
        match escape_xml("plain text",) {
            Cow::Borrowed(value,) => assert_eq!(value, "plain text"),
            Cow::Owned(_,) => panic!("expected borrowed variant"),
        }
    }

    #[test]
    fn fallback_svg_is_a_document()
    {
        assert!(FALLBACK_SVG.starts_with("<svg"));
        assert!(FALLBACK_SVG.contains("Error"));
    }
}
