//! Share artifacts: scannable QR images for issued codes and profile URLs.
//!
//! Artifacts are SVG documents. `encode` is the strict QR path; `render`
//! wraps it with a placeholder image so callers always get something to
//! show.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use serde::Serialize;
use tracing::warn;

use crate::error::ShareError;

/// Longest content `encode` accepts, in bytes.
pub const MAX_CONTENT_BYTES: usize = 512;

/// Smallest edge length we render, in pixels.
const MIN_SIZE: u32 = 64;

/// Characters per line of placeholder text.
const PLACEHOLDER_LINE_CHARS: usize = 28;

pub const SVG_MIME: &str = "image/svg+xml";

/// How faithful an artifact is to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// Scannable QR code.
    Qr,
    /// Human-readable stand-in; not scannable.
    Placeholder,
}

/// A rendered share image.
#[derive(Debug, Clone)]
pub struct ShareArtifact {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub fidelity: Fidelity,
}

impl ShareArtifact {
    /// `data:` URI suitable for an `<img src>`.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

/// Encode `content` as a QR code at least `size` pixels square.
pub fn encode(content: &str, size: u32) -> Result<ShareArtifact, ShareError> {
    if content.is_empty() {
        return Err(ShareError::EmptyContent);
    }
    if content.len() > MAX_CONTENT_BYTES {
        return Err(ShareError::ContentTooLarge {
            length: content.len(),
            max: MAX_CONTENT_BYTES,
        });
    }

    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M).map_err(
        |e| match e {
            QrError::DataTooLong => ShareError::ContentTooLarge {
                length: content.len(),
                max: MAX_CONTENT_BYTES,
            },
            other => ShareError::Encode(other.to_string()),
        },
    )?;

    let size = size.max(MIN_SIZE);
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(ShareArtifact {
        mime_type: SVG_MIME,
        bytes: image.into_bytes(),
        fidelity: Fidelity::Qr,
    })
}

/// Encode `content`, falling back to a placeholder image on encoder failure.
///
/// Only empty content is an error, since the placeholder has nothing to show.
pub fn render(content: &str, size: u32) -> Result<ShareArtifact, ShareError> {
    match encode(content, size) {
        Ok(artifact) => Ok(artifact),
        Err(ShareError::EmptyContent) => Err(ShareError::EmptyContent),
        Err(e) => {
            warn!(error = %e, length = content.len(), "QR encoding failed, rendering placeholder");
            Ok(placeholder(content, size))
        }
    }
}

/// Content to encode for an issued code: the profile URL when a public base
/// URL is configured, otherwise the bare code.
pub fn share_content(code: &str, profile_base_url: Option<&str>) -> String {
    match profile_base_url {
        Some(base) => profile_share_url(base, code),
        None => code.to_string(),
    }
}

/// Public profile URL for an issued code.
pub fn profile_share_url(base: &str, code: &str) -> String {
    format!("{}/profile/{}", base.trim_end_matches('/'), code)
}

fn placeholder(content: &str, size: u32) -> ShareArtifact {
    let size = size.max(MIN_SIZE);
    let lines = wrap(content, PLACEHOLDER_LINE_CHARS);

    // Shrink text so every line fits inside the square.
    let usable = size as f32 * 0.8;
    let by_height = usable / (lines.len() as f32 + 2.0) / 1.2;
    let by_width = usable / (PLACEHOLDER_LINE_CHARS as f32 * 0.6);
    let font = by_height.min(by_width).max(1.0);
    let line_height = font * 1.2;
    let margin = size as f32 * 0.1;

    let mut svg = format!(
        r##"<?xml version="1.0" standalone="yes"?><svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><rect width="100%" height="100%" fill="#fff4e5"/><rect x="2" y="2" width="{inner}" height="{inner}" fill="none" stroke="#d9822b" stroke-width="4" stroke-dasharray="12 6"/><text x="50%" y="{banner_y:.1}" text-anchor="middle" font-family="sans-serif" font-weight="bold" font-size="{font:.1}" fill="#d9822b">QR unavailable</text>"##,
        inner = size.saturating_sub(4),
        banner_y = margin + font,
    );

    for (i, line) in lines.iter().enumerate() {
        let y = margin + font + line_height * (i as f32 + 2.0);
        svg.push_str(&format!(
            r##"<text x="50%" y="{y:.1}" text-anchor="middle" font-family="monospace" font-size="{font:.1}" fill="#333333">{}</text>"##,
            escape_xml(line)
        ));
    }
    svg.push_str("</svg>");

    ShareArtifact {
        mime_type: SVG_MIME,
        bytes: svg.into_bytes(),
        fidelity: Fidelity::Placeholder,
    }
}

/// Split text into fixed-width lines on character boundaries.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
