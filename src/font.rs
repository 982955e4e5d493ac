//! Axis label font discovery with recoverable fallback.
//!
//! A missing font is never fatal: the renderer skips axis labels and
//! logs a warning instead. Callers who need a specific face can pass
//! font bytes through [`crate::config::ExportConfig::label_font`].

use ab_glyph::FontVec;

/// A loaded TTF/OTF font for drawing axis labels.
pub struct LabelFont {
    font: FontVec,
}

impl LabelFont {
    /// Parse font bytes. Returns `None` (with a warning) on unparseable
    /// data, so a bad caller-supplied font degrades to label-less output
    /// the same way a missing system font does.
    pub fn from_vec(data: Vec<u8>) -> Option<Self> {
        match FontVec::try_from_vec(data) {
            Ok(font) => Some(Self { font }),
            Err(e) => {
                log::warn!("Failed to parse label font: {e:?}");
                None
            }
        }
    }

    /// Probe the system font chain: DejaVuSans, then Carlito (Linux),
    /// Helvetica (macOS), arial (Windows). `None` if nothing is readable.
    pub fn discover() -> Option<Self> {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/Carlito-Regular.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        for path in CANDIDATES {
            if let Ok(data) = std::fs::read(path) {
                log::debug!("Using label font {path}");
                if let Some(font) = Self::from_vec(data) {
                    return Some(font);
                }
            }
        }
        log::warn!("No system font found, axis labels will be skipped");
        None
    }

    /// The parsed font, for `imageproc` text drawing.
    pub fn as_font(&self) -> &FontVec {
        &self.font
    }
}
