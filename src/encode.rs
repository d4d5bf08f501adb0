//! Adapter from the `qrcode` encoder to [`ModuleMatrix`].
//!
//! The renderer only consumes module matrices; this is the one place that
//! knows about an encoder.

use crate::error::StyleError;
use crate::models::ModuleMatrix;
pub use qrcode::EcLevel;
use qrcode::{Color, QrCode};

/// Error correction used when the caller has no preference
pub const DEFAULT_EC_LEVEL: EcLevel = EcLevel::H;

/// Encode `text` into a module matrix (no quiet zone)
pub fn encode_text(text: &str, level: EcLevel) -> Result<ModuleMatrix, StyleError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), level)
        .map_err(|e| StyleError::Payload(format!("QR encode error: {e}")))?;
    let side = code.width();
    let mut matrix = ModuleMatrix::new(side);
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            matrix.set(i % side, i / side, true);
        }
    }
    log::debug!(
        "encoded {} bytes into {}x{} modules ({:?})",
        text.len(),
        side,
        side,
        level
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::finder_window;

    #[test]
    fn test_short_text_is_version_one() {
        let matrix = encode_text("hello", EcLevel::L).unwrap();
        assert_eq!(matrix.side(), 21);
    }

    #[test]
    fn test_finder_patterns_are_where_expected() {
        let matrix = encode_text("https://example.org", DEFAULT_EC_LEVEL).unwrap();
        let n = matrix.side();
        // Outer ring and 3x3 core of each finder are dark, the separator light
        for (ox, oy) in [(0, 0), (n - 7, 0), (0, n - 7)] {
            assert!(finder_window(ox, oy, n).is_some());
            for i in 0..7 {
                assert!(matrix.get(ox + i, oy));
                assert!(matrix.get(ox, oy + i));
            }
            assert!(!matrix.get(ox + 1, oy + 1));
            assert!(matrix.get(ox + 3, oy + 3));
        }
        assert!(!matrix.get(7, 7));
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let text = "x".repeat(8000);
        assert!(matches!(
            encode_text(&text, EcLevel::H),
            Err(StyleError::Payload(_))
        ));
    }
}
