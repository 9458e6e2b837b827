//! Isoenthalpic flash quality.
//!
//! Both the wellbore march and the separator flash a fixed enthalpy against the
//! saturation lines at a lower pressure:
//!
//! ```text
//! x = (h - h_f) / (h_g - h_f),   clipped to [0, 1]
//! ```

use crate::SpecEnthalpy;
use gf_core::numeric::clip_unit;

/// Result of flashing an enthalpy between two saturation lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashQuality {
    /// Vapour mass fraction in [0, 1].
    pub quality: f64,
    /// `h_g - h_f <= 0`; quality forced to 0.
    pub degenerate: bool,
    /// Raw ratio fell outside [0, 1] and was clipped.
    pub clipped: bool,
}

impl FlashQuality {
    pub fn is_two_phase(&self) -> bool {
        self.quality > 0.0
    }
}

/// Flash enthalpy `h` between saturated liquid `h_f` and vapour `h_g`.
pub fn isoenthalpic_quality(h: SpecEnthalpy, h_f: SpecEnthalpy, h_g: SpecEnthalpy) -> FlashQuality {
    let h_fg = h_g - h_f;
    if !(h_fg > 0.0) {
        return FlashQuality {
            quality: 0.0,
            degenerate: true,
            clipped: false,
        };
    }

    let raw = (h - h_f) / h_fg;
    if !raw.is_finite() {
        return FlashQuality {
            quality: 0.0,
            degenerate: true,
            clipped: false,
        };
    }

    let quality = clip_unit(raw);
    FlashQuality {
        quality,
        degenerate: false,
        clipped: quality != raw,
    }
}
