//! Named colormaps for the label overlay.
//!
//! Each palette is a compact table of RGB anchors sampled by linear
//! interpolation. The set matches the colormap list offered by the
//! host tool's style panel.

use std::fmt;
use std::str::FromStr;

/// Anchor rows: evenly spaced RGB stops from t = 0 to t = 1.
type Anchors = [[u8; 3]; 9];

const VIRIDIS: Anchors = [
    [68, 1, 84],
    [71, 45, 123],
    [59, 82, 139],
    [44, 114, 142],
    [33, 145, 140],
    [40, 174, 128],
    [94, 201, 98],
    [173, 220, 48],
    [253, 231, 37],
];

const PLASMA: Anchors = [
    [13, 8, 135],
    [70, 3, 159],
    [114, 1, 168],
    [156, 23, 158],
    [189, 55, 134],
    [216, 87, 107],
    [237, 121, 83],
    [251, 159, 58],
    [240, 249, 33],
];

const INFERNO: Anchors = [
    [0, 0, 4],
    [27, 12, 65],
    [74, 12, 107],
    [120, 28, 109],
    [165, 44, 96],
    [207, 68, 70],
    [237, 105, 37],
    [251, 155, 6],
    [252, 255, 164],
];

const MAGMA: Anchors = [
    [0, 0, 4],
    [24, 15, 62],
    [68, 15, 118],
    [114, 31, 129],
    [159, 47, 127],
    [205, 64, 113],
    [241, 96, 93],
    [253, 149, 103],
    [252, 253, 191],
];

/// Enumerated palette names understood by the style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
}

impl Colormap {
    /// All palette names, for parameter schemas and UI lists.
    pub const NAMES: [&'static str; 4] = ["viridis", "plasma", "inferno", "magma"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
        }
    }

    fn anchors(&self) -> &'static Anchors {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Plasma => &PLASMA,
            Self::Inferno => &INFERNO,
            Self::Magma => &MAGMA,
        }
    }

    /// Sample the palette at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let anchors = self.anchors();
        let last = anchors.len() - 1;

        let t = t.clamp(0.0, 1.0) * last as f32;
        let lo = t.floor() as usize;
        if lo >= last {
            return anchors[last];
        }
        let frac = t - lo as f32;

        let a = anchors[lo];
        let b = anchors[lo + 1];
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = (a[c] as f32 + (b[c] as f32 - a[c] as f32) * frac).round() as u8;
        }
        out
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "inferno" => Ok(Self::Inferno),
            "magma" => Ok(Self::Magma),
            other => Err(format!("unknown colormap {other:?}")),
        }
    }
}
