//! Byte-window forensic classification and file type detection.
//!
//! A 256-entry lookup table classifies individual bytes; `WindowAnalysis`
//! folds a window of bytes into the ratios the forensic verdict is built
//! from. The same analysis runs per pixel in the renderer and per pointer
//! event in the inspector, so it stays a pure function of the window.

/// Byte classification flags (packed into u8 for cache efficiency).
/// Bit 0: Is printable ASCII (32-126)
/// Bit 1: Is high-bit (> 127)
/// Bit 2: Is null (0)
const FLAG_TEXT: u8 = 0b001;
const FLAG_HIGH: u8 = 0b010;
const FLAG_NULL: u8 = 0b100;

/// Precomputed byte classification lookup table.
const fn generate_byte_class_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut flags = 0u8;
        if i >= 32 && i <= 126 {
            flags |= FLAG_TEXT;
        }
        if i > 127 {
            flags |= FLAG_HIGH;
        }
        if i == 0 {
            flags |= FLAG_NULL;
        }
        lut[i] = flags;
        i += 1;
    }
    lut
}

/// Static byte classification lookup table (computed at compile time).
static BYTE_CLASS_LUT: [u8; 256] = generate_byte_class_lut();

/// Number of bytes examined around an offset for classification and
/// inspection.
pub const ANALYSIS_WINDOW: usize = 64;

/// Forensic verdict for a byte window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Mostly null bytes: zero padding, sparse sections.
    Padding,
    /// High byte-to-byte variation with many high-bit bytes: compressed or
    /// encrypted data.
    HighEntropy,
    /// Printable ASCII.
    Text,
    /// Everything else: machine code and structured binary data.
    CodeLike,
}

impl Classification {
    /// Display label for the inspector panel.
    pub fn name(self) -> &'static str {
        match self {
            Self::Padding => "PADDING / NULLS",
            Self::HighEntropy => "HIGH ENTROPY",
            Self::Text => "ASCII TEXT",
            Self::CodeLike => "CODE / DATA",
        }
    }
}

/// Byte window analysis results for classification and color mapping.
#[derive(Debug, Clone, Copy)]
pub struct WindowAnalysis {
    /// Proportion of printable ASCII text (0.0 - 1.0)
    pub text_ratio: f32,
    /// Proportion of high-bit bytes (0.0 - 1.0)
    pub high_ratio: f32,
    /// Proportion of null bytes (0.0 - 1.0)
    pub null_ratio: f32,
    /// Average byte-to-byte variation, normalized to 0.0 - 1.0. A cheap
    /// entropy proxy suitable for per-pixel evaluation; the inspector's
    /// exact Shannon entropy lives in `analysis::entropy`.
    pub variation: f32,
}

impl WindowAnalysis {
    /// Analyze a non-empty window of bytes in a single pass.
    pub fn analyze(data: &[u8]) -> Self {
        if data.is_empty() {
            return Self {
                text_ratio: 0.0,
                high_ratio: 0.0,
                null_ratio: 0.0,
                variation: 0.0,
            };
        }

        let mut text_count = 0u32;
        let mut high_count = 0u32;
        let mut null_count = 0u32;
        let mut variation = 0u32;

        let mut prev = data[0];
        for &byte in data {
            let flags = BYTE_CLASS_LUT[byte as usize];
            text_count += (flags & FLAG_TEXT) as u32;
            high_count += ((flags & FLAG_HIGH) >> 1) as u32;
            null_count += ((flags & FLAG_NULL) >> 2) as u32;
            variation += (byte as i16 - prev as i16).unsigned_abs() as u32;
            prev = byte;
        }

        let inv_count = 1.0 / data.len() as f32;

        Self {
            text_ratio: text_count as f32 * inv_count,
            high_ratio: high_count as f32 * inv_count,
            null_ratio: null_count as f32 * inv_count,
            variation: (variation as f32 * inv_count) / 128.0,
        }
    }

    /// Derive the forensic verdict. The order of the checks is load-bearing:
    /// padding wins over entropy, entropy over text, code is the fallback.
    pub fn classify(&self) -> Classification {
        if self.null_ratio > 0.9 {
            Classification::Padding
        } else if self.variation > 0.5 && self.high_ratio > 0.25 {
            Classification::HighEntropy
        } else if self.text_ratio > 0.85 {
            Classification::Text
        } else {
            Classification::CodeLike
        }
    }

    /// Map the verdict to RGB using the forensic color scheme.
    ///
    /// Color legend:
    /// - Blue: Nulls / padding / zeroes
    /// - Red: High entropy / encrypted data
    /// - Cyan: ASCII text
    /// - Green: Code / structured data
    #[inline]
    pub fn to_color(&self) -> [u8; 3] {
        match self.classify() {
            Classification::Padding => {
                let intensity = (0.2 + 0.3 * self.null_ratio).min(1.0);
                [0, 0, (intensity * 255.0) as u8]
            }
            Classification::HighEntropy => [255, 0, 0],
            Classification::Text => {
                let intensity = (0.8 * self.variation + 0.2).min(1.0);
                let val = (intensity * 255.0) as u8;
                [0, val, val]
            }
            Classification::CodeLike => {
                let intensity = (0.5 + 0.5 * self.variation).min(1.0);
                [0, (intensity * 255.0) as u8, 0]
            }
        }
    }
}

/// Analyze the window starting at `offset`, or `None` when the offset lies
/// past the end of the buffer (out-of-range cells).
pub fn classify_window(data: &[u8], offset: u64) -> Option<WindowAnalysis> {
    if offset >= data.len() as u64 {
        return None;
    }
    let start = offset as usize;
    let end = (start + ANALYSIS_WINDOW).min(data.len());
    let window = &data[start..end];
    if window.is_empty() {
        return None;
    }
    Some(WindowAnalysis::analyze(window))
}

/// File signature entry for magic byte detection.
struct FileSig {
    magic: &'static [u8],
    name: &'static str,
}

/// Known file signatures sorted by length (longest first for specificity).
static FILE_SIGNATURES: &[FileSig] = &[
    FileSig {
        magic: b"SQLite",
        name: "SQLite Database",
    },
    FileSig {
        magic: b"RIFF",
        name: "RIFF Container (WAV/AVI)",
    },
    FileSig {
        magic: &[0x7F, 0x45, 0x4C, 0x46],
        name: "ELF Binary",
    },
    FileSig {
        magic: &[0xCF, 0xFA, 0xED, 0xFE],
        name: "Mach-O Binary",
    },
    FileSig {
        magic: &[0xFE, 0xED, 0xFA, 0xCE],
        name: "Mach-O Binary",
    },
    FileSig {
        magic: &[0xCE, 0xFA, 0xED, 0xFE],
        name: "Mach-O Binary",
    },
    FileSig {
        magic: &[0xCA, 0xFE, 0xBA, 0xBE],
        name: "Mach-O Binary",
    },
    FileSig {
        magic: &[0x25, 0x50, 0x44, 0x46],
        name: "PDF Document",
    },
    FileSig {
        magic: &[0x50, 0x4B, 0x03, 0x04],
        name: "ZIP Archive / Office",
    },
    FileSig {
        magic: &[0x89, 0x50, 0x4E, 0x47],
        name: "PNG Image",
    },
    FileSig {
        magic: &[0x47, 0x49, 0x46, 0x38],
        name: "GIF Image",
    },
    FileSig {
        magic: &[0x52, 0x61, 0x72, 0x21],
        name: "RAR Archive",
    },
    FileSig {
        magic: &[0x37, 0x7A, 0xBC, 0xAF],
        name: "7-Zip Archive",
    },
    FileSig {
        magic: &[0xFF, 0xD8, 0xFF],
        name: "JPEG Image",
    },
    FileSig {
        magic: &[0x42, 0x5A, 0x68],
        name: "BZIP2 Archive",
    },
    FileSig {
        magic: &[0x4D, 0x5A],
        name: "Windows PE (EXE/DLL)",
    },
    FileSig {
        magic: &[0x1F, 0x8B],
        name: "GZIP Archive",
    },
];

/// Identify file type via magic bytes.
pub fn identify_file_type(data: &[u8]) -> &'static str {
    for sig in FILE_SIGNATURES {
        if data.len() >= sig.magic.len() && data.starts_with(sig.magic) {
            return sig.name;
        }
    }

    // Special case: MP4/MOV (variable header)
    if data.len() > 4
        && data[0] == 0x00
        && data[1] == 0x00
        && data[2] == 0x00
        && (data[4] == 0x66 || data[4] == 0x6D)
    {
        return "MP4/MOV Video";
    }

    "Unknown Binary"
}
