use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The command engines whose register writes can be captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// 2D blit engine.
    #[serde(rename = "FERMI2D")]
    Fermi2d,
    /// 3D graphics engine.
    #[serde(rename = "MAXWELL")]
    Maxwell3d,
    #[serde(rename = "KEPLERC")]
    KeplerCompute,
    /// Inline-to-memory upload engine.
    #[serde(rename = "KEPLERI")]
    KeplerInlineToMemory,
    /// DMA copy engine.
    #[serde(rename = "MAXWDMA")]
    MaxwellDma,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        EngineKind::Fermi2d,
        EngineKind::Maxwell3d,
        EngineKind::KeplerCompute,
        EngineKind::KeplerInlineToMemory,
        EngineKind::MaxwellDma,
    ];

    /// Short display name used in decoded results and reports.
    pub const fn name(self) -> &'static str {
        match self {
            EngineKind::Fermi2d => "FERMI2D",
            EngineKind::Maxwell3d => "MAXWELL",
            EngineKind::KeplerCompute => "KEPLERC",
            EngineKind::KeplerInlineToMemory => "KEPLERI",
            EngineKind::MaxwellDma => "MAXWDMA",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            EngineKind::Fermi2d => 0,
            EngineKind::Maxwell3d => 1,
            EngineKind::KeplerCompute => 2,
            EngineKind::KeplerInlineToMemory => 3,
            EngineKind::MaxwellDma => 4,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(EngineKind::Fermi2d),
            1 => Some(EngineKind::Maxwell3d),
            2 => Some(EngineKind::KeplerCompute),
            3 => Some(EngineKind::KeplerInlineToMemory),
            4 => Some(EngineKind::MaxwellDma),
            _ => None,
        }
    }

    pub const fn mask(self) -> EngineMask {
        match self {
            EngineKind::Fermi2d => EngineMask::FERMI_2D,
            EngineKind::Maxwell3d => EngineMask::MAXWELL_3D,
            EngineKind::KeplerCompute => EngineMask::KEPLER_COMPUTE,
            EngineKind::KeplerInlineToMemory => EngineMask::KEPLER_INLINE_TO_MEMORY,
            EngineKind::MaxwellDma => EngineMask::MAXWELL_DMA,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine name {0:?} (expected one of FERMI2D, MAXWELL, KEPLERC, KEPLERI, MAXWDMA)")]
pub struct UnknownEngineName(pub String);

impl FromStr for EngineKind {
    type Err = UnknownEngineName;

    /// Accepts the display names case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineKind::ALL
            .into_iter()
            .find(|engine| engine.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEngineName(s.to_owned()))
    }
}

bitflags! {
    /// Set of engines whose writes are captured.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct EngineMask: u8 {
        const FERMI_2D = 1 << 0;
        const MAXWELL_3D = 1 << 1;
        const KEPLER_COMPUTE = 1 << 2;
        const KEPLER_INLINE_TO_MEMORY = 1 << 3;
        const MAXWELL_DMA = 1 << 4;
    }
}

impl EngineMask {
    pub fn contains_engine(self, engine: EngineKind) -> bool {
        self.contains(engine.mask())
    }

    /// Enabled engines in [`EngineKind::ALL`] order.
    pub fn engines(self) -> impl Iterator<Item = EngineKind> {
        EngineKind::ALL
            .into_iter()
            .filter(move |engine| self.contains_engine(*engine))
    }
}

impl FromIterator<EngineKind> for EngineMask {
    fn from_iter<T: IntoIterator<Item = EngineKind>>(iter: T) -> Self {
        iter.into_iter()
            .fold(EngineMask::empty(), |mask, engine| mask | engine.mask())
    }
}

impl Default for EngineMask {
    fn default() -> Self {
        EngineMask::MAXWELL_3D
    }
}
