use phf::phf_map;
use std::fmt;

/// The fixed, ordered catalog of recognized anatomical structures.
///
/// Exactly one entry, [`Structure::PRIMARY`], is the primary target of the
/// evaluation: it receives 7x weight during corpus aggregation and is the
/// only structure penalized for false alarms. All other entries are the
/// supporting vessel structures, weighted 1x.
///
/// Record streams refer to structures by their exact catalog [`name`];
/// any other name is rejected during loading.
///
/// [`name`]: Structure::name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Structure {
    /// The primary tumor target.
    Tumor,
    /// Aorta.
    Aorta,
    /// Superior mesenteric artery.
    Sma,
    /// Superior mesenteric vein.
    Smv,
}

static BY_NAME: phf::Map<&'static str, Structure> = phf_map! {
    "tumor" => Structure::Tumor,
    "aorta" => Structure::Aorta,
    "sma" => Structure::Sma,
    "smv" => Structure::Smv,
};

impl Structure {
    /// Every catalog entry, in catalog order.
    pub const ALL: [Structure; 4] = [
        Structure::Tumor,
        Structure::Aorta,
        Structure::Sma,
        Structure::Smv,
    ];

    /// Number of catalog entries.
    pub const COUNT: usize = Self::ALL.len();

    /// The primary target structure.
    pub const PRIMARY: Structure = Structure::Tumor;

    /// The record-stream name of this structure.
    pub fn name(self) -> &'static str {
        match self {
            Structure::Tumor => "tumor",
            Structure::Aorta => "aorta",
            Structure::Sma => "sma",
            Structure::Smv => "smv",
        }
    }

    /// Looks up a catalog entry by its exact record-stream name.
    pub fn from_name(name: &str) -> Option<Structure> {
        BY_NAME.get(name).copied()
    }

    /// Aggregation weight: 7 for the primary target, 1 otherwise.
    pub fn weight(self) -> f64 {
        if self == Self::PRIMARY { 7.0 } else { 1.0 }
    }

    /// Position in catalog order, usable as a dense array index.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
