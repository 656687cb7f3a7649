use super::scan::Scan;
use std::collections::BTreeMap;

/// The owned collection of scans for one evaluation run, keyed by scan id.
///
/// The registry is built during the load phase and passed by reference
/// through scoring and reporting. Iteration order is sorted by scan id,
/// which fixes the reduction order of downstream aggregation and keeps the
/// reported score deterministic.
#[derive(Debug, Clone, Default)]
pub struct ScanRegistry {
    scans: BTreeMap<String, Scan>,
}

impl ScanRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scan with the given id, if it has been seen.
    pub fn get(&self, id: &str) -> Option<&Scan> {
        self.scans.get(id)
    }

    /// Mutable access to the scan with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Scan> {
        self.scans.get_mut(id)
    }

    /// The scan with the given id, created empty if unseen.
    pub fn get_or_create(&mut self, id: &str) -> &mut Scan {
        self.scans
            .entry(id.to_string())
            .or_insert_with(|| Scan::new(id))
    }

    /// All scans in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = &Scan> {
        self.scans.values()
    }

    /// Number of scans seen.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Whether no scans have been seen.
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }
}
