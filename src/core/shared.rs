use std::cmp;
use std::fmt;

/// Configurations of the encoder and its components implement this trait.
pub trait ConfigType {
    fn default() -> Self;
}

/// The largest number of bone influences per vertex that any codec supports.
pub const SUPPORTED_BONE_COUNT: usize = 13;

/// The smallest number of bone influences per vertex. One weight is always
/// implicit, so at least one explicit weight must remain.
pub const MIN_BONE_COUNT: usize = 2;

/// Bone index used for influences whose weight vanishes after quantization.
/// It matches any bone index when tuples are merged, so it must never occur
/// as a real bone index.
pub const IRRELEVANT_INDEX: u16 = 0xFFFF;

/// Upper bound on the requested number of distinct bone index tuples.
pub const MAX_TUPLE_COUNT: u32 = 1 << 24;

/// Size in bytes of the largest compressed vertex, which is the uncompressed
/// layout with the maximal bone count.
pub const MAX_VERTEX_SIZE: usize = SUPPORTED_BONE_COUNT * UNCOMPRESSED_BYTES_PER_BONE;

/// Bytes per influence of the uncompressed layout: a `u16` index and an `f32` weight.
pub const UNCOMPRESSED_BYTES_PER_BONE: usize = 2 + 4;

/// A single bone influence.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct IndexWeightPair {
    pub index: u16,
    pub weight: f32,
}

impl IndexWeightPair {
    pub fn new(index: u16, weight: f32) -> Self {
        Self { index, weight }
    }
}

impl fmt::Debug for IndexWeightPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {})", self.index, self.weight)
    }
}

/// The influences of one vertex, stored inline so that per-vertex work
/// does not allocate.
#[derive(Clone, Copy, PartialEq)]
pub struct Influences {
    pairs: [IndexWeightPair; SUPPORTED_BONE_COUNT],
    len: usize,
}

impl Influences {
    /// Creates the influences from a slice of at most `SUPPORTED_BONE_COUNT` pairs.
    pub fn from_slice(pairs: &[IndexWeightPair]) -> Self {
        debug_assert!(pairs.len() <= SUPPORTED_BONE_COUNT);
        let mut out = Self { pairs: [IndexWeightPair::default(); SUPPORTED_BONE_COUNT], len: pairs.len() };
        out.pairs[..pairs.len()].copy_from_slice(pairs);
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[IndexWeightPair] {
        &self.pairs[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [IndexWeightPair] {
        &mut self.pairs[..self.len]
    }

    /// Copies the weights into `out`, which must hold `self.len()` values.
    pub fn weights_into(&self, out: &mut [f32]) {
        for (w, p) in out.iter_mut().zip(self.as_slice()) {
            *w = p.weight;
        }
    }

    /// Returns the weight of the given bone, or zero if the bone has no influence.
    pub fn weight_of(&self, index: u16) -> f32 {
        self.as_slice().iter()
            .filter(|p| p.index == index)
            .map(|p| p.weight)
            .sum()
    }
}

impl fmt::Debug for Influences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Orders bone index tuples lexicographically with the last slot (the bone
/// with the largest weight) most significant. `IRRELEVANT_INDEX` is the
/// largest index, so a fully specified tuple precedes every tuple that
/// only differs from it by wildcards.
pub fn compare_index_tuples(a: &[u16], b: &[u16]) -> cmp::Ordering {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            cmp::Ordering::Equal => continue,
            ord => return ord,
        }
    }
    cmp::Ordering::Equal
}
