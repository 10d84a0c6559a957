//! Optimal simplex sampling: ranks the lattice points of a regular sampling
//! of the set of sorted 4-tuples `x >= y >= z >= w >= 0` with `x + y + z + w = 1`.
//! A tuple of blend weights is mapped to the rank of the closest lattice point,
//! and a rank is mapped back to the lattice point in closed form. Ranks are
//! dense, so a code of `bits` bits uses nearly all of its values.

use thiserror::Error;
use crate::utils::round_half_up;

/// Number of subdivisions per axis for each total bit count, chosen as the
/// largest lattice whose point count fits the bit count.
const SUBDIVISIONS: [u64; 65] = [
    0, 1, 2, 3, 5, 6, 9, 11, 15, 19, 24, 31, 40, 51, 65, 82, 104, 131, 166, 209, 264, 333,
    421, 531, 669, 843, 1063, 1340, 1689, 2128, 2682, 3379, 4258, 5365, 6760, 8518, 10733,
    13523, 17038, 21467, 27047, 34078, 42936, 54097, 68158, 85874, 108196, 136318, 171751,
    216393, 272639, 343504, 432788, 545279, 687010, 865578, 1090561, 1374021, 1731159,
    2181124, 2748045, 3462320, 432788, 5496091, 6924641,
];

/// Bit counts for which a lattice is defined.
pub const MIN_BITS: u32 = 2;
pub const MAX_BITS: u32 = 64;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("The code {code} is not a valid rank, ranks are below {point_count}.")]
    InvalidCode { code: u64, point_count: u64 },
    #[error("Optimal simplex sampling is not defined for {0} bits.")]
    UnsupportedBitCount(u32),
}

/// Describes the lattice used for a given bit count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Info {
    /// Number of subdivisions per axis.
    pub n: u64,
    /// Number of lattice points. Valid ranks lie in `[0, point_count)`.
    pub point_count: u64,
    /// Distance between two neighbouring lattice values of a weight.
    pub scale: f64,
}

impl Info {
    pub fn new(bits: u32) -> Result<Self, Err> {
        if !(MIN_BITS..=MAX_BITS).contains(&bits) {
            return Err(Err::UnsupportedBitCount(bits));
        }
        let n = SUBDIVISIONS[bits as usize];
        Ok(Self {
            n,
            point_count: base_index_4(0, n),
            scale: 0.5 / (n - 1) as f64,
        })
    }
}

/// Number of lattice points of the 3-dimensional sub-simplex with `n`
/// subdivisions whose smallest coordinate is at least `ic`.
fn base_index_3(ic: u64, n: u64) -> u64 {
    let a = 2 * n + 1 - 3 * ic;
    let a2 = a * a;
    a2 / 12 + (a2 % 12 >= 6) as u64
}

/// Inverts `base_index_3`: finds the smallest coordinate of rank `rank`.
fn solve_for_i3(rank: u64, n: u64) -> u64 {
    let x = base_index_3(0, n) - rank;
    let a = (2.0 * n as f64 + 1.0 - (12.0 * x as f64).sqrt()) as u64;
    let ic = a / 3;
    let lower = base_index_3(ic, n);
    let upper = base_index_3(ic + 1, n);
    ic + (x <= upper) as u64 - (x > lower) as u64
}

/// Number of lattice points of the 4-dimensional simplex with `n`
/// subdivisions whose smallest coordinate is at least `id`.
fn base_index_4(id: u64, n: u64) -> u64 {
    let a = 2 * id as i128 - n as i128 - 1;
    let a2 = (a * a) / 36;
    let a2r = (a * a) % 36;
    let b = 3 - 2 * a;
    (a2 * b + (a2r * b + 18) / 36) as u64
}

/// Inverts `base_index_4` with a cube root estimate and a single correction.
fn solve_for_i4(rank: u64, n: u64, point_count: u64) -> u64 {
    let x = point_count - rank;
    let cr = (x as f64 * 144.0).powf(1.0 / 3.0);
    let f = cr + 1.0 / cr;
    let id = (2 * n as i64 + 3 - f as i64) / 4;
    let id = id.max(0) as u64;
    id - (x > base_index_4(id, n)) as u64
}

/// Ranks a tuple of four weights sorted in descending order. The largest
/// weight is implied by the others.
pub fn compress_tuple(weights: &[f32; 4], info: &Info) -> u64 {
    let scale = info.scale;
    let mut n = info.n;

    let k = round_half_up(weights[3] as f64 / scale).min((n as f64 / 2.0 - 0.5) as u64);
    let v4 = k as f64 * scale;
    let to_k = info.point_count - base_index_4(k, n);
    n -= 2 * k;

    let j = round_half_up((weights[2] as f64 - v4) / scale)
        .min(((2 * n + 1) as f64 / 3.0 - 1.0) as u64);
    let v3 = j as f64 * scale;
    let jf = j as f64;
    let to_j = (n as f64 * jf - jf * jf * 3.0 / 4.0 + jf / 2.0 + 1.0 / 4.0) as u64;
    n = (n as f64 - (3 * j) as f64 / 2.0) as u64;

    let i = round_half_up((weights[1] as f64 - v3 - v4) / scale).min(n.saturating_sub(1));

    i + to_j + to_k
}

/// Maps a rank back to its tuple of weights in descending order. The weights
/// sum to one up to rounding.
pub fn decompress_tuple(code: u64, info: &Info) -> Result<[f32; 4], Err> {
    if code >= info.point_count {
        return Err(Err::InvalidCode { code, point_count: info.point_count });
    }
    let mut rank = code;
    let mut n = info.n;

    let k = solve_for_i4(rank, n, info.point_count);
    rank -= info.point_count - base_index_4(k, n);
    n -= 2 * k;
    let j = solve_for_i3(rank, n);
    rank -= (n * n + n + 1) / 3 - base_index_3(j, n);
    let i = rank;

    // undo the shear of the lattice
    let j = j + k;
    let i = i + j;

    let y = (i as f32 as f64 * info.scale) as f32;
    let z = (j as f32 as f64 * info.scale) as f32;
    let w = (k as f32 as f64 * info.scale) as f32;
    Ok([1.0 - y - z - w, y, z, w])
}

/// Compresses a batch of weight tuples, each sorted in descending order.
/// The tuple index of each vertex is stored above the rank bits, which
/// requires `bits + index bits <= 64`.
///
/// # Arguments
/// * `weights` - tuples of four weights sorted in descending order.
/// * `extra_tuple_indices` - one index per tuple, or an empty slice.
/// * `bits` - number of bits of the rank.
/// * `out` - receives one code per tuple.
pub fn compress(weights: &[[f32; 4]], extra_tuple_indices: &[u64], bits: u32, out: &mut [u64]) -> Result<Info, Err> {
    let info = Info::new(bits)?;
    for (idx, (tuple, code)) in weights.iter().zip(out.iter_mut()).enumerate() {
        let extra = extra_tuple_indices.get(idx).copied().unwrap_or(0);
        *code = compress_tuple(tuple, &info) | extra.checked_shl(bits).unwrap_or(0);
    }
    Ok(info)
}

/// Decompresses a batch of codes produced by `compress`. Bits above the
/// rank are ignored.
pub fn decompress(codes: &[u64], bits: u32, out: &mut [[f32; 4]]) -> Result<(), Err> {
    let info = Info::new(bits)?;
    let mask = if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 };
    for (code, tuple) in codes.iter().zip(out.iter_mut()) {
        *tuple = decompress_tuple(code & mask, &info)?;
    }
    Ok(())
}
