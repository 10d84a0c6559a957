//! Permutation coding stores the explicit weights of a vertex, the order in
//! which they are assigned to slots and the tuple index in one integer.
//!
//! Each explicit weight `w_j` (ascending, so `w_j <= 1/2`) is quantized to a
//! level on a grid of `span * e_j` steps over `[0, 1/2]`, where
//! `span = weight_value_count - entry_count` and `e_j` is the extra value
//! count of rank `j`. A level splits into a coarse value and a refinement
//! digit. Coarse values are non-decreasing, so adding the rank makes them
//! distinct values below `weight_value_count`. Distinct values can be placed
//! into the `entry_count` slots in `entry_count!` ways, and the slot order
//! carries part of the payload: the refinement digits and the tuple index.
//! The decoder sorts the slots to recover both.

use super::{complete_last_weight, CodecImpl, Err};
use crate::core::codec_table::CodecDescriptor;
use crate::core::params::CompressionParameters;
use crate::core::shared::SUPPORTED_BONE_COUNT;
use crate::shared::bit_field::{extract_bits, insert_bits};
use crate::utils::{factorial, round_half_up};

const MAX_ENTRY_COUNT: usize = SUPPORTED_BONE_COUNT - 1;

#[derive(Clone, Debug)]
pub struct PermutationCoding {
    codec: CodecDescriptor,
    vertex_size: usize,
    /// Number of coarse steps between zero and one half.
    span: u64,
    /// `entry_count!`
    permutation_count: u64,
    /// Product of the extra value counts.
    refinement_count: u64,
    /// Number of tuple indices that the payload can address.
    tuple_capacity: u64,
}

impl PermutationCoding {
    pub fn new(codec: CodecDescriptor, params: &CompressionParameters) -> Self {
        let permutation_count = factorial(codec.entry_count as usize);
        let refinement_count = codec.extra_value_counts().iter().map(|&e| e as u64).product::<u64>();
        let payload_count = codec.payload_value_count_over_factorial as u64 * permutation_count;
        Self {
            codec,
            vertex_size: params.vertex_size,
            span: (codec.weight_value_count - codec.entry_count) as u64,
            permutation_count,
            refinement_count,
            tuple_capacity: payload_count / refinement_count,
        }
    }

    /// Number of distinct tuple indices that can be stored.
    pub fn tuple_capacity(&self) -> u64 {
        self.tuple_capacity
    }

    /// Quantizes the explicit weights. Levels are raised where needed so that
    /// `levels[j] / e_j` never decreases.
    fn levels(&self, weights: &[f32]) -> [u64; MAX_ENTRY_COUNT] {
        let extras = self.codec.extra_value_counts();
        let mut levels = [0u64; MAX_ENTRY_COUNT];
        for (level, (&w, &e)) in levels.iter_mut().zip(weights.iter().zip(extras)) {
            let e = e as u64;
            *level = round_half_up(w as f64 * (2 * self.span * e) as f64).min(self.span * e);
        }
        for j in 1..extras.len() {
            let (e_prev, e) = (extras[j - 1] as u64, extras[j] as u64);
            if levels[j] * e_prev < levels[j - 1] * e {
                levels[j] = (levels[j - 1] * e).div_ceil(e_prev);
            }
        }
        levels
    }
}

/// Slot indices that are still free, in ascending order.
struct FreeSlots {
    slots: [u8; MAX_ENTRY_COUNT],
    len: usize,
}

impl FreeSlots {
    fn new(len: usize) -> Self {
        let mut slots = [0u8; MAX_ENTRY_COUNT];
        for (i, s) in slots.iter_mut().enumerate() {
            *s = i as u8;
        }
        Self { slots, len }
    }

    /// Removes and returns the `digit`-th free slot.
    fn take(&mut self, digit: usize) -> usize {
        let slot = self.slots[digit] as usize;
        self.slots.copy_within(digit + 1..self.len, digit);
        self.len -= 1;
        slot
    }

    /// Removes the given slot and returns its position among the free slots.
    fn remove(&mut self, slot: usize) -> usize {
        let digit = self.slots[..self.len].iter().take_while(|&&s| (s as usize) < slot).count();
        self.take(digit);
        digit
    }
}

impl CodecImpl for PermutationCoding {
    fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    fn encode(&self, weights: &[f32], tuple_index: u32, out: &mut [u8]) {
        let n = self.codec.entry_count as usize;
        let m = self.codec.weight_value_count as u128;
        let extras = self.codec.extra_value_counts();
        let levels = self.levels(&weights[..n]);

        let refinement = (0..n).rev().fold(0u64, |acc, j| acc * extras[j] as u64 + levels[j] % extras[j] as u64);
        let payload = tuple_index as u64 + self.tuple_capacity * refinement;
        let high = payload / self.permutation_count;
        let mut lehmer = payload % self.permutation_count;

        let mut free = FreeSlots::new(n);
        let mut slots = [0u64; MAX_ENTRY_COUNT];
        for j in 0..n {
            let radix = (n - j) as u64;
            let slot = free.take((lehmer % radix) as usize);
            lehmer /= radix;
            slots[slot] = levels[j] / extras[j] as u64 + j as u64;
        }

        let digits = slots[..n].iter().rev().fold(0u128, |acc, &s| acc * m + s as u128);
        let code = digits * self.codec.payload_value_count_over_factorial as u128 + high as u128;
        insert_bits(out, 0, (self.vertex_size * 8, code as u64));
    }

    fn decode(&self, data: &[u8], weights: &mut [f32]) -> Result<u32, Err> {
        let n = self.codec.entry_count as usize;
        let m = self.codec.weight_value_count as u64;
        let p = self.codec.payload_value_count_over_factorial as u64;
        let extras = self.codec.extra_value_counts();

        let code = extract_bits(data, 0, self.vertex_size * 8);
        let high = code % p;
        let mut rest = code / p;
        let mut slots = [0u64; MAX_ENTRY_COUNT];
        for s in &mut slots[..n] {
            *s = rest % m;
            rest /= m;
        }
        if rest != 0 {
            return Err(Err::InvalidPermutationCode(code));
        }

        let mut order = [0usize; MAX_ENTRY_COUNT];
        for (i, o) in order.iter_mut().enumerate() {
            *o = i;
        }
        order[..n].sort_unstable_by_key(|&i| slots[i]);
        if order[..n].windows(2).any(|w| slots[w[0]] == slots[w[1]]) {
            return Err(Err::InvalidPermutationCode(code));
        }

        let mut free = FreeSlots::new(n);
        let mut lehmer = 0u64;
        let mut radix_product = 1u64;
        let mut coarse = [0u64; MAX_ENTRY_COUNT];
        for (j, &slot) in order[..n].iter().enumerate() {
            lehmer += free.remove(slot) as u64 * radix_product;
            radix_product *= (n - j) as u64;
            coarse[j] = slots[slot] - j as u64;
        }

        let payload = high * self.permutation_count + lehmer;
        let tuple_index = payload % self.tuple_capacity;
        let mut refinement = payload / self.tuple_capacity;
        if refinement >= self.refinement_count {
            return Err(Err::InvalidPermutationCode(code));
        }
        for j in 0..n {
            let e = extras[j] as u64;
            let level = coarse[j] * e + refinement % e;
            refinement /= e;
            if level > self.span * e {
                return Err(Err::InvalidPermutationCode(code));
            }
            weights[j] = (level as f64 / (2 * self.span * e) as f64) as f32;
        }
        complete_last_weight(&mut weights[..n + 1]);
        Ok(tuple_index as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec_table;
    use crate::core::params::CompressionMethod;
    use rand::{Rng, SeedableRng};

    fn codec_for(tuple_count: u32, bone_count: usize, vertex_size: usize) -> PermutationCoding {
        let class = codec_table::tuple_count_class(tuple_count).unwrap();
        let codec = *codec_table::lookup(class, bone_count, vertex_size).unwrap();
        let params = CompressionParameters {
            method: CompressionMethod::PermutationCoding { codec },
            vertex_size,
            max_bone_count: bone_count,
            tuple_index_bit_count: 0,
            max_tuple_count: tuple_count,
        };
        PermutationCoding::new(codec, &params)
    }

    #[test]
    fn every_cell_round_trips() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(11);
        for (tuple_count, bone_count, vertex_size, _) in codec_table::iter() {
            let codec = codec_for(tuple_count, bone_count, vertex_size);
            assert!(codec.tuple_capacity() >= tuple_count as u64);
            for _ in 0..20 {
                let mut weights: Vec<f32> = (0..bone_count).map(|_| rng.random::<f32>().powi(3)).collect();
                let sum: f32 = weights.iter().sum();
                weights.iter_mut().for_each(|w| *w /= sum);
                weights.sort_by(|a, b| a.total_cmp(b));
                let tuple_index = rng.random_range(0..tuple_count);

                let mut data = [0u8; 8];
                codec.encode(&weights, tuple_index, &mut data[..vertex_size]);
                assert!(data[vertex_size..].iter().all(|&b| b == 0));

                let mut decoded = vec![0.0; bone_count];
                assert_eq!(codec.decode(&data[..vertex_size], &mut decoded).unwrap(), tuple_index);
                for (w, d) in weights.iter().zip(&decoded[..bone_count - 1]) {
                    assert!((w - d).abs() as f64 <= 0.5 / codec.span as f64 + 1e-6, "{:?} {:?}", weights, decoded);
                }
                assert!(decoded[..bone_count - 1].windows(2).all(|w| w[0] <= w[1]));

                let mut again = [0u8; 8];
                codec.encode(&decoded, tuple_index, &mut again[..vertex_size]);
                assert_eq!(data, again);
            }
        }
    }

    #[test]
    fn largest_tuple_index() {
        let codec = codec_for(7000, 13, 8);
        let mut weights = [1.0 / 13.0; 13];
        weights[12] = 1.0 - 12.0 / 13.0;
        let mut data = [0u8; 8];
        codec.encode(&weights, 6999, &mut data);
        let mut decoded = [0.0; 13];
        assert_eq!(codec.decode(&data, &mut decoded).unwrap(), 6999);
    }

    #[test]
    fn levels_are_monotonic() {
        // 2048 tuples, 4 bones, 5 bytes has extra value counts [3, 4, 8]
        let codec = codec_for(2048, 4, 5);
        assert_eq!(codec.codec.extra_value_counts(), &[3, 4, 8]);
        let levels = codec.levels(&[0.2, 0.2, 0.2]);
        for j in 1..3 {
            let (e_prev, e) = (codec.codec.extra_value_counts[j - 1] as u64, codec.codec.extra_value_counts[j] as u64);
            assert!(levels[j] * e_prev >= levels[j - 1] * e);
        }
    }

    #[test]
    fn repeated_slot_values_are_invalid() {
        // 128 tuples, 3 bones, 2 bytes: 32 weight values, 64 payload values over 2!
        let codec = codec_for(128, 3, 2);
        let code: u64 = (5 * 32 + 5) * 64;
        let data = code.to_le_bytes();
        let mut weights = [0.0; 3];
        assert_eq!(codec.decode(&data[..2], &mut weights), Err(Err::InvalidPermutationCode(code)));
    }

    #[test]
    fn single_entry_layout() {
        // 128 tuples, 2 bones, 1 byte: the coarse value is the top bit, the tuple index the rest
        let codec = codec_for(128, 2, 1);
        assert_eq!(codec.span, 1);
        let mut weights = [0.0; 2];
        let data = [128u8 + 5];
        assert_eq!(codec.decode(&data, &mut weights).unwrap(), 5);
        assert_eq!(weights, [0.5, 0.5]);
    }
}
