//! Bit fields of arbitrary width at arbitrary bit offsets within a byte
//! buffer. Bits are numbered least significant first, starting with bit 0 of
//! byte 0, so that the layout matches little-endian integer loads.

/// Writes the low `size` bits of `value` at `bit_offset`. Other bits of the
/// buffer are preserved. A field of size zero writes nothing.
///
/// # Panics
/// Panics if `size > 64` or if the field does not fit into `buffer`.
pub fn insert_bits(buffer: &mut [u8], bit_offset: usize, (size, value): (usize, u64)) {
    assert!(size <= 64, "a bit field holds at most 64 bits, but {} were requested", size);
    let mut written = 0;
    while written < size {
        let pos = bit_offset + written;
        let shift = pos % 8;
        let n = (8 - shift).min(size - written);
        let mask = ((1u16 << n) - 1) as u8;
        let bits = (value >> written) as u8 & mask;
        let byte = &mut buffer[pos / 8];
        *byte = (*byte & !(mask << shift)) | (bits << shift);
        written += n;
    }
}

/// Reads a field of `size` bits at `bit_offset`.
///
/// # Panics
/// Panics if `size > 64` or if the field does not fit into `buffer`.
pub fn extract_bits(buffer: &[u8], bit_offset: usize, size: usize) -> u64 {
    assert!(size <= 64, "a bit field holds at most 64 bits, but {} were requested", size);
    let mut value = 0u64;
    let mut read = 0;
    while read < size {
        let pos = bit_offset + read;
        let shift = pos % 8;
        let n = (8 - shift).min(size - read);
        let mask = ((1u16 << n) - 1) as u8;
        let bits = (buffer[pos / 8] >> shift) & mask;
        value |= (bits as u64) << read;
        read += n;
    }
    value
}

/// Writes consecutive bit fields into a byte buffer.
pub struct FieldWriter<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> FieldWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Appends the low `size` bits of `value`.
    pub fn write_bits(&mut self, (size, value): (usize, u64)) {
        insert_bits(self.buffer, self.offset, (size, value));
        self.offset += size;
    }

    /// Number of bits written so far.
    pub fn bit_offset(&self) -> usize {
        self.offset
    }
}

/// Reads consecutive bit fields from a byte buffer.
pub struct FieldReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn read_bits(&mut self, size: usize) -> u64 {
        let value = extract_bits(self.buffer, self.offset, size);
        self.offset += size;
        value
    }

    pub fn bit_offset(&self) -> usize {
        self.offset
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_straddle_bytes() {
        let mut buffer = [0u8; 4];
        insert_bits(&mut buffer, 3, (10, 0b10_1100_1101));
        assert_eq!(buffer, [0b0110_1000, 0b0001_0110, 0, 0]);
        assert_eq!(extract_bits(&buffer, 3, 10), 0b10_1100_1101);
    }

    #[test]
    fn insertion_preserves_neighbours() {
        let mut buffer = [0xFFu8; 3];
        insert_bits(&mut buffer, 4, (12, 0));
        assert_eq!(buffer, [0x0F, 0x00, 0xFF]);
        insert_bits(&mut buffer, 4, (12, 0xABC));
        assert_eq!(buffer, [0xCF, 0xAB, 0xFF]);
    }

    #[test]
    fn value_is_truncated_to_field() {
        let mut buffer = [0u8; 2];
        insert_bits(&mut buffer, 0, (4, 0xFF));
        assert_eq!(buffer, [0x0F, 0x00]);
    }

    #[test]
    fn zero_width_field() {
        let mut buffer = [0x5Au8; 1];
        insert_bits(&mut buffer, 8, (0, 123));
        assert_eq!(buffer, [0x5A]);
        assert_eq!(extract_bits(&buffer, 8, 0), 0);
    }

    #[test]
    fn full_word() {
        let mut buffer = [0u8; 9];
        insert_bits(&mut buffer, 5, (64, u64::MAX - 1));
        assert_eq!(extract_bits(&buffer, 5, 64), u64::MAX - 1);
        assert_eq!(buffer[0] & 0x1F, 0);
    }

    #[test]
    fn writer_and_reader() {
        let mut buffer = [0u8; 4];
        let mut writer = FieldWriter::new(&mut buffer);
        writer.write_bits((3, 5));
        writer.write_bits((0, 1));
        writer.write_bits((13, 4321));
        writer.write_bits((7, 99));
        assert_eq!(writer.bit_offset(), 23);

        let mut reader = FieldReader::new(&buffer);
        assert_eq!(reader.read_bits(3), 5);
        assert_eq!(reader.read_bits(0), 0);
        assert_eq!(reader.read_bits(13), 4321);
        assert_eq!(reader.read_bits(7), 99);
        assert_eq!(reader.bit_offset(), 23);
    }
}
