//! Hash computation for names using BLAKE3

use blake3::Hasher;

/// A 32-byte BLAKE3 digest.
pub type Digest = [u8; 32];

/// Compute the canonical digest of a name.
///
/// Digest = hash("name" || data_len || data_string || delimiter || count)
///
/// The data string already carries the name's full content in canonical
/// escaping, so two names that are equal under name equality always hash
/// to the same digest regardless of backing representation.
pub fn canonical_digest(data_string: &str, delimiter: char, component_count: usize) -> Digest {
    let data_bytes = data_string.as_bytes();

    let mut hasher = Hasher::new();

    // Hash type discriminator
    hasher.update(b"name");

    // Hash data length (8 bytes, big-endian for determinism)
    hasher.update(&(data_bytes.len() as u64).to_be_bytes());

    // Hash data string
    hasher.update(data_bytes);

    // Hash delimiter (UTF-8 bytes)
    let mut delimiter_buf = [0u8; 4];
    hasher.update(delimiter.encode_utf8(&mut delimiter_buf).as_bytes());

    // Hash component count (8 bytes, big-endian)
    hasher.update(&(component_count as u64).to_be_bytes());

    *hasher.finalize().as_bytes()
}

/// Compute a 64-bit hash code for a name.
///
/// The first eight digest bytes, big-endian. Equal names get equal codes.
pub fn hash_code(data_string: &str, delimiter: char, component_count: usize) -> u64 {
    let digest = canonical_digest(data_string, delimiter, component_count);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}
