use crate::error::PersistError;

/// Magic bytes identifying a compressed voxel file.
pub const MAGIC: [u8; 4] = *b"VXFL";

/// Wrap serialized JSON in the compact container: magic + LZ4 block with the
/// uncompressed size prepended.
pub fn compress(json: &[u8]) -> Vec<u8> {
    let block = lz4_flex::compress_prepend_size(json);
    let mut out = Vec::with_capacity(MAGIC.len() + block.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&block);
    out
}

pub fn is_compressed(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC)
}

/// Upper bound on a decompressed voxel file (256 MiB).
pub const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;

/// LZ4 cannot expand a block by more than this factor.
const MAX_LZ4_RATIO: usize = 255;

/// Unwrap the compact container back into JSON bytes.
///
/// The size prefix is checked against the block length and
/// `MAX_DECOMPRESSED_BYTES` before anything is allocated.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, PersistError> {
    let container = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or(PersistError::InvalidMagic)?;
    let [a, b, c, d, block @ ..] = container else {
        return Err(PersistError::TruncatedFile {
            expected: MAGIC.len() + 4,
            actual: bytes.len(),
        });
    };
    let claimed = u32::from_le_bytes([*a, *b, *c, *d]) as usize;
    let limit = MAX_DECOMPRESSED_BYTES.min(block.len().saturating_mul(MAX_LZ4_RATIO));
    if claimed > limit {
        return Err(PersistError::DecompressedTooLarge { claimed, limit });
    }

    let decompressed = lz4_flex::block::decompress(block, claimed)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;
    if decompressed.len() != claimed {
        return Err(PersistError::DecompressError(format!(
            "expected {claimed} bytes, got {}",
            decompressed.len()
        )));
    }
    Ok(decompressed)
}
