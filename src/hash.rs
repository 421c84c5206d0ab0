//! One-shot SHAKE256 helper over multi-part input.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

/// Absorbs every part in order and squeezes out.len() bytes.
pub(crate) fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    let mut xof = hasher.finalize_xof();
    xof.read(out);
}
