//! Fast non-cryptographic hashing for change detection.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// 64-bit FxHash of `data`.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_detects_changes() {
        let a = compute("[site]\ntitle = \"Ada\"");
        assert_eq!(a, compute("[site]\ntitle = \"Ada\""));
        assert_ne!(a, compute("[site]\ntitle = \"Bob\""));
    }
}
