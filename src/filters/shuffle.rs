/// Reverse the HDF5 shuffle filter.
///
/// The shuffle filter stores the first byte of every element, then the second byte of every
/// element, and so on for `wsz` (the element size) bytes:
///
/// https://support.hdfgroup.org/ftp/HDF5//documentation/doc1.6/TechNotes/shuffling-algorithm-report.pdf
///
/// For compound datasets the element is the whole record. Trailing bytes that do not make up a
/// full element are left in place, as HDF5 does.
pub fn unshuffle(src: &[u8], wsz: usize) -> Vec<u8> {
    if wsz <= 1 {
        return src.to_vec();
    }

    let n = src.len() / wsz;
    let mut dest = vec![0_u8; src.len()];

    for i in 0..wsz {
        for j in 0..n {
            dest[j * wsz + i] = src[i * n + j];
        }
    }

    let tail = n * wsz;
    dest[tail..].copy_from_slice(&src[tail..]);

    dest
}
