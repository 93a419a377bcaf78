use libdeflater::Decompressor;

/// Inflate a zlib (HDF5 deflate filter) compressed chunk into a buffer of `size` bytes.
pub fn decompress(compressed: &[u8], size: usize) -> Result<Vec<u8>, anyhow::Error> {
    let mut out = vec![0_u8; size];
    let mut de = Decompressor::new();

    let n = de
        .zlib_decompress(compressed, &mut out)
        .map_err(|e| anyhow!("Could not decompress chunk: {:?}", e))?;

    ensure!(
        n == size,
        "Decompressed chunk has {} bytes, expected {}",
        n,
        size
    );

    Ok(out)
}
