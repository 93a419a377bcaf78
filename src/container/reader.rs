//! Reading well records straight from the file using a [`Layout`].

use std::io::{Read, Seek, SeekFrom};

use byteorder::ByteOrder;
use ndarray::Array2;

use super::layout::{Layout, Member, Storage};
use crate::filters;

pub struct WellStatesReader<'a, F> {
    layout: &'a Layout,
    fd: F,
}

fn read_at<F>(fd: &mut F, addr: u64, dst: &mut [u8]) -> Result<(), anyhow::Error>
where
    F: Read + Seek,
{
    fd.seek(SeekFrom::Start(addr))?;
    fd.read_exact(dst)?;
    Ok(())
}

/// Undo the filters of a stored chunk, giving `chunk_sz` bytes of records.
pub(crate) fn decode_chunk(
    chunk: Vec<u8>,
    chunk_sz: usize,
    record_size: usize,
    gzipped: bool,
    shuffled: bool,
) -> Result<Vec<u8>, anyhow::Error> {
    let cache = if gzipped {
        filters::gzip::decompress(&chunk, chunk_sz)?
    } else {
        chunk
    };

    let cache = if shuffled {
        filters::shuffle::unshuffle(&cache, record_size)
    } else {
        cache
    };

    ensure!(
        cache.len() == chunk_sz,
        "chunk has {} bytes, expected {}",
        cache.len(),
        chunk_sz
    );

    Ok(cache)
}

/// Decode a fixed-size float member from `n` consecutive records into an `n x width` table,
/// with the floats stored in byte order `B`.
pub fn decode_member<B>(
    records: &[u8],
    record_size: usize,
    member: &Member,
) -> Result<Array2<f64>, anyhow::Error>
where
    B: ByteOrder,
{
    let width = member
        .width
        .ok_or_else(|| anyhow!("{}: variable-length member in raw records", member.name))?;
    let n = records.len() / record_size;

    Ok(Array2::from_shape_fn((n, width), |(i, j)| {
        let at = i * record_size + member.offset + j * member.fsize;
        let b = &records[at..at + member.fsize];

        match member.fsize {
            4 => B::read_f32(b) as f64,
            _ => B::read_f64(b),
        }
    }))
}

impl<'a, F> WellStatesReader<'a, F>
where
    F: Read + Seek,
{
    pub fn new(layout: &'a Layout, fd: F) -> WellStatesReader<'a, F> {
        WellStatesReader { layout, fd }
    }

    /// Raw records of well `w`, one per time step.
    pub fn read_well(&mut self, w: usize) -> Result<Vec<u8>, anyhow::Error> {
        let layout = self.layout;
        let rsz = layout.record_size;
        let steps = layout.num_steps();

        ensure!(
            w < layout.num_wells(),
            "well {} out of range ({} wells)",
            w,
            layout.num_wells()
        );

        let mut buf = vec![0_u8; steps * rsz];

        match &layout.storage {
            Storage::Contiguous { addr } => {
                let start = addr + (w * steps * rsz) as u64;
                read_at(&mut self.fd, start, &mut buf)?;
            }

            Storage::Chunked {
                chunk_shape,
                chunks,
            } => {
                let [cw, cn] = *chunk_shape;
                let chunk_sz = (cw * cn) as usize * rsz;
                let w = w as u64;

                for c in chunks
                    .iter()
                    .filter(|c| c.offset[0] <= w && w < c.offset[0] + cw)
                {
                    let mut stored = vec![0_u8; c.size as usize];
                    read_at(&mut self.fd, c.addr, &mut stored)?;

                    let records = decode_chunk(
                        stored,
                        chunk_sz,
                        rsz,
                        layout.gzip.is_some(),
                        layout.shuffle,
                    )?;

                    // edge chunks are stored full size, only copy the part inside the dataset.
                    let row = (w - c.offset[0]) as usize;
                    let n0 = c.offset[1] as usize;
                    let n = std::cmp::min(cn as usize, steps - n0);

                    let src = row * cn as usize * rsz;
                    buf[n0 * rsz..(n0 + n) * rsz].copy_from_slice(&records[src..src + n * rsz]);
                }
            }
        }

        Ok(buf)
    }
}
