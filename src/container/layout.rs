//! Index of the compound `WELL_STATES` dataset.
//!
//! The dataset is indexed once through the HDF5 library (shape, compound members, storage
//! addresses, filters and byte order). Records with fixed-size members are read afterwards
//! with only the file and this index, see [`super::reader`]. Variable-length members live on
//! the HDF5 heap and are read through the library, see [`super::varlen`].

use hdf5::datatype::ByteOrder;
use hdf5::types::{FloatSize, TypeDescriptor};

/// A float, fixed-size float array or variable-length float array member of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,

    /// Byte offset within the record.
    pub offset: usize,

    /// Number of floats, `None` for variable-length arrays.
    pub width: Option<usize>,

    /// Size of each float in bytes (4 or 8).
    pub fsize: usize,
}

impl Member {
    pub fn is_varlen(&self) -> bool {
        self.width.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Offset of the chunk in dataset coordinates (well, time step).
    pub offset: [u64; 2],
    pub addr: u64,

    /// Stored (possibly compressed) size.
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Contiguous { addr: u64 },
    Chunked { chunk_shape: [u64; 2], chunks: Vec<Chunk> },
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// Number of wells, number of time steps.
    pub shape: [u64; 2],
    pub record_size: usize,
    pub members: Vec<Member>,
    pub storage: Storage,
    pub shuffle: bool,
    pub gzip: Option<u8>,
    pub order: ByteOrder,
}

fn float_size(sz: &FloatSize) -> Result<usize, anyhow::Error> {
    match sz {
        FloatSize::U4 => Ok(4),
        FloatSize::U8 => Ok(8),
        #[allow(unreachable_patterns)]
        _ => bail!("Unsupported float size: {:?}", sz),
    }
}

/// Flatten a (possibly nested) fixed float array to its float size and element count.
fn float_array(ty: &TypeDescriptor) -> Result<(usize, usize), anyhow::Error> {
    match ty {
        TypeDescriptor::Float(sz) => Ok((float_size(sz)?, 1)),
        TypeDescriptor::FixedArray(inner, n) => {
            let (fsize, m) = float_array(inner)?;
            Ok((fsize, m * n))
        }
        ty => Err(anyhow!("Not a float type: {:?}", ty)),
    }
}

/// Float size and width of a member type, no width for variable-length float arrays.
fn float_member(ty: &TypeDescriptor) -> Result<(usize, Option<usize>), anyhow::Error> {
    match ty {
        TypeDescriptor::VarLenArray(inner) => match inner.as_ref() {
            TypeDescriptor::Float(sz) => Ok((float_size(sz)?, None)),
            ty => Err(anyhow!("Not a variable-length float array: {:?}", ty)),
        },
        ty => float_array(ty).map(|(fsize, width)| (fsize, Some(width))),
    }
}

impl Layout {
    pub fn index(ds: &hdf5::Dataset) -> Result<Layout, anyhow::Error> {
        use hdf5::filters::Filter;

        ensure!(
            ds.ndim() == 2,
            "{}: expected a (wells, time steps) dataset, got rank {}",
            ds.name(),
            ds.ndim()
        );

        let mut shuffle = false;
        let mut gzip = None;

        for f in ds.filters() {
            match f {
                Filter::Shuffle => {
                    ensure!(
                        gzip.is_none(),
                        "{}: shuffle after deflate is not supported",
                        ds.name()
                    );
                    shuffle = true
                }
                Filter::Deflate(z) => gzip = Some(z),
                f => bail!("{}: Unsupported filter: {:?}", ds.name(), f),
            }
        }

        let shape = ds.shape();
        let shape = [shape[0] as u64, shape[1] as u64];

        let dtype = ds.dtype()?;
        let order = dtype.byte_order();

        let (record_size, members) = match dtype.to_descriptor()? {
            TypeDescriptor::Compound(ct) => {
                let members = ct
                    .fields
                    .iter()
                    .filter_map(|f| match float_member(&f.ty) {
                        Ok((fsize, width)) => Some(Member {
                            name: f.name.clone(),
                            offset: f.offset,
                            width,
                            fsize,
                        }),
                        Err(e) => {
                            debug!("{}: skipping member {}: {}", ds.name(), f.name, e);
                            None
                        }
                    })
                    .collect::<Vec<_>>();

                (ct.size, members)
            }
            ty => bail!("{}: expected a compound type, got: {:?}", ds.name(), ty),
        };

        let storage = match (ds.is_chunked(), ds.offset()) {
            (false, Some(addr)) => Storage::Contiguous { addr },

            (true, None) => {
                let chunk_shape = ds
                    .chunk()
                    .ok_or_else(|| anyhow!("{}: missing chunk shape", ds.name()))?;
                let chunk_shape = [chunk_shape[0] as u64, chunk_shape[1] as u64];

                // One pass over the chunk index. Looking chunks up one by one
                // (`chunk_info(i)`) walks the index again for every chunk.
                let mut chunks = Vec::with_capacity(ds.num_chunks().unwrap_or(0));
                let mut masked = 0;

                ds.chunks_visit(|c: hdf5::dataset::ChunkInfoRef| {
                    if c.filter_mask != 0 {
                        masked += 1;
                    }

                    chunks.push(Chunk {
                        offset: [c.offset[0], c.offset[1]],
                        addr: c.addr,
                        size: c.size,
                    });

                    0
                })?;

                ensure!(
                    masked == 0,
                    "{}: {} chunks have a filter mask different from the dataset",
                    ds.name(),
                    masked
                );

                let expected_chunks = shape
                    .iter()
                    .zip(&chunk_shape)
                    .map(|(s, c)| (s + (c - 1)) / c)
                    .product::<u64>() as usize;

                ensure!(
                    chunks.len() == expected_chunks,
                    "{}: unexpected number of chunks (chunks: {} != {} (expected), shape: {:?}, chunk shape: {:?})",
                    ds.name(),
                    chunks.len(),
                    expected_chunks,
                    shape,
                    chunk_shape
                );

                Storage::Chunked {
                    chunk_shape,
                    chunks,
                }
            }

            _ => bail!(
                "{}: Unsupported data layout (chunked: {}, offset: {:?})",
                ds.name(),
                ds.is_chunked(),
                ds.offset()
            ),
        };

        debug!(
            "{}: shape: {:?}, record size: {}, members: {:?}, storage: {}, shuffle: {}, gzip: {:?}, order: {:?}",
            ds.name(),
            shape,
            record_size,
            members.iter().map(|m| &m.name).collect::<Vec<_>>(),
            match &storage {
                Storage::Contiguous { .. } => "contiguous",
                Storage::Chunked { .. } => "chunked",
            },
            shuffle,
            gzip,
            order
        );

        Ok(Layout {
            shape,
            record_size,
            members,
            storage,
            shuffle,
            gzip,
            order,
        })
    }

    pub fn num_wells(&self) -> usize {
        self.shape[0] as usize
    }

    pub fn num_steps(&self) -> usize {
        self.shape[1] as usize
    }

    pub fn member(&self, name: &str) -> Result<&Member, anyhow::Error> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| anyhow!("WELL_STATES: missing float member {}", name))
    }

    /// Whether the raw records are big-endian. Only little- and big-endian floats can be
    /// decoded from the file directly.
    pub fn is_big_endian(&self) -> Result<bool, anyhow::Error> {
        match self.order {
            ByteOrder::LittleEndian => Ok(false),
            ByteOrder::BigEndian => Ok(true),
            o => bail!("WELL_STATES: unsupported byte order: {:?}", o),
        }
    }
}
