use std::{
    fs::{File, OpenOptions},
    io::{self, Read},
    ops::Deref,
    path::Path,
};

use memmap2::{Mmap, MmapMut};

/// Input bytes, either mapped from a file or read from stdin.
#[derive(Debug)]
pub enum InputBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for InputBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBuffer::Mapped(mmap) => &mmap[..],
            InputBuffer::Owned(buffer) => buffer.as_slice(),
        }
    }
}

pub fn write_file<P: AsRef<Path>>(path: P, buffer: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    if buffer.is_empty() {
        return Ok(());
    }
    file.set_len(buffer.len() as u64)?;

    let mut mmap = unsafe { MmapMut::map_mut(&file)? };
    mmap[..].copy_from_slice(buffer);
    mmap.flush()
}

pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<InputBuffer> {
    let file = File::open(path)?;

    Ok(InputBuffer::Mapped(unsafe { Mmap::map(&file)? }))
}

pub fn read_stdin() -> io::Result<InputBuffer> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(InputBuffer::Owned(buffer))
}
