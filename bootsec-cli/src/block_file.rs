use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use block_dev::{BLOCK_SIZE, BlockDevice, BlockError};
use send_wrapper::SendWrapper;

#[derive(Debug)]
pub struct BlockFile {
    inner: SendWrapper<RefCell<File>>,
}

impl BlockFile {
    pub fn new(fd: File) -> Self {
        Self {
            inner: SendWrapper::new(RefCell::new(fd)),
        }
    }
}

impl BlockDevice for BlockFile {
    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> Result<(), BlockError> {
        let offset = block_id
            .checked_mul(BLOCK_SIZE)
            .and_then(|offset| u64::try_from(offset).ok())
            .ok_or(BlockError::OutOfDevice { block_id })?;

        let mut file = self.inner.borrow_mut();
        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.read_exact(buf))
            .map_err(|err| {
                log::error!("reading block {block_id}: {err}");
                match err.kind() {
                    io::ErrorKind::UnexpectedEof => BlockError::Incomplete { block_id },
                    _ => BlockError::Io { block_id },
                }
            })
    }
}
