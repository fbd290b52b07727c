mod block_file;
mod cli;

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::sync::Arc;

use block_dev::{BLOCK_SIZE, BlockDevice};
use bootsec::{ConstraintViolation, Fat32Vbr, Mbr, Record};
use clap::Parser;
use typed_bytesize::ByteSizeIec;

pub use self::{
    block_file::BlockFile,
    cli::{Cli, RecordKind},
};

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let fd = File::open(&cli.source)?;
    log::info!(
        "source={:?} size={}",
        cli.source,
        ByteSizeIec(fd.metadata()?.len())
    );
    let block_dev: Arc<dyn BlockDevice> = Arc::new(BlockFile::new(fd));

    let violations = match cli.record {
        RecordKind::Mbr => {
            let mbr = Mbr::new(&read_sector(&block_dev, 0)?).map_err(invalid_data)?;
            if !mbr.is_valid_signature() {
                log::warn!("boot signature is {:#06X}", mbr.signature());
            }
            dump(&mbr)
        }
        RecordKind::Vbr { sector } => {
            let vbr = Fat32Vbr::new(&read_sector(&block_dev, sector)?).map_err(invalid_data)?;
            dump(&vbr)
        }
    };

    if cli.strict && !violations.is_empty() {
        return Err(invalid_data(format!(
            "{} field(s) break their constraints",
            violations.len()
        )));
    }

    Ok(())
}

fn read_sector(dev: &Arc<dyn BlockDevice>, block_id: usize) -> io::Result<[u8; BLOCK_SIZE]> {
    let mut sector = [0; BLOCK_SIZE];
    dev.read_block(block_id, &mut sector).map_err(io::Error::other)?;
    Ok(sector)
}

/// Prints the record, then whatever its constraints reject.
fn dump(record: &(impl Record + Display)) -> Vec<ConstraintViolation> {
    print!("{record}");

    let violations = record.check();
    if !violations.is_empty() {
        println!("constraint violations:");
    }
    for violation in &violations {
        log::warn!("{violation}");
        println!("  {violation}");
    }
    violations
}

fn invalid_data(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
