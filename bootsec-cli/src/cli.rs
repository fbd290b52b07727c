use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Dump the boot records of a disk or disk image")]
pub struct Cli {
    /// Disk image or block device
    pub source: PathBuf,

    /// Fail when a decoded field breaks its constraint
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub record: RecordKind,
}

#[derive(Subcommand)]
pub enum RecordKind {
    /// Master Boot Record in the first block
    Mbr,

    /// FAT32 volume boot record
    Vbr {
        /// Block holding the boot sector
        #[arg(long, short, default_value_t = 0)]
        sector: usize,
    },
}
