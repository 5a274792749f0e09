use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vdpm", version, about = "Virtual Disk Partition Manager (DiskPart)")]
pub struct Cli {
    /// DiskPart executable (defaults to $DISKPART_BIN, then `diskpart`)
    #[arg(long, global = true, value_name = "PATH")]
    pub diskpart: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a VHD with custom NTFS partitions
    Create {
        /// Where to save the .vhd file
        #[arg(long, short)]
        file: PathBuf,
        /// Total VHD size in GB (e.g. 10)
        #[arg(long, short)]
        size: String,
        /// Partition sizes in GB, comma-separated (e.g. 2,3,5)
        #[arg(long, short)]
        partitions: String,
    },
    /// Attach (mount) an existing VHD
    Attach { file: PathBuf },
    /// Detach (unmount) a VHD
    Detach { file: PathBuf },
    /// Show the partitions of disk 0
    Info {
        /// Map width in terminal columns
        #[arg(long)]
        width: Option<u32>,
        /// Map height in terminal rows
        #[arg(long)]
        height: Option<u32>,
    },
}
