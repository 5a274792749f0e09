pub mod disk_parser;
pub mod diskpart;
pub mod layout;
pub mod vhd;

pub use disk_parser::load_disk_info;
pub use diskpart::{DiskPart, ScriptRunner};
pub use vhd::CreateRequest;
