//! Value types shared by the format adapters and the entry writer.
//!
//! - [`StrippedPath`]: an entry name after leading-component stripping
//! - [`DestDir`]: the destination root entries are joined beneath
//! - [`EntryKind`]: the decoded kind of one archive entry

pub mod dest_dir;
pub mod entry_kind;
pub mod stripped_path;

pub use dest_dir::DestDir;
pub use entry_kind::EntryKind;
pub use stripped_path::StrippedPath;
pub use stripped_path::strip_components;
