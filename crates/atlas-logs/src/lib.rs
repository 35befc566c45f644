//! # atlas-logs
//!
//! Atlas Checks flag logs: newline-delimited GeoJSON feature collections,
//! one flag per line, in `.log` or gzip-compressed `.log.gz` files.
//!
//! - [`reader`]: read a file or a folder of logs into [`FlagRecord`]s
//! - [`group`]: partition flags by check
//! - [`count`], [`split`], [`diff`]: the log utilities behind the
//!   `log-count`, `log-split`, and `log-diff` commands
//!
//! [`FlagRecord`]: atlas_core::FlagRecord

pub mod count;
pub mod diff;
pub mod group;
pub mod reader;
pub mod split;

mod error;

pub use count::{FlagCounts, count_flags};
pub use diff::{DiffSummary, FlagDiff, diff_flags, write_diff};
pub use error::LogError;
pub use group::{FlagsByCheck, group_by_check};
pub use reader::{is_log_file, list_log_files, read_log_dir, read_log_file, read_path};
pub use split::{SplitFile, is_safe_check_name, split_by_check};
