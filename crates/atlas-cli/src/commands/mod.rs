pub mod dispatch;
pub mod log_count;
pub mod log_diff;
pub mod log_split;
pub mod mr_upload;
