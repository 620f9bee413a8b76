mod hash;

pub use hash::{compute_file_hash, compute_hash};

/// Current local time, formatted for log-file lines
pub fn now_local() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
