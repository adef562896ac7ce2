pub mod global_context;
pub mod header;

pub use header::Header;
