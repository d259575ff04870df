//! Command implementations for OxiIdx CLI.

pub mod check;
pub mod columns;
pub mod compress;
pub mod decompress;
pub mod diff;

pub use check::cmd_check;
pub use columns::cmd_columns;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use diff::cmd_diff;
