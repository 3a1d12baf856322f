/// Frame indices, canvas sizes, and colors.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
