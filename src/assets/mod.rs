/// Decoding into premultiplied RGBA8.
pub mod decode;
/// Where source images come from.
pub mod source;
