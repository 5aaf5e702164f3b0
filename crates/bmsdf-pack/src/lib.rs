//! bmsdf Pack - Texture page packing
//!
//! Places variable sized rectangles onto fixed size pages using the
//! MaxRects algorithm. Input order is placement order, so the same input
//! always produces the same layout.

mod maxrects;
mod packer;

pub use maxrects::{MaxRectsBin, Rect};
pub use packer::{AtlasPacker, PackResult, PackedRect, PackerConfig};

/// Packing error types
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("Page size {width}x{height} leaves no room inside a {border}px border")]
    InvalidPage { width: u32, height: u32, border: u32 },

    #[error("Rect {width}x{height} does not fit on an empty {page_width}x{page_height} page")]
    TooLarge {
        width: u32,
        height: u32,
        page_width: u32,
        page_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
