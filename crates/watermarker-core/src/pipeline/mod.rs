//! Batch pipeline components.
//!
//! - **discovery**: Find `.png`/`.jpg` files in a folder
//! - **codec**: Decode by content, encode by stage rules
//! - **resize**: Fit images onto a target-size canvas
//! - **composite**: Alpha scaling and masked blending
//! - **font**: Locate and load the watermark font
//! - **text**: Render and apply the text watermark
//! - **overlay**: Apply the image watermark
//! - **driver**: Run the passes in order

pub mod codec;
pub mod composite;
pub mod discovery;
pub mod driver;
pub mod font;
pub mod overlay;
pub mod resize;
pub mod text;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use driver::{BatchDriver, BatchObserver};
pub use overlay::ImageWatermark;
pub use resize::{fit_dimensions, resize};
pub use text::TextWatermark;
