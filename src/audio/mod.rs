pub mod error;
pub mod preview;
pub mod util;

pub use preview::PreviewPlayer;
