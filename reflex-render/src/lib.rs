pub mod render;

pub use render::{FrameStats, SkiaRenderer, ViewRenderer};
