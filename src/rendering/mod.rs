pub mod png;

pub use self::png::{encode_frame, encode_png, FrameSize};
