//! Window output: turns decoded RGB into a frame and keeps presenting it
//! until the window is closed.

use hif::HifImage;
use log::{debug, info};
use minifb::{Window, WindowOptions};

use crate::error::ViewerError;

const TARGET_FPS: usize = 60;

/// A full window frame, one `0x00RRGGBB` word per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub words: Vec<u32>,
}

impl Frame {
    /// Packs every RGB triple of `image` into an opaque frame word.
    ///
    /// Pixel `(x, y)` comes from byte offset `(y * width + x) * 3`.
    pub fn from_image(image: &HifImage) -> Self {
        let words = image
            .pixels
            .chunks_exact(3)
            .map(|rgb| pack_rgb(rgb[0], rgb[1], rgb[2]))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            words,
        }
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.words[y * self.width + x]
    }
}

#[inline]
fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Something a frame can be shown on.
pub trait Surface {
    /// False once the user asked to close.
    fn is_open(&self) -> bool;

    /// Shows `frame` and processes pending window events.
    fn present(&mut self, frame: &Frame) -> Result<(), ViewerError>;
}

/// A native window sized exactly to the image.
pub struct WindowSurface {
    window: Window,
}

impl WindowSurface {
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self, ViewerError> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        window.set_target_fps(TARGET_FPS);
        info!("opened {width}x{height} window");
        Ok(Self { window })
    }
}

impl Surface for WindowSurface {
    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn present(&mut self, frame: &Frame) -> Result<(), ViewerError> {
        self.window
            .update_with_buffer(&frame.words, frame.width, frame.height)?;
        Ok(())
    }
}

/// Presents `frame` until the surface reports a close request.
///
/// Returns the number of frames shown.
pub fn run_event_loop<S: Surface>(surface: &mut S, frame: &Frame) -> Result<u64, ViewerError> {
    let mut presented = 0u64;
    while surface.is_open() {
        surface.present(frame)?;
        presented += 1;
    }
    debug!("close requested after {presented} frames");
    Ok(presented)
}
