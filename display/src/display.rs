use log::debug;
use sdl2::pixels::PixelFormatEnum;
use thiserror::Error;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture
const RGB: usize = 3;

/// SDL2 reports most failures as bare strings, so they are flattened into one variant.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("SDL2 error: {0}")]
    Sdl(String),
}

fn sdl_error(e: impl ToString) -> DisplayError {
    DisplayError::Sdl(e.to_string())
}

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bits.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(sdl_error)?;
        let (width, height) = (DISPLAY_WIDTH as u32 * scale, DISPLAY_HEIGHT as u32 * scale);
        let window = video_subsystem
            .window("CHIP-8", width, height)
            .position_centered()
            .build()
            .map_err(sdl_error)?;
        let canvas = window.into_canvas().build().map_err(sdl_error)?;
        debug!("opened {}x{} window", width, height);

        let mut display = Display { canvas };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer as the rows of an SDL2 RGB24 texture.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&pixel| [pixel * 255; RGB])
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(sdl_error)?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_bytes = DISPLAY_WIDTH * RGB;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out to `pitch`
                for (row, line) in pixels.chunks_exact(row_bytes).enumerate() {
                    let offset = row * pitch;
                    buffer[offset..offset + row_bytes].copy_from_slice(line);
                }
            })
            .map_err(sdl_error)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(sdl_error)?;
        self.canvas.present();
        Ok(())
    }
}
