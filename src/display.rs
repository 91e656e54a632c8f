use smart_leds::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::color::Color;
use crate::frame::Frame;
use crate::frame::TickUpdate;

/// Where rendered colors end up.
///
/// Changes are buffered until [`DisplaySink::commit`].
pub trait DisplaySink {
    fn set_position(&mut self, position: usize, color: Color);

    fn clear_all(&mut self);

    fn commit(&mut self) -> Result<(), crate::error::Error>;

    /// Blanks the ring and gives up the hardware.
    fn release(&mut self) -> Result<(), crate::error::Error>;

    fn show_frame(&mut self, frame: &Frame) -> Result<(), crate::error::Error> {
        self.clear_all();
        for (position, color) in frame.lit() {
            self.set_position(position, color);
        }
        self.commit()
    }

    fn show_tick(&mut self, update: &TickUpdate) -> Result<(), crate::error::Error> {
        for pixel in update.pixels() {
            self.set_position(pixel.position, pixel.color);
        }
        self.commit()
    }
}

/// Pixel buffer for a ring of LEDs in front of a [`SmartLedsWrite`] writer.
///
/// Brightness is applied when writing. The ring is blanked on drop unless it
/// has been released already.
pub struct RingDisplay<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
    crate::error::Error: From<<W as SmartLedsWrite>::Error>,
{
    writer: W,
    buffer: Vec<RGB8>,
    brightness: u8,
    released: bool,
}

impl<W> RingDisplay<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
    crate::error::Error: From<<W as SmartLedsWrite>::Error>,
{
    pub fn new(writer: W, size: usize, brightness: u8) -> Self {
        Self {
            writer,
            buffer: vec![RGB8::default(); size],
            brightness,
            released: false,
        }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn write_buffer(&mut self) -> Result<(), crate::error::Error> {
        self.writer
            .write(smart_leds::brightness(
                self.buffer.iter().copied(),
                self.brightness,
            ))
            .map_err(crate::error::Error::from)
    }
}

impl<W> DisplaySink for RingDisplay<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
    crate::error::Error: From<<W as SmartLedsWrite>::Error>,
{
    fn set_position(&mut self, position: usize, color: Color) {
        if let Some(pixel) = self.buffer.get_mut(position) {
            *pixel = color;
        } else {
            tracing::warn!(position, size = self.buffer.len(), "Position outside ring");
        }
    }

    fn clear_all(&mut self) {
        self.buffer.fill(RGB8::default());
    }

    fn commit(&mut self) -> Result<(), crate::error::Error> {
        self.write_buffer()
    }

    fn release(&mut self) -> Result<(), crate::error::Error> {
        self.clear_all();
        self.write_buffer()?;
        self.released = true;
        tracing::info!("Display released");
        Ok(())
    }
}

impl<W> Drop for RingDisplay<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
    crate::error::Error: From<<W as SmartLedsWrite>::Error>,
{
    fn drop(&mut self) {
        if !self.released {
            if let Err(error) = self.release() {
                tracing::error!(?error, "Failed to blank display on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::frame::Pixel;

    /// Records every write.
    #[derive(Default)]
    pub struct Recorder {
        pub writes: Vec<Vec<RGB8>>,
    }

    impl SmartLedsWrite for Recorder {
        type Error = std::convert::Infallible;
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.writes
                .push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    #[test]
    fn test_show_frame_replaces_everything() {
        let mut display = RingDisplay::new(Recorder::default(), 4, 255);
        display.set_position(1, color::BLUE);

        let mut frame = Frame::new(4);
        frame.set(2, color::RED);
        display.show_frame(&frame).unwrap();

        assert_eq!(
            display.writer().writes.last().unwrap(),
            &vec![color::OFF, color::OFF, color::RED, color::OFF]
        );
    }

    #[test]
    fn test_show_tick_patches() {
        let mut display = RingDisplay::new(Recorder::default(), 4, 255);
        let mut frame = Frame::new(4);
        frame.set(0, color::ORANGE);
        frame.set(1, color::RED);
        display.show_frame(&frame).unwrap();

        let update = TickUpdate {
            second: Pixel {
                position: 2,
                color: color::RED,
                rule: Some("second"),
            },
            trail: Pixel {
                position: 1,
                color: color::OFF,
                rule: None,
            },
            stale: None,
        };
        display.show_tick(&update).unwrap();

        assert_eq!(
            display.writer().writes.last().unwrap(),
            &vec![color::ORANGE, color::OFF, color::RED, color::OFF]
        );
    }

    #[test]
    fn test_brightness_is_applied_on_write() {
        let mut display = RingDisplay::new(Recorder::default(), 2, 0);
        display.set_position(0, color::BRIGHT_WHITE);
        display.commit().unwrap();

        assert_eq!(
            display.writer().writes.last().unwrap(),
            &vec![color::OFF, color::OFF]
        );
    }

    #[test]
    fn test_out_of_range_position_is_ignored() {
        let mut display = RingDisplay::new(Recorder::default(), 2, 255);
        display.set_position(5, color::RED);
        display.commit().unwrap();

        assert_eq!(
            display.writer().writes.last().unwrap(),
            &vec![color::OFF, color::OFF]
        );
    }

    #[test]
    fn test_release_blanks() {
        let mut display = RingDisplay::new(Recorder::default(), 2, 255);
        display.set_position(0, color::RED);
        display.commit().unwrap();
        display.release().unwrap();

        assert_eq!(display.writer().writes.len(), 2);
        assert_eq!(
            display.writer().writes.last().unwrap(),
            &vec![color::OFF, color::OFF]
        );
    }
}
