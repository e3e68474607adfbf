use std::fs::File;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tempfile::NamedTempFile;

use super::Result;

/// Streams frames into a GIF written beside the final output path.
///
/// The most recent frame stays pending so later holds can extend its delay.
/// Nothing appears at the output path until [`FrameRecorder::finish`]; a
/// recorder dropped early removes its temporary file.
pub struct FrameRecorder {
    encoder: Option<GifEncoder<File>>,
    output: NamedTempFile,
    pending: Option<(RgbaImage, u32)>,
    frame_ms: u32,
    written: usize,
}

impl FrameRecorder {
    pub fn create(path: &Path, frame_ms: u32, speed: i32) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let output = tempfile::Builder::new()
            .prefix(".bootgif-")
            .suffix(".gif.part")
            .tempfile_in(dir)?;
        let mut encoder = GifEncoder::new_with_speed(output.reopen()?, speed.clamp(1, 30));
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder: Some(encoder),
            output,
            pending: None,
            frame_ms: frame_ms.max(10),
            written: 0,
        })
    }

    /// Queues `image` for `ticks` ticks. Zero ticks records nothing; an image
    /// identical to the pending one only extends its hold.
    pub fn push(&mut self, image: RgbaImage, ticks: u32) -> Result<()> {
        if ticks == 0 {
            return Ok(());
        }
        if let Some((pending, held)) = self.pending.as_mut() {
            if *pending == image {
                *held = held.saturating_add(ticks);
                return Ok(());
            }
        }
        if let Some((previous, held)) = self.pending.replace((image, ticks)) {
            self.encode(previous, held)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_none() && self.written == 0
    }

    fn encode(&mut self, image: RgbaImage, ticks: u32) -> Result<()> {
        let delay = Delay::from_numer_denom_ms(ticks.saturating_mul(self.frame_ms), 1);
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
            self.written += 1;
        }
        Ok(())
    }

    /// Flushes the pending frame and moves the finished GIF to `path`.
    /// Returns the number of distinct frames written.
    pub fn finish(mut self, path: &Path) -> Result<usize> {
        if let Some((image, ticks)) = self.pending.take() {
            self.encode(image, ticks)?;
        }
        // The GIF trailer is written when the encoder is dropped.
        drop(self.encoder.take());
        self.output.as_file().sync_all()?;
        let written = self.written;
        self.output.persist(path).map_err(|e| e.error)?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba};
    use std::io::BufReader;

    fn solid(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([value, value, value, 255]))
    }

    fn decode(path: &Path) -> Vec<Frame> {
        let file = BufReader::new(File::open(path).unwrap());
        GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn test_identical_frames_merge_into_one_hold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");
        let mut recorder = FrameRecorder::create(&path, 50, 10).unwrap();
        recorder.push(solid(0), 2).unwrap();
        recorder.push(solid(0), 3).unwrap();
        recorder.push(solid(255), 1).unwrap();
        assert_eq!(recorder.finish(&path).unwrap(), 2);

        let frames = decode(&path);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].delay().numer_denom_ms(), (250, 1));
        assert_eq!(frames[1].delay().numer_denom_ms(), (50, 1));
    }

    #[test]
    fn test_zero_ticks_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");
        let mut recorder = FrameRecorder::create(&path, 50, 10).unwrap();
        recorder.push(solid(0), 0).unwrap();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_dropped_recorder_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");
        {
            let mut recorder = FrameRecorder::create(&path, 50, 10).unwrap();
            recorder.push(solid(0), 1).unwrap();
            recorder.push(solid(9), 1).unwrap();
        }
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
