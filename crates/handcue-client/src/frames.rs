//! Frame sources.
//!
//! Camera capture and landmark detection happen outside this crate. A
//! detector process writes one JSON record per frame and `NdjsonFrames`
//! turns those records into hand poses.

use crate::pose::{HandLandmarks, HandPose};
use handcue_core::Point;
use serde::Deserialize;
use std::io::BufRead;

/// One sample from the detector.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Hand(HandPose),
    NoHand,
    /// The source is exhausted.
    End,
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// This frame is lost; the next one may be fine.
    #[error("frame unavailable: {0}")]
    Transient(String),
    /// The source cannot produce more frames.
    #[error("frame source failed: {0}")]
    Fatal(String),
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, FrameError>;
}

/// One line of detector output.
///
/// Either raw landmarks (`{"landmarks": [[x, y], ...]}`), a pose the detector
/// already derived (`{"fist": true, "tip": [320, 90]}`), or anything without
/// those keys (`{}`, `null`, `{"hand": null}`) for "no hand in view".
#[derive(Debug, Default, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    landmarks: Option<HandLandmarks>,
    #[serde(default)]
    fist: Option<bool>,
    #[serde(default)]
    tip: Option<[f64; 2]>,
}

/// Newline-delimited JSON frames from any reader.
pub struct NdjsonFrames<R> {
    reader: R,
    frame_width: i32,
    frame_height: i32,
    line: String,
}

impl<R: BufRead> NdjsonFrames<R> {
    /// `frame_width`/`frame_height` scale normalized landmarks to pixels.
    pub fn new(reader: R, frame_width: i32, frame_height: i32) -> Self {
        Self {
            reader,
            frame_width,
            frame_height,
            line: String::new(),
        }
    }

    fn decode(&self, text: &str) -> Result<Frame, FrameError> {
        let record: Option<FrameRecord> =
            serde_json::from_str(text).map_err(|e| FrameError::Transient(e.to_string()))?;
        let Some(record) = record else {
            return Ok(Frame::NoHand);
        };

        if let Some(landmarks) = record.landmarks {
            return Ok(Frame::Hand(
                landmarks.to_pose(self.frame_width, self.frame_height),
            ));
        }
        if record.fist.is_none() && record.tip.is_none() {
            return Ok(Frame::NoHand);
        }
        Ok(Frame::Hand(HandPose {
            fist: record.fist.unwrap_or(false),
            fingertip: record.tip.map(|[x, y]| Point::new(x as i32, y as i32)),
        }))
    }
}

impl<R: BufRead> FrameSource for NdjsonFrames<R> {
    fn next_frame(&mut self) -> Result<Frame, FrameError> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| FrameError::Fatal(e.to_string()))?;
            if read == 0 {
                return Ok(Frame::End);
            }
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            return self.decode(text);
        }
    }
}
