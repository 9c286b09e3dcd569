//! Frame enumeration for batch STFT.
//!
//! Only full frames are produced. Samples past the last full frame are not
//! analysed; there is no zero-padded trailing frame.

use core::ops::Range;

use log::trace;

use crate::error::{Result, StftError};

/// `floor((input_len - window_len) / hop_len) + 1`, or `None` when the input
/// holds no full frame or a length is zero.
pub fn frame_count(input_len: usize, window_len: usize, hop_len: usize) -> Option<usize> {
    if window_len == 0 || hop_len == 0 || input_len < window_len {
        return None;
    }
    Some((input_len - window_len) / hop_len + 1)
}

/// Frame offsets of one signal under one window/hop pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    input_len: usize,
    window_len: usize,
    hop_len: usize,
    count: usize,
}

impl FrameLayout {
    pub fn new(input_len: usize, window_len: usize, hop_len: usize) -> Result<Self> {
        if window_len == 0 {
            return Err(StftError::InvalidWindowSize);
        }
        if hop_len == 0 {
            return Err(StftError::InvalidHopSize);
        }
        let count = frame_count(input_len, window_len, hop_len).ok_or(
            StftError::InputTooShort {
                input_len,
                window_len,
            },
        )?;
        let layout = Self {
            input_len,
            window_len,
            hop_len,
            count,
        };
        if layout.unused_tail() > 0 {
            trace!(
                "{} trailing samples after frame {} are not analysed",
                layout.unused_tail(),
                count - 1
            );
        }
        Ok(layout)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn hop_len(&self) -> usize {
        self.hop_len
    }

    /// Start sample of frame `index`.
    pub fn offset(&self, index: usize) -> usize {
        index * self.hop_len
    }

    /// Sample range of frame `index`, or `None` past the last frame.
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.count {
            return None;
        }
        let start = self.offset(index);
        Some(start..start + self.window_len)
    }

    /// Ranges of every frame, in order.
    pub fn ranges(&self) -> FrameRanges {
        FrameRanges {
            layout: *self,
            next: 0,
        }
    }

    /// Samples after the end of the last frame.
    pub fn unused_tail(&self) -> usize {
        self.input_len - (self.offset(self.count - 1) + self.window_len)
    }
}

/// Iterator returned by [`FrameLayout::ranges`].
#[derive(Clone, Debug)]
pub struct FrameRanges {
    layout: FrameLayout,
    next: usize,
}

impl Iterator for FrameRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.layout.range(self.next)?;
        self.next += 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FrameRanges {}
