//! Owned rectangular `[frame][bin]` storage.
//!
//! A grid is a single contiguous buffer with a row stride. Allocation is
//! all-or-nothing, so a failed construction never leaves half-built rows
//! behind.

use core::ops::Index;
use core::slice::ChunksExact;

use crate::error::{Result, StftError};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    frames: usize,
    bins: usize,
}

impl<T: Copy> Grid<T> {
    /// Allocate a `frames x bins` grid filled with `value`.
    ///
    /// `what` names the buffer in the [`StftError::Allocation`] message.
    /// A grid needs at least one bin per frame; `bins == 0` is rejected.
    pub fn try_filled(frames: usize, bins: usize, value: T, what: &'static str) -> Result<Self> {
        if bins == 0 {
            return Err(StftError::InvalidParameter(format!(
                "{what} needs at least one bin per frame"
            )));
        }
        let len = frames
            .checked_mul(bins)
            .ok_or(StftError::Allocation(what))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| StftError::Allocation(what))?;
        data.resize(len, value);
        Ok(Self { data, frames, bins })
    }

    /// Build a grid of the same shape by mapping every cell.
    pub fn try_map<U: Copy>(&self, what: &'static str, f: impl Fn(T) -> U) -> Result<Grid<U>> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| StftError::Allocation(what))?;
        data.extend(self.data.iter().map(|&v| f(v)));
        Ok(Grid {
            data,
            frames: self.frames,
            bins: self.bins,
        })
    }
}

impl<T> Grid<T> {
    /// Number of rows.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Cells per row.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// `(frames, bins)`
    pub fn shape(&self) -> (usize, usize) {
        (self.frames, self.bins)
    }

    /// `true` when the grid has no frames.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell at `(frame, bin)`, or `None` when out of range.
    pub fn get(&self, frame: usize, bin: usize) -> Option<&T> {
        if frame < self.frames && bin < self.bins {
            self.data.get(frame * self.bins + bin)
        } else {
            None
        }
    }

    /// All bins of one frame.
    pub fn row(&self, frame: usize) -> Option<&[T]> {
        if frame >= self.frames {
            return None;
        }
        let start = frame * self.bins;
        Some(&self.data[start..start + self.bins])
    }

    /// Iterate frames in order.
    pub fn rows(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(self.bins)
    }

    pub(crate) fn rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.bins)
    }

    /// Row-major cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Take the row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy out as one `Vec` per frame.
    pub fn to_nested(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// Panics when out of range, like slice indexing.
    fn index(&self, (frame, bin): (usize, usize)) -> &T {
        assert!(
            frame < self.frames && bin < self.bins,
            "grid index ({frame}, {bin}) out of range for shape ({}, {})",
            self.frames,
            self.bins
        );
        &self.data[frame * self.bins + bin]
    }
}
