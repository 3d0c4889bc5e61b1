use std::ops::Index;

use serde::{Serialize, Deserialize};

use crate::math::Vec3;
use super::streamline::{SmoothParams, Streamline};

/// An ordered collection of streamlines analyzed and filtered together.
///
/// Masking produces a new bundle that keeps the relative order of surviving
/// streamlines; `lengths()` is index-aligned with the collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bundle {
    streamlines: Vec<Streamline>,
}

impl Bundle {
    pub fn new(streamlines: Vec<Streamline>) -> Self {
        Self { streamlines }
    }

    pub fn len(&self) -> usize {
        self.streamlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streamlines.is_empty()
    }

    pub fn push(&mut self, streamline: Streamline) {
        self.streamlines.push(streamline);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Streamline> {
        self.streamlines.iter()
    }

    /// Arc length of every streamline, one entry per streamline
    pub fn lengths(&self) -> Vec<f32> {
        self.streamlines.iter().map(|s| s.length()).collect()
    }

    /// First point of every streamline. Empty streamlines have no first
    /// point and contribute no entry.
    pub fn starts(&self) -> Vec<Vec3> {
        self.streamlines.iter().filter_map(|s| s.first()).collect()
    }

    /// Last point of every streamline. Empty streamlines contribute no entry.
    pub fn ends(&self) -> Vec<Vec3> {
        self.streamlines.iter().filter_map(|s| s.last()).collect()
    }

    /// New bundle keeping exactly the streamlines whose mask entry is true,
    /// in their original relative order.
    ///
    /// Panics when the mask length differs from the bundle length.
    pub fn masked(&self, mask: &[bool]) -> Bundle {
        assert_eq!(
            mask.len(),
            self.streamlines.len(),
            "mask length must match bundle length"
        );
        Bundle::new(
            self.streamlines
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(s, _)| s.clone())
                .collect(),
        )
    }

    /// Canonicalize point order across the bundle so that starts and ends
    /// are comparable between streamlines. The first streamline is the
    /// reference; any other streamline is reversed when flipping it lowers
    /// the summed endpoint distance to the reference.
    pub fn reorient(&mut self) {
        let (ref_start, ref_end) = match self.streamlines.first() {
            Some(s) if s.len() >= 2 => match (s.first(), s.last()) {
                (Some(a), Some(b)) => (a, b),
                _ => return,
            },
            _ => return,
        };

        for s in self.streamlines.iter_mut().skip(1) {
            let (start, end) = match (s.first(), s.last()) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            let keep = start.distance(&ref_start) + end.distance(&ref_end);
            let flip = end.distance(&ref_start) + start.distance(&ref_end);
            if flip < keep {
                s.reverse();
            }
        }
    }

    /// New bundle with every streamline resampled to `nb_points` points
    pub fn resampled(&self, nb_points: usize) -> Bundle {
        Bundle::new(
            self.streamlines
                .iter()
                .map(|s| s.resampled(nb_points))
                .collect(),
        )
    }

    /// Smooth every streamline in place
    pub fn smooth(&mut self, params: &SmoothParams) {
        for s in self.streamlines.iter_mut() {
            *s = s.smoothed(params);
        }
    }
}

impl Index<usize> for Bundle {
    type Output = Streamline;

    fn index(&self, index: usize) -> &Streamline {
        &self.streamlines[index]
    }
}

impl From<Vec<Streamline>> for Bundle {
    fn from(streamlines: Vec<Streamline>) -> Self {
        Bundle::new(streamlines)
    }
}
