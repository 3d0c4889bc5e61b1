use log::debug;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::data::{Bundle, SmoothParams};
use crate::math::stats;
use crate::math::Vec3;

/// Errors produced by the cleaning pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    /// The input bundle holds no streamlines, so filter statistics are undefined
    #[error("cannot clean an empty bundle")]
    EmptyBundle,
    /// A filter dimension has zero spread; the threshold test would reject
    /// every streamline
    #[error("degenerate distribution in {filter} filter (zero standard deviation)")]
    DegenerateDistribution { filter: &'static str },
    /// A streamline has too few points: without at least two points it has
    /// no arc length and cannot be resampled
    #[error("streamline {index} has {points} point(s); at least 2 are required")]
    ShortStreamline { index: usize, points: usize },
}

/// Which point feeds the second endpoint pass of [`BundleCleaner::clean_by_endpoints`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRule {
    /// Both passes test the first point of every streamline (legacy
    /// behavior: the second pass repeats the start filter).
    StartTwice,
    /// First pass tests start points, second pass tests end points.
    StartAndEnd,
}

/// Parameters controlling outlier rejection and smoothing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CleanParams {
    /// Z-score threshold for the arc-length filter
    pub length_threshold: f32,
    /// Per-axis z-score threshold for the endpoint filters
    pub endpoint_threshold: f32,
    /// Per-position z-score threshold for the resampled-shape filter
    pub shape_threshold: f32,
    /// Number of points per streamline for the resampled-shape filter
    pub resample_points: usize,
    /// Point selection for the second endpoint pass
    pub endpoint_rule: EndpointRule,
    /// Smoothing applied to surviving streamlines
    pub smooth: SmoothParams,
}

impl Default for CleanParams {
    fn default() -> Self {
        Self {
            length_threshold: 2.0,
            endpoint_threshold: 3.0,
            shape_threshold: 2.5,
            resample_points: 100,
            endpoint_rule: EndpointRule::StartTwice,
            smooth: SmoothParams::default(),
        }
    }
}

/// Point used by an endpoint filter pass
#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
}

/// Removes outlier streamlines from a bundle and smooths the remainder.
///
/// Two strategies are available. [`clean_by_endpoints`] rejects streamlines
/// whose endpoints sit far from the rest of the bundle;
/// [`clean_by_resampled_shape`] compares streamlines point-by-point after
/// resampling and also rejects local-shape outliers.
///
/// Both take the bundle by value: reorientation and smoothing rewrite
/// streamline points, so the caller hands over the bundle for the duration of
/// the call and receives the filtered result back. Streamlines with fewer
/// than two points have no arc length and cannot be resampled; both
/// strategies report them as [`CleanError::ShortStreamline`].
///
/// [`clean_by_endpoints`]: BundleCleaner::clean_by_endpoints
/// [`clean_by_resampled_shape`]: BundleCleaner::clean_by_resampled_shape
pub struct BundleCleaner {
    pub params: CleanParams,
}

impl BundleCleaner {
    pub fn new(params: CleanParams) -> Self {
        Self { params }
    }

    /// Clean a bundle using the endpoint criterion.
    ///
    /// Pipeline: reorient, drop streamlines with uncommon arc length, drop
    /// streamlines whose endpoints are far from the bundle's endpoint
    /// clusters (two passes, see [`EndpointRule`]), then smooth the
    /// survivors.
    pub fn clean_by_endpoints(&self, mut bundle: Bundle) -> Result<Bundle, CleanError> {
        if bundle.is_empty() {
            return Err(CleanError::EmptyBundle);
        }
        Self::validate(&bundle)?;

        bundle.reorient();
        let bundle = self.filter_by_length(bundle)?;
        let bundle = self.filter_by_endpoint(bundle, Anchor::Start, "start")?;
        let second = match self.params.endpoint_rule {
            EndpointRule::StartTwice => Anchor::Start,
            EndpointRule::StartAndEnd => Anchor::End,
        };
        let mut bundle = self.filter_by_endpoint(bundle, second, "end")?;

        bundle.smooth(&self.params.smooth);
        Ok(bundle)
    }

    /// Clean a bundle using the resampled pointwise criterion.
    ///
    /// Pipeline: reorient, drop streamlines with uncommon arc length, then
    /// resample every survivor to `resample_points` points and drop any
    /// streamline that strays from the per-position mean on any axis at any
    /// position. The resampled copy only feeds the filter; survivors keep
    /// their original points. Finally smooth the survivors.
    pub fn clean_by_resampled_shape(&self, mut bundle: Bundle) -> Result<Bundle, CleanError> {
        if bundle.is_empty() {
            return Err(CleanError::EmptyBundle);
        }
        Self::validate(&bundle)?;

        bundle.reorient();
        let bundle = self.filter_by_length(bundle)?;

        let resampled = bundle.resampled(self.params.resample_points);
        let mut mask = vec![true; bundle.len()];
        for axis in 0..3 {
            self.restrict_mask_for_axis(&resampled, axis, &mut mask)?;
        }

        let mut kept = bundle.masked(&mask);
        debug!("shape filter kept {}/{} streamlines", kept.len(), bundle.len());

        kept.smooth(&self.params.smooth);
        Ok(kept)
    }

    /// Every streamline must hold at least two points so that arc lengths,
    /// endpoints, and resampling are all defined.
    fn validate(bundle: &Bundle) -> Result<(), CleanError> {
        for (index, s) in bundle.iter().enumerate() {
            if s.len() < 2 {
                return Err(CleanError::ShortStreamline { index, points: s.len() });
            }
        }
        Ok(())
    }

    /// Keep streamlines whose arc length is within `length_threshold`
    /// standard deviations of the bundle mean.
    fn filter_by_length(&self, bundle: Bundle) -> Result<Bundle, CleanError> {
        let lengths = bundle.lengths();
        let (mean, std) = stats::mean_std(&lengths);
        if std <= f32::EPSILON {
            return Err(CleanError::DegenerateDistribution { filter: "length" });
        }

        let mask: Vec<bool> = lengths
            .iter()
            .map(|&l| stats::within(l, mean, std, self.params.length_threshold))
            .collect();
        let kept = bundle.masked(&mask);
        debug!("length filter kept {}/{} streamlines", kept.len(), lengths.len());
        Ok(kept)
    }

    /// Keep streamlines whose anchor point is within `endpoint_threshold`
    /// standard deviations of the per-axis mean, on all three axes.
    fn filter_by_endpoint(
        &self,
        bundle: Bundle,
        anchor: Anchor,
        label: &'static str,
    ) -> Result<Bundle, CleanError> {
        let anchors: Vec<Vec3> = match anchor {
            Anchor::Start => bundle.starts(),
            Anchor::End => bundle.ends(),
        };
        let (mean, std) = stats::axis_mean_std(&anchors);
        for axis in 0..3 {
            if std.axis(axis) <= f32::EPSILON {
                return Err(CleanError::DegenerateDistribution { filter: label });
            }
        }

        let k = self.params.endpoint_threshold;
        let mask: Vec<bool> = anchors
            .iter()
            .map(|p| {
                (0..3).all(|axis| stats::within(p.axis(axis), mean.axis(axis), std.axis(axis), k))
            })
            .collect();
        let kept = bundle.masked(&mask);
        debug!("{} filter kept {}/{} streamlines", label, kept.len(), anchors.len());
        Ok(kept)
    }

    /// Clear mask entries for streamlines that stray from the per-position
    /// mean on the given axis at any resampled position.
    fn restrict_mask_for_axis(
        &self,
        resampled: &Bundle,
        axis: usize,
        mask: &mut [bool],
    ) -> Result<(), CleanError> {
        let n = resampled.len();
        let k = self.params.shape_threshold;

        for pos in 0..self.params.resample_points {
            let values: Vec<f32> = (0..n)
                .map(|i| resampled[i].points[pos].axis(axis))
                .collect();
            let (mean, std) = stats::mean_std(&values);
            if std <= f32::EPSILON {
                return Err(CleanError::DegenerateDistribution { filter: "shape" });
            }
            for (i, &v) in values.iter().enumerate() {
                if !stats::within(v, mean, std, k) {
                    mask[i] = false;
                }
            }
        }
        Ok(())
    }
}
