use serde::{Serialize, Deserialize};

use crate::math::{CatmullRomSpline, Vec3};

/// Parameters controlling streamline smoothing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmoothParams {
    /// Keep every n-th point as a spline control point
    pub control_stride: usize,
    /// Catmull-Rom tension (0.0 to 1.0)
    pub tension: f32,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            control_stride: 3,
            tension: 0.5,
        }
    }
}

/// One traced fiber path: an ordered sequence of 3D points
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Streamline {
    pub points: Vec<Vec3>,
}

impl Streamline {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Arc length: the sum of the segment distances along the polyline
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    /// Flip the point order in place (start becomes end)
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Reparametrize to exactly `nb_points` points evenly spaced in arc
    /// length, interpolating linearly along the original polyline. The first
    /// and last points are preserved. Streamlines with fewer than two points
    /// are returned unchanged.
    pub fn resampled(&self, nb_points: usize) -> Streamline {
        if self.points.len() < 2 || nb_points < 2 {
            return self.clone();
        }

        // Cumulative arc length at every original point
        let mut cum = Vec::with_capacity(self.points.len());
        cum.push(0.0f32);
        let mut total = 0.0f32;
        for w in self.points.windows(2) {
            total += w[0].distance(&w[1]);
            cum.push(total);
        }
        if total <= 0.0 {
            // Zero-length path: every resampled point is the same point
            return Streamline::new(vec![self.points[0]; nb_points]);
        }

        let mut out = Vec::with_capacity(nb_points);
        let mut seg = 0;
        for i in 0..nb_points {
            let target = total * i as f32 / (nb_points - 1) as f32;
            while seg + 2 < cum.len() && cum[seg + 1] < target {
                seg += 1;
            }
            let span = cum[seg + 1] - cum[seg];
            let t = if span > 0.0 {
                (target - cum[seg]) / span
            } else {
                0.0
            };
            out.push(self.points[seg].lerp(&self.points[seg + 1], t));
        }
        Streamline::new(out)
    }

    /// Reduce point-to-point noise by fitting a Catmull-Rom spline through a
    /// decimated control set and resampling it at the original point count.
    /// Endpoints are preserved. Streamlines with fewer than 5 points are
    /// returned unchanged.
    pub fn smoothed(&self, params: &SmoothParams) -> Streamline {
        if self.points.len() < 5 {
            return self.clone();
        }

        let stride = params.control_stride.max(1);
        let mut control: Vec<Vec3> = self.points.iter().step_by(stride).copied().collect();
        let last = self.points[self.points.len() - 1];
        if control.last() != Some(&last) {
            control.push(last);
        }

        let spline = CatmullRomSpline::with_tension(control, params.tension);
        Streamline::new(spline.sample(self.points.len()))
    }
}

impl From<Vec<Vec3>> for Streamline {
    fn from(points: Vec<Vec3>) -> Self {
        Streamline::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: usize) -> Streamline {
        let points = (0..n)
            .map(|i| Vec3::new(i as f32, if i % 2 == 0 { 1.0 } else { -1.0 }, 0.0))
            .collect();
        Streamline::new(points)
    }

    /// Mean squared second difference along the path
    fn roughness(s: &Streamline) -> f32 {
        let pts = &s.points;
        let mut sum = 0.0;
        for i in 1..pts.len() - 1 {
            let d = pts[i + 1] - pts[i].scale(2.0) + pts[i - 1];
            sum += d.length_squared();
        }
        sum / (pts.len() - 2) as f32
    }

    #[test]
    fn test_length_straight_line() {
        let s = Streamline::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 4.0, 0.0),
        ]);
        assert!((s.length() - 7.0).abs() < 0.0001);
    }

    #[test]
    fn test_reverse() {
        let mut s = Streamline::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        s.reverse();
        assert_eq!(s.first(), Some(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(s.last(), Some(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_resample_count_and_endpoints() {
        let s = Streamline::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ]);
        let r = s.resampled(100);
        assert_eq!(r.len(), 100);
        assert!((r.points[0].distance(&s.points[0])).abs() < 0.0001);
        assert!((r.points[99].distance(&s.points[2])).abs() < 0.0001);
    }

    #[test]
    fn test_resample_is_arc_length_uniform() {
        // Unevenly spaced points on a straight line
        let s = Streamline::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(9.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ]);
        let r = s.resampled(5);
        let expected = [0.0, 2.5, 5.0, 7.5, 10.0];
        for (p, x) in r.points.iter().zip(expected) {
            assert!((p.x - x).abs() < 0.001);
        }
    }

    #[test]
    fn test_resample_short_streamline_unchanged() {
        let s = Streamline::new(vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(s.resampled(10), s);
    }

    #[test]
    fn test_smooth_preserves_count_and_endpoints() {
        let s = zigzag(13);
        let smoothed = s.smoothed(&SmoothParams::default());
        assert_eq!(smoothed.len(), 13);
        assert!(smoothed.points[0].distance(&s.points[0]) < 0.0001);
        assert!(smoothed.points[12].distance(&s.points[12]) < 0.0001);
    }

    #[test]
    fn test_smooth_reduces_roughness() {
        let s = zigzag(13);
        let smoothed = s.smoothed(&SmoothParams::default());
        assert!(roughness(&smoothed) < roughness(&s) * 0.5);
    }

    #[test]
    fn test_smooth_short_streamline_unchanged() {
        let s = Streamline::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(s.smoothed(&SmoothParams::default()), s);
    }
}
