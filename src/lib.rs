//! Outlier removal and smoothing for diffusion MRI streamline bundles.
//!
//! A bundle is an ordered collection of streamlines (3D polylines traced by
//! tractography). Cleaning reorients the bundle, drops streamlines with an
//! uncommon arc length, drops spatial outliers, and smooths the survivors.
//! Two outlier criteria are available on [`BundleCleaner`]:
//!
//! - [`BundleCleaner::clean_by_endpoints`] compares streamline endpoints
//!   against the bundle's endpoint clusters.
//! - [`BundleCleaner::clean_by_resampled_shape`] resamples every streamline
//!   to a fixed point count and compares positions index by index, which
//!   also catches local-shape outliers.
//!
//! # Modules
//! - `math`: 3D vectors, Catmull-Rom splines, summary statistics
//! - `data`: the `Streamline` and `Bundle` containers
//! - `clean`: the cleaning pipeline and its parameters
//!
//! ```
//! use fiberclean::{Bundle, BundleCleaner, CleanParams, Streamline, Vec3};
//!
//! let bundle = Bundle::new(
//!     (0..9)
//!         .map(|i| {
//!             let off = (i as f32 - 4.0) * 0.1;
//!             Streamline::new(
//!                 (0..11)
//!                     .map(|j| Vec3::new(off * 0.01 + j as f32 * (10.0 + off), off, off * 0.5))
//!                     .collect(),
//!             )
//!         })
//!         .collect(),
//! );
//!
//! let cleaner = BundleCleaner::new(CleanParams::default());
//! let cleaned = cleaner.clean_by_endpoints(bundle)?;
//! assert_eq!(cleaned.len(), 9);
//! # Ok::<(), fiberclean::CleanError>(())
//! ```

pub mod clean;
pub mod data;
pub mod math;

pub use clean::{BundleCleaner, CleanError, CleanParams, EndpointRule};
pub use data::{Bundle, SmoothParams, Streamline};
pub use math::Vec3;
