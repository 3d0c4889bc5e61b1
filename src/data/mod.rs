pub mod streamline;
pub mod bundle;

pub use streamline::{SmoothParams, Streamline};
pub use bundle::Bundle;
