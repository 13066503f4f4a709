pub mod feature;

pub use feature::{FeatureRow, NewFeature};
