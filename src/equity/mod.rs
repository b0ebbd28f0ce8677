mod estimator;

pub use estimator::estimate;
