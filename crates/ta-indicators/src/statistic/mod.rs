//! Statistic functions: variance, standard deviation and correlation.

mod correl;
mod var;

pub use correl::{correl, correl_lookback};
pub(crate) use var::deviation;
pub use var::{stddev, stddev_lookback, var, var_lookback};
