/// JSON run configuration and run options.
pub mod config;
/// Visual style of the transition.
pub mod style;
