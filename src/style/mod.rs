pub(crate) mod fill;
pub(crate) mod grid;
pub(crate) mod kernel;
pub(crate) mod palette;
#[allow(clippy::module_inception)]
pub(crate) mod style;
