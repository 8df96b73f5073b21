pub(crate) mod mix;
pub(crate) mod signal;
pub(crate) mod wav;
