pub(crate) mod cursor;
pub(crate) mod frames;
