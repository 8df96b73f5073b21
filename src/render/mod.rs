pub(crate) mod columns;
pub(crate) mod lines;
pub(crate) mod renderer;
pub(crate) mod scale;
