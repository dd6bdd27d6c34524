pub(crate) mod color;
pub(crate) mod cpu;
pub(crate) mod draw;
pub(crate) mod flatten;
pub(crate) mod path;
pub(crate) mod surface;
