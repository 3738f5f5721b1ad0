pub(crate) mod batch;
pub(crate) mod canvas;
pub(crate) mod compositor;
pub(crate) mod renderer;
pub(crate) mod stroke;
