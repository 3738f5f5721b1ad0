pub(crate) mod fit;
pub(crate) mod overflow;
pub(crate) mod wrap;
