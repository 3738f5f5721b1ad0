pub(crate) mod builtin;
pub(crate) mod handle;
pub(crate) mod outline;
pub(crate) mod resolver;
pub(crate) mod source;
