pub(crate) mod render_spec;
