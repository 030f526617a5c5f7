pub(crate) mod envelope;
