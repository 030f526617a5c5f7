pub(crate) mod estimate;
pub(crate) mod literal;
