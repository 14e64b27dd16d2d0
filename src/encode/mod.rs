pub(crate) mod binary;
