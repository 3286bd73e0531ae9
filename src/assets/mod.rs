pub(crate) mod images;
