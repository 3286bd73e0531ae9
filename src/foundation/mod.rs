pub(crate) mod coerce;
pub(crate) mod error;
pub(crate) mod record;
