// Job normalization & filtering engine.
// Pure functions over raw search-API records: alias resolution, posting-time resolution,
// salary parsing, experience/employment inference and the filter predicate.
// Nothing below `handlers` performs I/O; missing or malformed data resolves to "unknown".

pub mod criteria;
pub mod employment;
pub mod experience;
pub mod facts;
pub mod fields;
pub mod filter;
pub mod handlers;
pub mod record;
pub mod salary;
pub mod temporal;
