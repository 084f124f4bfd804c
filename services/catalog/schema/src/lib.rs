//! sea-orm entities for the catalog service database.

pub mod products;
