//! Slab tables as data: load a [`TaxTable`](taxvault_core::TaxTable)'s
//! slabs from CSV instead of compiling them in.

mod loader;

pub use loader::{SlabLoaderError, SlabRecord, SlabTableLoader};
