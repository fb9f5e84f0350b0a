mod concat;
mod probe;
mod store;

#[rustfmt::skip]
pub use {
    concat::ObjectConcatService,
    probe::ProbeService,
    store::ObjectStoreService,
};
