mod concat;
mod planner;
mod probe;
mod session;

#[rustfmt::skip]
pub use {
    concat::ObjectConcatServiceImpl,
    planner::plan_parts,
    probe::ProbeServiceImpl,
    session::MultipartSession,
};
