mod object_url;
mod part_plan;
mod source;

#[rustfmt::skip]
pub use {
    object_url::*,
    part_plan::*,
    source::*,
};
