use crate::model::vo::ObjectUrl;

/// Append a byte buffer to one (possibly absent) destination object.
pub struct AppendCommand {
    pub url: ObjectUrl,
    pub content: Vec<u8>,
}

/// Concatenate the listed objects into the first one.
pub struct ConcatManyCommand {
    /// Ordered object urls; position 0 is the destination.
    pub urls: Vec<ObjectUrl>,
    /// Delete consumed sources (destination excepted) after completion.
    pub remove_originals: bool,
}
