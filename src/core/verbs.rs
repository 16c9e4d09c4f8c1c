//! Status verbs for progress display

pub const USING: &str = "Using";
pub const EXPANDING: &str = "Expanding";
pub const RESOLVING: &str = "Resolving";
pub const READING: &str = "Reading";
pub const RESOLVED: &str = "Resolved";
pub const DONE: &str = "Done";
pub const FAILED: &str = "Failed";
