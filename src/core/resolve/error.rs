use std::error;
use std::fmt;

#[derive(Debug)]
pub struct ResolveError;

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Resolution was unsuccessful!")
    }
}

impl error::Error for ResolveError {}
