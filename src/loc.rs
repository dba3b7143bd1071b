use std::fmt::{Debug, Formatter, Result};
use std::panic::Location;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    location: &'static Location<'static>,
}

impl Loc {
    #[track_caller]
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            location: Location::caller(),
        }
    }
}

impl Debug for Loc {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.location)
    }
}
