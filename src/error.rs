//! A module containing [`OutOfRangeError`].

use core::fmt;

/// The error returned by [`BiMap::at_left()`] and [`BiMap::at_right()`]
/// when the requested value is not present on the queried side.
///
/// [`BiMap::at_left()`]: crate::BiMap::at_left
/// [`BiMap::at_right()`]: crate::BiMap::at_right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfRangeError;

impl fmt::Display for OutOfRangeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("the requested value is not present in the map")
	}
}

impl core::error::Error for OutOfRangeError {}
