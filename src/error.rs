// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::MAX_WIDTH;

/// Errors reported by the generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The design was requested for a width of zero bits.
    #[error("width must be at least 1 bit")]
    ZeroWidth,

    /// The requested width is larger than [`MAX_WIDTH`].
    #[error("width {width} exceeds the maximum supported width of {max} bits")]
    WidthTooLarge { width: u64, max: usize },
}

pub(crate) fn check_width(width: usize) -> Result<(), Error> {
    if width == 0 {
        return Err(Error::ZeroWidth);
    }
    check_max_width(width)
}

pub(crate) fn check_max_width(width: usize) -> Result<(), Error> {
    if width > MAX_WIDTH {
        Err(Error::WidthTooLarge {
            width: width as u64,
            max: MAX_WIDTH,
        })
    } else {
        Ok(())
    }
}
