//! Board file (vertical column) type.

use std::fmt;

/// A file of the board, `FileA` through `FileH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    FileA = 0,
    FileB = 1,
    FileC = 2,
    FileD = 3,
    FileE = 4,
    FileF = 5,
    FileG = 6,
    FileH = 7,
}

impl File {
    /// Number of files.
    pub const COUNT: usize = 8;

    /// All files from a to h.
    pub const ALL: [File; 8] = [
        File::FileA,
        File::FileB,
        File::FileC,
        File::FileD,
        File::FileE,
        File::FileF,
        File::FileG,
        File::FileH,
    ];

    /// Array index for this file (0..8).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// File from an index in 0..8, or `None` out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<File> {
        match index {
            0 => Some(File::FileA),
            1 => Some(File::FileB),
            2 => Some(File::FileC),
            3 => Some(File::FileD),
            4 => Some(File::FileE),
            5 => Some(File::FileF),
            6 => Some(File::FileG),
            7 => Some(File::FileH),
            _ => None,
        }
    }

    /// Distance to the nearest board edge (a- or h-file), in 0..4.
    ///
    /// The a- and h-files score 0, the d- and e-files 3. Used by checkmate
    /// move scoring to favour pushing the defending king toward a corner.
    #[inline]
    pub fn edge_distance(self) -> usize {
        self.index().min(7 - self.index())
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = (b'a' + self.index() as u8) as char;
        write!(f, "{c}")
    }
}
