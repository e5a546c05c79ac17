//! Stable per-course colours.

/// The ten course colours, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseColor {
    Blue,
    Green,
    Purple,
    Yellow,
    Red,
    Indigo,
    Pink,
    Teal,
    Orange,
    Cyan,
}

pub const PALETTE: [CourseColor; 10] = [
    CourseColor::Blue,
    CourseColor::Green,
    CourseColor::Purple,
    CourseColor::Yellow,
    CourseColor::Red,
    CourseColor::Indigo,
    CourseColor::Pink,
    CourseColor::Teal,
    CourseColor::Orange,
    CourseColor::Cyan,
];

impl CourseColor {
    /// Solid RGB value of the colour.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            CourseColor::Blue => [0x25, 0x63, 0xeb],
            CourseColor::Green => [0x16, 0xa3, 0x4a],
            CourseColor::Purple => [0x93, 0x33, 0xea],
            CourseColor::Yellow => [0xca, 0x8a, 0x04],
            CourseColor::Red => [0xdc, 0x26, 0x26],
            CourseColor::Indigo => [0x4f, 0x46, 0xe5],
            CourseColor::Pink => [0xdb, 0x27, 0x77],
            CourseColor::Teal => [0x0d, 0x94, 0x88],
            CourseColor::Orange => [0xea, 0x58, 0x0c],
            CourseColor::Cyan => [0x08, 0x91, 0xb2],
        }
    }
}

/// Colour for a course, derived from a 32-bit string hash of its ID so the
/// same course always gets the same colour.
pub fn course_color(course_id: &str) -> CourseColor {
    let mut hash: i64 = 0;
    for unit in course_id.encode_utf16() {
        // The shift wraps to 32 bits; the subtraction and addition do not.
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    PALETTE[(hash.unsigned_abs() % PALETTE.len() as u64) as usize]
}
