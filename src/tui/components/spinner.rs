//! Braille spinner shared by the header and the pending-reply row.

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for animation tick `tick`.
pub fn frame(tick: usize) -> &'static str {
    FRAMES[tick % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_wrap_around() {
        assert_eq!(frame(0), "⠋");
        assert_eq!(frame(1), "⠙");
        assert_eq!(frame(10), frame(0));
    }
}
