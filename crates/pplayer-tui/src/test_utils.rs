//! Test utilities for pplayer-tui rendering tests.

use ratatui::buffer::Buffer;

/// Convert a buffer to a string representation for snapshot testing.
///
/// Each row is trimmed of trailing whitespace; the final newline is dropped.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
