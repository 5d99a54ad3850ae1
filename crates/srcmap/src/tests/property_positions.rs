use quickcheck::QuickCheck;

use crate::Buffer;

/// Property: decomposing any char-boundary offset (plus the one-past-end
/// position) and recomputing the offset from `(line, column)` through an
/// independently built line index reproduces the original offset.
#[test]
fn decompose_position_is_left_invertible() {
    fn prop(text: String) -> bool {
        let buffer = Buffer::new("(property)");
        if buffer.set_raw_source(text).is_err() {
            return false;
        }
        // Read the source back so offsets are relative to the normalized
        // (CR-LF collapsed) text.
        let source = buffer.source().unwrap().to_owned();

        let mut begins = vec![0];
        for (index, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                begins.push(index + 1);
            }
        }

        source
            .char_indices()
            .map(|(offset, _)| offset)
            .chain([source.len()])
            .all(|offset| {
                let (line, column) = buffer.decompose_position(offset).unwrap();
                begins[line - buffer.first_line()] + column == offset
            })
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: no line handed out by `source_line` ever carries a terminator,
/// and the synthetic final line is always empty.
#[test]
fn source_lines_never_carry_terminators() {
    fn prop(text: String) -> bool {
        let buffer = Buffer::new("(property)");
        if buffer.set_raw_source(text).is_err() {
            return false;
        }
        let last = buffer.last_line().unwrap();

        (buffer.first_line()..=last).all(|line| {
            let text = buffer.source_line(line).unwrap();
            !text.contains('\n') && (line != last || text.is_empty())
        })
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String) -> bool);
}
