#![cfg(test)]

use super::*;

fn filled_with(bytes: &[u8]) -> ReadBuffer {
    let mut buffer = ReadBuffer::with_capacity(bytes.len());
    buffer.empty_start()[..bytes.len()].copy_from_slice(bytes);
    buffer.fill(bytes.len());
    buffer
}

#[test]
fn test_new_is_empty_at_default_capacity() {
    let buffer = ReadBuffer::new();
    assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
    assert_eq!(buffer.available(), DEFAULT_CAPACITY);
    assert!(
        buffer.filled().is_empty(),
        "A fresh buffer should hold no filled bytes."
    );
}

#[test]
fn test_fill_and_consume_track_the_filled_region() {
    let mut buffer = ReadBuffer::with_capacity(16);
    buffer.empty_start()[..10].copy_from_slice(b"0123456789");
    buffer.fill(4);
    assert_eq!(buffer.filled(), b"0123");
    buffer.fill(6);
    assert_eq!(buffer.filled(), b"0123456789");

    buffer.consume(3);
    assert_eq!(buffer.filled(), b"3456789");
    buffer.consume(7);
    assert!(
        buffer.filled().is_empty(),
        "Fills minus consumes should leave an empty region."
    );
}

#[test]
fn test_available_shrinks_as_the_buffer_fills() {
    let mut buffer = ReadBuffer::with_capacity(8);
    assert_eq!(buffer.available(), 8);
    buffer.fill(5);
    assert_eq!(buffer.available(), 3);
    buffer.consume(5);
    assert_eq!(
        buffer.available(),
        3,
        "Consuming reclaims nothing until the next growth pass."
    );
}

#[test]
#[should_panic(expected = "buffer filled past its capacity")]
fn test_fill_past_capacity_panics() {
    let mut buffer = ReadBuffer::with_capacity(4);
    buffer.fill(5);
}

#[test]
#[should_panic(expected = "buffer consumed past its filled region")]
fn test_consume_past_filled_panics() {
    let mut buffer = ReadBuffer::with_capacity(4);
    buffer.fill(2);
    buffer.consume(3);
}

#[test]
fn test_expand_compacts_in_place_when_consumed_space_suffices() {
    let mut buffer = filled_with(b"abcdef");
    buffer.consume(4);

    buffer.expand(3);
    assert_eq!(
        buffer.capacity(),
        6,
        "Compaction alone covers the request, so no reallocation happens."
    );
    assert_eq!(buffer.filled(), b"ef");
    assert_eq!(buffer.available(), 4);
}

#[test]
fn test_expand_reallocates_when_compaction_is_not_enough() {
    let mut buffer = filled_with(b"abcdef");
    buffer.consume(2);

    buffer.expand(10);
    assert!(
        buffer.capacity() >= 6 + 2 * (10 - 2),
        "Reallocation should add at least twice the shortfall."
    );
    assert_eq!(
        buffer.filled(),
        b"cdef",
        "Undrained bytes must survive reallocation."
    );
    assert!(buffer.available() >= 10);
}

#[test]
fn test_ensure_grows_only_when_short() {
    let mut buffer = ReadBuffer::with_capacity(8);
    buffer.fill(3);

    buffer.ensure(5);
    assert_eq!(buffer.capacity(), 8, "5 bytes were already free.");

    buffer.ensure(6);
    assert!(buffer.available() >= 6);
}

#[test]
fn test_never_shrinks() {
    let mut buffer = ReadBuffer::with_capacity(4);
    buffer.expand(32);
    let grown = buffer.capacity();

    buffer.expand(1);
    buffer.ensure(1);
    assert_eq!(
        buffer.capacity(),
        grown,
        "Later smaller requests must not shrink the backing region."
    );
}

#[test]
fn test_content_round_trips_across_repeated_expansion() {
    let mut buffer = ReadBuffer::with_capacity(2);
    let mut expected = Vec::new();

    for round in 0_u32..100 {
        let chunk = round.to_le_bytes();
        buffer.ensure(chunk.len());
        buffer.empty_start()[..chunk.len()].copy_from_slice(&chunk);
        buffer.fill(chunk.len());
        expected.extend_from_slice(&chunk);
        if round % 3 == 0 {
            buffer.consume(2);
            expected.drain(..2);
        }
    }

    assert_eq!(
        buffer.filled(),
        &expected[..],
        "No fill/consume/expand sequence may lose or reorder bytes."
    );
}

#[test]
fn test_peek_returns_the_window_only_when_satisfiable() {
    let mut buffer = filled_with(b"abcdef");
    buffer.consume(1);

    assert_eq!(buffer.peek(3, 0), Some(&b"bcdef"[..]));
    assert_eq!(buffer.peek(2, 3), Some(&b"ef"[..]));
    assert_eq!(buffer.peek(3, 3), None, "Only 2 bytes remain at offset 3.");
    assert_eq!(buffer.peek(1, 6), None, "Offset lies past the filled region.");
    assert_eq!(buffer.peek(0, 5), Some(&b""[..]));
}

#[test]
fn test_fillable_is_usable_as_a_capability() {
    fn deposit(target: &mut impl Fillable, bytes: &[u8]) {
        target.ensure(bytes.len());
        target.empty_start()[..bytes.len()].copy_from_slice(bytes);
        target.fill(bytes.len());
    }

    let mut buffer = ReadBuffer::with_capacity(1);
    deposit(&mut buffer, b"through the trait");
    assert_eq!(buffer.filled(), b"through the trait");
}
