//! FIFO ordering, wrap-around, overflow and flag handling.
use super::*;

#[test]
/// Bytes come out in the order they went in, and the buffer ends empty.
fn test_fifo_order() {
    let buffer: RingBuffer<8> = RingBuffer::new();
    for byte in [0x10, 0x20, 0x30, 0x40, 0x50] {
        buffer.put(byte).expect("buffer has room");
    }
    assert_eq!(buffer.len(), 5);

    for expected in [0x10, 0x20, 0x30, 0x40, 0x50] {
        assert_eq!(buffer.get(), Some(expected));
    }
    assert_eq!(buffer.get(), None);
    assert!(buffer.is_empty());
}

#[test]
/// Indices wrap modulo the capacity without reordering data.
fn test_wrap_around() {
    let buffer: RingBuffer<4> = RingBuffer::new();
    for round in 0..10u8 {
        buffer.put(round).unwrap();
        buffer.put(round.wrapping_add(100)).unwrap();
        buffer.put(round.wrapping_add(200)).unwrap();
        assert_eq!(buffer.get(), Some(round));
        assert_eq!(buffer.get(), Some(round.wrapping_add(100)));
        assert_eq!(buffer.get(), Some(round.wrapping_add(200)));
    }
    assert!(buffer.is_empty());
    assert!(!buffer.is_overflowed());
}

#[test]
/// A push into a full buffer is rejected, latches the flag, and leaves the
/// queued bytes untouched.
fn test_overflow_preserves_content() {
    let buffer: RingBuffer<3> = RingBuffer::new();
    buffer.put(1).unwrap();
    buffer.put(2).unwrap();
    buffer.put(3).unwrap();

    assert_eq!(buffer.put(4), Err(RingBufferError::Full));
    assert!(buffer.is_overflowed());
    assert_eq!(buffer.len(), 3);

    assert_eq!(buffer.get(), Some(1));
    assert_eq!(buffer.get(), Some(2));
    assert_eq!(buffer.get(), Some(3));
    assert_eq!(buffer.get(), None);

    // Sticky: draining does not clear it.
    assert!(buffer.is_overflowed());
}

#[test]
/// Flush empties the queue but keeps the sticky overflow flag; init clears both.
fn test_flush_and_init() {
    let buffer: RingBuffer<2> = RingBuffer::new();
    buffer.put(1).unwrap();
    buffer.put(2).unwrap();
    let _ = buffer.put(3);

    buffer.flush();
    assert!(buffer.is_empty());
    assert!(buffer.is_overflowed());

    buffer.put(9).unwrap();
    assert_eq!(buffer.get(), Some(9));

    buffer.init();
    assert!(buffer.is_empty());
    assert!(!buffer.is_overflowed());
}

#[test]
/// Line errors accumulate across pushes and are cleared when taken.
fn test_line_status_latch() {
    let buffer: RingBuffer<4> = RingBuffer::new();
    buffer
        .put_with_status(0xAA, LineStatus::FRAMING_ERROR)
        .unwrap();
    buffer.put_with_status(0xBB, LineStatus::NONE).unwrap();
    buffer
        .put_with_status(0xCC, LineStatus::DATA_OVERRUN)
        .unwrap();

    let status = buffer.take_line_status();
    assert!(status.contains(LineStatus::FRAMING_ERROR));
    assert!(status.contains(LineStatus::DATA_OVERRUN));
    assert_eq!(buffer.take_line_status(), LineStatus::NONE);

    // Data is unaffected by the status bits.
    assert_eq!(buffer.get(), Some(0xAA));
    assert_eq!(buffer.get(), Some(0xBB));
    assert_eq!(buffer.get(), Some(0xCC));
}

#[test]
/// A shared `static` buffer works across producer/consumer call sites.
fn test_static_buffer() {
    static SHARED: RingBuffer<16> = RingBuffer::new();
    SHARED.init();

    let producer = std::thread::spawn(|| {
        for byte in 0..16u8 {
            SHARED.put(byte).unwrap();
        }
    });
    producer.join().unwrap();

    let mut received = std::vec::Vec::new();
    while let Some(byte) = SHARED.get() {
        received.push(byte);
    }
    assert_eq!(received, (0..16u8).collect::<std::vec::Vec<_>>());
    assert_eq!(SHARED.capacity(), 16);
}
