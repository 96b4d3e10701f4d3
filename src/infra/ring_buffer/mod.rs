//! Single-producer/single-consumer byte FIFO shared between the UART
//! receive interrupt (producer) and the main loop (consumer).
//!
//! Every field touched by both contexts (`count`, the overflow flag, the
//! latched line status) lives behind an
//! [`embassy_sync::blocking_mutex::Mutex`] keyed on a critical section, so
//! each `put`/`get`/`flush` is one indivisible update from the other
//! context's point of view. The raw indices are never exposed.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::error::RingBufferError;
use crate::infra::serial::LineStatus;

//==================================================================================Constants

/// Default capacity of the UART receive FIFO (bytes).
pub const DEFAULT_RX_BUFFER_SIZE: usize = 256;

//==================================================================================State
/// Fields mutated under the critical section.
#[derive(Debug)]
struct RingState<const N: usize> {
    data: [u8; N],
    head: usize,
    tail: usize,
    count: usize,
    overflow: bool,
    line_status: LineStatus,
}

impl<const N: usize> RingState<N> {
    const fn new() -> Self {
        Self {
            data: [0; N],
            head: 0,
            tail: 0,
            count: 0,
            overflow: false,
            line_status: LineStatus::NONE,
        }
    }

    /// Drop the buffered bytes. Flags are left untouched.
    fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        // No need to wipe `data`; upcoming pushes overwrite it.
    }
}

//==================================================================================RingBuffer
/// Fixed-capacity byte queue safe to share with an interrupt handler.
///
/// `put` belongs to the interrupt context, `get` to the main loop. The
/// buffer is `const`-constructible so it can live in a `static`:
///
/// ```rust,ignore
/// static IMU_RX: RingBuffer<256> = RingBuffer::new();
/// ```
pub struct RingBuffer<const N: usize = DEFAULT_RX_BUFFER_SIZE> {
    state: Mutex<CriticalSectionRawMutex, RefCell<RingState<N>>>,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer with the overflow flag cleared.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(RingState::new())),
        }
    }

    /// Reset indices, count, overflow flag and latched line status.
    pub fn init(&self) {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            state.clear();
            state.overflow = false;
            state.line_status = LineStatus::NONE;
        });
    }

    /// Push one byte. Interrupt context only.
    ///
    /// When the buffer is full the byte is discarded, the sticky overflow
    /// flag is set and [`RingBufferError::Full`] is returned; bytes already
    /// queued are left intact.
    pub fn put(&self, byte: u8) -> Result<(), RingBufferError> {
        self.put_with_status(byte, LineStatus::NONE)
    }

    /// Push one byte together with the line status the UART reported for it.
    ///
    /// The status is latched (OR-ed) even if the byte itself is dropped.
    pub fn put_with_status(&self, byte: u8, status: LineStatus) -> Result<(), RingBufferError> {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            state.line_status = state.line_status.union(status);

            if state.count >= N {
                state.overflow = true;
                return Err(RingBufferError::Full);
            }

            let head = state.head;
            state.data[head] = byte;
            state.head = (head + 1) % N;
            state.count += 1;
            Ok(())
        })
    }

    /// Pop the oldest byte. Main-loop context only.
    pub fn get(&self) -> Option<u8> {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            if state.count == 0 {
                return None;
            }

            let tail = state.tail;
            let byte = state.data[tail];
            state.tail = (tail + 1) % N;
            state.count -= 1;
            Some(byte)
        })
    }

    /// Discard every buffered byte.
    ///
    /// Only meaningful while the producer is quiesced (receiver disabled);
    /// otherwise a byte may land right after the flush. The overflow flag
    /// is sticky and survives a flush; only [`init`](Self::init) clears it.
    pub fn flush(&self) {
        self.state.lock(|cell| cell.borrow_mut().clear());
    }

    /// Number of bytes waiting to be read.
    pub fn len(&self) -> usize {
        self.state.lock(|cell| cell.borrow().count)
    }

    /// Checks whether no byte is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether a push has ever been rejected since the last `init`.
    pub fn is_overflowed(&self) -> bool {
        self.state.lock(|cell| cell.borrow().overflow)
    }

    /// Return the line errors latched since the previous call and clear them.
    pub fn take_line_status(&self) -> LineStatus {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let status = state.line_status;
            state.line_status = LineStatus::NONE;
            status
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
