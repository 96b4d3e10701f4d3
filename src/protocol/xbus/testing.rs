//! Frame builders shared by the unit tests.
use std::vec::Vec;

use super::{EXTENDED_LENGTH, MASTER_BUS_ID, PREAMBLE};

/// Encode a complete Xbus frame with a valid checksum.
pub fn frame(mid: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 7);
    bytes.push(PREAMBLE);
    bytes.push(MASTER_BUS_ID);
    bytes.push(mid);
    if payload.len() < EXTENDED_LENGTH as usize {
        bytes.push(payload.len() as u8);
    } else {
        bytes.push(EXTENDED_LENGTH);
        bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    }
    bytes.extend_from_slice(payload);
    let sum = bytes[1..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    bytes.push(0u8.wrapping_sub(sum));
    bytes
}

/// Encode one `MTData2` data item.
pub fn item(id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() + 3);
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.push(data.len() as u8);
    bytes.extend_from_slice(data);
    bytes
}

/// Big-endian encoding of a float slice.
pub fn floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}
