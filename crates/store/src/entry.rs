//! Object entries and their observable state

use bytes::Bytes;
use std::fmt;

/// A stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Opaque payload
    pub value: Bytes,
    /// `false` while reserved, `true` once complete
    pub present: bool,
}

impl ObjectEntry {
    pub(crate) fn reserved(value: Bytes) -> Self {
        Self {
            value,
            present: false,
        }
    }

    pub fn state(&self) -> ObjectState {
        if self.present {
            ObjectState::Complete
        } else {
            ObjectState::Reserved
        }
    }
}

/// Lifecycle state of a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    Absent,
    Reserved,
    Complete,
}

impl fmt::Display for ObjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ObjectState::Absent => "absent",
            ObjectState::Reserved => "reserved",
            ObjectState::Complete => "complete",
        };
        write!(f, "{state}")
    }
}
