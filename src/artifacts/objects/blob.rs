use crate::artifacts::objects::digest::fingerprint;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// File content snapshot
///
/// A blob is an opaque, immutable byte string. It is stored verbatim in the
/// database under the fingerprint of its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    pub fn new(data: Bytes) -> Self {
        Blob { data }
    }

    pub fn object_id(&self) -> ObjectId {
        fingerprint(&self.data)
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}
