//! Owned byte buffer behind the tokenizer residue and in-place entity
//! rewriting.

/// Growable byte buffer with explicit prefix-drop and gap operations.
///
/// Invariant: the buffer holds exactly the bytes its owner has appended and
/// not yet dropped; no cursor state lives here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteBuf {
    bytes: Vec<u8>,
}

impl ByteBuf {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Drop the first `n` bytes, shifting the rest to the front.
    pub fn drop_prefix(&mut self, n: usize) {
        debug_assert!(n <= self.bytes.len(), "drop_prefix past end: {n}");
        self.bytes.drain(..n);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Grow-and-shift: insert `extra` zero bytes at `at`, moving the tail
    /// right so cursors into `[at, len)` stay valid after adding `extra`.
    pub fn open_gap(&mut self, at: usize, extra: usize) {
        debug_assert!(at <= self.bytes.len(), "open_gap past end: {at}");
        let old_len = self.bytes.len();
        self.bytes.resize(old_len + extra, 0);
        self.bytes.copy_within(at..old_len, at + extra);
    }

    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_drop_prefix() {
        let mut buf = ByteBuf::new();
        buf.append(b"hello ");
        buf.append(b"world");
        assert_eq!(buf.as_slice(), b"hello world");

        buf.drop_prefix(6);
        assert_eq!(buf.as_slice(), b"world");

        buf.drop_prefix(5);
        assert!(buf.is_empty());
    }

    #[test]
    fn drop_prefix_of_zero_is_noop() {
        let mut buf = ByteBuf::from(&b"abc"[..]);
        buf.drop_prefix(0);
        assert_eq!(buf.as_slice(), b"abc");
    }

    #[test]
    fn clear_resets_contents() {
        let mut buf = ByteBuf::from(&b"residue"[..]);
        buf.clear();
        assert!(buf.is_empty());
        buf.append(b"new");
        assert_eq!(buf.as_slice(), b"new");
    }

    #[test]
    fn open_gap_shifts_tail_right() {
        let mut buf = ByteBuf::from(&b"abXY"[..]);
        buf.open_gap(2, 3);
        assert_eq!(buf.len(), 7);
        assert_eq!(&buf.as_slice()[..2], b"ab");
        assert_eq!(&buf.as_slice()[5..], b"XY");
    }

    #[test]
    fn open_gap_at_end_just_grows() {
        let mut buf = ByteBuf::from(&b"ab"[..]);
        buf.open_gap(2, 2);
        assert_eq!(buf.len(), 4);
        assert_eq!(&buf.as_slice()[..2], b"ab");
    }

    #[test]
    fn truncate_discards_tail() {
        let mut buf = ByteBuf::from(&b"abcdef"[..]);
        buf.truncate(3);
        assert_eq!(buf.as_slice(), b"abc");
    }
}
