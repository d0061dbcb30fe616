// NETCONF 1.0 end-of-message framing (RFC 6242 §4.3).
//
// Every message is followed by the literal `]]>]]>`. The session only
// advertises base:1.0, so chunked framing is never negotiated.

/// End-of-message delimiter.
pub const EOM: &str = "]]>]]>";

/// Append the delimiter to an outgoing message.
pub fn frame(message: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + EOM.len() + 1);
    out.extend_from_slice(message.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(EOM.as_bytes());
    out
}

/// Accumulates channel data and yields complete messages.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Pop the next complete message, without its delimiter.
    pub fn next_message(&mut self) -> Option<String> {
        let delim = EOM.as_bytes();
        let end = self
            .buf
            .windows(delim.len())
            .position(|window| window == delim)?;

        let message = String::from_utf8_lossy(&self.buf[..end]).trim().to_owned();
        self.buf.drain(..end + delim.len());
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_appends_delimiter() {
        let framed = frame("<hello/>");
        assert_eq!(framed, b"<hello/>\n]]>]]>".to_vec());
    }

    #[test]
    fn split_across_reads() {
        let mut fb = FrameBuffer::new();
        fb.push(b"<rpc-reply><ok/></rpc");
        assert_eq!(fb.next_message(), None);
        fb.push(b"-reply>]]>");
        assert_eq!(fb.next_message(), None);
        fb.push(b"]]>\n<hel");
        assert_eq!(
            fb.next_message().as_deref(),
            Some("<rpc-reply><ok/></rpc-reply>")
        );
        fb.push(b"lo/>]]>]]>");
        assert_eq!(fb.next_message().as_deref(), Some("<hello/>"));
        assert_eq!(fb.next_message(), None);
    }

    #[test]
    fn two_messages_in_one_read() {
        let mut fb = FrameBuffer::new();
        fb.push(b"<a/>]]>]]><b/>]]>]]>");
        assert_eq!(fb.next_message().as_deref(), Some("<a/>"));
        assert_eq!(fb.next_message().as_deref(), Some("<b/>"));
        assert_eq!(fb.next_message(), None);
    }
}
