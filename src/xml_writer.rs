//! Buffered XML writer with optional indentation

/// Number of spaces per nesting level when indentation is on
const INDENT_WIDTH: usize = 1;

/// Fast XML writer that builds markup in an owned byte buffer.
///
/// All methods are infallible; the caller decides when the buffered bytes
/// go anywhere. Text and attribute values are escaped, element names are not.
#[derive(Debug, Clone)]
pub struct XmlWriter {
    buffer: Vec<u8>,
    indent: bool,
    depth: usize,
}

impl XmlWriter {
    pub fn new(indent: bool) -> Self {
        XmlWriter {
            buffer: Vec::with_capacity(8192), // 8KB buffer
            indent,
            depth: 0,
        }
    }

    /// Writer that starts inside `depth` already-open elements
    pub fn nested(indent: bool, depth: usize) -> Self {
        let mut writer = Self::new(indent);
        writer.depth = depth;
        writer
    }

    pub fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Take the buffered bytes, leaving the writer empty at the same depth
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buffer, Vec::with_capacity(8192))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Write raw bytes directly
    #[inline]
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write string data
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.write_raw(s.as_bytes())
    }

    /// Write the XML declaration
    pub fn declaration(&mut self) {
        self.write_raw(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    /// Write XML element start tag, left open for attributes
    #[inline]
    pub fn start_element(&mut self, name: &str) {
        self.write_indent();
        self.write_raw(b"<");
        self.write_str(name);
    }

    /// Write attribute
    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) {
        self.write_raw(b" ");
        self.write_str(name);
        self.write_raw(b"=\"");
        self.write_escaped(value);
        self.write_raw(b"\"");
    }

    /// Close start tag
    #[inline]
    pub fn close_start_tag(&mut self) {
        self.write_raw(b">");
        self.write_newline();
        self.depth += 1;
    }

    /// Close a start tag as a self-closing element
    #[inline]
    pub fn close_empty(&mut self) {
        self.write_raw(b"/>");
        self.write_newline();
    }

    /// Write XML element end tag
    #[inline]
    pub fn end_element(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.write_indent();
        self.write_raw(b"</");
        self.write_str(name);
        self.write_raw(b">");
        self.write_newline();
    }

    /// Write `<name>text</name>` on a single line
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.write_indent();
        self.write_raw(b"<");
        self.write_str(name);
        self.write_raw(b">");
        self.write_escaped(text);
        self.write_raw(b"</");
        self.write_str(name);
        self.write_raw(b">");
        self.write_newline();
    }

    /// Terminate the current line unless it already is
    pub fn ensure_newline(&mut self) {
        if self.buffer.last() != Some(&b'\n') {
            self.buffer.push(b'\n');
        }
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) {
        for byte in text.bytes() {
            match byte {
                b'&' => self.write_raw(b"&amp;"),
                b'<' => self.write_raw(b"&lt;"),
                b'>' => self.write_raw(b"&gt;"),
                b'"' => self.write_raw(b"&quot;"),
                b'\'' => self.write_raw(b"&apos;"),
                _ => self.buffer.push(byte),
            }
        }
    }

    fn write_indent(&mut self) {
        if self.indent {
            let width = self.depth * INDENT_WIDTH;
            self.buffer.resize(self.buffer.len() + width, b' ');
        }
    }

    fn write_newline(&mut self) {
        if self.indent {
            self.buffer.push(b'\n');
        }
    }
}
