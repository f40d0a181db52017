//! Writing a provenance header and template body to a byte sink

use std::io::Write;

use crate::template::{KeyTemplate, TemplateError};

use super::header::provenance_header;
use super::text::render_key_template;
use super::WriterConfig;

/// Write the header, then the canonical template body
///
/// By default this makes two `write_all` calls. If the second one fails
/// the header stays in the sink. With [`WriterConfig::with_single_write`]
/// both parts go out in one call. The sink is never flushed.
pub fn write_template<W>(
    sink: &mut W,
    type_url: &str,
    key_format: Option<&str>,
    template: &KeyTemplate,
    config: &WriterConfig,
) -> Result<(), TemplateError>
where
    W: Write + ?Sized,
{
    let header = provenance_header(type_url, key_format, config);
    let body = render_key_template(template);
    let total = header.len() + body.len();

    if config.single_write {
        let mut buffer = header;
        buffer.push_str(&body);
        sink.write_all(buffer.as_bytes())?;
    } else {
        sink.write_all(header.as_bytes())?;
        sink.write_all(body.as_bytes()).map_err(|e| {
            tracing::warn!(type_url, "body write failed after header was written");
            e
        })?;
    }

    tracing::debug!(type_url, bytes = total, "wrote key template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Message, Value};
    use pretty_assertions::assert_eq;
    use std::io;

    /// Sink that accepts a fixed number of writes, then fails
    struct FailingSink {
        data: Vec<u8>,
        writes_left: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.writes_left -= 1;
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn template() -> KeyTemplate {
        KeyTemplate::new("t/A").with_value(Message::new("F").with_field(1, "key_size", Value::UInt(16)))
    }

    #[test]
    fn test_writes_header_then_body() {
        let mut out = Vec::new();
        write_template(&mut out, "t/A", Some("key_size: 16"), &template(), &WriterConfig::default())
            .expect("Should write");
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Format: KeyTemplate in text format"));
        assert!(text.ends_with("#     --key-format \"key_size: 16\"\ntype_url: \"t/A\"\nvalue {\n  key_size: 16\n}\n"));
    }

    #[test]
    fn test_single_write_matches_two_writes() {
        let mut two = Vec::new();
        let mut one = Vec::new();
        write_template(&mut two, "t/A", Some("key_size: 16"), &template(), &WriterConfig::default()).unwrap();
        write_template(
            &mut one,
            "t/A",
            Some("key_size: 16"),
            &template(),
            &WriterConfig::new().with_single_write(true),
        )
        .unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_failure_on_body_keeps_header() {
        let mut sink = FailingSink {
            data: Vec::new(),
            writes_left: 1,
        };
        let err = write_template(&mut sink, "t/A", None, &KeyTemplate::new("t/A"), &WriterConfig::default())
            .unwrap_err();
        assert!(matches!(err, TemplateError::WriteFailure(_)));
        let expected = provenance_header("t/A", None, &WriterConfig::default());
        assert_eq!(String::from_utf8(sink.data).unwrap(), expected);
    }

    #[test]
    fn test_failure_in_single_write_mode_leaves_sink_empty() {
        let mut sink = FailingSink {
            data: Vec::new(),
            writes_left: 0,
        };
        let config = WriterConfig::new().with_single_write(true);
        let err = write_template(&mut sink, "t/A", None, &KeyTemplate::new("t/A"), &config).unwrap_err();
        assert!(matches!(err, TemplateError::WriteFailure(_)));
        assert!(sink.data.is_empty());
    }
}
