//! Provenance header recording how a template was generated

use super::WriterConfig;

const FORMAT_LINE: &str =
    "# Format: KeyTemplate in text format, see https://github.com/google/tink/blob/master/proto/tink.proto\n";

/// Build the `#` comment block that precedes a written template
///
/// The key format is quoted as given, embedded quotes are not escaped.
/// Each line of a multi-line key format gets its own `#     ` prefix.
pub fn provenance_header(type_url: &str, key_format: Option<&str>, config: &WriterConfig) -> String {
    let mut header = String::from(FORMAT_LINE);
    header.push_str("# Generated with command:\n");
    header.push_str(&format!("#     {} \\\n", config.command));
    header.push_str(&format!("#     --type-url {} \\\n", type_url));
    if let Some(text) = key_format {
        let text = text.replace('\n', "\n#     ");
        header.push_str(&format!("#     --key-format \"{}\"\n", text));
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_without_key_format() {
        let header = provenance_header("type.example.com/A", None, &WriterConfig::default());
        assert_eq!(
            header,
            "# Format: KeyTemplate in text format, see https://github.com/google/tink/blob/master/proto/tink.proto\n\
             # Generated with command:\n\
             #     tinkey create-key-template \\\n\
             #     --type-url type.example.com/A \\\n"
        );
    }

    #[test]
    fn test_header_with_key_format() {
        let header = provenance_header("type.example.com/A", Some("key_size: 32"), &WriterConfig::default());
        assert!(header.ends_with("#     --type-url type.example.com/A \\\n#     --key-format \"key_size: 32\"\n"));
    }

    #[test]
    fn test_key_format_quotes_are_verbatim() {
        let header = provenance_header("t/A", Some(r#"label: "x""#), &WriterConfig::default());
        assert!(header.ends_with("#     --key-format \"label: \"x\"\"\n"));
    }

    #[test]
    fn test_empty_key_format_still_gets_a_line() {
        let header = provenance_header("t/A", Some(""), &WriterConfig::default());
        assert!(header.ends_with("#     --key-format \"\"\n"));
    }

    #[test]
    fn test_multiline_key_format_stays_in_comment() {
        let header = provenance_header("t/A", Some("key_size: 32\nversion: 0"), &WriterConfig::default());
        assert!(header.ends_with("#     --key-format \"key_size: 32\n#     version: 0\"\n"));
        assert!(header.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_custom_command() {
        let config = WriterConfig::new().with_command("keytool template");
        let header = provenance_header("t/A", None, &config);
        assert!(header.contains("#     keytool template \\\n"));
    }
}
