// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FormatError;

/// Wire encoding of a document payload.
///
/// The set is closed: new encodings are added here, not by processors. Tags the
/// engine does not recognize deserialize to [`Format::Unsupported`], which never
/// passes validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Format {
    Json,
    Yaml,
    Binary,
    #[serde(other)]
    Unsupported,
}

impl Format {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Binary => "BINARY",
            Format::Unsupported => "UNSUPPORTED",
        }
    }

    /// Check that `payload` is structurally well-formed for this format.
    pub fn validate(&self, payload: &[u8]) -> Result<(), FormatError> {
        match self {
            Format::Json => serde_json::from_slice::<serde::de::IgnoredAny>(payload)
                .map(|_| ())
                .map_err(|e| FormatError::Malformed {
                    format: *self,
                    reason: e.to_string(),
                }),
            Format::Yaml => {
                // A stream of several `---` separated documents is well-formed
                // when each of them is.
                for document in serde_yaml::Deserializer::from_slice(payload) {
                    serde_yaml::Value::deserialize(document).map_err(|e| {
                        FormatError::Malformed {
                            format: *self,
                            reason: e.to_string(),
                        }
                    })?;
                }
                Ok(())
            }
            Format::Binary => Ok(()),
            Format::Unsupported => Err(FormatError::Unsupported),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    /// Accepts exactly the wire names, as deserialization does.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JSON" => Ok(Format::Json),
            "YAML" => Ok(Format::Yaml),
            "BINARY" => Ok(Format::Binary),
            _ => Err(FormatError::Unsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_table_driven() {
        struct TestCase {
            name: &'static str,
            format: Format,
            payload: &'static [u8],
            valid: bool,
        }

        let test_cases = vec![
            TestCase { name: "json object", format: Format::Json, payload: br#"{"a":[1,2]}"#, valid: true },
            TestCase { name: "json scalar", format: Format::Json, payload: b"42", valid: true },
            TestCase { name: "json truncated", format: Format::Json, payload: br#"{"a":"#, valid: false },
            TestCase { name: "json empty", format: Format::Json, payload: b"", valid: false },
            TestCase { name: "json trailing garbage", format: Format::Json, payload: b"{} x", valid: false },
            TestCase { name: "yaml mapping", format: Format::Yaml, payload: b"a: 1\nb: [x, y]\n", valid: true },
            TestCase { name: "yaml unclosed flow sequence", format: Format::Yaml, payload: b"a: [1, 2\n", valid: false },
            TestCase { name: "yaml document stream", format: Format::Yaml, payload: b"a: 1\n---\nb: 2\n", valid: true },
            TestCase { name: "yaml stream with broken second document", format: Format::Yaml, payload: b"a: 1\n---\nb: [1\n", valid: false },
            TestCase { name: "binary anything", format: Format::Binary, payload: &[0xff, 0x00, 0xfe], valid: true },
            TestCase { name: "unsupported", format: Format::Unsupported, payload: b"{}", valid: false },
        ];

        for case in test_cases {
            assert_eq!(
                case.format.validate(case.payload).is_ok(),
                case.valid,
                "case '{}'",
                case.name
            );
        }
    }

    #[test]
    fn test_unknown_wire_tag_is_unsupported() {
        let format: Format = serde_json::from_str(r#""PROTOBUF""#).unwrap();
        assert_eq!(format, Format::Unsupported);
        assert!(matches!(format.validate(b"{}"), Err(FormatError::Unsupported)));
    }

    #[test]
    fn test_from_str_matches_wire_names() {
        for format in [Format::Json, Format::Yaml, Format::Binary] {
            let parsed: Format = format.wire_name().parse().unwrap();
            let deserialized: Format =
                serde_json::from_value(serde_json::json!(format.wire_name())).unwrap();
            assert_eq!(parsed, format);
            assert_eq!(deserialized, format);
        }

        // Lower case is not a wire name on either path.
        assert!("json".parse::<Format>().is_err());
        let lower: Format = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(lower, Format::Unsupported);
        assert!("xml".parse::<Format>().is_err());
    }
}
