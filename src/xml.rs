//! Decoding of the single-string XML documents the service answers with.
//!
//! The expected shape is a bare root element whose text is the value:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <string xmlns="http://webservices.dotnethell.it/CodiceFiscale">PNCLDN87T52I119C</string>
//! ```

use crate::errors::AppError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Returns the text content of the document's root element.
///
/// Fails with [`AppError::DecodeError`] when the body is not well-formed, has no root,
/// nests elements inside the root, or carries anything but whitespace outside it.
pub fn unwrap_string(body: &str) -> Result<String, AppError> {
    let mut reader = Reader::from_str(body);
    let mut root: Option<String> = None;
    let mut value = String::new();
    let mut inside = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            AppError::DecodeError(format!(
                "malformed XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                if inside {
                    return Err(AppError::DecodeError(
                        "nested element inside single-string document".to_string(),
                    ));
                }
                if root.is_some() {
                    return Err(AppError::DecodeError(
                        "more than one root element".to_string(),
                    ));
                }
                root = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                inside = true;
            }
            Event::Empty(start) => {
                if inside {
                    return Err(AppError::DecodeError(
                        "nested element inside single-string document".to_string(),
                    ));
                }
                if root.is_some() {
                    return Err(AppError::DecodeError(
                        "more than one root element".to_string(),
                    ));
                }
                root = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
            }
            Event::End(_) => {
                inside = false;
            }
            Event::Text(text) => {
                if inside {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| AppError::DecodeError(format!("bad escape: {}", e)))?;
                    value.push_str(&unescaped);
                } else if !text.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(AppError::DecodeError(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Event::CData(cdata) => {
                if !inside {
                    return Err(AppError::DecodeError(
                        "CDATA outside the root element".to_string(),
                    ));
                }
                let raw = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|e| AppError::DecodeError(format!("CDATA is not UTF-8: {}", e)))?;
                value.push_str(&raw);
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if inside {
        return Err(AppError::DecodeError(
            "unexpected end of document inside the root element".to_string(),
        ));
    }

    match root {
        Some(name) => {
            tracing::debug!("Decoded <{}> value: {}", name, value);
            Ok(value)
        }
        None => Err(AppError::DecodeError(
            "document has no root element".to_string(),
        )),
    }
}
