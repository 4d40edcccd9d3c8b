//! `info.plist` descriptor generation.
//!
//! The descriptor is a fixed XML template parameterized only by the bundle
//! name, which fills both `CFBundleDisplayName` and `CFBundleIconFile`.

use crate::bundler::error::{Context, Result};
use handlebars::Handlebars;
use std::collections::BTreeMap;

const TEMPLATE_NAME: &str = "info.plist";

/// Descriptor template. No trailing newline.
pub const DESCRIPTOR_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>CFBundleDisplayName</key>
  <string>{{name}}</string>
  <key>CFBundleIconFile</key>
  <string>{{name}}</string>
</dict>
</plist>"#;

/// Renders the descriptor for `name`.
///
/// The name is XML-escaped, so names containing `&` or `<` still produce a
/// well-formed property list.
pub fn render_descriptor(name: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(xml_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string(TEMPLATE_NAME, DESCRIPTOR_TEMPLATE)
        .map_err(crate::bundler::Error::from)
        .context("failed to register descriptor template")?;

    let mut data = BTreeMap::new();
    data.insert("name", name);

    handlebars
        .render(TEMPLATE_NAME, &data)
        .map_err(crate::bundler::Error::from)
        .context("failed to render descriptor template")
}

fn xml_escape(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_matches_template_exactly() {
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
<plist version=\"1.0\">\n\
<dict>\n  <key>CFBundleDisplayName</key>\n  <string>Demo</string>\n  \
<key>CFBundleIconFile</key>\n  <string>Demo</string>\n</dict>\n</plist>";
        assert_eq!(render_descriptor("Demo").unwrap(), expected);
    }

    #[test]
    fn test_render_escapes_markup() {
        let xml = render_descriptor("Tom & <Jerry>").unwrap();
        assert!(xml.contains("<string>Tom &amp; &lt;Jerry&gt;</string>"));
    }

    #[test]
    fn test_rendered_descriptor_parses_as_plist() {
        let xml = render_descriptor("R&D").unwrap();
        let value = plist::Value::from_reader_xml(xml.as_bytes()).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(
            dict.get("CFBundleDisplayName").and_then(|v| v.as_string()),
            Some("R&D")
        );
        assert_eq!(
            dict.get("CFBundleIconFile").and_then(|v| v.as_string()),
            Some("R&D")
        );
    }
}
