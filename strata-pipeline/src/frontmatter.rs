//! Front-matter splitting.
//!
//! A front-matter block opens with a `---` line at the very start of the
//! text (after an optional BOM) and closes with a `---` or `...` line. The
//! block is YAML and must be a mapping (or empty). Text without a complete
//! block is all body.

use serde_json::Value;

use strata_core::Attributes;

use crate::error::FrontMatterError;

/// A file split into attributes and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub attributes: Attributes,
    pub body: String,
}

/// Split `input` into front-matter attributes and the remaining body.
pub fn parse(input: &str) -> Result<FrontMatter, FrontMatterError> {
    let text = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some((first, rest)) = text.split_once('\n') else {
        return Ok(body_only(input));
    };
    if first.trim_end() != "---" {
        return Ok(body_only(input));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            let attributes = parse_attributes(&rest[..offset])?;
            let body = rest[offset + line.len()..].to_string();
            return Ok(FrontMatter { attributes, body });
        }
        offset += line.len();
    }

    // Unterminated block.
    Ok(body_only(input))
}

fn body_only(input: &str) -> FrontMatter {
    FrontMatter {
        attributes: Attributes::new(),
        body: input.to_string(),
    }
}

fn parse_attributes(yaml: &str) -> Result<Attributes, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(Attributes::new());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Attributes::new()),
        _ => Err(FrontMatterError::NotMapping),
    }
}
