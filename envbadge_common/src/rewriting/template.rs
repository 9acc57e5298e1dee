use std::collections::HashMap;

pub const PLACEHOLDER_DOCUMENT_TITLE_PREFIX: &str = "document_title_prefix";
pub const PLACEHOLDER_BACKGROUND_COLOR: &str = "background_color";

const VAR_START: &str = "${";
const VAR_END: char = '}';

/// Replaces `${key}` placeholders with values fixed at construction.
///
/// Placeholders whose key is not in the mapping are left as they are, delimiters included.
/// Replacement values are inserted literally and never scanned for further placeholders.
#[derive(Debug, Clone, Default)]
pub struct ConfigSubstitution {
    values: HashMap<String, String>,
}

impl ConfigSubstitution {
    /// The mapping is copied, later changes to `values` do not reach this instance.
    pub fn new(values: &HashMap<String, String>) -> Self {
        Self {
            values: values.clone(),
        }
    }

    pub fn replace(&self, source: &str) -> String {
        let mut output = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find(VAR_START) {
            output.push_str(&rest[..start]);
            let after_start = &rest[start + VAR_START.len()..];

            let value = after_start
                .find(VAR_END)
                .and_then(|end| self.values.get(&after_start[..end]).map(|v| (end, v)));

            match value {
                Some((end, value)) => {
                    output.push_str(value);
                    rest = &after_start[end + 1..];
                }
                None => {
                    // Unknown or unterminated, keep the delimiter and rescan what follows it.
                    output.push_str(VAR_START);
                    rest = after_start;
                }
            }
        }

        output.push_str(rest);
        output
    }

    pub fn replace_optional(&self, source: Option<&str>) -> Option<String> {
        source.map(|source| self.replace(source))
    }
}
