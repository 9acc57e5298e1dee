use std::collections::HashMap;

use scorched::{logf, LogData, LogImportance};

use crate::{
    rewriting::{
        color::BackgroundColor,
        rewriter::Rewriter,
        template::{
            ConfigSubstitution, PLACEHOLDER_BACKGROUND_COLOR, PLACEHOLDER_DOCUMENT_TITLE_PREFIX,
        },
    },
    settings::BadgeSettings,
};

pub const BAR_DIV_ID: &str = "aem-environment-badge-bar";
pub const MARKER_START: &str = "<!-- AEM Environment Badge - Start -->";
pub const MARKER_END: &str = "<!-- AEM Environment Badge - End -->";

/// Everything after the last occurrence of this is replaced by the injected blocks plus the tail
/// itself.
pub const CLOSING_TAIL: &str = "</body></html>";

const TITLE_PREFIX_SCRIPT: &str = include_str!("title_prefix.html");
const BADGE_BAR_STYLE: &str = include_str!("badge_bar.html");

/// Injects the title prefix script and the badge bar in front of the closing tail of a captured
/// document.
pub struct BadgeRewriter {
    substitution: ConfigSubstitution,
    title_prefix: bool,
    badge: bool,
}

impl BadgeRewriter {
    pub fn new(settings: &BadgeSettings) -> Self {
        let color = BackgroundColor::of(Some(settings.badge_background_color.as_str()));

        let values = HashMap::from([
            (
                PLACEHOLDER_DOCUMENT_TITLE_PREFIX.to_string(),
                escape_js_string(&settings.document_title_prefix),
            ),
            (
                PLACEHOLDER_BACKGROUND_COLOR.to_string(),
                color.hex_code().to_string(),
            ),
        ]);

        Self {
            substitution: ConfigSubstitution::new(&values),
            title_prefix: settings.title_prefix_enabled(),
            badge: settings.badge_enabled(),
        }
    }

    fn injection(&self) -> String {
        let mut injected = String::new();

        injected.push('\n');
        injected.push_str(MARKER_START);
        injected.push('\n');

        if self.title_prefix {
            injected.push_str(&self.substitution.replace(TITLE_PREFIX_SCRIPT));
            injected.push('\n');
        }

        if self.badge {
            injected.push_str(&format!("<div id={}></div>", BAR_DIV_ID));
            injected.push('\n');
            injected.push_str(&self.substitution.replace(BADGE_BAR_STYLE));
            injected.push('\n');
        }

        injected.push_str(MARKER_END);
        injected.push('\n');
        injected.push_str(CLOSING_TAIL);

        injected
    }
}

impl Rewriter for BadgeRewriter {
    fn rewrite(&self, input: String) -> String {
        let Some(split) = input.rfind(CLOSING_TAIL) else {
            logf!(
                Warning,
                "Captured document has no closing {} tail, leaving it unmodified",
                CLOSING_TAIL
            );
            return input;
        };

        let mut output = input;
        output.truncate(split);
        output.push_str(&self.injection());
        output
    }
}

/// The prefix lands inside a single-quoted script literal.
fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '<' => escaped.push_str("\\x3c"),
            c => escaped.push(c),
        }
    }
    escaped
}
