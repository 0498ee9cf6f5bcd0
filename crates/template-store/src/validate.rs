//! Load-time checks for template documents.

use crate::error::TemplateError;
use core_types::Template;
use serde_json::Value;

fn invalid(store_id: &str, reason: String) -> TemplateError {
    TemplateError::Validation {
        template_id: store_id.to_string(),
        reason,
    }
}

fn require_string(object: &Value, key: &str, path: &str) -> Result<(), String> {
    match object.get(key) {
        None | Some(Value::Null) => Err(format!("{} is missing", path)),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(format!("{} must be a string", path)),
    }
}

/// Checks that the raw document carries every field a template cannot do without.
///
/// Runs before typed parsing so that an absent field is reported by name as a
/// validation failure instead of surfacing as a parse error.
pub fn check_required_fields(store_id: &str, document: &Value) -> Result<(), TemplateError> {
    if !document.is_object() {
        return Err(invalid(store_id, "document is not a JSON object".into()));
    }
    for key in ["template_id", "name", "report_title"] {
        require_string(document, key, key).map_err(|r| invalid(store_id, r))?;
    }

    let sections = match document.get("sections") {
        None | Some(Value::Null) => return Err(invalid(store_id, "sections is missing".into())),
        Some(Value::Array(sections)) => sections,
        Some(_) => return Err(invalid(store_id, "sections must be an array".into())),
    };
    for (i, section) in sections.iter().enumerate() {
        if !section.is_object() {
            return Err(invalid(store_id, format!("sections[{}] is not an object", i)));
        }
        for key in ["title", "commentary_template"] {
            require_string(section, key, &format!("sections[{}].{}", i, key))
                .map_err(|r| invalid(store_id, r))?;
        }
    }

    Ok(())
}

/// Checks the brace structure of a placeholder template.
///
/// Every `{` must be closed by a `}` before the next `{`; a `}` without an open `{` and
/// an empty `{}` are rejected. Names themselves are not checked here: whether a name
/// resolves depends on the fund being composed.
pub fn check_placeholders(text: &str) -> Result<(), String> {
    let mut open: Option<usize> = None;

    for (pos, ch) in text.char_indices() {
        match (ch, open) {
            ('{', None) => open = Some(pos),
            ('{', Some(start)) => {
                return Err(format!(
                    "nested '{{' at byte {} inside placeholder opened at byte {}",
                    pos, start
                ));
            }
            ('}', None) => return Err(format!("unmatched '}}' at byte {}", pos)),
            ('}', Some(start)) if pos == start + 1 => {
                return Err(format!("empty placeholder at byte {}", start));
            }
            ('}', Some(_)) => open = None,
            _ => {}
        }
    }

    match open {
        Some(start) => Err(format!("unclosed '{{' at byte {}", start)),
        None => Ok(()),
    }
}

/// Validates a parsed template stored under `store_id`.
///
/// Section titles are plain text and are not checked for placeholders.
pub fn validate_template(store_id: &str, template: &Template) -> Result<(), TemplateError> {
    let fail = |reason: String| invalid(store_id, reason);

    if template.template_id.trim().is_empty() {
        return Err(fail("template_id is empty".into()));
    }
    if template.template_id != store_id {
        return Err(fail(format!(
            "template_id '{}' does not match its store id",
            template.template_id
        )));
    }
    if template.name.trim().is_empty() {
        return Err(fail("name is empty".into()));
    }
    if template.report_title.trim().is_empty() {
        return Err(fail("report_title is empty".into()));
    }
    if template.sections.is_empty() {
        return Err(fail("at least one section is required".into()));
    }

    check_placeholders(&template.report_title)
        .map_err(|e| fail(format!("report_title: {}", e)))?;
    check_placeholders(&template.report_subtitle)
        .map_err(|e| fail(format!("report_subtitle: {}", e)))?;

    for (i, section) in template.sections.iter().enumerate() {
        if section.title.trim().is_empty() {
            return Err(fail(format!("sections[{}].title is empty", i)));
        }
        if matches!(&section.requires_data, Some(tag) if tag.trim().is_empty()) {
            return Err(fail(format!("sections[{}].requires_data is empty", i)));
        }
        check_placeholders(&section.commentary_template)
            .map_err(|e| fail(format!("sections[{}].commentary_template: {}", i, e)))?;
    }

    Ok(())
}
