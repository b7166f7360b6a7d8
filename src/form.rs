use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Form delivered by the backend, either as a described field list or as
/// already-rendered markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormFragment {
    Fields(FormSpec),
    Markup(String),
}

impl FormFragment {
    pub fn fields(&self) -> &[FormField] {
        match self {
            FormFragment::Fields(spec) => &spec.fields,
            FormFragment::Markup(_) => &[],
        }
    }

    pub fn is_submittable(&self) -> bool {
        matches!(self, FormFragment::Fields(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub fields: Vec<FormField>,
    #[serde(default, alias = "non_field_errors")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub widget: Widget,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    Hidden,
}

impl Widget {
    pub fn is_choice(self) -> bool {
        matches!(self, Widget::Select | Widget::Radio)
    }

    pub fn is_typed(self) -> bool {
        matches!(
            self,
            Widget::Text | Widget::Password | Widget::Email | Widget::Number
        )
    }
}

/// `[value, label]` pair; the backend sends team ids as numbers and the
/// "no choice" entry as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Value, String)", into = "(String, String)")]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl From<(Value, String)> for Choice {
    fn from((value, label): (Value, String)) -> Self {
        Self {
            value: value_to_string(&value),
            label,
        }
    }
}

impl From<Choice> for (String, String) {
    fn from(choice: Choice) -> Self {
        (choice.value, choice.label)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "on".to_string(),
        Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

/// Editable values for a form, one slot per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInputs {
    pub values: Vec<String>,
}

impl FormInputs {
    pub fn from_fragment(fragment: &FormFragment) -> Self {
        let values = fragment
            .fields()
            .iter()
            .map(|field| {
                let initial = field.value.as_ref().map(value_to_string).unwrap_or_default();
                if field.widget == Widget::Password {
                    // Browsers never echo passwords back into a re-rendered form.
                    return String::new();
                }
                if field.widget.is_choice() && initial.is_empty() {
                    return field
                        .choices
                        .first()
                        .map(|c| c.value.clone())
                        .unwrap_or_default();
                }
                initial
            })
            .collect();
        Self { values }
    }

    pub fn value(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn insert_char(&mut self, idx: usize, field: &FormField, ch: char) {
        if !field.widget.is_typed() {
            return;
        }
        if field.widget == Widget::Number && !(ch.is_ascii_digit() || ch == '-' || ch == '.') {
            return;
        }
        if let Some(value) = self.values.get_mut(idx) {
            value.push(ch);
        }
    }

    pub fn backspace(&mut self, idx: usize, field: &FormField) {
        if !field.widget.is_typed() {
            return;
        }
        if let Some(value) = self.values.get_mut(idx) {
            value.pop();
        }
    }

    /// Step through a select/radio field's choices, wrapping at both ends.
    pub fn cycle_choice(&mut self, idx: usize, field: &FormField, forward: bool) {
        if !field.widget.is_choice() || field.choices.is_empty() {
            return;
        }
        let Some(value) = self.values.get_mut(idx) else {
            return;
        };
        let len = field.choices.len();
        let current = field.choices.iter().position(|c| c.value == *value);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        *value = field.choices[next].value.clone();
    }

    pub fn toggle(&mut self, idx: usize, field: &FormField) {
        if field.widget != Widget::Checkbox {
            return;
        }
        if let Some(value) = self.values.get_mut(idx) {
            if value.is_empty() {
                *value = "on".to_string();
            } else {
                value.clear();
            }
        }
    }

    /// Label of the currently selected choice, for display.
    pub fn choice_label<'a>(&self, idx: usize, field: &'a FormField) -> Option<&'a str> {
        let value = self.value(idx);
        field
            .choices
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label.as_str())
    }

    pub fn encode(&self, fragment: &FormFragment, csrf_token: Option<&str>) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(token) = csrf_token.filter(|t| !t.is_empty()) {
            pairs.push((CSRF_FIELD.to_string(), token.to_string()));
        }
        for (idx, field) in fragment.fields().iter().enumerate() {
            let value = self.value(idx);
            if field.widget == Widget::Checkbox && value.is_empty() {
                continue;
            }
            pairs.push((field.name.clone(), value.to_string()));
        }
        pairs
    }
}

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(div|p|li|ul|label|tr|h[1-6])\s*>").expect("valid block regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Flatten rendered form markup into display lines.
pub fn markup_lines(markup: &str) -> Vec<String> {
    let broken = BLOCK_BREAK.replace_all(markup, "\n");
    let stripped = TAG.replace_all(&broken, "");
    stripped
        .lines()
        .map(|line| decode_entities(line.trim()))
        .filter(|line| !line.is_empty())
        .collect()
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, widget: Widget) -> FormField {
        FormField {
            name: name.to_string(),
            label: name.to_string(),
            widget,
            choices: Vec::new(),
            value: None,
            required: false,
            help_text: None,
            errors: Vec::new(),
        }
    }

    #[test]
    fn choices_accept_numeric_and_null_values() {
        let raw = r#"{"fields":[{"name":"match_winner","widget":"radio","choices":[[3,"Lions"],[null,"----------"]]}]}"#;
        let fragment: FormFragment = serde_json::from_str(raw).unwrap();
        let choices = &fragment.fields()[0].choices;
        assert_eq!(choices[0].value, "3");
        assert_eq!(choices[1].value, "");
    }

    #[test]
    fn plain_string_is_markup() {
        let fragment: FormFragment = serde_json::from_str(r#""<p>hi</p>""#).unwrap();
        assert!(!fragment.is_submittable());
    }

    #[test]
    fn number_widget_rejects_letters() {
        let f = field("goals", Widget::Number);
        let mut inputs = FormInputs {
            values: vec![String::new()],
        };
        inputs.insert_char(0, &f, '2');
        inputs.insert_char(0, &f, 'x');
        assert_eq!(inputs.value(0), "2");
    }

    #[test]
    fn cycle_choice_wraps_backwards() {
        let mut f = field("winner", Widget::Select);
        f.choices = vec![
            Choice {
                value: "1".to_string(),
                label: "A".to_string(),
            },
            Choice {
                value: "2".to_string(),
                label: "B".to_string(),
            },
        ];
        let mut inputs = FormInputs {
            values: vec!["1".to_string()],
        };
        inputs.cycle_choice(0, &f, false);
        assert_eq!(inputs.value(0), "2");
        assert_eq!(inputs.choice_label(0, &f), Some("B"));
    }

    #[test]
    fn markup_lines_strip_tags_and_entities() {
        let lines = markup_lines(
            "<div><label for=\"id_u\">Username:</label><input id=\"id_u\"></div><ul class=\"errorlist\"><li>Tom &amp; Jerry</li></ul>",
        );
        assert_eq!(lines, vec!["Username:", "Tom & Jerry"]);
    }
}
