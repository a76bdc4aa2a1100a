use std::fmt;

use wpb_types::normalize_name;

/// One parameter of a template invocation.
///
/// Raw key and value text is kept exactly as written (including
/// surrounding whitespace) so serialization is byte-stable. Positional
/// parameters have no raw key; they receive implicit numeric lookup
/// keys ("1", "2", ...) in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    raw_key: Option<String>,
    raw_value: String,
}

impl Param {
    pub(crate) fn named(raw_key: &str, raw_value: &str) -> Self {
        Self {
            raw_key: Some(raw_key.to_string()),
            raw_value: raw_value.to_string(),
        }
    }

    pub(crate) fn positional(raw_value: String) -> Self {
        Self {
            raw_key: None,
            raw_value,
        }
    }

    /// Raw key text, `None` for a positional parameter.
    pub fn raw_key(&self) -> Option<&str> {
        self.raw_key.as_deref()
    }

    /// Raw value text, exactly as written.
    pub fn value(&self) -> &str {
        &self.raw_value
    }
}

/// A template invocation: a raw name plus ordered parameters.
///
/// Parameter lookup keys are trimmed named keys or implicit positional
/// numbers; named and positional keys coexist. When the same key is
/// declared twice the last declaration wins for lookup, but every
/// declaration is preserved for serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    raw_name: String,
    params: Vec<Param>,
}

impl Template {
    pub(crate) fn from_raw(raw_name: String, params: Vec<Param>) -> Self {
        Self { raw_name, params }
    }

    /// The invocation name, trimmed and with underscores replaced by
    /// spaces. Casing is preserved.
    pub fn name(&self) -> String {
        normalize_name(&self.raw_name)
    }

    /// The name exactly as written between `{{` and the first `|`.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Index of the parameter matching `key`, resolving implicit
    /// positional keys. Last declaration wins.
    fn lookup(&self, key: &str) -> Option<usize> {
        let mut next_positional = 0usize;
        let mut found = None;
        for (i, p) in self.params.iter().enumerate() {
            let matches = match p.raw_key() {
                Some(raw) => raw.trim() == key,
                None => {
                    next_positional += 1;
                    next_positional.to_string() == key
                }
            };
            if matches {
                found = Some(i);
            }
        }
        found
    }

    /// Raw value of the parameter matching `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(|i| self.params[i].value())
    }

    /// Trimmed value of the parameter matching `key`.
    pub fn param_trimmed(&self, key: &str) -> Option<String> {
        self.param(key).map(|v| v.trim().to_string())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Overwrite the value of an existing parameter (keeping its raw key
    /// text) or append a new named parameter at the end.
    pub fn set_param(&mut self, key: &str, value: &str) {
        match self.lookup(key) {
            Some(i) => self.params[i].raw_value = value.to_string(),
            None => self.params.push(Param::named(key, value)),
        }
    }

    /// Insert a new named parameter before all existing parameters.
    pub fn insert_param_front(&mut self, key: &str, value: &str) {
        self.params.insert(0, Param::named(key, value));
    }

    /// Append raw content to an existing parameter's value, or create
    /// the parameter when it is missing.
    pub fn append_to_param(&mut self, key: &str, extra: &str) {
        match self.lookup(key) {
            Some(i) => self.params[i].raw_value.push_str(extra),
            None => self.params.push(Param::named(key, extra)),
        }
    }

    /// Parse the value of the parameter matching `key` as a nested
    /// document. The result is an owned tree; write edits back with
    /// [`Template::set_param`] and the serialized nested document.
    pub fn parse_param(&self, key: &str) -> Option<crate::Document> {
        self.param(key).map(crate::Document::parse)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}", self.raw_name)?;
        for p in &self.params {
            match p.raw_key() {
                Some(key) => write!(f, "|{}={}", key, p.value())?,
                None => write!(f, "|{}", p.value())?,
            }
        }
        write!(f, "}}}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    fn first_template(text: &str) -> super::Template {
        Document::parse(text).templates().next().unwrap().clone()
    }

    #[test]
    fn name_is_normalized_but_raw_name_kept() {
        let tpl = first_template("{{ WikiProject_Ships \n|importance=High}}");
        assert_eq!(tpl.name(), "WikiProject Ships");
        assert_eq!(tpl.raw_name(), " WikiProject_Ships \n");
    }

    #[test]
    fn keys_are_trimmed_for_lookup() {
        let tpl = first_template("{{t| importance = High }}");
        assert_eq!(tpl.param("importance"), Some(" High "));
        assert_eq!(tpl.param_trimmed("importance"), Some("High".to_string()));
    }

    #[test]
    fn duplicate_key_last_declaration_wins() {
        let tpl = first_template("{{t|class=A|class=B}}");
        assert_eq!(tpl.param("class"), Some("B"));
        // Both declarations still serialize.
        assert_eq!(tpl.to_string(), "{{t|class=A|class=B}}");
    }

    #[test]
    fn explicit_and_implicit_positional_keys_coexist() {
        let tpl = first_template("{{t|1=explicit|named=x}}");
        assert_eq!(tpl.param("1"), Some("explicit"));
        let tpl = first_template("{{t|implicit}}");
        assert_eq!(tpl.param("1"), Some("implicit"));
    }

    #[test]
    fn set_param_overwrites_preserving_raw_key() {
        let mut tpl = first_template("{{t| importance =Low}}");
        tpl.set_param("importance", "Top");
        assert_eq!(tpl.to_string(), "{{t| importance =Top}}");
    }

    #[test]
    fn set_param_appends_when_missing() {
        let mut tpl = first_template("{{t|class=B}}");
        tpl.set_param("importance", "High");
        assert_eq!(tpl.to_string(), "{{t|class=B|importance=High}}");
    }

    #[test]
    fn insert_param_front() {
        let mut tpl = first_template("{{t|class=B}}");
        tpl.insert_param_front("importance", "Top");
        assert_eq!(tpl.to_string(), "{{t|importance=Top|class=B}}");
    }

    #[test]
    fn append_to_param_keeps_existing_content() {
        let mut tpl = first_template("{{shell|1=\n{{a}}\n}}");
        tpl.append_to_param("1", "{{b}}\n");
        assert_eq!(tpl.to_string(), "{{shell|1=\n{{a}}\n{{b}}\n}}");
    }

    #[test]
    fn append_creates_missing_param() {
        let mut tpl = first_template("{{shell}}");
        tpl.append_to_param("1", "\n{{a}}\n");
        assert_eq!(tpl.to_string(), "{{shell|1=\n{{a}}\n}}");
    }

    #[test]
    fn parse_param_yields_nested_tree() {
        let tpl = first_template("{{shell|1=\n{{a|importance=Mid}}\n{{b}}\n}}");
        let inner = tpl.parse_param("1").unwrap();
        let names: Vec<String> = inner.templates().map(|t| t.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn nested_edit_via_reserialize() {
        let mut tpl = first_template("{{shell|1=\n{{a|importance=Low}}\n}}");
        let mut inner = tpl.parse_param("1").unwrap();
        inner
            .templates_mut()
            .next()
            .unwrap()
            .set_param("importance", "Top");
        tpl.set_param("1", &inner.to_string());
        assert_eq!(tpl.to_string(), "{{shell|1=\n{{a|importance=Top}}\n}}");
    }
}
