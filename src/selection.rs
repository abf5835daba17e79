//! selection set accumulator
//!
//! [`SelectionSet`] is the runtime collector behind every generated
//! selector: scalar field names and nested sub-selections accumulate in
//! call order and render as one `{ ... }` block. generated selector
//! classes hold one of these and expose typed per-field methods over it.

/// ordered, deduplicating field selection for one object type
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    // call order, not schema order; re-adding a field is idempotent
    fields: Vec<String>,
    nested: Vec<(String, String)>,
}

impl SelectionSet {
    /// create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// record a scalar or enum field by name
    pub fn field(&mut self, name: &str) -> &mut Self {
        if !self.fields.iter().any(|existing| existing == name) {
            self.fields.push(name.to_string());
        }
        self
    }

    /// record a nested sub-selection under a field name; selecting the same
    /// field again replaces the stored sub-selection in place
    pub fn nested(&mut self, name: &str, sub_selection: &str) -> &mut Self {
        if let Some(entry) = self.nested.iter_mut().find(|(existing, _)| existing == name) {
            entry.1 = sub_selection.to_string();
        } else {
            self.nested.push((name.to_string(), sub_selection.to_string()));
        }
        self
    }

    /// true if nothing has been selected
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    /// render the accumulated selection as `{ field1 field2 nested { ... } }`
    ///
    /// stable across repeated calls; field order is call order. an empty
    /// selection renders `{ __typename }` since empty braces are not valid
    /// graphql.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "{ __typename }".to_string();
        }
        let mut parts: Vec<String> = self.fields.clone();
        for (name, sub_selection) in &self.nested {
            parts.push(format!("{} {}", name, sub_selection));
        }
        format!("{{ {} }}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_order_preserved() {
        let mut selection = SelectionSet::new();
        selection.field("name").field("id");
        assert_eq!(selection.render(), "{ name id }");
    }

    #[test]
    fn test_duplicate_field_is_idempotent() {
        let mut selection = SelectionSet::new();
        selection.field("id").field("name").field("id");
        assert_eq!(selection.render(), "{ id name }");
    }

    #[test]
    fn test_nested_selection() {
        let mut inner = SelectionSet::new();
        inner.field("id");

        let mut outer = SelectionSet::new();
        outer.field("name").nested("posts", &inner.render());
        assert_eq!(outer.render(), "{ name posts { id } }");
    }

    #[test]
    fn test_nested_replaces_on_reselect() {
        let mut selection = SelectionSet::new();
        selection.nested("posts", "{ id }");
        selection.nested("posts", "{ id title }");
        assert_eq!(selection.render(), "{ posts { id title } }");
    }

    #[test]
    fn test_three_level_nesting_balances_braces() {
        let mut members = SelectionSet::new();
        members.field("id").field("name");

        let mut teams = SelectionSet::new();
        teams.field("name").nested("members", &members.render());

        let mut org = SelectionSet::new();
        org.nested("teams", &teams.render());

        let rendered = org.render();
        assert_eq!(rendered, "{ teams { name members { id name } } }");
        let opens = rendered.matches('{').count();
        let closes = rendered.matches('}').count();
        assert_eq!(opens, 3);
        assert_eq!(opens, closes);
    }

    #[test]
    fn test_empty_selection_falls_back_to_typename() {
        let selection = SelectionSet::new();
        assert_eq!(selection.render(), "{ __typename }");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_render_is_stable() {
        let mut selection = SelectionSet::new();
        selection.field("a").nested("b", "{ c }");
        assert_eq!(selection.render(), selection.render());
    }
}
