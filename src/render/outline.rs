use super::{FieldView, GroupView, ListView, TreeVisitor};
use crate::codec::{FieldKind, PresentationMode};

/// Renders a node tree as an indented plain-text outline.
///
/// `[+]` marks lists that accept new groups and `[x]` marks deletable groups.
#[derive(Debug, Default)]
pub struct OutlineRenderer {
    output: String,
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, depth: usize, text: &str) {
        // The root group sits at depth 0 and is not printed, so its fields start flush left.
        let indent = depth.saturating_sub(1) * 2;
        self.output.push_str(&" ".repeat(indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn describe(field: &FieldView<'_>) -> String {
        let raw = &field.field.raw;
        let shown = match (&field.field.kind, field.field.mode, field.options) {
            // Id-based single selections show the label next to the id.
            (FieldKind::Enumeration { multiselect: false, .. }, PresentationMode::Id, Some(options)) => options
                .iter()
                .find(|option| &option.id == raw)
                .map(|option| format!("{} ({})", raw, option.label))
                .unwrap_or_else(|| raw.clone()),
            _ => raw.clone(),
        };
        if field.field.readonly {
            format!("{}: {} (readonly)", field.field.label, shown)
        } else {
            format!("{}: {}", field.field.label, shown)
        }
    }
}

impl TreeVisitor for OutlineRenderer {
    fn enter_list(&mut self, list: &ListView<'_>) {
        let marker = if list.can_add { " [+]" } else { "" };
        self.line(list.depth, &format!("{}:{}", list.list.label, marker));
    }

    fn enter_group(&mut self, group: &GroupView<'_>) {
        if group.depth == 0 {
            return;
        }
        let marker = if group.can_delete { " [x]" } else { "" };
        self.line(group.depth, &format!("- #{}{}", group.position + 1, marker));
    }

    fn field(&mut self, field: &FieldView<'_>) {
        let text = Self::describe(field);
        self.line(field.depth, &text);
    }
}
