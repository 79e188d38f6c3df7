//! Markdown rendering of sections and documentables.
//!
//! Every [`SectionKind`] has exactly one row policy. Inherited sections are
//! wrapped in `<CollapsibleData>` blocks so the site theme can fold them.

use crate::aggregate::InheritedGroup;
use crate::model::{Documentable, Param, Section, SectionKind};
use crate::render::table::{escape_pipes, table};
use crate::slug;
use indexmap::IndexMap;

#[derive(Debug, Default, Clone)]
pub struct MarkdownRenderer {
    /// Prefix for constructor signatures, e.g. `L.`.
    namespace: String,
}

impl MarkdownRenderer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Render one kind heading with the class's own sections followed by the
    /// inherited groups. Returns an empty string when there is nothing to show.
    pub fn kind_section(
        &self,
        class_name: &str,
        kind: SectionKind,
        own: &[&Section],
        inherited: &[InheritedGroup<'_>],
    ) -> String {
        let mut body = self.groups(kind, own, None);
        for group in inherited {
            body.push_str(&self.groups(kind, &group.sections, Some(group.class_name)));
        }
        if body.is_empty() {
            return body;
        }

        format!(
            "### {} {{#{}}}\n\n{}",
            kind.title(),
            slug::anchor(class_name, kind),
            body
        )
    }

    /// Render a run of sections. With `inherited_from` set, each section is
    /// wrapped in a collapsible block titled after the parent class.
    pub fn groups(
        &self,
        kind: SectionKind,
        sections: &[&Section],
        inherited_from: Option<&str>,
    ) -> String {
        let mut out = String::new();

        for section in sections.iter().filter(|s| !s.is_blank()) {
            match inherited_from {
                Some(parent) => {
                    let title = if section.is_default() {
                        format!("{} inherited from {}", kind.title(), parent)
                    } else {
                        format!("{} inherited from {}", section.name, parent)
                    };
                    out.push_str(&format!(
                        "<CollapsibleData title=\"{}\">\n\n",
                        attr_escape(&title)
                    ));
                }
                None if !section.is_default() => {
                    out.push_str(&format!("#### {}\n\n", section.name));
                }
                None => {}
            }

            if !section.comments.is_empty() {
                out.push_str(&section.comments.join("\n"));
                out.push_str("\n\n");
            }

            let entries = self.documentables(kind, &section.documentables);
            if !entries.is_empty() {
                out.push_str(&entries);
                out.push('\n');
            }

            if inherited_from.is_some() {
                out.push_str("</CollapsibleData>\n\n");
            }
        }

        out
    }

    /// Render the documentables of one section using the kind's policy.
    /// Examples are prose; every other kind is a table.
    pub fn documentables(&self, kind: SectionKind, entries: &IndexMap<String, Documentable>) -> String {
        let Some(headers) = headers(kind) else {
            return entries
                .values()
                .filter(|doc| !doc.comments.is_empty())
                .map(|doc| format!("{}\n", doc.comments.join("\n")))
                .collect::<Vec<_>>()
                .join("\n");
        };

        let rows: Vec<Vec<String>> = entries.values().map(|doc| self.row(kind, doc)).collect();
        table(headers, &rows)
    }

    fn row(&self, kind: SectionKind, doc: &Documentable) -> Vec<String> {
        let ty = escape_pipes(doc.ty.as_deref().unwrap_or(""));
        let description = doc.comments.join(" ");

        match kind {
            SectionKind::Example => vec![doc.comments.join("\n")],
            SectionKind::Constructor => vec![
                format!("{}{}({})", self.namespace, doc.name, params(&doc.params)),
                description,
            ],
            SectionKind::Option => vec![
                format!(
                    "<div class=\"option-definition\">{} ({})</div><span class='default-value'>default: {}</span>",
                    doc.name,
                    ty,
                    default_text(doc)
                ),
                description,
            ],
            SectionKind::Event => vec![doc.name.clone(), ty, description],
            SectionKind::Method | SectionKind::Function => {
                let returns = escape_pipes(
                    doc.ty
                        .as_deref()
                        .filter(|ty| !ty.is_empty())
                        .unwrap_or("void"),
                );
                vec![
                    format!(".{}({}): {}", doc.name, params(&doc.params), returns),
                    description,
                ]
            }
            SectionKind::Property => vec![
                format!("<div class=\"property-definition\">{} ({})</div>", doc.name, ty),
                description,
            ],
            SectionKind::Pane => vec![
                format!(
                    "<div class=\"pane-definition\">{} ({})</div> <span class='default-value'>z-index: {}</span>",
                    doc.name,
                    ty,
                    default_text(doc)
                ),
                description,
            ],
        }
    }
}

/// Table headers per kind; `None` for kinds rendered as prose.
fn headers(kind: SectionKind) -> Option<&'static [&'static str]> {
    match kind {
        SectionKind::Example => None,
        SectionKind::Constructor | SectionKind::Method | SectionKind::Function => {
            Some(&["Signature", "Description"])
        }
        SectionKind::Option => Some(&["Option", "Description"]),
        SectionKind::Event => Some(&["Event", "Data", "Description"]),
        SectionKind::Property => Some(&["Property", "Description"]),
        SectionKind::Pane => Some(&["Pane", "Description"]),
    }
}

/// Parameter list markup. The stylesheet supplies the `, ` separators.
fn params(params: &IndexMap<String, Param>) -> String {
    params
        .values()
        .map(|param| match param.ty.as_deref() {
            Some(ty) if !ty.is_empty() => format!(
                "<div class=\"param-definition\">{}: {}</div>",
                param.name,
                escape_pipes(ty)
            ),
            _ => format!("<div class=\"param-definition\">{}</div>", param.name),
        })
        .collect()
}

fn default_text(doc: &Documentable) -> String {
    doc.default_value
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

fn attr_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}
