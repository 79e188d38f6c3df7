//! Page composition: one block per class, one page per version.

use crate::aggregate::ClassSections;
use crate::model::{ModelError, RootDoc, SectionKind};
use crate::render::MarkdownRenderer;

/// Comment placed under the front-matter of every generated page.
pub const DISCLAIMER: &str = "<!-- This file is auto-generated by apidoc. Do not edit it by hand. -->";

/// Styles for the classes used in generated markup.
const STYLESHEET: &str = "
.default-value {
	font-size: 0.9em;
	color: var(--text-secondary);
}

.param-definition {
	white-space: nowrap;
	padding-inline-start: 10px;
}

.param-definition:not(:last-child):after {
	content: ',';
}

.option-definition {
	white-space: nowrap;
}

.property-definition {
	white-space: nowrap;
}

.pane-definition {
	white-space: nowrap;
}
";

/// Render one class: heading, comments, then every kind in page order.
pub fn class_block(
    renderer: &MarkdownRenderer,
    root: &RootDoc,
    class_id: &str,
) -> Result<String, ModelError> {
    let sections = ClassSections::collect(root, class_id)?;
    let class = sections.class();

    let mut out = format!("## {}\n\n", class.name);
    if !class.comments.is_empty() {
        out.push_str(&class.comments.join("\n"));
        out.push_str("\n\n");
    }

    for kind in SectionKind::PAGE_ORDER {
        out.push_str(&renderer.kind_section(
            &class.name,
            kind,
            sections.own(kind),
            sections.inherited(kind),
        ));
    }

    Ok(out)
}

/// Render the complete API page for one version.
pub fn version_page(
    renderer: &MarkdownRenderer,
    version: &str,
    root: &RootDoc,
) -> Result<String, ModelError> {
    let mut out = String::new();
    out.push_str("---\n---\n\n");
    out.push_str(DISCLAIMER);
    out.push_str("\n\n");
    out.push_str(&format!("# API Reference - {}\n\n", version));

    for (id, _) in root.classes() {
        out.push_str(&class_block(renderer, root, id)?);
    }

    out.push_str("\n<style>\n");
    out.push_str(STYLESHEET);
    out.push_str("\n</style>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LEAFLET: &str = r#"{
        "Layer": {
            "name": "Layer",
            "comments": ["A set of methods from the Layer base class."],
            "supersections": {
                "option": {"sections": {
                    "__default": {"name": "__default", "documentables": {
                        "pane": {"name": "pane", "type": "String", "defaultValue": "'overlayPane'", "comments": ["Map pane."]}
                    }}
                }}
            }
        },
        "Marker": {
            "name": "Marker",
            "comments": ["L.Marker is used to display clickable icons."],
            "inherits": ["Layer"],
            "supersections": {
                "constructor": {"sections": {
                    "__default": {"name": "__default", "documentables": {
                        "marker": {"name": "marker", "params": {"latlng": {"name": "latlng", "type": "LatLng"}}, "comments": ["Instantiates a Marker."]}
                    }}
                }},
                "option": {"sections": {
                    "__default": {"name": "__default", "documentables": {
                        "icon": {"name": "icon", "type": "Icon", "defaultValue": "*", "comments": ["Icon instance."]}
                    }}
                }}
            }
        }
    }"#;

    #[test]
    fn marker_inherits_layer_options() {
        let root = RootDoc::from_json(LEAFLET).unwrap();
        let out = class_block(&MarkdownRenderer::new("L."), &root, "Marker").unwrap();
        assert_eq!(
            out,
            "## Marker\n\n\
             L.Marker is used to display clickable icons.\n\n\
             ### Constructor {#marker-constructor-list}\n\n\
             | Signature | Description |\n\
             | --- | --- |\n\
             | L.marker(<div class=\"param-definition\">latlng: LatLng</div>) | Instantiates a Marker. |\n\n\
             ### Options {#marker-options-list}\n\n\
             | Option | Description |\n\
             | --- | --- |\n\
             | <div class=\"option-definition\">icon (Icon)</div><span class='default-value'>default: *</span> | Icon instance. |\n\n\
             <CollapsibleData title=\"Options inherited from Layer\">\n\n\
             | Option | Description |\n\
             | --- | --- |\n\
             | <div class=\"option-definition\">pane (String)</div><span class='default-value'>default: 'overlayPane'</span> | Map pane. |\n\n\
             </CollapsibleData>\n\n"
        );
    }

    #[test]
    fn own_groups_come_before_inherited() {
        let root = RootDoc::from_json(LEAFLET).unwrap();
        let out = class_block(&MarkdownRenderer::default(), &root, "Marker").unwrap();
        let own = out.find("icon (Icon)").unwrap();
        let inherited = out.find("Options inherited from Layer").unwrap();
        assert!(own < inherited);
    }

    #[test]
    fn empty_kinds_emit_nothing() {
        let root = RootDoc::from_json(LEAFLET).unwrap();
        let out = class_block(&MarkdownRenderer::default(), &root, "Layer").unwrap();
        assert!(!out.contains("### Methods"));
        assert!(!out.contains("### Events"));
        assert!(!out.contains("### Examples"));
        assert!(out.contains("### Options {#layer-options-list}"));
    }

    #[test]
    fn page_is_deterministic() {
        let renderer = MarkdownRenderer::new("L.");
        let first = version_page(&renderer, "1.9.4", &RootDoc::from_json(LEAFLET).unwrap()).unwrap();
        let second = version_page(&renderer, "1.9.4", &RootDoc::from_json(LEAFLET).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn page_layout() {
        let root = RootDoc::from_json(LEAFLET).unwrap();
        let page = version_page(&MarkdownRenderer::default(), "2.0.0", &root).unwrap();
        assert!(page.starts_with(&format!(
            "---\n---\n\n{}\n\n# API Reference - 2.0.0\n\n## Layer\n",
            DISCLAIMER
        )));
        assert!(page.find("## Layer").unwrap() < page.find("## Marker").unwrap());
        assert!(page.contains(".param-definition:not(:last-child):after"));
        assert!(page.ends_with("</style>\n"));
    }

    #[test]
    fn broken_inheritance_fails_the_page() {
        let root =
            RootDoc::from_json(r#"{"Marker": {"name": "Marker", "inherits": ["Layer"]}}"#).unwrap();
        let err = version_page(&MarkdownRenderer::default(), "1.0.0", &root).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownParent {
                class: "Marker".into(),
                parent: "Layer".into()
            }
        );
    }
}
