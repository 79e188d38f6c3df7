//! Inheritance resolution over the class table.
//!
//! Classes may inherit from several parents, each with its own ancestors.
//! The table is treated as a graph keyed by class identifier and walked
//! depth-first, pre-order.

use crate::model::{ClassDoc, ModelError, RootDoc};

/// One resolved ancestor with the identifier it is keyed by in the table.
#[derive(Debug, Clone, Copy)]
pub struct Ancestor<'a> {
    pub id: &'a str,
    pub class: &'a ClassDoc,
}

/// Resolve every ancestor of `class_id`.
///
/// Immediate parents come first, each followed directly by its own
/// ancestors. A class reachable through several paths appears once per path.
pub fn ancestors<'a>(root: &'a RootDoc, class_id: &str) -> Result<Vec<Ancestor<'a>>, ModelError> {
    let (id, class) = root
        .get_entry(class_id)
        .ok_or_else(|| ModelError::UnknownClass(class_id.to_string()))?;

    let mut resolved = Vec::new();
    let mut path = vec![id];
    walk(root, class, &mut path, &mut resolved)?;
    Ok(resolved)
}

/// `path` holds the identifiers from the starting class down to `class`.
fn walk<'a>(
    root: &'a RootDoc,
    class: &'a ClassDoc,
    path: &mut Vec<&'a str>,
    resolved: &mut Vec<Ancestor<'a>>,
) -> Result<(), ModelError> {
    for parent_id in &class.inherits {
        if let Some(start) = path.iter().position(|id| id == parent_id) {
            let mut chain: Vec<String> = path[start..].iter().map(|id| id.to_string()).collect();
            chain.push(parent_id.clone());
            return Err(ModelError::InheritanceCycle { chain });
        }

        let (id, parent) = root.get_entry(parent_id).ok_or_else(|| ModelError::UnknownParent {
            class: path.last().map(|id| id.to_string()).unwrap_or_default(),
            parent: parent_id.clone(),
        })?;

        resolved.push(Ancestor { id, class: parent });
        path.push(id);
        walk(root, parent, path, resolved)?;
        path.pop();
    }
    Ok(())
}

/// Check every class's inheritance chain.
pub fn validate(root: &RootDoc) -> Result<(), ModelError> {
    for (id, _) in root.classes() {
        ancestors(root, id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(ancestors: &[Ancestor<'a>]) -> Vec<&'a str> {
        ancestors.iter().map(|a| a.id).collect()
    }

    #[test]
    fn no_parents() {
        let root = RootDoc::from_json(r#"{"Class": {"name": "Class"}}"#).unwrap();
        assert!(ancestors(&root, "Class").unwrap().is_empty());
    }

    #[test]
    fn chain_is_pre_order() {
        let root = RootDoc::from_json(
            r#"{
                "Evented": {"name": "Evented", "inherits": ["Class"]},
                "Class": {"name": "Class"},
                "Layer": {"name": "Layer", "inherits": ["Evented"]},
                "Path": {"name": "Path", "inherits": ["Layer"]},
                "Polyline": {"name": "Polyline", "inherits": ["Path"]}
            }"#,
        )
        .unwrap();
        let resolved = ancestors(&root, "Polyline").unwrap();
        assert_eq!(ids(&resolved), ["Path", "Layer", "Evented", "Class"]);
    }

    #[test]
    fn multiple_parents_each_followed_by_their_ancestors() {
        let root = RootDoc::from_json(
            r#"{
                "Base": {"name": "Base"},
                "Left": {"name": "Left", "inherits": ["Base"]},
                "Right": {"name": "Right", "inherits": ["Base"]},
                "Mixin": {"name": "Mixin"},
                "Child": {"name": "Child", "inherits": ["Left", "Mixin", "Right"]}
            }"#,
        )
        .unwrap();
        let resolved = ancestors(&root, "Child").unwrap();
        assert_eq!(ids(&resolved), ["Left", "Base", "Mixin", "Right", "Base"]);
    }

    #[test]
    fn unknown_parent_is_an_error() {
        let root =
            RootDoc::from_json(r#"{"Marker": {"name": "Marker", "inherits": ["Layer"]}}"#).unwrap();
        assert_eq!(
            ancestors(&root, "Marker").unwrap_err(),
            ModelError::UnknownParent {
                class: "Marker".into(),
                parent: "Layer".into()
            }
        );
    }

    #[test]
    fn unknown_class_is_an_error() {
        let root = RootDoc::default();
        assert_eq!(
            ancestors(&root, "Map").unwrap_err(),
            ModelError::UnknownClass("Map".into())
        );
    }

    #[test]
    fn cycle_is_reported() {
        let root = RootDoc::from_json(
            r#"{
                "A": {"name": "A", "inherits": ["B"]},
                "B": {"name": "B", "inherits": ["C"]},
                "C": {"name": "C", "inherits": ["A"]}
            }"#,
        )
        .unwrap();
        assert_eq!(
            ancestors(&root, "A").unwrap_err(),
            ModelError::InheritanceCycle {
                chain: vec!["A".into(), "B".into(), "C".into(), "A".into()]
            }
        );
    }

    #[test]
    fn self_inheritance_is_a_cycle() {
        let root = RootDoc::from_json(r#"{"A": {"name": "A", "inherits": ["A"]}}"#).unwrap();
        assert!(matches!(
            ancestors(&root, "A"),
            Err(ModelError::InheritanceCycle { .. })
        ));
    }

    #[test]
    fn validate_checks_every_class() {
        let root = RootDoc::from_json(
            r#"{"Ok": {"name": "Ok"}, "Broken": {"name": "Broken", "inherits": ["Gone"]}}"#,
        )
        .unwrap();
        assert!(matches!(
            validate(&root),
            Err(ModelError::UnknownParent { .. })
        ));
    }
}
