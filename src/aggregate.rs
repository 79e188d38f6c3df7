//! Per-class section aggregation: own sections by kind, plus the groups each
//! ancestor contributes.

use crate::inherit;
use crate::model::{ClassDoc, ModelError, RootDoc, Section, SectionKind};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Sections of one kind inherited from a single ancestor.
#[derive(Debug)]
pub struct InheritedGroup<'a> {
    pub class_name: &'a str,
    pub sections: Vec<&'a Section>,
}

/// A class's own sections and its inherited groups, kept apart.
#[derive(Debug)]
pub struct ClassSections<'a> {
    class: &'a ClassDoc,
    own: BTreeMap<SectionKind, Vec<&'a Section>>,
    inherited: BTreeMap<SectionKind, Vec<InheritedGroup<'a>>>,
}

impl<'a> ClassSections<'a> {
    pub fn collect(root: &'a RootDoc, class_id: &str) -> Result<Self, ModelError> {
        let class = root
            .get(class_id)
            .ok_or_else(|| ModelError::UnknownClass(class_id.to_string()))?;

        let mut own = BTreeMap::new();
        for kind in SectionKind::PAGE_ORDER {
            let sections = own_sections(class, kind);
            if !sections.is_empty() {
                own.insert(kind, sections);
            }
        }

        let mut inherited: BTreeMap<SectionKind, Vec<InheritedGroup<'a>>> = BTreeMap::new();
        let mut seen = HashSet::new();
        for ancestor in inherit::ancestors(root, class_id)? {
            // Diamonds reach the same ancestor twice; it contributes once.
            if !seen.insert(ancestor.id) {
                continue;
            }
            for kind in SectionKind::PAGE_ORDER.into_iter().filter(|k| k.is_inheritable()) {
                let sections: Vec<&Section> = own_sections(ancestor.class, kind)
                    .into_iter()
                    .filter(|s| !s.uninheritable && !s.documentables.is_empty())
                    .collect();
                if !sections.is_empty() {
                    inherited.entry(kind).or_default().push(InheritedGroup {
                        class_name: &ancestor.class.name,
                        sections,
                    });
                }
            }
        }

        Ok(Self {
            class,
            own,
            inherited,
        })
    }

    pub fn class(&self) -> &'a ClassDoc {
        self.class
    }

    pub fn own(&self, kind: SectionKind) -> &[&'a Section] {
        self.own.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub fn inherited(&self, kind: SectionKind) -> &[InheritedGroup<'a>] {
        self.inherited.get(&kind).map_or(&[], Vec::as_slice)
    }
}

/// A class's sections of one kind; listed kinds are sorted by name.
pub fn own_sections(class: &ClassDoc, kind: SectionKind) -> Vec<&Section> {
    let Some(supersection) = class.supersection(kind) else {
        return Vec::new();
    };
    let mut sections: Vec<&Section> = supersection.sections.values().collect();
    if kind.is_listed() {
        sections.sort_by(|a, b| collate(&a.name, &b.name));
    }
    sections
}

/// Locale-style string comparison.
///
/// Punctuation sorts before digits, digits before letters, and letters
/// compare case-insensitively. Ties fall back to lower-case first, then to
/// plain byte order so the result is total.
pub fn collate(a: &str, b: &str) -> Ordering {
    fn primary(s: &str) -> Vec<(u8, char)> {
        s.chars()
            .map(|c| (char_class(c), c.to_lowercase().next().unwrap_or(c)))
            .collect()
    }
    fn tertiary(s: &str) -> Vec<bool> {
        s.chars().map(char::is_uppercase).collect()
    }

    primary(a)
        .cmp(&primary(b))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
        .then_with(|| a.cmp(b))
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}
