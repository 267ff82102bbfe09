//! Element-level edits. Every operation takes the current content by
//! reference and returns a fresh vector; nested child vectors on the path to
//! the edited element are rebuilt rather than mutated in place.

use crate::element::{Element, ElementKind};
use crate::error::EditError;
use quire_types::ElementId;

/// Inserts `element` at `index`, or appends it when `index` is `None`.
pub fn add_element(
    content: &[Element],
    element: Element,
    index: Option<usize>,
) -> Result<Vec<Element>, EditError> {
    let index = index.unwrap_or(content.len());
    if index > content.len() {
        return Err(EditError::IndexOutOfRange { index, len: content.len() });
    }
    let mut next = Vec::with_capacity(content.len() + 1);
    next.extend_from_slice(&content[..index]);
    next.push(element);
    next.extend_from_slice(&content[index..]);
    Ok(next)
}

/// Replaces the element with `id`, wherever it is nested, by `f(old)`.
pub fn update_element<F>(content: &[Element], id: &str, f: F) -> Result<Vec<Element>, EditError>
where
    F: FnOnce(&Element) -> Element,
{
    splice(content, id, f, |f, el| vec![f(el)])
}

/// Removes the element with `id`, wherever it is nested.
pub fn remove_element(content: &[Element], id: &str) -> Result<Vec<Element>, EditError> {
    splice(content, id, (), |_, _| Vec::new())
}

/// Inserts a copy of the element with `id` right after it, under `new_id`.
/// Ids inside the copy's subtree are cleared so no id appears twice.
pub fn duplicate_element(
    content: &[Element],
    id: &str,
    new_id: ElementId,
) -> Result<Vec<Element>, EditError> {
    splice(content, id, new_id, |new_id, el| {
        let mut copy = el.clone();
        copy.id = Some(new_id);
        clear_descendant_ids(&mut copy);
        vec![el.clone(), copy]
    })
}

/// Moves the top-level element at `from` so it ends up at index `to`.
pub fn move_element(content: &[Element], from: usize, to: usize) -> Result<Vec<Element>, EditError> {
    let len = content.len();
    for index in [from, to] {
        if index >= len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
    }
    let mut next = content.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Ok(next)
}

/// Depth-first search for the element with `id`.
pub fn find_element<'a>(content: &'a [Element], id: &str) -> Option<&'a Element> {
    content.iter().find_map(|el| {
        if el.id_str() == Some(id) {
            return Some(el);
        }
        match &el.kind {
            ElementKind::Section(section) => find_element(&section.children, id),
            ElementKind::Columns(columns) => columns
                .columns
                .iter()
                .find_map(|column| find_element(&column.children, id)),
            _ => None,
        }
    })
}

fn splice<S>(
    content: &[Element],
    id: &str,
    state: S,
    replace: fn(S, &Element) -> Vec<Element>,
) -> Result<Vec<Element>, EditError> {
    let mut state = Some(state);
    splice_in(content, id, &mut state, replace).ok_or_else(|| EditError::NotFound(id.to_string()))
}

fn splice_in<S>(
    content: &[Element],
    id: &str,
    state: &mut Option<S>,
    replace: fn(S, &Element) -> Vec<Element>,
) -> Option<Vec<Element>> {
    for (i, el) in content.iter().enumerate() {
        if el.id_str() == Some(id) {
            let replacement = replace(state.take()?, el);
            let mut next = Vec::with_capacity(content.len() + replacement.len());
            next.extend_from_slice(&content[..i]);
            next.extend(replacement);
            next.extend_from_slice(&content[i + 1..]);
            return Some(next);
        }
        if let Some(rebuilt) = splice_children(el, id, state, replace) {
            let mut next = content.to_vec();
            next[i] = rebuilt;
            return Some(next);
        }
    }
    None
}

fn splice_children<S>(
    el: &Element,
    id: &str,
    state: &mut Option<S>,
    replace: fn(S, &Element) -> Vec<Element>,
) -> Option<Element> {
    let kind = match &el.kind {
        ElementKind::Section(section) => {
            let children = splice_in(&section.children, id, state, replace)?;
            let mut section = section.clone();
            section.children = children;
            ElementKind::Section(section)
        }
        ElementKind::Columns(columns) => {
            let (slot, children) = columns
                .columns
                .iter()
                .enumerate()
                .find_map(|(slot, column)| {
                    splice_in(&column.children, id, state, replace).map(|c| (slot, c))
                })?;
            let mut columns = columns.clone();
            columns.columns[slot].children = children;
            ElementKind::Columns(columns)
        }
        _ => return None,
    };
    Some(Element { id: el.id.clone(), kind })
}

fn clear_descendant_ids(el: &mut Element) {
    let lists: Vec<&mut Vec<Element>> = match &mut el.kind {
        ElementKind::Section(section) => vec![&mut section.children],
        ElementKind::Columns(columns) => {
            columns.columns.iter_mut().map(|c| &mut c.children).collect()
        }
        _ => Vec::new(),
    };
    for child in lists.into_iter().flatten() {
        child.id = None;
        clear_descendant_ids(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_element;
    use crate::element::Section;

    fn el(tag: &str, id: &str) -> Element {
        default_element(tag).unwrap().with_id(id)
    }

    fn ids(content: &[Element]) -> Vec<&str> {
        content.iter().filter_map(Element::id_str).collect()
    }

    fn nested() -> Vec<Element> {
        let section = Element::new(ElementKind::Section(Section {
            children: vec![el("paragraph", "p1"), el("heading", "h1")],
            ..Default::default()
        }))
        .with_id("s1");
        vec![el("spacer", "top"), section]
    }

    #[test]
    fn add_inserts_or_appends() {
        let content = vec![el("heading", "a"), el("heading", "b")];
        let next = add_element(&content, el("divider", "c"), Some(1)).unwrap();
        assert_eq!(ids(&next), ["a", "c", "b"]);
        let next = add_element(&content, el("divider", "c"), None).unwrap();
        assert_eq!(ids(&next), ["a", "b", "c"]);
        assert_eq!(
            add_element(&content, el("divider", "c"), Some(5)),
            Err(EditError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(ids(&content), ["a", "b"]);
    }

    #[test]
    fn update_reaches_nested_children() {
        let content = nested();
        let next = update_element(&content, "h1", |old| {
            let mut new = old.clone();
            if let ElementKind::Heading(h) = &mut new.kind {
                h.content = "Changed".into();
            }
            new
        })
        .unwrap();
        match &find_element(&next, "h1").unwrap().kind {
            ElementKind::Heading(h) => assert_eq!(h.content, "Changed"),
            other => panic!("unexpected {other:?}"),
        }
        // the input is untouched
        match &find_element(&content, "h1").unwrap().kind {
            ElementKind::Heading(h) => assert_eq!(h.content, "Heading"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn remove_and_not_found() {
        let content = nested();
        let next = remove_element(&content, "p1").unwrap();
        assert!(find_element(&next, "p1").is_none());
        assert!(find_element(&next, "h1").is_some());
        assert_eq!(remove_element(&content, "zz"), Err(EditError::NotFound("zz".into())));
    }

    #[test]
    fn duplicate_places_copy_after_original() {
        let content = nested();
        let next = duplicate_element(&content, "s1", ElementId::new("s2")).unwrap();
        assert_eq!(ids(&next), ["top", "s1", "s2"]);
        match &next[2].kind {
            ElementKind::Section(s) => assert!(s.children.iter().all(|c| c.id.is_none())),
            other => panic!("unexpected {other:?}"),
        }
        assert!(find_element(&next, "p1").is_some());
    }

    #[test]
    fn move_reorders_top_level() {
        let content = vec![el("heading", "a"), el("heading", "b"), el("heading", "c")];
        assert_eq!(ids(&move_element(&content, 0, 2).unwrap()), ["b", "c", "a"]);
        assert_eq!(ids(&move_element(&content, 2, 0).unwrap()), ["c", "a", "b"]);
        assert!(move_element(&content, 3, 0).is_err());
    }
}
