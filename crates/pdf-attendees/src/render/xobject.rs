//! Importing a page of another PDF as a form XObject
//!
//! Template backgrounds given as PDF are copied into the output once and
//! then drawn under every page.

use crate::constants::{LETTER_HEIGHT_PT, LETTER_WIDTH_PT};
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Copy `page_id` from `source` into `output` as a form XObject.
///
/// Resources are copied deeply so the form is self-contained. The form's
/// BBox is the page's MediaBox.
pub fn import_page_as_form(output: &mut Document, source: &Document, page_id: ObjectId) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;
    let bbox = page_box(source, page_id)?;
    let content = page_content(source, page_dict)?;

    let mut form = Dictionary::new();
    form.set("Type", Object::Name(b"XObject".to_vec()));
    form.set("Subtype", Object::Name(b"Form".to_vec()));
    form.set("FormType", Object::Integer(1));
    form.set(
        "BBox",
        Object::Array(vec![
            Object::Real(bbox.x),
            Object::Real(bbox.y),
            Object::Real(bbox.right()),
            Object::Real(bbox.top()),
        ]),
    );

    if let Some(resources) = inherited(source, page_dict, b"Resources") {
        let mut copied = HashMap::new();
        form.set("Resources", copy_object_deep(output, source, resources, &mut copied)?);
    }

    Ok(output.add_object(Stream::new(form, content)))
}

/// Page tree depth past which `Parent` links are no longer followed
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// MediaBox of a page as a rectangle, US Letter when absent or malformed.
///
/// The box may be inherited from an ancestor `Pages` node and may be an
/// indirect reference.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let page_dict = doc.get_dictionary(page_id)?;

    let numbers: Option<Vec<f32>> = inherited(doc, page_dict, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .map(|values| {
            values
                .iter()
                .filter_map(|value| doc.dereference(value).ok())
                .filter_map(|(_, value)| extract_number(value))
                .collect()
        });

    match numbers.as_deref() {
        Some([x0, y0, x1, y1]) => Ok(Rect::new(
            x0.min(*x1),
            y0.min(*y1),
            (x1 - x0).abs(),
            (y1 - y0).abs(),
        )),
        _ => Ok(Rect::new(0.0, 0.0, LETTER_WIDTH_PT, LETTER_HEIGHT_PT)),
    }
}

/// Value of an inheritable page attribute, searching up the `Parent` chain
/// and resolving references
fn inherited<'a>(doc: &'a Document, page_dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page_dict;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return doc.dereference(value).ok().map(|(_, value)| value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decoded content of a page, concatenating content arrays
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let refs: Vec<ObjectId> = match page_dict.get(b"Contents") {
        Ok(Object::Reference(id)) => vec![*id],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .collect(),
        // No content is a blank page
        _ => return Ok(Vec::new()),
    };

    let mut content = Vec::new();
    for id in refs {
        if let Ok(stream) = doc.get_object(id)?.as_stream() {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            content.extend_from_slice(&data);
            content.push(b'\n');
        }
    }
    Ok(content)
}

/// Deep copy an object from `source` into `output`, following references.
///
/// `copied` maps source ids to output ids so shared objects are copied once.
fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    copied: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = copied.get(id) {
                return Ok(Object::Reference(new_id));
            }
            // Reserve the id first so reference cycles terminate
            let new_id = output.new_object_id();
            copied.insert(*id, new_id);
            let value = copy_object_deep(output, source, source.get_object(*id)?, copied)?;
            output.objects.insert(new_id, value);
            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(output, source, dict, copied)?)),
        Object::Array(items) => {
            let items: Result<Vec<_>> = items
                .iter()
                .map(|item| copy_object_deep(output, source, item, copied))
                .collect();
            Ok(Object::Array(items?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, copied)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    copied: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, copied)?);
    }
    Ok(new_dict)
}
