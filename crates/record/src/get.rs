use crate::{is_valid_index, Node};

/// Get a value from a record by path.
///
/// Array steps must be canonical indices (`"0"`, `"12"`).
pub fn get<'a>(node: &'a Node, path: &[String]) -> Option<&'a Node> {
    let mut current = node;
    for step in path {
        current = match current {
            Node::Object(map) => map.get(step)?,
            Node::Array(items) => {
                if !is_valid_index(step) {
                    return None;
                }
                items.get(step.parse::<usize>().ok()?)?
            }
            _ => return None,
        };
    }
    Some(current)
}
