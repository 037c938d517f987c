use quick_xml::Reader;
use quick_xml::events::Event;

use crate::transport::XmlError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Text of an element without child elements.
pub(crate) struct Leaf {
    /// Element names below the root, ending with the leaf's own name.
    pub(crate) path: Vec<String>,
    /// Document-order index of the enclosing element; siblings share it.
    pub(crate) parent: usize,
    /// Unescaped text, whitespace kept as written.
    pub(crate) text: String,
}

#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) root: String,
    pub(crate) leaves: Vec<Leaf>,
}

impl Document {
    /// Text of the first leaf at `path`.
    pub(crate) fn text(&self, path: &[&str]) -> Option<&str> {
        self.leaves
            .iter()
            .find(|leaf| leaf.path == path)
            .map(|leaf| leaf.text.as_str())
    }
}

struct Open {
    name: String,
    id: usize,
    text: String,
    has_children: bool,
}

/// Walk `xml` and collect every leaf element in document order.
pub(crate) fn read_document(xml: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut root: Option<String> = None;
    let mut open: Vec<Open> = Vec::new();
    let mut leaves = Vec::new();
    let mut next_id = 0;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                if let Some(parent) = open.last_mut() {
                    parent.has_children = true;
                }
                root.get_or_insert_with(|| name.clone());
                open.push(Open {
                    name,
                    id: next_id,
                    text: String::new(),
                    has_children: false,
                });
                next_id += 1;
            }
            Event::Empty(element) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                root.get_or_insert_with(|| name.clone());
                if let Some(parent) = open.last_mut() {
                    parent.has_children = true;
                    let parent = parent.id;
                    leaves.push(leaf(&open, name, parent, String::new()));
                }
            }
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let Some(closed) = open.pop() else { continue };
                if closed.has_children {
                    continue;
                }
                if let Some(parent) = open.last() {
                    let parent = parent.id;
                    leaves.push(leaf(&open, closed.name, parent, closed.text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(XmlError::Unclosed { name: unclosed.name });
    }
    let root = root.ok_or(XmlError::MissingRoot)?;
    Ok(Document { root, leaves })
}

fn leaf(open: &[Open], name: String, parent: usize, text: String) -> Leaf {
    let mut path: Vec<String> = open
        .iter()
        .skip(1)
        .map(|element| element.name.clone())
        .collect();
    path.push(name);
    Leaf { path, parent, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_keep_surrounding_whitespace() {
        let document =
            read_document("<root><a>  spaced out  </a><b>\n\tx\n</b></root>").unwrap();
        assert_eq!(document.root, "root");
        assert_eq!(document.text(&["a"]), Some("  spaced out  "));
        assert_eq!(document.text(&["b"]), Some("\n\tx\n"));
    }

    #[test]
    fn leaves_are_unescaped_and_joined_with_cdata() {
        let document =
            read_document("<root><a>&lt;b&gt; &amp; <![CDATA[<raw>]]></a></root>").unwrap();
        assert_eq!(document.text(&["a"]), Some("<b> & <raw>"));
    }

    #[test]
    fn nested_leaves_carry_path_and_parent() {
        let document = read_document(
            "<root><list><item><k>1</k></item><item><k>2</k><v/></item></list></root>",
        )
        .unwrap();
        let paths = document
            .leaves
            .iter()
            .map(|leaf| (leaf.path.join("/"), leaf.text.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                ("list/item/k".to_owned(), "1"),
                ("list/item/k".to_owned(), "2"),
                ("list/item/v".to_owned(), ""),
            ]
        );
        assert_ne!(document.leaves[0].parent, document.leaves[1].parent);
        assert_eq!(document.leaves[1].parent, document.leaves[2].parent);
    }

    #[test]
    fn mismatched_end_tag_is_a_syntax_error() {
        assert!(matches!(
            read_document("<root><a>x</b></root>"),
            Err(XmlError::Syntax(_))
        ));
    }

    #[test]
    fn unclosed_element_is_reported() {
        assert!(matches!(
            read_document("<root><a>x</a>"),
            Err(XmlError::Unclosed { .. } | XmlError::Syntax(_))
        ));
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(read_document(""), Err(XmlError::MissingRoot)));
    }
}
