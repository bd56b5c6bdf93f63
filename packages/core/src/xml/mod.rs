//! Generic ordered XML tree: tokens, owned nodes, reader and writer.

pub mod node;
pub mod reader;
pub mod token;
pub mod utils;
pub mod writer;

pub use node::Node;
pub use reader::{check_depth, convert, parse_document, parse_fragment};
pub use token::{Attribute, ElementToken, NamespaceDecl, QName, Token};
pub use utils::{
    declared_namespaces, describe_path, element_attributes, element_children, element_qname,
    find_child, get_tag_name, has_tag,
};
pub use writer::{escape_attribute, escape_text, XmlWriter, XML_DECLARATION};
