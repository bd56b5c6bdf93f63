//! Handlers for `<notes>` and `<annotation>`.
//!
//! Both are read into the owner's annotation store; an object carries at
//! most one of each.

use roxmltree::Node;

use crate::error::{Result, SbmlError};
use crate::registry::handler::{ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ReadContext};
use crate::sbase::SBase;
use crate::xml::{convert, get_tag_name};

fn duplicate(node: Node<'_, '_>, owner: &SBase) -> SbmlError {
    SbmlError::Structure(format!(
        "<{}> has more than one <{}>",
        owner.element_name(),
        get_tag_name(node)
    ))
}

/// Handler for `<notes>` elements.
pub struct NotesHandler;

impl ElementHandler for NotesHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Metadata
    }

    fn can_handle(&self, node: Node<'_, '_>, context: &ReadContext<'_>) -> bool {
        context.is_core_uri(node.tag_name().namespace().unwrap_or_default())
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> Result<()> {
        if owner.annotations().is_set_notes() {
            return Err(duplicate(node, owner));
        }
        let notes = convert(node, context.depth)?;
        owner.annotations_mut().set_notes(&notes);
        Ok(())
    }
}

/// Handler for `<annotation>` elements.
///
/// CVTerms describing the owner are moved out of the RDF block.
pub struct AnnotationHandler;

impl ElementHandler for AnnotationHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Metadata
    }

    fn can_handle(&self, node: Node<'_, '_>, context: &ReadContext<'_>) -> bool {
        context.is_core_uri(node.tag_name().namespace().unwrap_or_default())
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        owner: &mut SBase,
        context: &mut ReadContext<'_>,
        _recurse: &RecurseFn<'a, 'input>,
    ) -> Result<()> {
        if owner.annotations().is_set_annotation() || owner.annotations().num_cv_terms() > 0 {
            return Err(duplicate(node, owner));
        }
        let annotation = convert(node, context.depth)?;
        owner.annotations_mut().read_annotation(annotation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn no_recurse(_: Node<'_, '_>, _: &mut ReadContext<'_>) -> Result<SBase> {
        Err(SbmlError::Structure("unexpected".to_string()))
    }

    #[test]
    fn test_notes_handler() {
        let xml = r#"<notes><p xmlns="http://www.w3.org/1999/xhtml">hi</p></notes>"#;
        let doc = Document::parse(xml).unwrap();
        let mut owner = SBase::new("species", 3, 1);
        let mut context = ReadContext::new(3, 1);

        NotesHandler
            .handle(doc.root_element(), &mut owner, &mut context, &no_recurse)
            .unwrap();
        assert_eq!(
            owner.annotations().notes_string().unwrap(),
            "<notes>\n  <p xmlns=\"http://www.w3.org/1999/xhtml\">hi</p>\n</notes>"
        );

        let err = NotesHandler
            .handle(doc.root_element(), &mut owner, &mut context, &no_recurse)
            .unwrap_err();
        assert!(matches!(err, SbmlError::Structure(_)));
    }

    #[test]
    fn test_notes_handler_rejects_foreign_namespace() {
        let doc = Document::parse(r#"<notes xmlns="urn:other"/>"#).unwrap();
        let context = ReadContext::new(3, 1);
        assert!(!NotesHandler.can_handle(doc.root_element(), &context));
    }

    #[test]
    fn test_annotation_handler_extracts_cv_terms() {
        let xml = r##"<annotation>
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
           xmlns:bqbiol="http://biomodels.net/biology-qualifiers/">
    <rdf:Description rdf:about="#s1">
      <bqbiol:is>
        <rdf:Bag>
          <rdf:li rdf:resource="urn:miriam:obo.chebi:CHEBI:15422"/>
        </rdf:Bag>
      </bqbiol:is>
    </rdf:Description>
  </rdf:RDF>
  <extra xmlns="urn:tool"/>
</annotation>"##;
        let doc = Document::parse(xml).unwrap();
        let mut owner = SBase::new("species", 3, 1);
        owner.set_meta_id("s1").unwrap();
        let mut context = ReadContext::new(3, 1);

        AnnotationHandler
            .handle(doc.root_element(), &mut owner, &mut context, &no_recurse)
            .unwrap();

        let store = owner.annotations();
        assert_eq!(store.num_cv_terms(), 1);
        let stored = store.annotation().unwrap();
        assert_eq!(stored.num_children(), 1);
        assert_eq!(stored.children()[0].name(), "extra");
    }
}
