//! RDF form of CVTerms inside an `<annotation>`.
//!
//! Every term becomes one `rdf:Description` about the owner's metaid:
//!
//! ```text
//! <rdf:RDF xmlns:rdf=... xmlns:bqbiol=... xmlns:bqmodel=...>
//!   <rdf:Description rdf:about="#metaid">
//!     <bqbiol:is>
//!       <rdf:Bag>
//!         <rdf:li rdf:resource="..."/>
//!       </rdf:Bag>
//!     </bqbiol:is>
//!   </rdf:Description>
//! </rdf:RDF>
//! ```
//!
//! Reading accepts any number of qualifiers per description.

use crate::annotation::cvterm::CvTerm;
use crate::annotation::qualifier::{Qualifier, QualifierKind};
use crate::config::RDF_NS;
use crate::xml::{Node, QName};

fn rdf_name(local: &str) -> QName {
    QName::with_ns(local, "rdf", RDF_NS)
}

fn is_rdf(node: &Node, local: &str) -> bool {
    node.has_tag(local) && node.uri() == RDF_NS
}

/// Build the `rdf:RDF` block for `terms`.
///
/// Returns `None` when there is nothing to write. Terms with an unknown
/// qualifier have no RDF element name and are skipped.
pub fn write_rdf(meta_id: &str, terms: &[CvTerm]) -> Option<Node> {
    let about = format!("#{meta_id}");
    let mut rdf = Node::qualified(rdf_name("RDF"))
        .with_namespace("rdf", RDF_NS)
        .with_namespace(
            QualifierKind::Biological.prefix(),
            QualifierKind::Biological.namespace(),
        )
        .with_namespace(QualifierKind::Model.prefix(), QualifierKind::Model.namespace());

    for term in terms {
        if let Some(qualifier) = term_node(term) {
            rdf.push_child(
                Node::qualified(rdf_name("Description"))
                    .with_qualified_attribute(rdf_name("about"), about.as_str())
                    .with_child(qualifier),
            );
        }
    }

    (rdf.num_children() > 0).then_some(rdf)
}

fn term_node(term: &CvTerm) -> Option<Node> {
    let Some(name) = term.qualifier().element_name() else {
        tracing::warn!(qualifier = ?term.qualifier(), "Skipping CVTerm with unknown qualifier");
        return None;
    };

    let mut bag = Node::qualified(rdf_name("Bag"));
    for resource in term.resources() {
        bag.push_child(
            Node::qualified(rdf_name("li"))
                .with_qualified_attribute(rdf_name("resource"), resource.as_str()),
        );
    }
    for nested in term.nested() {
        if let Some(node) = term_node(nested) {
            bag.push_child(node);
        }
    }

    let kind = term.kind();
    Some(Node::qualified(QName::with_ns(name, kind.prefix(), kind.namespace())).with_child(bag))
}

/// Remove the CVTerms describing `meta_id` from `annotation` and return them.
///
/// Descriptions about other subjects and unrecognized content stay in the
/// annotation. Descriptions and `rdf:RDF` blocks emptied by the extraction
/// are dropped.
pub fn extract_cv_terms(annotation: &mut Node, meta_id: Option<&str>) -> Vec<CvTerm> {
    let mut terms = Vec::new();

    annotation.retain_children(|rdf| {
        if !is_rdf(rdf, "RDF") {
            return true;
        }
        rdf.retain_children(|description| {
            if !is_rdf(description, "Description") {
                return true;
            }
            let about = description.attribute("about").unwrap_or_default();
            let describes_owner = meta_id.is_some_and(|m| about.strip_prefix('#') == Some(m));
            if !describes_owner {
                tracing::warn!(
                    about = %about,
                    "RDF description does not describe this object, keeping it verbatim"
                );
                return true;
            }
            description.retain_children(|child| match parse_term(child) {
                Some(term) => {
                    terms.push(term);
                    false
                }
                None => true,
            });
            description.num_children() > 0
        });
        rdf.num_children() > 0
    });

    terms
}

fn parse_term(node: &Node) -> Option<CvTerm> {
    let qualifier = Qualifier::from_element(node.uri(), node.name())?;
    if qualifier.is_unknown() {
        return None;
    }

    let mut term = CvTerm::new(qualifier);
    for bag in node.element_children().filter(|c| is_rdf(c, "Bag")) {
        for item in bag.element_children() {
            if is_rdf(item, "li") {
                if let Some(resource) = item.attribute("resource") {
                    term.add_resource(resource);
                }
            } else if let Some(nested) = parse_term(item) {
                term.add_nested(nested);
            }
        }
    }
    Some(term)
}
