//! Appending notes through the string API.
//!
//! Covers every pairing of `html`, `body` and loose XHTML content, checking
//! the exact serialized notes.

use pretty_assertions::assert_eq;
use sbml_core::{SBase, SbmlError};

const HTML_A: &str = "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p>This is a test note </p>\n    </body>\n  </html>\n</notes>";
const HTML_B: &str = "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n  <head>\n    <title/>\n  </head>\n  <body>\n    <p>This is more test notes </p>\n  </body>\n</html>";
const BODY_A: &str = "<notes>\n  <body xmlns=\"http://www.w3.org/1999/xhtml\">\n    <p>This is a test note </p>\n  </body>\n</notes>";
const BODY_B: &str = "<body xmlns=\"http://www.w3.org/1999/xhtml\">\n  <p>This is more test notes </p>\n</body>";
const P_A: &str = "<notes>\n  <p xmlns=\"http://www.w3.org/1999/xhtml\">This is a test note </p>\n</notes>";
const P_B: &str = "<p xmlns=\"http://www.w3.org/1999/xhtml\">This is more test notes </p>";

fn appended(existing: &str, incoming: &str) -> String {
    let mut species = SBase::new("species", 3, 1);
    species.annotations_mut().set_notes_str(existing).unwrap();
    species.annotations_mut().append_notes_str(incoming).unwrap();
    species.annotations().notes_string().unwrap()
}

#[test]
fn test_html_plus_html() {
    assert_eq!(
        appended(HTML_A, HTML_B),
        "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p>This is a test note </p>\n      <p>This is more test notes </p>\n    </body>\n  </html>\n</notes>"
    );
}

#[test]
fn test_html_plus_body() {
    assert_eq!(
        appended(HTML_A, BODY_B),
        "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p>This is a test note </p>\n      <p>This is more test notes </p>\n    </body>\n  </html>\n</notes>"
    );
}

#[test]
fn test_html_plus_p() {
    assert_eq!(
        appended(HTML_A, P_B),
        "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p>This is a test note </p>\n      <p xmlns=\"http://www.w3.org/1999/xhtml\">This is more test notes </p>\n    </body>\n  </html>\n</notes>"
    );
}

#[test]
fn test_body_plus_html() {
    assert_eq!(
        appended(BODY_A, HTML_B),
        "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p>This is a test note </p>\n      <p>This is more test notes </p>\n    </body>\n  </html>\n</notes>"
    );
}

#[test]
fn test_body_plus_body() {
    assert_eq!(
        appended(BODY_A, BODY_B),
        "<notes>\n  <body xmlns=\"http://www.w3.org/1999/xhtml\">\n    <p>This is a test note </p>\n    <p>This is more test notes </p>\n  </body>\n</notes>"
    );
}

#[test]
fn test_body_plus_p() {
    assert_eq!(
        appended(BODY_A, P_B),
        "<notes>\n  <body xmlns=\"http://www.w3.org/1999/xhtml\">\n    <p>This is a test note </p>\n    <p xmlns=\"http://www.w3.org/1999/xhtml\">This is more test notes </p>\n  </body>\n</notes>"
    );
}

#[test]
fn test_p_plus_html() {
    assert_eq!(
        appended(P_A, HTML_B),
        "<notes>\n  <html xmlns=\"http://www.w3.org/1999/xhtml\">\n    <head>\n      <title/>\n    </head>\n    <body>\n      <p xmlns=\"http://www.w3.org/1999/xhtml\">This is a test note </p>\n      <p>This is more test notes </p>\n    </body>\n  </html>\n</notes>"
    );
}

#[test]
fn test_p_plus_body() {
    assert_eq!(
        appended(P_A, BODY_B),
        "<notes>\n  <body xmlns=\"http://www.w3.org/1999/xhtml\">\n    <p xmlns=\"http://www.w3.org/1999/xhtml\">This is a test note </p>\n    <p>This is more test notes </p>\n  </body>\n</notes>"
    );
}

#[test]
fn test_p_plus_p() {
    assert_eq!(
        appended(P_A, P_B),
        "<notes>\n  <p xmlns=\"http://www.w3.org/1999/xhtml\">This is a test note </p>\n  <p xmlns=\"http://www.w3.org/1999/xhtml\">This is more test notes </p>\n</notes>"
    );
}

#[test]
fn test_append_wrapped_incoming() {
    let incoming = format!("<notes>{P_B}</notes>");
    assert_eq!(appended(P_A, &incoming), appended(P_A, P_B));
}

#[test]
fn test_append_to_unset_notes_sets() {
    let mut species = SBase::new("species", 3, 1);
    species.annotations_mut().append_notes_str(P_B).unwrap();
    assert_eq!(
        species.annotations().notes_string().unwrap(),
        format!("<notes>\n  {P_B}\n</notes>")
    );
}

#[test]
fn test_append_malformed_leaves_notes() {
    let mut species = SBase::new("species", 3, 1);
    species.annotations_mut().set_notes_str(P_A).unwrap();

    let err = species
        .annotations_mut()
        .append_notes_str("<p>unclosed")
        .unwrap_err();
    assert!(matches!(err, SbmlError::Structure(_)));
    assert_eq!(species.annotations().notes_string().unwrap(), P_A);
}

#[test]
fn test_plain_text_notes() {
    let mut species = SBase::new("species", 3, 1);
    species
        .annotations_mut()
        .set_notes_str("This is a test note")
        .unwrap();
    assert_eq!(
        species.annotations().notes_string().unwrap(),
        "<notes>This is a test note</notes>"
    );

    species.annotations_mut().set_notes_str("").unwrap();
    assert!(!species.annotations().is_set_notes());
}
