use monitor_engine::{Extractor, ExtractorError, PatternExtractor};
use pretty_assertions::assert_eq;

const ID_PATTERN: &str = r"/listings/(\d+)";
const COUNT_PATTERN: &str = r"(\d+)\s+listings?\s+found";

fn extractor() -> PatternExtractor {
    PatternExtractor::new(ID_PATTERN, COUNT_PATTERN).expect("valid patterns")
}

#[test]
fn extracts_ids_from_anchors_and_the_displayed_count() {
    let html = r#"
        <html><body>
            <p>3 listings found</p>
            <a href="/listings/101">Studio A</a>
            <a href="/listings/102">Studio B</a>
            <a href="/listings/103">Studio C</a>
            <a href="/about">About</a>
        </body></html>
    "#;

    let extraction = extractor().extract(html);
    let mut ids: Vec<_> = extraction.ids.into_iter().collect();
    ids.sort();
    assert_eq!(ids, vec!["101", "102", "103"]);
    assert_eq!(extraction.count, Some(3));
}

#[test]
fn falls_back_to_a_full_document_scan_when_ids_leave_anchors() {
    // Ids referenced from a script blob instead of anchor hrefs.
    let html = r#"
        <html><body>
            <script>var items = ["/listings/7", "/listings/8"];</script>
        </body></html>
    "#;

    let extraction = extractor().extract(html);
    let mut ids: Vec<_> = extraction.ids.into_iter().collect();
    ids.sort();
    assert_eq!(ids, vec!["7", "8"]);
}

#[test]
fn duplicate_references_yield_one_id() {
    let html = r#"
        <a href="/listings/42">link</a>
        <a href="/listings/42?utm=promo">same listing</a>
    "#;

    let extraction = extractor().extract(html);
    assert_eq!(extraction.ids.len(), 1);
    assert!(extraction.ids.contains("42"));
}

#[test]
fn singular_count_phrasing_matches() {
    let html = "<p>1 listing found</p>";
    assert_eq!(extractor().extract(html).count, Some(1));
}

#[test]
fn unexpected_markup_yields_empty_extraction_not_an_error() {
    let extraction = extractor().extract("<div>nothing of interest</div>");
    assert!(extraction.ids.is_empty());
    assert_eq!(extraction.count, None);
}

#[test]
fn count_is_read_from_visible_text_across_elements() {
    let html = "<span>12</span> <span>listings found</span>";
    assert_eq!(extractor().extract(html).count, Some(12));
}

#[test]
fn construction_rejects_an_invalid_pattern() {
    let err = PatternExtractor::new(r"(\d+", COUNT_PATTERN).unwrap_err();
    assert!(matches!(err, ExtractorError::InvalidPattern(_)));
}

#[test]
fn construction_rejects_a_pattern_without_a_capture_group() {
    let err = PatternExtractor::new(r"/listings/\d+", COUNT_PATTERN).unwrap_err();
    assert!(matches!(err, ExtractorError::MissingCaptureGroup(_)));
}
