use std::cell::RefCell;

use pdf_core::{
    Canvas, CellContent, DocTemplate, Error, Flowable, PageGeometry, PageInfo, Paragraph,
    ParagraphStyle, Table, INCH,
};

fn letter() -> PageGeometry {
    PageGeometry::new(612.0, 792.0, INCH)
}

fn page_count(pdf: &[u8]) -> usize {
    String::from_utf8_lossy(pdf).matches("/Type /Page /").count()
}

fn rows(count: usize) -> Vec<Vec<CellContent>> {
    (1..=count)
        .map(|i| vec![CellContent::from(format!("row {}", i))])
        .collect()
}

#[test]
fn short_content_fits_on_one_page() {
    let flowables = vec![
        Flowable::Paragraph(Paragraph::new(ParagraphStyle::default()).text("Hello")),
        Flowable::Spacer(18.0),
        Flowable::Table(Table::new(vec![200.0], rows(3))),
    ];
    let pdf = DocTemplate::new(letter()).build(flowables, Vec::new()).unwrap();
    assert_eq!(page_count(&pdf), 1);
    assert!(String::from_utf8_lossy(&pdf).contains("(Hello) Tj"));
}

#[test]
fn frame_sits_inside_margins_and_padding() {
    let template = DocTemplate::new(letter()).later_pages_top_inset(43.2);
    let first = template.frame(1);
    assert_eq!(first.x, 78.0);
    assert_eq!(first.width, 456.0);
    assert_eq!(first.top, 714.0);
    assert_eq!(first.bottom, 78.0);

    let later = template.frame(2);
    assert!((later.top - (714.0 - 43.2)).abs() < 1e-9);
    assert_eq!(later.bottom, first.bottom);
}

#[test]
fn tables_are_centered_in_frame() {
    let table = Table::new(vec![200.0], vec![vec!["centered".into()]]);
    let pdf = DocTemplate::new(letter())
        .build(vec![Flowable::Table(table)], Vec::new())
        .unwrap();
    // Frame is 456pt wide at x=78, so the table starts at 206.
    assert!(String::from_utf8_lossy(&pdf).contains("212 701 Td\n(centered) Tj"));
}

#[test]
fn long_table_breaks_across_pages() {
    let table = Table::new(vec![200.0], rows(100));
    let pdf = DocTemplate::new(letter())
        .build(vec![Flowable::Table(table)], Vec::new())
        .unwrap();
    let output = String::from_utf8_lossy(&pdf).into_owned();
    // 636pt frame holds 35 rows of 18pt.
    assert_eq!(page_count(&pdf), 3);
    for i in 1..=100 {
        assert!(output.contains(&format!("(row {}) Tj", i)), "row {} missing", i);
    }
}

#[test]
fn long_paragraph_breaks_between_lines() {
    let lines: Vec<String> = (1..=80).map(|i| format!("line {}", i)).collect();
    let p = Paragraph::from_lines(&lines, ParagraphStyle::default());
    let pdf = DocTemplate::new(letter())
        .build(vec![Flowable::Paragraph(p)], Vec::new())
        .unwrap();
    let output = String::from_utf8_lossy(&pdf).into_owned();
    assert_eq!(page_count(&pdf), 2);
    assert!(output.contains("(line 1) Tj"));
    assert!(output.contains("(line 80) Tj"));
}

#[test]
fn spacer_at_page_break_is_dropped() {
    let flowables = vec![
        Flowable::Table(Table::new(vec![200.0], rows(35))),
        Flowable::Spacer(100.0),
        Flowable::Paragraph(Paragraph::new(ParagraphStyle::default()).text("next page")),
    ];
    let pdf = DocTemplate::new(letter()).build(flowables, Vec::new()).unwrap();
    let output = String::from_utf8_lossy(&pdf).into_owned();
    assert_eq!(page_count(&pdf), 2);
    // The paragraph starts at the top of page two's frame.
    assert!(output.contains("78 704 Td\n(next page) Tj"));
}

/// Frame of 216 x 16pt: one paragraph line fits, a padded table row does not.
fn short_page() -> PageGeometry {
    PageGeometry::new(300.0, 100.0, 36.0)
}

#[test]
fn oversized_unsplittable_flowable_is_an_error() {
    let table = Table::new(vec![200.0], vec![vec!["x".into()]]);
    let err = DocTemplate::new(short_page())
        .build(vec![Flowable::Table(table)], Vec::new())
        .unwrap_err();
    match err {
        Error::FlowableTooLarge { kind, page, .. } => {
            assert_eq!(kind, "table");
            assert_eq!(page, 1);
        }
        other => panic!("expected FlowableTooLarge, got {:?}", other),
    }
}

#[test]
fn oversized_row_after_other_content_moves_to_next_page_first() {
    let flowables = vec![
        Flowable::Paragraph(Paragraph::new(ParagraphStyle::default()).text("intro")),
        Flowable::Table(Table::new(vec![200.0], vec![vec!["x".into()]])),
    ];
    let err = DocTemplate::new(short_page())
        .build(flowables, Vec::new())
        .unwrap_err();
    assert!(matches!(err, Error::FlowableTooLarge { page: 2, .. }));
}

#[test]
fn row_taller_than_page_continues_on_next_page() {
    let tall_cell = (1..=80)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let flowables = vec![
        Flowable::Paragraph(Paragraph::new(ParagraphStyle::default()).text("intro")),
        Flowable::Table(Table::new(vec![200.0], vec![vec![tall_cell.into()]])),
    ];
    let pdf = DocTemplate::new(letter()).build(flowables, Vec::new()).unwrap();
    let output = String::from_utf8_lossy(&pdf);

    // 636pt frame holds 52 lines of a padded row; the row starts on page 2.
    assert_eq!(page_count(&pdf), 3);
    for i in 1..=80 {
        assert_eq!(output.matches(&format!("(line {}) Tj", i)).count(), 1, "line {}", i);
    }
}

#[test]
fn long_wrapped_paragraph_cell_splits_between_pages() {
    let name = Paragraph::new(ParagraphStyle::default()).text(&"seed ".repeat(400));
    let table = Table::new(
        vec![60.0, 180.0],
        vec![
            vec!["No.".into(), "Name".into()],
            vec!["1".into(), name.into()],
        ],
    );
    let pdf = DocTemplate::new(letter())
        .build(vec![Flowable::Table(table)], Vec::new())
        .unwrap();
    let output = String::from_utf8_lossy(&pdf);

    assert!(page_count(&pdf) >= 2);
    assert_eq!(output.matches("seed").count(), 400);
}

#[test]
fn margins_larger_than_page_are_rejected() {
    let geometry = PageGeometry::new(100.0, 100.0, 60.0);
    let err = DocTemplate::new(geometry)
        .build(vec![Flowable::Spacer(1.0)], Vec::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)));
}

#[test]
fn decorators_run_once_per_page() {
    let first_calls = RefCell::new(Vec::new());
    let later_calls = RefCell::new(Vec::new());
    let first = |_: &mut Canvas, page: &PageInfo| first_calls.borrow_mut().push(page.number);
    let later = |_: &mut Canvas, page: &PageInfo| later_calls.borrow_mut().push(page.number);

    let table = Table::new(vec![200.0], rows(100));
    DocTemplate::new(letter())
        .on_first_page(&first)
        .on_later_pages(&later)
        .build(vec![Flowable::Table(table)], Vec::new())
        .unwrap();

    assert_eq!(*first_calls.borrow(), vec![1]);
    assert_eq!(*later_calls.borrow(), vec![2, 3]);
}

#[test]
fn decoration_is_drawn_before_content_in_saved_state() {
    let banner = |canvas: &mut Canvas, page: &PageInfo| {
        canvas.draw_string(10.0, 10.0, &format!("banner {}", page.number));
    };
    let pdf = DocTemplate::new(letter())
        .on_first_page(&banner)
        .build(
            vec![Flowable::Paragraph(
                Paragraph::new(ParagraphStyle::default()).text("body"),
            )],
            Vec::new(),
        )
        .unwrap();
    let output = String::from_utf8_lossy(&pdf).into_owned();
    let banner_at = output.find("(banner 1) Tj").unwrap();
    let body_at = output.find("(body) Tj").unwrap();
    assert!(banner_at < body_at);
    assert!(output.contains("stream\nq\nBT\n"));
}

#[test]
fn info_and_compression_are_forwarded() {
    let pdf = DocTemplate::new(letter())
        .info("Title", "Invoice INV001")
        .compress(true)
        .build(vec![Flowable::Spacer(1.0)], Vec::new())
        .unwrap();
    let output = String::from_utf8_lossy(&pdf).into_owned();
    assert!(output.contains("/Title (Invoice INV001)"));
    assert!(output.contains("/Filter /FlateDecode"));
}

#[test]
fn empty_flowable_list_still_produces_a_page() {
    let pdf = DocTemplate::new(letter()).build(Vec::new(), Vec::new()).unwrap();
    assert_eq!(page_count(&pdf), 1);
}
