use chrono::NaiveDate;
use pdf_core::{
    Alignment, CellContent, CellSpan, Color, Paragraph, ParagraphStyle, StyleCommand, Table,
    TableStyle, VAlign, INCH,
};

use crate::model::{BuyerDetails, IssuerDetails, LineItem};

pub const ITEM_HEADERS: [&str; 7] = [
    "S.No.",
    "Product Name",
    "HSN Code",
    "Tax Slab",
    "Quantity",
    "Price",
    "Total",
];

pub const ITEM_COLUMN_WIDTHS: [f64; 7] = [
    0.75 * INCH,
    2.5 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
];

/// Helvetica 10pt on 12pt leading, used for every wrapped cell.
pub fn cell_style() -> ParagraphStyle {
    ParagraphStyle::default()
}

fn wrapped(text: &str) -> CellContent {
    Paragraph::new(cell_style()).text(text).into()
}

/// Two-column block: issuer lines on the left, buyer lines plus the
/// generation date on the right.
pub fn issuer_buyer_table(
    issuer: &IssuerDetails,
    buyer: &BuyerDetails,
    date: NaiveDate,
    page_width: f64,
) -> Table {
    let column = page_width / 3.0 - 0.5 * INCH;

    let mut buyer_lines = buyer.lines().to_vec();
    buyer_lines.push(format!("Date {}", date.format("%d-%m-%Y")));

    let rows = vec![
        vec!["Issuer".into(), "Issued To".into()],
        vec![
            Paragraph::from_lines(issuer.lines(), cell_style()).into(),
            Paragraph::from_lines(&buyer_lines, cell_style()).into(),
        ],
    ];

    let style = TableStyle::new()
        .add(CellSpan::row(0), StyleCommand::TextColor(Color::BLACK))
        .add(
            CellSpan::row(0),
            StyleCommand::LineBelow {
                width: 1.0,
                color: Color::BLACK,
            },
        )
        .add(CellSpan::row(0), StyleCommand::VAlign(VAlign::Middle))
        .add(
            CellSpan::row(-1),
            StyleCommand::LineBelow {
                width: 2.0,
                color: Color::BLACK,
            },
        )
        .add(CellSpan::rows_from(1), StyleCommand::VAlign(VAlign::Top));

    Table::new(vec![column, column], rows).with_style(style)
}

/// Header row plus one row per item, in input order. Ordinal, HSN code
/// and tax slab are single-line text; the rest wrap.
pub fn item_table(items: &[LineItem]) -> Table {
    let mut rows: Vec<Vec<CellContent>> = Vec::with_capacity(items.len() + 1);
    rows.push(ITEM_HEADERS.iter().map(|&h| h.into()).collect());
    rows.extend(items.iter().map(|item| {
        vec![
            item.sno.to_string().into(),
            wrapped(&item.name),
            item.hsn_code.to_string().into(),
            item.tax_slab.to_string().into(),
            wrapped(&item.quantity.to_string()),
            wrapped(&item.price.to_string()),
            wrapped(&item.total.to_string()),
        ]
    }));

    let grid = 0.25;
    let style = TableStyle::new()
        .add(CellSpan::row(0), StyleCommand::Background(Color::LIGHT_GREY))
        .add(CellSpan::row(0), StyleCommand::TextColor(Color::BLACK))
        .add(CellSpan::row(0), StyleCommand::Align(Alignment::Center))
        .add(CellSpan::row(0), StyleCommand::VAlign(VAlign::Middle))
        .add(
            CellSpan::all(),
            StyleCommand::InnerGrid {
                width: grid,
                color: Color::BLACK,
            },
        )
        .add(
            CellSpan::all(),
            StyleCommand::Box {
                width: grid,
                color: Color::BLACK,
            },
        )
        .add(
            CellSpan::row(-1),
            StyleCommand::LineBelow {
                width: 2.0,
                color: Color::BLACK,
            },
        )
        .add(CellSpan::rows_from(1), StyleCommand::VAlign(VAlign::Top));

    Table::new(ITEM_COLUMN_WIDTHS.to_vec(), rows).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartyDetails, Scalar};

    fn party(lines: &[&str]) -> PartyDetails {
        PartyDetails::new(lines.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn item(sno: i64, name: &str) -> LineItem {
        LineItem {
            sno: Scalar::Integer(sno),
            name: name.to_string(),
            hsn_code: Scalar::Text("1234".into()),
            tax_slab: Scalar::Text("5%".into()),
            quantity: Scalar::Integer(2),
            price: Scalar::Integer(10),
            total: Scalar::Integer(20),
        }
    }

    #[test]
    fn buyer_column_ends_with_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let table = issuer_buyer_table(
            &party(&["Acme Co", "1 Main St"]),
            &party(&["Jane Doe"]),
            date,
            841.89,
        );
        assert_eq!(table.rows()[0][1].plain_text(), "Issued To");
        assert_eq!(table.rows()[1][0].plain_text(), "Acme Co\n1 Main St");
        assert_eq!(table.rows()[1][1].plain_text(), "Jane Doe\nDate 09-03-2024");
        assert!((table.columns()[0] - 244.63).abs() < 1e-9);
    }

    #[test]
    fn item_rows_keep_input_order() {
        let items = [item(3, "C"), item(1, "A"), item(2, "B")];
        let table = item_table(&items);
        let names: Vec<String> = table.rows()[1..].iter().map(|r| r[1].plain_text()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(table.rows()[0].len(), 7);
        assert_eq!(table.width(), 7.5 * INCH);
    }
}
