use chrono::{TimeZone, Utc};
use insta::assert_snapshot;
use termsheet::cli::render::{invoice_list_label, render_invoice, RenderStyle};
use termsheet_domain::{Entity, Invoice, InvoiceData, InvoiceSummary, LineItem, StoredLineItem};

fn sample_invoice(items: Vec<LineItem>) -> InvoiceData {
    let date_created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    InvoiceData {
        invoice: Invoice {
            id: 7,
            provider_id: "p1".into(),
            client_id: "c1".into(),
            paid: false,
            date_created,
        },
        provider: Entity {
            id: "p1".into(),
            name: "Acme Studio".into(),
            address: Some("12 Harbour Rd".into()),
            email: Some("billing@acme.test".into()),
            phone: Some(String::new()),
        },
        client: Entity {
            id: "c1".into(),
            name: "Globex".into(),
            address: None,
            email: None,
            phone: None,
        },
        items: items
            .into_iter()
            .enumerate()
            .map(|(index, item)| StoredLineItem {
                id: index as i64 + 1,
                invoice_id: 7,
                item,
            })
            .collect(),
    }
}

#[test]
fn plain_invoice_view() {
    let data = sample_invoice(vec![
        LineItem::new("Widget", 10.0, 25.5),
        LineItem::new("Consulting services for March", 1.5, 80.0),
    ]);

    assert_snapshot!(render_invoice(&data, &RenderStyle::default()), @r###"
Invoice #7

Date: 2024-03-05  |  Status: Unpaid

Provider
Name: Acme Studio
Address: 12 Harbour Rd
Email: billing@acme.test

Client
Name: Globex

Items
Item                Quantity    Cost/Unit      Total
Widget              10.00       $25.50         $255.00
Consulting serv...  1.50        $80.00         $120.00

Total: $375.00
"###);
}

#[test]
fn empty_invoice_uses_configured_currency() {
    let data = sample_invoice(Vec::new());
    let style = RenderStyle {
        currency_symbol: "€".into(),
        color: false,
    };

    let text = render_invoice(&data, &style);
    assert!(text.contains("Items\nNo items\n"));
    assert!(text.ends_with("Total: €0.00"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn list_label_shows_parties_and_status() {
    let summary = InvoiceSummary {
        id: 12,
        provider_name: "Acme Studio".into(),
        client_name: "Globex".into(),
        date_created: Utc::now(),
        paid: true,
    };
    assert_eq!(
        invoice_list_label(&summary),
        "#12 - Acme Studio → Globex (Paid)"
    );
}
