//! Text rendering of the stock listing.

use stockroom_inventory::Ledger;

/// `ID | Item | Quantity` with 1-based IDs, followed by the unique item count.
pub fn stock_table(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return "Inventory is empty.\nUnique items: 0\n".to_string();
    }

    let rows: Vec<(String, String, String)> = ledger
        .items()
        .enumerate()
        .map(|(i, (name, qty))| ((i + 1).to_string(), name.to_string(), qty.to_string()))
        .collect();

    let id_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max("ID".len());
    let name_w = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .max("Item".len());
    let qty_w = rows.iter().map(|r| r.2.len()).max().unwrap_or(0).max("Quantity".len());

    let mut out = format!("{:>id_w$} | {:<name_w$} | {:>qty_w$}\n", "ID", "Item", "Quantity");
    out.push_str(&format!(
        "{}-+-{}-+-{}\n",
        "-".repeat(id_w),
        "-".repeat(name_w),
        "-".repeat(qty_w)
    ));
    for (id, name, qty) in &rows {
        out.push_str(&format!("{id:>id_w$} | {name:<name_w$} | {qty:>qty_w$}\n"));
    }
    out.push_str(&format!("Unique items: {}\n", ledger.len()));
    out
}
