//! Plain-text rendering of engine results.

use std::io::{self, Write};

use foodwaste_inventory::{DonationCandidate, ExpiringItem, InventoryItem, WasteReport};

pub fn expiring(out: &mut impl Write, items: &[ExpiringItem]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No food items expiring soon.");
    }
    writeln!(out, "Food items expiring soon:")?;
    for item in items {
        writeln!(out, "- {} (Expiration: {})", item.name, item.expires_on)?;
    }
    Ok(())
}

pub fn donations(out: &mut impl Write, candidates: &[DonationCandidate]) -> io::Result<()> {
    if candidates.is_empty() {
        return writeln!(out, "No items need donation at this time.");
    }
    writeln!(out, "Consider donating the following items nearing expiration:")?;
    for c in candidates {
        writeln!(out, "- {} (Expires in {} days)", c.name, c.days_remaining)?;
    }
    Ok(())
}

pub fn waste_report(out: &mut impl Write, report: &WasteReport) -> io::Result<()> {
    writeln!(out, "\nWaste Report:")?;
    for r in &report.records {
        writeln!(
            out,
            "Food: {}, Quantity Wasted: {}, Reason: {}, Time: {}",
            r.name,
            r.quantity_wasted,
            r.reason,
            r.recorded_at.format("%Y-%m-%d %H:%M:%S")
        )?;
    }

    writeln!(out, "\nTotal Food Wasted by Category:")?;
    for t in &report.totals {
        writeln!(out, "{}: {} units", t.name, t.quantity_wasted)?;
    }
    Ok(())
}

pub fn inventory(out: &mut impl Write, items: &[InventoryItem]) -> io::Result<()> {
    writeln!(out, "\n--- Current Inventory ---")?;
    if items.is_empty() {
        return writeln!(out, "Inventory is empty.");
    }
    for item in items {
        writeln!(
            out,
            "{}: {} units (Expires on {})",
            item.name(),
            item.quantity(),
            item.expires_on()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodwaste_core::ExpirationDate;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_sections_have_placeholders() {
        assert_eq!(rendered(|o| expiring(o, &[])), "No food items expiring soon.\n");
        assert_eq!(
            rendered(|o| donations(o, &[])),
            "No items need donation at this time.\n"
        );
        assert_eq!(
            rendered(|o| inventory(o, &[])),
            "\n--- Current Inventory ---\nInventory is empty.\n"
        );
    }

    #[test]
    fn inventory_lines() {
        let date = ExpirationDate::from_ymd(2025, 1, 10).unwrap();
        let items = [InventoryItem::new("milk".into(), 2, date)];
        assert_eq!(
            rendered(|o| inventory(o, &items)),
            "\n--- Current Inventory ---\nmilk: 2 units (Expires on 2025-01-10)\n"
        );
    }
}
