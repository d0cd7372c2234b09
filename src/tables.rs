use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::daily::DailyMinimum, quantity::price::ZlotyPerMegawattHour};

#[must_use]
pub fn build_daily_minima_table(minima: &[DailyMinimum]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Date", "Weekday", "Hour", "Price"]);
    for minimum in minima {
        table.add_row(vec![
            Cell::new(minimum.date),
            Cell::new(minimum.date.format("%a")).add_attribute(Attribute::Dim),
            Cell::new(minimum.hour.format("%H:%M")),
            Cell::new(minimum.price).set_alignment(CellAlignment::Right).fg(
                if minimum.price < ZlotyPerMegawattHour::ZERO {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    #[test]
    fn test_build_daily_minima_table() {
        let hour = NaiveDateTime::parse_from_str("2025-03-01 13:00", "%Y-%m-%d %H:%M").unwrap();
        let table = build_daily_minima_table(&[DailyMinimum {
            date: hour.date(),
            hour,
            price: ZlotyPerMegawattHour(-20.5),
        }]);
        let rendered = table.to_string();
        assert!(rendered.contains("2025-03-01"));
        assert!(rendered.contains("13:00"));
        assert!(rendered.contains("-20.5 PLN/MWh"));
    }
}
