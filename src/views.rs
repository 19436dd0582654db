use std::fmt::Write;

use crate::{format, model::FormattedBill};

/// Сортирует расходы от новых к старым.
/// Порядок расходов с одинаковой датой не меняется, расходы с битой датой
/// оказываются в конце.
pub fn sort_antichrono(bills: &mut [FormattedBill]) {
    bills.sort_by_cached_key(|b| std::cmp::Reverse(format::parse_date(&b.bill.date).ok()));
}

/// Таблица расходов для вывода в терминал.
pub fn bills_table(bills: &[FormattedBill]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<22} {:<20} {:<24} {:<11} {:>10}  {}",
        "Id", "Type", "Nom", "Date", "Montant", "Statut"
    );

    for b in bills {
        let _ = writeln!(
            out,
            "{:<22} {:<20} {:<24} {:<11} {:>8} €  {}",
            b.bill.id.as_deref().unwrap_or("-"),
            b.bill.expense_type,
            b.bill.name,
            b.date,
            b.bill.amount,
            b.status
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bill;

    fn formatted(id: &str, date: &str) -> FormattedBill {
        FormattedBill {
            date: format::format_date_or_raw(date),
            status: "En attente",
            bill: Bill {
                id: Some(id.into()),
                date: date.into(),
                ..Default::default()
            },
        }
    }

    fn ids(bills: &[FormattedBill]) -> Vec<&str> {
        bills.iter().filter_map(|b| b.bill.id.as_deref()).collect()
    }

    #[test]
    fn sorts_most_recent_first() {
        let mut bills = vec![
            formatted("a", "2001-01-01"),
            formatted("b", "2004-04-04"),
            formatted("c", "2003-03-03"),
            formatted("d", "2002-02-02"),
        ];

        sort_antichrono(&mut bills);

        assert_eq!(ids(&bills), ["b", "c", "d", "a"]);
    }

    #[test]
    fn keeps_order_of_equal_dates() {
        let mut bills = vec![
            formatted("a", "2002-02-02"),
            formatted("b", "2003-03-03"),
            formatted("c", "2002-02-02"),
            formatted("d", "2003-03-03T12:00:00Z"),
        ];

        sort_antichrono(&mut bills);

        assert_eq!(ids(&bills), ["b", "d", "a", "c"]);
    }

    #[test]
    fn malformed_dates_last() {
        let mut bills = vec![
            formatted("a", "garbage"),
            formatted("b", "2001-01-01"),
            formatted("c", ""),
        ];

        sort_antichrono(&mut bills);

        assert_eq!(ids(&bills), ["b", "a", "c"]);
    }

    #[test]
    fn table_lists_every_bill() {
        let bills = vec![formatted("a", "2004-04-04"), formatted("b", "2001-01-01")];

        let table = bills_table(&bills);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Id"));
        assert!(lines[1].contains("4 Avr. 04"));
        assert!(lines[2].contains("1 Jan. 01"));
        assert!(lines[2].contains("En attente"));
    }
}
