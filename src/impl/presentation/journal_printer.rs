use std::collections::HashSet;

use crate::entities::{Account, DebtorAggregate, LedgerEntry};

use super::amount_fmt::format_amount;

pub(crate) struct JournalPrinter;

impl JournalPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Renders the posted ledger as an hledger-style journal for audit:
    /// account declarations, transactions in date order, and the debtor
    /// rollups as trailing balance comments.
    pub(crate) fn print_journal(
        &self,
        entries: &[LedgerEntry],
        aggregates: &[DebtorAggregate],
    ) -> String {
        let mut journal_output = String::new();

        journal_output.push_str(
            "; --- Accounts -----------------------------------------------------------------\n\n",
        );
        self.print_accounts(&mut journal_output, entries);
        journal_output.push_str("\n\n");

        journal_output.push_str(
            "; --- Transactions -------------------------------------------------------------\n\n",
        );
        self.print_transactions(&mut journal_output, entries);
        journal_output.push('\n');

        journal_output.push_str(
            "; --- Debtor balances ----------------------------------------------------------\n\n",
        );
        self.print_debtors(&mut journal_output, aggregates);

        journal_output
    }

    fn print_accounts(&self, journal_output: &mut String, entries: &[LedgerEntry]) {
        let accounts: HashSet<Account> = entries
            .iter()
            .flat_map(|entry| entry.lines.iter().map(|line| &line.account))
            .cloned()
            .collect();
        let sorted_account_declarations = {
            let mut v: Vec<String> = accounts
                .iter()
                .map(|account| {
                    format!(
                        "account {:61}  ; type: {}\n",
                        account.journal_path(),
                        account.type_tag()
                    )
                })
                .collect();
            v.sort();
            v
        };
        for declaration in sorted_account_declarations {
            journal_output.push_str(&declaration);
        }
    }

    fn print_transactions(&self, journal_output: &mut String, entries: &[LedgerEntry]) {
        let sorted_entries = {
            let mut v: Vec<&LedgerEntry> = entries.iter().filter(|e| e.is_posted()).collect();
            v.sort_by_key(|entry| (entry.date, entry.id));
            v
        };
        for entry in sorted_entries {
            journal_output.push_str(&format!(
                "{} ({}) {}\n",
                entry.date, entry.id, entry.description
            ));
            for line in &entry.lines {
                // Debits positive, credits negative, hledger convention.
                let signed = line.debit - line.credit;
                journal_output.push_str(&format!(
                    "    {:55} {:>20}\n",
                    line.account.journal_path(),
                    format_amount(signed),
                ));
            }
            let note = format!("source: {} | ref: {}", entry.source, entry.source_ref);
            let wrapped = textwrap::wrap(&note, 74);
            for note_line in wrapped {
                journal_output.push_str(&format!("    ; {}\n", note_line));
            }
            journal_output.push('\n');
        }
    }

    fn print_debtors(&self, journal_output: &mut String, aggregates: &[DebtorAggregate]) {
        let sorted_aggregates = {
            let mut v: Vec<&DebtorAggregate> = aggregates.iter().collect();
            v.sort_by(|a, b| a.student_id.cmp(&b.student_id));
            v
        };
        for aggregate in sorted_aggregates {
            journal_output.push_str(&format!(
                "; {}: owed {}, paid {}, balance {}\n",
                aggregate.student_id,
                format_amount(aggregate.total_owed),
                format_amount(aggregate.total_paid),
                format_amount(aggregate.current_balance),
            ));
            for position in &aggregate.monthly_breakdown {
                journal_output.push_str(&format!(
                    ";     {} {:8} {:>12} {:>12}  {}\n",
                    position.month,
                    position.component.to_string(),
                    format_amount(position.owed),
                    format_amount(position.paid),
                    position.status,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests;
