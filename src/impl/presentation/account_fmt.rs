use crate::entities::Account;

impl Account {
    /// Journal path for the account, e.g. `Assets:AR:alice`.
    pub(crate) fn journal_path(&self) -> String {
        match self {
            Account::Cash(a) => format!("Assets:Cash:{}", a.0),
            Account::Receivable(a) => format!("Assets:{}", a.0),
            Account::Liability(a) => format!("Liabilities:{}", a.0),
            Account::Income(a) => format!("Income:{}", a.0),
            Account::Expense(a) => format!("Expenses:{}", a.0),
        }
    }

    pub(crate) fn type_tag(&self) -> char {
        match self {
            Account::Cash(_) | Account::Receivable(_) => 'A',
            Account::Liability(_) => 'L',
            Account::Income(_) => 'R',
            Account::Expense(_) => 'X',
        }
    }
}
