use super::student::StudentId;

/// Account classification used to tag every ledger line. Reference data,
/// immutable once the directory is built.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum AccountKind {
    Asset,
    Liability,
    Income,
    Expense,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Account {
    Cash(CashAccount),
    Receivable(ReceivableAccount),
    Liability(LiabilityAccount),
    Income(IncomeAccount),
    Expense(ExpenseAccount),
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct CashAccount(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ReceivableAccount(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct LiabilityAccount(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct IncomeAccount(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ExpenseAccount(pub(crate) String);

// Shorthand constructors.

pub fn cash(code: impl Into<String>) -> CashAccount {
    CashAccount(code.into())
}

pub fn receivable(root: impl Into<String>, student_id: &StudentId) -> ReceivableAccount {
    ReceivableAccount(format!("{}:{}", root.into(), student_id))
}

pub fn liability(code: impl Into<String>) -> LiabilityAccount {
    LiabilityAccount(code.into())
}

pub fn income(code: impl Into<String>) -> IncomeAccount {
    IncomeAccount(code.into())
}

pub fn expense(code: impl Into<String>) -> ExpenseAccount {
    ExpenseAccount(code.into())
}

// Easy conversion.

macro_rules! impl_into_account {
    ($typ:ty, $variant:ident) => {
        impl Into<Account> for $typ {
            fn into(self) -> Account {
                Account::$variant(self)
            }
        }
    };
}

impl_into_account!(CashAccount, Cash);
impl_into_account!(ReceivableAccount, Receivable);
impl_into_account!(LiabilityAccount, Liability);
impl_into_account!(IncomeAccount, Income);
impl_into_account!(ExpenseAccount, Expense);

// --

impl Account {
    pub fn code(&self) -> &str {
        match self {
            Account::Cash(a) => &a.0,
            Account::Receivable(a) => &a.0,
            Account::Liability(a) => &a.0,
            Account::Income(a) => &a.0,
            Account::Expense(a) => &a.0,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Cash(_) | Account::Receivable(_) => AccountKind::Asset,
            Account::Liability(_) => AccountKind::Liability,
            Account::Income(_) => AccountKind::Income,
            Account::Expense(_) => AccountKind::Expense,
        }
    }
}

/// One row of the chart of accounts.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
}

/// Static chart of accounts. Lookup is by exact code first, falling back to
/// the scoped root (so `AR:<student>` resolves through the `AR` row).
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    accounts: Vec<AccountInfo>,
}

impl AccountDirectory {
    pub fn new(accounts: Vec<AccountInfo>) -> Self {
        Self { accounts }
    }

    pub fn lookup(&self, code: &str) -> Option<&AccountInfo> {
        self.accounts
            .iter()
            .find(|info| info.code == code)
            .or_else(|| {
                let root = code.split(':').next()?;
                self.accounts.iter().find(|info| info.code == root)
            })
    }

    pub fn display_name(&self, code: &str) -> String {
        match self.lookup(code) {
            Some(info) if info.code == code => info.name.clone(),
            // Scoped code: append the scope to the root's name.
            Some(info) => {
                let scope = code.strip_prefix(&info.code).unwrap_or("");
                format!("{}{}", info.name, scope.replace(':', " / "))
            }
            None => code.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountInfo> {
        self.accounts.iter()
    }
}
