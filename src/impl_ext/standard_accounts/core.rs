use std::sync::LazyLock;

use crate::entities::{
    cash, income, liability, receivable, Account, AccountDirectory, AccountInfo, AccountKind,
    CashAccount, ComponentType, IncomeAccount, LiabilityAccount, ReceivableAccount, StudentId,
};

/// Root code for student receivables; per-student accounts are scoped
/// `AR:<studentId>` beneath it.
pub const RECEIVABLE_ROOT: &str = "AR";

pub static CASH_BANK: LazyLock<CashAccount> = LazyLock::new(|| cash("BANK"));
pub static RENTAL_INCOME: LazyLock<IncomeAccount> = LazyLock::new(|| income("RENT-INC"));
pub static ADMIN_FEE_INCOME: LazyLock<IncomeAccount> = LazyLock::new(|| income("ADMIN-INC"));
pub static OTHER_INCOME: LazyLock<IncomeAccount> = LazyLock::new(|| income("OTHER-INC"));
pub static DEPOSIT_LIABILITY: LazyLock<LiabilityAccount> = LazyLock::new(|| liability("DEP-LIAB"));

pub fn student_receivable(student_id: &StudentId) -> ReceivableAccount {
    receivable(RECEIVABLE_ROOT, student_id)
}

/// Credit-side account for accruing a component: income for rent and fees,
/// the deposit liability for deposits (a deposit owed is money held on the
/// student's behalf, not revenue).
pub fn accrual_credit_account(component: ComponentType) -> Account {
    match component {
        ComponentType::Rent => RENTAL_INCOME.clone().into(),
        ComponentType::Admin => ADMIN_FEE_INCOME.clone().into(),
        ComponentType::Deposit => DEPOSIT_LIABILITY.clone().into(),
        ComponentType::Other => OTHER_INCOME.clone().into(),
    }
}

/// The standard property-management chart of accounts.
pub fn standard_directory() -> AccountDirectory {
    AccountDirectory::new(vec![
        AccountInfo {
            code: "BANK".into(),
            name: "Bank".into(),
            kind: AccountKind::Asset,
        },
        AccountInfo {
            code: RECEIVABLE_ROOT.into(),
            name: "Accounts Receivable".into(),
            kind: AccountKind::Asset,
        },
        AccountInfo {
            code: "RENT-INC".into(),
            name: "Rental Income".into(),
            kind: AccountKind::Income,
        },
        AccountInfo {
            code: "ADMIN-INC".into(),
            name: "Admin Fee Income".into(),
            kind: AccountKind::Income,
        },
        AccountInfo {
            code: "OTHER-INC".into(),
            name: "Other Income".into(),
            kind: AccountKind::Income,
        },
        AccountInfo {
            code: "DEP-LIAB".into(),
            name: "Deposits Held".into(),
            kind: AccountKind::Liability,
        },
    ])
}
