use fractic_server_error::{define_client_error, define_internal_error};

use crate::entities::{BillingMonth, ComponentType, PaymentId, StudentId};

// IO-related.
define_client_error!(ReadError, "Error reading file.");

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(
    InvalidBillingMonth,
    "Invalid billing month (expected YYYY-MM): {month}.",
    { month: &str }
);
define_client_error!(
    InvalidPaymentAmount,
    "Invalid payment amount: '{value}'.",
    { value: &str }
);

// Payment-intake-related.
define_client_error!(
    MalformedPayment,
    "Malformed payment '{payment_id}': {details}.",
    { payment_id: &PaymentId, details: &str }
);
define_client_error!(
    DuplicatePayment,
    "Payment '{payment_id}' has already been allocated. Amendments require a reversal plus a new payment.",
    { payment_id: &PaymentId }
);

// Ledger-related.
define_client_error!(
    UnknownAccountCode,
    "Account code '{code}' is not in the account directory.",
    { code: &str }
);
define_internal_error!(
    ObligationReadError,
    "Ledger store unavailable while computing outstanding balances for '{student_id}'.",
    { student_id: &StudentId }
);
define_internal_error!(
    LedgerImbalanceError,
    "Entry '{description}' does not balance: total debit {total_debit} != total credit {total_credit}.",
    { description: &str, total_debit: f64, total_credit: f64 }
);
define_internal_error!(
    PartialWriteError,
    "Entry batch rejected to avoid a partial write: {details}.",
    { details: &str }
);
define_internal_error!(
    DuplicateTransactionEntry,
    "Transaction entry id '{transaction_id}' already exists in the ledger store.",
    { transaction_id: &str }
);
define_internal_error!(
    SnapshotIoError,
    "Error reading or writing ledger snapshot: {details}.",
    { details: &str }
);
define_internal_error!(
    CorruptStoredEntry,
    "Stored transaction entry '{transaction_id}' could not be mapped back to the domain: {details}.",
    { transaction_id: &str, details: &str }
);

// Accrual-related.
define_client_error!(
    InvalidAccrualCharge,
    "Invalid accrual charge for '{student_id}' {month} ({component}): {details}.",
    { student_id: &StudentId, month: &BillingMonth, component: &ComponentType, details: &str }
);
