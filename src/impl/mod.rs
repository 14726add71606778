// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod charges_csv_datasource;
        pub(crate) mod ledger_store_datasource;
        pub(crate) mod payments_csv_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod billing_month_model;
        pub(crate) mod debtor_document_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod payment_document_model;
        pub(crate) mod transaction_entry_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod ledger_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account;
        pub(crate) mod accrual;
        pub(crate) mod allocation;
        pub(crate) mod billing_month;
        pub(crate) mod component;
        pub(crate) mod debtor;
        pub(crate) mod ledger_entry;
        pub(crate) mod obligation;
        pub(crate) mod payment;
        pub(crate) mod student;
    }
    pub(crate) mod logic {
        pub(crate) mod accrual_logic;
        pub(crate) mod debtor_rollup;
        pub(crate) mod entry_builder;
        pub(crate) mod obligation_calculator;
        pub(crate) mod payment_allocator;
        mod utils;
        #[cfg(test)]
        pub(crate) mod testkit;
    }
    pub(crate) mod repositories {
        pub(crate) mod ledger_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod accrual_usecase;
        pub(crate) mod allocate_payment_usecase;
        pub(crate) mod debtor_usecase;
        pub(crate) mod student_locks;
    }
}

pub(crate) mod presentation {
    pub(crate) mod account_fmt;
    pub(crate) mod amount_fmt;
    pub(crate) mod journal_printer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::account::*;
        pub use crate::domain::entities::accrual::*;
        pub use crate::domain::entities::allocation::*;
        pub use crate::domain::entities::billing_month::*;
        pub use crate::domain::entities::component::*;
        pub use crate::domain::entities::debtor::*;
        pub use crate::domain::entities::ledger_entry::*;
        pub use crate::domain::entities::obligation::*;
        pub use crate::domain::entities::payment::*;
        pub use crate::domain::entities::student::*;
    }
}
