//! UI text localization.
//!
//! Two languages are defined, English and Bengali. Lookups go through a
//! [`Catalog`], which carries the selected language and a configured fallback
//! as explicit values; there is no process-wide language state. A key missing
//! from both languages resolves to its own name, so a lookup never fails.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Display language for UI text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Bn,
}

impl Language {
    /// Canonical language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Bn => "bn",
        }
    }
}

impl core::fmt::Display for Language {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Language {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "bn" => Ok(Language::Bn),
            other => Err(LedgerError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Message keys for every piece of UI text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Text {
    ExpenseList,
    IncomeList,
    AddExpense,
    ExpenseName,
    ExpenseAmount,
    ExpenseAdded,
    AddIncome,
    IncomeName,
    IncomeAmount,
    IncomeAdded,
    TransactionList,
    Delete,
    TotalExpense,
    TotalIncome,
    NoEntry,
}

impl Text {
    pub const ALL: [Text; 15] = [
        Text::ExpenseList,
        Text::IncomeList,
        Text::AddExpense,
        Text::ExpenseName,
        Text::ExpenseAmount,
        Text::ExpenseAdded,
        Text::AddIncome,
        Text::IncomeName,
        Text::IncomeAmount,
        Text::IncomeAdded,
        Text::TransactionList,
        Text::Delete,
        Text::TotalExpense,
        Text::TotalIncome,
        Text::NoEntry,
    ];

    /// Message key name, also the last-resort lookup result.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Text::ExpenseList => "expenseList",
            Text::IncomeList => "incomeList",
            Text::AddExpense => "addExpense",
            Text::ExpenseName => "expenseName",
            Text::ExpenseAmount => "expenseAmount",
            Text::ExpenseAdded => "expenseAdded",
            Text::AddIncome => "addIncome",
            Text::IncomeName => "incomeName",
            Text::IncomeAmount => "incomeAmount",
            Text::IncomeAdded => "incomeAdded",
            Text::TransactionList => "transactionList",
            Text::Delete => "delete",
            Text::TotalExpense => "totalExpense",
            Text::TotalIncome => "totalIncome",
            Text::NoEntry => "noEntry",
        }
    }

    /// Resolves the key against one language's catalog.
    #[must_use]
    pub const fn resolve(self, language: Language) -> Option<&'static str> {
        match language {
            Language::En => Some(match self {
                Text::ExpenseList => "Expense List",
                Text::IncomeList => "Income List",
                Text::AddExpense => "Add Expense",
                Text::ExpenseName => "Expense Name",
                Text::ExpenseAmount => "Expense Amount",
                Text::ExpenseAdded => "Expense added successfully!",
                Text::AddIncome => "Add Income",
                Text::IncomeName => "Income Name",
                Text::IncomeAmount => "Income Amount",
                Text::IncomeAdded => "Income added successfully!",
                Text::TransactionList => "Transactions",
                Text::Delete => "Delete",
                Text::TotalExpense => "Total Expense",
                Text::TotalIncome => "Total Income",
                Text::NoEntry => "No Entry",
            }),
            Language::Bn => Some(match self {
                Text::ExpenseList => "ব্যয় তালিকা",
                Text::IncomeList => "আয় তালিকা",
                Text::AddExpense => "ব্যয় যোগ করুন",
                Text::ExpenseName => "ব্যয়ের নাম",
                Text::ExpenseAmount => "ব্যয়ের পরিমাণ",
                Text::ExpenseAdded => "ব্যয় সফলভাবে যোগ করা হয়েছে!",
                Text::AddIncome => "আয় যোগ করুন",
                Text::IncomeName => "আয়ের নাম",
                Text::IncomeAmount => "আয়ের পরিমাণ",
                Text::IncomeAdded => "আয় সফলভাবে যোগ করা হয়েছে!",
                Text::TransactionList => "লেনদেন তালিকা",
                Text::Delete => "মুছে ফেলুন",
                Text::TotalExpense => "মোট ব্যয়",
                Text::TotalIncome => "মোট আয়",
                Text::NoEntry => "কোনো এন্ট্রি নেই",
            }),
        }
    }
}

/// Language selection for lookups, passed explicitly at read time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Catalog {
    language: Language,
    fallback: Language,
}

impl Catalog {
    pub const fn new(language: Language, fallback: Language) -> Self {
        Self { language, fallback }
    }

    #[must_use]
    pub const fn language(self) -> Language {
        self.language
    }

    /// Resolves a message key: selected language, then the fallback, then the
    /// key name itself.
    #[must_use]
    pub fn text(self, text: Text) -> &'static str {
        text.resolve(self.language)
            .or_else(|| text.resolve(self.fallback))
            .unwrap_or_else(|| text.key())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Language::En, Language::Bn)
    }
}
