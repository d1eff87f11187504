//! Loan desk: a user's loans and the actions on them

use crate::config::LoanConfig;
use crate::core::error::{BackendError, LibraryError};
use crate::core::model::{Loan, LoanCreateRequest, LoanReturnRequest, LoanStatus};
use crate::core::{Backend, Notifier};
use crate::view::parse_datetime;
use chrono::{Days, NaiveDate};
use std::sync::Arc;

/// Whole days from `today` until `date`; negative once it has passed
///
/// Time of day is ignored. Missing or unreadable dates count as 0.
pub fn days_until(date: &str, today: NaiveDate) -> i64 {
    parse_datetime(date)
        .map(|target| (target.date() - today).num_days())
        .unwrap_or(0)
}

/// Days past `date`, or 0 if it has not passed
pub fn days_overdue(date: &str, today: NaiveDate) -> i64 {
    (-days_until(date, today)).max(0)
}

pub struct LoanDesk {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    config: LoanConfig,
    user_id: Option<String>,
    loans: Vec<Loan>,
}

impl LoanDesk {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>, config: LoanConfig) -> Self {
        Self {
            backend,
            notifier,
            config,
            user_id: None,
            loans: Vec::new(),
        }
    }

    /// Request for a new loan starting `today`, due after the default period
    pub fn loan_request(&self, user_id: &str, book_id: &str, today: NaiveDate) -> LoanCreateRequest {
        let due = today
            .checked_add_days(Days::new(u64::from(self.config.default_period_days)))
            .unwrap_or(today);
        LoanCreateRequest {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            loan_date: today.format("%Y-%m-%d").to_string(),
            due_date: due.format("%Y-%m-%d").to_string(),
        }
    }

    pub async fn borrow(
        &mut self,
        user_id: &str,
        book_id: &str,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        let request = self.loan_request(user_id, book_id, today);
        match self.backend.create_loan(request).await {
            Ok(loan) => {
                self.notifier
                    .success(&format!("'{}' is due on {}", loan.book_title, loan.due_date));
                if self.user_id.as_deref() == Some(user_id) {
                    self.loans.push(loan.clone());
                }
                Ok(loan)
            }
            Err(err) => Err(self.report("Could not borrow the book", err)),
        }
    }

    /// Look up a user's loans; an empty id is rejected locally
    pub async fn lookup(&mut self, user_id: &str) -> Result<&[Loan], LibraryError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            self.notifier.error("Enter a user id");
            return Err(crate::core::error::RequestError::MissingParameter {
                name: "userId".to_string(),
            }
            .into());
        }

        match self.backend.user_loans(user_id).await {
            Ok(loans) => {
                self.user_id = Some(user_id.to_string());
                self.loans = loans;
                Ok(&self.loans)
            }
            Err(err) => {
                self.loans.clear();
                Err(self.report("Could not load loans; check the user id", err))
            }
        }
    }

    pub async fn return_book(&mut self, loan_id: &str, today: NaiveDate) -> Result<Loan, LibraryError> {
        let request = LoanReturnRequest {
            return_date: today.format("%Y-%m-%d").to_string(),
        };
        match self.backend.return_loan(loan_id, request).await {
            Ok(loan) => {
                self.notifier.success("The book was returned");
                self.replace(&loan);
                Ok(loan)
            }
            Err(err) => Err(self.report("Could not return the book", err)),
        }
    }

    /// Extend by `days`, or by the backend default when `None`
    pub async fn extend(&mut self, loan_id: &str, days: Option<u32>) -> Result<Loan, LibraryError> {
        let result = match days {
            Some(days) => self.backend.extend_loan(loan_id, days).await,
            None => self.backend.extend_loan_default(loan_id).await,
        };
        match result {
            Ok(loan) => {
                self.notifier
                    .success(&format!("Loan extended until {}", loan.due_date));
                self.replace(&loan);
                Ok(loan)
            }
            Err(err) => Err(self.report(
                &format!(
                    "Could not extend the loan (at most {} extensions)",
                    self.config.max_extensions
                ),
                err,
            )),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Loans still holding a copy
    pub fn active(&self) -> Vec<&Loan> {
        self.loans.iter().filter(|l| l.status.is_active()).collect()
    }

    pub fn returned(&self) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|l| l.status == LoanStatus::Returned)
            .collect()
    }

    /// Marked overdue by the backend, or loaned past the due date
    pub fn overdue(&self, today: NaiveDate) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|l| match l.status {
                LoanStatus::Overdue => true,
                LoanStatus::Loaned => days_until(&l.due_date, today) < 0,
                LoanStatus::Returned => false,
            })
            .collect()
    }

    fn replace(&mut self, updated: &Loan) {
        if let Some(slot) = self.loans.iter_mut().find(|l| l.loan_id == updated.loan_id) {
            *slot = updated.clone();
        }
    }

    fn report(&self, message: &str, err: BackendError) -> LibraryError {
        tracing::warn!(error = %err, "{}", message);
        self.notifier.error(&format!("{}: {}", message, err));
        err.into()
    }
}
