//! Deciding which documents to produce from one sheet.
//!
//! Customers picked into a combination are billed together in one combined
//! document; every other customer gets a document of their own.

use std::collections::BTreeSet;

use super::aggregate::InvoiceMap;
use super::error::{BillingError, BillingResult};

/// One document to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentJob {
    /// A standalone invoice for one customer.
    Single { customer: String },
    /// Several customers billed in one document, addressed to `destination`.
    Combined {
        destination: String,
        period: String,
        customers: Vec<String>,
    },
}

impl DocumentJob {
    /// Name the document is stored under, without extension.
    pub fn document_name(&self, invoices: &InvoiceMap) -> String {
        match self {
            DocumentJob::Single { customer } => {
                let period = invoices.get(customer).map(|r| r.date.as_str()).unwrap_or("");
                document_name(customer, period)
            }
            DocumentJob::Combined {
                destination,
                period,
                ..
            } => document_name(destination, period),
        }
    }
}

/// `"{label} {period}"`, the naming used for stored invoices.
pub fn document_name(label: &str, period: &str) -> String {
    format!("{label} {period}").trim_end().to_string()
}

/// Ordered list of documents for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    jobs: Vec<DocumentJob>,
}

impl BatchPlan {
    /// Plan singles for every customer outside `combinations`, followed by one
    /// combined job per combination.
    ///
    /// A combination is addressed with the name and period of its first
    /// member. Fails on an empty combination or an unknown customer.
    pub fn new(invoices: &InvoiceMap, combinations: &[Vec<String>]) -> BillingResult<Self> {
        let mut combined: BTreeSet<&str> = BTreeSet::new();
        let mut combined_jobs = Vec::with_capacity(combinations.len());

        for members in combinations {
            let first = members.first().ok_or(BillingError::EmptyCombination)?;
            for member in members {
                if !invoices.contains_key(member) {
                    return Err(BillingError::UnknownCustomer(member.clone()));
                }
                combined.insert(member);
            }
            let lead = &invoices[first];
            combined_jobs.push(DocumentJob::Combined {
                destination: lead.name.clone(),
                period: lead.date.clone(),
                customers: members.clone(),
            });
        }

        let mut jobs: Vec<DocumentJob> = invoices
            .keys()
            .filter(|name| !combined.contains(name.as_str()))
            .map(|name| DocumentJob::Single {
                customer: name.clone(),
            })
            .collect();
        jobs.extend(combined_jobs);

        Ok(Self { jobs })
    }

    /// One single job per customer.
    pub fn singles(invoices: &InvoiceMap) -> Self {
        Self {
            jobs: invoices
                .keys()
                .map(|name| DocumentJob::Single {
                    customer: name.clone(),
                })
                .collect(),
        }
    }

    pub fn jobs(&self) -> &[DocumentJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Receives finished documents.
///
/// Persistence is entirely the sink's business; a failure is reported back
/// as-is and never retried by the caller.
pub trait DocumentSink<D> {
    fn accept(&mut self, name: &str, document: D) -> BillingResult<()>;
}

/// Keeps documents in memory, in arrival order.
#[derive(Debug)]
pub struct MemorySink<D> {
    pub documents: Vec<(String, D)>,
}

impl<D> Default for MemorySink<D> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
        }
    }
}

impl<D> DocumentSink<D> for MemorySink<D> {
    fn accept(&mut self, name: &str, document: D) -> BillingResult<()> {
        self.documents.push((name.to_string(), document));
        Ok(())
    }
}
