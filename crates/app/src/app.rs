//! The application facade.
//!
//! Every operation reads a snapshot through the repositories, runs the
//! relevant engine, persists the outcome, and answers. The store is handed
//! in explicitly; nothing here is global.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    Commerce, CreateRewardRequest, Customer, EnrollCustomerRequest, ProgramConfig,
    RegisterCommerceRequest, ReminderCandidate, ReminderKind, ReminderLogEntry, ReminderStatus,
    Reward, RewardKind, ScanMethod, Transaction, UsageSnapshot,
};
use domain::services::{accrual, activity, reminder_stats, reminders};
use domain::{DomainError, IntegrityWarning};
use persistence::repositories::{
    CommerceRepository, CustomerRepository, ReminderLogRepository, RewardRepository,
    ScanUsageRepository, TransactionRepository,
};
use persistence::Store;

use crate::config::Config;
use crate::error::AppError;
use crate::telemetry;

/// One purchase event as reported by the staff device.
#[derive(Debug, Clone)]
pub struct RecordPurchaseRequest {
    pub commerce_id: Uuid,
    pub customer_id: Uuid,
    pub staff_id: Uuid,
    pub amount: f64,
    pub method: ScanMethod,
    pub redeem_reward_id: Option<Uuid>,
    pub apply_coupon: bool,
}

/// Answer to a recorded purchase: the new customer state, the appended
/// transaction, and the commerce's usage after this scan. Enforcing
/// `usage.is_over_limit` is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub customer: Customer,
    pub transaction: Transaction,
    pub usage: UsageSnapshot,
    pub warnings: Vec<IntegrityWarning>,
}

/// Application facade over the store and the loyalty engines.
#[derive(Clone)]
pub struct LoyaltyApp {
    store: Store,
    config: Config,
    commerces: CommerceRepository,
    customers: CustomerRepository,
    transactions: TransactionRepository,
    rewards: RewardRepository,
    reminder_logs: ReminderLogRepository,
    scan_usage: ScanUsageRepository,
}

impl LoyaltyApp {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            commerces: CommerceRepository::new(store.clone()),
            customers: CustomerRepository::new(store.clone()),
            transactions: TransactionRepository::new(store.clone()),
            rewards: RewardRepository::new(store.clone()),
            reminder_logs: ReminderLogRepository::new(store.clone()),
            scan_usage: ScanUsageRepository::new(store.clone()),
            store,
            config,
        }
    }

    /// Entry point for embedding hosts: `.env`, config, logging, store.
    pub fn bootstrap() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Config::load()?;
        telemetry::init_logging(&config.logging);
        info!("Starting loyalty backend v{}", env!("CARGO_PKG_VERSION"));

        let store = Store::open(&config.store.path)?;
        Ok(Self::new(store, config))
    }

    pub fn register_commerce(&self, req: RegisterCommerceRequest) -> Result<Commerce, AppError> {
        req.validate()?;
        if self.commerces.find_by_slug(&req.slug).is_some() {
            return Err(AppError::Validation(format!(
                "Slug already registered: {}",
                req.slug
            )));
        }
        let commerce = Commerce::register(req, Utc::now());
        self.commerces.insert(commerce.clone())?;
        self.flush_if_configured()?;
        info!(commerce_id = %commerce.id, slug = %commerce.slug, "commerce registered");
        Ok(commerce)
    }

    pub fn update_program(
        &self,
        commerce_id: Uuid,
        program: ProgramConfig,
    ) -> Result<Commerce, AppError> {
        program.validate()?;
        self.require_commerce(commerce_id)?;
        let commerce = self
            .commerces
            .update_program(commerce_id, program, Utc::now())?;
        self.flush_if_configured()?;
        info!(commerce_id = %commerce.id, "program configuration updated");
        Ok(commerce)
    }

    pub fn enroll_customer(
        &self,
        commerce_id: Uuid,
        req: EnrollCustomerRequest,
    ) -> Result<Customer, AppError> {
        req.validate()?;
        self.require_commerce(commerce_id)?;
        if self.customers.phone_enrolled(commerce_id, &req.phone) {
            return Err(AppError::Validation(format!(
                "Phone already enrolled: {}",
                req.phone
            )));
        }
        let customer = Customer::enroll(commerce_id, req, Utc::now());
        self.customers.insert(customer.clone())?;
        self.flush_if_configured()?;
        info!(
            commerce_id = %commerce_id,
            customer_id = %customer.id,
            "customer enrolled"
        );
        Ok(customer)
    }

    /// QR-scan resolution.
    pub fn find_customer_by_scan_code(
        &self,
        commerce_id: Uuid,
        scan_code: &str,
    ) -> Option<Customer> {
        self.customers.find_by_scan_code(commerce_id, scan_code)
    }

    pub fn create_reward(
        &self,
        commerce_id: Uuid,
        req: CreateRewardRequest,
    ) -> Result<Reward, AppError> {
        req.validate()?;
        self.require_commerce(commerce_id)?;
        let threshold_present = match req.kind {
            RewardKind::Points => req.points_threshold.is_some(),
            RewardKind::Stars => req.stars_threshold.is_some(),
        };
        if !threshold_present {
            return Err(AppError::Validation(format!(
                "A {} reward needs a matching threshold",
                req.kind
            )));
        }
        let reward = Reward::create(commerce_id, req, Utc::now());
        self.rewards.insert(reward.clone())?;
        self.flush_if_configured()?;
        Ok(reward)
    }

    /// Record one purchase: run the accrual engine, persist its outcome,
    /// and bump the commerce's monthly scan counter.
    pub fn record_purchase(
        &self,
        req: RecordPurchaseRequest,
    ) -> Result<PurchaseReceipt, AppError> {
        let commerce = self.require_commerce(req.commerce_id)?;
        let customer = self
            .customers
            .find_by_id(req.customer_id)
            .filter(|c| c.commerce_id == commerce.id)
            .ok_or(DomainError::UnknownCustomer(req.customer_id))?;
        let reward = match req.redeem_reward_id {
            Some(id) => Some(self.rewards.find_by_id(id).ok_or_else(|| {
                DomainError::RewardMismatch(format!("unknown reward: {}", id))
            })?),
            None => None,
        };

        let now = Utc::now();
        let outcome = accrual::apply_purchase(
            &customer,
            &commerce.program,
            accrual::PurchaseInput {
                amount: req.amount,
                staff_id: req.staff_id,
                method: req.method,
                redeem: reward.as_ref(),
                apply_coupon: req.apply_coupon,
            },
            now,
        )?;

        self.customers.save(outcome.customer.clone())?;
        self.transactions.append(outcome.transaction.clone())?;
        let count = self.scan_usage.increment(commerce.id, now);
        let usage = UsageSnapshot::new(count, commerce.plan_type.monthly_scan_limit());
        self.flush_if_configured()?;

        for warning in &outcome.warnings {
            warn!(customer_id = %customer.id, %warning, "integrity warning on purchase");
        }
        info!(
            commerce_id = %commerce.id,
            customer_id = %customer.id,
            amount = req.amount,
            points = outcome.transaction.points_granted,
            "purchase recorded"
        );

        Ok(PurchaseReceipt {
            customer: outcome.customer,
            transaction: outcome.transaction,
            usage,
            warnings: outcome.warnings,
        })
    }

    pub fn activity_summary(
        &self,
        customer_id: Uuid,
    ) -> Result<activity::ActivitySummary, AppError> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .ok_or(DomainError::UnknownCustomer(customer_id))?;
        let transactions = self.transactions.list_by_customer(customer.id);
        Ok(activity::summarize(customer.id, &transactions))
    }

    /// Outreach candidates for a commerce, HIGH before MEDIUM before LOW.
    /// The sort is stable; within a priority the engine's order holds.
    pub fn reminder_candidates(
        &self,
        commerce_id: Uuid,
    ) -> Result<Vec<ReminderCandidate>, AppError> {
        let commerce = self.require_commerce(commerce_id)?;
        let customers = self.customers.list_by_commerce(commerce.id);
        let rewards = self.rewards.list_active_by_commerce(commerce.id);
        let transactions = self.transactions.list_by_commerce(commerce.id);
        let log = self.reminder_logs.list_by_commerce(commerce.id);

        let mut found = reminders::candidates(
            &customers,
            &commerce.program,
            &rewards,
            &transactions,
            &log,
            Utc::now(),
        );
        found.sort_by_key(|candidate| candidate.priority.rank());
        Ok(found)
    }

    /// Log that staff opened an outreach chat for a customer.
    pub fn open_reminder(
        &self,
        commerce_id: Uuid,
        customer_id: Uuid,
        kind: ReminderKind,
        message: impl Into<String>,
        staff_id: Uuid,
    ) -> Result<ReminderLogEntry, AppError> {
        self.require_commerce(commerce_id)?;
        self.customers
            .find_by_id(customer_id)
            .filter(|c| c.commerce_id == commerce_id)
            .ok_or(DomainError::UnknownCustomer(customer_id))?;

        let entry =
            ReminderLogEntry::open(commerce_id, customer_id, kind, message, staff_id, Utc::now());
        self.reminder_logs.append(entry.clone())?;
        self.flush_if_configured()?;
        Ok(entry)
    }

    /// Finalize an opened outreach entry as sent or skipped.
    pub fn resolve_reminder(
        &self,
        log_id: Uuid,
        status: ReminderStatus,
    ) -> Result<ReminderLogEntry, AppError> {
        if status == ReminderStatus::Opened {
            return Err(AppError::Validation(
                "An outreach entry can only be finalized as sent or skipped".to_string(),
            ));
        }
        let entry = self.reminder_logs.set_status(log_id, status)?;
        self.flush_if_configured()?;
        Ok(entry)
    }

    pub fn reminder_stats(
        &self,
        commerce_id: Uuid,
    ) -> Result<reminder_stats::ReminderStats, AppError> {
        let commerce = self.require_commerce(commerce_id)?;
        let log = self.reminder_logs.list_by_commerce(commerce.id);
        Ok(reminder_stats::stats(&log, Utc::now()))
    }

    /// Current plan usage for a commerce.
    pub fn usage(&self, commerce_id: Uuid) -> Result<UsageSnapshot, AppError> {
        let commerce = self.require_commerce(commerce_id)?;
        let count = self.scan_usage.current_count(commerce.id, Utc::now());
        Ok(UsageSnapshot::new(
            count,
            commerce.plan_type.monthly_scan_limit(),
        ))
    }

    /// Remove a commerce and everything it owns.
    pub fn delete_commerce(&self, commerce_id: Uuid) -> Result<(), AppError> {
        self.require_commerce(commerce_id)?;
        self.commerces.delete_cascade(commerce_id)?;
        self.flush_if_configured()?;
        Ok(())
    }

    fn require_commerce(&self, commerce_id: Uuid) -> Result<Commerce, AppError> {
        self.commerces
            .find_by_id(commerce_id)
            .ok_or_else(|| DomainError::UnknownCommerce(commerce_id).into())
    }

    fn flush_if_configured(&self) -> Result<(), AppError> {
        if self.config.store.flush_on_write {
            self.store.flush()?;
        }
        Ok(())
    }
}
