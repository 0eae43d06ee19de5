//! Reminder candidate engine.
//!
//! Classifies each customer into zero-or-one outreach candidate. The
//! precedence contract is an explicit ordered rule table: rules are
//! evaluated in the order they appear in [`RULES`] and the first match
//! wins, so at most one candidate is emitted per customer per call.
//!
//! The engine performs no I/O; classification is a pure function of the
//! supplied snapshot and the outreach log at call time. Ordering of the
//! returned list is a presentation concern left to the caller.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{
    Customer, Priority, ProgramConfig, ReminderCandidate, ReminderKind, ReminderLogEntry, Reward,
    RewardKind, Transaction,
};
use crate::services::activity;

/// Customers contacted within this window get no candidate at all.
pub const SUPPRESSION_WINDOW_DAYS: i64 = 7;

/// Coupons expiring within this window (strictly) are flagged.
pub const COUPON_EXPIRY_WINDOW_HOURS: i64 = 72;

/// A customer at or past this share of a points threshold is "near" the
/// reward, until the threshold itself is reached.
pub const NEAR_REWARD_RATIO: f64 = 0.9;

const INACTIVE_RECENT_MIN_DAYS: i64 = 15;
const INACTIVE_RECENT_MAX_DAYS: i64 = 30;

/// Everything a rule may look at for one customer.
#[derive(Debug, Clone)]
pub struct ClassifierInput<'a> {
    pub customer: &'a Customer,
    pub program: &'a ProgramConfig,
    /// The commerce's rewards (inactive ones are ignored).
    pub rewards: &'a [Reward],
    pub last_visit_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

struct RuleOutcome {
    kind: ReminderKind,
    priority: Priority,
    reason: &'static str,
    progress_text: String,
}

/// One entry in the ordered classification table.
pub struct ReminderRule {
    pub name: &'static str,
    check: fn(&ClassifierInput<'_>) -> Option<RuleOutcome>,
}

/// Classification rules in evaluation order. First match wins.
static RULES: [ReminderRule; 5] = [
    ReminderRule {
        name: "coupon_expiring",
        check: coupon_expiring,
    },
    ReminderRule {
        name: "near_reward_points",
        check: near_reward_points,
    },
    ReminderRule {
        name: "near_reward_stars",
        check: near_reward_stars,
    },
    ReminderRule {
        name: "inactive_recent",
        check: inactive_recent,
    },
    ReminderRule {
        name: "inactive_long",
        check: inactive_long,
    },
];

/// The ordered rule table, exposed so callers can render the precedence.
pub fn rules() -> &'static [ReminderRule] {
    &RULES
}

/// Whether an outreach entry with status `opened` or `sent` exists for the
/// customer within the cool-down window.
pub fn is_suppressed(
    customer_id: Uuid,
    log: &[ReminderLogEntry],
    now: DateTime<Utc>,
) -> bool {
    log.iter().any(|entry| {
        entry.customer_id == customer_id
            && entry.suppresses()
            && now - entry.created_at < Duration::days(SUPPRESSION_WINDOW_DAYS)
    })
}

/// Classify one customer against the rule table. Returns at most one
/// candidate; suppression is the caller's first gate (see [`candidates`]).
pub fn classify(input: &ClassifierInput<'_>) -> Option<ReminderCandidate> {
    RULES.iter().find_map(|rule| {
        (rule.check)(input).map(|outcome| ReminderCandidate {
            customer_id: input.customer.id,
            customer_name: input.customer.name.clone(),
            phone: input.customer.phone.clone(),
            kind: outcome.kind,
            reason: outcome.reason.to_string(),
            priority: outcome.priority,
            last_visit_at: input.last_visit_at,
            progress_text: outcome.progress_text,
        })
    })
}

/// Compute outreach candidates for a commerce's customers.
///
/// The returned list is unsorted; priority ordering is applied by the
/// presentation layer.
pub fn candidates(
    customers: &[Customer],
    program: &ProgramConfig,
    rewards: &[Reward],
    transactions: &[Transaction],
    log: &[ReminderLogEntry],
    now: DateTime<Utc>,
) -> Vec<ReminderCandidate> {
    customers
        .iter()
        .filter(|customer| !is_suppressed(customer.id, log, now))
        .filter_map(|customer| {
            let summary = activity::summarize(customer.id, transactions);
            classify(&ClassifierInput {
                customer,
                program,
                rewards,
                last_visit_at: summary.last_visit_at,
                now,
            })
        })
        .collect()
}

fn coupon_expiring(input: &ClassifierInput<'_>) -> Option<RuleOutcome> {
    if !input.customer.discount_available {
        return None;
    }
    let expires_at = input.customer.discount_expires_at?;
    let remaining = expires_at - input.now;
    if remaining <= Duration::zero() || remaining >= Duration::hours(COUPON_EXPIRY_WINDOW_HOURS) {
        return None;
    }
    let progress_text = if remaining.num_hours() >= 1 {
        format!("Vence en {} h", remaining.num_hours())
    } else {
        format!("Vence en {} min", remaining.num_minutes().max(1))
    };
    Some(RuleOutcome {
        kind: ReminderKind::CouponExpiring,
        priority: Priority::High,
        reason: "Cupón por vencer",
        progress_text,
    })
}

fn near_reward_points(input: &ClassifierInput<'_>) -> Option<RuleOutcome> {
    if !input.program.enable_points {
        return None;
    }
    // The customer is measured against the lowest active threshold: the
    // reward they will reach first.
    let threshold = input
        .rewards
        .iter()
        .filter(|r| r.is_active && r.kind == RewardKind::Points)
        .filter_map(|r| r.points_threshold)
        .filter(|t| *t > 0)
        .min()?;
    let points = input.customer.total_points;
    // Inclusive at 90%, exclusive at 100%: reaching the threshold means
    // "ready to redeem", not "near".
    if (points as f64) >= (threshold as f64) * NEAR_REWARD_RATIO && points < threshold {
        Some(RuleOutcome {
            kind: ReminderKind::NearReward,
            priority: Priority::High,
            reason: "A un paso del premio",
            progress_text: format!("{} / {} pts", points, threshold),
        })
    } else {
        None
    }
}

fn near_reward_stars(input: &ClassifierInput<'_>) -> Option<RuleOutcome> {
    if !input.program.enable_stars {
        return None;
    }
    let goal = input.program.stars_goal;
    if goal > 1 && input.customer.current_stars == goal - 1 {
        Some(RuleOutcome {
            kind: ReminderKind::NearReward,
            priority: Priority::High,
            reason: "A un sello del premio",
            progress_text: format!("{} / {} sellos", input.customer.current_stars, goal),
        })
    } else {
        None
    }
}

fn inactive_recent(input: &ClassifierInput<'_>) -> Option<RuleOutcome> {
    let age = inactivity_days(input)?;
    if (INACTIVE_RECENT_MIN_DAYS..=INACTIVE_RECENT_MAX_DAYS).contains(&age) {
        Some(RuleOutcome {
            kind: ReminderKind::Inactive,
            priority: Priority::Medium,
            reason: "Inactivo reciente",
            progress_text: format!("Hace {} días", age),
        })
    } else {
        None
    }
}

fn inactive_long(input: &ClassifierInput<'_>) -> Option<RuleOutcome> {
    let age = inactivity_days(input)?;
    if age > INACTIVE_RECENT_MAX_DAYS {
        Some(RuleOutcome {
            kind: ReminderKind::Inactive,
            priority: Priority::Low,
            reason: "Inactivo (+30 días)",
            progress_text: format!("Hace {} días", age),
        })
    } else {
        None
    }
}

/// Days since the last visit. Customers who never visited have no
/// inactivity age and fall through to no candidate.
fn inactivity_days(input: &ClassifierInput<'_>) -> Option<i64> {
    input
        .last_visit_at
        .map(|last| shared::time::days_since(last, input.now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrollCustomerRequest, ReminderStatus, ScanMethod};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn customer(commerce_id: Uuid) -> Customer {
        Customer::enroll(
            commerce_id,
            EnrollCustomerRequest {
                name: "Ana Pérez".to_string(),
                phone: "+5491155551234".to_string(),
            },
            now() - Duration::days(120),
        )
    }

    fn points_program() -> ProgramConfig {
        ProgramConfig {
            enable_points: true,
            points_value: 10.0,
            ..ProgramConfig::default()
        }
    }

    fn stars_program(goal: i32) -> ProgramConfig {
        ProgramConfig {
            enable_stars: true,
            stars_goal: goal,
            ..ProgramConfig::default()
        }
    }

    fn points_reward(commerce_id: Uuid, threshold: i64) -> Reward {
        Reward {
            id: Uuid::new_v4(),
            commerce_id,
            name: "Premio".to_string(),
            kind: RewardKind::Points,
            points_threshold: Some(threshold),
            stars_threshold: None,
            is_active: true,
            created_at: now() - Duration::days(60),
        }
    }

    fn visit(customer_id: Uuid, at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            commerce_id: Uuid::new_v4(),
            customer_id,
            staff_id: Uuid::new_v4(),
            amount: 100.0,
            points_granted: 0,
            star_granted: false,
            coupon_generated: false,
            discount_applied: None,
            redeemed_reward_id: None,
            points_mode: None,
            points_value: None,
            method: ScanMethod::Scan,
            created_at: at,
        }
    }

    fn log_entry(
        customer_id: Uuid,
        status: ReminderStatus,
        at: DateTime<Utc>,
    ) -> ReminderLogEntry {
        let mut entry = ReminderLogEntry::open(
            Uuid::new_v4(),
            customer_id,
            ReminderKind::Inactive,
            "Hola!",
            Uuid::new_v4(),
            at,
        );
        entry.status = status;
        entry
    }

    fn classify_one(
        customer: &Customer,
        program: &ProgramConfig,
        rewards: &[Reward],
        last_visit_at: Option<DateTime<Utc>>,
    ) -> Option<ReminderCandidate> {
        classify(&ClassifierInput {
            customer,
            program,
            rewards,
            last_visit_at,
            now: now(),
        })
    }

    #[test]
    fn test_suppression_beats_everything() {
        let commerce_id = Uuid::new_v4();
        let c = customer(commerce_id);
        let program = ProgramConfig::default();
        // 40 days inactive, would otherwise be a LOW candidate
        let visits = vec![visit(c.id, now() - Duration::days(40))];
        let log = vec![log_entry(c.id, ReminderStatus::Sent, now() - Duration::days(3))];

        let found = candidates(
            std::slice::from_ref(&c),
            &program,
            &[],
            &visits,
            &log,
            now(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_skipped_outreach_does_not_suppress() {
        let c = customer(Uuid::new_v4());
        let log = vec![log_entry(c.id, ReminderStatus::Skipped, now() - Duration::days(1))];
        assert!(!is_suppressed(c.id, &log, now()));
    }

    #[test]
    fn test_suppression_expires_after_window() {
        let c = customer(Uuid::new_v4());
        let recent = vec![log_entry(c.id, ReminderStatus::Sent, now() - Duration::days(6))];
        let stale = vec![log_entry(c.id, ReminderStatus::Sent, now() - Duration::days(8))];
        assert!(is_suppressed(c.id, &recent, now()));
        assert!(!is_suppressed(c.id, &stale, now()));
    }

    #[test]
    fn test_suppression_only_applies_to_the_contacted_customer() {
        let c = customer(Uuid::new_v4());
        let log = vec![log_entry(
            Uuid::new_v4(),
            ReminderStatus::Sent,
            now() - Duration::days(1),
        )];
        assert!(!is_suppressed(c.id, &log, now()));
    }

    #[test]
    fn test_coupon_expiring_boundary() {
        let commerce_id = Uuid::new_v4();
        let program = ProgramConfig::default();
        let mut c = customer(commerce_id);
        c.discount_available = true;

        // Exactly 72h away: not yet expiring
        c.discount_expires_at = Some(now() + Duration::hours(72));
        assert!(classify_one(&c, &program, &[], None).is_none());

        // 71h59m away: expiring, HIGH
        c.discount_expires_at = Some(now() + Duration::minutes(72 * 60 - 1));
        let candidate = classify_one(&c, &program, &[], None).unwrap();
        assert_eq!(candidate.kind, ReminderKind::CouponExpiring);
        assert_eq!(candidate.priority, Priority::High);
        assert_eq!(candidate.reason, "Cupón por vencer");
        assert_eq!(candidate.progress_text, "Vence en 71 h");

        // Already expired: no candidate from this rule
        c.discount_expires_at = Some(now() - Duration::minutes(1));
        assert!(classify_one(&c, &program, &[], None).is_none());
    }

    #[test]
    fn test_coupon_expiring_in_minutes() {
        let mut c = customer(Uuid::new_v4());
        c.discount_available = true;
        c.discount_expires_at = Some(now() + Duration::minutes(30));
        let candidate = classify_one(&c, &ProgramConfig::default(), &[], None).unwrap();
        assert_eq!(candidate.progress_text, "Vence en 30 min");
    }

    #[test]
    fn test_near_reward_points_band() {
        let commerce_id = Uuid::new_v4();
        let program = points_program();
        let rewards = vec![points_reward(commerce_id, 500)];
        let mut c = customer(commerce_id);

        // Exactly 90%: near
        c.total_points = 450;
        let candidate = classify_one(&c, &program, &rewards, None).unwrap();
        assert_eq!(candidate.kind, ReminderKind::NearReward);
        assert_eq!(candidate.priority, Priority::High);
        assert_eq!(candidate.reason, "A un paso del premio");
        assert_eq!(candidate.progress_text, "450 / 500 pts");

        // Just under 90%: not near
        c.total_points = 449;
        assert!(classify_one(&c, &program, &rewards, None).is_none());

        // Exactly 100%: ready to redeem, not "near" — no candidate at all
        c.total_points = 500;
        assert!(classify_one(&c, &program, &rewards, None).is_none());
    }

    #[test]
    fn test_near_reward_uses_lowest_active_threshold() {
        let commerce_id = Uuid::new_v4();
        let program = points_program();
        let mut inactive_reward = points_reward(commerce_id, 100);
        inactive_reward.is_active = false;
        let rewards = vec![
            points_reward(commerce_id, 1_000),
            points_reward(commerce_id, 200),
            inactive_reward,
        ];
        let mut c = customer(commerce_id);
        c.total_points = 180; // 90% of 200

        let candidate = classify_one(&c, &program, &rewards, None).unwrap();
        assert_eq!(candidate.progress_text, "180 / 200 pts");
    }

    #[test]
    fn test_near_reward_requires_points_enabled_and_configured() {
        let commerce_id = Uuid::new_v4();
        let mut c = customer(commerce_id);
        c.total_points = 450;

        // Reward exists but points disabled
        let rewards = vec![points_reward(commerce_id, 500)];
        assert!(classify_one(&c, &ProgramConfig::default(), &rewards, None).is_none());

        // Points enabled but no reward configured
        assert!(classify_one(&c, &points_program(), &[], None).is_none());
    }

    #[test]
    fn test_near_reward_stars_exactly_one_short() {
        let commerce_id = Uuid::new_v4();
        let program = stars_program(10);
        let mut c = customer(commerce_id);

        c.current_stars = 9;
        let candidate = classify_one(&c, &program, &[], None).unwrap();
        assert_eq!(candidate.kind, ReminderKind::NearReward);
        assert_eq!(candidate.reason, "A un sello del premio");
        assert_eq!(candidate.progress_text, "9 / 10 sellos");

        c.current_stars = 8;
        assert!(classify_one(&c, &program, &[], None).is_none());
        c.current_stars = 10;
        assert!(classify_one(&c, &program, &[], None).is_none());
    }

    #[test]
    fn test_near_reward_stars_skips_trivial_goal() {
        let mut c = customer(Uuid::new_v4());
        c.current_stars = 0;
        // goal 1 would make every new customer "one short"
        assert!(classify_one(&c, &stars_program(1), &[], None).is_none());
    }

    #[test]
    fn test_points_rule_wins_over_stars_rule() {
        let commerce_id = Uuid::new_v4();
        let program = ProgramConfig {
            enable_points: true,
            points_value: 10.0,
            enable_stars: true,
            stars_goal: 10,
            ..ProgramConfig::default()
        };
        let rewards = vec![points_reward(commerce_id, 500)];
        let mut c = customer(commerce_id);
        c.total_points = 460;
        c.current_stars = 9; // both rules would fire

        let candidate = classify_one(&c, &program, &rewards, None).unwrap();
        assert_eq!(candidate.reason, "A un paso del premio");
    }

    #[test]
    fn test_inactivity_day_boundaries() {
        let program = ProgramConfig::default();
        let c = customer(Uuid::new_v4());

        let expectations = [
            (14, None),
            (15, Some((Priority::Medium, "Inactivo reciente"))),
            (22, Some((Priority::Medium, "Inactivo reciente"))),
            (30, Some((Priority::Medium, "Inactivo reciente"))),
            (31, Some((Priority::Low, "Inactivo (+30 días)"))),
            (45, Some((Priority::Low, "Inactivo (+30 días)"))),
        ];
        for (days, expected) in expectations {
            let last = Some(now() - Duration::days(days));
            let candidate = classify_one(&c, &program, &[], last);
            match expected {
                None => assert!(candidate.is_none(), "day {} should be quiet", days),
                Some((priority, reason)) => {
                    let candidate = candidate.unwrap();
                    assert_eq!(candidate.kind, ReminderKind::Inactive);
                    assert_eq!(candidate.priority, priority, "day {}", days);
                    assert_eq!(candidate.reason, reason, "day {}", days);
                    assert_eq!(candidate.progress_text, format!("Hace {} días", days));
                }
            }
        }
    }

    #[test]
    fn test_never_visited_customer_yields_nothing() {
        let c = customer(Uuid::new_v4());
        assert!(classify_one(&c, &ProgramConfig::default(), &[], None).is_none());
    }

    #[test]
    fn test_candidates_end_to_end() {
        let commerce_id = Uuid::new_v4();
        let program = points_program();
        let rewards = vec![points_reward(commerce_id, 500)];

        let mut near = customer(commerce_id);
        near.total_points = 470;
        let mut idle = customer(commerce_id);
        idle.total_points = 10;
        let mut contacted = customer(commerce_id);
        contacted.total_points = 480;

        let visits = vec![
            visit(near.id, now() - Duration::days(2)),
            visit(idle.id, now() - Duration::days(20)),
            visit(contacted.id, now() - Duration::days(2)),
        ];
        let log = vec![log_entry(
            contacted.id,
            ReminderStatus::Opened,
            now() - Duration::days(2),
        )];

        let customers = vec![near.clone(), idle.clone(), contacted];
        let found = candidates(&customers, &program, &rewards, &visits, &log, now());

        assert_eq!(found.len(), 2);
        let near_found = found.iter().find(|c| c.customer_id == near.id).unwrap();
        assert_eq!(near_found.kind, ReminderKind::NearReward);
        assert_eq!(near_found.last_visit_at, Some(now() - Duration::days(2)));
        let idle_found = found.iter().find(|c| c.customer_id == idle.id).unwrap();
        assert_eq!(idle_found.kind, ReminderKind::Inactive);
        assert_eq!(idle_found.priority, Priority::Medium);
    }

    #[test]
    fn test_rule_table_order_is_the_documented_precedence() {
        let names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "coupon_expiring",
                "near_reward_points",
                "near_reward_stars",
                "inactive_recent",
                "inactive_long",
            ]
        );
    }
}
