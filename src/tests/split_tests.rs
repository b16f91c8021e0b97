use crate::models::SplitPolicy;
use crate::split::{ParticipantSpec, calculate_splits};
use uuid::Uuid;

fn participant(user_id: Uuid) -> ParticipantSpec {
    ParticipantSpec {
        user_id,
        amount: None,
        percentage: None,
        shares: None,
    }
}

fn with_amount(user_id: Uuid, amount: f64) -> ParticipantSpec {
    ParticipantSpec {
        amount: Some(amount),
        ..participant(user_id)
    }
}

fn with_percentage(user_id: Uuid, percentage: f64) -> ParticipantSpec {
    ParticipantSpec {
        percentage: Some(percentage),
        ..participant(user_id)
    }
}

fn with_shares(user_id: Uuid, shares: u32) -> ParticipantSpec {
    ParticipantSpec {
        shares: Some(shares),
        ..participant(user_id)
    }
}

#[test]
fn equal_split_gives_identical_rounded_shares() {
    let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let specs: Vec<ParticipantSpec> = users.iter().map(|&u| participant(u)).collect();

    let splits = calculate_splits(100.0, SplitPolicy::Equal, &specs).unwrap();

    assert_eq!(splits.len(), 3);
    for split in &splits {
        assert!((split.amount - 33.33).abs() < 1e-9);
        assert_eq!(split.percentage, None);
        assert_eq!(split.shares, None);
    }
}

#[test]
fn equal_split_single_participant_gets_full_amount() {
    let user = Uuid::new_v4();
    let splits = calculate_splits(75.5, SplitPolicy::Equal, &[participant(user)]).unwrap();

    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].user_id, user);
    assert_eq!(splits[0].amount, 75.5);
}

#[test]
fn equal_split_does_not_redistribute_rounding_remainder() {
    // 100 / 3 rounds to 33.33 each; the missing cent stays missing.
    let specs: Vec<ParticipantSpec> = (0..3).map(|_| participant(Uuid::new_v4())).collect();
    let splits = calculate_splits(100.0, SplitPolicy::Equal, &specs).unwrap();

    let sum: f64 = splits.iter().map(|s| s.amount).sum();
    assert!((sum - 99.99).abs() < 1e-9);
}

#[test]
fn exact_split_passes_amounts_through_in_order() {
    let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let specs = vec![
        with_amount(users[0], 30.0),
        with_amount(users[1], 45.0),
        with_amount(users[2], 25.0),
    ];

    let splits = calculate_splits(100.0, SplitPolicy::Exact, &specs).unwrap();

    assert_eq!(splits.len(), 3);
    assert_eq!(splits[0].user_id, users[0]);
    assert_eq!(splits[0].amount, 30.0);
    assert_eq!(splits[1].user_id, users[1]);
    assert_eq!(splits[1].amount, 45.0);
    assert_eq!(splits[2].user_id, users[2]);
    assert_eq!(splits[2].amount, 25.0);
}

#[test]
fn exact_split_rejects_mismatched_sum() {
    let specs = vec![
        with_amount(Uuid::new_v4(), 30.0),
        with_amount(Uuid::new_v4(), 45.0),
        with_amount(Uuid::new_v4(), 30.0),
    ];

    let err = calculate_splits(100.0, SplitPolicy::Exact, &specs).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Split amounts (105) do not equal total amount (100)"
    );
}

#[test]
fn exact_split_requires_amount_on_every_participant() {
    let specs = vec![with_amount(Uuid::new_v4(), 60.0), participant(Uuid::new_v4())];

    let err = calculate_splits(100.0, SplitPolicy::Exact, &specs).unwrap_err();
    assert_eq!(
        err.to_string(),
        "All participants must have exact amounts specified"
    );
}

#[test]
fn percentage_split_computes_amounts_and_echoes_percentages() {
    let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let specs = vec![
        with_percentage(users[0], 50.0),
        with_percentage(users[1], 30.0),
        with_percentage(users[2], 20.0),
    ];

    let splits = calculate_splits(200.0, SplitPolicy::Percentage, &specs).unwrap();

    assert_eq!(splits[0].amount, 100.0);
    assert_eq!(splits[0].percentage, Some(50.0));
    assert_eq!(splits[1].amount, 60.0);
    assert_eq!(splits[1].percentage, Some(30.0));
    assert_eq!(splits[2].amount, 40.0);
    assert_eq!(splits[2].percentage, Some(20.0));
}

#[test]
fn percentage_split_rejects_sum_away_from_hundred() {
    let specs = vec![
        with_percentage(Uuid::new_v4(), 50.0),
        with_percentage(Uuid::new_v4(), 40.0),
        with_percentage(Uuid::new_v4(), 20.0),
    ];

    let err = calculate_splits(200.0, SplitPolicy::Percentage, &specs).unwrap_err();
    assert_eq!(err.to_string(), "Split percentages (110%) do not equal 100%");
}

#[test]
fn percentage_split_requires_percentage_on_every_participant() {
    let specs = vec![with_percentage(Uuid::new_v4(), 100.0), participant(Uuid::new_v4())];

    let err = calculate_splits(50.0, SplitPolicy::Percentage, &specs).unwrap_err();
    assert_eq!(
        err.to_string(),
        "All participants must have percentages specified"
    );
}

#[test]
fn shares_split_divides_proportionally_and_echoes_shares() {
    let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let specs = vec![
        with_shares(users[0], 3),
        with_shares(users[1], 2),
        with_shares(users[2], 1),
    ];

    let splits = calculate_splits(600.0, SplitPolicy::Shares, &specs).unwrap();

    assert_eq!(splits[0].amount, 300.0);
    assert_eq!(splits[0].shares, Some(3));
    assert_eq!(splits[1].amount, 200.0);
    assert_eq!(splits[1].shares, Some(2));
    assert_eq!(splits[2].amount, 100.0);
    assert_eq!(splits[2].shares, Some(1));
}

#[test]
fn shares_split_rejects_zero_total_shares() {
    let specs = vec![with_shares(Uuid::new_v4(), 0), with_shares(Uuid::new_v4(), 0)];

    let err = calculate_splits(100.0, SplitPolicy::Shares, &specs).unwrap_err();
    assert_eq!(err.to_string(), "Total shares cannot be zero");
}

#[test]
fn shares_split_requires_shares_on_every_participant() {
    let specs = vec![with_shares(Uuid::new_v4(), 2), participant(Uuid::new_v4())];

    let err = calculate_splits(100.0, SplitPolicy::Shares, &specs).unwrap_err();
    assert_eq!(err.to_string(), "All participants must have shares specified");
}

#[test]
fn calculator_is_deterministic() {
    let specs = vec![
        with_shares(Uuid::new_v4(), 5),
        with_shares(Uuid::new_v4(), 7),
        with_shares(Uuid::new_v4(), 11),
    ];

    let first = calculate_splits(123.45, SplitPolicy::Shares, &specs).unwrap();
    let second = calculate_splits(123.45, SplitPolicy::Shares, &specs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_split_type_fails_to_parse() {
    let err = "weighted".parse::<SplitPolicy>().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported split type: weighted");

    assert_eq!("equal".parse::<SplitPolicy>().unwrap(), SplitPolicy::Equal);
    assert_eq!("shares".parse::<SplitPolicy>().unwrap(), SplitPolicy::Shares);
}
