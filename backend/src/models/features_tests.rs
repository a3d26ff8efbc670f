use super::*;
use chrono::NaiveDate;

#[test]
fn test_weekend_days() {
    let weekend: Vec<u8> = (0..DAYS_PER_WEEK).filter(|d| is_weekend_day(*d)).collect();
    assert_eq!(weekend, vec![5, 6]);
}

#[test]
fn test_for_slot_derives_weekend_flag() {
    assert_eq!(FeatureVector::for_slot(4, 18).is_weekend, 0);
    assert_eq!(FeatureVector::for_slot(5, 18).is_weekend, 1);
    assert_eq!(FeatureVector::for_slot(6, 0).is_weekend, 1);
}

#[test]
fn test_row_follows_training_column_order() {
    let fv = FeatureVector {
        day_of_week: 3,
        hour: 14,
        is_weekend: 0,
    };
    assert_eq!(fv.to_row(), [3.0, 14.0, 0.0]);
    assert_eq!(FEATURE_NAMES, ["day_of_week", "hour", "is_weekend"]);
}

#[test]
fn test_from_datetime_uses_monday_zero() {
    // 2024-06-01 was a Saturday.
    let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap();
    let fv = FeatureVector::from_datetime(ts);
    assert_eq!(fv.day_of_week, 5);
    assert_eq!(fv.hour, 18);
    assert_eq!(fv.is_weekend, 1);

    // 2024-06-04 was a Tuesday.
    let ts = NaiveDate::from_ymd_opt(2024, 6, 4)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    assert_eq!(FeatureVector::from_datetime(ts), FeatureVector::for_slot(1, 9));
}

#[test]
fn test_in_domain_bounds() {
    assert!(FeatureVector::for_slot(6, 23).in_domain());
    assert!(!FeatureVector {
        day_of_week: 7,
        hour: 0,
        is_weekend: 0
    }
    .in_domain());
    assert!(!FeatureVector {
        day_of_week: 0,
        hour: 24,
        is_weekend: 0
    }
    .in_domain());
    assert!(!FeatureVector {
        day_of_week: 0,
        hour: 0,
        is_weekend: 2
    }
    .in_domain());
}
