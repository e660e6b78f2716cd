use datespan::{divide_remainder, Duration};


mod division {
    use super::*;

    #[test]
    fn quotient_times_denominator_plus_remainder() {
        for value in [0_i64, 1, 59, 3_600, 86_399_999, 5_490_000, 987_654_321] {
            for denominator in [1_i64, 24, 60, 1_000, 86_400_000] {
                let (quotient, remainder) = divide_remainder(value, denominator);
                assert_eq!(quotient * denominator + remainder, value);
                assert!((0..denominator).contains(&remainder));
            }
        }
    }

    #[test]
    fn negative_values_floor() {
        assert_eq!(divide_remainder(-1, 86_400_000), (-1, 86_399_999));
    }
}

mod iso_strings {
    use super::*;

    #[test]
    fn one_hour() {
        assert_eq!(Duration::of(3_600_000).iso(), "0:01:00:00.000");
    }

    #[test]
    fn negative_sign_leads() {
        assert_eq!(Duration::of(-5_490_000).iso(), "-0:01:31:30.000");
    }

    #[test]
    fn a_few_days() {
        let duration = Duration::of(2 * 86_400_000 + 3 * 3_600_000 + 4 * 60_000 + 5_006);
        assert_eq!(duration.iso(), "2:03:04:05.006");
    }

    #[test]
    fn days_are_unpadded() {
        assert_eq!(Duration::of(123 * 86_400_000).iso(), "123:00:00:00.000");
    }
}

mod long_strings {
    use super::*;

    #[test]
    fn one_hour() {
        assert_eq!(Duration::of(3_600_000).long_form(),
                   "0 days, 1 hours, 0 minutes, 0.0 seconds");
    }

    #[test]
    fn milliseconds_stay_literal() {
        // The fraction is the raw remainder: 50ms renders as “.50”.
        assert_eq!(Duration::of(1_050).long_form(),
                   "0 days, 0 hours, 0 minutes, 1.50 seconds");
    }

    #[test]
    fn negative() {
        assert_eq!(Duration::of(-90_061_000).long_form(),
                   "-1 days, 1 hours, 1 minutes, 1.0 seconds");
    }
}
