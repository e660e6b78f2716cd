use datespan::parse::parse;
use datespan::{Delta, Duration, Instant};


fn date(input: &str) -> Instant {
    parse(input).unwrap()
}


mod fixed_increments {
    use super::*;

    #[test]
    fn days_first_then_hours() {
        let shifted = date("2024-12-27T13:30:00").add(&Delta::new().days(1).hours(2));
        assert_eq!(shifted, date("2024-12-28T15:30:00"));
    }

    #[test]
    fn negative_increments_go_backwards() {
        let shifted = date("2025-01-01T00:00:00").add(&Delta::new().seconds(-1));
        assert_eq!(shifted, date("2024-12-31T23:59:59"));
    }

    #[test]
    fn operators_agree_with_deltas() {
        let start = date("2024-12-27T00:00:00");
        assert_eq!(start + Duration::of(86_400_000), start.add(&Delta::new().days(1)));
    }
}

mod calendar_increments {
    use super::*;

    #[test]
    fn months_and_years() {
        assert_eq!(date("2024-04-15").add(&Delta::new().months(2)), date("2024-06-15"));
        assert_eq!(date("2024-04-15").add(&Delta::new().years(1)), date("2025-04-15"));
    }

    #[test]
    fn month_overflow_rolls_forward() {
        assert_eq!(date("2024-01-31").add(&Delta::new().months(1)), date("2024-03-02"));
        assert_eq!(date("2023-01-31").add(&Delta::new().months(1)), date("2023-03-03"));
    }

    #[test]
    fn wrapping_a_year_boundary() {
        assert_eq!(date("2024-11-30").add(&Delta::new().months(2)), date("2025-01-30"));
        assert_eq!(date("2025-02-15").add(&Delta::new().months(-3)), date("2024-11-15"));
    }

    #[test]
    fn explicit_zero_behaves_like_absence() {
        let instant = date("2024-06-30T12:00:00");
        assert_eq!(instant.add(&Delta::new().months(0)), instant);
        assert_eq!(instant.add(&Delta::new()), instant);
    }
}

mod day_bounds {
    use super::*;

    #[test]
    fn start_and_end_of_day() {
        let afternoon = date("2024-12-27T13:30:00");
        assert_eq!(afternoon.start_of_day(), date("2024-12-27T00:00:00"));
        assert_eq!(afternoon.end_of_day(), date("2024-12-27T23:59:59.999"));
    }

    #[test]
    fn bounds_are_idempotent() {
        let afternoon = date("2024-12-27T13:30:00");
        assert_eq!(afternoon.start_of_day().start_of_day(), afternoon.start_of_day());
    }
}

mod invalidity {
    use super::*;

    #[test]
    fn arithmetic_on_nothing_is_nothing() {
        assert!(!Instant::invalid().add(&Delta::new().years(1)).is_valid());
        assert!(!Instant::invalid().shift(60_000).is_valid());
    }
}
